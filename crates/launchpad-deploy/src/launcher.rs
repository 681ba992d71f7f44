//! Entry point shared by the CLI and the relay: applies defaults, binds a
//! session and runs the executor.

use crate::{executor::DeploymentExecutor, session::SessionResolver};
use alloy_primitives::U256;
use launchpad_types::{
	DeployRequest, DeploymentFailure, DeploymentResult, TokenSpec, ValidationError,
};
use std::sync::Arc;
use tracing::{error, info};

/// Values applied when a caller leaves them out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchDefaults {
	/// Network used when a call names none.
	pub network: String,
	/// Supply used when a call gives none.
	pub initial_supply: U256,
	/// Compiled contract every launch deploys.
	pub contract_name: String,
}

impl LaunchDefaults {
	/// Builds a token spec, falling back to the default supply.
	///
	/// # Arguments
	/// * `name` - Token name, must not be blank
	/// * `symbol` - Token symbol, must not be blank
	/// * `initial_supply` - Explicit supply; `None` uses the default, `Some(0)` is kept
	pub fn token_spec(
		&self,
		name: &str,
		symbol: &str,
		initial_supply: Option<U256>,
	) -> Result<TokenSpec, ValidationError> {
		TokenSpec::new(name, symbol, initial_supply.unwrap_or(self.initial_supply))
	}

	/// Validates a relay request and builds its token spec.
	///
	/// # Arguments
	/// * `request` - Decoded `POST /api/deploy` body
	///
	/// # Errors
	///
	/// [`ValidationError::MissingNameOrSymbol`] for a blank name or symbol, and
	/// [`ValidationError::InvalidSupply`] for a supply that is not a
	/// non-negative integer.
	pub fn from_request(&self, request: &DeployRequest) -> Result<TokenSpec, ValidationError> {
		if !request.has_name_and_symbol() {
			return Err(ValidationError::MissingNameOrSymbol);
		}
		let supply = request.supply()?;
		self.token_spec(
			request.name.as_deref().unwrap_or_default(),
			request.symbol.as_deref().unwrap_or_default(),
			supply,
		)
	}
}

/// Resolves a session for each call and deploys through it.
#[derive(Clone)]
pub struct Launcher {
	resolver: Arc<dyn SessionResolver>,
	executor: DeploymentExecutor,
	defaults: LaunchDefaults,
}

impl Launcher {
	/// Creates a launcher deploying `defaults.contract_name`.
	///
	/// # Arguments
	/// * `resolver` - Binds network names to sessions, once per launch
	/// * `defaults` - Values for whatever a call leaves out
	pub fn new(resolver: Arc<dyn SessionResolver>, defaults: LaunchDefaults) -> Self {
		let executor = DeploymentExecutor::new(defaults.contract_name.clone());
		Self {
			resolver,
			executor,
			defaults,
		}
	}

	pub fn defaults(&self) -> &LaunchDefaults {
		&self.defaults
	}

	/// Deploys `spec` to `network`, or to the default network when none is
	/// given. The session is dropped before this returns.
	///
	/// # Arguments
	/// * `spec` - Validated token parameters
	/// * `network` - Network profile name; `None` uses the default
	pub async fn launch(&self, spec: &TokenSpec, network: Option<&str>) -> DeploymentResult {
		let network = network.unwrap_or(self.defaults.network.as_str());
		info!(network, name = spec.name(), symbol = spec.symbol(), "Deploying token");

		let session = match self.resolver.resolve(network).await {
			Ok(session) => session,
			Err(e) => {
				error!(network, error = %e, "Failed to resolve network session");
				return DeploymentFailure::from(e).into();
			},
		};

		self.executor.deploy(spec, session.as_ref()).await
	}
}
