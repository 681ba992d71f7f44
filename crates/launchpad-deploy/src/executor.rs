//! Deployment of a token contract through a bound network session.

use crate::{session::NetworkSession, DeployError};
use launchpad_types::{DeployedToken, DeploymentFailure, DeploymentResult, TokenSpec};
use tracing::{error, info};

/// Deploys token contracts. Holds no per-call state.
#[derive(Debug, Clone)]
pub struct DeploymentExecutor {
	contract_name: String,
}

impl DeploymentExecutor {
	pub fn new(contract_name: impl Into<String>) -> Self {
		Self {
			contract_name: contract_name.into(),
		}
	}

	/// Deploys `spec` using the session's first signer.
	///
	/// Always returns a result; failures are folded into
	/// [`DeploymentResult::Failed`]. Nothing is retried.
	pub async fn deploy(&self, spec: &TokenSpec, session: &dyn NetworkSession) -> DeploymentResult {
		match self.try_deploy(spec, session).await {
			Ok(token) => DeploymentResult::Deployed(token),
			Err(e) => {
				let failure = DeploymentFailure::from(e);
				error!(
					network = %session.network_name(),
					kind = %failure.kind,
					error = %failure.error_message,
					"Deployment failed"
				);
				DeploymentResult::Failed(failure)
			},
		}
	}

	async fn try_deploy(
		&self,
		spec: &TokenSpec,
		session: &dyn NetworkSession,
	) -> Result<DeployedToken, DeployError> {
		let network = session.network_name();
		let deployer = session
			.signers()
			.first()
			.copied()
			.ok_or_else(|| DeployError::NoSigner {
				network: network.clone(),
			})?;
		info!(network = %network, deployer = %deployer, "Deploying with account");

		let factory = session.contract_factory(&self.contract_name).await?;

		info!(
			contract = %self.contract_name,
			name = spec.name(),
			symbol = spec.symbol(),
			initial_supply = %spec.initial_supply(),
			"Submitting deployment"
		);
		let deployed = factory.deploy(deployer, spec.constructor_args()).await?;

		info!(
			network = %network,
			address = %deployed.address,
			tx_hash = ?deployed.transaction_hash,
			"Token deployed"
		);

		Ok(DeployedToken {
			address: deployed.address,
			name: spec.name().to_string(),
			symbol: spec.symbol().to_string(),
			transaction_hash: deployed.transaction_hash,
		})
	}
}
