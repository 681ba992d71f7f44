//! Network sessions: a connection to one named network, its signing
//! identities and its contract factories.
//!
//! A session is created per call and dropped when the call completes.
//! Sessions for simulated profiles own their local node.

use crate::{
	artifacts::ArtifactStore,
	factory::{AlloyContractFactory, ContractFactory},
	node::{LocalNode, DEV_PRIVATE_KEYS, LOCAL_CHAIN_ID},
	DeployError, SessionError,
};
use alloy_network::EthereumWallet;
use alloy_primitives::Address;
use alloy_provider::{DynProvider, Provider, ProviderBuilder};
use alloy_signer_local::PrivateKeySigner;
use async_trait::async_trait;
use launchpad_config::{ConfigError, NetworkProfile, NetworkProfiles};
use std::time::Duration;
use tracing::{debug, info};

/// A live connection to one named network.
#[async_trait]
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait NetworkSession: Send + Sync {
	/// Logical name the session was resolved from.
	fn network_name(&self) -> String;

	/// Addresses that can sign on this network, in configuration order.
	fn signers(&self) -> Vec<Address>;

	/// Factory for the named compiled contract.
	async fn contract_factory(
		&self,
		contract_name: &str,
	) -> Result<Box<dyn ContractFactory>, DeployError>;
}

/// Binds network names to sessions.
#[async_trait]
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait SessionResolver: Send + Sync {
	/// Resolves exactly the named profile; no default is substituted.
	async fn resolve(&self, network: &str) -> Result<Box<dyn NetworkSession>, SessionError>;
}

/// Session backed by an alloy provider.
pub struct AlloySession {
	network: String,
	provider: DynProvider,
	signers: Vec<Address>,
	artifacts: ArtifactStore,
	confirmation_timeout: Option<Duration>,
	// Held so the simulated node lives exactly as long as the session
	_node: Option<LocalNode>,
}

#[async_trait]
impl NetworkSession for AlloySession {
	fn network_name(&self) -> String {
		self.network.clone()
	}

	fn signers(&self) -> Vec<Address> {
		self.signers.clone()
	}

	async fn contract_factory(
		&self,
		contract_name: &str,
	) -> Result<Box<dyn ContractFactory>, DeployError> {
		let artifact = self
			.artifacts
			.load(contract_name)
			.await
			.map_err(|e| DeployError::FactoryResolution {
				contract: contract_name.to_string(),
				reason: e.to_string(),
			})?;

		Ok(Box::new(AlloyContractFactory::new(
			self.provider.clone(),
			artifact,
			self.confirmation_timeout,
		)))
	}
}

/// Resolves sessions from configured network profiles.
#[derive(Debug, Clone)]
pub struct ProfileResolver {
	profiles: NetworkProfiles,
	artifacts: ArtifactStore,
}

impl ProfileResolver {
	pub fn new(profiles: NetworkProfiles, artifacts: ArtifactStore) -> Self {
		Self {
			profiles,
			artifacts,
		}
	}

	fn profile(&self, network: &str) -> Result<&NetworkProfile, SessionError> {
		self.profiles
			.get(network)
			.ok_or_else(|| SessionError::UnknownNetwork(network.to_string()))
	}

	/// Chain id of `network`.
	///
	/// A chain id pinned on the profile is returned as is. Otherwise remote
	/// endpoints are asked, and simulated profiles report the local node
	/// default without starting a node.
	///
	/// # Arguments
	/// * `network` - Name of a configured profile
	pub async fn chain_id(&self, network: &str) -> Result<u64, SessionError> {
		let profile = self.profile(network)?;
		if let Some(chain_id) = profile.chain_id() {
			return Ok(chain_id);
		}

		match profile {
			NetworkProfile::Simulated { .. } => Ok(LOCAL_CHAIN_ID),
			NetworkProfile::Http { .. } => {
				let endpoint = profile
					.resolved_url()
					.map_err(|e| config_error(network, e))?
					.unwrap_or_default();
				let provider = ProviderBuilder::new()
					.connect_http(endpoint_url(network, &endpoint)?)
					.erased();
				handshake(network, &provider, None).await
			},
		}
	}
}

#[async_trait]
impl SessionResolver for ProfileResolver {
	async fn resolve(&self, network: &str) -> Result<Box<dyn NetworkSession>, SessionError> {
		let profile = self.profile(network)?;

		let (endpoint, keys, node) = match profile {
			NetworkProfile::Simulated {
				chain_id,
				chain_type,
			} => {
				let node = LocalNode::spawn(*chain_id, *chain_type)
					.await
					.map_err(|reason| SessionError::Connection {
						network: network.to_string(),
						reason,
					})?;
				let keys = DEV_PRIVATE_KEYS.iter().map(|k| k.to_string()).collect();
				(node.endpoint(), keys, Some(node))
			},
			NetworkProfile::Http { .. } => {
				let url = profile
					.resolved_url()
					.map_err(|e| config_error(network, e))?
					.unwrap_or_default();
				let keys = profile
					.resolved_accounts()
					.map_err(|e| config_error(network, e))?;
				(url, keys, None)
			},
		};

		let url = endpoint_url(network, &endpoint)?;

		let signers = keys
			.iter()
			.map(|key| key.parse::<PrivateKeySigner>())
			.collect::<Result<Vec<_>, _>>()
			.map_err(|e| SessionError::InvalidAccount {
				network: network.to_string(),
				reason: e.to_string(),
			})?;
		let addresses: Vec<Address> = signers.iter().map(|s| s.address()).collect();

		let provider = match build_wallet(signers) {
			Some(wallet) => ProviderBuilder::new().wallet(wallet).connect_http(url).erased(),
			None => ProviderBuilder::new().connect_http(url).erased(),
		};

		let chain_id = handshake(network, &provider, profile.chain_id()).await?;

		info!(
			network,
			chain_id,
			chain_type = %profile.chain_type(),
			simulated = profile.is_simulated(),
			signers = addresses.len(),
			"Network session ready"
		);

		Ok(Box::new(AlloySession {
			network: network.to_string(),
			provider,
			signers: addresses,
			artifacts: self.artifacts.clone(),
			confirmation_timeout: profile.confirmation_timeout_secs().map(Duration::from_secs),
			_node: node,
		}))
	}
}

fn config_error(network: &str, err: ConfigError) -> SessionError {
	match err {
		ConfigError::MissingVariable(variable) => SessionError::MissingVariable {
			network: network.to_string(),
			variable,
		},
		other => SessionError::Configuration {
			network: network.to_string(),
			reason: other.to_string(),
		},
	}
}

fn endpoint_url(network: &str, endpoint: &str) -> Result<url::Url, SessionError> {
	endpoint.parse().map_err(|e| SessionError::Configuration {
		network: network.to_string(),
		reason: format!("Invalid RPC URL: {e}"),
	})
}

/// Reads the endpoint's chain id; it must equal `expected` when one is set.
async fn handshake(
	network: &str,
	provider: &DynProvider,
	expected: Option<u64>,
) -> Result<u64, SessionError> {
	let chain_id = provider
		.get_chain_id()
		.await
		.map_err(|e| SessionError::Connection {
			network: network.to_string(),
			reason: e.to_string(),
		})?;

	match expected {
		Some(expected) if expected != chain_id => Err(SessionError::Configuration {
			network: network.to_string(),
			reason: format!("endpoint serves chain {chain_id}, expected chain {expected}"),
		}),
		_ => Ok(chain_id),
	}
}

/// Wallet holding every signer; the first one is the default.
fn build_wallet(signers: Vec<PrivateKeySigner>) -> Option<EthereumWallet> {
	let mut signers = signers.into_iter();
	let mut wallet = EthereumWallet::from(signers.next()?);
	for signer in signers {
		debug!(address = %signer.address(), "Registering additional signer");
		wallet.register_signer(signer);
	}
	Some(wallet)
}
