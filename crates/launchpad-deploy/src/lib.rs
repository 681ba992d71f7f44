//! Deployment and verification of launchpad token contracts.
//!
//! The pieces compose in one direction: a [`SessionResolver`] binds a
//! network name to a [`NetworkSession`], the [`DeploymentExecutor`] uses the
//! session's first signer and contract factory to submit the creation
//! transaction, and the [`VerificationDriver`] publishes the source of a
//! deployed contract to a block explorer. Failures are folded into
//! [`launchpad_types::DeploymentResult`] by the [`normalize`] module.

use thiserror::Error;

pub mod artifacts;
pub mod executor;
pub mod factory;
pub mod launcher;
#[cfg(test)]
mod mock_rpc;
pub mod node;
pub mod normalize;
pub mod session;
pub mod verify;

pub use artifacts::{ArtifactError, ArtifactStore, ContractArtifact, VerificationSource};
pub use executor::DeploymentExecutor;
pub use factory::{AlloyContractFactory, ContractFactory, DeployedContract};
pub use launcher::{LaunchDefaults, Launcher};
pub use node::LOCAL_CHAIN_ID;
pub use session::{AlloySession, NetworkSession, ProfileResolver, SessionResolver};
pub use verify::{
	etherscan::EtherscanClient, ExplorerClient, ExplorerError, VerificationDriver,
	VerificationRequest,
};

#[cfg(any(test, feature = "testing"))]
pub use factory::MockContractFactory;
#[cfg(any(test, feature = "testing"))]
pub use session::{MockNetworkSession, MockSessionResolver};
#[cfg(any(test, feature = "testing"))]
pub use verify::MockExplorerClient;

/// Errors raised while binding a network session.
#[derive(Debug, Error)]
pub enum SessionError {
	/// No profile is registered under the requested name.
	#[error("Unknown network '{0}'")]
	UnknownNetwork(String),
	/// A credential or endpoint placeholder referenced an unset variable.
	#[error("Network '{network}' requires environment variable '{variable}'")]
	MissingVariable { network: String, variable: String },
	/// The profile could not be turned into a working configuration.
	#[error("Invalid configuration for network '{network}': {reason}")]
	Configuration { network: String, reason: String },
	/// The node could not be started or did not answer the handshake.
	#[error("Failed to connect to network '{network}': {reason}")]
	Connection { network: String, reason: String },
	/// A configured private key could not be parsed.
	#[error("Invalid account for network '{network}': {reason}")]
	InvalidAccount { network: String, reason: String },
}

/// Errors raised while deploying through a bound session.
#[derive(Debug, Error)]
pub enum DeployError {
	#[error("No signer available on network '{network}'")]
	NoSigner { network: String },
	#[error("Failed to resolve contract factory for '{contract}': {reason}")]
	FactoryResolution { contract: String, reason: String },
	#[error("Failed to encode constructor arguments: {0}")]
	Encoding(String),
	#[error("{0}")]
	Transaction(String),
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_session_error_display() {
		let err = SessionError::UnknownNetwork("mainnet".to_string());
		assert_eq!(err.to_string(), "Unknown network 'mainnet'");

		let err = SessionError::MissingVariable {
			network: "sepolia".to_string(),
			variable: "SEPOLIA_RPC_URL".to_string(),
		};
		assert_eq!(
			err.to_string(),
			"Network 'sepolia' requires environment variable 'SEPOLIA_RPC_URL'"
		);
	}

	#[test]
	fn test_no_signer_names_network() {
		let err = DeployError::NoSigner {
			network: "sepolia".to_string(),
		};
		assert_eq!(err.to_string(), "No signer available on network 'sepolia'");
	}
}
