//! Shared plumbing for the `deploy-token` and `verify-token` binaries.

pub mod args;
pub mod logging;
pub mod output;

use anyhow::{anyhow, bail, Context, Result};
use launchpad_config::Config;
use launchpad_deploy::{
	ArtifactStore, EtherscanClient, LaunchDefaults, Launcher, ProfileResolver, VerificationDriver,
};
use launchpad_types::{DeploymentResult, VerificationOutcome};
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Loads `.env` and the configuration file, or the built-in defaults.
pub async fn load_config(path: Option<&Path>) -> Result<Config> {
	Config::load(path)
		.await
		.context("Failed to load configuration")
}

fn artifact_store(config: &Config) -> ArtifactStore {
	ArtifactStore::new(&config.deployment.artifacts_dir).with_build_info_dir(config.build_info_dir())
}

fn resolver(config: &Config) -> ProfileResolver {
	ProfileResolver::new(config.networks.clone(), artifact_store(config))
}

/// Launcher targeting `network`, or the configured deployment network.
///
/// # Arguments
/// * `config` - Loaded configuration
/// * `network` - Network named on the command line, if any
pub fn launcher(config: &Config, network: Option<String>) -> Launcher {
	Launcher::new(
		Arc::new(resolver(config)),
		LaunchDefaults {
			network: network.unwrap_or_else(|| config.deployment.default_network.clone()),
			initial_supply: config.deployment.default_initial_supply,
			contract_name: config.deployment.contract_name.clone(),
		},
	)
}

/// Verification driver for the explorer of the chain `network` serves.
///
/// The chain id comes from the network profile, or from the endpoint when
/// the profile does not pin one.
///
/// # Arguments
/// * `config` - Loaded configuration
/// * `network` - Network the contract was deployed to
///
/// # Errors
///
/// Fails without an `[explorer]` section, for unknown or simulated networks,
/// and when the chain id or the API key cannot be resolved.
pub async fn verification_driver(config: &Config, network: &str) -> Result<VerificationDriver> {
	let explorer = config
		.explorer
		.as_ref()
		.ok_or_else(|| anyhow!("No [explorer] section configured"))?;

	let profile = config
		.network(network)
		.ok_or_else(|| anyhow!("Unknown network '{network}'"))?;
	if profile.is_simulated() {
		bail!(
			"Network '{network}' is a local simulated network with no block explorer; \
			 choose a remote network with --network"
		);
	}

	let chain_id = resolver(config)
		.chain_id(network)
		.await
		.context("Failed to determine the explorer chain")?;
	let client = EtherscanClient::from_config(explorer, chain_id)?;
	info!(network, chain_id, "Using explorer chain");

	Ok(VerificationDriver::new(
		Arc::new(client),
		artifact_store(config),
		config.deployment.contract_name.clone(),
	))
}

/// Prints a deployment result. Returns true on success.
pub fn print_deployment(result: &DeploymentResult) -> bool {
	match result {
		DeploymentResult::Deployed(token) => {
			println!("{}", output::deployed_token(token));
			info!(address = %token.address, "Token deployed");
			true
		},
		DeploymentResult::Failed(failure) => {
			eprintln!("{}", output::deployment_failure(failure));
			error!(kind = %failure.kind, error = %failure.error_message, "Deployment failed");
			false
		},
	}
}

/// Prints a verification outcome. Returns true when the source is verified.
pub fn print_verification(outcome: &VerificationOutcome) -> bool {
	println!("{}", output::verification(outcome));
	if outcome.verified {
		info!(already_verified = outcome.already_verified, "Source verified");
	} else {
		warn!(reason = ?outcome.failure_reason, "Verification failed");
	}
	outcome.verified
}
