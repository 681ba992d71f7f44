//! Configuration for the token launchpad.
//!
//! Configuration is read from a TOML file. Every section is optional and
//! `Config::default()` describes a working setup: two simulated local
//! networks plus Sepolia, Etherscan verification and the relay on port 3001.
//!
//! Values containing `${VAR}` or `${VAR:-default}` placeholders are resolved
//! when they are used, not when the file is parsed. A profile that nobody
//! selects never needs its credentials to be present.

mod env;
pub mod networks;

pub use env::resolve_env_vars;
pub use networks::{default_networks, ChainType, NetworkProfile, NetworkProfiles};

use alloy_primitives::U256;
use launchpad_types::{SupplyInput, DEFAULT_INITIAL_SUPPLY};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error that occurs during file I/O operations.
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
	/// Error that occurs when parsing TOML configuration.
	#[error("Configuration error: {0}")]
	Parse(String),
	/// Error that occurs when configuration validation fails.
	#[error("Validation error: {0}")]
	Validation(String),
	/// A `${VAR}` placeholder referenced an unset variable with no default.
	#[error("Environment variable '{0}' not found")]
	MissingVariable(String),
}

impl From<toml::de::Error> for ConfigError {
	fn from(err: toml::de::Error) -> Self {
		ConfigError::Parse(err.message().to_string())
	}
}

/// Top-level launchpad configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
	#[serde(default)]
	pub deployment: DeploymentConfig,
	/// Named network profiles. A `[networks]` table in the file replaces the
	/// built-in set.
	#[serde(default = "default_networks")]
	pub networks: NetworkProfiles,
	/// Block explorer used for source verification.
	#[serde(default = "default_explorer")]
	pub explorer: Option<ExplorerConfig>,
	#[serde(default)]
	pub api: ApiConfig,
}

/// Deployment defaults shared by the CLI and the relay.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DeploymentConfig {
	/// Name of the compiled contract artifact to deploy.
	#[serde(default = "default_contract_name")]
	pub contract_name: String,
	/// Directory holding compiled artifacts (Hardhat or Foundry layout).
	#[serde(default = "default_artifacts_dir")]
	pub artifacts_dir: PathBuf,
	/// Network used by the CLI when none is given.
	#[serde(default = "default_cli_network")]
	pub default_network: String,
	/// Supply used when a request leaves it out.
	#[serde(
		default = "default_initial_supply",
		deserialize_with = "deserialize_supply",
		serialize_with = "serialize_supply"
	)]
	pub default_initial_supply: U256,
}

impl Default for DeploymentConfig {
	fn default() -> Self {
		Self {
			contract_name: default_contract_name(),
			artifacts_dir: default_artifacts_dir(),
			default_network: default_cli_network(),
			default_initial_supply: default_initial_supply(),
		}
	}
}

/// Etherscan-compatible explorer settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ExplorerConfig {
	/// API endpoint; the Etherscan v2 multichain endpoint by default.
	#[serde(default = "default_explorer_url")]
	pub api_url: String,
	/// API key; may contain `${VAR}` placeholders.
	#[serde(default = "default_explorer_api_key")]
	pub api_key: String,
	/// Seconds between verification status checks.
	#[serde(default = "default_poll_interval_secs")]
	pub poll_interval_secs: u64,
	/// Status checks made before giving up on a pending verification.
	#[serde(default = "default_max_status_checks")]
	pub max_status_checks: u32,
	/// Directory with compiler build-info files. Defaults to
	/// `<artifacts_dir>/build-info`.
	#[serde(default)]
	pub build_info_dir: Option<PathBuf>,
}

impl Default for ExplorerConfig {
	fn default() -> Self {
		Self {
			api_url: default_explorer_url(),
			api_key: default_explorer_api_key(),
			poll_interval_secs: default_poll_interval_secs(),
			max_status_checks: default_max_status_checks(),
			build_info_dir: None,
		}
	}
}

impl ExplorerConfig {
	/// API key with placeholders substituted.
	pub fn resolved_api_key(&self) -> Result<String, ConfigError> {
		resolve_env_vars(&self.api_key)
	}
}

/// HTTP relay settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ApiConfig {
	/// Host address to bind the server to.
	#[serde(default = "default_api_host")]
	pub host: String,
	/// Port to bind the server to.
	#[serde(default = "default_api_port")]
	pub port: u16,
	/// Network used for requests that do not name one.
	#[serde(default = "default_api_network")]
	pub default_network: String,
}

impl Default for ApiConfig {
	fn default() -> Self {
		Self {
			host: default_api_host(),
			port: default_api_port(),
			default_network: default_api_network(),
		}
	}
}

fn default_contract_name() -> String {
	"TokenLauncher".to_string()
}

fn default_artifacts_dir() -> PathBuf {
	PathBuf::from("artifacts")
}

/// The CLI targets the first simulated network by default.
fn default_cli_network() -> String {
	"hardhatMainnet".to_string()
}

fn default_initial_supply() -> U256 {
	U256::from(DEFAULT_INITIAL_SUPPLY)
}

fn default_explorer() -> Option<ExplorerConfig> {
	Some(ExplorerConfig::default())
}

fn default_explorer_url() -> String {
	"https://api.etherscan.io/v2/api".to_string()
}

fn default_explorer_api_key() -> String {
	"${ETHERSCAN_API_KEY}".to_string()
}

fn default_poll_interval_secs() -> u64 {
	5
}

fn default_max_status_checks() -> u32 {
	12
}

fn default_api_host() -> String {
	"127.0.0.1".to_string()
}

fn default_api_port() -> u16 {
	3001
}

/// The relay targets the public test network by default.
fn default_api_network() -> String {
	"sepolia".to_string()
}

/// Accepts the supply as a TOML integer or a decimal string, for values
/// beyond the integer range.
fn deserialize_supply<'de, D>(deserializer: D) -> Result<U256, D::Error>
where
	D: Deserializer<'de>,
{
	let input = SupplyInput::deserialize(deserializer)?;
	match input.to_supply() {
		Ok(Some(supply)) => Ok(supply),
		Ok(None) => Ok(default_initial_supply()),
		Err(e) => Err(serde::de::Error::custom(e)),
	}
}

fn serialize_supply<S>(supply: &U256, serializer: S) -> Result<S::Ok, S::Error>
where
	S: Serializer,
{
	serializer.serialize_str(&supply.to_string())
}

impl Default for Config {
	fn default() -> Self {
		Self {
			deployment: DeploymentConfig::default(),
			networks: default_networks(),
			explorer: default_explorer(),
			api: ApiConfig::default(),
		}
	}
}

impl Config {
	/// Loads configuration from a TOML file.
	pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		let path = path.as_ref();
		let contents = tokio::fs::read_to_string(path).await?;
		let config: Config = contents.parse()?;
		tracing::debug!(path = %path.display(), networks = config.networks.len(), "Loaded configuration");
		Ok(config)
	}

	/// Loads `.env` from the working directory, then the given file, or the
	/// built-in defaults when no file is given.
	pub async fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
		if let Ok(env_file) = dotenvy::dotenv() {
			tracing::debug!(path = %env_file.display(), "Loaded environment file");
		}

		match path {
			Some(path) => Self::from_file(path).await,
			None => Ok(Self::default()),
		}
	}

	/// Profile registered under `name`.
	pub fn network(&self, name: &str) -> Option<&NetworkProfile> {
		self.networks.get(name)
	}

	/// Directory with compiler build-info files for verification.
	pub fn build_info_dir(&self) -> PathBuf {
		self.explorer
			.as_ref()
			.and_then(|explorer| explorer.build_info_dir.clone())
			.unwrap_or_else(|| self.deployment.artifacts_dir.join("build-info"))
	}

	/// Checks cross-section consistency.
	///
	/// Default networks must name configured profiles. Placeholders are not
	/// resolved here.
	fn validate(&self) -> Result<(), ConfigError> {
		if self.deployment.contract_name.trim().is_empty() {
			return Err(ConfigError::Validation(
				"Contract name cannot be empty".into(),
			));
		}

		if self.networks.is_empty() {
			return Err(ConfigError::Validation(
				"At least one network must be configured".into(),
			));
		}

		for (name, profile) in &self.networks {
			profile.validate(name)?;
		}

		for (section, network) in [
			("deployment", &self.deployment.default_network),
			("api", &self.api.default_network),
		] {
			if !self.networks.contains_key(network) {
				return Err(ConfigError::Validation(format!(
					"{section}.default_network '{network}' is not a configured network"
				)));
			}
		}

		if let Some(explorer) = &self.explorer {
			if explorer.api_url.trim().is_empty() {
				return Err(ConfigError::Validation(
					"Explorer api_url cannot be empty".into(),
				));
			}
			if explorer.max_status_checks == 0 {
				return Err(ConfigError::Validation(
					"Explorer max_status_checks must be greater than zero".into(),
				));
			}
		}

		Ok(())
	}
}

/// Parses and validates a TOML document.
impl FromStr for Config {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let config: Config = toml::from_str(s)?;
		config.validate()?;
		Ok(config)
	}
}
