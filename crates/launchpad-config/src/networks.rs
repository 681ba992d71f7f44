//! Named network profiles.
//!
//! A profile binds a logical network name to either a private simulated
//! node or a remote JSON-RPC endpoint with signing credentials.

use crate::{env::resolve_env_vars, ConfigError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Network profiles keyed by their logical name.
pub type NetworkProfiles = HashMap<String, NetworkProfile>;

/// Chain family a profile targets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChainType {
	#[default]
	L1,
	Op,
}

impl fmt::Display for ChainType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ChainType::L1 => f.write_str("l1"),
			ChainType::Op => f.write_str("op"),
		}
	}
}

/// Connection settings for one logical network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NetworkProfile {
	/// A throwaway local node started for each session, with funded dev accounts.
	#[serde(alias = "edr-simulated")]
	Simulated {
		#[serde(default)]
		chain_type: ChainType,
		/// Chain id for the local node; the node's default when unset.
		#[serde(default)]
		chain_id: Option<u64>,
	},
	/// A remote JSON-RPC endpoint.
	Http {
		#[serde(default)]
		chain_type: ChainType,
		/// Endpoint URL; may contain `${VAR}` placeholders.
		url: String,
		/// Chain the endpoint must serve. Checked during the handshake, and
		/// used for explorer verification without contacting the node.
		#[serde(default)]
		chain_id: Option<u64>,
		/// Hex private keys, in signer order; may contain `${VAR}` placeholders.
		#[serde(default)]
		accounts: Vec<String>,
		/// Deadline for the confirmation wait. Unset leaves the client default.
		#[serde(default)]
		confirmation_timeout_secs: Option<u64>,
	},
}

impl NetworkProfile {
	pub fn chain_type(&self) -> ChainType {
		match self {
			NetworkProfile::Simulated { chain_type, .. } | NetworkProfile::Http { chain_type, .. } => {
				*chain_type
			},
		}
	}

	/// Chain id pinned by the profile, if any.
	pub fn chain_id(&self) -> Option<u64> {
		match self {
			NetworkProfile::Simulated { chain_id, .. } | NetworkProfile::Http { chain_id, .. } => {
				*chain_id
			},
		}
	}

	pub fn is_simulated(&self) -> bool {
		matches!(self, NetworkProfile::Simulated { .. })
	}

	/// Endpoint URL with placeholders substituted.
	///
	/// Returns `Ok(None)` for simulated profiles, whose endpoint is only known
	/// once the node is running.
	pub fn resolved_url(&self) -> Result<Option<String>, ConfigError> {
		match self {
			NetworkProfile::Simulated { .. } => Ok(None),
			NetworkProfile::Http { url, .. } => resolve_env_vars(url).map(Some),
		}
	}

	/// Private keys with placeholders substituted. Blank entries are dropped.
	pub fn resolved_accounts(&self) -> Result<Vec<String>, ConfigError> {
		match self {
			NetworkProfile::Simulated { .. } => Ok(Vec::new()),
			NetworkProfile::Http { accounts, .. } => {
				let mut keys = Vec::with_capacity(accounts.len());
				for account in accounts {
					let key = resolve_env_vars(account)?;
					if !key.trim().is_empty() {
						keys.push(key.trim().to_string());
					}
				}
				Ok(keys)
			},
		}
	}

	pub fn confirmation_timeout_secs(&self) -> Option<u64> {
		match self {
			NetworkProfile::Simulated { .. } => None,
			NetworkProfile::Http {
				confirmation_timeout_secs,
				..
			} => *confirmation_timeout_secs,
		}
	}

	/// Structural checks that do not need environment variables.
	pub(crate) fn validate(&self, name: &str) -> Result<(), ConfigError> {
		if let NetworkProfile::Http {
			url,
			confirmation_timeout_secs,
			..
		} = self
		{
			if url.trim().is_empty() {
				return Err(ConfigError::Validation(format!(
					"Network '{name}' must have a non-empty url"
				)));
			}
			// Placeholders are checked when the profile is used
			if !url.contains("${") && url::Url::parse(url).is_err() {
				return Err(ConfigError::Validation(format!(
					"Network '{name}' has an invalid url: {url}"
				)));
			}
			if *confirmation_timeout_secs == Some(0) {
				return Err(ConfigError::Validation(format!(
					"Network '{name}' confirmation_timeout_secs must be greater than zero"
				)));
			}
		}
		Ok(())
	}
}

/// Profiles available without a configuration file: two simulated local
/// chains and the Sepolia test network.
pub fn default_networks() -> NetworkProfiles {
	HashMap::from([
		(
			"hardhatMainnet".to_string(),
			NetworkProfile::Simulated {
				chain_type: ChainType::L1,
				chain_id: None,
			},
		),
		(
			"hardhatOp".to_string(),
			NetworkProfile::Simulated {
				chain_type: ChainType::Op,
				chain_id: None,
			},
		),
		(
			"sepolia".to_string(),
			NetworkProfile::Http {
				chain_type: ChainType::L1,
				url: "${SEPOLIA_RPC_URL}".to_string(),
				chain_id: Some(11_155_111),
				accounts: vec!["${SEPOLIA_PRIVATE_KEY}".to_string()],
				confirmation_timeout_secs: None,
			},
		),
	])
}
