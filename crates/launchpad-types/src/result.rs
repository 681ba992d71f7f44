//! Normalized deployment results.
//!
//! Every deployment attempt ends in exactly one [`DeploymentResult`]. The wire
//! form is flat JSON with a `success` flag, which is what the relay returns
//! and the browser form reads.

use alloy_primitives::{Address, B256};
use serde::Serialize;
use std::fmt;

/// Message used when an underlying failure carries no text of its own.
pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown deployment error";

/// A token contract that was deployed and confirmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployedToken {
	pub address: Address,
	pub name: String,
	pub symbol: String,
	/// Hash of the creation transaction, when the client reported one.
	pub transaction_hash: Option<B256>,
}

/// Coarse classification of a failed deployment, for diagnostics only.
///
/// The classification is not part of the wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
	/// The network profile could not be bound to a live session.
	NetworkResolution,
	/// The session has no signing identity.
	NoSigner,
	/// The contract artifact is unknown to the session.
	FactoryResolution,
	/// Submission, execution or confirmation of the creation transaction failed.
	Transaction,
	/// Caller input was rejected before anything was sent.
	InvalidRequest,
	/// Anything not covered above.
	Unknown,
}

impl fmt::Display for FailureKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let label = match self {
			FailureKind::NetworkResolution => "network_resolution",
			FailureKind::NoSigner => "no_signer",
			FailureKind::FactoryResolution => "factory_resolution",
			FailureKind::Transaction => "transaction",
			FailureKind::InvalidRequest => "invalid_request",
			FailureKind::Unknown => "unknown",
		};
		f.write_str(label)
	}
}

/// A failed deployment with a human-readable message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentFailure {
	pub kind: FailureKind,
	pub error_message: String,
}

impl DeploymentFailure {
	/// Builds a failure from any message, substituting a generic text for
	/// empty ones.
	pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
		let message = message.into();
		let error_message = if message.trim().is_empty() {
			UNKNOWN_ERROR_MESSAGE.to_string()
		} else {
			message
		};

		Self {
			kind,
			error_message,
		}
	}

	/// Builds a failure from an error's display text.
	pub fn from_error(kind: FailureKind, error: &(dyn std::error::Error + 'static)) -> Self {
		Self::new(kind, error.to_string())
	}
}

/// Outcome of a single deployment call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "WireResult")]
pub enum DeploymentResult {
	Deployed(DeployedToken),
	Failed(DeploymentFailure),
}

impl DeploymentResult {
	pub fn failed(kind: FailureKind, message: impl Into<String>) -> Self {
		Self::Failed(DeploymentFailure::new(kind, message))
	}

	pub fn is_success(&self) -> bool {
		matches!(self, Self::Deployed(_))
	}

	/// Deployed contract address, if the deployment succeeded.
	pub fn address(&self) -> Option<Address> {
		match self {
			Self::Deployed(token) => Some(token.address),
			Self::Failed(_) => None,
		}
	}

	/// Failure message, if the deployment failed.
	pub fn error_message(&self) -> Option<&str> {
		match self {
			Self::Deployed(_) => None,
			Self::Failed(failure) => Some(&failure.error_message),
		}
	}
}

impl From<DeploymentFailure> for DeploymentResult {
	fn from(failure: DeploymentFailure) -> Self {
		Self::Failed(failure)
	}
}

/// Flat JSON representation shared with the browser form.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WireResult {
	success: bool,
	#[serde(skip_serializing_if = "Option::is_none")]
	address: Option<Address>,
	#[serde(skip_serializing_if = "Option::is_none")]
	name: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	symbol: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	transaction_hash: Option<B256>,
	#[serde(skip_serializing_if = "Option::is_none")]
	error: Option<String>,
}

impl From<DeploymentResult> for WireResult {
	fn from(result: DeploymentResult) -> Self {
		match result {
			DeploymentResult::Deployed(token) => WireResult {
				success: true,
				address: Some(token.address),
				name: Some(token.name),
				symbol: Some(token.symbol),
				transaction_hash: token.transaction_hash,
				error: None,
			},
			DeploymentResult::Failed(failure) => WireResult {
				success: false,
				address: None,
				name: None,
				symbol: None,
				transaction_hash: None,
				error: Some(failure.error_message),
			},
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	fn deployed(hash: Option<B256>) -> DeploymentResult {
		DeploymentResult::Deployed(DeployedToken {
			address: Address::repeat_byte(0x11),
			name: "Test".to_string(),
			symbol: "TST".to_string(),
			transaction_hash: hash,
		})
	}

	#[test]
	fn test_success_serializes_flat() {
		let value = serde_json::to_value(deployed(Some(B256::repeat_byte(0xab)))).unwrap();

		assert_eq!(value["success"], json!(true));
		assert_eq!(
			value["address"],
			json!("0x1111111111111111111111111111111111111111")
		);
		assert_eq!(value["name"], json!("Test"));
		assert_eq!(value["symbol"], json!("TST"));
		assert_eq!(value["transactionHash"], json!(format!("0x{}", "ab".repeat(32))));
		assert!(value.get("error").is_none());
	}

	#[test]
	fn test_missing_hash_is_omitted_not_failure() {
		let result = deployed(None);
		assert!(result.is_success());

		let value = serde_json::to_value(result).unwrap();
		assert_eq!(value["success"], json!(true));
		assert!(value.get("transactionHash").is_none());
	}

	#[test]
	fn test_failure_serializes_error_only() {
		let result = DeploymentResult::failed(FailureKind::NoSigner, "No signer available");
		let value = serde_json::to_value(&result).unwrap();

		assert_eq!(value, json!({"success": false, "error": "No signer available"}));
		assert_eq!(result.error_message(), Some("No signer available"));
		assert_eq!(result.address(), None);
	}

	#[test]
	fn test_empty_message_falls_back_to_generic_text() {
		let failure = DeploymentFailure::new(FailureKind::Unknown, "  ");
		assert_eq!(failure.error_message, UNKNOWN_ERROR_MESSAGE);
	}

	#[test]
	fn test_from_error_keeps_display_text() {
		let io = std::io::Error::new(std::io::ErrorKind::Other, "connection reset");
		let failure = DeploymentFailure::from_error(FailureKind::Transaction, &io);
		assert_eq!(failure.error_message, "connection reset");
		assert_eq!(failure.kind, FailureKind::Transaction);
	}
}
