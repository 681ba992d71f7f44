//! Explorer verification outcomes.

use serde::{Deserialize, Serialize};

/// Result of one verification attempt.
///
/// Verification is advisory: an unverified outcome never invalidates the
/// deployment it follows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationOutcome {
	/// The explorer already had a verified record for the address.
	pub already_verified: bool,
	/// The contract source is verified on the explorer after this call.
	pub verified: bool,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub failure_reason: Option<String>,
}

impl VerificationOutcome {
	/// Freshly verified by this call.
	pub fn verified() -> Self {
		Self {
			already_verified: false,
			verified: true,
			failure_reason: None,
		}
	}

	/// The explorer reported an existing verification; treated as success.
	pub fn already_verified() -> Self {
		Self {
			already_verified: true,
			verified: true,
			failure_reason: None,
		}
	}

	pub fn failed(reason: impl Into<String>) -> Self {
		Self {
			already_verified: false,
			verified: false,
			failure_reason: Some(reason.into()),
		}
	}
}
