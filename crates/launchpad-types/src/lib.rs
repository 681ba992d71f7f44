//! Common types for the token launchpad.
//!
//! This crate holds the data model shared by the deployment core, the HTTP
//! relay and the command-line tools: the token parameters, the normalized
//! deployment result and the verification outcome.

/// Request bodies accepted at the relay boundary.
pub mod api;
/// Normalized deployment results.
pub mod result;
/// Token parameters and their validation.
pub mod token;
/// Explorer verification outcomes.
pub mod verification;

pub use api::{DeployRequest, ErrorResponse, SupplyInput};
pub use result::{DeployedToken, DeploymentFailure, DeploymentResult, FailureKind};
pub use token::{parse_supply, TokenSpec, ValidationError, DEFAULT_INITIAL_SUPPLY};
pub use verification::VerificationOutcome;

// Re-exported so downstream crates agree on the primitive types.
pub use alloy_primitives::{Address, B256, U256};
