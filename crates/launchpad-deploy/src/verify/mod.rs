//! Source verification of deployed contracts on a block explorer.
//!
//! The driver makes a single verification attempt per call and never fails:
//! the result is always a [`VerificationOutcome`]. An address whose source is
//! already published counts as verified.

pub mod etherscan;

use crate::artifacts::{ArtifactError, ArtifactStore};
use alloy_dyn_abi::DynSolValue;
use alloy_primitives::{Address, Bytes};
use async_trait::async_trait;
use launchpad_types::VerificationOutcome;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum ExplorerError {
	/// The explorer already has verified source for the address.
	#[error("Already Verified")]
	AlreadyVerified,
	/// The explorer refused the submission.
	#[error("Verification rejected: {0}")]
	Rejected(String),
	/// The explorer accepted the submission but could not verify it.
	#[error("Verification failed: {0}")]
	Failed(String),
	#[error("Verification still pending after {attempts} status checks")]
	Pending { attempts: u32 },
	#[error("Explorer request failed: {0}")]
	Http(String),
	#[error("Unexpected explorer response: {0}")]
	InvalidResponse(String),
	#[error("Explorer configuration error: {0}")]
	Configuration(String),
	#[error("Verification source unavailable: {0}")]
	Source(#[from] ArtifactError),
}

/// Everything an explorer needs to verify one contract.
#[derive(Debug, Clone, PartialEq)]
pub struct VerificationRequest {
	pub address: Address,
	/// `<source path>:<contract name>`.
	pub contract_identifier: String,
	pub compiler_version: String,
	/// Serialized solidity standard JSON input.
	pub standard_json_input: String,
	/// ABI-encoded constructor arguments, without selector.
	pub constructor_arguments: Bytes,
}

/// A block explorer that accepts source verification requests.
#[async_trait]
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait ExplorerClient: Send + Sync {
	/// Submits `request` and waits until the explorer has a final answer.
	///
	/// Implementations report [`ExplorerError::AlreadyVerified`] when they
	/// recognize the condition.
	async fn verify(&self, request: &VerificationRequest) -> Result<(), ExplorerError>;
}

/// Explorer rejections are free text. Any message mentioning prior
/// verification is treated as [`ExplorerError::AlreadyVerified`].
pub fn is_already_verified(message: &str) -> bool {
	message.to_ascii_lowercase().contains("already verified")
}

/// Publishes the source of deployed token contracts.
#[derive(Clone)]
pub struct VerificationDriver {
	explorer: Arc<dyn ExplorerClient>,
	artifacts: ArtifactStore,
	contract_name: String,
}

impl VerificationDriver {
	pub fn new(
		explorer: Arc<dyn ExplorerClient>,
		artifacts: ArtifactStore,
		contract_name: impl Into<String>,
	) -> Self {
		Self {
			explorer,
			artifacts,
			contract_name: contract_name.into(),
		}
	}

	/// Verifies the contract at `address`, deployed with `constructor_args`.
	pub async fn verify(
		&self,
		address: Address,
		constructor_args: &[DynSolValue],
	) -> VerificationOutcome {
		match self.try_verify(address, constructor_args).await {
			Ok(()) => {
				info!(address = %address, "Contract verified");
				VerificationOutcome::verified()
			},
			Err(ExplorerError::AlreadyVerified) => {
				info!(address = %address, "Contract already verified");
				VerificationOutcome::already_verified()
			},
			Err(e) if is_already_verified(&e.to_string()) => {
				info!(address = %address, "Contract already verified");
				VerificationOutcome::already_verified()
			},
			Err(e) => {
				warn!(address = %address, error = %e, "Verification failed");
				VerificationOutcome::failed(e.to_string())
			},
		}
	}

	async fn try_verify(
		&self,
		address: Address,
		constructor_args: &[DynSolValue],
	) -> Result<(), ExplorerError> {
		let artifact = self.artifacts.load(&self.contract_name).await?;
		let source = self.artifacts.verification_source(&artifact).await?;
		let constructor_arguments = artifact.encode_constructor_args(constructor_args)?;

		let standard_json_input = serde_json::to_string(&source.standard_json_input)
			.map_err(|e| ExplorerError::InvalidResponse(e.to_string()))?;

		let request = VerificationRequest {
			address,
			contract_identifier: source.contract_identifier,
			compiler_version: source.compiler_version,
			standard_json_input,
			constructor_arguments,
		};

		info!(
			address = %address,
			contract = %request.contract_identifier,
			compiler = %request.compiler_version,
			"Submitting source verification"
		);
		self.explorer.verify(&request).await
	}
}
