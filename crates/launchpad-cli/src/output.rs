//! Terminal rendering of launchpad results.
//!
//! Each function returns the text for one result and leaves the choice of
//! stream to the caller. Colors follow `colored`'s terminal detection and the
//! `NO_COLOR` convention.

use alloy_primitives::Address;
use colored::Colorize;
use launchpad_types::{DeployedToken, DeploymentFailure, TokenSpec, VerificationOutcome};
use std::fmt::{self, Write};

/// Width of the label column in field listings.
const LABEL_WIDTH: usize = 16;

/// Underlined title introducing an operation.
fn title(text: &str) -> String {
	format!(
		"\n{}\n{}\n",
		text.bold().cyan(),
		"─".repeat(text.chars().count()).cyan()
	)
}

fn field(out: &mut String, label: &str, value: impl fmt::Display) {
	let label = format!("{:<LABEL_WIDTH$}", format!("{label}:"));
	let _ = writeln!(out, "  {} {}", label.bold(), value);
}

/// Describes a deployment before it is submitted.
///
/// # Arguments
/// * `spec` - Token about to be deployed
/// * `network` - Network profile the deployment targets
pub fn deployment_plan(spec: &TokenSpec, network: &str) -> String {
	let mut out = title(&format!("Deploying {} ({})", spec.name(), spec.symbol()));
	field(&mut out, "Network", network);
	field(&mut out, "Initial supply", spec.initial_supply());
	out
}

/// Address, name, symbol and creation transaction of a deployed token.
///
/// # Arguments
/// * `token` - Successful deployment result
pub fn deployed_token(token: &DeployedToken) -> String {
	let mut out = format!("{} Token deployed\n", "✓".green().bold());
	field(&mut out, "Address", token.address);
	field(&mut out, "Name", &token.name);
	field(&mut out, "Symbol", &token.symbol);
	if let Some(hash) = token.transaction_hash {
		field(&mut out, "Transaction", hash);
	}
	out
}

/// One line naming the failure category and its message.
///
/// # Arguments
/// * `failure` - Normalized deployment failure
pub fn deployment_failure(failure: &DeploymentFailure) -> String {
	format!(
		"{} Deployment failed ({}): {}",
		"✗".red().bold(),
		failure.kind,
		failure.error_message.red()
	)
}

/// Describes a verification before it is submitted.
///
/// # Arguments
/// * `address` - Contract whose source is verified
/// * `network` - Network profile the contract lives on
pub fn verification_plan(address: Address, network: &str) -> String {
	let mut out = title(&format!("Verifying {address}"));
	field(&mut out, "Network", network);
	out
}

/// Result line of a verification attempt.
///
/// # Arguments
/// * `outcome` - Outcome reported by the verification driver
pub fn verification(outcome: &VerificationOutcome) -> String {
	if outcome.already_verified {
		format!("{} Contract already verified", "ℹ".blue().bold())
	} else if outcome.verified {
		format!("{} Contract verified", "✓".green().bold())
	} else {
		let reason = outcome.failure_reason.as_deref().unwrap_or("unknown reason");
		format!("{} Verification failed: {}", "⚠".yellow().bold(), reason.yellow())
	}
}

/// A step that did not run, and why.
///
/// # Arguments
/// * `step` - Name of the skipped step
/// * `reason` - Why it did not run
pub fn skipped(step: &str, reason: &str) -> String {
	format!("{} {step} skipped: {}", "⚠".yellow().bold(), reason.yellow())
}

/// An operation that stopped with an error.
///
/// # Arguments
/// * `operation` - Short operation name
/// * `message` - Error text
pub fn failed(operation: &str, message: &str) -> String {
	format!("{} {operation} failed: {}", "✗".red().bold(), message.red())
}

#[cfg(test)]
mod tests {
	use super::*;
	use alloy_primitives::{address, b256, U256};
	use launchpad_types::FailureKind;

	fn plain() {
		colored::control::set_override(false);
	}

	#[test]
	fn test_deployment_plan_lists_network_and_supply() {
		plain();
		let spec = TokenSpec::new("My Token", "MTK", U256::from(500u64)).unwrap();

		let text = deployment_plan(&spec, "sepolia");
		assert!(text.contains("Deploying My Token (MTK)"));
		assert!(text.contains("Network:"));
		assert!(text.contains("sepolia"));
		assert!(text.contains("500"));
	}

	#[test]
	fn test_deployed_token_lists_transaction_when_known() {
		plain();
		let mut token = DeployedToken {
			address: address!("5FbDB2315678afecb367f032d93F642f64180aa3"),
			name: "My Token".to_string(),
			symbol: "MTK".to_string(),
			transaction_hash: None,
		};
		assert!(!deployed_token(&token).contains("Transaction:"));

		token.transaction_hash = Some(b256!(
			"0x1111111111111111111111111111111111111111111111111111111111111111"
		));
		let text = deployed_token(&token);
		assert!(text.contains("0x5FbDB2315678afecb367f032d93F642f64180aa3"));
		assert!(text.contains("Transaction:"));
	}

	#[test]
	fn test_deployment_failure_names_category() {
		plain();
		let failure = DeploymentFailure::new(FailureKind::NoSigner, "No signer available on network 'x'");

		assert_eq!(
			deployment_failure(&failure),
			"✗ Deployment failed (no_signer): No signer available on network 'x'"
		);
	}

	#[test]
	fn test_verification_lines() {
		plain();
		assert!(verification(&VerificationOutcome::verified()).contains("Contract verified"));
		assert!(verification(&VerificationOutcome::already_verified()).contains("already verified"));
		assert_eq!(
			verification(&VerificationOutcome::failed("bytecode mismatch")),
			"⚠ Verification failed: bytecode mismatch"
		);
	}
}
