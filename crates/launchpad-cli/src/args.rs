//! Command-line arguments of the launchpad binaries.

use alloy_primitives::{Address, U256};
use clap::Parser;
use launchpad_types::parse_supply;
use std::path::PathBuf;

pub const DEFAULT_TOKEN_NAME: &str = "Token Launchpad";
pub const DEFAULT_TOKEN_SYMBOL: &str = "TLP";

/// Positional supply. An empty argument leaves the configured default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SupplyArg(pub Option<U256>);

fn parse_supply_arg(value: &str) -> Result<SupplyArg, String> {
	if value.trim().is_empty() {
		return Ok(SupplyArg(None));
	}
	parse_supply(value)
		.map(|supply| SupplyArg(Some(supply)))
		.map_err(|e| e.to_string())
}

/// Empty positionals fall back to the default name.
fn parse_name_arg(value: &str) -> Result<String, String> {
	Ok(non_empty_or(value, DEFAULT_TOKEN_NAME))
}

fn parse_symbol_arg(value: &str) -> Result<String, String> {
	Ok(non_empty_or(value, DEFAULT_TOKEN_SYMBOL))
}

fn non_empty_or(value: &str, default: &str) -> String {
	if value.trim().is_empty() {
		default.to_string()
	} else {
		value.to_string()
	}
}

/// Options shared by both binaries.
#[derive(clap::Args, Debug, Clone)]
pub struct CommonArgs {
	/// Path to configuration file
	#[arg(short, long, env = "LAUNCHPAD_CONFIG")]
	pub config: Option<PathBuf>,

	/// Log level (trace, debug, info, warn, error)
	#[arg(short, long, default_value = "warn")]
	pub log_level: String,
}

/// Deploy a launchpad token contract.
#[derive(Parser, Debug)]
#[command(name = "deploy-token", version, about)]
pub struct DeployArgs {
	/// Token name
	#[arg(default_value = DEFAULT_TOKEN_NAME, value_parser = parse_name_arg)]
	pub name: String,

	/// Token symbol
	#[arg(default_value = DEFAULT_TOKEN_SYMBOL, value_parser = parse_symbol_arg)]
	pub symbol: String,

	/// Initial supply as a base-10 integer (defaults to the configured supply)
	#[arg(value_parser = parse_supply_arg)]
	pub initial_supply: Option<SupplyArg>,

	/// Network profile to use (defaults to the configured deployment network)
	#[arg(short, long)]
	pub network: Option<String>,

	/// Verify the source on the block explorer after deploying
	#[arg(long)]
	pub verify: bool,

	#[command(flatten)]
	pub common: CommonArgs,
}

/// Verify the source of a deployed launchpad token.
#[derive(Parser, Debug)]
#[command(name = "verify-token", version, about)]
pub struct VerifyArgs {
	/// Address of the deployed contract
	pub address: Address,

	/// Token name the contract was deployed with
	#[arg(default_value = DEFAULT_TOKEN_NAME, value_parser = parse_name_arg)]
	pub name: String,

	/// Token symbol the contract was deployed with
	#[arg(default_value = DEFAULT_TOKEN_SYMBOL, value_parser = parse_symbol_arg)]
	pub symbol: String,

	/// Initial supply the contract was deployed with
	#[arg(value_parser = parse_supply_arg)]
	pub initial_supply: Option<SupplyArg>,

	/// Network profile the contract lives on (defaults to the configured
	/// deployment network)
	#[arg(short, long)]
	pub network: Option<String>,

	#[command(flatten)]
	pub common: CommonArgs,
}

impl DeployArgs {
	/// Supply given on the command line, if any.
	pub fn initial_supply(&self) -> Option<U256> {
		self.initial_supply.and_then(|arg| arg.0)
	}
}

impl VerifyArgs {
	/// Supply given on the command line, if any.
	pub fn initial_supply(&self) -> Option<U256> {
		self.initial_supply.and_then(|arg| arg.0)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_deploy_defaults() {
		let args = DeployArgs::try_parse_from(["deploy-token"]).unwrap();
		assert_eq!(args.name, "Token Launchpad");
		assert_eq!(args.symbol, "TLP");
		assert!(args.initial_supply().is_none());
		assert!(!args.verify);
		assert!(args.network.is_none());
	}

	#[test]
	fn test_deploy_positional_and_options() {
		let args = DeployArgs::try_parse_from([
			"deploy-token",
			"My Token",
			"MTK",
			"500",
			"--network",
			"sepolia",
			"--verify",
		])
		.unwrap();
		assert_eq!(args.name, "My Token");
		assert_eq!(args.symbol, "MTK");
		assert_eq!(args.initial_supply(), Some(U256::from(500u64)));
		assert_eq!(args.network.as_deref(), Some("sepolia"));
		assert!(args.verify);
	}

	#[test]
	fn test_deploy_empty_positionals_use_defaults() {
		let args = DeployArgs::try_parse_from(["deploy-token", "", " ", ""]).unwrap();
		assert_eq!(args.name, DEFAULT_TOKEN_NAME);
		assert_eq!(args.symbol, DEFAULT_TOKEN_SYMBOL);
		assert!(args.initial_supply().is_none());
	}

	#[test]
	fn test_deploy_rejects_bad_supply() {
		assert!(DeployArgs::try_parse_from(["deploy-token", "A", "B", "1.5"]).is_err());
	}

	#[test]
	fn test_verify_requires_address() {
		assert!(VerifyArgs::try_parse_from(["verify-token"]).is_err());

		let args = VerifyArgs::try_parse_from([
			"verify-token",
			"0x5FbDB2315678afecb367f032d93F642f64180aa3",
		])
		.unwrap();
		assert_eq!(args.symbol, "TLP");
		assert!(args.network.is_none());
	}

	#[test]
	fn test_verify_network_option() {
		let args = VerifyArgs::try_parse_from([
			"verify-token",
			"0x5FbDB2315678afecb367f032d93F642f64180aa3",
			"",
			"MTK",
			"500",
			"--network",
			"sepolia",
		])
		.unwrap();
		assert_eq!(args.name, DEFAULT_TOKEN_NAME);
		assert_eq!(args.symbol, "MTK");
		assert_eq!(args.initial_supply(), Some(U256::from(500u64)));
		assert_eq!(args.network.as_deref(), Some("sepolia"));
	}
}
