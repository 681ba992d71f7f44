//! Token parameters submitted for deployment.

use alloy_dyn_abi::DynSolValue;
use alloy_primitives::U256;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Supply minted to the deployer when the caller does not provide one.
pub const DEFAULT_INITIAL_SUPPLY: u64 = 1_000_000;

/// Errors raised while building token parameters from caller input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
	/// Name or symbol is missing or blank.
	#[error("Token name and symbol are required")]
	MissingNameOrSymbol,
	/// The initial supply is not a base-10 non-negative integer that fits in 256 bits.
	#[error("Initial supply must be a non-negative integer, got '{0}'")]
	InvalidSupply(String),
}

/// Immutable parameters for a single token deployment.
///
/// The supply is an exact 256-bit integer; it is passed to the contract
/// constructor as-is, without any decimal scaling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenSpec {
	name: String,
	symbol: String,
	initial_supply: U256,
}

impl TokenSpec {
	/// Builds a token spec, rejecting blank names and symbols.
	pub fn new(
		name: impl Into<String>,
		symbol: impl Into<String>,
		initial_supply: U256,
	) -> Result<Self, ValidationError> {
		let name = name.into();
		let symbol = symbol.into();
		if name.trim().is_empty() || symbol.trim().is_empty() {
			return Err(ValidationError::MissingNameOrSymbol);
		}

		Ok(Self {
			name,
			symbol,
			initial_supply,
		})
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn symbol(&self) -> &str {
		&self.symbol
	}

	pub fn initial_supply(&self) -> U256 {
		self.initial_supply
	}

	/// Constructor arguments in the exact order and types the contract expects:
	/// `(string name, string symbol, uint256 initialSupply)`.
	///
	/// The same sequence must be handed to the explorer when verifying.
	pub fn constructor_args(&self) -> Vec<DynSolValue> {
		vec![
			DynSolValue::String(self.name.clone()),
			DynSolValue::String(self.symbol.clone()),
			DynSolValue::Uint(self.initial_supply, 256),
		]
	}
}

/// Parses a base-10 supply string into a `U256`.
///
/// Signs, decimal points and exponents are rejected; token supplies are
/// exact integers.
pub fn parse_supply(input: &str) -> Result<U256, ValidationError> {
	let trimmed = input.trim();
	if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
		return Err(ValidationError::InvalidSupply(input.to_string()));
	}

	U256::from_str_radix(trimmed, 10).map_err(|_| ValidationError::InvalidSupply(input.to_string()))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_new_rejects_blank_name() {
		let err = TokenSpec::new("", "TST", U256::from(1)).unwrap_err();
		assert_eq!(err, ValidationError::MissingNameOrSymbol);

		let err = TokenSpec::new("   ", "TST", U256::from(1)).unwrap_err();
		assert_eq!(err, ValidationError::MissingNameOrSymbol);
	}

	#[test]
	fn test_new_rejects_blank_symbol() {
		let err = TokenSpec::new("Test", "", U256::from(1)).unwrap_err();
		assert_eq!(err.to_string(), "Token name and symbol are required");
	}

	#[test]
	fn test_zero_supply_is_allowed() {
		let spec = TokenSpec::new("Test", "TST", U256::ZERO).unwrap();
		assert_eq!(spec.initial_supply(), U256::ZERO);
	}

	#[test]
	fn test_constructor_args_order_and_types() {
		let spec = TokenSpec::new("Test", "TST", U256::from(500)).unwrap();
		let args = spec.constructor_args();

		assert_eq!(args.len(), 3);
		assert_eq!(args[0], DynSolValue::String("Test".to_string()));
		assert_eq!(args[1], DynSolValue::String("TST".to_string()));
		assert_eq!(args[2], DynSolValue::Uint(U256::from(500), 256));
	}

	#[test]
	fn test_parse_supply_accepts_values_beyond_u64() {
		let supply = parse_supply("1000000000000000000000000000").unwrap();
		assert_eq!(
			supply,
			U256::from(1_000_000_000_000_000_000u128) * U256::from(1_000_000_000u64)
		);
	}

	#[test]
	fn test_parse_supply_rejects_non_integers() {
		for input in ["", "-1", "1.5", "1e6", "0x10", "abc"] {
			assert!(
				matches!(parse_supply(input), Err(ValidationError::InvalidSupply(_))),
				"expected rejection for {input:?}"
			);
		}
	}

	#[test]
	fn test_parse_supply_rejects_overflow() {
		let too_big = format!("{}0", U256::MAX);
		assert!(parse_supply(&too_big).is_err());
	}
}
