//! Request and error bodies used by the HTTP relay.

use crate::token::{parse_supply, ValidationError};
use alloy_primitives::U256;
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::value::RawValue;
use std::fmt;

/// Initial supply as sent by a client: either an integer or a decimal string.
/// Floating point numbers do not deserialize.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SupplyInput {
	Integer(U256),
	Text(String),
}

impl SupplyInput {
	/// Converts the input to an exact supply.
	///
	/// An empty string means "not provided" and yields `None`.
	pub fn to_supply(&self) -> Result<Option<U256>, ValidationError> {
		match self {
			SupplyInput::Integer(value) => Ok(Some(*value)),
			SupplyInput::Text(text) if text.trim().is_empty() => Ok(None),
			SupplyInput::Text(text) => parse_supply(text).map(Some),
		}
	}

	/// Reads a JSON value from its source text, so integers wider than 64
	/// bits keep every digit.
	fn from_json_text(text: &str) -> Result<Self, String> {
		let text = text.trim();
		if text.starts_with('"') {
			return serde_json::from_str(text)
				.map(SupplyInput::Text)
				.map_err(|e| e.to_string());
		}
		parse_supply(text)
			.map(SupplyInput::Integer)
			.map_err(|_| format!("initialSupply must be an integer or a string, got {text}"))
	}
}

impl Serialize for SupplyInput {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		match self {
			SupplyInput::Integer(value) => serializer.serialize_str(&value.to_string()),
			SupplyInput::Text(text) => serializer.serialize_str(text),
		}
	}
}

impl<'de> Deserialize<'de> for SupplyInput {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		deserializer.deserialize_any(SupplyVisitor)
	}
}

struct SupplyVisitor;

impl Visitor<'_> for SupplyVisitor {
	type Value = SupplyInput;

	fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("a non-negative integer or a decimal string")
	}

	fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
		Ok(SupplyInput::Integer(U256::from(value)))
	}

	fn visit_u128<E: de::Error>(self, value: u128) -> Result<Self::Value, E> {
		Ok(SupplyInput::Integer(U256::from(value)))
	}

	fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
		u64::try_from(value)
			.map(|v| SupplyInput::Integer(U256::from(v)))
			.map_err(|_| E::custom(format!("supply cannot be negative: {value}")))
	}

	fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
		Ok(SupplyInput::Text(value.to_string()))
	}
}

/// JSON numbers beyond `u64` would otherwise be rounded through `f64`.
fn deserialize_json_supply<'de, D>(deserializer: D) -> Result<Option<SupplyInput>, D::Error>
where
	D: Deserializer<'de>,
{
	match Option::<Box<RawValue>>::deserialize(deserializer)? {
		Some(raw) => SupplyInput::from_json_text(raw.get())
			.map(Some)
			.map_err(de::Error::custom),
		None => Ok(None),
	}
}

/// Body of `POST /api/deploy`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeployRequest {
	#[serde(default)]
	pub name: Option<String>,
	#[serde(default)]
	pub symbol: Option<String>,
	#[serde(default, deserialize_with = "deserialize_json_supply")]
	pub initial_supply: Option<SupplyInput>,
	#[serde(default)]
	pub network: Option<String>,
}

impl DeployRequest {
	/// True when both name and symbol are present and non-blank.
	pub fn has_name_and_symbol(&self) -> bool {
		let present = |value: &Option<String>| value.as_deref().is_some_and(|v| !v.trim().is_empty());
		present(&self.name) && present(&self.symbol)
	}

	/// Requested supply, if one was given.
	pub fn supply(&self) -> Result<Option<U256>, ValidationError> {
		match &self.initial_supply {
			Some(input) => input.to_supply(),
			None => Ok(None),
		}
	}

	/// Requested network, ignoring blank values.
	pub fn network(&self) -> Option<&str> {
		self.network.as_deref().filter(|n| !n.trim().is_empty())
	}
}

/// Error body returned by the relay: `{"success": false, "error": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
	pub success: bool,
	pub error: String,
}

impl ErrorResponse {
	pub fn new(error: impl Into<String>) -> Self {
		Self {
			success: false,
			error: error.into(),
		}
	}
}
