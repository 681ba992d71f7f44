//! `${VAR}` placeholder resolution for configuration values.

use crate::ConfigError;
use regex::Regex;
use std::sync::OnceLock;

/// Upper bound on the size of a value passed through the resolver.
const MAX_INPUT_SIZE: usize = 1024 * 1024;

fn placeholder_regex() -> Result<&'static Regex, ConfigError> {
	static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
	if let Some(re) = PLACEHOLDER.get() {
		return Ok(re);
	}
	let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]{0,127})(?::-([^}]{0,256}))?\}")
		.map_err(|e| ConfigError::Parse(format!("Regex error: {e}")))?;
	Ok(PLACEHOLDER.get_or_init(|| re))
}

/// Replaces `${VAR_NAME}` with the value of the environment variable
/// `VAR_NAME`, and `${VAR_NAME:-default}` with the variable or `default`.
///
/// A referenced variable that is unset and has no default is an error, so
/// a missing credential surfaces when the value is used rather than as an
/// empty string.
pub fn resolve_env_vars(input: &str) -> Result<String, ConfigError> {
	if input.len() > MAX_INPUT_SIZE {
		return Err(ConfigError::Validation(format!(
			"Configuration value too large: {} bytes (max: {} bytes)",
			input.len(),
			MAX_INPUT_SIZE
		)));
	}

	let re = placeholder_regex()?;
	let mut result = input.to_string();
	let mut replacements = Vec::new();

	for cap in re.captures_iter(input) {
		let (Some(full_match), Some(var_name)) = (cap.get(0), cap.get(1)) else {
			continue;
		};
		let default_value = cap.get(2).map(|m| m.as_str());

		let value = match std::env::var(var_name.as_str()) {
			Ok(v) => v,
			Err(_) => match default_value {
				Some(default) => default.to_string(),
				None => return Err(ConfigError::MissingVariable(var_name.as_str().to_string())),
			},
		};

		replacements.push((full_match.start(), full_match.end(), value));
	}

	// Apply replacements back to front so earlier offsets stay valid
	for (start, end, value) in replacements.iter().rev() {
		result.replace_range(start..end, value);
	}

	Ok(result)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_env_var_resolution() {
		std::env::set_var("LAUNCHPAD_TEST_HOST", "localhost");
		std::env::set_var("LAUNCHPAD_TEST_PORT", "8545");

		let result = resolve_env_vars("http://${LAUNCHPAD_TEST_HOST}:${LAUNCHPAD_TEST_PORT}").unwrap();
		assert_eq!(result, "http://localhost:8545");

		std::env::remove_var("LAUNCHPAD_TEST_HOST");
		std::env::remove_var("LAUNCHPAD_TEST_PORT");
	}

	#[test]
	fn test_env_var_with_default() {
		let result = resolve_env_vars("${LAUNCHPAD_UNSET_WITH_DEFAULT:-fallback}").unwrap();
		assert_eq!(result, "fallback");
	}

	#[test]
	fn test_missing_env_var_error() {
		let err = resolve_env_vars("${LAUNCHPAD_DEFINITELY_UNSET}").unwrap_err();
		assert!(matches!(err, ConfigError::MissingVariable(ref name) if name == "LAUNCHPAD_DEFINITELY_UNSET"));
		assert!(err.to_string().contains("LAUNCHPAD_DEFINITELY_UNSET"));
	}

	#[test]
	fn test_plain_value_is_unchanged() {
		assert_eq!(
			resolve_env_vars("https://rpc.example.com").unwrap(),
			"https://rpc.example.com"
		);
	}
}
