//! Logging setup and reporting helpers that pair terminal output with
//! tracing events.

use crate::output;
use tracing::{error, warn};
use tracing_subscriber::{fmt, EnvFilter};

/// Installs the global subscriber. `RUST_LOG` takes precedence over `level`.
///
/// # Arguments
/// * `level` - Filter directive used when `RUST_LOG` is unset, e.g. `warn`
pub fn init_logging(level: &str) {
	let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

	// Logs go to stderr so stdout carries only results
	let _ = fmt()
		.with_env_filter(env_filter)
		.with_target(false)
		.with_writer(std::io::stderr)
		.try_init();
}

/// Reports an operation that could not run to completion.
///
/// # Arguments
/// * `operation` - Short operation name, e.g. `deploy`
/// * `message` - Error text, usually the full anyhow chain
pub fn report_failure(operation: &str, message: &str) {
	eprintln!("{}", output::failed(operation, message));
	error!(operation, error = message, "Operation failed");
}

/// Reports an optional step that was skipped.
///
/// # Arguments
/// * `step` - Name of the skipped step, e.g. `Verification`
/// * `reason` - Why the step did not run
pub fn report_skipped(step: &str, reason: &str) {
	println!("{}", output::skipped(step, reason));
	warn!(step, reason, "Step skipped");
}
