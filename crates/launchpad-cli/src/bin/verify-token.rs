//! Verifies the source of an already deployed launchpad token.
//!
//! The name, symbol and supply must match the values used at deployment.

use clap::Parser;
use launchpad_cli::{args::VerifyArgs, logging, output};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
	let args = VerifyArgs::parse();
	logging::init_logging(&args.common.log_level);

	match run(args).await {
		Ok(true) => ExitCode::SUCCESS,
		Ok(false) => ExitCode::FAILURE,
		Err(e) => {
			logging::report_failure("verify", &format!("{e:#}"));
			ExitCode::FAILURE
		},
	}
}

async fn run(args: VerifyArgs) -> anyhow::Result<bool> {
	let config = launchpad_cli::load_config(args.common.config.as_deref()).await?;
	let network = args
		.network
		.clone()
		.unwrap_or_else(|| config.deployment.default_network.clone());
	let driver = launchpad_cli::verification_driver(&config, &network).await?;

	let supply = args
		.initial_supply()
		.unwrap_or(config.deployment.default_initial_supply);
	let spec = launchpad_types::TokenSpec::new(args.name, args.symbol, supply)?;

	println!("{}", output::verification_plan(args.address, &network));
	let outcome = driver.verify(args.address, &spec.constructor_args()).await;
	Ok(launchpad_cli::print_verification(&outcome))
}
