//! Deploys a launchpad token, optionally verifying it afterwards.
//!
//! ```sh
//! deploy-token "My Token" MTK 1000000 --network sepolia --verify
//! ```

use clap::Parser;
use launchpad_cli::{args::DeployArgs, logging, output};
use launchpad_types::DeploymentResult;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
	let args = DeployArgs::parse();
	logging::init_logging(&args.common.log_level);

	match run(args).await {
		Ok(true) => ExitCode::SUCCESS,
		Ok(false) => ExitCode::FAILURE,
		Err(e) => {
			logging::report_failure("deploy", &format!("{e:#}"));
			ExitCode::FAILURE
		},
	}
}

async fn run(args: DeployArgs) -> anyhow::Result<bool> {
	let config = launchpad_cli::load_config(args.common.config.as_deref()).await?;
	let launcher = launchpad_cli::launcher(&config, args.network.clone());
	let network = launcher.defaults().network.clone();

	let spec = launcher
		.defaults()
		.token_spec(&args.name, &args.symbol, args.initial_supply())?;

	// Set up before deploying; verification problems only warn
	let driver = if args.verify {
		match launchpad_cli::verification_driver(&config, &network).await {
			Ok(driver) => Some(driver),
			Err(e) => {
				logging::report_skipped("Verification", &format!("{e:#}"));
				None
			},
		}
	} else {
		None
	};

	println!("{}", output::deployment_plan(&spec, &network));

	let result = launcher.launch(&spec, None).await;
	if !launchpad_cli::print_deployment(&result) {
		return Ok(false);
	}

	if let (Some(driver), DeploymentResult::Deployed(token)) = (driver, &result) {
		println!("{}", output::verification_plan(token.address, &network));
		let outcome = driver.verify(token.address, &spec.constructor_args()).await;
		launchpad_cli::print_verification(&outcome);
	}

	Ok(true)
}
