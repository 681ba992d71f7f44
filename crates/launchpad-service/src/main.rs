//! Main entry point for the launchpad relay.
//!
//! Loads configuration (file or built-in defaults, plus `.env`), then serves
//! `POST /api/deploy` and `GET /api/health`.

use clap::Parser;
use launchpad_config::Config;
use launchpad_deploy::{ArtifactStore, LaunchDefaults, Launcher, ProfileResolver};
use launchpad_service::server;
use std::path::PathBuf;
use std::sync::Arc;

/// Command-line arguments for the relay.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
	/// Path to configuration file
	#[arg(short, long)]
	config: Option<PathBuf>,

	/// Port to listen on, overriding the configured one
	#[arg(short, long, env = "PORT")]
	port: Option<u16>,

	/// Log level (trace, debug, info, warn, error)
	#[arg(short, long, default_value = "info")]
	log_level: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	// Loaded before parsing so PORT may come from .env
	dotenvy::dotenv().ok();
	let args = Args::parse();

	use tracing_subscriber::{fmt, EnvFilter};

	let env_filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

	fmt()
		.with_env_filter(env_filter)
		.with_thread_ids(true)
		.with_target(true)
		.init();

	let config = Config::load(args.config.as_deref()).await?;
	tracing::info!(
		networks = config.networks.len(),
		contract = %config.deployment.contract_name,
		"Loaded configuration"
	);

	let mut api_config = config.api.clone();
	if let Some(port) = args.port {
		api_config.port = port;
	}

	let artifacts = ArtifactStore::new(&config.deployment.artifacts_dir)
		.with_build_info_dir(config.build_info_dir());
	let resolver = ProfileResolver::new(config.networks.clone(), artifacts);
	let launcher = Launcher::new(
		Arc::new(resolver),
		LaunchDefaults {
			network: api_config.default_network.clone(),
			initial_supply: config.deployment.default_initial_supply,
			contract_name: config.deployment.contract_name.clone(),
		},
	);

	server::start_server(api_config, launcher).await?;

	tracing::info!("Stopped launchpad relay");
	Ok(())
}
