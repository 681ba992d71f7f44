//! Private local nodes for simulated network profiles.

use launchpad_config::ChainType;
use std::net::TcpListener;
use std::process::Stdio;
use tokio::net::TcpStream;
use tokio::process::{Child, Command};
use tokio::time::{sleep, Duration};
use tracing::{debug, info};
use which::which;

const RPC_READY_MAX_ATTEMPTS: u32 = 100;
const RPC_READY_CHECK_DELAY_MS: u64 = 100;

/// Chain id anvil uses when none is given.
pub const LOCAL_CHAIN_ID: u64 = 31337;

/// Funded accounts of the default anvil mnemonic, in index order.
pub const DEV_PRIVATE_KEYS: [&str; 3] = [
	"0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80",
	"0x59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d",
	"0x5de4111afa1a4b94908f83103eb1f1706367c2e68ca870fc3fb9a804cdab365a",
];

/// A running anvil process. The process is killed when this value is dropped.
#[derive(Debug)]
pub struct LocalNode {
	child: Child,
	port: u16,
}

impl LocalNode {
	/// Starts anvil on a free local port and waits for its RPC to accept
	/// connections.
	///
	/// # Arguments
	/// * `chain_id` - Chain id for the node, anvil's default when `None`
	/// * `chain_type` - `Op` enables OP-stack transaction types
	pub async fn spawn(chain_id: Option<u64>, chain_type: ChainType) -> Result<Self, String> {
		let anvil = which("anvil")
			.map_err(|_| "Anvil not found. Please install Foundry: https://getfoundry.sh".to_string())?;

		let port = free_port()?;
		let mut cmd = Command::new(anvil);
		cmd.args(anvil_args(port, chain_id, chain_type))
			.stdout(Stdio::null())
			.stderr(Stdio::null())
			.stdin(Stdio::null())
			.kill_on_drop(true);

		let child = cmd.spawn().map_err(|e| format!("Failed to start anvil: {e}"))?;
		let node = Self { child, port };
		debug!(port, pid = ?node.child.id(), %chain_type, "Started anvil");

		node.wait_for_rpc().await?;
		info!(port, "Local node ready");
		Ok(node)
	}

	pub fn endpoint(&self) -> String {
		format!("http://127.0.0.1:{}", self.port)
	}

	async fn wait_for_rpc(&self) -> Result<(), String> {
		for _ in 0..RPC_READY_MAX_ATTEMPTS {
			if TcpStream::connect(("127.0.0.1", self.port)).await.is_ok() {
				return Ok(());
			}
			sleep(Duration::from_millis(RPC_READY_CHECK_DELAY_MS)).await;
		}
		Err(format!("RPC on port {} did not become ready", self.port))
	}
}

fn anvil_args(port: u16, chain_id: Option<u64>, chain_type: ChainType) -> Vec<String> {
	let mut args = vec![
		"--port".to_string(),
		port.to_string(),
		"--accounts".to_string(),
		DEV_PRIVATE_KEYS.len().to_string(),
	];
	if let Some(chain_id) = chain_id {
		args.extend(["--chain-id".to_string(), chain_id.to_string()]);
	}
	if chain_type == ChainType::Op {
		args.push("--optimism".to_string());
	}
	args
}

fn free_port() -> Result<u16, String> {
	TcpListener::bind("127.0.0.1:0")
		.and_then(|listener| listener.local_addr())
		.map(|addr| addr.port())
		.map_err(|e| format!("Failed to allocate a local port: {e}"))
}

#[cfg(test)]
mod tests {
	use super::*;
	use alloy_signer_local::PrivateKeySigner;

	#[test]
	fn test_dev_keys_parse() {
		for key in DEV_PRIVATE_KEYS {
			assert!(key.parse::<PrivateKeySigner>().is_ok());
		}
	}

	#[test]
	fn test_anvil_args_for_l1() {
		let args = anvil_args(8545, None, ChainType::L1);
		assert_eq!(args, ["--port", "8545", "--accounts", "3"]);
	}

	#[test]
	fn test_anvil_args_for_op_chain() {
		let args = anvil_args(8545, Some(10), ChainType::Op);
		assert_eq!(
			args,
			["--port", "8545", "--accounts", "3", "--chain-id", "10", "--optimism"]
		);
	}

	#[test]
	fn test_free_port_is_nonzero() {
		assert_ne!(free_port().unwrap(), 0);
	}
}
