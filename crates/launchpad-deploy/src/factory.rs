//! Contract factories: submit a creation transaction for one compiled
//! contract and wait for it to be mined.

use crate::{artifacts::ContractArtifact, DeployError};
use alloy_dyn_abi::DynSolValue;
use alloy_network::{ReceiptResponse, TransactionBuilder};
use alloy_primitives::{Address, B256};
use alloy_provider::{DynProvider, Provider};
use alloy_rpc_types::TransactionRequest;
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, info};

/// Address and creation transaction of a deployed contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeployedContract {
	pub address: Address,
	pub transaction_hash: Option<B256>,
}

/// Deploys instances of a single contract.
#[async_trait]
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait ContractFactory: Send + Sync {
	/// Name of the contract this factory deploys.
	fn contract_name(&self) -> String;

	/// Submits the creation transaction from `from` and waits for inclusion.
	///
	/// A reverted transaction, or a receipt without a contract address, is a
	/// [`DeployError::Transaction`].
	async fn deploy(
		&self,
		from: Address,
		constructor_args: Vec<DynSolValue>,
	) -> Result<DeployedContract, DeployError>;
}

/// Factory backed by an alloy provider whose wallet holds the signing keys.
pub struct AlloyContractFactory {
	provider: DynProvider,
	artifact: ContractArtifact,
	confirmation_timeout: Option<Duration>,
}

impl AlloyContractFactory {
	pub fn new(
		provider: DynProvider,
		artifact: ContractArtifact,
		confirmation_timeout: Option<Duration>,
	) -> Self {
		Self {
			provider,
			artifact,
			confirmation_timeout,
		}
	}
}

#[async_trait]
impl ContractFactory for AlloyContractFactory {
	fn contract_name(&self) -> String {
		self.artifact.contract_name.clone()
	}

	async fn deploy(
		&self,
		from: Address,
		constructor_args: Vec<DynSolValue>,
	) -> Result<DeployedContract, DeployError> {
		let data = self
			.artifact
			.deploy_data(&constructor_args)
			.map_err(|e| DeployError::Encoding(e.to_string()))?;

		let request = TransactionRequest::default()
			.with_from(from)
			.with_deploy_code(data);

		// The provider's wallet signs for `from`
		let pending = self
			.provider
			.send_transaction(request)
			.await
			.map_err(|e| DeployError::Transaction(format!("Failed to send transaction: {e}")))?;

		let tx_hash = *pending.tx_hash();
		info!(
			contract = %self.artifact.contract_name,
			tx_hash = %tx_hash,
			"Deployment transaction submitted"
		);

		let receipt = pending
			.with_required_confirmations(1)
			.with_timeout(self.confirmation_timeout)
			.get_receipt()
			.await
			.map_err(|e| {
				DeployError::Transaction(format!("Failed to confirm transaction {tx_hash}: {e}"))
			})?;

		if !receipt.status() {
			return Err(DeployError::Transaction(format!(
				"Deployment transaction {tx_hash} reverted"
			)));
		}

		let address = receipt
			.contract_address()
			.filter(|address| !address.is_zero())
			.ok_or_else(|| {
				DeployError::Transaction(format!(
					"No contract address in receipt for transaction {tx_hash}"
				))
			})?;

		debug!(
			block = ?receipt.block_number(),
			gas_used = receipt.gas_used(),
			"Deployment transaction mined"
		);

		Ok(DeployedContract {
			address,
			transaction_hash: Some(receipt.transaction_hash()),
		})
	}
}
