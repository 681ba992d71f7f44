//! Etherscan-compatible explorer client.
//!
//! Verification is a two step exchange: a `verifysourcecode` submission that
//! returns a receipt guid, then `checkverifystatus` polls until the explorer
//! reports a final result.

use super::{is_already_verified, ExplorerClient, ExplorerError, VerificationRequest};
use alloy_primitives::hex;
use async_trait::async_trait;
use launchpad_config::ExplorerConfig;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// `{status, message, result}` envelope used by every Etherscan endpoint.
#[derive(Debug, Deserialize)]
struct EtherscanResponse {
	status: String,
	message: String,
	#[serde(default)]
	result: serde_json::Value,
}

impl EtherscanResponse {
	fn is_ok(&self) -> bool {
		self.status == "1"
	}

	fn result_text(&self) -> String {
		match &self.result {
			serde_json::Value::String(s) => s.clone(),
			serde_json::Value::Null => self.message.clone(),
			other => other.to_string(),
		}
	}
}

/// State of a submitted verification.
#[derive(Debug, Clone, PartialEq, Eq)]
enum VerificationStatus {
	Pending,
	Verified,
	AlreadyVerified,
	Failed(String),
}

pub struct EtherscanClient {
	client: Client,
	api_url: String,
	api_key: String,
	chain_id: u64,
	poll_interval: Duration,
	max_status_checks: u32,
}

impl EtherscanClient {
	pub fn new(
		api_url: impl Into<String>,
		api_key: impl Into<String>,
		chain_id: u64,
	) -> Result<Self, ExplorerError> {
		let client = Client::builder()
			.timeout(REQUEST_TIMEOUT)
			.build()
			.map_err(|e| ExplorerError::Http(e.to_string()))?;

		Ok(Self {
			client,
			api_url: api_url.into(),
			api_key: api_key.into(),
			chain_id,
			poll_interval: Duration::from_secs(5),
			max_status_checks: 12,
		})
	}

	/// Builds a client from configuration, resolving the API key.
	///
	/// # Arguments
	/// * `config` - Explorer endpoint, key and polling settings
	/// * `chain_id` - Chain of the network the contract was deployed to
	pub fn from_config(config: &ExplorerConfig, chain_id: u64) -> Result<Self, ExplorerError> {
		let api_key = config
			.resolved_api_key()
			.map_err(|e| ExplorerError::Configuration(e.to_string()))?;
		if api_key.trim().is_empty() {
			return Err(ExplorerError::Configuration(
				"Explorer API key is empty".to_string(),
			));
		}

		Ok(Self::new(&config.api_url, api_key, chain_id)?.with_polling(
			Duration::from_secs(config.poll_interval_secs),
			config.max_status_checks,
		))
	}

	pub fn with_polling(mut self, interval: Duration, max_status_checks: u32) -> Self {
		self.poll_interval = interval;
		self.max_status_checks = max_status_checks.max(1);
		self
	}

	/// Submits the source and returns the receipt guid.
	async fn submit(&self, request: &VerificationRequest) -> Result<String, ExplorerError> {
		let address = request.address.to_string();
		let chain_id = self.chain_id.to_string();
		let constructor_arguments = hex::encode(&request.constructor_arguments);

		let form = [
			("apikey", self.api_key.as_str()),
			("module", "contract"),
			("action", "verifysourcecode"),
			("chainid", chain_id.as_str()),
			("contractaddress", address.as_str()),
			("sourceCode", request.standard_json_input.as_str()),
			("codeformat", "solidity-standard-json-input"),
			("contractname", request.contract_identifier.as_str()),
			("compilerversion", request.compiler_version.as_str()),
			// Spelling is part of the Etherscan API
			("constructorArguements", constructor_arguments.as_str()),
		];

		let response = self
			.client
			.post(&self.api_url)
			.query(&[("chainid", chain_id.as_str())])
			.form(&form)
			.send()
			.await
			.map_err(|e| ExplorerError::Http(e.to_string()))?;
		let response = parse_response(response).await?;

		let result = response.result_text();
		if response.is_ok() {
			debug!(guid = %result, "Verification submitted");
			return Ok(result);
		}
		if is_already_verified(&result) || is_already_verified(&response.message) {
			return Err(ExplorerError::AlreadyVerified);
		}
		Err(ExplorerError::Rejected(result))
	}

	async fn check_status(&self, guid: &str) -> Result<VerificationStatus, ExplorerError> {
		let chain_id = self.chain_id.to_string();
		let response = self
			.client
			.get(&self.api_url)
			.query(&[
				("chainid", chain_id.as_str()),
				("module", "contract"),
				("action", "checkverifystatus"),
				("guid", guid),
				("apikey", self.api_key.as_str()),
			])
			.send()
			.await
			.map_err(|e| ExplorerError::Http(e.to_string()))?;
		let response = parse_response(response).await?;

		let result = response.result_text();
		let status = if result.to_ascii_lowercase().contains("pending") {
			VerificationStatus::Pending
		} else if is_already_verified(&result) {
			VerificationStatus::AlreadyVerified
		} else if response.is_ok() {
			VerificationStatus::Verified
		} else {
			VerificationStatus::Failed(result)
		};
		Ok(status)
	}
}

async fn parse_response(response: reqwest::Response) -> Result<EtherscanResponse, ExplorerError> {
	let status = response.status();
	if !status.is_success() {
		return Err(ExplorerError::Http(format!("Explorer returned HTTP {status}")));
	}
	response
		.json::<EtherscanResponse>()
		.await
		.map_err(|e| ExplorerError::InvalidResponse(e.to_string()))
}

#[async_trait]
impl ExplorerClient for EtherscanClient {
	async fn verify(&self, request: &VerificationRequest) -> Result<(), ExplorerError> {
		let guid = self.submit(request).await?;

		for attempt in 1..=self.max_status_checks {
			tokio::time::sleep(self.poll_interval).await;

			match self.check_status(&guid).await? {
				VerificationStatus::Pending => {
					debug!(guid = %guid, attempt, "Verification pending");
				},
				VerificationStatus::Verified => return Ok(()),
				VerificationStatus::AlreadyVerified => return Err(ExplorerError::AlreadyVerified),
				VerificationStatus::Failed(reason) => return Err(ExplorerError::Failed(reason)),
			}
		}

		Err(ExplorerError::Pending {
			attempts: self.max_status_checks,
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use alloy_primitives::{address, Bytes};
	use serde_json::json;
	use wiremock::matchers::{body_string_contains, method, path, query_param};
	use wiremock::{Mock, MockServer, ResponseTemplate};

	fn request() -> VerificationRequest {
		VerificationRequest {
			address: address!("5FbDB2315678afecb367f032d93F642f64180aa3"),
			contract_identifier: "contracts/TokenLauncher.sol:TokenLauncher".to_string(),
			compiler_version: "v0.8.28+commit.7893614a".to_string(),
			standard_json_input: "{}".to_string(),
			constructor_arguments: Bytes::from(vec![0xab, 0xcd]),
		}
	}

	fn client(server: &MockServer) -> EtherscanClient {
		EtherscanClient::new(format!("{}/api", server.uri()), "test-key", 11155111)
			.unwrap()
			.with_polling(Duration::ZERO, 3)
	}

	fn envelope(status: &str, result: &str) -> ResponseTemplate {
		ResponseTemplate::new(200).set_body_json(json!({
			"status": status,
			"message": if status == "1" { "OK" } else { "NOTOK" },
			"result": result,
		}))
	}

	#[tokio::test]
	async fn verify_submits_and_polls_until_verified() {
		let mock_server = MockServer::start().await;

		Mock::given(method("POST"))
			.and(path("/api"))
			.and(query_param("chainid", "11155111"))
			.and(body_string_contains("action=verifysourcecode"))
			.and(body_string_contains("constructorArguements=abcd"))
			.and(body_string_contains("codeformat=solidity-standard-json-input"))
			.respond_with(envelope("1", "guid-123"))
			.expect(1)
			.mount(&mock_server)
			.await;

		Mock::given(method("GET"))
			.and(path("/api"))
			.and(query_param("action", "checkverifystatus"))
			.and(query_param("guid", "guid-123"))
			.respond_with(envelope("0", "Pending in queue"))
			.up_to_n_times(1)
			.mount(&mock_server)
			.await;

		Mock::given(method("GET"))
			.and(path("/api"))
			.and(query_param("guid", "guid-123"))
			.respond_with(envelope("1", "Pass - Verified"))
			.mount(&mock_server)
			.await;

		client(&mock_server).verify(&request()).await.unwrap();
	}

	#[tokio::test]
	async fn verify_reports_already_verified_on_submit() {
		let mock_server = MockServer::start().await;

		Mock::given(method("POST"))
			.and(path("/api"))
			.respond_with(envelope("0", "Contract source code already verified"))
			.expect(1)
			.mount(&mock_server)
			.await;

		let err = client(&mock_server).verify(&request()).await.unwrap_err();
		assert!(matches!(err, ExplorerError::AlreadyVerified));
	}

	#[tokio::test]
	async fn verify_reports_already_verified_on_status() {
		let mock_server = MockServer::start().await;

		Mock::given(method("POST"))
			.respond_with(envelope("1", "guid-1"))
			.mount(&mock_server)
			.await;
		Mock::given(method("GET"))
			.respond_with(envelope("1", "Already Verified"))
			.mount(&mock_server)
			.await;

		let err = client(&mock_server).verify(&request()).await.unwrap_err();
		assert!(matches!(err, ExplorerError::AlreadyVerified));
	}

	#[tokio::test]
	async fn verify_reports_failure() {
		let mock_server = MockServer::start().await;

		Mock::given(method("POST"))
			.respond_with(envelope("1", "guid-1"))
			.mount(&mock_server)
			.await;
		Mock::given(method("GET"))
			.respond_with(envelope("0", "Fail - Unable to verify"))
			.mount(&mock_server)
			.await;

		let err = client(&mock_server).verify(&request()).await.unwrap_err();
		assert!(matches!(err, ExplorerError::Failed(ref reason) if reason.contains("Unable to verify")));
	}

	#[tokio::test]
	async fn verify_gives_up_after_max_status_checks() {
		let mock_server = MockServer::start().await;

		Mock::given(method("POST"))
			.respond_with(envelope("1", "guid-1"))
			.mount(&mock_server)
			.await;
		Mock::given(method("GET"))
			.respond_with(envelope("0", "Pending in queue"))
			.expect(3)
			.mount(&mock_server)
			.await;

		let err = client(&mock_server).verify(&request()).await.unwrap_err();
		assert!(matches!(err, ExplorerError::Pending { attempts: 3 }));
	}

	#[tokio::test]
	async fn verify_maps_http_errors() {
		let mock_server = MockServer::start().await;

		Mock::given(method("POST"))
			.respond_with(ResponseTemplate::new(502))
			.mount(&mock_server)
			.await;

		let err = client(&mock_server).verify(&request()).await.unwrap_err();
		assert!(matches!(err, ExplorerError::Http(_)));
	}

	#[tokio::test]
	async fn from_config_targets_the_given_chain() {
		let mock_server = MockServer::start().await;

		Mock::given(method("POST"))
			.and(query_param("chainid", "10"))
			.respond_with(envelope("0", "Contract source code already verified"))
			.expect(1)
			.mount(&mock_server)
			.await;

		let config = ExplorerConfig {
			api_url: format!("{}/api", mock_server.uri()),
			api_key: "test-key".to_string(),
			..Default::default()
		};
		let client = EtherscanClient::from_config(&config, 10).unwrap();

		let err = client.verify(&request()).await.unwrap_err();
		assert!(matches!(err, ExplorerError::AlreadyVerified));
	}

	#[test]
	fn from_config_requires_api_key() {
		let config = ExplorerConfig {
			api_key: "${LAUNCHPAD_ETHERSCAN_TEST_KEY}".to_string(),
			..Default::default()
		};
		let err = EtherscanClient::from_config(&config, 11_155_111).err().unwrap();
		assert!(matches!(err, ExplorerError::Configuration(_)));
	}
}
