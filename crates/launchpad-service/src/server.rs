//! HTTP server for the launchpad relay.

use crate::apis::{deploy::handle_deploy, health::handle_health};
use axum::{
	routing::{get, post},
	Router, ServiceExt,
};
use launchpad_config::ApiConfig;
use launchpad_deploy::Launcher;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::normalize_path::NormalizePath;

/// Shared application state for the API server.
#[derive(Clone)]
pub struct AppState {
	pub launcher: Arc<Launcher>,
}

/// Builds the relay routes with permissive CORS.
pub fn router(state: AppState) -> Router {
	let api_routes = Router::new()
		.route("/deploy", post(handle_deploy))
		.route("/health", get(handle_health));

	Router::new()
		.nest("/api", api_routes)
		.layer(ServiceBuilder::new().layer(CorsLayer::permissive()))
		.with_state(state)
}

/// Binds to the configured address and serves until the process exits.
pub async fn start_server(
	api_config: ApiConfig,
	launcher: Launcher,
) -> Result<(), Box<dyn std::error::Error>> {
	let app_state = AppState {
		launcher: Arc::new(launcher),
	};
	let app = router(app_state);

	let bind_address = format!("{}:{}", api_config.host, api_config.port);
	let listener = TcpListener::bind(&bind_address).await?;

	tracing::info!(
		default_network = %api_config.default_network,
		"Launchpad relay listening on {}",
		bind_address
	);

	let app = NormalizePath::trim_trailing_slash(app);
	let service = ServiceExt::<axum::http::Request<axum::body::Body>>::into_make_service(app);

	axum::serve(listener, service).await?;

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use alloy_primitives::{address, U256};
	use axum::{
		body::{to_bytes, Body},
		http::{Request, StatusCode},
	};
	use launchpad_deploy::{
		DeployError, DeployedContract, LaunchDefaults, MockContractFactory, MockNetworkSession,
		MockSessionResolver, NetworkSession, SessionError,
	};
	use serde_json::{json, Value};
	use tower::ServiceExt;

	fn defaults() -> LaunchDefaults {
		LaunchDefaults {
			network: "sepolia".to_string(),
			initial_supply: U256::from(1_000_000u64),
			contract_name: "TokenLauncher".to_string(),
		}
	}

	fn app(resolver: MockSessionResolver) -> Router {
		router(AppState {
			launcher: Arc::new(Launcher::new(Arc::new(resolver), defaults())),
		})
	}

	/// Resolver whose sessions deploy successfully and check the supply.
	fn deploying_resolver(expected_network: &'static str, expected_supply: U256) -> MockSessionResolver {
		let mut resolver = MockSessionResolver::new();
		resolver
			.expect_resolve()
			.withf(move |network| network == expected_network)
			.times(1)
			.returning(move |_| {
				let mut session = MockNetworkSession::new();
				session
					.expect_network_name()
					.returning(|| "sepolia".to_string());
				session
					.expect_signers()
					.returning(|| vec![address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266")]);
				session.expect_contract_factory().returning(move |_| {
					let mut factory = MockContractFactory::new();
					factory
						.expect_deploy()
						.withf(move |_, args| {
							args.get(2).and_then(|v| v.as_uint()).map(|(v, _)| v)
								== Some(expected_supply)
						})
						.returning(|_, _| {
							Box::pin(async {
								Ok(DeployedContract {
									address: address!("5FbDB2315678afecb367f032d93F642f64180aa3"),
									transaction_hash: None,
								})
							})
						});
					Box::pin(async move {
						Ok(Box::new(factory) as Box<dyn launchpad_deploy::ContractFactory>)
					})
				});
				Box::pin(async move { Ok(Box::new(session) as Box<dyn NetworkSession>) })
			});
		resolver
	}

	async fn post_deploy(app: Router, body: &str) -> (StatusCode, Value) {
		let response = app
			.oneshot(
				Request::builder()
					.method("POST")
					.uri("/api/deploy")
					.header("content-type", "application/json")
					.body(Body::from(body.to_string()))
					.unwrap(),
			)
			.await
			.unwrap();

		let status = response.status();
		let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
		(status, serde_json::from_slice(&bytes).unwrap())
	}

	#[tokio::test]
	async fn test_health() {
		let response = app(MockSessionResolver::new())
			.oneshot(Request::builder().uri("/api/health").body(Body::empty()).unwrap())
			.await
			.unwrap();

		assert_eq!(response.status(), StatusCode::OK);
		let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
		let body: Value = serde_json::from_slice(&bytes).unwrap();
		assert_eq!(body, json!({ "status": "ok" }));
	}

	#[tokio::test]
	async fn test_deploy_success_uses_default_network() {
		let (status, body) = post_deploy(
			app(deploying_resolver("sepolia", U256::from(1_000_000u64))),
			r#"{"name": "Test", "symbol": "TST"}"#,
		)
		.await;

		assert_eq!(status, StatusCode::OK);
		assert_eq!(body["success"], true);
		assert_eq!(body["name"], "Test");
		assert_eq!(body["symbol"], "TST");
		assert_eq!(
			body["address"].as_str().unwrap().to_lowercase(),
			"0x5fbdb2315678afecb367f032d93f642f64180aa3"
		);
	}

	#[tokio::test]
	async fn test_deploy_with_network_and_string_supply() {
		let (status, body) = post_deploy(
			app(deploying_resolver("hardhatMainnet", U256::from(500u64))),
			r#"{"name": "Test", "symbol": "TST", "initialSupply": "500", "network": "hardhatMainnet"}"#,
		)
		.await;

		assert_eq!(status, StatusCode::OK);
		assert_eq!(body["success"], true);
	}

	#[tokio::test]
	async fn test_deploy_with_integer_supply_beyond_u64() {
		let (status, body) = post_deploy(
			app(deploying_resolver(
				"sepolia",
				U256::from(100_000_000_000_000_000_000u128),
			)),
			r#"{"name": "Test", "symbol": "TST", "initialSupply": 100000000000000000000}"#,
		)
		.await;

		assert_eq!(status, StatusCode::OK);
		assert_eq!(body["success"], true);
	}

	#[tokio::test]
	async fn test_missing_symbol_is_rejected_before_deploying() {
		let mut resolver = MockSessionResolver::new();
		resolver.expect_resolve().never();

		let (status, body) = post_deploy(app(resolver), r#"{"name": "Test", "symbol": ""}"#).await;

		assert_eq!(status, StatusCode::BAD_REQUEST);
		assert_eq!(
			body,
			json!({ "success": false, "error": "Token name and symbol are required" })
		);
	}

	#[tokio::test]
	async fn test_malformed_json_is_rejected() {
		let mut resolver = MockSessionResolver::new();
		resolver.expect_resolve().never();

		let (status, body) = post_deploy(app(resolver), "{not json").await;

		assert_eq!(status, StatusCode::BAD_REQUEST);
		assert_eq!(body["success"], false);
		assert!(body["error"].is_string());
	}

	#[tokio::test]
	async fn test_invalid_supply_is_rejected() {
		let mut resolver = MockSessionResolver::new();
		resolver.expect_resolve().never();

		let (status, body) = post_deploy(
			app(resolver),
			r#"{"name": "Test", "symbol": "TST", "initialSupply": "12abc"}"#,
		)
		.await;

		assert_eq!(status, StatusCode::BAD_REQUEST);
		assert_eq!(body["success"], false);
	}

	#[tokio::test]
	async fn test_deployment_failure_returns_500() {
		let mut resolver = MockSessionResolver::new();
		resolver.expect_resolve().returning(|_| {
			Box::pin(async {
				Err(SessionError::MissingVariable {
					network: "sepolia".to_string(),
					variable: "SEPOLIA_RPC_URL".to_string(),
				})
			})
		});

		let (status, body) =
			post_deploy(app(resolver), r#"{"name": "Test", "symbol": "TST"}"#).await;

		assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
		assert_eq!(body["success"], false);
		assert!(body["error"].as_str().unwrap().contains("SEPOLIA_RPC_URL"));
		assert!(body.get("address").is_none());
	}

	#[tokio::test]
	async fn test_transaction_failure_returns_500() {
		let mut resolver = MockSessionResolver::new();
		resolver.expect_resolve().returning(|_| {
			let mut session = MockNetworkSession::new();
			session
				.expect_network_name()
				.returning(|| "sepolia".to_string());
			session
				.expect_signers()
				.returning(|| vec![address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266")]);
			session.expect_contract_factory().returning(|_| {
				Box::pin(async {
					Err(DeployError::FactoryResolution {
						contract: "TokenLauncher".to_string(),
						reason: "not found".to_string(),
					})
				})
			});
			Box::pin(async move { Ok(Box::new(session) as Box<dyn NetworkSession>) })
		});

		let (status, body) =
			post_deploy(app(resolver), r#"{"name": "Test", "symbol": "TST"}"#).await;

		assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
		assert_eq!(body["success"], false);
	}
}
