//! JSON-RPC endpoint stub for provider tests.

use serde_json::{json, Value};
use std::collections::HashMap;
use wiremock::{matchers::method, Mock, MockServer, Request, Respond, ResponseTemplate};

/// Answers calls by method name and echoes the request id. Unknown methods
/// get a "method not found" error.
struct RpcResponder {
	results: HashMap<String, Value>,
}

impl Respond for RpcResponder {
	fn respond(&self, request: &Request) -> ResponseTemplate {
		let body: Value = serde_json::from_slice(&request.body).unwrap_or_default();
		let id = body["id"].clone();
		let rpc_method = body["method"].as_str().unwrap_or_default();

		let response = match self.results.get(rpc_method) {
			Some(result) => json!({ "jsonrpc": "2.0", "id": id, "result": result }),
			None => json!({
				"jsonrpc": "2.0",
				"id": id,
				"error": { "code": -32601, "message": format!("the method {rpc_method} does not exist") }
			}),
		};
		ResponseTemplate::new(200).set_body_json(response)
	}
}

/// Starts an endpoint answering each `(method, result)` pair.
pub(crate) async fn rpc_server(results: &[(&str, Value)]) -> MockServer {
	let server = MockServer::start().await;
	let results = results
		.iter()
		.map(|(name, result)| (name.to_string(), result.clone()))
		.collect();
	Mock::given(method("POST"))
		.respond_with(RpcResponder { results })
		.mount(&server)
		.await;
	server
}
