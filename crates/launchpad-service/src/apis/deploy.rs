//! Token deployment endpoint.
//!
//! # Endpoints
//!
//! - `POST /api/deploy` - Deploy a token contract
//!
//! Request body: `{"name", "symbol", "initialSupply"?, "network"?}`.
//! Responds 200 with the deployment result on success, 500 with
//! `{"success": false, "error"}` when the deployment fails and 400 when the
//! request is rejected before anything is sent.

use crate::server::AppState;
use axum::{
	extract::{rejection::JsonRejection, State},
	http::StatusCode,
	response::{IntoResponse, Response},
	Json,
};
use launchpad_types::{DeployRequest, DeploymentResult, ErrorResponse};

/// POST /api/deploy.
pub async fn handle_deploy(
	State(state): State<AppState>,
	payload: Result<Json<DeployRequest>, JsonRejection>,
) -> Response {
	let request = match payload {
		Ok(Json(request)) => request,
		Err(rejection) => {
			tracing::warn!("Rejected deploy request body: {}", rejection.body_text());
			return bad_request(rejection.body_text());
		},
	};

	let spec = match state.launcher.defaults().from_request(&request) {
		Ok(spec) => spec,
		Err(e) => {
			tracing::warn!("Invalid deploy request: {}", e);
			return bad_request(e.to_string());
		},
	};
	let network = request.network().map(str::to_string);

	// Runs detached so a client disconnect does not abandon a submitted transaction
	let launcher = state.launcher.clone();
	let task = tokio::spawn(async move { launcher.launch(&spec, network.as_deref()).await });

	match task.await {
		Ok(result @ DeploymentResult::Deployed(_)) => (StatusCode::OK, Json(result)).into_response(),
		Ok(result) => (StatusCode::INTERNAL_SERVER_ERROR, Json(result)).into_response(),
		Err(e) => {
			tracing::error!("Deployment task failed: {}", e);
			(
				StatusCode::INTERNAL_SERVER_ERROR,
				Json(ErrorResponse::new(e.to_string())),
			)
				.into_response()
		},
	}
}

fn bad_request(message: String) -> Response {
	(StatusCode::BAD_REQUEST, Json(ErrorResponse::new(message))).into_response()
}
