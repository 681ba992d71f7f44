//! Liveness endpoint.
//!
//! # Endpoints
//!
//! - `GET /api/health` - Always `{"status": "ok"}`

use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
	pub status: &'static str,
}

/// GET /api/health. Does not touch any network.
pub async fn handle_health() -> Json<HealthResponse> {
	Json(HealthResponse { status: "ok" })
}
