use std::collections::HashMap;

use axum::{extract::State, http::StatusCode, response::Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::server::ClinicServer;

/// Health check response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub version: String,
    pub uptime: u64,
    pub checks: HashMap<String, String>,
}

/// Health check handler
///
/// Reports `503` when the record store does not answer.
#[utoipa::path(
    get,
    path = "/api/v1/health",
    responses(
        (status = 200, description = "Server and store are healthy", body = HealthResponse),
        (status = 503, description = "Record store unavailable", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn health_check(State(server): State<ClinicServer>) -> (StatusCode, Json<HealthResponse>) {
    let store_healthy = server.store.is_healthy().await;

    let mut checks = HashMap::new();
    checks.insert(
        "database".to_string(),
        if store_healthy { "healthy" } else { "unavailable" }.to_string(),
    );

    let (status_code, status) = if store_healthy {
        (StatusCode::OK, "healthy")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };

    let response = HealthResponse {
        status: status.to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime: server.uptime_secs(),
        checks,
    };

    (status_code, Json(response))
}
