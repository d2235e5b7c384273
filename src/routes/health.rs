use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::app::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub services: ServiceHealth,
}

#[derive(Serialize)]
pub struct ServiceHealth {
    pub calculator: String,
    pub catalog: String,
}

/// Health check endpoint
///
/// The calculator needs no backing service, so a catalog outage only
/// degrades the service: inline calculations keep working.
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let catalog_ok = state.catalog.health_check().await;

    Json(HealthResponse {
        status: if catalog_ok { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        services: ServiceHealth {
            calculator: "ok".to_string(),
            catalog: if catalog_ok { "ok" } else { "error" }.to_string(),
        },
    })
}
