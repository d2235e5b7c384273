pub mod calculator;
pub mod health;

use axum::{routing::get, routing::post, Router};
use std::sync::Arc;

use crate::app::AppState;

/// Build the API router with all routes
pub fn api_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health::health_check))
        // Calculator
        .route("/calculator/presets", get(calculator::list_presets))
        .route(
            "/calculator/calculate",
            post(calculator::calculate).get(calculator::calculate_query),
        )
        .route("/calculator/area", post(calculator::calculate_area))
        .route("/calculator/volume", post(calculator::calculate_volume))
        .route("/calculator/linear", post(calculator::calculate_linear))
        // Product page calculator
        .route(
            "/products/:product_id/calculate",
            get(calculator::calculate_for_product),
        )
}
