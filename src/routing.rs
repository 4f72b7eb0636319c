//! Application router configuration.

use axum::{Json, Router, routing::get};
use serde_json::{Value, json};
use tower_http::cors::CorsLayer;

use crate::{
    AppState, endpoints,
    not_found::get_404_not_found,
    report::{
        get_all_transactions, get_monthly_transactions, get_price_histogram, get_sale_statistics,
    },
};

/// Return a router with all the app's routes.
///
/// Cross-origin requests are allowed from any origin so the dashboard can be
/// served from a different host.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::BAR_CHART, get(get_price_histogram))
        .route(endpoints::STATISTICS, get(get_sale_statistics))
        .route(endpoints::ALL_TRANSACTIONS, get(get_all_transactions))
        .route(endpoints::TRANSACTIONS, get(get_monthly_transactions))
        .route(endpoints::HEALTH, get(get_health))
        .fallback(get_404_not_found)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Report that the server is up without touching the dataset source.
async fn get_health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
