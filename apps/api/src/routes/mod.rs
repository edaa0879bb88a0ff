pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::scans::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/quota", get(handlers::handle_get_quota))
        .route("/api/v1/match/classify", post(handlers::handle_classify))
        .route("/api/v1/scans", post(handlers::handle_scan))
        .with_state(state)
}
