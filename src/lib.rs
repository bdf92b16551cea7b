pub mod app_state;
pub mod config;
pub mod entities;
pub mod fetcher;
pub mod health;
pub mod ingester;
pub mod news;
pub mod normalizer;
pub mod parser;
pub mod repositories;

use axum::{Router, routing::get};

use crate::app_state::AppState;

/// Routes the read service exposes. Middleware layers (CORS, tracing) are
/// applied by the binary.
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(news::handlers::root))
        .route("/api/news", get(news::handlers::latest_news))
        .route("/api/health", get(health::health_check))
        .with_state(state)
}
