pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::persona::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/personas", post(handlers::handle_create_persona))
        .route("/api/v1/personas/:username", get(handlers::handle_get_persona))
        .with_state(state)
}
