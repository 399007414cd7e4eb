pub mod evaluations;
pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/evaluations",
            post(evaluations::handle_evaluate)
                .layer(DefaultBodyLimit::max(evaluations::MAX_UPLOAD_BYTES)),
        )
        .with_state(state)
}
