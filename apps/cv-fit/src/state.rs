use std::sync::Arc;

use crate::pipeline::Pipeline;

/// Shared application state injected into all route handlers via Axum extractors.
/// The pipeline is immutable; concurrent requests each run it sequentially.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<Pipeline>,
}
