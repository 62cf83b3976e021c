use std::sync::Arc;

use crate::aggregation::fanout::FanOutDriver;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Subscription fan-out over all configured providers.
    pub jobs: Arc<FanOutDriver>,
}
