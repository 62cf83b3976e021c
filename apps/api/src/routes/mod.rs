pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::aggregation::handlers::handle_search;
use crate::state::AppState;
use crate::subscriptions::handlers::handle_subscription_jobs;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/subscriptions/jobs",
            post(handle_subscription_jobs),
        )
        .route("/api/v1/jobs/search", post(handle_search))
        .with_state(state)
}
