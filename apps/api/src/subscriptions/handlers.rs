use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Deserialize;

use crate::aggregation::handlers::JobsResponse;
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SubscriptionJobsRequest {
    pub email: String,
}

/// POST /api/v1/subscriptions/jobs
///
/// Returns currently open postings for every active subscription of the user.
pub async fn handle_subscription_jobs(
    State(state): State<AppState>,
    payload: Result<Json<SubscriptionJobsRequest>, JsonRejection>,
) -> Result<Json<JobsResponse>, AppError> {
    let Json(request) = payload?;
    let email = request.email.trim();
    if email.is_empty() {
        return Err(AppError::Validation("email is required".to_string()));
    }

    let jobs = state.jobs.jobs_for_email(email).await?;
    Ok(Json(JobsResponse { jobs }))
}
