//! Axum route handlers for ad-hoc job search.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::job::Job;
use crate::models::subscription::Subscription;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub company: String,
    pub role: String,
}

#[derive(Debug, Serialize)]
pub struct JobsResponse {
    pub jobs: Vec<Job>,
}

/// POST /api/v1/jobs/search
///
/// Aggregates and matches a single (company, role) pair without touching
/// stored subscriptions.
pub async fn handle_search(
    State(state): State<AppState>,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<JobsResponse>, AppError> {
    let Json(request) = payload?;
    let company = request.company.trim();
    let role = request.role.trim();
    if company.is_empty() || role.is_empty() {
        return Err(AppError::Validation(
            "company and role cannot be empty".to_string(),
        ));
    }

    let subscription = Subscription {
        company_name: company.to_string(),
        role_names: vec![role.to_string()],
    };
    let jobs = state.jobs.run(&[subscription]).await?;

    Ok(Json(JobsResponse { jobs }))
}
