use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::aggregation::aggregator::AggregationError;
use crate::aggregation::fanout::FanOutError;
use crate::subscriptions::StoreError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Aggregation error: {0}")]
    Aggregation(#[from] AggregationError),
}

impl From<FanOutError> for AppError {
    fn from(err: FanOutError) -> Self {
        match err {
            FanOutError::UserNotFound(email) => {
                AppError::NotFound(format!("User {email} not found"))
            }
            FanOutError::Store(e) => AppError::Store(e),
            FanOutError::Aggregation(e) => AppError::Aggregation(e),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Store(e) => {
                tracing::error!("Store error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "STORE_ERROR",
                    "Error fetching subscriptions".to_string(),
                )
            }
            AppError::Aggregation(e) => {
                tracing::error!("Aggregation error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "AGGREGATION_ERROR",
                    "Error fetching jobs".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
