//! Job providers — one adapter per third-party job source.
//!
//! Every adapter turns an `AggregationQuery` into its provider's wire call and
//! normalizes the reply into `Job` records. Adapters are carried as
//! `Arc<dyn JobProvider>` so the aggregator and its tests can swap them freely.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use thiserror::Error;
use tracing::debug;

use crate::models::job::Job;
use crate::models::subscription::AggregationQuery;

pub mod google;
pub mod indeed;
pub mod linkedin;

pub use google::GoogleJobsProvider;
pub use indeed::IndeedProvider;
pub use linkedin::LinkedInProvider;

pub const DEFAULT_BASE_URL: &str = "https://api.scrapingdog.com";
const HTTP_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Provider returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Timed out after {0:?}")]
    Timeout(Duration),
}

impl ProviderError {
    /// Failures worth another attempt: rate limits, server errors and
    /// transport hiccups. Bad queries and unparseable bodies are not.
    pub fn is_transient(&self) -> bool {
        match self {
            ProviderError::Http(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            ProviderError::Status { status, .. } => *status == 429 || *status >= 500,
            ProviderError::Timeout(_) => true,
            ProviderError::InvalidQuery(_) | ProviderError::Parse(_) => false,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// A single external job source.
#[async_trait]
pub trait JobProvider: Send + Sync {
    /// Short label used in logs and errors.
    fn name(&self) -> &str;

    async fn fetch(&self, query: &AggregationQuery) -> Result<Vec<Job>, ProviderError>;
}

/// Credentials and endpoint shared by all scrapingdog-backed adapters.
#[derive(Debug, Clone)]
pub struct ProviderSettings {
    pub api_key: String,
    pub base_url: String,
}

impl ProviderSettings {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

/// Builds the HTTP client shared by every adapter.
pub fn build_http_client() -> reqwest::Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
        .build()
}

pub(crate) fn ensure_complete(query: &AggregationQuery) -> Result<(), ProviderError> {
    if query.is_complete() {
        Ok(())
    } else {
        Err(ProviderError::InvalidQuery(format!(
            "company and role must be non-empty (company={:?}, role={:?})",
            query.company, query.role
        )))
    }
}

/// Sends the request and returns the body of a 2xx response.
pub(crate) async fn send_for_body(
    provider: &str,
    request: RequestBuilder,
) -> Result<String, ProviderError> {
    let response = request.send().await?;
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(ProviderError::Status {
            status: status.as_u16(),
            body,
        });
    }

    debug!("{provider} responded {status} ({} bytes)", body.len());
    Ok(body)
}

/// Normalizes each element, dropping those that are not valid jobs.
pub(crate) fn normalize_all(provider: &str, items: Vec<serde_json::Value>) -> Vec<Job> {
    let total = items.len();
    let jobs: Vec<Job> = items
        .into_iter()
        .filter_map(Job::from_provider_value)
        .collect();

    if jobs.len() < total {
        debug!(
            "{provider}: dropped {} of {total} records without a company or title",
            total - jobs.len()
        );
    }
    jobs
}
