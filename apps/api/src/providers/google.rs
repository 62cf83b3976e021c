//! Secondary provider: general web search for job listings.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use super::{
    ensure_complete, normalize_all, send_for_body, JobProvider, ProviderError, ProviderSettings,
};
use crate::models::job::Job;
use crate::models::subscription::AggregationQuery;

const ENDPOINT: &str = "google_jobs";

/// The search API answers with either a bare array or an envelope object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum GoogleJobsPayload {
    Flat(Vec<Value>),
    Envelope {
        #[serde(alias = "jobs")]
        jobs_results: Vec<Value>,
    },
}

impl GoogleJobsPayload {
    fn into_items(self) -> Vec<Value> {
        match self {
            GoogleJobsPayload::Flat(items) => items,
            GoogleJobsPayload::Envelope { jobs_results } => jobs_results,
        }
    }
}

pub struct GoogleJobsProvider {
    client: Client,
    settings: ProviderSettings,
}

impl GoogleJobsProvider {
    pub fn new(client: Client, settings: ProviderSettings) -> Self {
        Self { client, settings }
    }
}

fn search_query(query: &AggregationQuery) -> String {
    format!("{} AND {}", query.company, query.role)
}

#[async_trait]
impl JobProvider for GoogleJobsProvider {
    fn name(&self) -> &str {
        "google"
    }

    async fn fetch(&self, query: &AggregationQuery) -> Result<Vec<Job>, ProviderError> {
        ensure_complete(query)?;

        let search = search_query(query);
        info!("Fetching Google jobs for '{search}'");

        let request = self.client.get(self.settings.endpoint(ENDPOINT)).query(&[
            ("api_key", self.settings.api_key.as_str()),
            ("query", search.as_str()),
        ]);

        let body = send_for_body(self.name(), request).await?;
        let payload: GoogleJobsPayload = serde_json::from_str(&body)?;
        Ok(normalize_all(self.name(), payload.into_items()))
    }
}
