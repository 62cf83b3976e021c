//! Primary provider: professional-network job listings.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::info;

use super::{
    ensure_complete, normalize_all, send_for_body, JobProvider, ProviderError, ProviderSettings,
};
use crate::models::job::Job;
use crate::models::subscription::AggregationQuery;

const ENDPOINT: &str = "linkedinjobs";
pub const DEFAULT_GEOID: &str = "103644278";
const DEFAULT_PAGE: &str = "1";
const DEFAULT_SORT_BY: &str = "week";

/// Locale, paging and sort parameters sent with every search.
#[derive(Debug, Clone)]
pub struct LinkedInSearch {
    pub geoid: String,
    pub page: String,
    pub sort_by: String,
}

impl Default for LinkedInSearch {
    fn default() -> Self {
        Self {
            geoid: DEFAULT_GEOID.to_string(),
            page: DEFAULT_PAGE.to_string(),
            sort_by: DEFAULT_SORT_BY.to_string(),
        }
    }
}

pub struct LinkedInProvider {
    client: Client,
    settings: ProviderSettings,
    search: LinkedInSearch,
}

impl LinkedInProvider {
    pub fn new(client: Client, settings: ProviderSettings, search: LinkedInSearch) -> Self {
        Self {
            client,
            settings,
            search,
        }
    }
}

/// The provider takes a single free-text field: `"<role> AND <company>"`.
fn search_field(query: &AggregationQuery) -> String {
    format!("{} AND {}", query.role, query.company)
}

#[async_trait]
impl JobProvider for LinkedInProvider {
    fn name(&self) -> &str {
        "linkedin"
    }

    async fn fetch(&self, query: &AggregationQuery) -> Result<Vec<Job>, ProviderError> {
        ensure_complete(query)?;

        let field = search_field(query);
        info!("Fetching LinkedIn jobs for '{field}'");

        let request = self.client.get(self.settings.endpoint(ENDPOINT)).query(&[
            ("api_key", self.settings.api_key.as_str()),
            ("field", field.as_str()),
            ("geoid", self.search.geoid.as_str()),
            ("page", self.search.page.as_str()),
            ("sort_by", self.search.sort_by.as_str()),
        ]);

        let body = send_for_body(self.name(), request).await?;
        let items: Vec<Value> = serde_json::from_str(&body)?;
        Ok(normalize_all(self.name(), items))
    }
}
