//! Secondary provider: aggregator-style job board.
//!
//! The scraping API does not take search terms directly. It takes a full board
//! search URL, so the adapter first builds that URL from the query and then
//! passes it (URL-encoded) as the `url` parameter. Replies mix job objects with
//! metadata objects in one array.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::info;
use url::Url;

use super::{
    ensure_complete, normalize_all, send_for_body, JobProvider, ProviderError, ProviderSettings,
};
use crate::models::job::Job;
use crate::models::subscription::AggregationQuery;

const ENDPOINT: &str = "indeed";
const BOARD_SEARCH_URL: &str = "https://www.indeed.com/jobs";

/// The board names its title `job_title`. It only stands in for the title when
/// the element carries neither `job_position` nor `title` as a string.
const BOARD_TITLE_FIELD: &str = "job_title";

pub struct IndeedProvider {
    client: Client,
    settings: ProviderSettings,
}

impl IndeedProvider {
    pub fn new(client: Client, settings: ProviderSettings) -> Self {
        Self { client, settings }
    }
}

/// Builds the board's own search URL for the role at the company.
fn board_search_url(query: &AggregationQuery) -> Result<Url, ProviderError> {
    let terms = format!("{} {}", query.role.trim(), query.company.trim());
    Url::parse_with_params(BOARD_SEARCH_URL, &[("q", terms)])
        .map_err(|e| ProviderError::InvalidQuery(format!("cannot build search URL: {e}")))
}

/// Promotes the board's own title field so the shared normalizer can read it.
fn promote_board_title(item: Value) -> Value {
    let Value::Object(mut fields) = item else {
        return item;
    };
    let has_title = ["job_position", "title"]
        .iter()
        .any(|key| fields.get(*key).is_some_and(Value::is_string));
    if !has_title && fields.get(BOARD_TITLE_FIELD).is_some_and(Value::is_string) {
        if let Some(title) = fields.remove(BOARD_TITLE_FIELD) {
            fields.insert("title".to_string(), title);
        }
    }
    Value::Object(fields)
}

/// Every array element is tried as a job; metadata objects and anything else
/// without a string company and title are skipped. A body that is not an
/// array at all is a parse failure.
fn parse_jobs(body: &str) -> Result<Vec<Job>, ProviderError> {
    let items: Vec<Value> = serde_json::from_str(body)?;
    let items = items.into_iter().map(promote_board_title).collect();
    Ok(normalize_all("indeed", items))
}

#[async_trait]
impl JobProvider for IndeedProvider {
    fn name(&self) -> &str {
        "indeed"
    }

    async fn fetch(&self, query: &AggregationQuery) -> Result<Vec<Job>, ProviderError> {
        ensure_complete(query)?;

        let search_url = board_search_url(query)?;
        info!("Fetching Indeed jobs via {search_url}");

        let request = self.client.get(self.settings.endpoint(ENDPOINT)).query(&[
            ("api_key", self.settings.api_key.as_str()),
            ("url", search_url.as_str()),
        ]);

        let body = send_for_body(self.name(), request).await?;
        parse_jobs(&body)
    }
}
