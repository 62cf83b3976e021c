//! Aggregator — queries every provider for one (company, role) pair.
//!
//! The primary provider is authoritative: if it still fails after its retry
//! budget, the whole call fails. Secondary providers only enrich; their
//! failures are logged and contribute nothing. All providers run concurrently
//! and the merge is always primary first, then secondaries in configured order.

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use thiserror::Error;
use tracing::{info, warn};

use crate::models::job::Job;
use crate::models::subscription::AggregationQuery;
use crate::providers::{JobProvider, ProviderError};

#[derive(Debug, Error)]
pub enum AggregationError {
    #[error("Primary provider '{provider}' failed: {source}")]
    PrimaryFailed {
        provider: String,
        #[source]
        source: ProviderError,
    },
}

#[derive(Debug, Clone)]
pub struct AggregatorOptions {
    /// Upper bound for a single provider call, retries excluded.
    pub provider_timeout: Duration,
    /// Extra attempts for the primary provider on transient failures.
    pub primary_retries: u32,
    /// Backoff before retry n is `retry_base_delay * 2^(n-1)`.
    pub retry_base_delay: Duration,
}

impl Default for AggregatorOptions {
    fn default() -> Self {
        Self {
            provider_timeout: Duration::from_secs(30),
            primary_retries: 2,
            retry_base_delay: Duration::from_millis(500),
        }
    }
}

pub struct Aggregator {
    primary: Arc<dyn JobProvider>,
    secondaries: Vec<Arc<dyn JobProvider>>,
    options: AggregatorOptions,
}

impl Aggregator {
    pub fn new(
        primary: Arc<dyn JobProvider>,
        secondaries: Vec<Arc<dyn JobProvider>>,
        options: AggregatorOptions,
    ) -> Self {
        Self {
            primary,
            secondaries,
            options,
        }
    }

    /// Returns primary ++ secondaries for the query, unfiltered and undeduplicated.
    ///
    /// A primary failure returns early, which drops any secondary calls still
    /// in flight.
    pub async fn aggregate(&self, query: &AggregationQuery) -> Result<Vec<Job>, AggregationError> {
        let secondary_calls = join_all(
            self.secondaries
                .iter()
                .map(|provider| self.fetch_once(provider.as_ref(), query)),
        );

        let (mut jobs, secondary_results) = tokio::try_join!(self.fetch_primary(query), async {
            Ok::<_, AggregationError>(secondary_calls.await)
        })?;

        let primary_count = jobs.len();
        for (provider, result) in self.secondaries.iter().zip(secondary_results) {
            match result {
                Ok(found) if !found.is_empty() => jobs.extend(found),
                Ok(_) => {}
                Err(e) => warn!(
                    "Secondary provider '{}' failed for {} / {}: {e}",
                    provider.name(),
                    query.company,
                    query.role
                ),
            }
        }

        info!(
            "Aggregated {} jobs for {} / {} ({} from {})",
            jobs.len(),
            query.company,
            query.role,
            primary_count,
            self.primary.name()
        );
        Ok(jobs)
    }

    async fn fetch_primary(&self, query: &AggregationQuery) -> Result<Vec<Job>, AggregationError> {
        let provider = self.primary.as_ref();
        let mut attempt: u32 = 0;

        loop {
            match self.fetch_once(provider, query).await {
                Ok(jobs) => return Ok(jobs),
                Err(e) if e.is_transient() && attempt < self.options.primary_retries => {
                    attempt += 1;
                    let delay = self.options.retry_base_delay * (1u32 << (attempt - 1).min(16));
                    warn!(
                        "Primary provider '{}' attempt {} failed ({e}), retrying after {}ms...",
                        provider.name(),
                        attempt,
                        delay.as_millis()
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => {
                    return Err(AggregationError::PrimaryFailed {
                        provider: provider.name().to_string(),
                        source: e,
                    })
                }
            }
        }
    }

    async fn fetch_once(
        &self,
        provider: &dyn JobProvider,
        query: &AggregationQuery,
    ) -> Result<Vec<Job>, ProviderError> {
        let timeout = self.options.provider_timeout;
        match tokio::time::timeout(timeout, provider.fetch(query)).await {
            Ok(result) => result,
            Err(_) => Err(ProviderError::Timeout(timeout)),
        }
    }
}
