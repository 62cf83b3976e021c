//! Fan-out driver — expands subscriptions into per-(company, role) searches.
//!
//! Flow: resolve user → load subscriptions → resolve names → for each
//! (company, role): aggregate → match → concatenate → optional dedup.
//!
//! Pairs run with bounded concurrency but results are always concatenated in
//! subscription order, then role order. The first aggregation failure fails
//! the whole run.

use std::sync::Arc;

use futures::stream::{self, StreamExt, TryStreamExt};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::aggregation::aggregator::{AggregationError, Aggregator};
use crate::aggregation::dedup::{dedup_jobs, DedupStrategy};
use crate::aggregation::matcher::filter_jobs;
use crate::models::job::Job;
use crate::models::subscription::{AggregationQuery, Subscription, SubscriptionRecord};
use crate::subscriptions::{IdentityResolver, StoreError, SubscriptionStore};

#[derive(Debug, Error)]
pub enum FanOutError {
    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Subscription lookup failed: {0}")]
    Store(#[from] StoreError),

    #[error(transparent)]
    Aggregation(#[from] AggregationError),
}

#[derive(Debug, Clone)]
pub struct FanOutOptions {
    /// Maximum (company, role) searches in flight at once.
    pub max_concurrency: usize,
    pub dedup: DedupStrategy,
}

impl Default for FanOutOptions {
    fn default() -> Self {
        Self {
            max_concurrency: 4,
            dedup: DedupStrategy::None,
        }
    }
}

pub struct FanOutDriver {
    aggregator: Arc<Aggregator>,
    store: Arc<dyn SubscriptionStore>,
    identity: Arc<dyn IdentityResolver>,
    options: FanOutOptions,
}

impl FanOutDriver {
    pub fn new(
        aggregator: Arc<Aggregator>,
        store: Arc<dyn SubscriptionStore>,
        identity: Arc<dyn IdentityResolver>,
        options: FanOutOptions,
    ) -> Self {
        Self {
            aggregator,
            store,
            identity,
            options,
        }
    }

    /// All matching jobs for every active subscription of the user behind `email`.
    pub async fn jobs_for_email(&self, email: &str) -> Result<Vec<Job>, FanOutError> {
        let user_id = self
            .identity
            .user_id_by_email(email)
            .await?
            .ok_or_else(|| FanOutError::UserNotFound(email.to_string()))?;

        let records = self.store.active_subscriptions(user_id).await?;
        let subscriptions = self.resolve_names(records).await?;
        info!(
            "User {user_id} has {} active subscriptions",
            subscriptions.len()
        );

        Ok(self.run(&subscriptions).await?)
    }

    /// Runs one aggregate-and-match per (company, role) pair and concatenates
    /// the results in subscription order, then role order.
    pub async fn run(&self, subscriptions: &[Subscription]) -> Result<Vec<Job>, AggregationError> {
        let queries: Vec<AggregationQuery> = subscriptions
            .iter()
            .flat_map(|subscription| subscription.queries())
            .filter(|query| {
                if !query.is_complete() {
                    warn!(
                        "Skipping incomplete subscription pair (company={:?}, role={:?})",
                        query.company, query.role
                    );
                }
                query.is_complete()
            })
            .collect();

        info!("Fanning out {} searches", queries.len());

        let batches: Vec<Vec<Job>> = stream::iter(queries)
            .map(|query| self.search(query))
            .buffered(self.options.max_concurrency.max(1))
            .try_collect()
            .await?;

        let jobs: Vec<Job> = batches.into_iter().flatten().collect();
        let total = jobs.len();
        let jobs = dedup_jobs(jobs, self.options.dedup);
        if jobs.len() < total {
            debug!("Dedup removed {} duplicate jobs", total - jobs.len());
        }
        Ok(jobs)
    }

    async fn search(&self, query: AggregationQuery) -> Result<Vec<Job>, AggregationError> {
        let jobs = self.aggregator.aggregate(&query).await?;
        let total = jobs.len();
        let matched = filter_jobs(jobs, &query.company, &query.role);
        debug!(
            "{} of {total} jobs matched {} / {}",
            matched.len(),
            query.company,
            query.role
        );
        Ok(matched)
    }

    async fn resolve_names(
        &self,
        records: Vec<SubscriptionRecord>,
    ) -> Result<Vec<Subscription>, StoreError> {
        let mut subscriptions = Vec::with_capacity(records.len());
        for record in records {
            debug!(
                "Resolving subscription {} ({} roles, {} career sites)",
                record.id,
                record.role_ids.len(),
                record.career_site_ids.len()
            );
            let company_name = self.identity.company_name(record.company_id).await?;
            let mut role_names = Vec::with_capacity(record.role_ids.len());
            for role_id in &record.role_ids {
                role_names.push(self.identity.role_name(*role_id).await?);
            }
            subscriptions.push(Subscription {
                company_name,
                role_names,
            });
        }
        Ok(subscriptions)
    }
}
