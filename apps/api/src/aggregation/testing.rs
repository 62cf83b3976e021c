//! Scripted in-memory collaborators for aggregation, fan-out and router tests.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Map;

use crate::models::job::Job;
use crate::models::subscription::{AggregationQuery, SubscriptionRecord};
use crate::providers::{JobProvider, ProviderError};
use crate::subscriptions::{IdentityResolver, StoreError, SubscriptionStore};

pub fn job(title: &str, company: &str) -> Job {
    Job {
        title: title.to_string(),
        company_name: company.to_string(),
        link: String::new(),
        location: String::new(),
        extra: Map::new(),
    }
}

/// One scripted provider reply.
#[derive(Debug, Clone)]
pub enum Step {
    Jobs(Vec<Job>),
    Status(u16),
    Unparseable,
    Delay(Duration, Vec<Job>),
    /// Two jobs tagged with the provider name: one matching the query, one not.
    Echo,
    /// Reply chosen by the query's role, after that entry's delay.
    ByRole(Vec<(String, Duration, Vec<Job>)>),
}

/// Replays its script in order; the last step repeats forever.
pub struct FakeProvider {
    name: String,
    script: Mutex<VecDeque<Step>>,
    calls: AtomicUsize,
    queries: Mutex<Vec<AggregationQuery>>,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
}

/// Counts one fetch as in flight until dropped.
struct InFlight<'a>(&'a AtomicUsize);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl FakeProvider {
    pub fn new(name: &str, script: Vec<Step>) -> Self {
        Self {
            name: name.to_string(),
            script: Mutex::new(script.into()),
            calls: AtomicUsize::new(0),
            queries: Mutex::new(Vec::new()),
            in_flight: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn queries(&self) -> Vec<AggregationQuery> {
        self.queries.lock().unwrap().clone()
    }

    /// Highest number of fetches that were running at the same time.
    pub fn peak_in_flight(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    fn enter(&self) -> InFlight<'_> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        InFlight(&self.in_flight)
    }

    fn next_step(&self) -> Step {
        let mut script = self.script.lock().unwrap();
        if script.len() > 1 {
            script.pop_front().unwrap()
        } else {
            script.front().cloned().unwrap_or(Step::Jobs(Vec::new()))
        }
    }
}

#[async_trait]
impl JobProvider for FakeProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self, query: &AggregationQuery) -> Result<Vec<Job>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let _in_flight = self.enter();
        self.queries.lock().unwrap().push(query.clone());

        match self.next_step() {
            Step::Jobs(jobs) => Ok(jobs),
            Step::Status(status) => Err(ProviderError::Status {
                status,
                body: String::new(),
            }),
            Step::Unparseable => Err(ProviderError::Parse(
                serde_json::from_str::<Vec<u8>>("not json").unwrap_err(),
            )),
            Step::Delay(delay, jobs) => {
                tokio::time::sleep(delay).await;
                Ok(jobs)
            }
            Step::Echo => {
                let mut hit = job(&format!("Senior {}", query.role), &query.company);
                hit.link = format!("https://{}.example/{}", self.name, query.role);
                let miss = job("Office Manager", &query.company);
                Ok(vec![hit, miss])
            }
            Step::ByRole(routes) => {
                let route = routes.into_iter().find(|(role, _, _)| *role == query.role);
                let Some((_, delay, jobs)) = route else {
                    return Ok(Vec::new());
                };
                tokio::time::sleep(delay).await;
                Ok(jobs)
            }
        }
    }
}

/// In-memory directory: users by email, names by id, subscriptions by user.
#[derive(Default)]
pub struct FakeDirectory {
    pub users: HashMap<String, i64>,
    pub companies: HashMap<i64, String>,
    pub roles: HashMap<i64, String>,
    pub subscriptions: HashMap<i64, Vec<SubscriptionRecord>>,
    pub fail_store: bool,
}

#[async_trait]
impl SubscriptionStore for FakeDirectory {
    async fn active_subscriptions(
        &self,
        user_id: i64,
    ) -> Result<Vec<SubscriptionRecord>, StoreError> {
        if self.fail_store {
            return Err(StoreError::Database(sqlx::Error::PoolClosed));
        }
        Ok(self.subscriptions.get(&user_id).cloned().unwrap_or_default())
    }
}

#[async_trait]
impl IdentityResolver for FakeDirectory {
    async fn user_id_by_email(&self, email: &str) -> Result<Option<i64>, StoreError> {
        Ok(self.users.get(email).copied())
    }

    async fn company_name(&self, company_id: i64) -> Result<String, StoreError> {
        self.companies
            .get(&company_id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("company {company_id}")))
    }

    async fn role_name(&self, role_id: i64) -> Result<String, StoreError> {
        self.roles
            .get(&role_id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("role {role_id}")))
    }
}
