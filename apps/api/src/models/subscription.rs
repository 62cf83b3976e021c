use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One (company, role) pair sent to every provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationQuery {
    pub company: String,
    pub role: String,
}

impl AggregationQuery {
    pub fn new(company: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            company: company.into(),
            role: role.into(),
        }
    }

    /// Both halves must carry text before any provider is called.
    pub fn is_complete(&self) -> bool {
        !self.company.trim().is_empty() && !self.role.trim().is_empty()
    }
}

/// A user's subscription with ids already resolved to display names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    pub company_name: String,
    pub role_names: Vec<String>,
}

impl Subscription {
    /// Expands into one query per role, preserving role order.
    pub fn queries(&self) -> impl Iterator<Item = AggregationQuery> + '_ {
        self.role_names
            .iter()
            .map(|role| AggregationQuery::new(self.company_name.clone(), role.clone()))
    }
}

/// Active subscription row as stored, before identity resolution.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct SubscriptionRecord {
    pub id: i64,
    pub company_id: i64,
    pub career_site_ids: Vec<i64>,
    pub role_ids: Vec<i64>,
}
