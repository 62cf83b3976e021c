//! Collaborators that turn a user into the subscriptions to search for.
//!
//! The fan-out driver only sees these traits; `PgDirectory` is the production
//! implementation and tests use in-memory fakes.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::subscription::SubscriptionRecord;

pub mod handlers;
pub mod postgres;

pub use postgres::PgDirectory;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Not found: {0}")]
    NotFound(String),
}

#[async_trait]
pub trait SubscriptionStore: Send + Sync {
    /// Active subscriptions for the user, in storage order.
    async fn active_subscriptions(&self, user_id: i64)
        -> Result<Vec<SubscriptionRecord>, StoreError>;
}

#[async_trait]
pub trait IdentityResolver: Send + Sync {
    async fn user_id_by_email(&self, email: &str) -> Result<Option<i64>, StoreError>;

    async fn company_name(&self, company_id: i64) -> Result<String, StoreError>;

    async fn role_name(&self, role_id: i64) -> Result<String, StoreError>;
}
