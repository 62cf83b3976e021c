use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use super::{IdentityResolver, StoreError, SubscriptionStore};
use crate::models::subscription::SubscriptionRecord;

/// Read-only view over the `users`, `companies`, `roles` and `subscriptions` tables.
#[derive(Clone)]
pub struct PgDirectory {
    db: PgPool,
}

impl PgDirectory {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SubscriptionStore for PgDirectory {
    async fn active_subscriptions(
        &self,
        user_id: i64,
    ) -> Result<Vec<SubscriptionRecord>, StoreError> {
        // Casts keep decoding stable whether the columns are INT or BIGINT.
        let records = sqlx::query_as::<_, SubscriptionRecord>(
            r#"
            SELECT id::BIGINT AS id,
                   company_id::BIGINT AS company_id,
                   COALESCE(career_site_ids, '{}')::BIGINT[] AS career_site_ids,
                   COALESCE(role_ids, '{}')::BIGINT[] AS role_ids
            FROM subscriptions
            WHERE user_id = $1 AND active = $2
            ORDER BY id
            "#,
        )
        .bind(user_id)
        .bind(true)
        .fetch_all(&self.db)
        .await?;

        debug!("Loaded {} active subscriptions for user {user_id}", records.len());
        Ok(records)
    }
}

#[async_trait]
impl IdentityResolver for PgDirectory {
    async fn user_id_by_email(&self, email: &str) -> Result<Option<i64>, StoreError> {
        let id: Option<i64> = sqlx::query_scalar("SELECT id::BIGINT FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.db)
            .await?;
        Ok(id)
    }

    async fn company_name(&self, company_id: i64) -> Result<String, StoreError> {
        sqlx::query_scalar("SELECT name FROM companies WHERE id = $1")
            .bind(company_id)
            .fetch_optional(&self.db)
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("Company {company_id} not found")))
    }

    async fn role_name(&self, role_id: i64) -> Result<String, StoreError> {
        sqlx::query_scalar("SELECT name FROM roles WHERE id = $1")
            .bind(role_id)
            .fetch_optional(&self.db)
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("Role {role_id} not found")))
    }
}
