//! Identity resolution
//!
//! Maps an authenticated principal name to a user account. Handlers depend on
//! the [`UserDirectory`] trait only, so tests can substitute fabricated
//! identities without a database.

use codecamp_common::RepositoryError;
use sqlx::PgPool;

use crate::types::{CampUser, StoredCredentials};

/// Lookup capability for user accounts
#[async_trait::async_trait]
pub trait UserDirectory: Send + Sync {
    /// Find the account whose user name equals `user_name`
    async fn find_by_name(&self, user_name: &str) -> Result<Option<CampUser>, RepositoryError>;

    /// Load stored credentials for token issuance
    async fn find_credentials(
        &self,
        user_name: &str,
    ) -> Result<Option<StoredCredentials>, RepositoryError>;
}

/// Postgres-backed user directory.
///
/// Uses runtime `sqlx::query_as` against the `users` table.
#[derive(Clone)]
pub struct PgUserDirectory {
    pool: PgPool,
}

impl PgUserDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl UserDirectory for PgUserDirectory {
    async fn find_by_name(&self, user_name: &str) -> Result<Option<CampUser>, RepositoryError> {
        let user: Option<CampUser> = sqlx::query_as(
            r#"
            SELECT id, user_name, email
            FROM users
            WHERE user_name = $1
            "#,
        )
        .bind(user_name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, user_name = %user_name, "Failed to load user");
            RepositoryError::Connection(e)
        })?;

        Ok(user)
    }

    async fn find_credentials(
        &self,
        user_name: &str,
    ) -> Result<Option<StoredCredentials>, RepositoryError> {
        let credentials: Option<StoredCredentials> = sqlx::query_as(
            r#"
            SELECT user_name, password_hash
            FROM users
            WHERE user_name = $1
            "#,
        )
        .bind(user_name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(credentials)
    }
}
