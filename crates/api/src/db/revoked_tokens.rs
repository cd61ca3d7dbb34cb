//! Revoked token lookup table.
//!
//! A `jti` present here is rejected for the rest of its token's lifetime.
//! Rows are never updated or removed by the API.

use sqlx::PgPool;

use super::RepositoryError;

/// Repository for the `revoked_tokens` table.
pub struct RevokedTokenRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> RevokedTokenRepository<'a> {
    /// Create a new revoked token repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Record a token identifier as revoked.
    ///
    /// Idempotent: revoking an identifier twice leaves a single row, even when
    /// the calls race. Requires a unique index on `revoked_tokens.jti`.
    ///
    /// # Returns
    ///
    /// `true` if this call inserted the row, `false` if it was already revoked.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn add(&self, jti: &str) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            r"
            INSERT INTO revoked_tokens (jti)
            VALUES ($1)
            ON CONFLICT (jti) DO NOTHING
            ",
        )
        .bind(jti)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Check whether a token identifier has been revoked.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn contains(&self, jti: &str) -> Result<bool, RepositoryError> {
        let (revoked,): (bool,) =
            sqlx::query_as("SELECT EXISTS (SELECT 1 FROM revoked_tokens WHERE jti = $1)")
                .bind(jti)
                .fetch_one(self.pool)
                .await?;

        Ok(revoked)
    }
}
