//! Read-only access to the address, city, and country tables.

use sqlx::PgPool;

use super::RepositoryError;
use crate::models::{AddressSummary, CitySummary, CountrySummary};

/// Repository for the location lookup tables.
pub struct LocationRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> LocationRepository<'a> {
    /// Create a new location repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All addresses as `(address_id, district)`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn addresses(&self) -> Result<Vec<AddressSummary>, RepositoryError> {
        let rows = sqlx::query_as::<_, AddressSummary>(
            "SELECT address_id::int4 AS address_id, district FROM address ORDER BY address_id",
        )
        .fetch_all(self.pool)
        .await?;
        Ok(rows)
    }

    /// All cities as `(city_id, city)`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn cities(&self) -> Result<Vec<CitySummary>, RepositoryError> {
        let rows = sqlx::query_as::<_, CitySummary>(
            "SELECT city_id::int4 AS city_id, city FROM city ORDER BY city_id",
        )
        .fetch_all(self.pool)
        .await?;
        Ok(rows)
    }

    /// All countries as `(country_id, country)`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn countries(&self) -> Result<Vec<CountrySummary>, RepositoryError> {
        let rows = sqlx::query_as::<_, CountrySummary>(
            "SELECT country_id::int4 AS country_id, country FROM country ORDER BY country_id",
        )
        .fetch_all(self.pool)
        .await?;
        Ok(rows)
    }
}
