//! Customer repository.
//!
//! Key columns are cast to `int4` in every projection: the stock dvdrental
//! schema declares several of them `smallint`.

use chrono::NaiveDate;
use sqlx::PgPool;

use dvdrental_core::{AddressId, CustomerId, StoreId};

use super::RepositoryError;
use crate::models::{Customer, CustomerUpdate};

#[derive(Debug, sqlx::FromRow)]
struct CustomerRow {
    customer_id: i32,
    store_id: i32,
    first_name: String,
    last_name: String,
    email: Option<String>,
    address_id: i32,
    activebool: bool,
    create_date: NaiveDate,
    active: Option<i32>,
}

impl From<CustomerRow> for Customer {
    fn from(row: CustomerRow) -> Self {
        Self {
            customer_id: CustomerId::new(row.customer_id),
            store_id: StoreId::new(row.store_id),
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            address_id: AddressId::new(row.address_id),
            activebool: row.activebool,
            create_date: row.create_date,
            active: row.active,
        }
    }
}

/// Optional narrowing of the joined customer read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerFilter {
    /// Only customers registered at this store.
    pub store_id: Option<StoreId>,
    /// Only customers whose address resolves to this country name (exact match).
    pub country: Option<String>,
}

/// Repository for customer database operations.
pub struct CustomerRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CustomerRepository<'a> {
    /// Create a new customer repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List customers whose address resolves through city to country.
    ///
    /// Customers with a dangling address, city, or country reference are
    /// excluded by the inner joins. Each customer appears once.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_with_location(
        &self,
        filter: &CustomerFilter,
    ) -> Result<Vec<Customer>, RepositoryError> {
        let rows = sqlx::query_as::<_, CustomerRow>(
            r"
            SELECT c.customer_id::int4 AS customer_id,
                   c.store_id::int4    AS store_id,
                   c.first_name,
                   c.last_name,
                   c.email,
                   c.address_id::int4  AS address_id,
                   c.activebool,
                   c.create_date::date AS create_date,
                   c.active::int4      AS active
            FROM customer c
            JOIN address a  ON a.address_id = c.address_id
            JOIN city ci    ON ci.city_id = a.city_id
            JOIN country co ON co.country_id = ci.country_id
            WHERE ($1::int4 IS NULL OR c.store_id = $1)
              AND ($2::text IS NULL OR co.country = $2)
            ORDER BY c.customer_id
            ",
        )
        .bind(filter.store_id)
        .bind(filter.country.as_deref())
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Customer::from).collect())
    }

    /// Update name, email, and creation date of an existing customer.
    ///
    /// A single statement: an unknown id matches no row and nothing is written.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no customer has this id.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(&self, update: &CustomerUpdate) -> Result<Customer, RepositoryError> {
        let row = sqlx::query_as::<_, CustomerRow>(
            r"
            UPDATE customer
            SET first_name = $2,
                last_name = $3,
                email = $4,
                create_date = $5
            WHERE customer_id = $1
            RETURNING customer_id::int4 AS customer_id,
                      store_id::int4    AS store_id,
                      first_name,
                      last_name,
                      email,
                      address_id::int4  AS address_id,
                      activebool,
                      create_date::date AS create_date,
                      active::int4      AS active
            ",
        )
        .bind(update.customer_id)
        .bind(&update.first_name)
        .bind(&update.last_name)
        .bind(&update.email)
        .bind(update.create_date)
        .fetch_optional(self.pool)
        .await?;

        row.map(Customer::from).ok_or(RepositoryError::NotFound)
    }
}
