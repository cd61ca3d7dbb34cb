//! Customer domain types.

use chrono::NaiveDate;
use serde::Serialize;

use dvdrental_core::{AddressId, CustomerId, StoreId};

/// A rental customer as returned by the customer endpoints.
///
/// `create_date` serializes as an ISO date string (`YYYY-MM-DD`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Customer {
    pub customer_id: CustomerId,
    pub store_id: StoreId,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub address_id: AddressId,
    pub activebool: bool,
    pub create_date: NaiveDate,
    pub active: Option<i32>,
}

/// Fields written by an update-by-id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerUpdate {
    pub customer_id: CustomerId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub create_date: NaiveDate,
}
