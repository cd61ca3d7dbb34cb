//! Two-field projections of the location tables.

use serde::Serialize;

use dvdrental_core::{AddressId, CityId, CountryId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct AddressSummary {
    pub address_id: AddressId,
    pub district: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct CitySummary {
    pub city_id: CityId,
    pub city: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct CountrySummary {
    pub country_id: CountryId,
    pub country: String,
}
