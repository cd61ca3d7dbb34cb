//! Domain models for the API.
//!
//! These are validated domain objects, separate from the internal row types
//! in [`crate::db`].

pub mod customer;
pub mod location;
pub mod user;

pub use customer::{Customer, CustomerUpdate};
pub use location::{AddressSummary, CitySummary, CountrySummary};
pub use user::{NewUser, User};
