//! Business logic services.
//!
//! # Services
//!
//! - `auth` - Credential model: password hashing, registration, login
//! - `tokens` - Token service: JWT issuance, verification, revocation

pub mod auth;
pub mod tokens;
