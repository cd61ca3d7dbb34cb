//! User domain types.

use dvdrental_core::{Role, UserId, Username};

/// An API account (domain type).
///
/// The password hash is deliberately absent; only the credential model
/// reads it, through `UserRepository::get_password_hash`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Login name, unique across all users.
    pub username: Username,
    /// Permission level.
    pub role: Role,
    /// Optional given name.
    pub first_name: Option<String>,
    /// Optional family name.
    pub last_name: Option<String>,
}

/// Data required to insert a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: Username,
    /// Argon2 PHC string, never the plaintext.
    pub password_hash: String,
    pub role: Role,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}
