//! Authentication error types.

use thiserror::Error;

use crate::db::RepositoryError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Wrong password or unknown username. Deliberately indistinguishable.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Username already registered.
    #[error("user {0} already exists")]
    UserAlreadyExists(String),

    /// Self-registration asked for a privileged role.
    #[error("role {0} cannot be self-registered")]
    RoleNotAllowed(dvdrental_core::Role),

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,
}
