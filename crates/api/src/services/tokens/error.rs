//! Token error types.

use thiserror::Error;

use super::TokenKind;
use crate::db::RepositoryError;

/// Errors that can occur while issuing, verifying, or revoking tokens.
#[derive(Debug, Error)]
pub enum TokenError {
    /// No bearer token was presented.
    #[error("missing bearer token")]
    Missing,

    /// The token is malformed, has a bad signature, or fails claim validation.
    #[error("invalid token: {0}")]
    Invalid(#[source] jsonwebtoken::errors::Error),

    /// The token's validity window has passed.
    #[error("token has expired")]
    Expired,

    /// An access token was presented where a refresh token is required, or vice versa.
    #[error("expected {expected} token, got {found} token")]
    WrongType {
        expected: TokenKind,
        found: TokenKind,
    },

    /// The token's `jti` is on the revocation list.
    #[error("token has been revoked")]
    Revoked,

    /// Signing failed.
    #[error("failed to encode token: {0}")]
    Encode(#[source] jsonwebtoken::errors::Error),

    /// Revocation list lookup or insert failed.
    #[error("revocation store error: {0}")]
    Repository(#[from] RepositoryError),
}

impl TokenError {
    /// Whether this error means the client must present different credentials.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        !matches!(self, Self::Encode(_) | Self::Repository(_))
    }
}
