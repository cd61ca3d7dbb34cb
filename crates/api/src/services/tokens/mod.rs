//! Token service.
//!
//! Issues HS256-signed JWTs bound to a username and verifies them on the way
//! back in. Each token carries a unique `jti` used as its revocation key.
//!
//! # Lifecycle
//!
//! ```text
//! issued ──revoke(jti)──▶ revoked   (terminal, stored in `revoked_tokens`)
//!    │
//!    └──── exp passes ──▶ expired   (terminal, checked lazily on decode)
//! ```
//!
//! Refreshing issues a new access token and leaves the refresh token valid.

mod error;

pub use error::TokenError;

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, errors::ErrorKind};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use dvdrental_core::{Role, Username};

use crate::config::JwtConfig;
use crate::db::RevokedTokenRepository;

/// Value of the `iss` claim on every token this service issues.
pub const ISSUER: &str = "dvdrental-api";

/// Clock skew tolerated when checking `exp` and `nbf`.
const LEEWAY_SECS: u64 = 30;

/// Which credential a token represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    /// Short-lived; authorizes ordinary API calls.
    Access,
    /// Long-lived; only exchanges for new access tokens.
    Refresh,
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Access => f.write_str("access"),
            Self::Refresh => f.write_str("refresh"),
        }
    }
}

/// Claims embedded in every token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub iss: String,
    /// Identity the token is bound to.
    pub sub: Username,
    pub role: Role,
    /// Unique token identifier; the revocation key.
    pub jti: String,
    #[serde(rename = "type")]
    pub kind: TokenKind,
    pub iat: i64,
    pub nbf: i64,
    pub exp: i64,
}

/// An access token and a refresh token issued together.
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Signing material and lifetimes. Built once at startup and shared.
#[derive(Clone)]
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    access_ttl_secs: i64,
    refresh_ttl_secs: i64,
}

impl std::fmt::Debug for TokenKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenKeys")
            .field("keys", &"[REDACTED]")
            .field("access_ttl_secs", &self.access_ttl_secs)
            .field("refresh_ttl_secs", &self.refresh_ttl_secs)
            .finish_non_exhaustive()
    }
}

impl TokenKeys {
    /// Derive signing and verification keys from configuration.
    #[must_use]
    pub fn new(config: &JwtConfig) -> Self {
        let secret = config.secret.expose_secret().as_bytes();

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = LEEWAY_SECS;
        validation.validate_exp = true;
        validation.validate_nbf = true;
        validation.set_issuer(&[ISSUER]);
        validation.set_required_spec_claims(&["exp", "nbf", "sub", "iss"]);

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            access_ttl_secs: ttl_secs(config.access_token_ttl),
            refresh_ttl_secs: ttl_secs(config.refresh_token_ttl),
        }
    }

    /// Build claims for a fresh token of the given kind.
    #[must_use]
    pub fn claims_for(&self, identity: &Username, role: Role, kind: TokenKind) -> Claims {
        let now = Utc::now().timestamp();
        let ttl = match kind {
            TokenKind::Access => self.access_ttl_secs,
            TokenKind::Refresh => self.refresh_ttl_secs,
        };

        Claims {
            iss: ISSUER.to_owned(),
            sub: identity.clone(),
            role,
            jti: Uuid::new_v4().to_string(),
            kind,
            iat: now,
            nbf: now,
            exp: now.saturating_add(ttl),
        }
    }

    /// Sign a new token of the given kind.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Encode` if signing fails.
    pub fn issue(
        &self,
        identity: &Username,
        role: Role,
        kind: TokenKind,
    ) -> Result<String, TokenError> {
        self.encode(&self.claims_for(identity, role, kind))
    }

    fn encode(&self, claims: &Claims) -> Result<String, TokenError> {
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), claims, &self.encoding)
            .map_err(TokenError::Encode)
    }

    /// Verify signature, issuer, validity window, and kind.
    ///
    /// Does not consult the revocation list; see [`TokenService::authenticate`].
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Expired` past `exp`, `TokenError::WrongType` if the
    /// kind differs from `expected`, and `TokenError::Invalid` otherwise.
    pub fn decode(&self, token: &str, expected: TokenKind) -> Result<Claims, TokenError> {
        let claims = jsonwebtoken::decode::<Claims>(token.trim(), &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid(e),
            })?;

        if claims.kind != expected {
            return Err(TokenError::WrongType {
                expected,
                found: claims.kind,
            });
        }

        Ok(claims)
    }
}

fn ttl_secs(ttl: std::time::Duration) -> i64 {
    i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX)
}

/// Token operations that need the revocation list.
pub struct TokenService<'a> {
    keys: &'a TokenKeys,
    revoked: RevokedTokenRepository<'a>,
}

impl<'a> TokenService<'a> {
    /// Create a new token service.
    #[must_use]
    pub const fn new(keys: &'a TokenKeys, pool: &'a PgPool) -> Self {
        Self {
            keys,
            revoked: RevokedTokenRepository::new(pool),
        }
    }

    /// Issue a short-lived access token.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Encode` if signing fails.
    pub fn issue_access_token(&self, identity: &Username, role: Role) -> Result<String, TokenError> {
        self.keys.issue(identity, role, TokenKind::Access)
    }

    /// Issue a long-lived refresh token.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Encode` if signing fails.
    pub fn issue_refresh_token(
        &self,
        identity: &Username,
        role: Role,
    ) -> Result<String, TokenError> {
        self.keys.issue(identity, role, TokenKind::Refresh)
    }

    /// Issue an access token and a refresh token for the same identity.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Encode` if signing fails.
    pub fn issue_pair(&self, identity: &Username, role: Role) -> Result<TokenPair, TokenError> {
        Ok(TokenPair {
            access_token: self.issue_access_token(identity, role)?,
            refresh_token: self.issue_refresh_token(identity, role)?,
        })
    }

    /// Verify a presented token and reject it if revoked.
    ///
    /// # Errors
    ///
    /// Returns the decode errors of [`TokenKeys::decode`], `TokenError::Revoked`
    /// for a revoked `jti`, and `TokenError::Repository` if the lookup fails.
    pub async fn authenticate(&self, token: &str, expected: TokenKind) -> Result<Claims, TokenError> {
        let claims = self.keys.decode(token, expected)?;

        if self.is_revoked(&claims.jti).await? {
            return Err(TokenError::Revoked);
        }

        Ok(claims)
    }

    /// Add a token identifier to the revocation list.
    ///
    /// Revoking an already-revoked identifier succeeds without adding state.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Repository` if the insert fails; the token stays
    /// usable in that case and the caller must report the failure.
    pub async fn revoke(&self, jti: &str) -> Result<(), TokenError> {
        let inserted = self.revoked.add(jti).await?;
        if !inserted {
            tracing::debug!(jti, "token was already revoked");
        }
        Ok(())
    }

    /// Check the revocation list.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Repository` if the lookup fails.
    pub async fn is_revoked(&self, jti: &str) -> Result<bool, TokenError> {
        Ok(self.revoked.contains(jti).await?)
    }

    /// Exchange verified refresh-token claims for a new access token.
    ///
    /// The refresh token itself is neither rotated nor revoked.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::WrongType` if `claims` came from an access token.
    pub fn refresh(&self, claims: &Claims) -> Result<String, TokenError> {
        if claims.kind != TokenKind::Refresh {
            return Err(TokenError::WrongType {
                expected: TokenKind::Refresh,
                found: claims.kind,
            });
        }
        self.issue_access_token(&claims.sub, claims.role)
    }
}
