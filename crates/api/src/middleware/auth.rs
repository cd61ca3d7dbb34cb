//! Authentication extractors.
//!
//! Each extractor reads `Authorization: Bearer <jwt>`, verifies the token, and
//! checks the revocation list before the handler runs. Handlers receive the
//! verified [`Claims`].

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use tracing::Span;

use crate::error::{AppError, set_sentry_user};
use crate::services::tokens::{Claims, TokenError, TokenKind};
use crate::state::AppState;

/// Extractor that requires a valid, unrevoked access token.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(RequireAccess(claims): RequireAccess) -> String {
///     format!("Hello, {}!", claims.sub)
/// }
/// ```
pub struct RequireAccess(pub Claims);

/// Extractor that requires a valid, unrevoked refresh token.
pub struct RequireRefresh(pub Claims);

/// Extractor that requires an access token carrying the `admin` role.
///
/// The token is verified and checked for revocation first, so a revoked or
/// invalid token is a 401 whatever its role. A valid token with any other
/// role is rejected with 403.
pub struct RequireAdmin(pub Claims);

impl FromRequestParts<AppState> for RequireAccess {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let claims = authenticate(parts, state, TokenKind::Access).await?;
        Ok(Self(claims))
    }
}

impl FromRequestParts<AppState> for RequireRefresh {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let claims = authenticate(parts, state, TokenKind::Refresh).await?;
        Ok(Self(claims))
    }
}

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let claims = authenticate(parts, state, TokenKind::Access).await?;

        if !claims.role.is_admin() {
            tracing::warn!(username = %claims.sub, "non-admin token on admin route");
            return Err(AppError::Forbidden("Admin role required".to_string()));
        }

        Ok(Self(claims))
    }
}

async fn authenticate(
    parts: &Parts,
    state: &AppState,
    kind: TokenKind,
) -> Result<Claims, AppError> {
    let token = bearer_token(parts)?;
    let claims = state.tokens().authenticate(token, kind).await?;
    record_identity(&claims);
    Ok(claims)
}

fn record_identity(claims: &Claims) {
    Span::current().record("username", claims.sub.as_str());
    set_sentry_user(claims.sub.as_str());
}

/// Extract the token from an `Authorization: Bearer` header.
///
/// The scheme is matched case-insensitively.
fn bearer_token(parts: &Parts) -> Result<&str, TokenError> {
    let header = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or(TokenError::Missing)?;

    let (scheme, token) = header.trim().split_once(' ').ok_or(TokenError::Missing)?;
    let token = token.trim();

    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return Err(TokenError::Missing);
    }

    Ok(token)
}
