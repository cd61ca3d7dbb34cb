//! Account and token route handlers.
//!
//! Registration and login hand out an access/refresh token pair. Logout
//! revokes whichever token was presented. Refresh exchanges a refresh token
//! for a new access token.

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use dvdrental_core::{Role, UserId, Username};

use super::form::{FormRequest, ValidForm, max_len, optional, parse_required, required};
use crate::error::{AppError, Result};
use crate::middleware::{RequireAccess, RequireRefresh};
use crate::services::auth::Registration;
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Width of `users.firstname` and `users.lastname`.
const PROFILE_NAME_MAX: usize = 120;

/// Registration form data.
#[derive(Debug, Default, Deserialize)]
pub struct RegisterForm {
    pub username: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl FormRequest for Registration {
    type Raw = RegisterForm;
}

impl TryFrom<RegisterForm> for Registration {
    type Error = AppError;

    fn try_from(form: RegisterForm) -> std::result::Result<Self, Self::Error> {
        let username: Username = parse_required(form.username, "username")?;
        let password = required(form.password, "password")?;
        let role = match optional(form.role) {
            Some(role) => role.parse::<Role>().map_err(|e| AppError::InvalidField {
                field: "role",
                reason: e.to_string(),
            })?,
            None => Role::default(),
        };
        let first_name = optional(form.first_name)
            .map(|v| max_len(v, "first_name", PROFILE_NAME_MAX))
            .transpose()?;
        let last_name = optional(form.last_name)
            .map(|v| max_len(v, "last_name", PROFILE_NAME_MAX))
            .transpose()?;

        Ok(Self {
            username,
            password,
            role,
            first_name,
            last_name,
        })
    }
}

/// Login form data.
#[derive(Debug, Default, Deserialize)]
pub struct LoginForm {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Validated login credentials.
#[derive(Debug)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl FormRequest for Credentials {
    type Raw = LoginForm;
}

impl TryFrom<LoginForm> for Credentials {
    type Error = AppError;

    fn try_from(form: LoginForm) -> std::result::Result<Self, Self::Error> {
        Ok(Self {
            username: required(form.username, "username")?.trim().to_owned(),
            password: required(form.password, "password")?,
        })
    }
}

// =============================================================================
// Response Types
// =============================================================================

/// Plain `{"message": ...}` body.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    fn new(message: impl Into<String>) -> Json<Self> {
        Json(Self {
            message: message.into(),
        })
    }
}

/// Successful registration.
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: String,
    pub access_token: String,
    pub refresh_token: String,
}

/// Successful login: the profile plus a fresh token pair.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub id: UserId,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub username: Username,
    pub role: Role,
    pub jwt_token: String,
    pub jwt_refresh_token: String,
}

/// A newly issued access token.
#[derive(Debug, Serialize)]
pub struct AccessTokenResponse {
    pub access_token: String,
}

// =============================================================================
// Handlers
// =============================================================================

/// `POST /registration`
pub async fn register(
    State(state): State<AppState>,
    ValidForm(registration): ValidForm<Registration>,
) -> Result<(StatusCode, Json<RegisterResponse>)> {
    let user = state.auth().register(registration).await?;
    let tokens = state.tokens().issue_pair(&user.username, user.role)?;

    tracing::info!(user_id = %user.id, username = %user.username, "user registered");

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: format!("User {} was created", user.username),
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
        }),
    ))
}

/// `POST /login`
pub async fn login(
    State(state): State<AppState>,
    ValidForm(credentials): ValidForm<Credentials>,
) -> Result<Json<LoginResponse>> {
    let user = state
        .auth()
        .login(&credentials.username, &credentials.password)
        .await
        .inspect_err(|e| tracing::info!(error = %e, "login failed"))?;

    let tokens = state.tokens().issue_pair(&user.username, user.role)?;

    tracing::info!(user_id = %user.id, "user logged in");

    Ok(Json(LoginResponse {
        id: user.id,
        first_name: user.first_name,
        last_name: user.last_name,
        username: user.username,
        role: user.role,
        jwt_token: tokens.access_token,
        jwt_refresh_token: tokens.refresh_token,
    }))
}

/// `POST /logout/access`
pub async fn logout_access(
    State(state): State<AppState>,
    RequireAccess(claims): RequireAccess,
) -> Result<Json<MessageResponse>> {
    state.tokens().revoke(&claims.jti).await?;
    tracing::info!(username = %claims.sub, "access token revoked");
    Ok(MessageResponse::new("Access token has been revoked"))
}

/// `POST /logout/refresh`
pub async fn logout_refresh(
    State(state): State<AppState>,
    RequireRefresh(claims): RequireRefresh,
) -> Result<Json<MessageResponse>> {
    state.tokens().revoke(&claims.jti).await?;
    tracing::info!(username = %claims.sub, "refresh token revoked");
    Ok(MessageResponse::new("Refresh token has been revoked"))
}

/// `POST /token/refresh`
pub async fn refresh(
    State(state): State<AppState>,
    RequireRefresh(claims): RequireRefresh,
) -> Result<Json<AccessTokenResponse>> {
    let access_token = state.tokens().refresh(&claims)?;
    Ok(Json(AccessTokenResponse { access_token }))
}
