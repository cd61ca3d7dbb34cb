//! Form extraction with field-level validation.
//!
//! Handlers receive `application/x-www-form-urlencoded` bodies. Each endpoint
//! declares a raw form struct of `Option<String>` fields and a validated
//! struct built from it with `TryFrom`. Any failure becomes a 400 with a JSON
//! message naming the offending field, before the handler runs.

use axum::{
    Form,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// A validated request body with a raw, permissive wire form.
pub trait FormRequest: Sized {
    /// Wire representation; every field optional so that absence is reported
    /// by name rather than as a generic deserialization error.
    type Raw: DeserializeOwned + Send;
}

/// Extractor that deserializes `T::Raw` and converts it into `T`.
pub struct ValidForm<T>(pub T);

impl<S, T> FromRequest<S> for ValidForm<T>
where
    S: Send + Sync,
    T: FormRequest + TryFrom<T::Raw, Error = AppError>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Form(raw) = Form::<T::Raw>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

        T::try_from(raw).map(Self)
    }
}

/// A required field: present and not blank. The value is returned untrimmed.
///
/// # Errors
///
/// Returns `AppError::MissingField` naming `field`.
pub fn required(value: Option<String>, field: &'static str) -> Result<String, AppError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or(AppError::MissingField(field))
}

/// An optional free-text field, trimmed; blank counts as absent.
#[must_use]
pub fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

/// Reject `value` if it has more than `max` characters.
///
/// Limits mirror the column widths, so an overlong value is a 400 here
/// rather than a failed write.
///
/// # Errors
///
/// Returns `AppError::InvalidField` naming `field`.
pub fn max_len(value: String, field: &'static str, max: usize) -> Result<String, AppError> {
    if value.chars().count() > max {
        return Err(AppError::InvalidField {
            field,
            reason: format!("must be at most {max} characters"),
        });
    }
    Ok(value)
}

/// Parse a required field with `FromStr`.
///
/// # Errors
///
/// Returns `AppError::MissingField` if absent or blank and
/// `AppError::InvalidField` if it does not parse.
pub fn parse_required<T>(value: Option<String>, field: &'static str) -> Result<T, AppError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let raw = required(value, field)?;
    raw.trim().parse().map_err(|e: T::Err| AppError::InvalidField {
        field,
        reason: e.to_string(),
    })
}
