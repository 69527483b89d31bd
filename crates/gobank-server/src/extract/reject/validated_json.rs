//! Validated JSON extractor.
//!
//! [`ValidateJson`] combines deserialization with validation through the
//! `validator` crate.

use std::borrow::Cow;
use std::collections::HashMap;

use axum::extract::{FromRequest, Request};
use derive_more::{Deref, DerefMut, From};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationError, ValidationErrors};

use super::Json;
use crate::handler::{Error, ErrorKind};

/// JSON extractor that runs [`Validate::validate`] on the decoded value.
///
/// Also see [`Json`].
#[must_use]
#[derive(Debug, Clone, Copy, Default, Deref, DerefMut, From)]
pub struct ValidateJson<T>(pub T);

impl<T> ValidateJson<T> {
    /// Creates a new instance of [`ValidateJson`].
    #[inline]
    pub fn new(inner: T) -> Self {
        Self(inner)
    }

    /// Returns the inner validated value.
    #[inline]
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T, S> FromRequest<S> for ValidateJson<T>
where
    T: DeserializeOwned + Validate + 'static,
    S: Send + Sync,
{
    type Rejection = Error<'static>;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = <Json<T> as FromRequest<S>>::from_request(req, state).await?;
        data.validate()?;
        Ok(Self::new(data))
    }
}

fn param_as_u64(params: &HashMap<Cow<'static, str>, serde_json::Value>, key: &str) -> Option<u64> {
    let value = params.get(key)?;
    value.as_u64().or_else(|| value.as_f64().map(|v| v as u64))
}

fn param_as_i64(params: &HashMap<Cow<'static, str>, serde_json::Value>, key: &str) -> Option<i64> {
    let value = params.get(key)?;
    value.as_i64().or_else(|| value.as_f64().map(|v| v as i64))
}

fn format_length_error(field: &str, error: &ValidationError) -> String {
    match (
        param_as_u64(&error.params, "min"),
        param_as_u64(&error.params, "max"),
    ) {
        (Some(min), Some(max)) => {
            format!("Field '{field}' must be between {min} and {max} characters long")
        }
        (Some(min), None) => format!("Field '{field}' must be at least {min} characters long"),
        (None, Some(max)) => format!("Field '{field}' must be at most {max} characters long"),
        (None, None) => format!("Field '{field}' has invalid length"),
    }
}

fn format_range_error(field: &str, error: &ValidationError) -> String {
    match (
        param_as_i64(&error.params, "min"),
        param_as_i64(&error.params, "max"),
    ) {
        (Some(min), Some(max)) => format!("Field '{field}' must be between {min} and {max}"),
        (Some(min), None) => format!("Field '{field}' must be at least {min}"),
        (None, Some(max)) => format!("Field '{field}' must be at most {max}"),
        (None, None) => format!("Field '{field}' is out of valid range"),
    }
}

fn format_validation_error(field: &str, error: &ValidationError) -> String {
    if let Some(custom_message) = &error.message {
        return format!("Field '{field}': {custom_message}");
    }

    match error.code.as_ref() {
        "length" => format_length_error(field, error),
        "range" => format_range_error(field, error),
        "required" => format!("Field '{field}' is required"),
        code => format!("Field '{field}' failed validation: {code}"),
    }
}

impl From<ValidationErrors> for Error<'static> {
    fn from(errors: ValidationErrors) -> Self {
        let mut error_messages: Vec<String> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, field_errors)| {
                field_errors
                    .iter()
                    .map(move |error| format_validation_error(field, error))
            })
            .collect();
        error_messages.sort();

        let user_message = match error_messages.as_slice() {
            [] => "Validation failed".to_owned(),
            errors => errors.join(". "),
        };

        tracing::debug!(errors = ?errors.field_errors(), "request validation failed");

        ErrorKind::BadRequest
            .with_message(user_message)
            .with_resource("request")
    }
}
