//! Enhanced path parameter extractor.

use axum::extract::rejection::PathRejection;
use axum::extract::{FromRequestParts, Path as AxumPath};
use axum::http::request::Parts;
use derive_more::{Deref, DerefMut, From};
use serde::de::DeserializeOwned;

use super::sanitize_error_message;
use crate::handler::{Error, ErrorKind};

/// Enhanced path parameter extractor with improved error handling.
///
/// A parameter that fails to deserialize (e.g. a non-numeric account id)
/// rejects with `400 Bad Request`.
#[must_use]
#[derive(Debug, Clone, Copy, Default, Deref, DerefMut, From)]
pub struct Path<T>(pub T);

impl<T> Path<T> {
    /// Creates a new instance of [`Path`].
    #[inline]
    pub fn new(inner: T) -> Self {
        Self(inner)
    }

    /// Returns the inner path parameters.
    #[inline]
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T, S> FromRequestParts<S> for Path<T>
where
    T: DeserializeOwned + Send + 'static,
    S: Send + Sync,
{
    type Rejection = Error<'static>;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let extractor =
            <AxumPath<T> as FromRequestParts<S>>::from_request_parts(parts, state).await;
        extractor.map(|x| Self(x.0)).map_err(Into::into)
    }
}

impl From<PathRejection> for Error<'static> {
    fn from(rejection: PathRejection) -> Self {
        match rejection {
            PathRejection::FailedToDeserializePathParams(err) => {
                let error_message = err.body_text();
                ErrorKind::BadRequest
                    .with_message(enhance_deserialization_error(&error_message))
                    .with_resource("path")
                    .with_context(format!(
                        "path parameter deserialization failed: {}",
                        sanitize_error_message(&error_message, 2, 150)
                    ))
            }
            PathRejection::MissingPathParams(err) => ErrorKind::MissingPathParam
                .with_context(format!(
                    "path parameter extraction failed: {}",
                    sanitize_error_message(&err.body_text(), 2, 150)
                )),
            other => ErrorKind::InternalServerError
                .with_message("Path processing failed")
                .with_context(format!("unexpected path rejection: {other:?}")),
        }
    }
}

/// Maps a deserialization failure onto a short, type-specific hint.
fn enhance_deserialization_error(error_message: &str) -> &'static str {
    let error_lower = error_message.to_lowercase();

    if error_lower.contains("invalid digit") || error_lower.contains("cannot parse") {
        "Numeric path parameters must contain only digits"
    } else if error_lower.contains("too large") || error_lower.contains("too small") {
        "Numeric path parameter is out of range"
    } else {
        "Invalid path parameter format"
    }
}
