//! The `x-jwt-token` session header.

use std::fmt;

use axum::http::{HeaderName, HeaderValue};
use axum_extra::headers::{self, Header};

/// Name of the request and response header carrying the session token.
pub static SESSION_TOKEN_HEADER: HeaderName = HeaderName::from_static("x-jwt-token");

/// Typed `x-jwt-token` header.
///
/// Read from requests with `HeaderMapExt::typed_get` and written to responses
/// with `TypedHeader`. An empty or non-ASCII value does not decode.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    /// Wraps an encoded session token.
    #[inline]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the encoded token.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Header for SessionToken {
    fn name() -> &'static HeaderName {
        &SESSION_TOKEN_HEADER
    }

    fn decode<'i, I>(values: &mut I) -> Result<Self, headers::Error>
    where
        I: Iterator<Item = &'i HeaderValue>,
    {
        let value = values.next().ok_or_else(headers::Error::invalid)?;
        let token = value.to_str().map_err(|_| headers::Error::invalid())?.trim();

        if token.is_empty() {
            return Err(headers::Error::invalid());
        }

        Ok(Self(token.to_owned()))
    }

    fn encode<E>(&self, values: &mut E)
    where
        E: Extend<HeaderValue>,
    {
        if let Ok(value) = HeaderValue::from_str(&self.0) {
            values.extend(std::iter::once(value));
        }
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SessionToken").field(&"[REDACTED]").finish()
    }
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderMap;
    use axum_extra::headers::HeaderMapExt;

    use super::*;

    #[test]
    fn decodes_trimmed_token() {
        let mut headers = HeaderMap::new();
        headers.insert(
            SESSION_TOKEN_HEADER.clone(),
            HeaderValue::from_static(" abc.def.ghi "),
        );

        let token = headers.typed_get::<SessionToken>().unwrap();
        assert_eq!(token.as_str(), "abc.def.ghi");
    }

    #[test]
    fn missing_or_empty_header_does_not_decode() {
        let mut headers = HeaderMap::new();
        assert!(headers.typed_get::<SessionToken>().is_none());

        headers.insert(SESSION_TOKEN_HEADER.clone(), HeaderValue::from_static(""));
        assert!(headers.typed_get::<SessionToken>().is_none());
    }

    #[test]
    fn encodes_into_header_map() {
        let mut headers = HeaderMap::new();
        headers.typed_insert(SessionToken::new("abc.def.ghi"));

        assert_eq!(
            headers.get("x-jwt-token").and_then(|v| v.to_str().ok()),
            Some("abc.def.ghi")
        );
    }

    #[test]
    fn debug_redacts_token() {
        let debug = format!("{:?}", SessionToken::new("secret.token.value"));
        assert!(!debug.contains("secret"));
    }
}
