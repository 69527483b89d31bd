//! Startup and wiring errors.
//!
//! Raised while validating configuration, loading the signing secret or
//! connecting the account store. Request-level failures use
//! [`handler::Error`](crate::handler::Error) instead.

use std::borrow::Cow;
use std::error::Error as StdError;

use gobank_postgres::PgError;
use strum::{Display, IntoStaticStr};

/// Boxed error that can cross thread boundaries.
pub type BoxedError = Box<dyn StdError + Send + Sync>;

/// Result type alias for startup operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// What failed while the service was being assembled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    /// A configuration value is missing or out of range.
    Config,
    /// The signing secret file could not be read.
    SecretFile,
    /// The Postgres pool could not be built or migrated.
    Database,
}

/// Startup error with a kind, a message and an optional source.
#[derive(Debug, thiserror::Error)]
#[error("{kind} error: {message}")]
pub struct Error {
    kind: ErrorKind,
    message: Cow<'static, str>,
    #[source]
    source: Option<BoxedError>,
}

impl Error {
    #[inline]
    fn new(kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Attaches a source error.
    #[inline]
    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Returns the error kind.
    #[must_use]
    #[inline]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the error message.
    #[must_use]
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Creates a configuration error.
    #[inline]
    pub fn config(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Config, message)
    }

    /// Creates a signing secret file error.
    #[inline]
    pub fn secret_file(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::SecretFile, message)
    }
}

impl From<PgError> for Error {
    fn from(err: PgError) -> Self {
        let kind = match err {
            PgError::Config(_) => ErrorKind::Config,
            _ => ErrorKind::Database,
        };
        Self::new(kind, err.to_string()).with_source(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::{ServiceConfig, SessionKeysConfig, StoreBackend};

    #[test]
    fn missing_signing_secret_is_a_config_error() {
        let error = ServiceConfig::default().validate().unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Config);
        assert!(error.to_string().starts_with("config error: "));
    }

    #[tokio::test]
    async fn unreadable_secret_file_keeps_io_source() {
        let config = ServiceConfig {
            account_store: StoreBackend::Memory,
            session_keys: SessionKeysConfig {
                jwt_secret_file: Some("/nonexistent/gobank/secret".into()),
                ..SessionKeysConfig::default()
            },
            ..ServiceConfig::default()
        };

        let error = config.load_session_keys().await.unwrap_err();
        assert_eq!(error.kind(), ErrorKind::SecretFile);
        assert!(error.message().contains("/nonexistent/gobank/secret"));
        assert!(StdError::source(&error).is_some());
    }

    #[test]
    fn postgres_errors_split_config_from_database() {
        let error = Error::from(PgError::Config("empty url".into()));
        assert_eq!(error.kind(), ErrorKind::Config);

        let error = Error::from(PgError::Unexpected("pool closed".into()));
        assert_eq!(error.kind(), ErrorKind::Database);
        assert_eq!(<&'static str>::from(error.kind()), "database");
    }
}
