//! CLI configuration management.
//!
//! ```text
//! Cli
//! ├── server: ServerConfig          # Host, port, shutdown
//! ├── middleware: MiddlewareConfig  # Request timeout
//! └── service: ServiceConfig        # Account store, Postgres, session keys
//! ```
//!
//! All configuration can be provided via CLI arguments or environment variables.
//!
//! ```bash
//! gobank --account-store memory --jwt-secret-file ./secret.txt --port 8080
//!
//! ACCOUNT_STORE=memory JWT_SECRET_FILE=./secret.txt PORT=8080 gobank
//! ```

mod middleware;
mod server;

use std::process;

use anyhow::Context;
use clap::Parser;
use gobank_server::service::{ServiceConfig, StoreBackend};
pub use middleware::MiddlewareConfig;
use serde::{Deserialize, Serialize};
pub use server::ServerConfig;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::{TRACING_TARGET_CONFIG, TRACING_TARGET_SERVER_STARTUP};

/// Complete CLI configuration.
#[derive(Debug, Clone, Parser, Serialize, Deserialize)]
#[command(name = "gobank")]
#[command(about = "gobank account management server")]
#[command(version)]
pub struct Cli {
    /// Server network and lifecycle configuration.
    #[clap(flatten)]
    pub server: ServerConfig,

    /// HTTP middleware configuration (timeouts).
    #[clap(flatten)]
    pub middleware: MiddlewareConfig,

    /// Account store and session key configuration.
    #[clap(flatten)]
    pub service: ServiceConfig,
}

impl Cli {
    /// Loads environment variables from .env file (if enabled) and parses CLI arguments.
    pub fn init() -> Self {
        Self::load_dotenv();
        Self::parse()
    }

    /// Loads environment variables from .env file if the dotenv feature is enabled.
    #[cfg(feature = "dotenv")]
    fn load_dotenv() {
        if let Err(err) = dotenvy::dotenv()
            && !err.not_found()
        {
            eprintln!("Warning: failed to load .env file: {err}");
        }
    }

    /// No-op when dotenv feature is disabled.
    #[cfg(not(feature = "dotenv"))]
    fn load_dotenv() {}

    /// Initializes tracing with environment-based filtering.
    pub fn init_tracing() {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    /// Validates all configuration values.
    pub fn validate(&self) -> anyhow::Result<()> {
        self.server
            .validate()
            .context("invalid server configuration")?;
        self.middleware
            .validate()
            .context("invalid middleware configuration")?;
        self.service
            .validate()
            .context("invalid service configuration")?;
        Ok(())
    }

    /// Logs configuration (no sensitive information).
    pub fn log(&self) {
        tracing::debug!(
            target: TRACING_TARGET_SERVER_STARTUP,
            version = env!("CARGO_PKG_VERSION"),
            pid = process::id(),
            arch = std::env::consts::ARCH,
            os = std::env::consts::OS,
            dotenv = cfg!(feature = "dotenv"),
            "Build information"
        );

        self.server.log();
        self.middleware.log();

        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            account_store = %self.service.account_store,
            jwt_algorithm = %self.service.session_keys.jwt_algorithm,
            jwt_ttl_secs = self.service.session_keys.jwt_ttl_secs,
            jwt_secret_file = ?self.service.session_keys.jwt_secret_file,
            "Service configuration"
        );

        if self.service.account_store == StoreBackend::Postgres {
            tracing::info!(
                target: TRACING_TARGET_CONFIG,
                postgres_url = %self.service.postgres.database_url_masked(),
                postgres_max_connections = self.service.postgres.postgres_max_connections,
                postgres_connection_timeout_secs = ?self.service.postgres.postgres_connection_timeout_secs,
                postgres_idle_timeout_secs = ?self.service.postgres.postgres_idle_timeout_secs,
                "Database configuration"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn command_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_memory_backend_with_inline_secret() {
        let cli = Cli::try_parse_from([
            "gobank",
            "--account-store",
            "memory",
            "--jwt-secret",
            "cli-test-secret-0123456789abcdef0123",
            "--jwt-algorithm",
            "HS512",
            "--port",
            "8080",
        ])
        .unwrap();

        assert_eq!(cli.service.account_store, StoreBackend::Memory);
        assert_eq!(cli.server.port, 8080);
        assert_eq!(cli.service.session_keys.jwt_algorithm.to_string(), "HS512");
        assert!(cli.validate().is_ok());
    }

    #[test]
    fn missing_secret_fails_validation() {
        let cli = Cli::try_parse_from(["gobank", "--account-store", "memory"]).unwrap();
        assert!(cli.validate().is_err());
    }
}
