//! Service configuration: account store backend, database and session keys.

#[cfg(feature = "config")]
use clap::{Args, ValueEnum};
use gobank_postgres::{PgClient, PgClientExt, PgConfig};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::service::security::{SessionKeys, SessionKeysConfig};
use crate::service::store::{MemoryAccountStore, PgAccountStore, SharedAccountStore};
use crate::utility::tracing_targets::TRACING_TARGET_ACCOUNT_STORE;
use crate::Result;

/// Backend holding the accounts.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "config", derive(ValueEnum))]
pub enum StoreBackend {
    /// PostgreSQL through the pooled diesel client; migrations run at startup.
    #[default]
    Postgres,
    /// Process memory; contents are lost on restart.
    Memory,
}

/// App [`state`] configuration.
///
/// [`state`]: crate::service::ServiceState
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
#[must_use = "config does nothing unless you use it"]
pub struct ServiceConfig {
    /// Account store backend.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "ACCOUNT_STORE", value_enum, default_value_t = StoreBackend::Postgres)
    )]
    #[serde(default)]
    pub account_store: StoreBackend,

    /// Postgres connection and pool settings.
    #[cfg_attr(feature = "config", command(flatten))]
    #[serde(default)]
    pub postgres: PgConfig,

    /// Session token signing settings.
    #[cfg_attr(feature = "config", command(flatten))]
    #[serde(default)]
    pub session_keys: SessionKeysConfig,
}

impl ServiceConfig {
    /// Validates all configuration values without connecting to anything.
    ///
    /// # Errors
    ///
    /// Returns a configuration error describing the first invalid value.
    pub fn validate(&self) -> Result<()> {
        if self.account_store == StoreBackend::Postgres {
            self.postgres.validate()?;
        }

        self.session_keys.validate()
    }

    /// Builds the configured account store.
    ///
    /// For the Postgres backend this creates the pool and applies pending migrations.
    pub async fn connect_account_store(&self) -> Result<SharedAccountStore> {
        tracing::info!(
            target: TRACING_TARGET_ACCOUNT_STORE,
            backend = %self.account_store,
            "initializing account store"
        );

        match self.account_store {
            StoreBackend::Postgres => {
                let pg_client = PgClient::new(self.postgres.clone())?;
                pg_client.run_pending_migrations().await?;
                Ok(std::sync::Arc::new(PgAccountStore::new(pg_client)))
            }
            StoreBackend::Memory => {
                tracing::warn!(
                    target: TRACING_TARGET_ACCOUNT_STORE,
                    "using the in-memory account store; data is lost on restart"
                );
                Ok(std::sync::Arc::new(MemoryAccountStore::new()))
            }
        }
    }

    /// Loads the session signing keys.
    pub async fn load_session_keys(&self) -> Result<SessionKeys> {
        SessionKeys::from_config(&self.session_keys).await
    }
}

impl From<SessionKeysConfig> for ServiceConfig {
    fn from(session_keys: SessionKeysConfig) -> Self {
        Self {
            session_keys,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_config() -> ServiceConfig {
        ServiceConfig {
            account_store: StoreBackend::Memory,
            ..ServiceConfig::from(SessionKeysConfig::with_secret(
                "service-config-test-secret-0123456789",
            ))
        }
    }

    #[test]
    fn validate_requires_session_secret() {
        assert!(ServiceConfig::default().validate().is_err());
        assert!(memory_config().validate().is_ok());
    }

    #[test]
    fn memory_backend_skips_postgres_validation() {
        let config = ServiceConfig {
            postgres: PgConfig::new(""),
            ..memory_config()
        };
        assert!(config.validate().is_ok());

        let config = ServiceConfig {
            account_store: StoreBackend::Postgres,
            ..config
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn store_backend_names() {
        assert_eq!(StoreBackend::Memory.to_string(), "memory");
        assert_eq!("postgres".parse::<StoreBackend>().ok(), Some(StoreBackend::Postgres));
    }

    #[tokio::test]
    async fn memory_backend_connects_without_database() -> anyhow::Result<()> {
        let store = memory_config().connect_account_store().await?;
        assert!(store.list_accounts(Default::default()).await?.is_empty());
        Ok(())
    }
}
