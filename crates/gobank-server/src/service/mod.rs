//! Application state and dependency injection.

mod config;
pub mod security;
pub mod store;

pub use crate::service::config::{ServiceConfig, StoreBackend};
pub use crate::service::security::{
    AccessControl, AccessDecision, PasswordHasher, SessionKeys, SessionKeysConfig,
    SigningAlgorithm, TokenError,
};
pub use crate::service::store::{AccountStore, SharedAccountStore, StoreError};
// Re-export error types from crate root for convenience
pub use crate::{Error, Result};

/// Application state.
///
/// Used for the [`State`] extraction (dependency injection).
///
/// [`State`]: axum::extract::State
#[must_use = "state does nothing unless you use it"]
#[derive(Clone)]
pub struct ServiceState {
    account_store: SharedAccountStore,

    password_hasher: PasswordHasher,
    session_keys: SessionKeys,
    access_control: AccessControl,
}

impl ServiceState {
    /// Initializes application state from configuration.
    ///
    /// Connects the account store and loads the session keys.
    pub async fn from_config(config: &ServiceConfig) -> Result<Self> {
        config.validate()?;

        let account_store = config.connect_account_store().await?;
        let session_keys = config.load_session_keys().await?;

        Ok(Self::new(account_store, session_keys))
    }

    /// Creates application state over an existing store and session keys.
    pub fn new(account_store: SharedAccountStore, session_keys: SessionKeys) -> Self {
        let password_hasher = PasswordHasher::new();
        let access_control = AccessControl::new(
            account_store.clone(),
            password_hasher.clone(),
            session_keys.clone(),
        );

        Self {
            account_store,
            password_hasher,
            session_keys,
            access_control,
        }
    }
}

macro_rules! impl_di {
    ($($f:ident: $t:ty),+) => {$(
        impl axum::extract::FromRef<ServiceState> for $t {
            fn from_ref(state: &ServiceState) -> Self {
                state.$f.clone()
            }
        }
    )+};
}

impl_di!(account_store: SharedAccountStore);

impl_di!(password_hasher: PasswordHasher);
impl_di!(session_keys: SessionKeys);
impl_di!(access_control: AccessControl);
