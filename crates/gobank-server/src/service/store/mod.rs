//! Account persistence behind an object-safe trait.
//!
//! Handlers and the access control layer only see [`SharedAccountStore`]; the
//! concrete backend is chosen at startup from [`StoreBackend`].
//!
//! [`StoreBackend`]: crate::service::StoreBackend

mod memory;
mod postgres;

use std::sync::Arc;

use async_trait::async_trait;
pub use gobank_postgres::model::{Account, NewAccount};
pub use gobank_postgres::query::Pagination;

pub use self::memory::MemoryAccountStore;
pub use self::postgres::PgAccountStore;
use crate::BoxedError;

/// Errors returned by an [`AccountStore`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No account matches the requested key.
    #[error("account not found")]
    NotFound,
    /// The account number is already taken by another account.
    #[error("account number {0} is already taken")]
    DuplicateNumber(i64),
    /// The backend itself failed (pool exhaustion, connection loss, query fault).
    #[error("account store failure: {0}")]
    Infrastructure(#[source] BoxedError),
}

impl StoreError {
    /// Wraps a backend failure.
    #[inline]
    pub fn infrastructure(error: impl Into<BoxedError>) -> Self {
        Self::Infrastructure(error.into())
    }
}

/// Result type alias for account store operations.
pub type StoreResult<T, E = StoreError> = std::result::Result<T, E>;

/// Persistent collection of accounts.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Persists a new account and returns it with its assigned id and creation time.
    async fn create_account(&self, new_account: NewAccount) -> StoreResult<Account>;

    /// Loads an account by its store-assigned id.
    async fn get_account_by_id(&self, account_id: i32) -> StoreResult<Account>;

    /// Loads an account by its public account number.
    async fn get_account_by_number(&self, number: i64) -> StoreResult<Account>;

    /// Lists accounts ordered by id.
    async fn list_accounts(&self, pagination: Pagination) -> StoreResult<Vec<Account>>;

    /// Removes an account. Deleting a missing id is not an error.
    async fn delete_account(&self, account_id: i32) -> StoreResult<()>;
}

/// Account store shared between handlers.
pub type SharedAccountStore = Arc<dyn AccountStore>;

/// Store whose every operation fails as if the database were unreachable.
#[cfg(test)]
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct UnavailableAccountStore;

#[cfg(test)]
impl UnavailableAccountStore {
    /// Text of the infrastructure error; must never reach a response body.
    pub(crate) const ERROR: &'static str = "connection refused by 10.0.0.3:5432";

    fn fail<T>() -> StoreResult<T> {
        Err(StoreError::infrastructure(Self::ERROR))
    }
}

#[cfg(test)]
#[async_trait]
impl AccountStore for UnavailableAccountStore {
    async fn create_account(&self, _new_account: NewAccount) -> StoreResult<Account> {
        Self::fail()
    }

    async fn get_account_by_id(&self, _account_id: i32) -> StoreResult<Account> {
        Self::fail()
    }

    async fn get_account_by_number(&self, _number: i64) -> StoreResult<Account> {
        Self::fail()
    }

    async fn list_accounts(&self, _pagination: Pagination) -> StoreResult<Vec<Account>> {
        Self::fail()
    }

    async fn delete_account(&self, _account_id: i32) -> StoreResult<()> {
        Self::fail()
    }
}
