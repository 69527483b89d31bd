//! [`AccountStore`] backed by the pooled PostgreSQL client.

use async_trait::async_trait;
use gobank_postgres::query::AccountRepository;
use gobank_postgres::{PgClient, PgConn, PgError};

use super::{Account, AccountStore, NewAccount, Pagination, StoreError, StoreResult};
use crate::utility::tracing_targets::TRACING_TARGET_ACCOUNT_STORE;

/// Account store over a [`PgClient`] connection pool.
#[derive(Debug, Clone)]
pub struct PgAccountStore {
    client: PgClient,
}

impl PgAccountStore {
    /// Creates a new store over an existing client.
    pub fn new(client: PgClient) -> Self {
        Self { client }
    }

    async fn connection(&self) -> StoreResult<PgConn> {
        self.client.get_connection().await.map_err(infrastructure)
    }
}

fn infrastructure(error: PgError) -> StoreError {
    tracing::error!(
        target: TRACING_TARGET_ACCOUNT_STORE,
        error = %error,
        transient = error.is_transient(),
        "postgres account store failure"
    );
    StoreError::infrastructure(error)
}

#[async_trait]
impl AccountStore for PgAccountStore {
    async fn create_account(&self, new_account: NewAccount) -> StoreResult<Account> {
        let number = new_account.number;
        let mut conn = self.connection().await?;

        conn.create_account(new_account).await.map_err(|error| {
            if error.is_unique_violation() {
                StoreError::DuplicateNumber(number)
            } else {
                infrastructure(error)
            }
        })
    }

    async fn get_account_by_id(&self, account_id: i32) -> StoreResult<Account> {
        let mut conn = self.connection().await?;
        conn.find_account_by_id(account_id)
            .await
            .map_err(infrastructure)?
            .ok_or(StoreError::NotFound)
    }

    async fn get_account_by_number(&self, number: i64) -> StoreResult<Account> {
        let mut conn = self.connection().await?;
        conn.find_account_by_number(number)
            .await
            .map_err(infrastructure)?
            .ok_or(StoreError::NotFound)
    }

    async fn list_accounts(&self, pagination: Pagination) -> StoreResult<Vec<Account>> {
        let mut conn = self.connection().await?;
        conn.list_accounts(pagination).await.map_err(infrastructure)
    }

    async fn delete_account(&self, account_id: i32) -> StoreResult<()> {
        let mut conn = self.connection().await?;
        let removed = conn
            .delete_account(account_id)
            .await
            .map_err(infrastructure)?;

        tracing::debug!(
            target: TRACING_TARGET_ACCOUNT_STORE,
            account_id,
            removed,
            "account delete applied"
        );
        Ok(())
    }
}
