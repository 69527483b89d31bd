//! In-memory [`AccountStore`] for tests and local runs.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;
use tokio::sync::RwLock;

use super::{Account, AccountStore, NewAccount, Pagination, StoreError, StoreResult};
use crate::utility::tracing_targets::TRACING_TARGET_ACCOUNT_STORE;

#[derive(Debug)]
struct Accounts {
    next_id: i32,
    by_id: BTreeMap<i32, Account>,
}

/// Account store kept in process memory.
///
/// Ids are assigned sequentially starting at 1 and never reused.
/// Clones share the same underlying data.
#[derive(Debug, Clone)]
pub struct MemoryAccountStore {
    inner: Arc<RwLock<Accounts>>,
}

impl MemoryAccountStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Accounts {
                next_id: 1,
                by_id: BTreeMap::new(),
            })),
        }
    }

    /// Returns the number of stored accounts.
    pub async fn len(&self) -> usize {
        self.inner.read().await.by_id.len()
    }

    /// Returns `true` if no accounts are stored.
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.by_id.is_empty()
    }
}

impl Default for MemoryAccountStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    async fn create_account(&self, new_account: NewAccount) -> StoreResult<Account> {
        let mut accounts = self.inner.write().await;

        if accounts
            .by_id
            .values()
            .any(|account| account.number == new_account.number)
        {
            return Err(StoreError::DuplicateNumber(new_account.number));
        }

        let id = accounts.next_id;
        accounts.next_id = id
            .checked_add(1)
            .ok_or_else(|| StoreError::infrastructure("account id space exhausted"))?;

        let account = Account {
            id,
            number: new_account.number,
            first_name: new_account.first_name.trim().to_owned(),
            last_name: new_account.last_name.trim().to_owned(),
            balance: new_account.balance,
            password_hash: new_account.password_hash,
            created_at: Timestamp::now().into(),
        };

        accounts.by_id.insert(id, account.clone());
        tracing::debug!(
            target: TRACING_TARGET_ACCOUNT_STORE,
            account_id = id,
            "account created in memory"
        );

        Ok(account)
    }

    async fn get_account_by_id(&self, account_id: i32) -> StoreResult<Account> {
        let accounts = self.inner.read().await;
        accounts
            .by_id
            .get(&account_id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn get_account_by_number(&self, number: i64) -> StoreResult<Account> {
        let accounts = self.inner.read().await;
        accounts
            .by_id
            .values()
            .find(|account| account.number == number)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn list_accounts(&self, pagination: Pagination) -> StoreResult<Vec<Account>> {
        let accounts = self.inner.read().await;
        let offset = usize::try_from(pagination.offset).unwrap_or(usize::MAX);
        let limit = usize::try_from(pagination.limit).unwrap_or(0);

        Ok(accounts
            .by_id
            .values()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn delete_account(&self, account_id: i32) -> StoreResult<()> {
        let mut accounts = self.inner.write().await;
        accounts.by_id.remove(&account_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_account(number: i64) -> NewAccount {
        NewAccount {
            number,
            first_name: "Ada".to_owned(),
            last_name: "Lovelace".to_owned(),
            balance: 0,
            password_hash: "$argon2id$placeholder".to_owned(),
        }
    }

    #[tokio::test]
    async fn create_assigns_sequential_ids() -> anyhow::Result<()> {
        let store = MemoryAccountStore::new();

        let first = store.create_account(new_account(11)).await?;
        let second = store.create_account(new_account(22)).await?;

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(store.len().await, 2);
        Ok(())
    }

    #[tokio::test]
    async fn duplicate_number_is_rejected() -> anyhow::Result<()> {
        let store = MemoryAccountStore::new();
        store.create_account(new_account(11)).await?;

        let result = store.create_account(new_account(11)).await;
        assert!(matches!(result, Err(StoreError::DuplicateNumber(11))));
        assert_eq!(store.len().await, 1);
        Ok(())
    }

    #[tokio::test]
    async fn lookups_distinguish_not_found() -> anyhow::Result<()> {
        let store = MemoryAccountStore::new();
        let created = store.create_account(new_account(48213)).await?;

        assert_eq!(store.get_account_by_id(created.id).await?, created);
        assert_eq!(store.get_account_by_number(48213).await?, created);
        assert!(matches!(
            store.get_account_by_id(99).await,
            Err(StoreError::NotFound)
        ));
        assert!(matches!(
            store.get_account_by_number(1).await,
            Err(StoreError::NotFound)
        ));
        Ok(())
    }

    #[tokio::test]
    async fn delete_is_idempotent() -> anyhow::Result<()> {
        let store = MemoryAccountStore::new();
        let created = store.create_account(new_account(5)).await?;

        store.delete_account(created.id).await?;
        store.delete_account(created.id).await?;
        store.delete_account(12345).await?;

        assert!(store.is_empty().await);
        assert!(matches!(
            store.get_account_by_id(created.id).await,
            Err(StoreError::NotFound)
        ));
        Ok(())
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() -> anyhow::Result<()> {
        let store = MemoryAccountStore::new();
        let first = store.create_account(new_account(1)).await?;
        store.delete_account(first.id).await?;

        let second = store.create_account(new_account(2)).await?;
        assert_eq!(second.id, 2);
        Ok(())
    }

    #[tokio::test]
    async fn list_respects_pagination() -> anyhow::Result<()> {
        let store = MemoryAccountStore::new();
        for number in 1..=5 {
            store.create_account(new_account(number)).await?;
        }

        let page = store.list_accounts(Pagination::new(2, 1)).await?;
        let ids: Vec<i32> = page.iter().map(|account| account.id).collect();
        assert_eq!(ids, vec![2, 3]);
        Ok(())
    }
}
