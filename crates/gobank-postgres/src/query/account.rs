//! Account repository for managing bank accounts.

use std::future::Future;

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use super::Pagination;
use crate::model::{Account, NewAccount};
use crate::{PgConnection, PgError, PgResult, TRACING_TARGET_QUERY, schema};

/// Repository for account database operations.
pub trait AccountRepository {
    /// Inserts a new account and returns the stored row.
    ///
    /// A taken account number fails with a unique violation
    /// (see [`PgError::is_unique_violation`]).
    fn create_account(
        &mut self,
        new_account: NewAccount,
    ) -> impl Future<Output = PgResult<Account>> + Send;

    /// Finds an account by its store-assigned identifier.
    fn find_account_by_id(
        &mut self,
        account_id: i32,
    ) -> impl Future<Output = PgResult<Option<Account>>> + Send;

    /// Finds an account by its public account number.
    fn find_account_by_number(
        &mut self,
        number: i64,
    ) -> impl Future<Output = PgResult<Option<Account>>> + Send;

    /// Lists accounts ordered by identifier.
    fn list_accounts(
        &mut self,
        pagination: Pagination,
    ) -> impl Future<Output = PgResult<Vec<Account>>> + Send;

    /// Permanently deletes an account and returns the number of removed rows.
    ///
    /// Deleting a missing identifier removes nothing and is not an error.
    fn delete_account(&mut self, account_id: i32)
    -> impl Future<Output = PgResult<usize>> + Send;
}

impl AccountRepository for PgConnection {
    async fn create_account(&mut self, mut new_account: NewAccount) -> PgResult<Account> {
        use schema::accounts;

        new_account.first_name = new_account.first_name.trim().to_owned();
        new_account.last_name = new_account.last_name.trim().to_owned();

        diesel::insert_into(accounts::table)
            .values(&new_account)
            .returning(Account::as_returning())
            .get_result(self)
            .await
            .map_err(PgError::from)
    }

    async fn find_account_by_id(&mut self, account_id: i32) -> PgResult<Option<Account>> {
        use schema::accounts::{self, dsl};

        accounts::table
            .filter(dsl::id.eq(account_id))
            .select(Account::as_select())
            .first(self)
            .await
            .optional()
            .map_err(PgError::from)
    }

    async fn find_account_by_number(&mut self, number: i64) -> PgResult<Option<Account>> {
        use schema::accounts::{self, dsl};

        accounts::table
            .filter(dsl::number.eq(number))
            .select(Account::as_select())
            .first(self)
            .await
            .optional()
            .map_err(PgError::from)
    }

    async fn list_accounts(&mut self, pagination: Pagination) -> PgResult<Vec<Account>> {
        use schema::accounts::{self, dsl};

        accounts::table
            .order(dsl::id.asc())
            .limit(pagination.limit)
            .offset(pagination.offset)
            .select(Account::as_select())
            .load(self)
            .await
            .map_err(PgError::from)
    }

    async fn delete_account(&mut self, account_id: i32) -> PgResult<usize> {
        use schema::accounts::{self, dsl};

        let deleted = diesel::delete(accounts::table.filter(dsl::id.eq(account_id)))
            .execute(self)
            .await
            .map_err(PgError::from)?;

        if deleted == 0 {
            tracing::debug!(
                target: TRACING_TARGET_QUERY,
                account_id,
                "Delete matched no account"
            );
        }

        Ok(deleted)
    }
}
