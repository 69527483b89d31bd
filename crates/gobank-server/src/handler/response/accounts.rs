//! Account response types.

use gobank_postgres::model;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Represents an account. The password hash is never part of it.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Store-assigned identifier of the account.
    pub id: i32,
    /// Account holder's first name.
    pub first_name: String,
    /// Account holder's last name.
    pub last_name: String,
    /// Public account number.
    pub number: i64,
    /// Current balance in minor units.
    pub balance: i64,

    /// Timestamp when the account was created.
    pub created_at: Timestamp,
}

impl Account {
    pub fn from_model(account: model::Account) -> Self {
        Self {
            id: account.id,
            first_name: account.first_name,
            last_name: account.last_name,
            number: account.number,
            balance: account.balance,

            created_at: account.created_at.into(),
        }
    }
}

/// A page of accounts.
pub type Accounts = Vec<Account>;

/// Acknowledges the deletion of an account.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedAccount {
    /// Identifier that was deleted.
    pub deleted: i32,
}
