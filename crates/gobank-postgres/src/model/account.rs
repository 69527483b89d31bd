//! Account model for PostgreSQL database operations.

use diesel::prelude::*;
use jiff_diesel::Timestamp;

use crate::schema::accounts;

/// A bank account row.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = accounts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Account {
    /// Store-assigned identifier.
    pub id: i32,
    /// Public account number, unique and never reassigned.
    pub number: i64,
    /// Account holder's first name (1-50 characters).
    pub first_name: String,
    /// Account holder's last name (1-50 characters).
    pub last_name: String,
    /// Current balance in minor units.
    pub balance: i64,
    /// Argon2id PHC string, set once at creation.
    pub password_hash: String,
    /// Timestamp when the account was created.
    pub created_at: Timestamp,
}

/// Data for creating a new account.
#[derive(Debug, Clone, PartialEq, Eq, Insertable)]
#[diesel(table_name = accounts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewAccount {
    /// Public account number.
    pub number: i64,
    /// Account holder's first name.
    pub first_name: String,
    /// Account holder's last name.
    pub last_name: String,
    /// Opening balance in minor units.
    pub balance: i64,
    /// Argon2id PHC string.
    pub password_hash: String,
}
