//! Database models for all tables.

mod account;

pub use account::{Account, NewAccount};
