//! Credential verification, session tokens and account ownership checks.

mod access_control;
mod password_hasher;
mod session_keys;

pub use access_control::{AccessControl, AccessDecision};
pub use password_hasher::PasswordHasher;
pub use session_keys::{SessionKeys, SessionKeysConfig, SigningAlgorithm, TokenError};
