//! Tracing target constants for structured logging.
//!
//! Filter with e.g. `RUST_LOG=gobank_server::authorization=debug`.

/// Login, token issuance and token validation.
pub const TRACING_TARGET_AUTHENTICATION: &str = "gobank_server::authentication";

/// Account ownership checks and their denial causes.
pub const TRACING_TARGET_AUTHORIZATION: &str = "gobank_server::authorization";

/// Error recovery including middleware errors and request failures.
pub const TRACING_TARGET_RECOVERY_ERROR: &str = "gobank_server::recovery::error";

/// Panic recovery including handler panics.
pub const TRACING_TARGET_RECOVERY_PANIC: &str = "gobank_server::recovery::panic";

/// Password hashing and verification.
pub const TRACING_TARGET_PASSWORD_HASHER: &str = "gobank_server::password_hasher";

/// Session key loading and token signing.
pub const TRACING_TARGET_SESSION_KEYS: &str = "gobank_server::session_keys";

/// Account store backends.
pub const TRACING_TARGET_ACCOUNT_STORE: &str = "gobank_server::account_store";
