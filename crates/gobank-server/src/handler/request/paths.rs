//! Path parameter types for HTTP handlers.

use serde::{Deserialize, Serialize};

/// Path parameters for single-account operations.
#[must_use]
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AccountPathParams {
    /// Store-assigned identifier of the account.
    pub id: i32,
}
