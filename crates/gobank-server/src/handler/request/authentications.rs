use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request payload for login.
#[must_use]
#[derive(Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Public account number.
    pub number: i64,
    /// Plaintext password.
    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("number", &self.number)
            .finish_non_exhaustive()
    }
}
