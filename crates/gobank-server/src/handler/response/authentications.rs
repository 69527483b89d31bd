use serde::{Deserialize, Serialize};

/// Response returned after a successful login.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// Public number of the authenticated account.
    pub number: i64,
    /// Session token to send back in the `x-jwt-token` header.
    pub token: String,
}
