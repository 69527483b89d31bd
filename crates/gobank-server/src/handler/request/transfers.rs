use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request payload for a transfer between accounts.
#[must_use]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    /// Number of the receiving account.
    #[validate(range(min = 1))]
    pub to_account: i64,
    /// Amount in minor units.
    #[validate(range(min = 1))]
    pub amount: i64,
}
