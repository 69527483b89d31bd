//! Account request types.

use gobank_postgres::model::NewAccount;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Request payload for opening a new account.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccount {
    /// Account holder's first name.
    #[validate(length(min = 1, max = 50), custom(function = "validate_not_blank"))]
    pub first_name: String,
    /// Account holder's last name.
    #[validate(length(min = 1, max = 50), custom(function = "validate_not_blank"))]
    pub last_name: String,
    /// Plaintext password; only its Argon2id hash is stored.
    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

impl CreateAccount {
    /// Converts the request into a new account row with a zero balance.
    pub fn into_model(self, number: i64, password_hash: String) -> NewAccount {
        NewAccount {
            number,
            first_name: self.first_name.trim().to_owned(),
            last_name: self.last_name.trim().to_owned(),
            balance: 0,
            password_hash,
        }
    }
}

/// Rejects names made only of whitespace; stored names are trimmed.
fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("must not be blank".into()));
    }

    Ok(())
}
