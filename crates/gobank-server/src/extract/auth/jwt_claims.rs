//! Session token claims.

use std::time::Duration;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Claims carried by a session token.
///
/// The wire form is exactly `{"accountNumber": <i64>, "expiresAt": <unix seconds>}`.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AuthClaims {
    /// Public number of the account the token was issued to.
    pub account_number: i64,
    /// Expiry as seconds since the Unix epoch.
    pub expires_at: i64,
}

impl AuthClaims {
    /// Creates claims for `account_number` that expire `lifetime` from now.
    pub fn new(account_number: i64, lifetime: Duration) -> Self {
        let lifetime = i64::try_from(lifetime.as_secs()).unwrap_or(i64::MAX);
        Self {
            account_number,
            expires_at: Timestamp::now().as_second().saturating_add(lifetime),
        }
    }

    /// Returns the expiry as a timestamp, if it is within the representable range.
    #[inline]
    pub fn expires_at(&self) -> Option<Timestamp> {
        Timestamp::from_second(self.expires_at).ok()
    }

    /// Returns `true` once the expiry instant has been reached.
    #[inline]
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Timestamp::now().as_second()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_exactly_two_camel_case_claims() {
        let claims = AuthClaims {
            account_number: 48213,
            expires_at: 1_900_000_000,
        };

        let json = serde_json::to_value(claims).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "accountNumber": 48213, "expiresAt": 1_900_000_000 })
        );
    }

    #[test]
    fn rejects_unknown_claims() {
        let json = r#"{"accountNumber":1,"expiresAt":1900000000,"admin":true}"#;
        assert!(serde_json::from_str::<AuthClaims>(json).is_err());
    }

    #[test]
    fn expiry_follows_lifetime() {
        let fresh = AuthClaims::new(7, Duration::from_secs(60));
        assert!(!fresh.is_expired());
        assert!(fresh.expires_at().is_some());

        let stale = AuthClaims {
            account_number: 7,
            expires_at: 15000,
        };
        assert!(stale.is_expired());
    }
}
