//! Login verification and account ownership decisions.

use std::fmt;

use crate::handler::{ErrorKind, Result};
use crate::service::security::{PasswordHasher, SessionKeys, TokenError};
use crate::service::store::{Account, SharedAccountStore, StoreError};
use crate::utility::tracing_targets::{
    TRACING_TARGET_AUTHENTICATION, TRACING_TARGET_AUTHORIZATION,
};

/// Outcome of an ownership check.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    /// The bearer owns the requested account.
    Allow,
    /// The request must be answered with the uniform denial.
    Deny,
}

impl AccessDecision {
    /// Returns `true` for [`AccessDecision::Allow`].
    #[inline]
    pub fn is_allowed(self) -> bool {
        matches!(self, Self::Allow)
    }
}

/// Why access was denied. Only ever logged.
enum DenyReason {
    MissingToken,
    InvalidToken(TokenError),
    AccountNotFound,
    StoreFailure(StoreError),
    NotOwner { token_number: i64 },
}

impl fmt::Display for DenyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingToken => f.write_str("missing session token"),
            Self::InvalidToken(error) => write!(f, "invalid session token: {error}"),
            Self::AccountNotFound => f.write_str("requested account does not exist"),
            Self::StoreFailure(error) => write!(f, "account lookup failed: {error}"),
            Self::NotOwner { token_number } => {
                write!(f, "token for account number {token_number} does not own the account")
            }
        }
    }
}

/// Composes the account store, password hasher and session keys into the
/// login flow and the per-request ownership gate.
#[derive(Clone)]
pub struct AccessControl {
    account_store: SharedAccountStore,
    password_hasher: PasswordHasher,
    session_keys: SessionKeys,
}

impl AccessControl {
    /// Creates a new access control service.
    pub fn new(
        account_store: SharedAccountStore,
        password_hasher: PasswordHasher,
        session_keys: SessionKeys,
    ) -> Self {
        Self {
            account_store,
            password_hasher,
            session_keys,
        }
    }

    /// Verifies a login and issues a session token for the account.
    ///
    /// An unknown number and a wrong password fail identically with
    /// [`ErrorKind::PermissionDenied`]; the unknown path still pays for a
    /// password verification.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InternalServerError`] if the store, the stored
    /// hash or token signing fails.
    pub async fn verify_login(&self, number: i64, password: &str) -> Result<(Account, String)> {
        let account = match self.account_store.get_account_by_number(number).await {
            Ok(account) => account,
            Err(StoreError::NotFound) => {
                self.password_hasher.verify_dummy(password);
                tracing::debug!(
                    target: TRACING_TARGET_AUTHENTICATION,
                    number,
                    "login rejected: unknown account number"
                );
                return Err(ErrorKind::PermissionDenied.into_error());
            }
            Err(error) => {
                tracing::error!(
                    target: TRACING_TARGET_AUTHENTICATION,
                    error = %error,
                    "login failed: account lookup error"
                );
                return Err(ErrorKind::InternalServerError.with_context("account lookup failed"));
            }
        };

        if !self
            .password_hasher
            .verify_password(password, &account.password_hash)?
        {
            tracing::debug!(
                target: TRACING_TARGET_AUTHENTICATION,
                account_id = account.id,
                "login rejected: wrong password"
            );
            return Err(ErrorKind::PermissionDenied.into_error());
        }

        let token = self.issue_token(&account)?;
        tracing::info!(
            target: TRACING_TARGET_AUTHENTICATION,
            account_id = account.id,
            "login succeeded"
        );

        Ok((account, token))
    }

    /// Issues a session token for an account that was just authenticated or created.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InternalServerError`] if the token cannot be signed.
    pub fn issue_token(&self, account: &Account) -> Result<String> {
        self.session_keys.issue_token(account).map_err(|error| {
            tracing::error!(
                target: TRACING_TARGET_AUTHENTICATION,
                account_id = account.id,
                error = %error,
                "failed to issue session token"
            );
            ErrorKind::InternalServerError.with_context("token issuance failed")
        })
    }

    /// Decides whether the bearer of `credential` may act on `account_id`.
    ///
    /// Allows only when the token validates, the account exists and its number
    /// equals the token's `accountNumber`. The cause of a denial is logged and
    /// not returned.
    pub async fn authorize(&self, credential: Option<&str>, account_id: i32) -> AccessDecision {
        match self.check_owner(credential, account_id).await {
            Ok(()) => AccessDecision::Allow,
            Err(reason) => {
                match &reason {
                    DenyReason::StoreFailure(_) => tracing::error!(
                        target: TRACING_TARGET_AUTHORIZATION,
                        account_id,
                        reason = %reason,
                        "permission denied"
                    ),
                    DenyReason::InvalidToken(TokenError::UnexpectedSigningMethod(_))
                    | DenyReason::InvalidToken(TokenError::InvalidSignature)
                    | DenyReason::NotOwner { .. } => tracing::warn!(
                        target: TRACING_TARGET_AUTHORIZATION,
                        account_id,
                        reason = %reason,
                        "permission denied"
                    ),
                    _ => tracing::debug!(
                        target: TRACING_TARGET_AUTHORIZATION,
                        account_id,
                        reason = %reason,
                        "permission denied"
                    ),
                }
                AccessDecision::Deny
            }
        }
    }

    async fn check_owner(
        &self,
        credential: Option<&str>,
        account_id: i32,
    ) -> std::result::Result<(), DenyReason> {
        let token = credential.ok_or(DenyReason::MissingToken)?;
        let claims = self
            .session_keys
            .validate_token(token)
            .map_err(DenyReason::InvalidToken)?;

        let account = self
            .account_store
            .get_account_by_id(account_id)
            .await
            .map_err(|error| match error {
                StoreError::NotFound => DenyReason::AccountNotFound,
                other => DenyReason::StoreFailure(other),
            })?;

        if account.number != claims.account_number {
            return Err(DenyReason::NotOwner {
                token_number: claims.account_number,
            });
        }

        Ok(())
    }
}

impl fmt::Debug for AccessControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessControl")
            .field("session_keys", &self.session_keys)
            .finish_non_exhaustive()
    }
}
