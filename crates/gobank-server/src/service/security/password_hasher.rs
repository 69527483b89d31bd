//! Password hashing and verification using Argon2id.
//!
//! Hashing and verification are designed for use in HTTP handlers and return
//! [`handler::Error`](crate::handler::Error) values on failure.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{Error as ArgonError, SaltString};
use argon2::{Argon2, PasswordHash, PasswordHasher as _, PasswordVerifier};

use crate::handler::{ErrorKind, Result};
use crate::utility::tracing_targets::TRACING_TARGET_PASSWORD_HASHER;

/// Well-formed PHC string using the default Argon2id parameters.
///
/// No password verifies against it.
const DUMMY_PASSWORD_HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHRzb21lc2FsdA$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

/// Argon2id password hashing service.
///
/// Every hash uses a fresh random salt, so hashing the same plaintext twice
/// yields different PHC strings that both verify.
#[derive(Debug, Clone, Default)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
}

impl PasswordHasher {
    /// Creates a new instance of the [`PasswordHasher`] service.
    pub fn new() -> Self {
        Self {
            argon2: Argon2::default(),
        }
    }

    /// Hashes a password and returns the PHC string to store.
    ///
    /// # Errors
    ///
    /// Returns `ErrorKind::InternalServerError` if the hashing operation fails.
    pub fn hash_password(&self, password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);

        let password_hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| {
                tracing::error!(
                    target: TRACING_TARGET_PASSWORD_HASHER,
                    error = %e,
                    "password hashing operation failed"
                );

                ErrorKind::InternalServerError
                    .with_message("Password processing failed")
                    .with_context("hash generation error")
            })?;

        Ok(password_hash.to_string())
    }

    /// Verifies a password against a stored PHC string.
    ///
    /// Returns `Ok(false)` on mismatch. The comparison is constant-time.
    ///
    /// # Errors
    ///
    /// Returns `ErrorKind::InternalServerError` if the stored hash cannot be
    /// parsed or verification itself fails.
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> Result<bool> {
        let parsed_hash = PasswordHash::new(stored_hash).map_err(|e| {
            tracing::error!(
                target: TRACING_TARGET_PASSWORD_HASHER,
                error = %e,
                "stored password hash is not a valid PHC string"
            );

            ErrorKind::InternalServerError.with_context("hash format error")
        })?;

        match self
            .argon2
            .verify_password(password.as_bytes(), &parsed_hash)
        {
            Ok(()) => Ok(true),
            Err(ArgonError::Password) => {
                tracing::debug!(
                    target: TRACING_TARGET_PASSWORD_HASHER,
                    "password verification failed: incorrect password provided"
                );
                Ok(false)
            }
            Err(e) => {
                tracing::error!(
                    target: TRACING_TARGET_PASSWORD_HASHER,
                    error = %e,
                    "password verification system error"
                );

                Err(ErrorKind::InternalServerError.with_context("verification error"))
            }
        }
    }

    /// Performs a verification that always fails, with the cost of a real one.
    ///
    /// Used when no account matches a login so the response time does not
    /// reveal whether the account exists.
    pub fn verify_dummy(&self, password: &str) {
        if let Ok(parsed_hash) = PasswordHash::new(DUMMY_PASSWORD_HASH) {
            let _ = self
                .argon2
                .verify_password(password.as_bytes(), &parsed_hash);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_roundtrip() -> anyhow::Result<()> {
        let hasher = PasswordHasher::new();
        let hash = hasher.hash_password("correct horse")?;

        assert!(hash.starts_with("$argon2id$"));
        assert!(hasher.verify_password("correct horse", &hash)?);
        assert!(!hasher.verify_password("wrong horse", &hash)?);
        Ok(())
    }

    #[test]
    fn no_password_verifies_against_another_hash() -> anyhow::Result<()> {
        let hasher = PasswordHasher::new();
        let passwords = ["gobank", "Gobank", "gobank ", "p\u{e4}ssw\u{f6}rd"];
        let hashes = passwords
            .iter()
            .map(|password| hasher.hash_password(password))
            .collect::<Result<Vec<_>, _>>()?;

        for (i, hash) in hashes.iter().enumerate() {
            for (j, password) in passwords.iter().enumerate() {
                assert_eq!(
                    hasher.verify_password(password, hash)?,
                    i == j,
                    "{password:?} against hash of {:?}",
                    passwords[i]
                );
            }
        }
        Ok(())
    }

    #[test]
    fn salts_differ_between_hashes() -> anyhow::Result<()> {
        let hasher = PasswordHasher::new();
        let first = hasher.hash_password("same")?;
        let second = hasher.hash_password("same")?;

        assert_ne!(first, second);
        assert!(hasher.verify_password("same", &first)?);
        assert!(hasher.verify_password("same", &second)?);
        Ok(())
    }

    #[test]
    fn unparsable_hash_is_an_error() {
        let hasher = PasswordHasher::new();
        let error = hasher.verify_password("secret", "not-a-phc-string").unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InternalServerError);
    }

    #[test]
    fn dummy_hash_is_well_formed() {
        assert!(PasswordHash::new(DUMMY_PASSWORD_HASH).is_ok());
        let hasher = PasswordHasher::new();
        assert!(!hasher.verify_password("anything", DUMMY_PASSWORD_HASH).unwrap());
        hasher.verify_dummy("anything");
    }
}
