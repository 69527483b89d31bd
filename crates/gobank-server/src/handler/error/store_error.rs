//! Account store error conversions.

use crate::handler::{Error, ErrorKind};
use crate::service::StoreError;
use crate::utility::tracing_targets::TRACING_TARGET_ACCOUNT_STORE;

impl From<StoreError> for Error<'static> {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::NotFound => ErrorKind::NotFound.with_resource("account"),
            StoreError::DuplicateNumber(_) => ErrorKind::Conflict
                .with_message("Account number is already taken")
                .with_resource("account"),
            StoreError::Infrastructure(source) => {
                tracing::error!(
                    target: TRACING_TARGET_ACCOUNT_STORE,
                    error = %source,
                    "account store failure"
                );
                ErrorKind::InternalServerError.with_context(source.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_errors_map_to_http_kinds() {
        assert_eq!(Error::from(StoreError::NotFound).kind(), ErrorKind::NotFound);
        assert_eq!(
            Error::from(StoreError::DuplicateNumber(7)).kind(),
            ErrorKind::Conflict
        );

        let error = Error::from(StoreError::infrastructure("connection refused"));
        assert_eq!(error.kind(), ErrorKind::InternalServerError);
        assert_eq!(error.message(), None);
    }
}
