//! Transfer handler.

use axum::Router;
use axum::http::StatusCode;
use axum::routing::post;

use crate::extract::ValidateJson;
use crate::handler::request::TransferRequest;
use crate::handler::{ErrorKind, Result};
use crate::service::ServiceState;

/// Tracing target for transfer operations.
const TRACING_TARGET: &str = "gobank_server::handler::transfers";

/// Decodes and validates a transfer request. Transfers are not supported, so
/// no balance ever changes.
#[tracing::instrument(skip_all)]
async fn transfer(ValidateJson(request): ValidateJson<TransferRequest>) -> Result<StatusCode> {
    tracing::debug!(
        target: TRACING_TARGET,
        to_account = request.to_account,
        amount = request.amount,
        "transfer requested"
    );

    Err(ErrorKind::NotImplemented.with_resource("transfer"))
}

/// Returns a [`Router`] with all related routes.
pub fn routes() -> Router<ServiceState> {
    Router::new().route("/transfer", post(transfer))
}

#[cfg(test)]
mod test {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::handler::test::create_test_server;

    #[tokio::test]
    async fn valid_transfer_is_not_supported() -> anyhow::Result<()> {
        let server = create_test_server()?;

        let response = server
            .post("/transfer")
            .json(&json!({ "toAccount": 48213, "amount": 100 }))
            .await;
        response.assert_status(StatusCode::NOT_IMPLEMENTED);
        response.assert_json_contains(&json!({ "name": "not_implemented" }));
        Ok(())
    }

    #[tokio::test]
    async fn malformed_transfer_is_bad_request() -> anyhow::Result<()> {
        let server = create_test_server()?;

        let response = server
            .post("/transfer")
            .json(&json!({ "toAccount": "nobody", "amount": 100 }))
            .await;
        response.assert_status_bad_request();

        let response = server
            .post("/transfer")
            .json(&json!({ "toAccount": 48213, "amount": 0 }))
            .await;
        response.assert_status_bad_request();
        Ok(())
    }
}
