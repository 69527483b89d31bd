//! Login handler.

use axum::Router;
use axum::extract::State;
use axum::routing::post;

use crate::extract::{Json, ValidateJson};
use crate::handler::Result;
use crate::handler::request::LoginRequest;
use crate::handler::response::LoginResponse;
use crate::service::{AccessControl, ServiceState};

/// Tracing target for authentication operations.
const TRACING_TARGET: &str = "gobank_server::handler::authentication";

/// Exchanges an account number and password for a session token.
///
/// Unknown numbers and wrong passwords produce the same `403` response.
#[tracing::instrument(skip_all)]
async fn login(
    State(access_control): State<AccessControl>,
    ValidateJson(request): ValidateJson<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    tracing::trace!(
        target: TRACING_TARGET,
        number = request.number,
        "login attempt"
    );

    let (account, token) = access_control
        .verify_login(request.number, &request.password)
        .await?;

    Ok(Json(LoginResponse {
        number: account.number,
        token,
    }))
}

/// Returns a [`Router`] with all related routes.
pub fn routes() -> Router<ServiceState> {
    Router::new().route("/login", post(login))
}
