//! All `axum::`[`Router`]s with related `axum::`[`Handler`]s.
//!
//! # Usage Example
//!
//! ```rust,no_run
//! use gobank_server::handler::routes;
//! use gobank_server::service::{ServiceConfig, ServiceState};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = ServiceConfig::default();
//! let state = ServiceState::from_config(&config).await?;
//! let app: axum::Router = routes(state.clone()).with_state(state);
//! # Ok(())
//! # }
//! ```
//!
//! [`Router`]: axum::routing::Router
//! [`Handler`]: axum::handler::Handler

mod accounts;
mod authentication;
mod error;
pub mod request;
pub mod response;
mod transfers;

use axum::Router;
use axum::middleware::from_fn_with_state;
use axum::response::{IntoResponse, Response};

pub use crate::handler::error::{Error, ErrorKind, Result};
use crate::middleware::require_account_owner;
use crate::service::ServiceState;

#[inline]
async fn handler() -> Response {
    ErrorKind::NotFound.into_response()
}

/// Returns a [`Router`] with the routes guarded by account ownership.
fn private_routes(state: ServiceState) -> Router<ServiceState> {
    let require_account_owner = from_fn_with_state(state, require_account_owner);

    Router::new()
        .merge(accounts::private_routes())
        .route_layer(require_account_owner)
}

/// Returns a [`Router`] with all public routes.
fn public_routes() -> Router<ServiceState> {
    Router::new()
        .merge(accounts::public_routes())
        .merge(authentication::routes())
        .merge(transfers::routes())
}

/// Returns a [`Router`] with all routes and the not-found fallback.
pub fn routes(state: ServiceState) -> Router<ServiceState> {
    Router::new()
        .merge(private_routes(state))
        .merge(public_routes())
        .fallback(handler)
}

#[cfg(test)]
pub(crate) mod test {
    use std::sync::Arc;
    use std::time::Duration;

    use axum_test::TestServer;

    use crate::handler::routes;
    use crate::service::store::MemoryAccountStore;
    use crate::service::{ServiceState, SessionKeys, SharedAccountStore, SigningAlgorithm};

    /// Signing secret shared by all handler tests.
    pub const TEST_SECRET: &[u8] = b"gobank-handler-test-secret-0123456789";

    /// Returns the session keys every test server signs with.
    pub fn create_test_session_keys() -> anyhow::Result<SessionKeys> {
        let session_keys =
            SessionKeys::from_secret(TEST_SECRET, SigningAlgorithm::Hs256, Duration::from_secs(600))?;
        Ok(session_keys)
    }

    /// Returns a new [`ServiceState`] over the given store.
    pub fn create_test_state_with_store(
        account_store: SharedAccountStore,
    ) -> anyhow::Result<ServiceState> {
        Ok(ServiceState::new(account_store, create_test_session_keys()?))
    }

    /// Returns a new [`ServiceState`] over an empty in-memory store.
    pub fn create_test_state() -> anyhow::Result<ServiceState> {
        create_test_state_with_store(Arc::new(MemoryAccountStore::new()))
    }

    /// Returns a new [`TestServer`] with the given state.
    pub fn create_test_server_with_state(state: ServiceState) -> anyhow::Result<TestServer> {
        let app = routes(state.clone()).with_state(state);
        let server = TestServer::new(app)?;
        Ok(server)
    }

    /// Returns a new [`TestServer`] with the default router and state.
    pub fn create_test_server() -> anyhow::Result<TestServer> {
        create_test_server_with_state(create_test_state()?)
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() -> anyhow::Result<()> {
        let server = create_test_server()?;

        let response = server.get("/does-not-exist").await;
        response.assert_status_not_found();
        response.assert_json_contains(&serde_json::json!({ "name": "not_found" }));
        Ok(())
    }
}
