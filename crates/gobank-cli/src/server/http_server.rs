//! HTTP server startup and lifecycle management.

use std::future::{self, IntoFuture};
use std::net::SocketAddr;

use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use super::shutdown::ShutdownSignal;
use super::{Result, ServerError, shutdown_signal};
use crate::config::ServerConfig;
use crate::{TRACING_TARGET_SERVER_SHUTDOWN, TRACING_TARGET_SERVER_STARTUP};

/// Starts an HTTP server with graceful shutdown.
///
/// Once a shutdown signal arrives, in-flight requests get up to the configured
/// shutdown timeout to finish before the server stops waiting for them.
pub async fn serve_http(app: Router, server_config: ServerConfig) -> Result<()> {
    if let Err(validation_error) = server_config.validate() {
        tracing::error!(
            target: TRACING_TARGET_SERVER_STARTUP,
            error = %validation_error,
            "Invalid server configuration"
        );

        return Err(ServerError::invalid_config(&validation_error));
    }

    let server_addr = server_config.server_addr();
    let listener = match TcpListener::bind(server_addr).await {
        Ok(listener) => listener,
        Err(listener_err) => {
            let err = ServerError::bind_error(server_addr, listener_err);
            tracing::error!(
                target: TRACING_TARGET_SERVER_STARTUP,
                addr = %server_addr,
                error = %err,
                suggestion = err.suggestion(),
                "Failed to bind to address"
            );

            return Err(err);
        }
    };

    tracing::info!(
        target: TRACING_TARGET_SERVER_STARTUP,
        addr = %server_addr,
        "Server is ready and listening for connections"
    );

    if server_config.binds_to_all_interfaces() {
        tracing::warn!(
            target: TRACING_TARGET_SERVER_STARTUP,
            "Server is bound to all interfaces. Ensure firewall rules are properly configured."
        );
    }

    let shutdown_timeout = server_config.shutdown_timeout();
    let (signalled_tx, signalled_rx) = oneshot::channel::<ShutdownSignal>();

    let graceful = async move {
        let _ = signalled_tx.send(shutdown_signal().await);
    };

    // Resolves only after a signal, once the drain window has elapsed.
    let deadline = async move {
        match signalled_rx.await {
            Ok(signal) => {
                tokio::time::sleep(shutdown_timeout).await;
                signal
            }
            Err(_) => future::pending().await,
        }
    };

    let server = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(graceful)
    .into_future();

    tokio::select! {
        result = server => {
            result.map_err(|err| {
                tracing::error!(
                    target: TRACING_TARGET_SERVER_SHUTDOWN,
                    error = %err,
                    "Server encountered an error"
                );
                ServerError::Runtime(err)
            })?;

            tracing::info!(
                target: TRACING_TARGET_SERVER_SHUTDOWN,
                "Server shut down gracefully"
            );
        }
        signal = deadline => {
            tracing::warn!(
                target: TRACING_TARGET_SERVER_SHUTDOWN,
                signal = %signal,
                timeout_secs = shutdown_timeout.as_secs(),
                "Shutdown timeout elapsed with requests still in flight"
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn invalid_config_is_rejected_before_binding() {
        let mut config = ServerConfig::default();
        config.port = 80;

        let result = serve_http(Router::new(), config).await;
        assert!(matches!(result, Err(ServerError::InvalidConfig(_))));
    }

    #[tokio::test]
    async fn occupied_port_is_a_bind_error() {
        let occupied = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = occupied.local_addr().unwrap();

        let mut config = ServerConfig::default();
        config.host = addr.ip();
        config.port = addr.port();

        // Ephemeral ports are always above 1024.
        let result = serve_http(Router::new(), config).await;
        assert!(matches!(result, Err(ServerError::BindError { .. })));
    }
}
