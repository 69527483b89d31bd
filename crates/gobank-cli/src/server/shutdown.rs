//! Shutdown signal handling.

use std::fmt;
use std::future;

use tokio::signal;

use crate::TRACING_TARGET_SERVER_SHUTDOWN;

/// The operating system signal that ended the serve loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownSignal {
    /// SIGINT, usually Ctrl+C in a terminal.
    Interrupt,
    /// SIGTERM, sent by process supervisors and container runtimes.
    Terminate,
}

impl fmt::Display for ShutdownSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Interrupt => f.write_str("SIGINT"),
            Self::Terminate => f.write_str("SIGTERM"),
        }
    }
}

/// Resolves on the first SIGINT or SIGTERM.
///
/// A handler that cannot be installed is logged and never fires, so the other
/// signal still shuts the server down.
pub async fn shutdown_signal() -> ShutdownSignal {
    let received = tokio::select! {
        () = interrupt() => ShutdownSignal::Interrupt,
        () = terminate() => ShutdownSignal::Terminate,
    };

    tracing::info!(
        target: TRACING_TARGET_SERVER_SHUTDOWN,
        signal = %received,
        "shutdown signal received, draining in-flight requests"
    );

    received
}

async fn interrupt() {
    if let Err(error) = signal::ctrl_c().await {
        tracing::error!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            error = %error,
            "cannot listen for SIGINT"
        );
        future::pending::<()>().await;
    }
}

#[cfg(unix)]
async fn terminate() {
    use tokio::signal::unix::{SignalKind, signal};

    match signal(SignalKind::terminate()) {
        Ok(mut stream) => {
            stream.recv().await;
        }
        Err(error) => {
            tracing::error!(
                target: TRACING_TARGET_SERVER_SHUTDOWN,
                error = %error,
                "cannot listen for SIGTERM"
            );
            future::pending::<()>().await;
        }
    }
}

#[cfg(not(unix))]
async fn terminate() {
    future::pending::<()>().await;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signals_display_their_unix_names() {
        assert_eq!(ShutdownSignal::Interrupt.to_string(), "SIGINT");
        assert_eq!(ShutdownSignal::Terminate.to_string(), "SIGTERM");
    }
}
