//! Middleware for `axum::Router` and HTTP request processing.
//!
//! - [`require_account_owner`] gates `/account/{id}` routes
//! - [`RouterRecoveryExt`] handles panics, timeouts and service errors
//! - [`RouterObservabilityExt`] adds request ids and request tracing
//!
//! ```rust,no_run
//! use axum::Router;
//! use gobank_server::middleware::{RecoveryConfig, RouterObservabilityExt, RouterRecoveryExt};
//!
//! let app: Router = Router::new()
//!     .with_recovery(&RecoveryConfig::default())
//!     .with_observability();
//! ```

mod auth;
mod observability;
mod recovery;

pub use auth::require_account_owner;
pub use observability::RouterObservabilityExt;
pub use recovery::{RecoveryConfig, RouterRecoveryExt};
