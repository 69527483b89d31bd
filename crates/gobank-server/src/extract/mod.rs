//! Request extractors with improved error handling and validation.
//!
//! - [`SessionToken`] - the `x-jwt-token` session header
//! - [`AuthClaims`] - decoded session token claims
//! - [`Json`], [`ValidateJson`], [`Path`], [`Query`] - drop-in replacements for
//!   the axum extractors that reject with the server's error envelope

pub mod auth;
pub mod reject;

pub use crate::extract::auth::{AuthClaims, SessionToken};
pub use crate::extract::reject::{Json, Path, Query, ValidateJson};
