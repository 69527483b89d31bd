//! Session token header and claims.

mod jwt_claims;
mod jwt_header;

pub use jwt_claims::AuthClaims;
pub use jwt_header::{SESSION_TOKEN_HEADER, SessionToken};
