//! Response types for HTTP handlers.

mod accounts;
mod authentications;
mod errors;

pub use accounts::*;
pub use authentications::*;
pub use errors::*;
