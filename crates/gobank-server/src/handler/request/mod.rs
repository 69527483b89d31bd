//! Request types for HTTP handlers.

mod accounts;
mod authentications;
mod paginations;
mod paths;
mod transfers;

pub use accounts::*;
pub use authentications::*;
pub use paginations::*;
pub use paths::*;
pub use transfers::*;
