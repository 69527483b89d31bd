//! Database query repositories.
//!
//! Queries that may return large result sets take a [`Pagination`] so every
//! listing is bounded.

pub mod account;

pub use account::AccountRepository;
use serde::{Deserialize, Serialize};

/// Largest page a single query may return.
const MAX_PAGE_SIZE: i64 = 100;

/// Page size used when the caller does not choose one.
const DEFAULT_PAGE_SIZE: i64 = 50;

/// Pagination parameters for database queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Maximum number of records to return.
    pub limit: i64,
    /// Number of records to skip.
    pub offset: i64,
}

impl Pagination {
    /// Creates a new pagination instance with the limit clamped to `1..=100`.
    pub fn new(limit: i64, offset: i64) -> Self {
        Self {
            limit: limit.clamp(1, MAX_PAGE_SIZE),
            offset: offset.max(0),
        }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_new() {
        let pagination = Pagination::new(25, 100);
        assert_eq!(pagination.limit, 25);
        assert_eq!(pagination.offset, 100);
    }

    #[test]
    fn pagination_bounds_checking() {
        assert_eq!(Pagination::new(0, 10).limit, 1);
        assert_eq!(Pagination::new(1500, 10).limit, 100);
        assert_eq!(Pagination::new(10, -5).offset, 0);
    }

    #[test]
    fn pagination_default() {
        assert_eq!(Pagination::default(), Pagination::new(50, 0));
    }
}
