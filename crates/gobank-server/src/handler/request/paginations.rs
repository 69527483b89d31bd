use gobank_postgres::query::Pagination;
use serde::{Deserialize, Serialize};

/// Query parameters for listing endpoints.
#[must_use]
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationQuery {
    /// Maximum number of records to return (clamped to 1..=100, default 50).
    pub limit: Option<i64>,
    /// Number of records to skip.
    pub offset: Option<i64>,
}

impl PaginationQuery {
    /// Converts the query into store pagination, applying defaults and bounds.
    pub fn into_pagination(self) -> Pagination {
        let default = Pagination::default();
        Pagination::new(
            self.limit.unwrap_or(default.limit),
            self.offset.unwrap_or(default.offset),
        )
    }
}

impl From<PaginationQuery> for Pagination {
    fn from(query: PaginationQuery) -> Self {
        query.into_pagination()
    }
}
