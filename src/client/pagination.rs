//! Pagination helpers for API requests
//!
//! List endpoints page with `offset`/`limit` and wrap results in an
//! `{ "items": [...], "totalCount": N }` envelope.

use serde::Deserialize;

/// Maximum page size accepted by list endpoints.
/// Using this as default minimizes API calls.
pub const MAX_PAGE_SIZE: usize = 50;

/// Pagination parameters for API requests.
#[derive(Debug, Clone, Default)]
pub struct PaginationParams {
    /// Number of items per page (default and max: 50)
    pub limit: Option<usize>,
    /// Index of the first item to return
    pub offset: Option<usize>,
}

impl PaginationParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit.min(MAX_PAGE_SIZE));
        self
    }

    pub fn offset(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Effective page size
    pub fn page_size(&self) -> usize {
        self.limit.unwrap_or(MAX_PAGE_SIZE)
    }

    /// Convert to query string parameters.
    ///
    /// `limit` is always sent, defaulting to [`MAX_PAGE_SIZE`].
    pub fn to_query_params(&self) -> Vec<(String, String)> {
        let mut params = vec![("limit".to_string(), self.page_size().to_string())];
        if let Some(offset) = self.offset {
            params.push(("offset".to_string(), offset.to_string()));
        }
        params
    }
}

/// Wire envelope of list responses
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemsEnvelope<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    #[serde(default)]
    pub total_count: Option<usize>,
}

/// One page of results plus what is needed to fetch the rest.
#[derive(Debug, Clone)]
pub struct PagedResponse<T> {
    pub items: Vec<T>,
    /// Total across all pages, when the API reports it
    pub total_count: Option<usize>,
    pub limit: usize,
    pub offset: usize,
}

impl<T> PagedResponse<T> {
    pub fn new(items: Vec<T>, total_count: Option<usize>, limit: usize, offset: usize) -> Self {
        Self {
            items,
            total_count,
            limit,
            offset,
        }
    }

    pub fn from_envelope(envelope: ItemsEnvelope<T>, pagination: &PaginationParams) -> Self {
        Self::new(
            envelope.items,
            envelope.total_count,
            pagination.page_size(),
            pagination.offset.unwrap_or(0),
        )
    }

    /// Offsets of the pages after this one.
    ///
    /// Empty when the total is unknown or already covered.
    pub fn remaining_offsets(&self) -> Vec<usize> {
        let (Some(total), true) = (self.total_count, self.limit > 0) else {
            return Vec::new();
        };
        (self.offset + self.limit..total)
            .step_by(self.limit)
            .collect()
    }
}
