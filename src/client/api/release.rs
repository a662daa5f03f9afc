//! Release API trait

use async_trait::async_trait;
use serde_json::Value;

use crate::client::models::{ReleaseCreateRequest, ReleaseDescriptor};
use crate::client::pagination::{PagedResponse, PaginationParams};
use crate::client::query::FilterParams;
use crate::error::Result;

/// Release operations
#[async_trait]
pub trait ReleaseApi: Send + Sync {
    /// List releases matching server-side filters and switches
    async fn list_releases(
        &self,
        filters: &FilterParams,
        pagination: &PaginationParams,
    ) -> Result<PagedResponse<ReleaseDescriptor>>;

    /// Get a release by ID. `None` when it does not exist.
    async fn get_release(&self, release_id: i64) -> Result<Option<ReleaseDescriptor>>;

    /// Get the untyped release record, as used by state polling.
    async fn get_release_record(&self, release_id: i64) -> Result<Option<Value>>;

    /// Create a release and return its freshly loaded descriptor.
    ///
    /// The request must already have passed validation.
    async fn create_release(&self, request: &ReleaseCreateRequest) -> Result<ReleaseDescriptor>;
}
