//! Application API trait

use async_trait::async_trait;

use crate::client::models::{AppCreateRequest, AppCreated, ApplicationDescriptor};
use crate::client::pagination::{PagedResponse, PaginationParams};
use crate::client::query::FilterParams;
use crate::error::Result;

/// Application operations
#[async_trait]
pub trait ApplicationApi: Send + Sync {
    /// List applications matching server-side filters
    async fn list_applications(
        &self,
        filters: &FilterParams,
        pagination: &PaginationParams,
    ) -> Result<PagedResponse<ApplicationDescriptor>>;

    /// Get an application by ID. `None` when it does not exist.
    async fn get_application(&self, application_id: i64) -> Result<Option<ApplicationDescriptor>>;

    /// Create an application together with its first release.
    ///
    /// The request must already have passed validation.
    async fn create_application(&self, request: &AppCreateRequest) -> Result<AppCreated>;
}
