//! Lookup API trait for tenant reference data

use async_trait::async_trait;

use crate::client::models::{AttributeDefinition, UserDescriptor, UserGroupDescriptor};
use crate::client::query::FilterParams;
use crate::error::Result;

/// Users, user groups and attribute definitions
#[async_trait]
pub trait LookupApi: Send + Sync {
    /// List users matching server-side filters
    async fn list_users(&self, filters: &FilterParams) -> Result<Vec<UserDescriptor>>;

    /// List user groups matching server-side filters
    async fn list_user_groups(&self, filters: &FilterParams) -> Result<Vec<UserGroupDescriptor>>;

    /// List all attribute definitions of the tenant
    async fn list_attributes(&self) -> Result<Vec<AttributeDefinition>>;
}
