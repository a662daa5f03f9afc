//! Microservice API trait

use async_trait::async_trait;

use crate::client::models::MicroserviceDescriptor;
use crate::error::Result;

/// Microservice operations, always scoped to one application
#[async_trait]
pub trait MicroserviceApi: Send + Sync {
    /// List the microservices of an application
    async fn list_microservices(&self, application_id: i64) -> Result<Vec<MicroserviceDescriptor>>;

    /// Create a microservice and return its descriptor
    async fn create_microservice(
        &self,
        application_id: i64,
        name: &str,
    ) -> Result<MicroserviceDescriptor>;
}
