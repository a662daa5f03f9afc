//! Microservice models

use serde::{Deserialize, Serialize};

/// Microservice resource, always a child of an application
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MicroserviceDescriptor {
    /// Microservice ID
    pub microservice_id: i64,

    /// Microservice name
    pub microservice_name: String,

    /// Owning application. The list endpoint omits it, so the client fills it in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_id: Option<i64>,
}
