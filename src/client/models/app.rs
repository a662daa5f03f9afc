//! Application models

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Application resource
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationDescriptor {
    /// Application ID
    pub application_id: i64,

    /// Application name
    pub application_name: String,

    /// Whether releases are organized under microservices
    #[serde(default)]
    pub has_microservices: bool,

    /// Application type as reported by the API
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_type: Option<String>,

    /// Business criticality
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_criticality_type: Option<String>,

    /// Remaining fields, passed through to output untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Response body of the create-application call
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppCreated {
    pub application_id: i64,
}
