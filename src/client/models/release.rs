//! Release models

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Release resource
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseDescriptor {
    /// Release ID
    pub release_id: i64,

    /// Simple release name (without application/microservice prefix)
    pub release_name: String,

    /// Owning application ID
    pub application_id: i64,

    /// Owning application name
    pub application_name: String,

    /// Microservice ID, if the release belongs to one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub microservice_id: Option<i64>,

    /// Microservice name, if the release belongs to one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub microservice_name: Option<String>,

    /// SDLC status
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sdlc_status_type: Option<String>,

    /// Whether the release is suspended
    #[serde(default)]
    pub suspended: bool,

    /// Remaining fields, passed through to output untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ReleaseDescriptor {
    /// Microservice name, treating the API's empty string as absent
    pub fn microservice(&self) -> Option<&str> {
        self.microservice_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
    }

    /// Application, optional microservice and release joined by `delimiter`
    pub fn qualified_name(&self, delimiter: &str) -> String {
        match self.microservice() {
            Some(ms) => format!(
                "{}{d}{}{d}{}",
                self.application_name,
                ms,
                self.release_name,
                d = delimiter
            ),
            None => format!("{}{}{}", self.application_name, delimiter, self.release_name),
        }
    }
}

/// Response body of the create-release call
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseCreated {
    pub release_id: i64,
}
