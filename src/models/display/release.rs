//! Release display model

use serde::Serialize;
use serde_json::Value;
use tabled::Tabled;

use super::common::{field_text, format_date, truncate_string};
use crate::output::transform::{ACTION_FIELD, QUALIFIED_NAME_FIELD};

/// Release display model for table output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct ReleaseDisplay {
    /// Release ID
    #[tabled(rename = "RELEASE ID")]
    pub id: String,

    /// Qualified release name
    #[tabled(rename = "NAME")]
    pub name: String,

    /// SDLC status
    #[tabled(rename = "SDLC")]
    pub sdlc: String,

    /// Checkmark when suspended
    #[tabled(rename = "SUSPENDED")]
    pub suspended: String,

    /// Creation date
    #[tabled(rename = "CREATED")]
    pub created: String,

    /// Workflow action tag, empty for plain lookups
    #[tabled(rename = "ACTION")]
    pub action: String,
}

impl From<&Value> for ReleaseDisplay {
    fn from(record: &Value) -> Self {
        let name = match record.get(QUALIFIED_NAME_FIELD).and_then(Value::as_str) {
            Some(qualified) => qualified.to_string(),
            None => field_text(record, "releaseName"),
        };
        let suspended = record
            .get("suspended")
            .and_then(Value::as_bool)
            .unwrap_or(false);
        let created = record
            .get("releaseCreatedDate")
            .and_then(Value::as_str)
            .map(format_date)
            .unwrap_or_else(|| "--".to_string());

        Self {
            id: field_text(record, "releaseId"),
            name: truncate_string(&name, 60),
            sdlc: field_text(record, "sdlcStatusType"),
            suspended: if suspended {
                "\u{2713}".to_string() // checkmark
            } else {
                "".to_string()
            },
            created,
            action: record
                .get(ACTION_FIELD)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
        }
    }
}
