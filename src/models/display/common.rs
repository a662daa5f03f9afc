//! Common display helpers

use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::Value;

/// Truncate string to max characters with ellipsis
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Date part of an API timestamp (YYYY-MM-DD).
///
/// The API returns RFC 3339 or zone-less `YYYY-MM-DDTHH:MM:SS[.fff]` values.
/// Anything else is returned as-is.
pub fn format_date(timestamp: &str) -> String {
    if let Ok(dt) = timestamp.parse::<DateTime<Utc>>() {
        return dt.format("%Y-%m-%d").to_string();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%dT%H:%M:%S%.f") {
        return dt.format("%Y-%m-%d").to_string();
    }
    timestamp.to_string()
}

/// Render a record field for display, `--` when absent or null
pub fn field_text(record: &Value, field: &str) -> String {
    match record.get(field) {
        None | Some(Value::Null) => "--".to_string(),
        Some(Value::String(s)) if s.is_empty() => "--".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
