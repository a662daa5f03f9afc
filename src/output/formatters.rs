//! Reusable formatting utilities for pretty CLI output

use std::time::Duration;

use colored::Colorize;
use serde_json::Value;

use super::transform::{ACTION_FIELD, QUALIFIED_NAME_FIELD};
use crate::release::create::SKIPPED_EXISTING;

/// Format a duration as `2h 15m 30s`, `5m 10s` or `45s`.
pub fn format_duration(duration: Duration) -> String {
    let total = duration.as_secs();
    let hours = total / 3600;
    let mins = (total % 3600) / 60;
    let secs = total % 60;

    if hours > 0 {
        format!("{}h {}m {}s", hours, mins, secs)
    } else if mins > 0 {
        format!("{}m {}s", mins, secs)
    } else {
        format!("{}s", secs)
    }
}

/// Colorize an action tag: green when something was created, yellow otherwise.
pub fn format_action(tag: &str) -> String {
    if tag.contains("CREATED") {
        tag.green().to_string()
    } else if tag == SKIPPED_EXISTING {
        tag.yellow().to_string()
    } else {
        tag.cyan().to_string()
    }
}

fn text<'v>(record: &'v Value, field: &str) -> Option<&'v str> {
    record
        .get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

/// Multi-line summary of a release record.
pub fn format_release_pretty(record: &Value) -> String {
    let name = text(record, QUALIFIED_NAME_FIELD)
        .or_else(|| text(record, "releaseName"))
        .unwrap_or("(unnamed)");
    let id = record
        .get("releaseId")
        .map(|v| v.to_string())
        .unwrap_or_else(|| "?".to_string());

    let mut out = format!("{} {}", name.bold(), format!("(#{})", id).dimmed());
    if let Some(tag) = text(record, ACTION_FIELD) {
        out.push_str(&format!("  {}", format_action(tag)));
    }
    out.push('\n');

    if let Some(sdlc) = text(record, "sdlcStatusType") {
        out.push_str(&format!("  SDLC status: {}\n", sdlc));
    }
    let suspended = record
        .get("suspended")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    out.push_str(&format!(
        "  Suspended:   {}\n",
        if suspended { "yes".red() } else { "no".normal() }
    ));
    if let Some(description) = text(record, "releaseDescription") {
        out.push_str(&format!("  Description: {}\n", description));
    }

    out
}

/// Pretty-print a list of release records separated by blank lines.
pub fn format_releases_pretty(records: &[Value]) -> String {
    if records.is_empty() {
        return "No results found.".to_string();
    }
    records
        .iter()
        .map(format_release_pretty)
        .collect::<Vec<_>>()
        .join("\n")
        .trim_end()
        .to_string()
}
