//! Owner, user group and attribute lookups for create requests
//!
//! Each value may be given as a numeric ID or by name. Names are resolved
//! with a filtered list call and must match exactly.

use chrono::{Local, NaiveDate};
use log::debug;

use super::Diagnostics;
use crate::client::models::{AttributeDefinition, AttributeValue};
use crate::client::{FilterParams, FodApi, LookupApi};
use crate::error::{Error, Result};

fn as_id(value: &str) -> Option<i64> {
    let value = value.trim();
    if !value.is_empty() && value.chars().all(|c| c.is_ascii_digit()) {
        value.parse().ok()
    } else {
        None
    }
}

/// Resolve an owner given as user ID or user name
pub async fn resolve_owner<C: FodApi + ?Sized>(client: &C, owner: &str) -> Result<i64> {
    if let Some(id) = as_id(owner) {
        return Ok(id);
    }

    let filters = FilterParams::new().filter("userName", owner);
    client
        .list_users(&filters)
        .await?
        .into_iter()
        .find(|u| u.user_name == owner)
        .map(|u| u.user_id)
        .ok_or_else(|| Error::InvalidArgument(format!("User not found: {}", owner)))
}

/// Resolve user groups given as IDs or names, keeping input order
pub async fn resolve_user_groups<C: FodApi + ?Sized>(
    client: &C,
    groups: &[String],
) -> Result<Vec<i64>> {
    let mut ids = Vec::with_capacity(groups.len());
    for group in groups.iter().map(|g| g.trim()).filter(|g| !g.is_empty()) {
        if let Some(id) = as_id(group) {
            ids.push(id);
            continue;
        }

        let filters = FilterParams::new().filter("name", group);
        let id = client
            .list_user_groups(&filters)
            .await?
            .into_iter()
            .find(|g| g.name == group)
            .map(|g| g.id)
            .ok_or_else(|| Error::InvalidArgument(format!("User group not found: {}", group)))?;
        ids.push(id);
    }
    Ok(ids)
}

/// Which attribute definitions a create request may carry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeScope {
    /// Application create: application, release and microservice attributes
    All,
    /// Release create: release attributes only
    Release,
}

impl AttributeScope {
    pub fn includes(self, definition: &AttributeDefinition) -> bool {
        match self {
            AttributeScope::All => matches!(
                definition.attribute_type.as_str(),
                "Application" | "Release" | "Microservice"
            ),
            AttributeScope::Release => definition.attribute_type == "Release",
        }
    }
}

/// Default for a required attribute that was not given.
///
/// `None` for data types that cannot be defaulted, such as User.
pub fn default_value(definition: &AttributeDefinition, today: NaiveDate) -> Option<String> {
    match definition.attribute_data_type.as_str() {
        "Text" => Some("autofilled".to_string()),
        "Boolean" => Some("false".to_string()),
        "Date" => Some(today.format("%Y-%m-%d").to_string()),
        "Picklist" => definition.picklist_values.first().map(|v| v.name.clone()),
        _ => None,
    }
}

fn find_definition<'d>(
    definitions: &'d [AttributeDefinition],
    key: &str,
) -> Option<&'d AttributeDefinition> {
    match as_id(key) {
        Some(id) => definitions.iter().find(|d| d.id == id),
        None => definitions.iter().find(|d| d.name == key),
    }
}

/// Resolve `name=value` assignments to attribute IDs.
///
/// With `auto_required`, required definitions in `scope` that were not
/// assigned get a default value. Required attributes that cannot be
/// defaulted are reported as warnings and left for the server to reject.
pub async fn resolve_attributes<C: FodApi + ?Sized>(
    client: &C,
    assignments: &[(String, String)],
    scope: AttributeScope,
    auto_required: bool,
    diagnostics: &mut Diagnostics,
) -> Result<Vec<AttributeValue>> {
    if assignments.is_empty() && !auto_required {
        return Ok(Vec::new());
    }

    let definitions = client.list_attributes().await?;
    let mut values: Vec<AttributeValue> = Vec::new();

    for (key, value) in assignments {
        let definition = find_definition(&definitions, key.trim())
            .ok_or_else(|| Error::InvalidArgument(format!("Attribute not found: {}", key)))?;
        values.retain(|v| v.id != definition.id);
        values.push(AttributeValue {
            id: definition.id,
            value: value.clone(),
        });
    }

    if auto_required {
        let today = Local::now().date_naive();
        let missing: Vec<&AttributeDefinition> = definitions
            .iter()
            .filter(|d| d.is_required && scope.includes(d))
            .filter(|d| !values.iter().any(|v| v.id == d.id))
            .collect();
        for definition in missing {
            match default_value(definition, today) {
                Some(value) => {
                    debug!(
                        "Defaulting required attribute '{}' to '{}'",
                        definition.name, value
                    );
                    values.push(AttributeValue {
                        id: definition.id,
                        value,
                    });
                }
                None => diagnostics.warn(format!(
                    "Required {} attribute '{}' cannot be filled automatically",
                    definition.attribute_data_type, definition.name
                )),
            }
        }
    }

    Ok(values)
}
