//! Record transformations applied before output
//!
//! Records are the JSON objects returned by the API. A [`Pipeline`] runs a
//! fixed sequence of steps over each record; a step returning `None` drops
//! the record.

use serde_json::Value;

use crate::client::models::ReleaseInclude;

/// Output field holding the workflow action tag
pub const ACTION_FIELD: &str = "__action__";

/// Output field holding the delimited release name
pub const QUALIFIED_NAME_FIELD: &str = "qualifiedName";

type Step = Box<dyn Fn(Value) -> Option<Value> + Send + Sync>;

/// Ordered record transformations
#[derive(Default)]
pub struct Pipeline {
    steps: Vec<Step>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a step.
    pub fn then<F>(mut self, step: F) -> Self
    where
        F: Fn(Value) -> Option<Value> + Send + Sync + 'static,
    {
        self.steps.push(Box::new(step));
        self
    }

    pub fn apply(&self, record: Value) -> Option<Value> {
        self.steps
            .iter()
            .try_fold(record, |record, step| step(record))
    }

    pub fn apply_all(&self, records: impl IntoIterator<Item = Value>) -> Vec<Value> {
        records
            .into_iter()
            .filter_map(|record| self.apply(record))
            .collect()
    }
}

fn str_field<'v>(record: &'v Value, field: &str) -> Option<&'v str> {
    record
        .get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
}

/// Add `qualifiedName` built from the application, microservice and release names.
///
/// Records without application or release name pass through unchanged.
pub fn qualified_name(delimiter: &str) -> impl Fn(Value) -> Option<Value> + Send + Sync + 'static {
    let delimiter = delimiter.to_string();
    move |mut record| {
        let name = match (
            str_field(&record, "applicationName"),
            str_field(&record, "microserviceName"),
            str_field(&record, "releaseName"),
        ) {
            (Some(app), Some(ms), Some(rel)) => {
                Some(format!("{app}{d}{ms}{d}{rel}", d = delimiter))
            }
            (Some(app), None, Some(rel)) => Some(format!("{app}{delimiter}{rel}")),
            _ => None,
        };
        if let (Some(name), Some(obj)) = (name, record.as_object_mut()) {
            obj.insert(QUALIFIED_NAME_FIELD.to_string(), Value::String(name));
        }
        Some(record)
    }
}

/// Add `__action__` with a fixed tag.
pub fn action(tag: impl Into<String>) -> impl Fn(Value) -> Option<Value> + Send + Sync + 'static {
    let tag = tag.into();
    move |mut record| {
        if let Some(obj) = record.as_object_mut() {
            obj.insert(ACTION_FIELD.to_string(), Value::String(tag.clone()));
        }
        Some(record)
    }
}

/// Keep only releases whose suspension state is selected.
///
/// A record without a `suspended` field counts as active.
pub fn include_filter(
    include: &[ReleaseInclude],
) -> impl Fn(Value) -> Option<Value> + Send + Sync + 'static {
    let include = include.to_vec();
    move |record| {
        let suspended = record
            .get("suspended")
            .and_then(Value::as_bool)
            .unwrap_or(false);
        include
            .iter()
            .any(|i| i.selects(suspended))
            .then_some(record)
    }
}

/// Keep only releases of the named application; all pass without a name.
pub fn application_filter(
    name: Option<&str>,
) -> impl Fn(Value) -> Option<Value> + Send + Sync + 'static {
    let name = name.map(str::to_string);
    move |record| match &name {
        Some(name) if record.get("applicationName").and_then(Value::as_str) != Some(name) => None,
        _ => Some(record),
    }
}
