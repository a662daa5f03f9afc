//! Query string helpers for list endpoints
//!
//! List endpoints take server-side filters in a single `filters` parameter
//! (`field:value` pairs joined by `+`) plus optional boolean switches such as
//! `includeSuspended=true`.
//!
//! The API has no escape for `+` inside a value, so such filters are not
//! sent; callers match names exactly on their side and must then read every
//! page (see [`FilterParams::is_exact`]).

/// Separator between `field:value` pairs in the `filters` parameter
pub const FILTER_SEPARATOR: &str = "+";

/// A CLI selector value that may map to a request switch.
///
/// Values that select the server's default behavior return `None`.
pub trait QueryFlag {
    fn request_param(&self) -> Option<&'static str>;
}

/// Collect the request switches for a set of selected values, without duplicates.
pub fn render_query_flags<T: QueryFlag>(values: &[T]) -> Vec<&'static str> {
    let mut params: Vec<&'static str> = Vec::new();
    for param in values.iter().filter_map(QueryFlag::request_param) {
        if !params.contains(&param) {
            params.push(param);
        }
    }
    params
}

/// Server-side filters and switches for a list request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterParams {
    filters: Vec<(String, String)>,
    flags: Vec<&'static str>,
}

impl FilterParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a `field:value` filter.
    pub fn filter(mut self, field: &str, value: impl ToString) -> Self {
        self.filters.push((field.to_string(), value.to_string()));
        self
    }

    /// Add a filter only when a value is present.
    pub fn filter_opt(self, field: &str, value: Option<impl ToString>) -> Self {
        match value {
            Some(v) => self.filter(field, v),
            None => self,
        }
    }

    /// Add boolean switches sent as `<param>=true`.
    pub fn flags(mut self, flags: impl IntoIterator<Item = &'static str>) -> Self {
        for flag in flags {
            if !self.flags.contains(&flag) {
                self.flags.push(flag);
            }
        }
        self
    }

    fn sent(&self) -> impl Iterator<Item = &(String, String)> {
        self.filters
            .iter()
            .filter(|(_, value)| !value.contains(FILTER_SEPARATOR))
    }

    /// Value of a filter field as sent to the server, if any.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.sent()
            .find(|(f, _)| f == field)
            .map(|(_, v)| v.as_str())
    }

    /// Whether every filter could be sent, so the server narrows results fully.
    pub fn is_exact(&self) -> bool {
        self.sent().count() == self.filters.len()
    }

    pub fn has_flag(&self, flag: &str) -> bool {
        self.flags.contains(&flag)
    }

    /// Convert to query string parameters.
    pub fn to_query_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        let joined = self
            .sent()
            .map(|(field, value)| format!("{}:{}", field, value))
            .collect::<Vec<_>>()
            .join(FILTER_SEPARATOR);
        if !joined.is_empty() {
            params.push(("filters".to_string(), joined));
        }
        for flag in &self.flags {
            params.push((flag.to_string(), "true".to_string()));
        }
        params
    }
}
