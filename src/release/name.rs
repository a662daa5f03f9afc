//! Qualified names: `application<d>[microservice<d>]release`

use crate::error::{Error, Result};

fn split_segments<'a>(input: &'a str, delimiter: &str) -> Vec<&'a str> {
    if delimiter.is_empty() {
        return vec![input];
    }
    input.split(delimiter).map(str::trim).collect()
}

fn release_format(delimiter: &str) -> String {
    format!(
        "<application>{d}[<microservice>{d}]<release>",
        d = delimiter
    )
}

/// Parsed release name.
///
/// Application and release are always non-blank. The microservice is present
/// only when the input had three segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualifiedReleaseName {
    application: String,
    microservice: Option<String>,
    release: String,
}

impl QualifiedReleaseName {
    pub fn parse(input: &str, delimiter: &str) -> Result<Self> {
        let segments = split_segments(input, delimiter);
        let invalid = || {
            Error::Parse(format!(
                "'{}' must be in the format {}",
                input,
                release_format(delimiter)
            ))
        };

        if segments.iter().any(|s| s.is_empty()) {
            return Err(invalid());
        }
        match segments.as_slice() {
            [app, release] => Ok(Self {
                application: app.to_string(),
                microservice: None,
                release: release.to_string(),
            }),
            [app, ms, release] => Ok(Self {
                application: app.to_string(),
                microservice: Some(ms.to_string()),
                release: release.to_string(),
            }),
            _ => Err(invalid()),
        }
    }

    pub fn application(&self) -> &str {
        &self.application
    }

    pub fn microservice(&self) -> Option<&str> {
        self.microservice.as_deref()
    }

    pub fn release(&self) -> &str {
        &self.release
    }

    /// Same name without the microservice segment
    pub fn without_microservice(&self) -> Self {
        Self {
            microservice: None,
            ..self.clone()
        }
    }

    pub fn qualified_name(&self, delimiter: &str) -> String {
        match &self.microservice {
            Some(ms) => format!(
                "{}{d}{}{d}{}",
                self.application,
                ms,
                self.release,
                d = delimiter
            ),
            None => format!("{}{}{}", self.application, delimiter, self.release),
        }
    }
}

/// A release given either by numeric ID or by qualified name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseRef {
    Id(i64),
    Name(QualifiedReleaseName),
}

impl ReleaseRef {
    /// All-digit input is an ID; anything else must be a qualified name.
    pub fn parse(input: &str, delimiter: &str) -> Result<Self> {
        let trimmed = input.trim();
        if !trimmed.is_empty() && trimmed.chars().all(|c| c.is_ascii_digit()) {
            let id = trimmed
                .parse::<i64>()
                .map_err(|e| Error::Parse(format!("'{}': {}", input, e)))?;
            return Ok(ReleaseRef::Id(id));
        }
        QualifiedReleaseName::parse(trimmed, delimiter).map(ReleaseRef::Name)
    }

    pub fn display(&self, delimiter: &str) -> String {
        match self {
            ReleaseRef::Id(id) => id.to_string(),
            ReleaseRef::Name(name) => name.qualified_name(delimiter),
        }
    }
}
