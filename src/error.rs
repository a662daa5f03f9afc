//! Error types for the fodop CLI

use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Result type alias for fodop operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for the application
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Wait(#[from] WaitError),

    #[error("Invalid qualified name: {0}")]
    Parse(String),

    #[error("{0}")]
    InvalidArgument(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// API-related errors
#[derive(Debug, Error)]
#[allow(dead_code)]
pub enum ApiError {
    #[error("Authentication failed. Check client_id and client_secret in your fodop config.")]
    Unauthorized,

    #[error("Access denied. You don't have permission to access this resource.")]
    Forbidden,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Rate limit exceeded. Retry after {0:?}")]
    RateLimit(Duration),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Network("Request timed out".to_string())
        } else if err.is_connect() {
            ApiError::Network("Failed to connect to API".to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to save configuration: {0}")]
    SaveError(String),

    #[error("API URL not configured. Set `url` in the config file or FODOP_URL.")]
    MissingUrl,

    #[error(
        "API credentials not configured. Set `client_id`/`client_secret` or FODOP_CLIENT_ID/FODOP_CLIENT_SECRET."
    )]
    MissingCredentials,
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

/// One or more required request fields are missing.
///
/// Carries every violated rule in check order so all problems surface at once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub subject: String,
    pub messages: Vec<String>,
}

impl ValidationError {
    pub fn new(subject: impl Into<String>, messages: Vec<String>) -> Self {
        Self {
            subject: subject.into(),
            messages,
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unable to {}:", self.subject)?;
        for message in &self.messages {
            write!(f, "\n\t{}", message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// Wait-for errors, reported with the last observed states
#[derive(Debug, Error)]
pub enum WaitError {
    #[error("Timed out after {elapsed:?} waiting for requested state; last states:\n{states}")]
    Timeout { elapsed: Duration, states: String },

    #[error("Unexpected {property} value '{state}' for {record}")]
    UnexpectedState {
        record: String,
        property: String,
        state: String,
    },

    #[error("One or more records reached a failure state:\n{states}")]
    FailureState { states: String },
}
