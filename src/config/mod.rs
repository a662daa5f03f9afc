//! Configuration management for fodop

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{ConfigError, Result};

/// Default delimiter between qualified name segments
pub const DEFAULT_DELIMITER: &str = ":";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// API base URL, e.g. https://api.ams.fortify.com
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// OAuth client ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,

    /// OAuth client secret
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_secret: Option<String>,

    /// OAuth scope requested with the client credentials grant
    #[serde(default = "default_scope")]
    pub scope: String,

    /// Delimiter between application, microservice and release names
    #[serde(default = "default_delimiter")]
    pub delimiter: String,

    /// Wait-for defaults
    #[serde(default)]
    pub wait: WaitPreferences,
}

/// Polling defaults for `release wait-for`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaitPreferences {
    /// Seconds between poll cycles
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,

    /// Seconds before giving up
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_scope() -> String {
    "api-tenant".to_string()
}

fn default_delimiter() -> String {
    DEFAULT_DELIMITER.to_string()
}

fn default_interval_secs() -> u64 {
    30
}

fn default_timeout_secs() -> u64 {
    60 * 60
}

impl Default for WaitPreferences {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl WaitPreferences {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            url: None,
            client_id: None,
            client_secret: None,
            scope: default_scope(),
            delimiter: default_delimiter(),
            wait: WaitPreferences::default(),
        }
    }
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;

        Ok(home.join(".fodop").join("config.yaml"))
    }

    /// Resolve an explicit path or fall back to the default location
    pub fn resolve_path(path: Option<&str>) -> Result<PathBuf> {
        match path {
            Some(p) => Ok(PathBuf::from(p)),
            None => Self::default_path(),
        }
    }

    /// Load configuration from an optional path, then apply environment overrides.
    ///
    /// A missing file is not an error: everything can come from the environment.
    pub fn load_at(path: Option<&str>) -> Result<Self> {
        let path = Self::resolve_path(path)?;
        let mut config = if path.exists() {
            Self::load_from(path)?
        } else {
            Self::default()
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: PathBuf) -> Result<Self> {
        let contents = std::fs::read_to_string(&path)?;
        let config: Config = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;
        Ok(config)
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents =
            serde_yaml::to_string(self).map_err(|e| ConfigError::SaveError(e.to_string()))?;

        std::fs::write(&path, contents)?;

        // Credentials live in this file
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(&path)?.permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(&path, perms)?;
        }

        Ok(())
    }

    /// Override file values with FODOP_* environment variables
    fn apply_env<F: Fn(&str) -> Option<String>>(&mut self, lookup: F) {
        if let Some(url) = lookup("FODOP_URL") {
            self.url = Some(url);
        }
        if let Some(id) = lookup("FODOP_CLIENT_ID") {
            self.client_id = Some(id);
        }
        if let Some(secret) = lookup("FODOP_CLIENT_SECRET") {
            self.client_secret = Some(secret);
        }
    }

    /// Validate that the API URL and credentials are present
    pub fn validate_auth(&self) -> Result<()> {
        if self.url.as_deref().is_none_or(|u| u.trim().is_empty()) {
            return Err(ConfigError::MissingUrl.into());
        }
        if self.client_id.is_none() || self.client_secret.is_none() {
            return Err(ConfigError::MissingCredentials.into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.url.is_none());
        assert_eq!(config.delimiter, ":");
        assert_eq!(config.scope, "api-tenant");
        assert_eq!(config.wait.interval(), Duration::from_secs(30));
        assert_eq!(config.wait.timeout(), Duration::from_secs(3600));
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.yaml");

        let config = Config {
            url: Some("https://api.example.com".to_string()),
            client_id: Some("id".to_string()),
            client_secret: Some("secret".to_string()),
            delimiter: "/".to_string(),
            ..Config::default()
        };
        config.save_to(path.clone()).unwrap();

        let loaded = Config::load_from(path).unwrap();
        assert_eq!(loaded.url.as_deref(), Some("https://api.example.com"));
        assert_eq!(loaded.delimiter, "/");
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "url: https://api.example.com\nwait:\n  interval_secs: 5\n").unwrap();

        let loaded = Config::load_from(path).unwrap();
        assert_eq!(loaded.delimiter, ":");
        assert_eq!(loaded.wait.interval_secs, 5);
        assert_eq!(loaded.wait.timeout_secs, 3600);
    }

    #[test]
    fn test_env_overrides_file_values() {
        let mut config = Config {
            url: Some("https://file.example.com".to_string()),
            ..Config::default()
        };
        let env: HashMap<&str, &str> = [
            ("FODOP_URL", "https://env.example.com"),
            ("FODOP_CLIENT_ID", "env-id"),
        ]
        .into_iter()
        .collect();

        config.apply_env(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.url.as_deref(), Some("https://env.example.com"));
        assert_eq!(config.client_id.as_deref(), Some("env-id"));
        assert!(config.client_secret.is_none());
    }

    #[test]
    fn test_validate_auth() {
        let mut config = Config::default();
        assert!(config.validate_auth().is_err());

        config.url = Some("https://api.example.com".to_string());
        let err = config.validate_auth().unwrap_err();
        assert!(err.to_string().contains("credentials"));

        config.client_id = Some("id".to_string());
        config.client_secret = Some("secret".to_string());
        assert!(config.validate_auth().is_ok());
    }
}
