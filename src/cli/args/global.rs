//! Global CLI options shared across all commands

use crate::cli::{Cli, OutputFormat};

/// Global CLI options passed to all command handlers.
///
/// Precedence is CLI flag > environment variable > config file > default.
/// This struct captures the CLI/env layer; config file values are merged in
/// `CommandContext`.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    /// Output format (pretty, table, json)
    pub format: OutputFormat,

    /// Custom config file path (defaults to ~/.fodop/config.yaml)
    pub config: Option<String>,

    /// Qualified name delimiter override
    pub delim: Option<String>,
}

impl GlobalOptions {
    /// Create GlobalOptions from a parsed CLI struct.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            format: cli.format,
            config: cli.config.clone(),
            delim: cli.delim.clone(),
        }
    }

    /// Get config path as `Option<&str>`.
    pub fn config_ref(&self) -> Option<&str> {
        self.config.as_deref()
    }

    /// Get delimiter override as `Option<&str>`.
    pub fn delim_ref(&self) -> Option<&str> {
        self.delim.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_options_accessors() {
        let opts = GlobalOptions {
            format: OutputFormat::Json,
            config: Some("/custom/path".to_string()),
            delim: Some("/".to_string()),
        };

        assert_eq!(opts.config_ref(), Some("/custom/path"));
        assert_eq!(opts.delim_ref(), Some("/"));
    }

    #[test]
    fn test_global_options_none_accessors() {
        let opts = GlobalOptions {
            format: OutputFormat::Pretty,
            config: None,
            delim: None,
        };

        assert_eq!(opts.config_ref(), None);
        assert_eq!(opts.delim_ref(), None);
    }
}
