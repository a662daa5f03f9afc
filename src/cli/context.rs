//! Command execution context
//!
//! Loads configuration, validates credentials and builds the API client so
//! command handlers start from a ready-to-use state.

use std::sync::Arc;

use log::debug;

use crate::cli::OutputFormat;
use crate::cli::args::GlobalOptions;
use crate::client::FodClient;
use crate::config::Config;
use crate::error::{Error, Result};

/// Context for command execution containing config, client, and runtime options.
pub struct CommandContext {
    /// Loaded and validated configuration
    pub config: Config,
    /// API client (Arc-wrapped for parallel page fetches)
    pub client: Arc<FodClient>,
    /// Output format preference
    pub format: OutputFormat,
    /// Qualified name delimiter, from `--delim` or the config file
    pub delimiter: String,
}

impl CommandContext {
    /// Create a new command context.
    ///
    /// The access token is requested lazily on the first API call.
    ///
    /// # Errors
    /// Returns error if config cannot be loaded, credentials are missing,
    /// or the delimiter is empty.
    pub fn new(opts: &GlobalOptions) -> Result<Self> {
        let config = Config::load_at(opts.config_ref())?;
        config.validate_auth()?;

        let delimiter = resolve_delimiter(opts.delim_ref(), &config)?;
        debug!("Using delimiter '{}'", delimiter);

        let client = Arc::new(FodClient::from_config(&config)?);

        Ok(Self {
            config,
            client,
            format: opts.format,
            delimiter,
        })
    }
}

/// `--delim` wins over the config file; an empty delimiter is rejected.
fn resolve_delimiter(flag: Option<&str>, config: &Config) -> Result<String> {
    let delimiter = flag.unwrap_or(&config.delimiter);
    if delimiter.is_empty() {
        return Err(Error::InvalidArgument(
            "Delimiter must not be empty".to_string(),
        ));
    }
    Ok(delimiter.to_string())
}
