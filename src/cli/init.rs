//! Init command implementation

use clap::Args;
use colored::Colorize;

use crate::cli::args::GlobalOptions;
use crate::client::{AuthApi, FodClient};
use crate::config::Config;
use crate::error::Result;

/// Arguments for `init`. Values not given keep what the config file has.
#[derive(Args, Debug, Clone, Default)]
pub struct InitArgs {
    /// API base URL, e.g. https://api.ams.fortify.com
    #[arg(long)]
    pub url: Option<String>,

    /// OAuth client ID
    #[arg(long)]
    pub client_id: Option<String>,

    /// OAuth client secret
    #[arg(long)]
    pub client_secret: Option<String>,

    /// OAuth scope
    #[arg(long)]
    pub scope: Option<String>,

    /// Default qualified name delimiter
    #[arg(long)]
    pub delimiter: Option<String>,

    /// Save without requesting an access token first
    #[arg(long)]
    pub skip_verify: bool,
}

impl InitArgs {
    fn apply(&self, config: &mut Config) {
        if let Some(url) = &self.url {
            config.url = Some(url.trim_end_matches('/').to_string());
        }
        if let Some(id) = &self.client_id {
            config.client_id = Some(id.clone());
        }
        if let Some(secret) = &self.client_secret {
            config.client_secret = Some(secret.clone());
        }
        if let Some(scope) = &self.scope {
            config.scope = scope.clone();
        }
        if let Some(delimiter) = self.delimiter.as_ref().filter(|d| !d.is_empty()) {
            config.delimiter = delimiter.clone();
        }
    }
}

/// Run the init command
///
/// Environment overrides are not written to the file.
pub async fn run(opts: &GlobalOptions, args: &InitArgs) -> Result<()> {
    let path = Config::resolve_path(opts.config_ref())?;
    let mut config = if path.exists() {
        Config::load_from(path.clone())?
    } else {
        Config::default()
    };
    args.apply(&mut config);
    config.validate_auth()?;

    if !args.skip_verify {
        println!("{}", "Authenticating...".cyan());
        FodClient::from_config(&config)?.authenticate().await?;
        println!("{}", "✓ Authentication successful!".green());
    }

    config.save_to(path.clone())?;
    println!(
        "{} Configuration saved to {}",
        "✓".green(),
        path.display().to_string().bold()
    );
    Ok(())
}
