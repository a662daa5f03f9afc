//! CLI command definitions and handlers

use clap::{Parser, Subcommand};
pub use clap_complete::Shell;

pub mod args;
pub mod completions;
pub mod context;
pub mod init;
pub mod release;

pub use args::{OutputFormat, PaginationArgs, ReleaseCreateArgs, ReleaseFilterArgs, WaitArgs};
pub use context::CommandContext;

/// fodop - command-line companion for Fortify on Demand releases
#[derive(Parser, Debug)]
#[command(name = "fodop")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (pretty, table, json)
    #[arg(
        long,
        global = true,
        env = "FODOP_FORMAT",
        default_value = "pretty",
        hide_env = true,
        hide_possible_values = true
    )]
    pub format: OutputFormat,

    /// Override config file location
    #[arg(long, global = true, env = "FODOP_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Delimiter between application, microservice and release names
    #[arg(long, global = true, env = "FODOP_DELIM", hide_env = true)]
    pub delim: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, env = "FODOP_DEBUG", hide_env = true)]
    pub debug: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write API URL and credentials to the config file
    Init(init::InitArgs),

    /// Create, inspect and wait for releases
    #[command(subcommand)]
    Release(ReleaseCommands),

    /// Display version information
    Version,

    /// Generate shell completions
    #[command(after_help = "\
Examples:
  bash:   fodop completion bash > /etc/bash_completion.d/fodop
  zsh:    fodop completion zsh > \"${fpath[1]}/_fodop\"
  fish:   fodop completion fish > ~/.config/fish/completions/fodop.fish")]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Release subcommands
#[derive(Subcommand, Debug)]
pub enum ReleaseCommands {
    /// Create a release, creating its application and microservice if missing
    #[command(after_help = "\
The qualified name is <application>:[<microservice>:]<release> with the
default delimiter. Output carries an __action__ field listing what was
created (APP_CREATED, MICROSERVICE_CREATED, RELEASE_CREATED) or
SKIPPED_EXISTING with --skip-if-exists.")]
    Create(ReleaseCreateArgs),

    /// Show a single release
    Get {
        /// Release ID or qualified release name
        release: String,
    },

    /// List releases
    List {
        #[command(flatten)]
        filters: ReleaseFilterArgs,

        #[command(flatten)]
        pagination: PaginationArgs,
    },

    /// Wait until releases reach a suspension state
    WaitFor {
        /// Release IDs or qualified release names
        #[arg(required = true)]
        releases: Vec<String>,

        #[command(flatten)]
        wait: WaitArgs,
    },
}
