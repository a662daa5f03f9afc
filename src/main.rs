//! fodop CLI - command-line companion for Fortify on Demand releases

use clap::Parser;
use log::LevelFilter;

mod cli;
mod client;
mod config;
mod error;
mod models;
mod output;
mod release;

use cli::args::GlobalOptions;
use cli::{Cli, Commands, ReleaseCommands};
use error::Result;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug);

    if let Err(err) = run(cli).await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

/// `RUST_LOG` wins; otherwise warnings, or everything from this crate with `--debug`.
fn init_logging(debug: bool) {
    let mut builder = env_logger::Builder::new();
    builder.format_timestamp(None).filter_level(LevelFilter::Warn);
    if debug {
        builder.filter_module(env!("CARGO_CRATE_NAME"), LevelFilter::Debug);
    }
    builder.parse_env("RUST_LOG");
    builder.init();
}

async fn run(cli: Cli) -> Result<()> {
    let opts = GlobalOptions::from_cli(&cli);

    match cli.command {
        Commands::Init(args) => cli::init::run(&opts, &args).await,
        Commands::Version => {
            println!("fodop version {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::Completion { shell } => cli::completions::run(shell),
        Commands::Release(cmd) => match cmd {
            ReleaseCommands::Create(args) => cli::release::create(&opts, &args).await,
            ReleaseCommands::Get { release } => cli::release::get(&opts, &release).await,
            ReleaseCommands::List {
                filters,
                pagination,
            } => cli::release::list(&opts, &filters, &pagination).await,
            ReleaseCommands::WaitFor { releases, wait } => {
                cli::release::wait(&opts, &releases, &wait).await
            }
        },
    }
}
