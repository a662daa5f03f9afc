//! Static shell completions for the fodop CLI
//!
//! Completes subcommands and flags; names of releases are not looked up.

use std::io::Write;

use clap::CommandFactory;
use clap_complete::{Shell, generate};

use crate::cli::Cli;
use crate::error::Result;

/// Write the completion script for `shell` to `out`
pub fn write_completions(shell: Shell, out: &mut dyn Write) -> Result<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, out);
    Ok(())
}

/// Print the completion script for `shell` to stdout
pub fn run(shell: Shell) -> Result<()> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    write_completions(shell, &mut handle)?;
    handle.flush()?;
    Ok(())
}
