//! Wakeful CLI - keep-alive scaffolding tool
//!
//! Usage: wakeful [COMMAND]
//!
//! Commands:
//!   setup   Copy the keep-alive files into the project (default)
//!   remove  Remove the keep-alive files added by setup

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Provisioning is the default mode; bare `wakeful` scaffolds the
    // current directory.
    let command = cli.command.unwrap_or(Commands::Setup {
        project: PathBuf::from("."),
        dry_run: false,
        skip_install: false,
    });

    match command {
        Commands::Setup {
            project,
            dry_run,
            skip_install,
        } => commands::setup::cmd_setup(&project, dry_run, skip_install, cli.json, cli.verbose),
        Commands::Remove {
            project,
            dry_run,
            yes,
        } => commands::remove::cmd_remove(&project, dry_run, yes, cli.json, cli.verbose),
    }
}
