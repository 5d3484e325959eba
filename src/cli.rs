use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Wakeful - keep-alive scaffolding for hosted-database web projects
#[derive(Parser, Debug)]
#[command(name = "wakeful")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Run 'wakeful' without arguments to scaffold the keep-alive files.")]
pub struct Cli {
    /// NDJSON output for CI
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Copy the keep-alive files into the project (default)
    Setup {
        /// Project root to scaffold into
        #[arg(short, long, default_value = ".")]
        project: PathBuf,

        /// Show what would be done without writing
        #[arg(long)]
        dry_run: bool,

        /// Do not install the client library dependency
        #[arg(long)]
        skip_install: bool,
    },

    /// Remove the keep-alive files added by setup
    Remove {
        /// Project root to remove from
        #[arg(short, long, default_value = ".")]
        project: PathBuf,

        /// Show what would be removed without deleting
        #[arg(long)]
        dry_run: bool,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}
