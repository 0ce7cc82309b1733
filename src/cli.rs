use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "docforge")]
#[command(author, version, about = "Staged document-editing pipeline runner")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a pipeline of actions over a set of documents
    Run {
        /// Input files, or directories to scan for documents
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Named scenario from the config file
        #[arg(short, long, conflicts_with = "actions")]
        scenario: Option<String>,

        /// JSON file holding the action list
        #[arg(short, long)]
        actions: Option<PathBuf>,

        /// Directory run artifacts are exported to
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Keep the staging directories after the run
        #[arg(long)]
        keep_staging: bool,

        /// Show the built pipeline without executing
        #[arg(long)]
        dry_run: bool,
    },

    /// List every action the engine knows
    Actions {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate the config file and the actions its scenarios declare
    Validate,

    /// Display version information
    Version,
}
