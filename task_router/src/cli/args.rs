use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "task_router")]
#[command(about = "Route files to transformation tasks by extension")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Route every file under a directory through the configured tasks
    Run {
        /// Configuration file (JSON)
        #[arg(short, long, default_value = "task_router.json")]
        config: PathBuf,

        /// Source directory
        #[arg(short, long)]
        src: PathBuf,

        /// Destination directory
        #[arg(short, long)]
        dest: PathBuf,

        /// Suppress progress output
        #[arg(short, long)]
        quiet: bool,

        /// Print every routed file
        #[arg(short, long, conflicts_with = "quiet")]
        verbose: bool,
    },

    /// Validate a configuration file and print its rule table
    Check {
        /// Configuration file (JSON)
        #[arg(short, long, default_value = "task_router.json")]
        config: PathBuf,
    },
}
