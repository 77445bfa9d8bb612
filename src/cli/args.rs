//! CLI argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Inventory a repository and generate its documentation skeleton
#[derive(Parser, Debug)]
#[command(name = "radar")]
#[command(about = "Repository analysis and documentation report")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

impl Args {
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Scan and analyze a repository, then write its documentation
    Analyze {
        /// Root directory of the repository
        path: PathBuf,

        /// Config file path (defaults to ./radar.toml when present)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output format (markdown, json, prompts)
        #[arg(long)]
        format: Option<String>,

        /// Name of the output directory created inside the repository
        #[arg(long)]
        output_dir: Option<String>,

        /// Additional directory names to skip (can be repeated)
        #[arg(long = "exclude-dir")]
        exclude_dirs: Vec<String>,

        /// Disable the progress bar
        #[arg(long)]
        no_progress: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Show version information
    Version,
}
