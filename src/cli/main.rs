use std::path::PathBuf;

use clap::Parser;

use crate::Commands;

/// Main CLI application arguments and command structure
#[derive(Parser)]
#[clap(
    name = "noteverse",
    version,
    about = "Personal notes connected by links, viewed as a graph or a timeline"
)]
pub struct Cli {
    /// Path to the configuration file
    #[clap(short = 'c', long, value_parser)]
    pub config: Option<PathBuf>,

    /// Path to the notes directory
    #[clap(long, value_parser)]
    pub notes_dir: Option<PathBuf>,

    /// Keep notes in memory only; nothing is read from or written to disk
    #[clap(long)]
    pub ephemeral: bool,

    /// Verbose output mode
    #[clap(short, long)]
    pub verbose: bool,

    /// Subcommands for the noteverse application
    #[clap(subcommand)]
    pub command: Commands,
}
