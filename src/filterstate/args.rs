use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "filterstate", version)]
#[command(about = "Merge and encode table filter state", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (defaults to .filterstate/config.json, then the user config dir)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Merge request params into a stored state and print the new state
    Merge {
        /// Request params JSON ("-" for stdin)
        #[arg(short, long)]
        params: PathBuf,

        /// Previous state JSON (empty when omitted)
        #[arg(short, long)]
        state: Option<PathBuf>,
    },

    /// Print the wire map for a stored state
    Encode {
        /// State JSON ("-" for stdin)
        #[arg(short, long)]
        state: PathBuf,
    },

    /// Merge, then print both the new state and its wire map
    Apply {
        /// Request params JSON ("-" for stdin)
        #[arg(short, long)]
        params: PathBuf,

        /// Previous state JSON (empty when omitted)
        #[arg(short, long)]
        state: Option<PathBuf>,
    },

    /// List the configured filters
    #[command(alias = "ls")]
    Filters,
}
