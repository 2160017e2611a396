//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "steam-ingest")]
#[command(about = "Ingest Steam storefront metadata into a local game catalog", long_about = None)]
pub(crate) struct Cli {
    /// Config file to use instead of the default location
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Catalog database file
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Storefront country code (e.g., kr, us)
    #[arg(long, global = true)]
    pub country: Option<String>,

    /// Storefront language (e.g., korean, english)
    #[arg(long, global = true)]
    pub language: Option<String>,

    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Write log output to a file (ANSI codes stripped)
    #[arg(long, global = true)]
    pub logfile: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Fetch AppIDs from the storefront and store them in the catalog
    Ingest {
        /// AppIDs to ingest (defaults to the configured list)
        app_ids: Vec<u32>,

        /// Run every step, then roll back instead of committing
        #[arg(short = 'n', long)]
        dry_run: bool,
    },

    /// Create the catalog database, or migrate an existing one
    Init,

    /// Show one stored game with its genres and images
    Show {
        /// Generated game id
        game_id: i64,
    },

    /// List the most recently stored games
    List {
        /// Maximum number of games to show
        #[arg(short, long, default_value_t = 20)]
        limit: u32,
    },

    /// Show catalog row counts
    Stats,

    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show resolved settings and their sources
    Show,

    /// Print the config file path
    Path,

    /// Write a starter config file with the resolved settings
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
