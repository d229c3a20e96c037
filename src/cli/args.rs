//! CLI argument parsing with clap.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// Personal movie and series watchlist backed by a hosted database
#[derive(Parser, Debug)]
#[command(name = "watchlist")]
#[command(version, about = "Track movies and series you want to watch", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Config file path (default: ~/.watchlist.toml)
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Add a title to the watchlist
    Add {
        /// Title of the movie or series
        title: String,
    },
    /// List all items, newest first
    List,
    /// Flip the watched flag of an item
    Toggle {
        /// Item id (see `list`)
        id: String,
    },
    /// Remove an item
    Remove {
        /// Numeric item id (see `list`)
        id: String,
    },
    /// Search titles (case-insensitive substring match)
    Search {
        /// Text to look for in titles
        query: String,

        /// Return at most this many matches
        #[arg(long, short)]
        limit: Option<usize>,
    },
}
