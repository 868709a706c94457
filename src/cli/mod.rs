//! CLI module - Command-line interface for presence-resolver
//!
//! Structured CLI using clap for argument parsing.

mod commands;

use clap::{Parser, Subcommand};

/// presence-resolver - Business social presence lookup
/// Finds social profiles and review-site pages for a business
#[derive(Parser)]
#[command(name = "presence-resolver")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP API until Ctrl+C
    #[command(alias = "daemon", alias = "web")]
    Serve,

    /// Resolve links for one business and print the JSON result
    #[command(alias = "r")]
    Resolve {
        /// Business name
        #[arg(required = true)]
        name: Vec<String>,
        /// Street address or town
        #[arg(long)]
        address: Option<String>,
        /// Business website to scrape for links
        #[arg(long)]
        website: Option<String>,
        /// Google place id
        #[arg(long)]
        place_id: Option<String>,
        /// Ignore any cached result
        #[arg(long)]
        skip_cache: bool,
        /// Category tag, may be repeated
        #[arg(long = "type")]
        types: Vec<String>,
    },

    /// Show the category a business name falls into
    #[command(alias = "c")]
    Classify {
        /// Business name
        #[arg(required = true)]
        name: Vec<String>,
        /// Category tag, may be repeated
        #[arg(long = "type")]
        types: Vec<String>,
    },

    /// Maintain the resolution cache
    Cache {
        #[command(subcommand)]
        command: CacheCommands,
    },

    /// Toggle the global caching setting
    Caching {
        #[command(subcommand)]
        command: CachingCommands,
    },

    /// Create default config file
    #[command(alias = "--init")]
    Init,
}

#[derive(Subcommand)]
pub enum CacheCommands {
    /// Remove expired entries
    Purge,
    /// Remove every entry
    Clear,
}

#[derive(Subcommand)]
pub enum CachingCommands {
    /// Enable caching
    On,
    /// Disable caching
    Off,
    /// Show the effective setting
    Status,
}

pub use commands::*;
