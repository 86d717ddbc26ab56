//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Mindbody - Wellness insights from fitness, sleep and journal data
#[derive(Parser)]
#[command(name = "mindbody")]
#[command(about = "Self-hosted mind-body wellness insights", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path
    #[arg(long, default_value = "mindbody.db", global = true)]
    pub db: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable database encryption (not recommended for health data)
    ///
    /// By default, the database is encrypted using SQLCipher.
    /// Set MINDBODY_DB_KEY environment variable with your passphrase.
    /// Use --no-encrypt only for development or testing.
    #[arg(long, global = true)]
    pub no_encrypt: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// User and date-range selection shared by the listing and insight commands
#[derive(Args, Debug, Clone, Default)]
pub struct RecordArgs {
    /// Only records for this user
    #[arg(short, long)]
    pub user: Option<String>,

    /// Start of the date range (YYYY-MM-DD, requires --end)
    #[arg(long)]
    pub start: Option<String>,

    /// End of the date range (YYYY-MM-DD, requires --start)
    #[arg(long)]
    pub end: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database
    Init,

    /// Import metric, sleep and journal records (JSON or CSV)
    Import {
        /// Fitness metrics file
        #[arg(short, long)]
        metrics: Option<PathBuf>,

        /// Sleep records file
        #[arg(short, long)]
        sleep: Option<PathBuf>,

        /// Journal entries file
        #[arg(short, long)]
        journal: Option<PathBuf>,

        /// User for records that don't name one
        #[arg(short, long)]
        user: Option<String>,
    },

    /// List fitness metric records
    Metrics {
        #[command(flatten)]
        records: RecordArgs,

        /// Maximum number of records to show
        #[arg(short, long, default_value = "50")]
        limit: i64,
    },

    /// List sleep records
    Sleep {
        #[command(flatten)]
        records: RecordArgs,

        /// Maximum number of records to show
        #[arg(short, long, default_value = "50")]
        limit: i64,
    },

    /// List journal entries
    Journal {
        #[command(flatten)]
        records: RecordArgs,

        /// Maximum number of records to show
        #[arg(short, long, default_value = "50")]
        limit: i64,
    },

    /// Compute insights and print them as JSON
    Insights {
        #[command(flatten)]
        records: RecordArgs,

        /// Only one domain: fitness, sleep or journal
        #[arg(short, long)]
        agent: Option<String>,

        /// Seed for reproducible recommendation phrasing
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Show database status
    Status,

    /// Delete stored records
    Reset {
        /// Only delete this user's records
        #[arg(short, long)]
        user: Option<String>,

        /// Skip confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "8000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Disable authentication (for local development only)
        #[arg(long)]
        no_auth: bool,
    },
}
