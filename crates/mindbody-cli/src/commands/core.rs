//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `open_db` - Shared utility to open the database
//! - `record_filter` - Build a store filter from command-line arguments
//! - `cmd_init` - Initialize the database

use std::path::Path;

use anyhow::{Context, Result};
use mindbody_core::db::Database;
use mindbody_core::models::RecordFilter;

use crate::cli::RecordArgs;

/// Open database with encryption by default, or unencrypted if --no-encrypt
pub fn open_db(db_path: &Path, no_encrypt: bool) -> Result<Database> {
    let path_str = db_path
        .to_str()
        .context("Database path must be valid UTF-8")?;
    if no_encrypt {
        Database::new_unencrypted(path_str).context("Failed to open database (unencrypted)")
    } else {
        Database::new(path_str).context("Failed to open database")
    }
}

/// Build a store filter from --user/--start/--end
///
/// A range needs both bounds; giving only one is rejected rather than
/// silently ignored.
pub fn record_filter(args: &RecordArgs) -> Result<RecordFilter> {
    if args.start.is_some() != args.end.is_some() {
        anyhow::bail!("--start and --end must be given together");
    }
    RecordFilter::from_query(
        args.user.as_deref(),
        args.start.as_deref(),
        args.end.as_deref(),
    )
    .context("Invalid date range")
}

pub fn cmd_init(db_path: &Path, no_encrypt: bool) -> Result<()> {
    println!("🔧 Initializing database at {}...", db_path.display());

    // Opening runs the migrations
    let db = open_db(db_path, no_encrypt)?;
    let counts = db.record_counts()?;

    if no_encrypt {
        println!("   ⚠️  Encryption: DISABLED (--no-encrypt)");
    } else {
        println!("   🔒 Encryption: ENABLED");
    }
    println!(
        "   Records: {} metrics, {} sleep, {} journal",
        counts.metrics, counts.sleep, counts.journal
    );

    println!("✅ Database initialized successfully!");
    println!();
    println!("Next steps:");
    println!("  1. Import data: mindbody import --metrics health_metric_data.json --sleep sleep_data.json --journal journal_data.json");
    println!("  2. View insights: mindbody insights");
    println!("  3. Start the API: mindbody serve");

    Ok(())
}
