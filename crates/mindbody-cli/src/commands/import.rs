//! Import command implementation

use std::path::PathBuf;

use anyhow::{Context, Result};
use mindbody_core::db::Database;
use mindbody_core::import::{import_journal_file, import_metrics_file, import_sleep_file};
use mindbody_core::ImportSummary;

/// Files passed to `mindbody import`
#[derive(Debug, Default)]
pub struct ImportFiles {
    pub metrics: Option<PathBuf>,
    pub sleep: Option<PathBuf>,
    pub journal: Option<PathBuf>,
}

fn print_summary(label: &str, summary: &ImportSummary) {
    println!(
        "   {:<8} {} imported, {} skipped (duplicates)",
        label, summary.imported, summary.skipped
    );
}

/// Import every given file, returning the summaries in metrics/sleep/journal order
pub fn cmd_import(
    db: &Database,
    files: &ImportFiles,
    user: Option<&str>,
) -> Result<Vec<ImportSummary>> {
    if files.metrics.is_none() && files.sleep.is_none() && files.journal.is_none() {
        anyhow::bail!("Nothing to import: pass --metrics, --sleep and/or --journal");
    }

    println!("📥 Importing records...");
    let mut summaries = Vec::new();

    if let Some(path) = &files.metrics {
        let summary = import_metrics_file(db, path, user)
            .with_context(|| format!("Failed to import metrics from {}", path.display()))?;
        print_summary("Metrics:", &summary);
        summaries.push(summary);
    }

    if let Some(path) = &files.sleep {
        let summary = import_sleep_file(db, path, user)
            .with_context(|| format!("Failed to import sleep from {}", path.display()))?;
        print_summary("Sleep:", &summary);
        summaries.push(summary);
    }

    if let Some(path) = &files.journal {
        let summary = import_journal_file(db, path, user)
            .with_context(|| format!("Failed to import journal from {}", path.display()))?;
        print_summary("Journal:", &summary);
        summaries.push(summary);
    }

    println!("✅ Import complete");
    Ok(summaries)
}
