//! Insights command implementation

use std::sync::Arc;

use anyhow::{Context, Result};
use mindbody_core::db::Database;
use mindbody_core::insights::{InsightEngine, PhraseChooser, RandomChooser, SeededChooser};
use mindbody_core::models::Agent;
use tracing::debug;

use super::record_filter;
use crate::cli::RecordArgs;

/// Compute insights for the selected records and render them as pretty JSON
pub fn cmd_insights(
    db: &Database,
    args: &RecordArgs,
    agent: Option<&str>,
    seed: Option<u64>,
) -> Result<String> {
    let filter = record_filter(args)?;
    let agent = agent
        .filter(|a| !a.is_empty())
        .map(|a| a.parse::<Agent>())
        .transpose()
        .context("Unknown --agent (use fitness, sleep or journal)")?;

    if !db.has_metrics(&filter)? {
        anyhow::bail!("No health metrics available for the specified criteria");
    }

    let metrics = db.list_metrics(&filter)?;
    let sleep = db.list_sleep(&filter)?;
    let journal = db.list_journal(&filter)?;
    debug!(
        ?agent,
        seed,
        metrics = metrics.len(),
        sleep = sleep.len(),
        journal = journal.len(),
        "Computing insights"
    );

    let chooser: Arc<dyn PhraseChooser> = match seed {
        Some(seed) => Arc::new(SeededChooser::new(seed)),
        None => Arc::new(RandomChooser),
    };
    let engine = InsightEngine::with_chooser(chooser);

    let report = engine.insights_for(agent, &metrics, &sleep, &journal);
    serde_json::to_string_pretty(&report).context("Failed to serialize insights")
}
