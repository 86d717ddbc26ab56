//! Record listing commands

use anyhow::Result;
use mindbody_core::db::Database;

use super::{record_filter, truncate};
use crate::cli::RecordArgs;

pub fn cmd_metrics_list(db: &Database, args: &RecordArgs, limit: i64) -> Result<()> {
    let metrics = db.list_metrics(&record_filter(args)?.with_limit(limit))?;

    if metrics.is_empty() {
        println!("No metrics found. Import some with:");
        println!("  mindbody import --metrics health_metric_data.json");
        return Ok(());
    }

    println!();
    println!("🏃 Fitness Metrics");
    println!("   ─────────────────────────────────────────────────────────────");
    println!(
        "   {:<10} │ {:<12} │ {:>7} │ {:>4} │ {:>4} │ {:>5}",
        "Date", "User", "Steps", "HR", "HRV", "Sleep"
    );

    for m in metrics {
        println!(
            "   {} │ {:<12} │ {:>7} │ {:>4} │ {:>4} │ {:>5.1}",
            m.date,
            truncate(&m.user_id, 12),
            m.steps,
            m.heart_rate,
            m.hrv,
            m.sleep_hours
        );
    }

    Ok(())
}

pub fn cmd_sleep_list(db: &Database, args: &RecordArgs, limit: i64) -> Result<()> {
    let sleep = db.list_sleep(&record_filter(args)?.with_limit(limit))?;

    if sleep.is_empty() {
        println!("No sleep records found. Import some with:");
        println!("  mindbody import --sleep sleep_data.json");
        return Ok(());
    }

    println!();
    println!("😴 Sleep Records");
    println!("   ─────────────────────────────────────────────────────────────");
    println!(
        "   {:<10} │ {:<12} │ {:>8} │ {:>12} │ {:>7}",
        "Date", "User", "Duration", "Disturbances", "Quality"
    );

    for s in sleep {
        println!(
            "   {} │ {:<12} │ {:>7.1}h │ {:>12} │ {:>7.1}",
            s.date,
            truncate(&s.user_id, 12),
            s.duration,
            s.disturbances,
            s.sleep_quality
        );
    }

    Ok(())
}

pub fn cmd_journal_list(db: &Database, args: &RecordArgs, limit: i64) -> Result<()> {
    let entries = db.list_journal(&record_filter(args)?.with_limit(limit))?;

    if entries.is_empty() {
        println!("No journal entries found. Import some with:");
        println!("  mindbody import --journal journal_data.json");
        return Ok(());
    }

    println!();
    println!("📓 Journal Entries");
    println!("   ─────────────────────────────────────────────────────────────");

    for j in entries {
        println!(
            "   {} │ {:<12} │ {}",
            j.date,
            truncate(&j.user_id, 12),
            truncate(&j.entry, 60)
        );
    }

    Ok(())
}
