//! Mindbody Core Library
//!
//! Shared functionality for the mindbody wellness tool:
//! - Database access and migrations (encrypted SQLite)
//! - Bulk import of metric, sleep and journal records (JSON and CSV)
//! - Insight engine: trend analysis, journal sentiment, wellness score

pub mod db;
pub mod error;
pub mod import;
pub mod insights;
pub mod models;

pub use db::Database;
pub use error::{Error, Result};
pub use import::{FileFormat, ImportSummary};
pub use insights::{HolisticInsight, InsightEngine, InsightReport};
pub use models::{Agent, RecordFilter};
