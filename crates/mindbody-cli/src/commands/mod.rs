//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Core commands (init) and shared utilities (open_db, record_filter)
//! - `import` - Bulk record import
//! - `insights` - Insight computation
//! - `records` - Record listing (metrics, sleep, journal)
//! - `serve` - Web server command
//! - `status` - Status and reset commands

pub mod core;
pub mod import;
pub mod insights;
pub mod records;
pub mod serve;
pub mod status;

// Re-export command functions for main.rs
pub use core::*;
pub use import::*;
pub use insights::*;
pub use records::*;
pub use serve::*;
pub use status::*;

/// Truncate a string to a maximum number of characters, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
