//! Mindbody CLI - Mind-body wellness insights
//!
//! Usage:
//!   mindbody init                          Initialize database
//!   mindbody import --metrics FILE ...     Import records (JSON or CSV)
//!   mindbody insights --user ID            Print holistic insights
//!   mindbody serve --port 8000             Start web server

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Init => commands::cmd_init(&cli.db, cli.no_encrypt),
        Commands::Import {
            metrics,
            sleep,
            journal,
            user,
        } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            let files = commands::ImportFiles {
                metrics,
                sleep,
                journal,
            };
            commands::cmd_import(&db, &files, user.as_deref()).map(|_| ())
        }
        Commands::Metrics { records, limit } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            commands::cmd_metrics_list(&db, &records, limit)
        }
        Commands::Sleep { records, limit } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            commands::cmd_sleep_list(&db, &records, limit)
        }
        Commands::Journal { records, limit } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            commands::cmd_journal_list(&db, &records, limit)
        }
        Commands::Insights {
            records,
            agent,
            seed,
        } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            let output = commands::cmd_insights(&db, &records, agent.as_deref(), seed)?;
            println!("{}", output);
            Ok(())
        }
        Commands::Status => commands::cmd_status(&cli.db, cli.no_encrypt),
        Commands::Reset { user, yes } => {
            commands::cmd_reset(&cli.db, user.as_deref(), yes, cli.no_encrypt)
        }
        Commands::Serve {
            port,
            host,
            no_auth,
        } => commands::cmd_serve(&cli.db, &host, port, no_auth, cli.no_encrypt).await,
    }
}
