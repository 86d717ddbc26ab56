//! Insight handlers

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use tracing::info;

use super::records::RecordQuery;
use crate::{AppError, AppState};
use mindbody_core::models::Agent;
use mindbody_core::InsightReport;

/// Query parameters for insights
#[derive(Debug, Default, Deserialize)]
pub struct InsightQuery {
    pub user_id: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    /// Restrict the report to one domain (fitness, sleep, journal)
    pub agent: Option<String>,
}

impl InsightQuery {
    fn records(&self) -> RecordQuery {
        RecordQuery {
            user_id: self.user_id.clone(),
            start_date: self.start_date.clone(),
            end_date: self.end_date.clone(),
            // Trend analysis needs the whole range
            limit: None,
        }
    }
}

/// GET /api/insights - Holistic or single-domain insights
///
/// Checks run in order: date format (400), metric availability (404),
/// agent name (400).
pub async fn get_insights(
    State(state): State<Arc<AppState>>,
    Query(params): Query<InsightQuery>,
) -> Result<Json<InsightReport>, AppError> {
    let filter = params.records().filter()?;

    if !state.db.has_metrics(&filter)? {
        return Err(AppError::not_found(
            "No health metrics available for the specified criteria",
        ));
    }

    let agent = match params.agent.as_deref().filter(|a| !a.is_empty()) {
        Some(name) => Some(
            name.parse::<Agent>()
                .map_err(|_| AppError::bad_request("Invalid agent specified"))?,
        ),
        None => None,
    };

    let metrics = state.db.list_metrics(&filter)?;
    let sleep = state.db.list_sleep(&filter)?;
    let journal = state.db.list_journal(&filter)?;

    info!(
        agent = agent.map(|a| a.as_str()).unwrap_or("holistic"),
        user = filter.user_id.as_deref().unwrap_or("*"),
        metrics = metrics.len(),
        sleep = sleep.len(),
        journal = journal.len(),
        "Generating insights"
    );

    Ok(Json(
        state.engine.insights_for(agent, &metrics, &sleep, &journal),
    ))
}
