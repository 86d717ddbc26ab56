//! Stored record handlers

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::{AppError, AppState, MAX_PAGE_LIMIT};
use mindbody_core::models::{JournalRecord, MetricRecord, RecordFilter, SleepRecord};
use mindbody_core::Error;

/// Message returned for unparseable date bounds
pub(crate) const INVALID_DATE_MESSAGE: &str = "Invalid date format. Use YYYY-MM-DD";

/// Query parameters shared by the record and insight endpoints
#[derive(Debug, Default, Deserialize)]
pub struct RecordQuery {
    pub user_id: Option<String>,
    /// Inclusive lower bound (YYYY-MM-DD); only applied with `end_date`
    pub start_date: Option<String>,
    /// Inclusive upper bound (YYYY-MM-DD); only applied with `start_date`
    pub end_date: Option<String>,
    pub limit: Option<i64>,
}

impl RecordQuery {
    /// Build the store filter, rejecting malformed dates with a 400
    pub(crate) fn filter(&self) -> Result<RecordFilter, AppError> {
        let mut filter = RecordFilter::from_query(
            self.user_id.as_deref(),
            self.start_date.as_deref(),
            self.end_date.as_deref(),
        )
        .map_err(|e| match e {
            Error::InvalidDate(_) => AppError::bad_request(INVALID_DATE_MESSAGE),
            other => AppError::from(other),
        })?;

        if let Some(limit) = self.limit {
            filter = filter.with_limit(limit.clamp(1, MAX_PAGE_LIMIT));
        }
        Ok(filter)
    }
}

/// GET /api/metrics - List fitness metric records
pub async fn list_metrics(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RecordQuery>,
) -> Result<Json<Vec<MetricRecord>>, AppError> {
    let filter = params.filter()?;
    Ok(Json(state.db.list_metrics(&filter)?))
}

/// GET /api/sleep - List sleep records
pub async fn list_sleep(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RecordQuery>,
) -> Result<Json<Vec<SleepRecord>>, AppError> {
    let filter = params.filter()?;
    Ok(Json(state.db.list_sleep(&filter)?))
}

/// GET /api/journal - List journal entries
pub async fn list_journal(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RecordQuery>,
) -> Result<Json<Vec<JournalRecord>>, AppError> {
    let filter = params.filter()?;
    Ok(Json(state.db.list_journal(&filter)?))
}

/// GET /api/health - Liveness probe
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
