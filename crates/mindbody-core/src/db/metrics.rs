//! Fitness metric record operations

use rusqlite::{params, OptionalExtension};

use super::{parse_datetime, parse_stored_date, Database, FilterClause};
use crate::error::Result;
use crate::import::metric_import_hash;
use crate::models::{MetricRecord, NewMetricRecord, RecordFilter};

impl Database {
    /// Insert a metric record (skips duplicates based on import_hash)
    pub fn insert_metric(&self, record: &NewMetricRecord) -> Result<Option<i64>> {
        let conn = self.conn()?;
        let hash = metric_import_hash(record);

        let existing: Option<i64> = conn
            .query_row(
                "SELECT id FROM health_metrics WHERE import_hash = ?",
                params![hash],
                |row| row.get(0),
            )
            .optional()?;

        if existing.is_some() {
            return Ok(None); // Duplicate, skip
        }

        conn.execute(
            r#"
            INSERT INTO health_metrics (user_id, date, steps, heart_rate, sleep_hours, hrv, import_hash)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
            params![
                record.user_id,
                record.date.to_string(),
                record.steps,
                record.heart_rate,
                record.sleep_hours,
                record.hrv,
                hash,
            ],
        )?;

        Ok(Some(conn.last_insert_rowid()))
    }

    /// List metric records in chronological order
    pub fn list_metrics(&self, filter: &RecordFilter) -> Result<Vec<MetricRecord>> {
        let conn = self.conn()?;
        let clause = FilterClause::build(filter);

        let sql = format!(
            r#"
            SELECT id, user_id, date, steps, heart_rate, sleep_hours, hrv, created_at
            FROM health_metrics
            {}
            ORDER BY date ASC, id ASC
            {}
            "#,
            clause.where_clause, clause.limit_clause
        );

        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(clause.param_refs().as_slice(), Self::row_to_metric)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    /// Whether any metric records match the filter
    pub fn has_metrics(&self, filter: &RecordFilter) -> Result<bool> {
        let conn = self.conn()?;
        let clause = FilterClause::build(filter);

        let sql = format!(
            "SELECT EXISTS(SELECT 1 FROM health_metrics {})",
            clause.where_clause
        );
        let exists: bool =
            conn.query_row(&sql, clause.param_refs().as_slice(), |row| row.get(0))?;
        Ok(exists)
    }

    fn row_to_metric(row: &rusqlite::Row) -> rusqlite::Result<MetricRecord> {
        let date_str: String = row.get(2)?;
        let created_at_str: String = row.get(7)?;
        Ok(MetricRecord {
            id: row.get(0)?,
            user_id: row.get(1)?,
            date: parse_stored_date(2, &date_str)?,
            steps: row.get(3)?,
            heart_rate: row.get(4)?,
            sleep_hours: row.get(5)?,
            hrv: row.get(6)?,
            created_at: parse_datetime(&created_at_str),
        })
    }
}
