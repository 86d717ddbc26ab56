//! Sleep record operations

use rusqlite::{params, OptionalExtension};

use super::{parse_datetime, parse_stored_date, Database, FilterClause};
use crate::error::Result;
use crate::import::sleep_import_hash;
use crate::models::{NewSleepRecord, RecordFilter, SleepRecord};

impl Database {
    /// Insert a sleep record (skips duplicates based on import_hash)
    pub fn insert_sleep(&self, record: &NewSleepRecord) -> Result<Option<i64>> {
        let conn = self.conn()?;
        let hash = sleep_import_hash(record);

        let existing: Option<i64> = conn
            .query_row(
                "SELECT id FROM sleep_data WHERE import_hash = ?",
                params![hash],
                |row| row.get(0),
            )
            .optional()?;

        if existing.is_some() {
            return Ok(None);
        }

        conn.execute(
            r#"
            INSERT INTO sleep_data (user_id, date, duration, disturbances, sleep_quality, import_hash)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
            params![
                record.user_id,
                record.date.to_string(),
                record.duration,
                record.disturbances,
                record.sleep_quality,
                hash,
            ],
        )?;

        Ok(Some(conn.last_insert_rowid()))
    }

    /// List sleep records in chronological order
    pub fn list_sleep(&self, filter: &RecordFilter) -> Result<Vec<SleepRecord>> {
        let conn = self.conn()?;
        let clause = FilterClause::build(filter);

        let sql = format!(
            r#"
            SELECT id, user_id, date, duration, disturbances, sleep_quality, created_at
            FROM sleep_data
            {}
            ORDER BY date ASC, id ASC
            {}
            "#,
            clause.where_clause, clause.limit_clause
        );

        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(clause.param_refs().as_slice(), |row| {
            let date_str: String = row.get(2)?;
            let created_at_str: String = row.get(6)?;
            Ok(SleepRecord {
                id: row.get(0)?,
                user_id: row.get(1)?,
                date: parse_stored_date(2, &date_str)?,
                duration: row.get(3)?,
                disturbances: row.get(4)?,
                sleep_quality: row.get(5)?,
                created_at: parse_datetime(&created_at_str),
            })
        })?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }
}
