//! Journal entry operations

use rusqlite::{params, OptionalExtension};

use super::{parse_datetime, parse_stored_date, Database, FilterClause};
use crate::error::Result;
use crate::import::journal_import_hash;
use crate::models::{JournalRecord, NewJournalRecord, RecordFilter};

impl Database {
    /// Insert a journal entry (skips duplicates based on import_hash)
    pub fn insert_journal(&self, record: &NewJournalRecord) -> Result<Option<i64>> {
        self.insert_journal_occurrence(record, 0)
    }

    /// Insert the `occurrence`-th copy of an entry from one import batch
    pub fn insert_journal_occurrence(
        &self,
        record: &NewJournalRecord,
        occurrence: usize,
    ) -> Result<Option<i64>> {
        let conn = self.conn()?;
        let hash = journal_import_hash(record, occurrence);

        let existing: Option<i64> = conn
            .query_row(
                "SELECT id FROM journal_entries WHERE import_hash = ?",
                params![hash],
                |row| row.get(0),
            )
            .optional()?;

        if existing.is_some() {
            return Ok(None);
        }

        conn.execute(
            "INSERT INTO journal_entries (user_id, date, entry, import_hash) VALUES (?, ?, ?, ?)",
            params![record.user_id, record.date.to_string(), record.entry, hash],
        )?;

        Ok(Some(conn.last_insert_rowid()))
    }

    /// List journal entries in chronological order
    pub fn list_journal(&self, filter: &RecordFilter) -> Result<Vec<JournalRecord>> {
        let conn = self.conn()?;
        let clause = FilterClause::build(filter);

        let sql = format!(
            r#"
            SELECT id, user_id, date, entry, created_at
            FROM journal_entries
            {}
            ORDER BY date ASC, id ASC
            {}
            "#,
            clause.where_clause, clause.limit_clause
        );

        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(clause.param_refs().as_slice(), |row| {
            let date_str: String = row.get(2)?;
            let created_at_str: String = row.get(4)?;
            Ok(JournalRecord {
                id: row.get(0)?,
                user_id: row.get(1)?,
                date: parse_stored_date(2, &date_str)?,
                entry: row.get(3)?,
                created_at: parse_datetime(&created_at_str),
            })
        })?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }
}
