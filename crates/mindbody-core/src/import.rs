//! Bulk import of metric, sleep and journal records
//!
//! Two file layouts are accepted:
//! - JSON, as exported by the data collection scripts. Metrics are a single
//!   object `{"user_id": .., "metrics": [..]}`; sleep and journal files are
//!   arrays of records each carrying their own `user_id`.
//! - CSV with a header row naming the record fields. A `user_id` column is
//!   optional when a fallback user is supplied.
//!
//! Every record is hashed on its content so re-importing the same file is a
//! no-op.

use chrono::NaiveDate;
use csv::{ReaderBuilder, Trim};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, info};

use crate::db::Database;
use crate::error::{Error, Result};
use crate::models::{NewJournalRecord, NewMetricRecord, NewSleepRecord};

/// On-disk layout of an import file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Csv,
}

impl FileFormat {
    /// Detect the format from the file extension, defaulting to JSON
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => Self::Csv,
            _ => Self::Json,
        }
    }
}

/// Outcome of importing one file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    /// Records read from the file
    pub parsed: usize,
    /// Records written to the store
    pub imported: usize,
    /// Records already present (same content hash)
    pub skipped: usize,
}

// ========== Content hashes ==========

/// Deduplication hash for a metric record
pub fn metric_import_hash(record: &NewMetricRecord) -> String {
    let mut hasher = Sha256::new();
    hasher.update(record.user_id.as_bytes());
    hasher.update(record.date.to_string().as_bytes());
    hasher.update(record.steps.to_be_bytes());
    hasher.update(record.heart_rate.to_be_bytes());
    hasher.update(record.sleep_hours.to_be_bytes());
    hasher.update(record.hrv.to_be_bytes());
    hex::encode(hasher.finalize())
}

/// Deduplication hash for a sleep record
pub fn sleep_import_hash(record: &NewSleepRecord) -> String {
    let mut hasher = Sha256::new();
    hasher.update(record.user_id.as_bytes());
    hasher.update(record.date.to_string().as_bytes());
    hasher.update(record.duration.to_be_bytes());
    hasher.update(record.disturbances.to_be_bytes());
    hasher.update(record.sleep_quality.to_be_bytes());
    hex::encode(hasher.finalize())
}

/// Deduplication hash for a journal entry
///
/// `occurrence` numbers repeats of the same text on the same day within one
/// import batch, so a file holding two identical entries stores both and
/// still re-imports as a no-op.
pub fn journal_import_hash(record: &NewJournalRecord, occurrence: usize) -> String {
    let mut hasher = Sha256::new();
    hasher.update(record.user_id.as_bytes());
    hasher.update(record.date.to_string().as_bytes());
    hasher.update(record.entry.as_bytes());
    if occurrence > 0 {
        hasher.update(occurrence.to_be_bytes());
    }
    hex::encode(hasher.finalize())
}

/// Number each record by how many identical entries precede it in the batch
fn journal_occurrences(records: &[NewJournalRecord]) -> Vec<usize> {
    let mut seen: HashMap<(&str, NaiveDate, &str), usize> = HashMap::new();
    records
        .iter()
        .map(|r| {
            let count = seen
                .entry((r.user_id.as_str(), r.date, r.entry.as_str()))
                .or_insert(0);
            let occurrence = *count;
            *count += 1;
            occurrence
        })
        .collect()
}

// ========== Raw rows ==========

#[derive(Debug, Deserialize)]
struct MetricsDocument {
    #[serde(default)]
    user_id: Option<String>,
    metrics: Vec<MetricRow>,
}

#[derive(Debug, Deserialize)]
struct MetricRow {
    #[serde(default)]
    user_id: Option<String>,
    date: NaiveDate,
    steps: i64,
    heart_rate: i64,
    #[serde(default)]
    sleep_hours: f64,
    hrv: i64,
}

#[derive(Debug, Deserialize)]
struct SleepRow {
    #[serde(default)]
    user_id: Option<String>,
    date: NaiveDate,
    duration: f64,
    #[serde(default)]
    disturbances: i64,
    #[serde(default)]
    sleep_quality: f64,
}

#[derive(Debug, Deserialize)]
struct JournalRow {
    #[serde(default)]
    user_id: Option<String>,
    date: NaiveDate,
    entry: String,
}

/// Pick the row's own user, falling back to the one given on import
fn resolve_user(row_user: Option<String>, fallback: Option<&str>, row: usize) -> Result<String> {
    row_user
        .map(|u| u.trim().to_string())
        .filter(|u| !u.is_empty())
        .or_else(|| fallback.map(String::from))
        .ok_or_else(|| Error::Import(format!("Record {}: missing user_id", row + 1)))
}

fn read_csv_rows<T: DeserializeOwned, R: Read>(reader: R) -> Result<Vec<T>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    for result in rdr.deserialize() {
        rows.push(result?);
    }
    Ok(rows)
}

// ========== Parsers ==========

/// Parse metric records
///
/// In JSON form the document-level `user_id` applies to every entry; an
/// entry's own `user_id` wins when present.
pub fn parse_metrics<R: Read>(
    reader: R,
    format: FileFormat,
    fallback_user: Option<&str>,
) -> Result<Vec<NewMetricRecord>> {
    let (document_user, rows) = match format {
        FileFormat::Json => {
            let doc: MetricsDocument = serde_json::from_reader(reader)?;
            (doc.user_id, doc.metrics)
        }
        FileFormat::Csv => (None, read_csv_rows::<MetricRow, _>(reader)?),
    };
    let fallback = document_user.as_deref().or(fallback_user);

    rows.into_iter()
        .enumerate()
        .map(|(i, row)| {
            Ok(NewMetricRecord {
                user_id: resolve_user(row.user_id, fallback, i)?,
                date: row.date,
                steps: row.steps,
                heart_rate: row.heart_rate,
                sleep_hours: row.sleep_hours,
                hrv: row.hrv,
            })
        })
        .collect()
}

/// Parse sleep records
pub fn parse_sleep<R: Read>(
    reader: R,
    format: FileFormat,
    fallback_user: Option<&str>,
) -> Result<Vec<NewSleepRecord>> {
    let rows: Vec<SleepRow> = match format {
        FileFormat::Json => serde_json::from_reader(reader)?,
        FileFormat::Csv => read_csv_rows(reader)?,
    };

    rows.into_iter()
        .enumerate()
        .map(|(i, row)| {
            if row.duration < 0.0 {
                return Err(Error::InvalidData(format!(
                    "Record {}: negative sleep duration {}",
                    i + 1,
                    row.duration
                )));
            }
            Ok(NewSleepRecord {
                user_id: resolve_user(row.user_id, fallback_user, i)?,
                date: row.date,
                duration: row.duration,
                disturbances: row.disturbances,
                sleep_quality: row.sleep_quality,
            })
        })
        .collect()
}

/// Parse journal entries
pub fn parse_journal<R: Read>(
    reader: R,
    format: FileFormat,
    fallback_user: Option<&str>,
) -> Result<Vec<NewJournalRecord>> {
    let rows: Vec<JournalRow> = match format {
        FileFormat::Json => serde_json::from_reader(reader)?,
        FileFormat::Csv => read_csv_rows(reader)?,
    };

    rows.into_iter()
        .enumerate()
        .map(|(i, row)| {
            Ok(NewJournalRecord {
                user_id: resolve_user(row.user_id, fallback_user, i)?,
                date: row.date,
                entry: row.entry,
            })
        })
        .collect()
}

// ========== File import ==========

fn open(path: &Path) -> Result<BufReader<File>> {
    let file = File::open(path)
        .map_err(|e| Error::Import(format!("Cannot open {}: {}", path.display(), e)))?;
    Ok(BufReader::new(file))
}

/// Insert records one by one, counting duplicates
fn store<T>(
    records: &[T],
    mut insert: impl FnMut(&T) -> Result<Option<i64>>,
) -> Result<ImportSummary> {
    let mut summary = ImportSummary {
        parsed: records.len(),
        ..Default::default()
    };
    for record in records {
        match insert(record)? {
            Some(_) => summary.imported += 1,
            None => summary.skipped += 1,
        }
    }
    Ok(summary)
}

/// Import a metrics file into the store
pub fn import_metrics_file(
    db: &Database,
    path: &Path,
    fallback_user: Option<&str>,
) -> Result<ImportSummary> {
    let format = FileFormat::from_path(path);
    debug!(path = %path.display(), ?format, "Reading metrics");
    let records = parse_metrics(open(path)?, format, fallback_user)?;
    let summary = store(&records, |r| db.insert_metric(r))?;
    info!(
        imported = summary.imported,
        skipped = summary.skipped,
        "Imported metrics"
    );
    Ok(summary)
}

/// Import a sleep file into the store
pub fn import_sleep_file(
    db: &Database,
    path: &Path,
    fallback_user: Option<&str>,
) -> Result<ImportSummary> {
    let format = FileFormat::from_path(path);
    debug!(path = %path.display(), ?format, "Reading sleep records");
    let records = parse_sleep(open(path)?, format, fallback_user)?;
    let summary = store(&records, |r| db.insert_sleep(r))?;
    info!(
        imported = summary.imported,
        skipped = summary.skipped,
        "Imported sleep records"
    );
    Ok(summary)
}

/// Import a journal file into the store
pub fn import_journal_file(
    db: &Database,
    path: &Path,
    fallback_user: Option<&str>,
) -> Result<ImportSummary> {
    let format = FileFormat::from_path(path);
    debug!(path = %path.display(), ?format, "Reading journal entries");
    let records = parse_journal(open(path)?, format, fallback_user)?;
    let occurrences = journal_occurrences(&records);
    let numbered: Vec<_> = records.iter().zip(occurrences).collect();
    let summary = store(&numbered, |(r, n)| db.insert_journal_occurrence(r, *n))?;
    info!(
        imported = summary.imported,
        skipped = summary.skipped,
        "Imported journal entries"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const METRICS_JSON: &str = r#"{
        "user_id": "user123",
        "metrics": [
            {"date": "2024-01-01", "steps": 1000, "heart_rate": 70, "sleep_hours": 7.0, "hrv": 40},
            {"date": "2024-01-02", "steps": 1200, "heart_rate": 68, "sleep_hours": 6.5, "hrv": 42}
        ]
    }"#;

    #[test]
    fn test_format_from_path() {
        assert_eq!(FileFormat::from_path(Path::new("a.csv")), FileFormat::Csv);
        assert_eq!(FileFormat::from_path(Path::new("a.CSV")), FileFormat::Csv);
        assert_eq!(FileFormat::from_path(Path::new("a.json")), FileFormat::Json);
        assert_eq!(FileFormat::from_path(Path::new("noext")), FileFormat::Json);
    }

    #[test]
    fn test_parse_metrics_json() {
        let records = parse_metrics(METRICS_JSON.as_bytes(), FileFormat::Json, None).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].user_id, "user123");
        assert_eq!(records[1].steps, 1200);
        assert_eq!(records[1].sleep_hours, 6.5);
    }

    #[test]
    fn test_parse_metrics_csv_with_fallback_user() {
        let csv = "date,steps,heart_rate,hrv\n2024-01-01,1000,70,40\n2024-01-02, 1500 ,65,45\n";
        let records = parse_metrics(csv.as_bytes(), FileFormat::Csv, Some("alice")).unwrap();
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.user_id == "alice"));
        assert_eq!(records[1].steps, 1500);
        assert_eq!(records[1].sleep_hours, 0.0);
    }

    #[test]
    fn test_parse_metrics_csv_requires_user() {
        let csv = "date,steps,heart_rate,hrv\n2024-01-01,1000,70,40\n";
        let err = parse_metrics(csv.as_bytes(), FileFormat::Csv, None).unwrap_err();
        assert!(matches!(err, Error::Import(_)));
    }

    #[test]
    fn test_parse_sleep_json() {
        let json = r#"[
            {"user_id": "user123", "date": "2024-01-01", "duration": 5.0, "disturbances": 3, "sleep_quality": 50},
            {"user_id": "user123", "date": "2024-01-02", "duration": 5.5, "disturbances": 1, "sleep_quality": 55}
        ]"#;
        let records = parse_sleep(json.as_bytes(), FileFormat::Json, None).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].disturbances, 3);
        assert_eq!(records[1].sleep_quality, 55.0);
    }

    #[test]
    fn test_parse_sleep_rejects_negative_duration() {
        let csv = "user_id,date,duration\nu1,2024-01-01,-1\n";
        let err = parse_sleep(csv.as_bytes(), FileFormat::Csv, None).unwrap_err();
        assert!(matches!(err, Error::InvalidData(_)));
    }

    #[test]
    fn test_parse_journal_csv_row_user_wins() {
        let csv = "user_id,date,entry\nbob,2024-01-01,\"Calm, happy day\"\n,2024-01-02,Stressful\n";
        let records = parse_journal(csv.as_bytes(), FileFormat::Csv, Some("alice")).unwrap();
        assert_eq!(records[0].user_id, "bob");
        assert_eq!(records[0].entry, "Calm, happy day");
        assert_eq!(records[1].user_id, "alice");
    }

    #[test]
    fn test_parse_bad_date() {
        let json = r#"[{"user_id": "u", "date": "01/02/2024", "entry": "x"}]"#;
        assert!(parse_journal(json.as_bytes(), FileFormat::Json, None).is_err());
    }

    #[test]
    fn test_hash_depends_on_content() {
        let records = parse_metrics(METRICS_JSON.as_bytes(), FileFormat::Json, None).unwrap();
        let first = metric_import_hash(&records[0]);
        assert_eq!(first, metric_import_hash(&records[0].clone()));
        assert_ne!(first, metric_import_hash(&records[1]));

        let mut other_user = records[0].clone();
        other_user.user_id = "someone-else".to_string();
        assert_ne!(first, metric_import_hash(&other_user));
    }

    #[test]
    fn test_import_file_is_idempotent() {
        let db = Database::in_memory().unwrap();
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(METRICS_JSON.as_bytes()).unwrap();

        let first = import_metrics_file(&db, file.path(), None).unwrap();
        assert_eq!(
            first,
            ImportSummary {
                parsed: 2,
                imported: 2,
                skipped: 0
            }
        );

        let second = import_metrics_file(&db, file.path(), None).unwrap();
        assert_eq!(second.imported, 0);
        assert_eq!(second.skipped, 2);
        assert_eq!(db.record_counts().unwrap().metrics, 2);
    }

    #[test]
    fn test_import_keeps_repeated_journal_entries() {
        let db = Database::in_memory().unwrap();
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(
            b"user_id,date,entry\nu1,2024-01-01,Feeling happy\nu1,2024-01-01,Feeling happy\nu1,2024-01-01,Stressful\n",
        )
        .unwrap();

        let first = import_journal_file(&db, file.path(), None).unwrap();
        assert_eq!(first.imported, 3);
        assert_eq!(db.record_counts().unwrap().journal, 3);

        let second = import_journal_file(&db, file.path(), None).unwrap();
        assert_eq!(second.imported, 0);
        assert_eq!(second.skipped, 3);
        assert_eq!(db.record_counts().unwrap().journal, 3);
    }

    #[test]
    fn test_journal_occurrences() {
        let csv = "user_id,date,entry\nu1,2024-01-01,a\nu1,2024-01-01,a\nu1,2024-01-02,a\nu2,2024-01-01,a\nu1,2024-01-01,a\n";
        let records = parse_journal(csv.as_bytes(), FileFormat::Csv, None).unwrap();
        assert_eq!(journal_occurrences(&records), vec![0, 1, 0, 0, 2]);
        assert_ne!(
            journal_import_hash(&records[0], 0),
            journal_import_hash(&records[1], 1)
        );
    }

    #[test]
    fn test_import_missing_file() {
        let db = Database::in_memory().unwrap();
        let err = import_sleep_file(&db, Path::new("/nonexistent/sleep.json"), None).unwrap_err();
        assert!(matches!(err, Error::Import(_)));
    }
}
