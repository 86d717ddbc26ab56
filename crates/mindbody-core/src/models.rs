//! Domain models for mindbody

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Date format accepted for record dates and range filters
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Daily fitness and physiological metrics for a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricRecord {
    pub id: i64,
    pub user_id: String,
    pub date: NaiveDate,
    pub steps: i64,
    /// Resting heart rate (bpm)
    pub heart_rate: i64,
    /// Sleep hours as reported by the wearable (not used for insights)
    pub sleep_hours: f64,
    /// Heart rate variability (ms)
    pub hrv: i64,
    pub created_at: DateTime<Utc>,
}

/// A metric record to insert
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMetricRecord {
    pub user_id: String,
    pub date: NaiveDate,
    pub steps: i64,
    pub heart_rate: i64,
    #[serde(default)]
    pub sleep_hours: f64,
    pub hrv: i64,
}

/// One night of sleep for a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SleepRecord {
    pub id: i64,
    pub user_id: String,
    pub date: NaiveDate,
    /// Duration of sleep in hours
    pub duration: f64,
    /// Number of disturbances during sleep
    pub disturbances: i64,
    /// Quality of sleep on a scale of 0-100
    pub sleep_quality: f64,
    pub created_at: DateTime<Utc>,
}

/// A sleep record to insert
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSleepRecord {
    pub user_id: String,
    pub date: NaiveDate,
    pub duration: f64,
    #[serde(default)]
    pub disturbances: i64,
    #[serde(default)]
    pub sleep_quality: f64,
}

/// A free-text journal entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalRecord {
    pub id: i64,
    pub user_id: String,
    pub date: NaiveDate,
    pub entry: String,
    pub created_at: DateTime<Utc>,
}

/// A journal entry to insert
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewJournalRecord {
    pub user_id: String,
    pub date: NaiveDate,
    pub entry: String,
}

/// Filter applied when listing records from the store
///
/// The date range only applies when both bounds are set; bounds are inclusive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFilter {
    pub user_id: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub limit: Option<i64>,
}

impl RecordFilter {
    /// Build a filter from raw query values
    ///
    /// Empty strings are treated as absent. A range with only one bound is
    /// ignored.
    pub fn from_query(
        user_id: Option<&str>,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> Result<Self> {
        let user_id = user_id
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from);
        let start = start_date.filter(|s| !s.is_empty());
        let end = end_date.filter(|s| !s.is_empty());

        let (start_date, end_date) = match (start, end) {
            (Some(s), Some(e)) => (Some(parse_date(s)?), Some(parse_date(e)?)),
            _ => (None, None),
        };

        Ok(Self {
            user_id,
            start_date,
            end_date,
            limit: None,
        })
    }

    pub fn for_user(user_id: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
            ..Default::default()
        }
    }

    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// The inclusive date range, if both bounds are set
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        match (self.start_date, self.end_date) {
            (Some(s), Some(e)) => Some((s, e)),
            _ => None,
        }
    }
}

/// Parse a YYYY-MM-DD date
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).map_err(|_| Error::InvalidDate(s.to_string()))
}

/// Analysis domain that can be requested on its own
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Agent {
    Fitness,
    Sleep,
    Journal,
}

impl Agent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fitness => "fitness",
            Self::Sleep => "sleep",
            Self::Journal => "journal",
        }
    }
}

impl std::str::FromStr for Agent {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fitness" => Ok(Self::Fitness),
            "sleep" => Ok(Self::Sleep),
            "journal" => Ok(Self::Journal),
            _ => Err(Error::InvalidAgent(s.to_string())),
        }
    }
}

impl std::fmt::Display for Agent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Record counts for status reporting
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordCounts {
    pub metrics: i64,
    pub sleep: i64,
    pub journal: i64,
}
