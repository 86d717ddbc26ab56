//! Core types for the Insight Engine
//!
//! Every result type here is plain serde data so hosts can hand it straight
//! to a serializer.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Directional trend of a metric sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Increasing,
    Decreasing,
    /// Only a single observation
    Stable,
    /// No observations at all
    InsufficientData,
}

impl Trend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::Increasing => "increasing",
            Trend::Decreasing => "decreasing",
            Trend::Stable => "stable",
            Trend::InsufficientData => "insufficient_data",
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Trend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "increasing" => Ok(Trend::Increasing),
            "decreasing" => Ok(Trend::Decreasing),
            "stable" => Ok(Trend::Stable),
            "insufficient_data" => Ok(Trend::InsufficientData),
            _ => Err(format!("Unknown trend: {}", s)),
        }
    }
}

/// Fitness metrics that get trend analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Steps,
    HeartRate,
    Hrv,
}

impl Metric {
    pub const ALL: [Metric; 3] = [Metric::Steps, Metric::HeartRate, Metric::Hrv];

    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::Steps => "steps",
            Metric::HeartRate => "heart_rate",
            Metric::Hrv => "hrv",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Mood classification of a polarity score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Negative,
    Neutral,
    Positive,
}

impl Mood {
    /// Polarity above this is positive, below its negation is negative
    pub const THRESHOLD: f64 = 0.2;

    /// Classify a polarity score; the thresholds themselves are neutral
    pub fn from_polarity(score: f64) -> Self {
        if score < -Self::THRESHOLD {
            Mood::Negative
        } else if score > Self::THRESHOLD {
            Mood::Positive
        } else {
            Mood::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Negative => "negative",
            Mood::Neutral => "neutral",
            Mood::Positive => "positive",
        }
    }

    /// Title-cased label for narrative text
    pub fn label(&self) -> &'static str {
        match self {
            Mood::Negative => "Negative",
            Mood::Neutral => "Neutral",
            Mood::Positive => "Positive",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Trend analysis of a single metric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendResult {
    pub trend: Trend,
    /// Naive projection of the next value; `None` only for empty input
    pub next_prediction: Option<f64>,
    pub recommendation: String,
}

/// Trend analysis for every fitness metric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitnessInsight {
    pub steps_prediction: TrendResult,
    pub heart_rate_prediction: TrendResult,
    pub hrv_prediction: TrendResult,
}

impl FitnessInsight {
    pub fn get(&self, metric: Metric) -> &TrendResult {
        match metric {
            Metric::Steps => &self.steps_prediction,
            Metric::HeartRate => &self.heart_rate_prediction,
            Metric::Hrv => &self.hrv_prediction,
        }
    }
}

/// Averages over the sleep records in range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SleepInsight {
    pub average_duration: Option<f64>,
    pub average_quality: Option<f64>,
    /// `None` when sleep is long enough and of good quality
    pub recommendation: Option<String>,
}

/// Share of journal entries per mood class, in percent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentBreakdown {
    pub positive_percentage: f64,
    pub negative_percentage: f64,
    pub neutral_percentage: f64,
}

impl SentimentBreakdown {
    /// True when no entries were classified; shares always sum to 100 otherwise
    pub fn is_empty(&self) -> bool {
        self.positive_percentage == 0.0
            && self.negative_percentage == 0.0
            && self.neutral_percentage == 0.0
    }
}

/// Sentiment analysis of the journal entries in range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    /// Mean polarity in [-1, 1]
    pub average_sentiment: f64,
    pub overall_mood: Mood,
    pub sentiment_breakdown: SentimentBreakdown,
    pub emotional_keywords: BTreeSet<String>,
    pub recommendation: String,
}

/// Combined view across fitness, sleep and journal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HolisticInsight {
    pub fitness_insights: FitnessInsight,
    pub sleep_insights: SleepInsight,
    pub journal_sentiments: SentimentResult,
    /// Unweighted mean of the fitness, sleep and mood components, in [0, 100]
    pub wellness_score: f64,
    pub holistic_recommendation: String,
}

/// Result of an insight request, either one domain or the holistic view
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum InsightReport {
    Holistic(Box<HolisticInsight>),
    Fitness(FitnessInsight),
    Sleep(SleepInsight),
    Journal(SentimentResult),
}

/// Round to a fixed number of decimal places
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Render a float the way the dashboard always showed it: whole numbers keep
/// one decimal place ("50.0"), everything else prints its shortest form.
pub fn display_number(value: f64) -> String {
    if value.fract() == 0.0 && value.is_finite() {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mood_thresholds_are_exclusive() {
        assert_eq!(Mood::from_polarity(0.2), Mood::Neutral);
        assert_eq!(Mood::from_polarity(-0.2), Mood::Neutral);
        assert_eq!(Mood::from_polarity(0.21), Mood::Positive);
        assert_eq!(Mood::from_polarity(-0.21), Mood::Negative);
        assert_eq!(Mood::from_polarity(0.0), Mood::Neutral);
    }

    #[test]
    fn test_trend_serializes_snake_case() {
        let json = serde_json::to_string(&Trend::InsufficientData).unwrap();
        assert_eq!(json, "\"insufficient_data\"");
        assert_eq!("increasing".parse::<Trend>().unwrap(), Trend::Increasing);
        assert!("sideways".parse::<Trend>().is_err());
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(1650.0000000000002, 2), 1650.0);
        assert_eq!(round_to(33.333333, 2), 33.33);
        assert_eq!(round_to(0.123456, 4), 0.1235);
    }

    #[test]
    fn test_display_number() {
        assert_eq!(display_number(50.0), "50.0");
        assert_eq!(display_number(0.0), "0.0");
        assert_eq!(display_number(33.33), "33.33");
        assert_eq!(display_number(66.67), "66.67");
    }

    #[test]
    fn test_report_serializes_untagged() {
        let report = InsightReport::Sleep(SleepInsight {
            average_duration: None,
            average_quality: None,
            recommendation: None,
        });
        let json = serde_json::to_value(&report).unwrap();
        assert!(json.get("average_duration").unwrap().is_null());
        assert!(json.get("recommendation").unwrap().is_null());
    }
}
