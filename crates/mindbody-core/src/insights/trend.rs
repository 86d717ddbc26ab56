//! Trend Analyzer
//!
//! Compares the first and last observation of a metric sequence. Callers must
//! pass values in chronological order.

use super::lexicon::{metric_recommendation, INSUFFICIENT_DATA_RECOMMENDATION};
use super::types::{round_to, Metric, Trend, TrendResult};

/// Growth factor applied to the last value of a rising sequence
const RISING_PROJECTION: f64 = 1.1;

/// Decay factor applied to the last value of a falling sequence
const FALLING_PROJECTION: f64 = 0.9;

/// Direction of a sequence: first vs last, ties count as decreasing
pub fn detect_trend(values: &[f64]) -> Trend {
    match values {
        [] => Trend::InsufficientData,
        [_] => Trend::Stable,
        [first, .., last] => {
            if last > first {
                Trend::Increasing
            } else {
                Trend::Decreasing
            }
        }
    }
}

/// Analyze one metric sequence
pub fn analyze_trend(metric: Metric, values: &[f64]) -> TrendResult {
    let trend = detect_trend(values);

    let next_prediction = match (trend, values.last()) {
        (Trend::InsufficientData, _) | (_, None) => None,
        (Trend::Stable, Some(&last)) => Some(last),
        (Trend::Increasing, Some(&last)) => Some(round_to(last * RISING_PROJECTION, 2)),
        (Trend::Decreasing, Some(&last)) => Some(round_to(last * FALLING_PROJECTION, 2)),
    };

    let recommendation = if trend == Trend::InsufficientData {
        INSUFFICIENT_DATA_RECOMMENDATION
    } else {
        metric_recommendation(metric, trend)
    };

    TrendResult {
        trend,
        next_prediction,
        recommendation: recommendation.to_string(),
    }
}
