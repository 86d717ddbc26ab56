//! Recommendation lexicon
//!
//! Static advice tables keyed by metric and trend, sleep thresholds, mood and
//! fitness trend combinations. Every lookup has an explicit default arm.

use super::types::{Metric, Mood, Trend};

/// Returned for a metric with no observations
pub const INSUFFICIENT_DATA_RECOMMENDATION: &str = "Collect more data to gain insights";

/// Fallback for metric/trend pairs without specific advice
pub const DEFAULT_METRIC_RECOMMENDATION: &str = "Continue monitoring your health metrics.";

/// Returned when no sleep has been recorded
pub const NO_SLEEP_DATA_RECOMMENDATION: &str = "Start tracking your sleep to gain insights";

/// Returned when no journal entries have been written
pub const NO_JOURNAL_RECOMMENDATION: &str = "Start journaling to track emotional patterns";

/// Fallback holistic suggestion when no trend combination matches
pub const DEFAULT_HOLISTIC_SUGGESTION: &str = "Integrate holistic wellness practices: balanced nutrition, consistent sleep, mindful movement, and emotional self-care.";

/// Sleep shorter than this (hours) gets bedtime routine advice
pub const SHORT_SLEEP_HOURS: f64 = 6.0;

/// Sleep shorter than this (hours) gets quality optimization advice
pub const ADEQUATE_SLEEP_HOURS: f64 = 7.0;

/// Sleep quality below this (0-100) counts as poor
pub const POOR_SLEEP_QUALITY: f64 = 60.0;

/// Advice for a metric moving in a given direction
pub fn metric_recommendation(metric: Metric, trend: Trend) -> &'static str {
    match (metric, trend) {
        (Metric::Steps, Trend::Decreasing) => "Increase weekly activity by 10%. Suggested actions: walking meetings, taking stairs, or adding short walks.",
        (Metric::Steps, Trend::Increasing) => "Excellent progress! Maintain current activity level and gradually increase intensity.",
        (Metric::Steps, Trend::Stable) => "Personalized workout plan: Add variety to your routine to challenge different muscle groups.",
        (Metric::HeartRate, Trend::Decreasing) => "Your resting heart rate is improving. Continue your current fitness routine.",
        (Metric::HeartRate, Trend::Increasing) => "Monitor your stress levels and consider relaxation techniques.",
        (Metric::HeartRate, Trend::Stable) => "Your heart rate shows consistent patterns. Keep up your current health practices.",
        (Metric::Hrv, Trend::Decreasing) => "Low HRV might indicate stress. Focus on recovery and mindfulness.",
        (Metric::Hrv, Trend::Increasing) => "Your heart rate variability is improving. Great sign of fitness and stress management!",
        (Metric::Hrv, Trend::Stable) => "Your HRV indicates consistent stress management. Maintain your current practices.",
        (_, Trend::InsufficientData) => DEFAULT_METRIC_RECOMMENDATION,
    }
}

/// Advice for average sleep duration (hours) and quality (0-100)
///
/// Returns `None` when sleep is at least seven hours and quality is good:
/// there is nothing to recommend.
pub fn sleep_recommendation(avg_duration: f64, avg_quality: f64) -> Option<&'static str> {
    if avg_duration < SHORT_SLEEP_HOURS {
        Some("Increase sleep duration to 7-9 hours. Establish consistent bedtime routine: fixed sleep/wake times, relaxation techniques, limit screen time 1 hour before bed.")
    } else if avg_duration < ADEQUATE_SLEEP_HOURS {
        Some("Optimize sleep quality: Create sleep-friendly environment, reduce caffeine intake, practice evening relaxation methods.")
    } else if avg_quality < POOR_SLEEP_QUALITY {
        Some("Improve sleep quality: Use white noise, ensure dark room, maintain cool temperature, try meditation before sleep.")
    } else {
        None
    }
}

/// Opening sentences describing the overall mood
pub fn mood_templates(mood: Mood) -> &'static [&'static str] {
    match mood {
        Mood::Negative => &[
            "Emotional resilience opportunity detected.",
            "Navigating challenging emotional terrain.",
            "Potential emotional growth phase identified.",
        ],
        Mood::Neutral => &[
            "Emotional equilibrium observed.",
            "Steady emotional baseline maintained.",
            "Balanced emotional state detected.",
        ],
        Mood::Positive => &[
            "Emotional strength and optimism evident.",
            "Positive emotional momentum sustained.",
            "Robust emotional well-being observed.",
        ],
    }
}

/// Closing support suggestions for the overall mood
pub fn support_suggestions(mood: Mood) -> &'static [&'static str] {
    match mood {
        Mood::Negative => &[
            "Explore structured emotional support strategies.",
            "Implement targeted stress-reduction techniques.",
            "Consider professional emotional guidance.",
        ],
        Mood::Neutral => &[
            "Proactively engage in personal development.",
            "Explore mindfulness and self-awareness practices.",
            "Set intentional emotional growth objectives.",
        ],
        Mood::Positive => &[
            "Leverage emotional momentum for personal growth.",
            "Maintain practices supporting emotional resilience.",
            "Continue nurturing positive emotional habits.",
        ],
    }
}

/// Suggestion for an exact combination of (steps, heart rate, HRV) trends
pub fn holistic_suggestion(steps: Trend, heart_rate: Trend, hrv: Trend) -> &'static str {
    use Trend::{Decreasing, Increasing, Stable};

    match (steps, heart_rate, hrv) {
        (Decreasing, Increasing, Decreasing) => "Consider gentle recovery techniques, reduce workout intensity, and practice mindfulness to balance physiological stress.",
        (Decreasing, Stable, Stable) => "Implement progressive activity strategies, focus on gradual fitness improvements and consistent movement.",
        (Stable, Increasing, Decreasing) => "Prioritize stress management, incorporate relaxation practices, and monitor heart rate variability.",
        (Increasing, Decreasing, Increasing) => "Balance high-intensity activities with adequate recovery, emphasize sleep hygiene and stress reduction.",
        _ => DEFAULT_HOLISTIC_SUGGESTION,
    }
}
