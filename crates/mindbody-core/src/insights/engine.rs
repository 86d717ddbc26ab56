//! Insight Engine - runs the per-domain analyzers and fuses their results

use std::sync::Arc;

use tracing::debug;

use crate::models::{Agent, JournalRecord, MetricRecord, SleepRecord};

use super::lexicon::{holistic_suggestion, sleep_recommendation, NO_SLEEP_DATA_RECOMMENDATION};
use super::phrasing::{PhraseChooser, RandomChooser};
use super::sentiment::{LexiconScorer, PolarityScorer, SentimentClassifier};
use super::trend::analyze_trend;
use super::types::{
    display_number, round_to, FitnessInsight, HolisticInsight, InsightReport, Metric, Mood,
    SentimentResult, SleepInsight, Trend,
};

/// Fitness component of the wellness score when steps are rising
const ACTIVE_FITNESS_SCORE: f64 = 70.0;

/// Fitness component of the wellness score otherwise
const INACTIVE_FITNESS_SCORE: f64 = 30.0;

/// Sleep component of the wellness score without sleep data
const DEFAULT_SLEEP_SCORE: f64 = 50.0;

/// Sleep quality (0-100) below this is flagged in the holistic summary
const SLEEP_QUALITY_CONCERN: f64 = 60.0;

/// Mood component of the wellness score
fn mood_score(mood: Mood) -> f64 {
    match mood {
        Mood::Negative => 30.0,
        Mood::Neutral => 50.0,
        Mood::Positive => 70.0,
    }
}

/// Computes wellness insights from already-filtered, date-ordered records
///
/// The engine holds no per-call state; one instance can be shared across
/// threads and requests.
#[derive(Clone)]
pub struct InsightEngine {
    classifier: SentimentClassifier,
    chooser: Arc<dyn PhraseChooser>,
}

impl Default for InsightEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl InsightEngine {
    /// Engine with the lexicon scorer and random phrasing
    pub fn new() -> Self {
        Self::with_components(Arc::new(LexiconScorer), Arc::new(RandomChooser))
    }

    /// Engine with the lexicon scorer and the given phrase chooser
    pub fn with_chooser(chooser: Arc<dyn PhraseChooser>) -> Self {
        Self::with_components(Arc::new(LexiconScorer), chooser)
    }

    pub fn with_components(
        scorer: Arc<dyn PolarityScorer>,
        chooser: Arc<dyn PhraseChooser>,
    ) -> Self {
        Self {
            classifier: SentimentClassifier::new(scorer),
            chooser,
        }
    }

    /// Trend analysis of steps, heart rate and HRV
    pub fn fitness_insights(&self, metrics: &[MetricRecord]) -> FitnessInsight {
        let series = |metric: Metric| -> Vec<f64> {
            metrics
                .iter()
                .map(|m| match metric {
                    Metric::Steps => m.steps as f64,
                    Metric::HeartRate => m.heart_rate as f64,
                    Metric::Hrv => m.hrv as f64,
                })
                .collect()
        };

        let insight = FitnessInsight {
            steps_prediction: analyze_trend(Metric::Steps, &series(Metric::Steps)),
            heart_rate_prediction: analyze_trend(Metric::HeartRate, &series(Metric::HeartRate)),
            hrv_prediction: analyze_trend(Metric::Hrv, &series(Metric::Hrv)),
        };

        debug!(
            records = metrics.len(),
            steps = insight.steps_prediction.trend.as_str(),
            heart_rate = insight.heart_rate_prediction.trend.as_str(),
            hrv = insight.hrv_prediction.trend.as_str(),
            "Fitness insights computed"
        );

        insight
    }

    /// Average sleep duration and quality with advice
    pub fn sleep_insights(&self, sleep: &[SleepRecord]) -> SleepInsight {
        if sleep.is_empty() {
            return SleepInsight {
                average_duration: None,
                average_quality: None,
                recommendation: Some(NO_SLEEP_DATA_RECOMMENDATION.to_string()),
            };
        }

        let count = sleep.len() as f64;
        let avg_duration = sleep.iter().map(|s| s.duration).sum::<f64>() / count;
        let avg_quality = sleep.iter().map(|s| s.sleep_quality).sum::<f64>() / count;

        debug!(
            records = sleep.len(),
            avg_duration, avg_quality, "Sleep insights computed"
        );

        SleepInsight {
            average_duration: Some(round_to(avg_duration, 2)),
            average_quality: Some(round_to(avg_quality, 2)),
            recommendation: sleep_recommendation(avg_duration, avg_quality).map(String::from),
        }
    }

    /// Sentiment analysis of journal entries
    pub fn journal_sentiments(&self, journal: &[JournalRecord]) -> SentimentResult {
        let entries: Vec<&str> = journal.iter().map(|j| j.entry.as_str()).collect();
        let result = self.classifier.analyze(&entries, self.chooser.as_ref());

        debug!(
            records = journal.len(),
            mood = result.overall_mood.as_str(),
            average = result.average_sentiment,
            "Journal sentiments computed"
        );

        result
    }

    /// All three domains plus the wellness score and holistic narrative
    pub fn holistic_insights(
        &self,
        metrics: &[MetricRecord],
        sleep: &[SleepRecord],
        journal: &[JournalRecord],
    ) -> HolisticInsight {
        let fitness_insights = self.fitness_insights(metrics);
        let sleep_insights = self.sleep_insights(sleep);
        let journal_sentiments = self.journal_sentiments(journal);

        let holistic_recommendation =
            holistic_recommendation(&fitness_insights, &sleep_insights, &journal_sentiments);
        let wellness_score = wellness_score(&fitness_insights, &sleep_insights, &journal_sentiments);

        debug!(wellness_score, "Holistic insights computed");

        HolisticInsight {
            fitness_insights,
            sleep_insights,
            journal_sentiments,
            wellness_score,
            holistic_recommendation,
        }
    }

    /// Insights for one domain, or the holistic view when no agent is given
    pub fn insights_for(
        &self,
        agent: Option<Agent>,
        metrics: &[MetricRecord],
        sleep: &[SleepRecord],
        journal: &[JournalRecord],
    ) -> InsightReport {
        match agent {
            Some(Agent::Fitness) => InsightReport::Fitness(self.fitness_insights(metrics)),
            Some(Agent::Sleep) => InsightReport::Sleep(self.sleep_insights(sleep)),
            Some(Agent::Journal) => InsightReport::Journal(self.journal_sentiments(journal)),
            None => InsightReport::Holistic(Box::new(self.holistic_insights(
                metrics, sleep, journal,
            ))),
        }
    }
}

/// Unweighted mean of the fitness, sleep and mood components, in [0, 100]
///
/// Only the steps trend feeds the fitness component; heart rate and HRV
/// trends do not affect the score.
pub fn wellness_score(
    fitness: &FitnessInsight,
    sleep: &SleepInsight,
    journal: &SentimentResult,
) -> f64 {
    let fitness_component = if fitness.steps_prediction.trend == Trend::Increasing {
        ACTIVE_FITNESS_SCORE
    } else {
        INACTIVE_FITNESS_SCORE
    };
    let sleep_component = sleep
        .average_quality
        .map(|q| q.clamp(0.0, 100.0))
        .unwrap_or(DEFAULT_SLEEP_SCORE);
    let mood_component = mood_score(journal.overall_mood);

    round_to(
        (fitness_component + sleep_component + mood_component) / 3.0,
        2,
    )
}

/// Narrative combining trend words, sleep quality, mood and a suggestion
pub fn holistic_recommendation(
    fitness: &FitnessInsight,
    sleep: &SleepInsight,
    journal: &SentimentResult,
) -> String {
    let steps = fitness.steps_prediction.trend;
    let heart_rate = fitness.heart_rate_prediction.trend;
    let hrv = fitness.hrv_prediction.trend;

    let fitness_line = format!(
        "Fitness Dynamics: Steps {}, Heart Rate {}, HRV {}.",
        steps, heart_rate, hrv
    );

    let sleep_line = match sleep.average_quality {
        Some(quality) => format!(
            "Sleep Quality: {}% - {}.",
            display_number(quality),
            if quality < SLEEP_QUALITY_CONCERN {
                "Needs Improvement"
            } else {
                "Stable"
            }
        ),
        None => "Sleep Quality: No Data - Start Tracking.".to_string(),
    };

    // An empty journal reports a bare "0%"
    let positive = if journal.sentiment_breakdown.is_empty() {
        "0".to_string()
    } else {
        display_number(journal.sentiment_breakdown.positive_percentage)
    };
    let mood_line = format!(
        "Emotional Landscape: {} mood, {}% positive entries.",
        journal.overall_mood.label(),
        positive
    );

    format!(
        "{} {} {} {}",
        fitness_line,
        sleep_line,
        mood_line,
        holistic_suggestion(steps, heart_rate, hrv)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insights::lexicon::{DEFAULT_HOLISTIC_SUGGESTION, NO_JOURNAL_RECOMMENDATION};
    use crate::insights::phrasing::SequenceChooser;
    use chrono::{NaiveDate, Utc};

    fn day(n: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, n).unwrap()
    }

    fn metric(n: u32, steps: i64, heart_rate: i64, hrv: i64) -> MetricRecord {
        MetricRecord {
            id: n as i64,
            user_id: "user1".to_string(),
            date: day(n),
            steps,
            heart_rate,
            sleep_hours: 7.0,
            hrv,
            created_at: Utc::now(),
        }
    }

    fn sleep(n: u32, duration: f64, quality: f64) -> SleepRecord {
        SleepRecord {
            id: n as i64,
            user_id: "user1".to_string(),
            date: day(n),
            duration,
            disturbances: 1,
            sleep_quality: quality,
            created_at: Utc::now(),
        }
    }

    fn journal(n: u32, entry: &str) -> JournalRecord {
        JournalRecord {
            id: n as i64,
            user_id: "user1".to_string(),
            date: day(n),
            entry: entry.to_string(),
            created_at: Utc::now(),
        }
    }

    fn engine() -> InsightEngine {
        InsightEngine::with_chooser(Arc::new(SequenceChooser::first()))
    }

    #[test]
    fn test_fitness_insights_per_metric() {
        let metrics = vec![
            metric(1, 1000, 70, 40),
            metric(2, 1200, 72, 38),
            metric(3, 1500, 75, 35),
        ];
        let insight = engine().fitness_insights(&metrics);

        assert_eq!(insight.steps_prediction.trend, Trend::Increasing);
        assert_eq!(insight.steps_prediction.next_prediction, Some(1650.0));
        assert_eq!(insight.heart_rate_prediction.trend, Trend::Increasing);
        assert_eq!(insight.hrv_prediction.trend, Trend::Decreasing);
        assert_eq!(insight.hrv_prediction.next_prediction, Some(31.5));
        assert_eq!(insight.get(Metric::Hrv), &insight.hrv_prediction);
    }

    #[test]
    fn test_fitness_insights_empty() {
        let insight = engine().fitness_insights(&[]);
        for metric in Metric::ALL {
            assert_eq!(insight.get(metric).trend, Trend::InsufficientData);
            assert_eq!(insight.get(metric).next_prediction, None);
        }
    }

    #[test]
    fn test_sleep_insights_short_sleep() {
        let records = vec![sleep(1, 5.0, 50.0), sleep(2, 5.5, 55.0)];
        let insight = engine().sleep_insights(&records);

        assert_eq!(insight.average_duration, Some(5.25));
        assert_eq!(insight.average_quality, Some(52.5));
        assert!(insight
            .recommendation
            .unwrap()
            .starts_with("Increase sleep duration to 7-9 hours."));
    }

    #[test]
    fn test_sleep_insights_good_sleep_has_no_advice() {
        let records = vec![sleep(1, 8.0, 80.0), sleep(2, 7.5, 90.0)];
        let insight = engine().sleep_insights(&records);
        assert_eq!(insight.average_duration, Some(7.75));
        assert_eq!(insight.average_quality, Some(85.0));
        assert_eq!(insight.recommendation, None);
    }

    #[test]
    fn test_sleep_insights_empty() {
        let insight = engine().sleep_insights(&[]);
        assert_eq!(insight.average_duration, None);
        assert_eq!(insight.average_quality, None);
        assert_eq!(
            insight.recommendation.as_deref(),
            Some(NO_SLEEP_DATA_RECOMMENDATION)
        );
    }

    #[test]
    fn test_wellness_score_components() {
        let e = engine();
        let fitness = e.fitness_insights(&[metric(1, 1000, 70, 40), metric(2, 2000, 60, 50)]);
        let sleep_insight = e.sleep_insights(&[sleep(1, 8.0, 80.0)]);
        let mut journal_result = e.journal_sentiments(&[]);

        // 70 (steps up) + 80 (quality) + 50 (neutral)
        assert_eq!(
            wellness_score(&fitness, &sleep_insight, &journal_result),
            66.67
        );

        journal_result.overall_mood = Mood::Positive;
        assert_eq!(
            wellness_score(&fitness, &sleep_insight, &journal_result),
            73.33
        );
    }

    #[test]
    fn test_wellness_score_ignores_heart_rate_and_hrv() {
        let e = engine();
        let sleep_insight = e.sleep_insights(&[]);
        let journal_result = e.journal_sentiments(&[]);

        let a = e.fitness_insights(&[metric(1, 5000, 60, 30), metric(2, 4000, 80, 20)]);
        let b = e.fitness_insights(&[metric(1, 5000, 80, 20), metric(2, 4000, 60, 30)]);

        // 30 (steps down) + 50 (no sleep) + 50 (neutral)
        assert_eq!(wellness_score(&a, &sleep_insight, &journal_result), 43.33);
        assert_eq!(
            wellness_score(&a, &sleep_insight, &journal_result),
            wellness_score(&b, &sleep_insight, &journal_result)
        );
    }

    #[test]
    fn test_wellness_score_clamps_sleep_quality() {
        let e = engine();
        let fitness = e.fitness_insights(&[]);
        let journal_result = e.journal_sentiments(&[]);
        let sleep_insight = SleepInsight {
            average_duration: Some(8.0),
            average_quality: Some(140.0),
            recommendation: None,
        };
        // 30 + 100 + 50
        assert_eq!(wellness_score(&fitness, &sleep_insight, &journal_result), 60.0);
    }

    #[test]
    fn test_wellness_score_zero_sleep_quality_counts() {
        let e = engine();
        let insight = e.holistic_insights(&[metric(1, 5000, 60, 50)], &[sleep(1, 8.0, 0.0)], &[]);
        assert_eq!(insight.sleep_insights.average_quality, Some(0.0));
        // 30 + 0 + 50; a recorded zero is not treated as missing data
        assert_eq!(insight.wellness_score, 26.67);
        assert!(insight
            .holistic_recommendation
            .contains("Sleep Quality: 0.0% - Needs Improvement."));
    }

    #[test]
    fn test_holistic_positive_share_format() {
        let e = engine();
        let metrics = vec![metric(1, 5000, 60, 50)];

        let empty = e.holistic_insights(&metrics, &[], &[]);
        assert!(empty
            .holistic_recommendation
            .contains("Neutral mood, 0% positive entries."));

        // Entries exist but none are positive
        let gloomy = e.holistic_insights(&metrics, &[], &[journal(1, "terrible awful day")]);
        assert_eq!(
            gloomy.journal_sentiments.sentiment_breakdown.positive_percentage,
            0.0
        );
        assert!(gloomy
            .holistic_recommendation
            .contains("mood, 0.0% positive entries."));
    }

    #[test]
    fn test_holistic_recommendation_lines() {
        let e = engine();
        let metrics = vec![metric(1, 9000, 60, 50), metric(2, 7000, 66, 44)];
        let sleep_records = vec![sleep(1, 7.5, 55.0)];
        let insight = e.holistic_insights(&metrics, &sleep_records, &[]);

        assert_eq!(
            insight.holistic_recommendation,
            format!(
                "Fitness Dynamics: Steps decreasing, Heart Rate increasing, HRV decreasing. \
                 Sleep Quality: 55.0% - Needs Improvement. \
                 Emotional Landscape: Neutral mood, 0% positive entries. {}",
                holistic_suggestion(Trend::Decreasing, Trend::Increasing, Trend::Decreasing)
            )
        );
        // 30 + 55 + 50
        assert_eq!(insight.wellness_score, 45.0);
        assert_eq!(
            insight.journal_sentiments.recommendation,
            NO_JOURNAL_RECOMMENDATION
        );
    }

    #[test]
    fn test_holistic_without_sleep_data() {
        let e = engine();
        let insight = e.holistic_insights(&[metric(1, 5000, 60, 50)], &[], &[]);
        assert_eq!(
            insight.holistic_recommendation,
            format!(
                "Fitness Dynamics: Steps stable, Heart Rate stable, HRV stable. \
                 Sleep Quality: No Data - Start Tracking. \
                 Emotional Landscape: Neutral mood, 0% positive entries. {}",
                DEFAULT_HOLISTIC_SUGGESTION
            )
        );
        assert_eq!(insight.wellness_score, 43.33);
    }

    #[test]
    fn test_holistic_narrative_is_deterministic() {
        let metrics = vec![metric(1, 1000, 70, 40), metric(2, 1500, 65, 45)];
        let sleep_records = vec![sleep(1, 7.0, 75.0)];
        let journal_records = vec![
            journal(1, "I feel happy and calm"),
            journal(2, "a wonderful productive day"),
        ];

        let a = InsightEngine::with_chooser(Arc::new(SequenceChooser::new(vec![0])))
            .holistic_insights(&metrics, &sleep_records, &journal_records);
        let b = InsightEngine::with_chooser(Arc::new(SequenceChooser::new(vec![2])))
            .holistic_insights(&metrics, &sleep_records, &journal_records);

        assert_eq!(a.holistic_recommendation, b.holistic_recommendation);
        assert_eq!(a.wellness_score, b.wellness_score);
        assert_ne!(
            a.journal_sentiments.recommendation,
            b.journal_sentiments.recommendation
        );
        assert!(a
            .holistic_recommendation
            .contains("Emotional Landscape: Positive mood, 100.0% positive entries."));
        // 70 + 75 + 70
        assert_eq!(a.wellness_score, 71.67);
    }

    #[test]
    fn test_insights_for_agent() {
        let e = engine();
        let metrics = vec![metric(1, 1000, 70, 40)];
        let sleep_records = vec![sleep(1, 6.5, 70.0)];
        let journal_records = vec![journal(1, "calm")];

        match e.insights_for(Some(Agent::Fitness), &metrics, &sleep_records, &journal_records) {
            InsightReport::Fitness(f) => assert_eq!(f.steps_prediction.trend, Trend::Stable),
            other => panic!("unexpected report: {:?}", other),
        }
        match e.insights_for(Some(Agent::Sleep), &metrics, &sleep_records, &journal_records) {
            InsightReport::Sleep(s) => assert_eq!(s.average_duration, Some(6.5)),
            other => panic!("unexpected report: {:?}", other),
        }
        match e.insights_for(Some(Agent::Journal), &metrics, &sleep_records, &journal_records) {
            InsightReport::Journal(j) => assert!(j.emotional_keywords.contains("calm")),
            other => panic!("unexpected report: {:?}", other),
        }
        assert!(matches!(
            e.insights_for(None, &metrics, &sleep_records, &journal_records),
            InsightReport::Holistic(_)
        ));
    }

    #[test]
    fn test_wellness_score_within_bounds() {
        let e = engine();
        let moods = ["wonderful happy", "terrible awful", "plain"];
        for steps in [[100, 200], [200, 100]] {
            for quality in [0.0, 45.0, 100.0] {
                for text in moods {
                    let insight = e.holistic_insights(
                        &[metric(1, steps[0], 60, 40), metric(2, steps[1], 60, 40)],
                        &[sleep(1, 7.0, quality)],
                        &[journal(1, text)],
                    );
                    assert!((0.0..=100.0).contains(&insight.wellness_score));
                }
            }
        }
    }
}
