//! Insight Engine - Wellness Insights
//!
//! Turns raw fitness metrics, sleep records and journal entries into trend
//! analyses, a journal sentiment summary, a blended wellness score and
//! narrative recommendations.
//!
//! ## Components
//!
//! - **Trend Analyzer** - Direction and naive projection of one metric
//! - **Recommendation Lexicon** - Static advice tables
//! - **Sentiment Classifier** - Journal polarity, mood and emotional keywords
//! - **Insight Engine** - Runs the analyzers per domain and fuses the results
//!
//! Everything here is synchronous and pure apart from phrase selection, which
//! goes through an injected [`PhraseChooser`].
//!
//! ## Usage
//!
//! ```rust,ignore
//! use mindbody_core::insights::InsightEngine;
//!
//! let engine = InsightEngine::new();
//! let insight = engine.holistic_insights(&metrics, &sleep, &journal);
//! println!("{}", insight.wellness_score);
//! ```

pub mod engine;
pub mod lexicon;
pub mod phrasing;
pub mod sentiment;
pub mod trend;
pub mod types;

pub use engine::{holistic_recommendation, wellness_score, InsightEngine};
pub use phrasing::{PhraseChooser, RandomChooser, SeededChooser, SequenceChooser};
pub use sentiment::{LexiconScorer, PolarityScorer, SentimentClassifier, SentimentTally};
pub use trend::{analyze_trend, detect_trend};
pub use types::{
    FitnessInsight, HolisticInsight, InsightReport, Metric, Mood, SentimentBreakdown,
    SentimentResult, SleepInsight, Trend, TrendResult,
};
