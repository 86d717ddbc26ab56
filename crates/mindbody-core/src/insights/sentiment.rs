//! Sentiment Classifier
//!
//! Scores journal text polarity, classifies the overall mood and pulls out
//! emotional keywords. Polarity scoring is pluggable via [`PolarityScorer`];
//! [`LexiconScorer`] is the built-in rule-based scorer.

use std::collections::BTreeSet;
use std::sync::{Arc, OnceLock};

use regex::Regex;

use super::lexicon::{mood_templates, support_suggestions, NO_JOURNAL_RECOMMENDATION};
use super::phrasing::PhraseChooser;
use super::types::{display_number, round_to, Mood, SentimentBreakdown, SentimentResult};

/// Words counted as emotional themes (matched case-insensitively)
pub const EMOTIONAL_KEYWORDS: [&str; 10] = [
    "stress",
    "happy",
    "sad",
    "anxiety",
    "excited",
    "worry",
    "joy",
    "frustrated",
    "calm",
    "overwhelmed",
];

/// How many themes the mood recommendation mentions
const TOP_KEYWORDS: usize = 3;

/// Scores the polarity of a piece of text
pub trait PolarityScorer: Send + Sync {
    /// Polarity in [-1, 1]: negative to positive
    fn polarity(&self, text: &str) -> f64;
}

/// Rule-based scorer over a small wellness-oriented word lexicon
///
/// Each lexicon word contributes its polarity. A preceding intensifier
/// ("very", "so") scales it, a preceding negation ("not", "never", "don't")
/// flips and halves it. The text score is the mean of all contributions.
#[derive(Debug, Default, Clone, Copy)]
pub struct LexiconScorer;

impl LexiconScorer {
    pub fn new() -> Self {
        Self
    }
}

fn token_regex() -> &'static Regex {
    static TOKEN_RE: OnceLock<Regex> = OnceLock::new();
    TOKEN_RE.get_or_init(|| Regex::new(r"[a-z]+(?:'[a-z]+)?").expect("valid regex"))
}

fn word_polarity(word: &str) -> Option<f64> {
    let score = match word {
        // Positive
        "happy" | "joy" | "joyful" | "great" | "cheerful" => 0.8,
        "wonderful" | "excellent" | "awesome" | "best" | "perfect" => 1.0,
        "good" | "loved" | "delighted" => 0.7,
        "excited" | "amazing" | "grateful" | "thankful" | "proud" | "nice" => 0.6,
        "love" | "relaxed" | "peaceful" | "glad" | "better" | "hopeful" | "refreshed"
        | "energized" | "energetic" | "motivated" | "enjoyed" | "accomplished"
        | "optimistic" => 0.5,
        "productive" | "rested" | "content" | "fantastic" | "strong" | "confident" => 0.4,
        "calm" | "fun" | "fine" | "okay" => 0.3,
        // Negative
        "terrible" | "awful" | "horrible" | "worst" => -1.0,
        "miserable" => -0.9,
        "hopeless" => -0.8,
        "frustrated" | "bad" | "depressed" | "sick" | "painful" => -0.7,
        "stressed" | "stressful" | "anxiety" | "overwhelmed" | "exhausted" | "frustrating"
        | "worse" | "unhappy" => -0.6,
        "sad" | "stress" | "anxious" | "worried" | "angry" | "upset" | "lonely" | "pain"
        | "difficult" | "irritable" | "drained" | "scared" | "afraid" | "boring" => -0.5,
        "worry" | "tired" | "nervous" | "restless" => -0.4,
        "hard" => -0.3,
        _ => return None,
    };
    Some(score)
}

fn intensity(word: &str) -> Option<f64> {
    let factor = match word {
        "extremely" | "incredibly" => 1.5,
        "very" | "really" | "so" | "super" | "totally" => 1.3,
        "too" => 1.2,
        "much" | "quite" => 1.1,
        "somewhat" => 0.7,
        "slightly" | "bit" => 0.5,
        _ => return None,
    };
    Some(factor)
}

fn is_negation(word: &str) -> bool {
    matches!(
        word,
        "not" | "no" | "never" | "nothing" | "hardly" | "barely" | "without" | "neither" | "nor"
    ) || word.ends_with("n't")
}

impl PolarityScorer for LexiconScorer {
    fn polarity(&self, text: &str) -> f64 {
        let lowered = text.to_lowercase();
        let mut scores = Vec::new();
        let mut negated = false;
        let mut factor = 1.0;

        for token in token_regex().find_iter(&lowered).map(|m| m.as_str()) {
            if is_negation(token) {
                negated = true;
                continue;
            }
            if let Some(f) = intensity(token) {
                factor *= f;
                continue;
            }
            if let Some(p) = word_polarity(token) {
                let mut score = p * factor;
                if negated {
                    score *= -0.5;
                }
                scores.push(score.clamp(-1.0, 1.0));
            }
            negated = false;
            factor = 1.0;
        }

        if scores.is_empty() {
            return 0.0;
        }
        (scores.iter().sum::<f64>() / scores.len() as f64).clamp(-1.0, 1.0)
    }
}

/// Number of entries in each mood class
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SentimentTally {
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
}

impl SentimentTally {
    pub fn from_scores(scores: &[f64]) -> Self {
        let mut tally = Self::default();
        for &score in scores {
            match Mood::from_polarity(score) {
                Mood::Positive => tally.positive += 1,
                Mood::Negative => tally.negative += 1,
                Mood::Neutral => tally.neutral += 1,
            }
        }
        tally
    }

    pub fn total(&self) -> usize {
        self.positive + self.negative + self.neutral
    }

    /// Percentages rounded independently, so they may not sum to exactly 100
    pub fn breakdown(&self) -> SentimentBreakdown {
        let total = self.total();
        if total == 0 {
            return SentimentBreakdown {
                positive_percentage: 0.0,
                negative_percentage: 0.0,
                neutral_percentage: 100.0,
            };
        }
        let pct = |count: usize| round_to(count as f64 / total as f64 * 100.0, 2);
        SentimentBreakdown {
            positive_percentage: pct(self.positive),
            negative_percentage: pct(self.negative),
            neutral_percentage: pct(self.neutral),
        }
    }
}

/// Emotional keywords in `text`, in order of appearance
///
/// Splits on whitespace only, so "stress." does not match "stress".
pub fn extract_keywords(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(str::to_lowercase)
        .filter(|word| EMOTIONAL_KEYWORDS.contains(&word.as_str()))
        .collect()
}

/// The `n` most frequent keywords, ties broken by first appearance
pub fn top_keywords(keywords: &[String], n: usize) -> Vec<&str> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for keyword in keywords {
        match counts.iter_mut().find(|(k, _)| *k == keyword.as_str()) {
            Some((_, count)) => *count += 1,
            None => counts.push((keyword.as_str(), 1)),
        }
    }
    // Stable sort keeps first-seen order among equal counts
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.into_iter().take(n).map(|(k, _)| k).collect()
}

/// Narrative recommendation for the journal mood
pub fn mood_recommendation(
    mood: Mood,
    breakdown: &SentimentBreakdown,
    keywords: &[String],
    chooser: &dyn PhraseChooser,
) -> String {
    let base = chooser.pick(mood_templates(mood));
    let support = chooser.pick(support_suggestions(mood));

    let composition = format!(
        "Emotional Composition: {}% positive, {}% negative entries. ",
        display_number(breakdown.positive_percentage),
        display_number(breakdown.negative_percentage)
    );

    let themes = if keywords.is_empty() {
        String::new()
    } else {
        format!(
            "Emotional Themes: {}. ",
            top_keywords(keywords, TOP_KEYWORDS).join(", ")
        )
    };

    format!("{} {}{}{}", base, composition, themes, support)
}

/// Classifies a sequence of journal entries
#[derive(Clone)]
pub struct SentimentClassifier {
    scorer: Arc<dyn PolarityScorer>,
}

impl SentimentClassifier {
    pub fn new(scorer: Arc<dyn PolarityScorer>) -> Self {
        Self { scorer }
    }

    /// Result for an empty journal
    pub fn empty_result() -> SentimentResult {
        SentimentResult {
            average_sentiment: 0.0,
            overall_mood: Mood::Neutral,
            sentiment_breakdown: SentimentTally::default().breakdown(),
            emotional_keywords: BTreeSet::new(),
            recommendation: NO_JOURNAL_RECOMMENDATION.to_string(),
        }
    }

    /// Analyze entries in the order given
    pub fn analyze<S: AsRef<str>>(
        &self,
        entries: &[S],
        chooser: &dyn PhraseChooser,
    ) -> SentimentResult {
        if entries.is_empty() {
            return Self::empty_result();
        }

        let mut scores = Vec::with_capacity(entries.len());
        let mut keywords = Vec::new();
        for entry in entries {
            let text = entry.as_ref();
            scores.push(self.scorer.polarity(text).clamp(-1.0, 1.0));
            keywords.extend(extract_keywords(text));
        }

        let tally = SentimentTally::from_scores(&scores);
        let breakdown = tally.breakdown();
        let average = scores.iter().sum::<f64>() / scores.len() as f64;
        let overall_mood = Mood::from_polarity(average);

        let recommendation = mood_recommendation(overall_mood, &breakdown, &keywords, chooser);

        SentimentResult {
            average_sentiment: round_to(average, 4),
            overall_mood,
            sentiment_breakdown: breakdown,
            emotional_keywords: keywords.into_iter().collect(),
            recommendation,
        }
    }
}

impl Default for SentimentClassifier {
    fn default() -> Self {
        Self::new(Arc::new(LexiconScorer))
    }
}
