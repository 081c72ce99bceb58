//! Keyword-weighted sentiment scoring for news text
//!
//! A headline is scanned against two fixed lexicons with case-insensitive
//! substring containment; each distinct lexicon keyword contributes its
//! weight at most once. Scoring never fails: arbitrary text, including the
//! empty string, produces a well-formed result.

mod lexicon;

use serde::{Deserialize, Serialize};

/// Default number of items the aggregator considers
pub const DEFAULT_AGGREGATE_CAP: usize = 5;

const SCORE_MIN: i32 = -100;
const SCORE_MAX: i32 = 100;

/// Discrete sentiment grade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SentimentLabel {
    VeryPositive,
    Positive,
    Neutral,
    Negative,
    VeryNegative,
}

impl SentimentLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::VeryPositive => "very_positive",
            Self::Positive => "positive",
            Self::Neutral => "neutral",
            Self::Negative => "negative",
            Self::VeryNegative => "very_negative",
        }
    }
}

/// Scored sentiment for a single text item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentResult {
    /// Weighted keyword sum, clamped to [-100, 100]
    pub score: i32,
    pub label: SentimentLabel,
    /// Positive lexicon keywords found in the text
    pub matched_positive: Vec<String>,
    /// Negative lexicon keywords found in the text
    pub matched_negative: Vec<String>,
}

/// Combined verdict over an ordered set of scored items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentSummary {
    /// Mean of the considered item scores, 0 when no items were considered
    pub average_score: f64,
    pub label: SentimentLabel,
    pub positive_count: usize,
    pub negative_count: usize,
    pub neutral_count: usize,
}

/// Score one text item against the fixed lexicons.
///
/// Keywords are matched independently: a text containing both "rise" and
/// "rises" counts both entries. That double-count mirrors the scoring
/// behavior this engine reproduces and is deliberately not deduplicated.
pub fn score_text(text: &str) -> SentimentResult {
    let lowered = text.to_lowercase();

    let mut score = 0i32;
    let mut matched_positive = Vec::new();
    let mut matched_negative = Vec::new();

    for &(keyword, weight) in lexicon::POSITIVE {
        if lowered.contains(keyword) {
            score += weight;
            matched_positive.push(keyword.to_string());
        }
    }
    for &(keyword, weight) in lexicon::NEGATIVE {
        if lowered.contains(keyword) {
            // weights in the negative lexicon are already negative
            score += weight;
            matched_negative.push(keyword.to_string());
        }
    }

    let score = score.clamp(SCORE_MIN, SCORE_MAX);
    SentimentResult {
        score,
        label: item_label(score),
        matched_positive,
        matched_negative,
    }
}

/// Combine item results into an overall verdict, considering at most the
/// first `cap` items. Input order is preserved; callers are expected to pass
/// items in relevance/recency order.
pub fn aggregate(results: &[SentimentResult], cap: usize) -> SentimentSummary {
    let considered = &results[..results.len().min(cap)];
    if considered.is_empty() {
        return SentimentSummary {
            average_score: 0.0,
            label: SentimentLabel::Neutral,
            positive_count: 0,
            negative_count: 0,
            neutral_count: 0,
        };
    }

    let total: i32 = considered.iter().map(|r| r.score).sum();
    let average_score = f64::from(total) / considered.len() as f64;

    let positive_count = considered.iter().filter(|r| r.score > 0).count();
    let negative_count = considered.iter().filter(|r| r.score < 0).count();
    let neutral_count = considered.len() - positive_count - negative_count;

    SentimentSummary {
        average_score,
        label: overall_label(average_score),
        positive_count,
        negative_count,
        neutral_count,
    }
}

/// Single-item thresholds: +/-20 for the strong grades, +/-5 for the mild ones
fn item_label(score: i32) -> SentimentLabel {
    if score >= 20 {
        SentimentLabel::VeryPositive
    } else if score >= 5 {
        SentimentLabel::Positive
    } else if score <= -20 {
        SentimentLabel::VeryNegative
    } else if score <= -5 {
        SentimentLabel::Negative
    } else {
        SentimentLabel::Neutral
    }
}

/// Aggregate thresholds are tighter on the strong grades (+/-15)
fn overall_label(average: f64) -> SentimentLabel {
    if average >= 15.0 {
        SentimentLabel::VeryPositive
    } else if average >= 5.0 {
        SentimentLabel::Positive
    } else if average <= -15.0 {
        SentimentLabel::VeryNegative
    } else if average <= -5.0 {
        SentimentLabel::Negative
    } else {
        SentimentLabel::Neutral
    }
}
