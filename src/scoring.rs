use crate::buckets::SentimentBucket;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::ops::RangeInclusive;

/// Domains whose quotes are accepted from external lookups.
pub const TRUSTED_SOURCES: &[&str] = &[
    "realsimple.com",
    "goodhousekeeping.com",
    "prevention.com",
    "psychcentral.com",
    "thedepressionproject.com",
    "parade.com",
];

const SENTIMENT_WEIGHT: f64 = 3.0;
const TRUST_WEIGHT: f64 = 2.0;
const LENGTH_WEIGHT: f64 = 1.0;
const SHARED_WORD_WEIGHT: f64 = 0.5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HintCandidate {
    pub text: String,
    pub attribution: String,
    pub source: Option<String>,
    pub url: Option<String>,
    #[serde(default)]
    pub relevance: f64,
}

pub fn is_trusted(domain: &str) -> bool {
    TRUSTED_SOURCES
        .iter()
        .any(|trusted| domain == *trusted || domain.ends_with(&format!(".{trusted}")))
}

/// Fraction of the bucket's sentiment words that occur in `text`.
pub fn sentiment_match(text: &str, bucket: &SentimentBucket) -> f64 {
    if bucket.sentiment_words.is_empty() {
        return 0.0;
    }
    let lower = text.to_lowercase();
    let hits = bucket
        .sentiment_words
        .iter()
        .filter(|word| lower.contains(*word))
        .count();
    hits as f64 / bucket.sentiment_words.len() as f64
}

pub fn relevance(
    candidate: &HintCandidate,
    bucket: &SentimentBucket,
    note: &str,
    preferred_length: &RangeInclusive<usize>,
) -> f64 {
    let mut score = sentiment_match(&candidate.text, bucket) * SENTIMENT_WEIGHT;

    if candidate.source.as_deref().is_some_and(is_trusted) {
        score += TRUST_WEIGHT;
    }

    if preferred_length.contains(&candidate.text.chars().count()) {
        score += LENGTH_WEIGHT;
    }

    if !note.trim().is_empty() {
        let note_lower = note.to_lowercase();
        let text_lower = candidate.text.to_lowercase();
        let note_words: HashSet<&str> = note_lower.split_whitespace().collect();
        let text_words: HashSet<&str> = text_lower.split_whitespace().collect();
        score += note_words.intersection(&text_words).count() as f64 * SHARED_WORD_WEIGHT;
    }

    score
}

/// Scores every candidate and returns the best one. Ties keep the earliest candidate.
pub fn select_best(
    candidates: &[HintCandidate],
    bucket: &SentimentBucket,
    note: &str,
    preferred_length: &RangeInclusive<usize>,
) -> Option<HintCandidate> {
    let mut best: Option<HintCandidate> = None;
    for candidate in candidates {
        let score = relevance(candidate, bucket, note, preferred_length);
        if best.as_ref().is_none_or(|current| score > current.relevance) {
            best = Some(HintCandidate {
                relevance: score,
                ..candidate.clone()
            });
        }
    }
    best
}
