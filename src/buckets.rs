//! Sentiment buckets partitioning the 0..=10 mood scale.

use crate::errors::MoodError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BucketId {
    VeryLow,
    Low,
    Neutral,
    Good,
    Great,
}

impl BucketId {
    pub fn as_str(self) -> &'static str {
        match self {
            BucketId::VeryLow => "very_low",
            BucketId::Low => "low",
            BucketId::Neutral => "neutral",
            BucketId::Good => "good",
            BucketId::Great => "great",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SentimentBucket {
    pub id: BucketId,
    pub min: u8,
    pub max: u8,
    pub label: &'static str,
    pub emoji: &'static str,
    /// Seed terms for external quote lookups.
    #[serde(skip)]
    pub search_terms: &'static [&'static str],
    /// Words a well-matched candidate is expected to contain.
    #[serde(skip)]
    pub sentiment_words: &'static [&'static str],
    #[serde(skip)]
    pub intro: &'static str,
    #[serde(skip)]
    pub action: &'static str,
}

impl SentimentBucket {
    pub fn contains(&self, score: i32) -> bool {
        (i32::from(self.min)..=i32::from(self.max)).contains(&score)
    }
}

pub static BUCKETS: [SentimentBucket; 5] = [
    SentimentBucket {
        id: BucketId::VeryLow,
        min: 0,
        max: 2,
        label: "Very Low",
        emoji: "😢",
        search_terms: &[
            "depression quotes",
            "overcoming sadness",
            "hope during dark times",
            "mental health support quotes",
        ],
        sentiment_words: &["hope", "healing", "support", "gentle", "comfort", "peace"],
        intro: "During difficult times, remember: ",
        action: "💙 Take one small, gentle step today. You're not alone in this journey.",
    },
    SentimentBucket {
        id: BucketId::Low,
        min: 3,
        max: 4,
        label: "Low",
        emoji: "😔",
        search_terms: &[
            "motivational quotes for difficult times",
            "encouragement quotes",
            "resilience quotes",
            "getting through tough days",
        ],
        sentiment_words: &["strength", "courage", "overcome", "resilience", "better", "forward"],
        intro: "For encouragement when things feel tough: ",
        action: "💪 Consider one small action that might help you move forward today.",
    },
    SentimentBucket {
        id: BucketId::Neutral,
        min: 5,
        max: 6,
        label: "Neutral",
        emoji: "😐",
        search_terms: &[
            "positive daily quotes",
            "mindfulness quotes",
            "self-care quotes",
            "gentle motivation quotes",
        ],
        sentiment_words: &["balance", "mindful", "present", "calm", "steady", "centered"],
        intro: "A gentle reminder for today: ",
        action: "🌱 Perhaps take a moment to appreciate where you are right now.",
    },
    SentimentBucket {
        id: BucketId::Good,
        min: 7,
        max: 8,
        label: "Good",
        emoji: "😊",
        search_terms: &[
            "happiness quotes",
            "joy quotes",
            "positive energy quotes",
            "celebrating life quotes",
        ],
        sentiment_words: &["joy", "happiness", "positive", "bright", "energy", "smile"],
        intro: "To celebrate your positive energy: ",
        action: "✨ Share this positive energy with someone who might need it today.",
    },
    SentimentBucket {
        id: BucketId::Great,
        min: 9,
        max: 10,
        label: "Great",
        emoji: "😄",
        search_terms: &[
            "success quotes",
            "achievement quotes",
            "gratitude quotes",
            "sharing positivity quotes",
        ],
        sentiment_words: &[
            "success",
            "achievement",
            "celebrate",
            "gratitude",
            "amazing",
            "wonderful",
        ],
        intro: "Embracing your wonderful mood: ",
        action: "🎉 Celebrate this moment and consider how you can maintain this wonderful feeling.",
    },
];

/// Maps a score to its bucket. Scores outside the scale are rejected, never clamped.
pub fn classify(score: i32) -> Result<&'static SentimentBucket, MoodError> {
    BUCKETS
        .iter()
        .find(|bucket| bucket.contains(score))
        .ok_or(MoodError::InvalidScore(score))
}

#[cfg(test)]
pub fn bucket(id: BucketId) -> &'static SentimentBucket {
    match id {
        BucketId::VeryLow => &BUCKETS[0],
        BucketId::Low => &BUCKETS[1],
        BucketId::Neutral => &BUCKETS[2],
        BucketId::Good => &BUCKETS[3],
        BucketId::Great => &BUCKETS[4],
    }
}
