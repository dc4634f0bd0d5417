use crate::buckets::BucketId;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodEntry {
    pub date: NaiveDate,
    pub score: u8,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    #[serde(default)]
    pub hint: Option<String>,
    #[serde(default)]
    pub generated_message: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Everything persisted: user -> date key (`%Y-%m-%d`) -> entry.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppData {
    pub users: BTreeMap<String, BTreeMap<String, MoodEntry>>,
}

pub const TAG_PALETTE: &[(&str, &str)] = &[
    ("😊", "happy"),
    ("😔", "sad"),
    ("😰", "anxious"),
    ("😴", "sleep"),
    ("🏃", "exercise"),
    ("💼", "work"),
    ("🍽️", "meals"),
    ("☀️", "sunlight"),
    ("🌧️", "rainy"),
    ("🤝", "social"),
    ("📚", "study"),
    ("🎵", "music"),
    ("👨‍👩‍👧", "family"),
    ("🧘", "quiet time"),
    ("📖", "reading"),
    ("🎮", "gaming"),
    ("📺", "tv"),
    ("📱", "social media"),
];

#[derive(Debug, Serialize)]
pub struct TagOption {
    pub emoji: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct ClassifyQuery {
    pub score: i32,
}

#[derive(Debug, Deserialize)]
pub struct HintRequest {
    pub score: i32,
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CheckInRequest {
    #[serde(default)]
    pub date: Option<NaiveDate>,
    pub score: i32,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CheckInResponse {
    pub bucket: BucketId,
    pub label: String,
    pub emoji: String,
    pub entry: MoodEntry,
}

#[derive(Debug, Deserialize)]
pub struct HintHistoryQuery {
    #[serde(default)]
    pub q: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HintHistoryItem {
    pub date: NaiveDate,
    pub score: u8,
    pub note: Option<String>,
    pub hint: Option<String>,
    pub generated_message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DailyPoint {
    pub date: String,
    pub score: Option<u8>,
    pub label: Option<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct WeeklyAveragePoint {
    pub week: String,
    pub start_date: String,
    pub end_date: String,
    pub days_logged: u8,
    pub avg_score: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub streak: u32,
    pub total_checkins: usize,
    pub avg_mood: f64,
    pub recent_avg: f64,
    pub last_7_days: Vec<DailyPoint>,
    pub weekly_averages: Vec<WeeklyAveragePoint>,
}
