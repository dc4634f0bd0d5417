use crate::buckets::classify;
use crate::models::{DailyPoint, MoodEntry, StatsResponse, WeeklyAveragePoint};
use chrono::{Datelike, Duration, Local, NaiveDate};
use std::collections::BTreeMap;

const RECENT_ENTRIES: usize = 7;

pub fn build_stats(entries: &[MoodEntry]) -> StatsResponse {
    build_stats_at(Local::now().date_naive(), entries)
}

pub fn build_stats_at(today: NaiveDate, entries: &[MoodEntry]) -> StatsResponse {
    const WEEK_COUNT: usize = 8;

    let by_date: BTreeMap<NaiveDate, u8> = entries.iter().map(|e| (e.date, e.score)).collect();

    let mut streak = 0u32;
    let mut cursor = today;
    while by_date.contains_key(&cursor) {
        streak += 1;
        cursor -= Duration::days(1);
    }

    let total_checkins = by_date.len();
    let avg_mood = average(by_date.values().copied());
    let recent_avg = average(by_date.values().rev().take(RECENT_ENTRIES).copied());

    let mut last_7_days = Vec::with_capacity(7);
    for offset in (0..7).rev() {
        let date = today - Duration::days(offset);
        let score = by_date.get(&date).copied();
        last_7_days.push(DailyPoint {
            date: date.to_string(),
            score,
            label: score
                .and_then(|s| classify(i32::from(s)).ok())
                .map(|bucket| bucket.label),
        });
    }

    let current_week_start = week_start(today);
    let mut weekly_averages = Vec::with_capacity(WEEK_COUNT);

    for offset in (0..WEEK_COUNT).rev() {
        let start = current_week_start - Duration::weeks(offset as i64);
        let end = start + Duration::days(6);

        let scores: Vec<u8> = by_date.range(start..=end).map(|(_, s)| *s).collect();
        let avg_score = if scores.is_empty() {
            None
        } else {
            Some(average(scores.iter().copied()))
        };

        weekly_averages.push(WeeklyAveragePoint {
            week: week_label(start),
            start_date: start.to_string(),
            end_date: end.to_string(),
            days_logged: scores.len() as u8,
            avg_score,
        });
    }

    StatsResponse {
        streak,
        total_checkins,
        avg_mood,
        recent_avg,
        last_7_days,
        weekly_averages,
    }
}

fn average(scores: impl Iterator<Item = u8>) -> f64 {
    let (sum, count) = scores.fold((0u64, 0u64), |(sum, count), s| (sum + u64::from(s), count + 1));
    if count == 0 {
        0.0
    } else {
        sum as f64 / count as f64
    }
}

fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

fn week_label(date: NaiveDate) -> String {
    let iso = date.iso_week();
    format!("{}-W{:02}", iso.year(), iso.week())
}
