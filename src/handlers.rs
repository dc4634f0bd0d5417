use crate::buckets::{classify, SentimentBucket, BUCKETS};
use crate::errors::AppError;
use crate::hints::Hint;
use crate::models::{
    CheckInRequest, CheckInResponse, ClassifyQuery, HintHistoryItem, HintHistoryQuery,
    HintRequest, MoodEntry, StatsResponse, TagOption, TAG_PALETTE,
};
use crate::state::AppState;
use crate::stats::build_stats;
use crate::ui::render_index;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Html,
    Json,
};
use chrono::{Local, NaiveDate, Utc};
use std::collections::BTreeSet;
use tracing::info;

const MAX_USER_LEN: usize = 64;
const MAX_TAG_LEN: usize = 32;

pub async fn index() -> Html<String> {
    Html(render_index(&today().to_string()))
}

pub async fn get_buckets() -> Json<&'static [SentimentBucket]> {
    Json(&BUCKETS[..])
}

pub async fn get_tags() -> Json<Vec<TagOption>> {
    Json(
        TAG_PALETTE
            .iter()
            .map(|&(emoji, label)| TagOption { emoji, label })
            .collect(),
    )
}

pub async fn classify_score(
    Query(query): Query<ClassifyQuery>,
) -> Result<Json<&'static SentimentBucket>, AppError> {
    Ok(Json(classify(query.score)?))
}

pub async fn hint(
    State(state): State<AppState>,
    Json(payload): Json<HintRequest>,
) -> Result<Json<Hint>, AppError> {
    let note = payload.note.unwrap_or_default();
    let hint = state.hints.select_hint(payload.score, &note).await?;
    Ok(Json(hint))
}

pub async fn clear_hint_cache(State(state): State<AppState>) -> StatusCode {
    state.hints.clear_cache().await;
    info!("hint cache cleared");
    StatusCode::NO_CONTENT
}

pub async fn list_entries(
    State(state): State<AppState>,
    Path(user): Path<String>,
) -> Result<Json<Vec<MoodEntry>>, AppError> {
    let user = validate_user(&user)?;
    Ok(Json(state.store.get_entries(user).await?))
}

pub async fn check_in(
    State(state): State<AppState>,
    Path(user): Path<String>,
    Json(payload): Json<CheckInRequest>,
) -> Result<Json<CheckInResponse>, AppError> {
    let user = validate_user(&user)?;
    let bucket = classify(payload.score)?;
    let score = u8::try_from(payload.score)
        .map_err(|_| AppError::unprocessable("score must be between 0 and 10"))?;

    let date = payload.date.unwrap_or_else(today);
    if date > today() {
        return Err(AppError::unprocessable("check-in date cannot be in the future"));
    }

    let note = payload
        .note
        .map(|note| note.trim().to_string())
        .filter(|note| !note.is_empty());
    let tags = normalize_tags(&payload.tags)?;
    let note_text = note.as_deref().unwrap_or_default();

    let hint = state.hints.select_hint(payload.score, note_text).await?;
    let generated_message = match &state.suggester {
        Some(suggester) => suggester.suggest(score, note_text).await,
        None => None,
    };

    let entry = MoodEntry {
        date,
        score,
        note,
        tags,
        hint: Some(hint.text),
        generated_message,
        created_at: Utc::now(),
    };
    state.store.upsert_entry(user, entry.clone()).await?;

    info!(user, %date, score, bucket = bucket.id.as_str(), "check-in saved");

    Ok(Json(CheckInResponse {
        bucket: bucket.id,
        label: bucket.label.to_string(),
        emoji: bucket.emoji.to_string(),
        entry,
    }))
}

pub async fn get_stats(
    State(state): State<AppState>,
    Path(user): Path<String>,
) -> Result<Json<StatsResponse>, AppError> {
    let user = validate_user(&user)?;
    let entries = state.store.get_entries(user).await?;
    Ok(Json(build_stats(&entries)))
}

pub async fn hint_history(
    State(state): State<AppState>,
    Path(user): Path<String>,
    Query(query): Query<HintHistoryQuery>,
) -> Result<Json<Vec<HintHistoryItem>>, AppError> {
    let user = validate_user(&user)?;
    let entries = state.store.get_entries(user).await?;
    let needle = query
        .q
        .map(|q| q.trim().to_lowercase())
        .filter(|q| !q.is_empty());

    let items = entries
        .into_iter()
        .rev()
        .filter(|entry| entry.hint.is_some() || entry.generated_message.is_some())
        .filter(|entry| match &needle {
            Some(needle) => [&entry.note, &entry.hint, &entry.generated_message]
                .into_iter()
                .flatten()
                .any(|text| text.to_lowercase().contains(needle.as_str())),
            None => true,
        })
        .map(|entry| HintHistoryItem {
            date: entry.date,
            score: entry.score,
            note: entry.note,
            hint: entry.hint,
            generated_message: entry.generated_message,
        })
        .collect();

    Ok(Json(items))
}

fn validate_user(user: &str) -> Result<&str, AppError> {
    let user = user.trim();
    if user.is_empty() || user.chars().count() > MAX_USER_LEN {
        return Err(AppError::bad_request(format!(
            "user must be 1 to {MAX_USER_LEN} characters"
        )));
    }
    Ok(user)
}

/// Splits comma-separated input, trims, drops empties and collapses duplicates.
fn normalize_tags(raw: &[String]) -> Result<BTreeSet<String>, AppError> {
    let mut tags = BTreeSet::new();
    for tag in raw.iter().flat_map(|value| value.split(',')) {
        let tag = tag.trim();
        if tag.is_empty() {
            continue;
        }
        if tag.chars().count() > MAX_TAG_LEN {
            return Err(AppError::unprocessable(format!(
                "tag '{tag}' is longer than {MAX_TAG_LEN} characters"
            )));
        }
        tags.insert(tag.to_string());
    }
    Ok(tags)
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_are_split_trimmed_and_deduplicated() {
        let raw = vec![
            "work, sleep".to_string(),
            " work ".to_string(),
            "".to_string(),
            "Family".to_string(),
        ];
        let tags = normalize_tags(&raw).unwrap();
        let tags: Vec<_> = tags.into_iter().collect();
        assert_eq!(tags, vec!["Family", "sleep", "work"]);
    }

    #[test]
    fn long_tags_are_rejected() {
        let raw = vec!["x".repeat(MAX_TAG_LEN + 1)];
        let err = normalize_tags(&raw).unwrap_err();
        assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn blank_user_is_rejected() {
        assert!(validate_user("   ").is_err());
        assert_eq!(validate_user(" ana ").unwrap(), "ana");
    }
}
