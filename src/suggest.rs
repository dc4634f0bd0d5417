//! Optional language-model suggestion attached to a check-in.

use crate::crisis;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::warn;

pub struct Suggester {
    client: Client,
    url: String,
    api_key: String,
    model: String,
}

impl Suggester {
    pub fn new(
        url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            url: url.into(),
            api_key: api_key.into(),
            model: model.into(),
        })
    }

    /// Asks the chat model for a short supportive response. Failures yield `None`.
    pub async fn suggest(&self, score: u8, note: &str) -> Option<String> {
        if crisis::detect(note).is_some() {
            return None;
        }

        match self.request(score, note).await {
            Ok(text) if !text.is_empty() => Some(text),
            Ok(_) => None,
            Err(err) => {
                warn!(error = %err, "ai suggestion unavailable");
                None
            }
        }
    }

    async fn request(&self, score: u8, note: &str) -> Result<String, reqwest::Error> {
        let body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": system_prompt(score) },
                { "role": "user", "content": user_prompt(score, note) }
            ],
            "temperature": 0.7,
            "max_tokens": 200
        });

        let response: Value = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(response["choices"][0]["message"]["content"]
            .as_str()
            .unwrap_or_default()
            .trim()
            .to_string())
    }
}

pub fn system_prompt(score: u8) -> &'static str {
    match score {
        0..=2 => "You are a gentle, supportive counselor. Provide immediate emotional support with 3-4 sentences. Focus on comfort and small, manageable steps.",
        3..=4 => "You are an encouraging coach. Provide gentle motivation with 3-4 sentences. Focus on small positive actions and building momentum.",
        5..=6 => "You are an upbeat coach. Provide fun suggestions to boost mood with 3-4 sentences. Focus on enjoyable activities.",
        _ => "You are an enthusiastic coach. Celebrate their positive state with 3-4 sentences. Focus on maintaining and sharing positivity.",
    }
}

pub fn user_prompt(score: u8, note: &str) -> String {
    let note = note.trim();
    if note.is_empty() {
        format!("Someone is feeling {score}/10 today. Please provide a supportive response.")
    } else {
        format!(
            "Someone is feeling {score}/10 today. They shared: {note} Please provide a supportive response."
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_prompt_follows_score_tiers() {
        assert!(system_prompt(2).contains("counselor"));
        assert!(system_prompt(3).contains("encouraging"));
        assert!(system_prompt(6).contains("upbeat"));
        assert!(system_prompt(7).contains("enthusiastic"));
    }

    #[test]
    fn user_prompt_mentions_note_only_when_present() {
        assert_eq!(
            user_prompt(4, "  "),
            "Someone is feeling 4/10 today. Please provide a supportive response."
        );
        assert!(user_prompt(8, "long walk").contains("They shared: long walk"));
    }

    #[tokio::test]
    async fn crisis_note_skips_the_model() {
        let suggester = Suggester::new(
            "http://127.0.0.1:9/never",
            "key",
            "model",
            Duration::from_millis(50),
        )
        .unwrap();
        assert_eq!(suggester.suggest(5, "I want to end it all").await, None);
    }

    #[tokio::test]
    async fn unreachable_endpoint_yields_none() {
        let suggester = Suggester::new(
            "http://127.0.0.1:9/never",
            "key",
            "model",
            Duration::from_millis(200),
        )
        .unwrap();
        assert_eq!(suggester.suggest(5, "fine").await, None);
    }
}
