//! Supportive message selection.
//!
//! The pipeline runs crisis detection first and returns the emergency message
//! without looking at anything else. Otherwise the score is classified,
//! candidates are gathered (cache, external provider or curated table), the
//! best one is composed into the final text, and any lookup failure degrades to
//! the bucket's static fallback.

use crate::buckets::{classify, BucketId, SentimentBucket};
use crate::cache::{CacheKey, HintCache};
use crate::crisis;
use crate::enrichment::{parse_quotes, EnrichmentError, SearchProvider, SearchResult};
use crate::errors::MoodError;
use crate::quotes;
use crate::scoring::{select_best, HintCandidate};
use serde::Serialize;
use std::ops::RangeInclusive;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Ordered note keywords and the topic they add to lookups. First match wins.
const CONTEXT_KEYWORDS: &[(&str, &str)] = &[
    ("work", "workplace stress"),
    ("family", "family relationships"),
    ("sleep", "rest and recovery"),
    ("anxiety", "anxiety management"),
    ("tired", "energy and motivation"),
    ("overwhelmed", "stress management"),
    ("lonely", "connection and support"),
    ("grateful", "gratitude and appreciation"),
];

#[derive(Debug, Clone)]
pub struct HintSettings {
    pub cache_ttl: Duration,
    pub lookup_timeout: Duration,
    pub preferred_length: RangeInclusive<usize>,
    /// Search terms tried per request.
    pub max_searches: usize,
    /// Stop searching once this many candidates are collected.
    pub enough_candidates: usize,
}

impl Default for HintSettings {
    fn default() -> Self {
        Self {
            cache_ttl: Duration::from_secs(24 * 60 * 60),
            lookup_timeout: Duration::from_secs(5),
            preferred_length: 50..=150,
            max_searches: 2,
            enough_candidates: 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HintSource {
    Crisis,
    Enriched,
    Curated,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hint {
    pub text: String,
    pub bucket: Option<BucketId>,
    pub source: HintSource,
    pub context: Option<&'static str>,
}

pub struct HintSelector {
    provider: Option<Arc<dyn SearchProvider>>,
    cache: Arc<dyn HintCache>,
    settings: HintSettings,
}

impl HintSelector {
    pub fn new(
        provider: Option<Arc<dyn SearchProvider>>,
        cache: Arc<dyn HintCache>,
        settings: HintSettings,
    ) -> Self {
        Self {
            provider,
            cache,
            settings,
        }
    }

    pub async fn select_hint(&self, score: i32, note: &str) -> Result<Hint, MoodError> {
        if let Some(keyword) = crisis::detect(note) {
            warn!(keyword, "crisis language detected, returning emergency resources");
            return Ok(Hint {
                text: crisis::EMERGENCY_MESSAGE.to_string(),
                bucket: None,
                source: HintSource::Crisis,
                context: None,
            });
        }

        let bucket = classify(score)?;
        let context = context_keyword(note);
        let candidates = self.candidates(bucket, note, context).await;

        let Some(best) = select_best(&candidates, bucket, note, &self.settings.preferred_length)
        else {
            return Ok(Hint {
                text: quotes::fallback(bucket.id, note).to_string(),
                bucket: Some(bucket.id),
                source: HintSource::Fallback,
                context,
            });
        };

        debug!(
            bucket = bucket.id.as_str(),
            relevance = best.relevance,
            "selected hint candidate"
        );
        Ok(Hint {
            text: compose(bucket, &best),
            bucket: Some(bucket.id),
            source: if self.provider.is_some() {
                HintSource::Enriched
            } else {
                HintSource::Curated
            },
            context,
        })
    }

    pub async fn clear_cache(&self) {
        self.cache.clear().await;
    }

    async fn candidates(
        &self,
        bucket: &SentimentBucket,
        note: &str,
        context: Option<&str>,
    ) -> Vec<HintCandidate> {
        let key = CacheKey::new(bucket.id, note);
        if let Some(cached) = self.cache.get(&key).await {
            return cached;
        }

        let gathered = match &self.provider {
            Some(provider) => self.search(provider.as_ref(), bucket, context).await,
            None => quotes::curated(bucket.id),
        };

        if !gathered.is_empty() {
            self.cache
                .put(key, gathered.clone(), self.settings.cache_ttl)
                .await;
        }
        gathered
    }

    async fn search(
        &self,
        provider: &dyn SearchProvider,
        bucket: &SentimentBucket,
        context: Option<&str>,
    ) -> Vec<HintCandidate> {
        let mut collected: Vec<HintCandidate> = Vec::new();

        for term in bucket.search_terms.iter().take(self.settings.max_searches) {
            let term = match context {
                Some(context) => format!("{term} {context}"),
                None => term.to_string(),
            };
            let query = format!("positive {term} with citations");

            match self.lookup(provider, &query).await {
                Ok(results) => {
                    for quote in parse_quotes(&results) {
                        if !collected.iter().any(|c| c.text == quote.text) {
                            collected.push(quote);
                        }
                    }
                }
                Err(err) => {
                    warn!(error = %err, %query, "enrichment unavailable");
                }
            }

            if collected.len() >= self.settings.enough_candidates {
                break;
            }
        }

        collected
    }

    async fn lookup(
        &self,
        provider: &dyn SearchProvider,
        query: &str,
    ) -> Result<Vec<SearchResult>, EnrichmentError> {
        let timeout = self.settings.lookup_timeout;
        tokio::time::timeout(timeout, provider.search(query))
            .await
            .map_err(|_| EnrichmentError::Timeout(timeout))?
    }
}

pub fn context_keyword(note: &str) -> Option<&'static str> {
    let note = note.to_lowercase();
    CONTEXT_KEYWORDS
        .iter()
        .find(|(keyword, _)| note.contains(keyword))
        .map(|(_, topic)| *topic)
}

fn compose(bucket: &SentimentBucket, candidate: &HintCandidate) -> String {
    let mut text = format!(
        "{}\n\n*\"{}\"*\n\n— {}",
        bucket.intro, candidate.text, candidate.attribution
    );

    match (&candidate.source, &candidate.url) {
        (Some(source), Some(url)) => text.push_str(&format!("\n\n📖 Source: [{source}]({url})")),
        (Some(source), None) => text.push_str(&format!("\n\n📖 Source: {source}")),
        _ => {}
    }

    text.push_str("\n\n");
    text.push_str(bucket.action);
    text
}
