//! Optional external quote lookup.
//!
//! A [`SearchProvider`] returns raw search hits; [`parse_quotes`] pulls attributed
//! quotes out of them and keeps only the ones published on a trusted domain.

use crate::scoring::{is_trusted, HintCandidate};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use std::collections::HashSet;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum EnrichmentError {
    #[error("search request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("search provider returned {0}")]
    Status(StatusCode),

    #[error("search timed out after {0:?}")]
    Timeout(Duration),

    #[error("invalid search endpoint: {0}")]
    Endpoint(String),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SearchResult {
    #[serde(alias = "content")]
    pub text: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub title: String,
}

#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, EnrichmentError>;
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SearchPayload {
    List(Vec<SearchResult>),
    Wrapped { results: Vec<SearchResult> },
}

/// Talks to a JSON search endpoint: `GET {endpoint}?q=..&num_results=3`.
pub struct HttpSearchProvider {
    client: Client,
    endpoint: Url,
    api_key: Option<String>,
}

impl HttpSearchProvider {
    pub fn new(
        endpoint: &str,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, EnrichmentError> {
        let endpoint =
            Url::parse(endpoint).map_err(|err| EnrichmentError::Endpoint(err.to_string()))?;
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint,
            api_key,
        })
    }
}

#[async_trait]
impl SearchProvider for HttpSearchProvider {
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, EnrichmentError> {
        let mut request = self
            .client
            .get(self.endpoint.clone())
            .query(&[("q", query), ("num_results", "3")]);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(EnrichmentError::Status(response.status()));
        }

        let payload: SearchPayload = response.json().await?;
        Ok(match payload {
            SearchPayload::List(results) => results,
            SearchPayload::Wrapped { results } => results,
        })
    }
}

const QUOTES_PER_PATTERN: usize = 2;

// Em-dash patterns run before hyphen patterns; the first capture of a quote wins.
static QUOTE_PATTERNS: Lazy<[Regex; 4]> = Lazy::new(|| {
    [
        Regex::new(r#""([^"]{20,200})"[^"]*—\s*([^,\n]+)"#).expect("straight em-dash pattern"),
        Regex::new(r#""([^"]{20,200})"[^"]*-\s*([^,\n]+)"#).expect("straight hyphen pattern"),
        Regex::new(r#"[“”]([^“”]{20,200})[“”][^“”]*—\s*([^,\n]+)"#)
            .expect("curly em-dash pattern"),
        Regex::new(r#"[“”]([^“”]{20,200})[“”][^“”]*-\s*([^,\n]+)"#)
            .expect("curly hyphen pattern"),
    ]
});

/// Domain of a URL with any leading `www.` removed.
pub fn extract_domain(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str()?;
    Some(host.strip_prefix("www.").unwrap_or(host).to_lowercase())
}

/// Extracts attributed quotes from search hits published on trusted domains.
pub fn parse_quotes(results: &[SearchResult]) -> Vec<HintCandidate> {
    let mut seen = HashSet::new();
    let mut quotes = Vec::new();

    for result in results {
        let Some(domain) = extract_domain(&result.url) else {
            continue;
        };
        if !is_trusted(&domain) {
            continue;
        }

        for pattern in QUOTE_PATTERNS.iter() {
            for captures in pattern.captures_iter(&result.text).take(QUOTES_PER_PATTERN) {
                let text = captures[1].trim();
                let author = captures[2].trim();
                if text.chars().count() <= 20 || author.is_empty() {
                    continue;
                }
                if !seen.insert(text.to_string()) {
                    continue;
                }
                quotes.push(HintCandidate {
                    text: text.to_string(),
                    attribution: author.to_string(),
                    source: Some(domain.clone()),
                    url: Some(result.url.clone()),
                    relevance: 0.0,
                });
            }
        }
    }

    quotes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(text: &str, url: &str) -> SearchResult {
        SearchResult {
            text: text.to_string(),
            url: url.to_string(),
            title: String::new(),
        }
    }

    #[test]
    fn parses_attributed_quotes() {
        let results = [hit(
            r#"Our favourites: "The best way out is always through, one step at a time." — Robert Frost, poet"#,
            "https://www.realsimple.com/quotes",
        )];
        let quotes = parse_quotes(&results);
        assert_eq!(quotes.len(), 1);
        assert_eq!(
            quotes[0].text,
            "The best way out is always through, one step at a time."
        );
        assert_eq!(quotes[0].attribution, "Robert Frost");
        assert_eq!(quotes[0].source.as_deref(), Some("realsimple.com"));
    }

    #[test]
    fn curly_quotes_and_hyphen_attribution() {
        let results = [hit(
            "“You don't have to see the whole staircase, just take the first step.” - Martin Luther King Jr.",
            "https://parade.com/list",
        )];
        let quotes = parse_quotes(&results);
        assert_eq!(quotes.len(), 1);
        assert_eq!(quotes[0].attribution, "Martin Luther King Jr.");
    }

    #[test]
    fn hyphen_in_gap_does_not_steal_attribution() {
        let results = [hit(
            r#""Hope is the thing with feathers that perches in the soul." from a well-known poem — Emily Dickinson"#,
            "https://www.psychcentral.com/poems",
        )];
        let quotes = parse_quotes(&results);
        assert_eq!(quotes.len(), 1);
        assert_eq!(quotes[0].attribution, "Emily Dickinson");
    }

    #[test]
    fn drops_untrusted_domains() {
        let results = [hit(
            r#""Some perfectly reasonable words of comfort here." — Anonymous"#,
            "https://random-quotes.example.com/page",
        )];
        assert!(parse_quotes(&results).is_empty());
    }

    #[test]
    fn duplicate_quotes_are_collapsed() {
        let text = r#""Hope is being able to see that there is light despite all of the darkness." — Desmond Tutu"#;
        let results = [
            hit(text, "https://psychcentral.com/a"),
            hit(text, "https://psychcentral.com/b"),
        ];
        assert_eq!(parse_quotes(&results).len(), 1);
    }

    #[test]
    fn domain_extraction_strips_www() {
        assert_eq!(
            extract_domain("https://www.Prevention.com/x").as_deref(),
            Some("prevention.com")
        );
        assert_eq!(extract_domain("not a url"), None);
    }

    #[test]
    fn payload_accepts_content_alias_and_wrapper() {
        let wrapped: SearchPayload =
            serde_json::from_str(r#"{"results":[{"content":"abc","url":"u","title":"t"}]}"#)
                .unwrap();
        let SearchPayload::Wrapped { results } = wrapped else {
            panic!("expected wrapped payload");
        };
        assert_eq!(results[0].text, "abc");

        let list: SearchPayload = serde_json::from_str(r#"[{"text":"x"}]"#).unwrap();
        assert!(matches!(list, SearchPayload::List(ref r) if r.len() == 1));
    }
}
