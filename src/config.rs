use std::env;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} must be a number, got {value:?}")]
    NotANumber { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub data_path: PathBuf,

    pub search_url: Option<String>,
    pub search_api_key: Option<String>,
    pub enrichment_timeout: Duration,
    pub hint_cache_ttl: Duration,

    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub openai_url: String,
    pub suggestion_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let optional = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let number = |name: &'static str, default: u64| -> Result<u64, ConfigError> {
            match optional(name) {
                Some(value) => value
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::NotANumber { name, value }),
                None => Ok(default),
            }
        };

        let port = number("PORT", 8080)?;
        let port = u16::try_from(port).map_err(|_| ConfigError::NotANumber {
            name: "PORT",
            value: port.to_string(),
        })?;

        Ok(Self {
            host: optional("HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port,
            data_path: optional("APP_DATA_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("data/state.json")),

            search_url: optional("MOOD_SEARCH_URL"),
            search_api_key: optional("MOOD_SEARCH_API_KEY"),
            enrichment_timeout: Duration::from_secs(number("ENRICHMENT_TIMEOUT_SECS", 5)?),
            hint_cache_ttl: Duration::from_secs(number("HINT_CACHE_TTL_SECS", 24 * 60 * 60)?),

            openai_api_key: optional("OPENAI_API_KEY").map(|key| key.trim().to_string()),
            openai_model: optional("OPENAI_MODEL").unwrap_or_else(|| "gpt-4o-mini".into()),
            openai_url: optional("OPENAI_URL")
                .unwrap_or_else(|| "https://api.openai.com/v1/chat/completions".into()),
            suggestion_timeout: Duration::from_secs(number("SUGGESTION_TIMEOUT_SECS", 30)?),
        })
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
