use mood_journal::cache::MemoryHintCache;
use mood_journal::enrichment::{HttpSearchProvider, SearchProvider};
use mood_journal::suggest::Suggester;
use mood_journal::{router, AppState, Config, HintSelector, HintSettings, JsonFileStore};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = Config::from_env()?;

    let store = JsonFileStore::open(&config.data_path).await?;

    let provider: Option<Arc<dyn SearchProvider>> = match &config.search_url {
        Some(url) => match HttpSearchProvider::new(
            url,
            config.search_api_key.clone(),
            config.enrichment_timeout,
        ) {
            Ok(provider) => {
                info!(%url, "quote enrichment enabled");
                let provider: Arc<dyn SearchProvider> = Arc::new(provider);
                Some(provider)
            }
            Err(err) => {
                warn!(error = %err, "quote enrichment disabled");
                None
            }
        },
        None => {
            info!("quote enrichment not configured, using curated quotes");
            None
        }
    };

    let settings = HintSettings {
        cache_ttl: config.hint_cache_ttl,
        lookup_timeout: config.enrichment_timeout,
        ..HintSettings::default()
    };
    let hints = HintSelector::new(provider, Arc::new(MemoryHintCache::new()), settings);

    let suggester = match &config.openai_api_key {
        Some(key) => Some(Suggester::new(
            config.openai_url.clone(),
            key.clone(),
            config.openai_model.clone(),
            config.suggestion_timeout,
        )?),
        None => {
            info!("ai suggestions disabled: OPENAI_API_KEY not set");
            None
        }
    };

    let state = AppState::new(Arc::new(store), hints, suggester);
    let app = router(state);

    let addr = config.listen_addr();
    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr.as_str()).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
    }
    info!("shutting down");
}
