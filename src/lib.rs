pub mod app;
pub mod buckets;
pub mod cache;
pub mod config;
pub mod crisis;
pub mod enrichment;
pub mod errors;
pub mod handlers;
pub mod hints;
pub mod models;
pub mod quotes;
pub mod scoring;
pub mod state;
pub mod stats;
pub mod storage;
pub mod suggest;
pub mod ui;

pub use app::router;
pub use buckets::{classify, BucketId, SentimentBucket};
pub use config::Config;
pub use hints::{Hint, HintSelector, HintSettings, HintSource};
pub use state::AppState;
pub use storage::{EntryStore, JsonFileStore};
