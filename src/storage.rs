use crate::models::{AppData, MoodEntry};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{error, info};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to write data file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode data: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Persistence seam for check-ins. One entry per (user, date); upserts replace.
#[async_trait]
pub trait EntryStore: Send + Sync {
    /// All entries for the user, oldest date first.
    async fn get_entries(&self, user: &str) -> Result<Vec<MoodEntry>, StoreError>;

    async fn upsert_entry(&self, user: &str, entry: MoodEntry) -> Result<(), StoreError>;
}

/// Keeps the whole dataset in memory and rewrites one JSON file on every change.
pub struct JsonFileStore {
    path: PathBuf,
    data: Mutex<AppData>,
}

impl JsonFileStore {
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }
        let data = load_data(&path).await;
        info!(
            path = %path.display(),
            users = data.users.len(),
            "loaded mood entries"
        );
        Ok(Self {
            path,
            data: Mutex::new(data),
        })
    }
}

#[async_trait]
impl EntryStore for JsonFileStore {
    async fn get_entries(&self, user: &str) -> Result<Vec<MoodEntry>, StoreError> {
        let data = self.data.lock().await;
        Ok(data
            .users
            .get(user)
            .map(|days| days.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn upsert_entry(&self, user: &str, entry: MoodEntry) -> Result<(), StoreError> {
        let mut data = self.data.lock().await;
        data.users
            .entry(user.to_string())
            .or_default()
            .insert(date_key(&entry), entry);

        persist_data(&self.path, &data).await
    }
}

fn date_key(entry: &MoodEntry) -> String {
    entry.date.format("%Y-%m-%d").to_string()
}

pub async fn load_data(path: &Path) -> AppData {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(data) => data,
            Err(err) => {
                error!("failed to parse data file: {err}");
                AppData::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => AppData::default(),
        Err(err) => {
            error!("failed to read data file: {err}");
            AppData::default()
        }
    }
}

pub async fn persist_data(path: &Path, data: &AppData) -> Result<(), StoreError> {
    let payload = serde_json::to_vec_pretty(data)?;
    fs::write(path, payload).await?;
    Ok(())
}
