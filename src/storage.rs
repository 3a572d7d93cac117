use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::path::PathBuf;
use tokio::sync::RwLock;

/// Fixed keys for the three persisted collections. Each collection is one
/// JSON array under its own key; there is no schema version field.
pub const KEY_UPLOADED_FILES: &str = "uploaded_files";
pub const KEY_COURSE_OPTIONS: &str = "course_options";
pub const KEY_PAST_QUIZZES: &str = "past_quizzes";

/// Whole-value key-value persistence. Collections are always read and
/// rewritten in full; the single-writer guarantee comes from the owning
/// service, not from here.
#[async_trait]
pub trait StateStore: Send + Sync {
    async fn read(&self, key: &str) -> Result<Option<String>>;
    async fn write(&self, key: &str, payload: &str) -> Result<()>;
}

/// Filesystem backend: one `{key}.json` file per collection under the
/// configured data directory.
pub struct FsStateStore {
    root: PathBuf,
}

impl FsStateStore {
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root)
            .with_context(|| format!("Failed to create data directory {}", root.display()))?;
        Ok(Self { root })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", key))
    }
}

#[async_trait]
impl StateStore for FsStateStore {
    async fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        match tokio::fs::read_to_string(&path).await {
            Ok(payload) => Ok(Some(payload)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("Failed to read {}", path.display())),
        }
    }

    async fn write(&self, key: &str, payload: &str) -> Result<()> {
        let path = self.path_for(key);
        tokio::fs::write(&path, payload)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))
    }
}

/// In-memory backend for tests.
#[derive(Default)]
pub struct MemoryStateStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StateStore for MemoryStateStore {
    async fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn write(&self, key: &str, payload: &str) -> Result<()> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), payload.to_string());
        Ok(())
    }
}

/// Loads one persisted collection. A missing key yields `None`; a malformed
/// payload is discarded wholesale (fails safe, never fatal) and also yields
/// `None`, so callers can fall back to their seed state.
pub async fn load_collection<T: DeserializeOwned>(
    store: &dyn StateStore,
    key: &str,
) -> Option<Vec<T>> {
    let payload = match store.read(key).await {
        Ok(Some(payload)) => payload,
        Ok(None) => return None,
        Err(e) => {
            tracing::warn!("Failed to read persisted collection {}: {}", key, e);
            return None;
        }
    };

    match serde_json::from_str(&payload) {
        Ok(items) => Some(items),
        Err(e) => {
            tracing::warn!("Discarding malformed persisted collection {}: {}", key, e);
            None
        }
    }
}

pub async fn save_collection<T: Serialize>(
    store: &dyn StateStore,
    key: &str,
    items: &[T],
) -> Result<()> {
    let payload = serde_json::to_string(items)
        .with_context(|| format!("Failed to serialize collection {}", key))?;
    store.write(key, &payload).await
}
