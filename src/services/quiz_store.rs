use anyhow::Result;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::models::quiz::QuizRecord;
use crate::storage::{self, StateStore, KEY_PAST_QUIZZES};

/// Append-only collection of generated quizzes, most recent first. Records
/// enter through `append` only; removal exists on the storage contract but
/// has no HTTP surface.
pub struct QuizStore {
    store: Arc<dyn StateStore>,
    records: RwLock<Vec<QuizRecord>>,
}

impl QuizStore {
    pub async fn load(store: Arc<dyn StateStore>) -> Self {
        let records = storage::load_collection(store.as_ref(), KEY_PAST_QUIZZES)
            .await
            .unwrap_or_default();
        Self {
            store,
            records: RwLock::new(records),
        }
    }

    pub async fn list(&self) -> Vec<QuizRecord> {
        self.records.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn find_by_id(&self, id: &str) -> Option<QuizRecord> {
        self.records
            .read()
            .await
            .iter()
            .find(|record| record.id == id)
            .cloned()
    }

    /// Prepends the record and rewrites the persisted collection.
    pub async fn append(&self, record: QuizRecord) -> Result<()> {
        let mut records = self.records.write().await;
        records.insert(0, record);
        storage::save_collection(self.store.as_ref(), KEY_PAST_QUIZZES, &records).await
    }

    /// Removes the record with the given id, if present. Returns whether a
    /// record was removed.
    pub async fn remove(&self, id: &str) -> Result<bool> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|record| record.id != id);
        if records.len() == before {
            return Ok(false);
        }
        storage::save_collection(self.store.as_ref(), KEY_PAST_QUIZZES, &records).await?;
        Ok(true)
    }
}
