use anyhow::Result;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::models::material::{MaterialRecord, UploadMaterialRequest};
use crate::storage::{self, StateStore, KEY_UPLOADED_FILES};

/// Persisted list of uploaded course materials. Upload order is preserved;
/// generation picks the first selected material in that order.
pub struct MaterialLibrary {
    store: Arc<dyn StateStore>,
    materials: RwLock<Vec<MaterialRecord>>,
}

impl MaterialLibrary {
    pub async fn load(store: Arc<dyn StateStore>) -> Self {
        let materials = storage::load_collection(store.as_ref(), KEY_UPLOADED_FILES)
            .await
            .unwrap_or_default();
        Self {
            store,
            materials: RwLock::new(materials),
        }
    }

    pub async fn list(&self) -> Vec<MaterialRecord> {
        self.materials.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.materials.read().await.len()
    }

    pub async fn find(&self, id: &str) -> Option<MaterialRecord> {
        self.materials
            .read()
            .await
            .iter()
            .find(|material| material.id == id)
            .cloned()
    }

    /// First material (in upload order) whose id is in the given selection.
    pub async fn first_selected(&self, selected_ids: &[String]) -> Option<MaterialRecord> {
        self.materials
            .read()
            .await
            .iter()
            .find(|material| selected_ids.iter().any(|id| *id == material.id))
            .cloned()
    }

    pub async fn add(&self, req: UploadMaterialRequest) -> Result<MaterialRecord> {
        let mut materials = self.materials.write().await;
        let record = MaterialRecord {
            id: format!("file-{}", materials.len()),
            name: req.name,
            content_type: req.content_type,
            size: req.size,
            data: Some(req.data),
            uploaded_at: Utc::now(),
        };
        materials.push(record.clone());
        storage::save_collection(self.store.as_ref(), KEY_UPLOADED_FILES, &materials).await?;

        tracing::info!(
            "Material stored: id={}, name={}, data_len={}",
            record.id,
            record.name,
            record.data.as_deref().map(str::len).unwrap_or(0)
        );
        Ok(record)
    }
}
