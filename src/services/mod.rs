use std::sync::Arc;

use crate::config::Config;
use crate::domain::TotalBounds;
use crate::storage::StateStore;

use catalog_service::CourseCatalog;
use draft_service::DraftRegistry;
use material_service::MaterialLibrary;
use quiz_store::QuizStore;

pub struct AppState {
    pub config: Config,
    pub http: reqwest::Client,
    pub store: Arc<dyn StateStore>,
    pub catalog: CourseCatalog,
    pub materials: MaterialLibrary,
    pub quizzes: QuizStore,
    pub drafts: DraftRegistry,
}

impl AppState {
    pub async fn new(config: Config, store: Arc<dyn StateStore>) -> anyhow::Result<Self> {
        let catalog = CourseCatalog::load(store.clone()).await;
        tracing::info!("Course catalog loaded: {} entries", catalog.len().await);

        let materials = MaterialLibrary::load(store.clone()).await;
        tracing::info!("Material library loaded: {} entries", materials.len().await);

        let quizzes = QuizStore::load(store.clone()).await;
        tracing::info!("Quiz store loaded: {} records", quizzes.len().await);

        let bounds = TotalBounds::new(config.question_total_min, config.question_total_max);

        // No client-side timeout: any timeout is the relay's or the
        // transport's responsibility.
        let http = reqwest::Client::new();

        Ok(Self {
            config,
            http,
            store,
            catalog,
            materials,
            quizzes,
            drafts: DraftRegistry::new(bounds),
        })
    }
}

pub mod catalog_service;
pub mod draft_service;
pub mod generation_service;
pub mod material_service;
pub mod quiz_store;
pub mod request_builder;
