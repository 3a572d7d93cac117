use std::collections::HashMap;
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::{Distribution, MaterialSelection, QuestionAllocator, TotalBounds};
use crate::models::draft::{DraftView, UpdateDraftRequest};
use crate::models::QuestionType;

const DEFAULT_COURSE_ID: &str = "spn1130";
const DEFAULT_TOTAL_QUESTIONS: u32 = 10;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DraftError {
    #[error("Draft not found")]
    NotFound,
    #[error("A generation request is already in progress for this draft")]
    InFlight,
}

/// One quiz configuration session. Ephemeral: lives only in the registry,
/// never persisted.
#[derive(Debug, Clone)]
pub struct QuizDraft {
    pub id: Uuid,
    pub course_id: String,
    pub canvas_course_id: Option<String>,
    pub instructions: String,
    pub allocator: QuestionAllocator,
    pub selection: MaterialSelection,
    pub in_flight: bool,
}

impl QuizDraft {
    fn new(bounds: TotalBounds) -> Self {
        Self {
            id: Uuid::new_v4(),
            course_id: DEFAULT_COURSE_ID.to_string(),
            canvas_course_id: None,
            instructions: String::new(),
            allocator: QuestionAllocator::new(
                bounds,
                DEFAULT_TOTAL_QUESTIONS,
                Distribution::seed(),
            ),
            selection: MaterialSelection::new(),
            in_flight: false,
        }
    }

    pub fn view(&self) -> DraftView {
        DraftView {
            id: self.id,
            course_id: self.course_id.clone(),
            canvas_course_id: self.canvas_course_id.clone(),
            instructions: self.instructions.clone(),
            total_requested: self.allocator.total(),
            total_allocated: self.allocator.total_allocated(),
            question_counts: self.allocator.distribution().entries().to_vec(),
            selected_materials: self.selection.ids(),
            in_flight: self.in_flight,
        }
    }
}

/// In-memory registry of active configuration sessions. All mutations go
/// through here so the in-flight flag has a single owner.
pub struct DraftRegistry {
    drafts: RwLock<HashMap<Uuid, QuizDraft>>,
    bounds: TotalBounds,
}

impl DraftRegistry {
    pub fn new(bounds: TotalBounds) -> Self {
        Self {
            drafts: RwLock::new(HashMap::new()),
            bounds,
        }
    }

    pub async fn open(&self) -> DraftView {
        let draft = QuizDraft::new(self.bounds);
        let view = draft.view();
        self.drafts.write().await.insert(draft.id, draft);
        view
    }

    pub async fn get(&self, id: Uuid) -> Result<DraftView, DraftError> {
        self.drafts
            .read()
            .await
            .get(&id)
            .map(QuizDraft::view)
            .ok_or(DraftError::NotFound)
    }

    pub async fn set_total(&self, id: Uuid, total: u32) -> Result<DraftView, DraftError> {
        self.with_draft(id, |draft| draft.allocator.set_total(total))
            .await
    }

    pub async fn adjust_count(
        &self,
        id: Uuid,
        question_type: QuestionType,
        delta: i32,
    ) -> Result<DraftView, DraftError> {
        self.with_draft(id, |draft| {
            // A rejected step is a silent no-op; the returned view simply
            // shows the unchanged distribution.
            draft.allocator.adjust(question_type, delta);
        })
        .await
    }

    pub async fn toggle_material(
        &self,
        id: Uuid,
        material_id: &str,
    ) -> Result<DraftView, DraftError> {
        self.with_draft(id, |draft| {
            draft.selection.toggle(material_id);
        })
        .await
    }

    pub async fn update(
        &self,
        id: Uuid,
        req: UpdateDraftRequest,
    ) -> Result<DraftView, DraftError> {
        self.with_draft(id, |draft| {
            if let Some(course_id) = req.course_id {
                draft.course_id = course_id;
            }
            if let Some(canvas_course_id) = req.canvas_course_id {
                draft.canvas_course_id = Some(canvas_course_id);
            }
            if let Some(instructions) = req.instructions {
                draft.instructions = instructions;
            }
        })
        .await
    }

    /// Marks the draft in flight and returns a snapshot for the orchestrator.
    /// Fails with `InFlight` if a submission is already running; the caller
    /// must pair every success with `end_submission`.
    pub async fn begin_submission(&self, id: Uuid) -> Result<QuizDraft, DraftError> {
        let mut drafts = self.drafts.write().await;
        let draft = drafts.get_mut(&id).ok_or(DraftError::NotFound)?;
        if draft.in_flight {
            return Err(DraftError::InFlight);
        }
        draft.in_flight = true;
        Ok(draft.clone())
    }

    /// Discards an abandoned session. Refused while a submission is running
    /// so the orchestrator never loses the draft under its feet.
    pub async fn close(&self, id: Uuid) -> Result<(), DraftError> {
        let mut drafts = self.drafts.write().await;
        let draft = drafts.get(&id).ok_or(DraftError::NotFound)?;
        if draft.in_flight {
            return Err(DraftError::InFlight);
        }
        drafts.remove(&id);
        Ok(())
    }

    /// Clears the in-flight flag. Called on every path out of a submission,
    /// success or failure.
    pub async fn end_submission(&self, id: Uuid) {
        if let Some(draft) = self.drafts.write().await.get_mut(&id) {
            draft.in_flight = false;
        }
    }

    async fn with_draft<F>(&self, id: Uuid, mutate: F) -> Result<DraftView, DraftError>
    where
        F: FnOnce(&mut QuizDraft),
    {
        let mut drafts = self.drafts.write().await;
        let draft = drafts.get_mut(&id).ok_or(DraftError::NotFound)?;
        mutate(draft);
        Ok(draft.view())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> DraftRegistry {
        DraftRegistry::new(TotalBounds::default())
    }

    #[tokio::test]
    async fn open_seeds_a_settled_draft() {
        let registry = registry();
        let view = registry.open().await;
        assert_eq!(view.total_requested, 10);
        assert_eq!(view.total_allocated, 10);
        assert!(view.selected_materials.is_empty());
        assert!(!view.in_flight);
    }

    #[tokio::test]
    async fn mutations_against_an_unknown_draft_are_not_found() {
        let registry = registry();
        let missing = Uuid::new_v4();
        assert_eq!(
            registry.set_total(missing, 20).await.unwrap_err(),
            DraftError::NotFound
        );
        assert_eq!(
            registry.toggle_material(missing, "file-0").await.unwrap_err(),
            DraftError::NotFound
        );
    }

    #[tokio::test]
    async fn set_total_resettles_the_distribution() {
        let registry = registry();
        let view = registry.open().await;
        let updated = registry.set_total(view.id, 7).await.unwrap();
        assert_eq!(updated.total_requested, 7);
        assert_eq!(updated.total_allocated, 7);
    }

    #[tokio::test]
    async fn begin_submission_is_exclusive_until_ended() {
        let registry = registry();
        let view = registry.open().await;

        registry.begin_submission(view.id).await.unwrap();
        assert_eq!(
            registry.begin_submission(view.id).await.unwrap_err(),
            DraftError::InFlight
        );

        registry.end_submission(view.id).await;
        assert!(registry.begin_submission(view.id).await.is_ok());
    }

    #[tokio::test]
    async fn close_discards_the_session() {
        let registry = registry();
        let view = registry.open().await;

        registry.close(view.id).await.unwrap();
        assert_eq!(registry.get(view.id).await.unwrap_err(), DraftError::NotFound);
        assert_eq!(registry.close(view.id).await.unwrap_err(), DraftError::NotFound);
    }

    #[tokio::test]
    async fn close_is_refused_while_a_submission_is_running() {
        let registry = registry();
        let view = registry.open().await;

        registry.begin_submission(view.id).await.unwrap();
        assert_eq!(
            registry.close(view.id).await.unwrap_err(),
            DraftError::InFlight
        );

        registry.end_submission(view.id).await;
        assert!(registry.close(view.id).await.is_ok());
    }

    #[tokio::test]
    async fn update_patches_only_the_provided_fields() {
        let registry = registry();
        let view = registry.open().await;
        let updated = registry
            .update(
                view.id,
                UpdateDraftRequest {
                    instructions: Some("focus on chapters 1-3".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.course_id, "spn1130");
        assert_eq!(updated.instructions, "focus on chapters 1-3");
    }
}
