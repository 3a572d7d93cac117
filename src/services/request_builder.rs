use std::collections::BTreeMap;
use thiserror::Error;

use crate::models::material::FilePayload;
use crate::models::quiz::GenerateQuizRequest;
use crate::models::QuestionType;
use crate::services::draft_service::QuizDraft;

/// Precondition failures that block a submission before anything leaves the
/// process. Each variant carries the exact message shown to the user.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please select at least one material")]
    NoMaterialSelected,
    #[error("Please add at least one question")]
    NoQuestionsAllocated,
    #[error("Please select a file from the materials")]
    MaterialNotFound,
    #[error("File data is missing. Please upload the file again.")]
    MissingFileData,
}

/// Assembles one immutable `GenerateQuizRequest` from the configuration
/// session plus the resolved file payload, normalizing the payload encoding.
pub struct QuizRequestBuilder {
    course_id: String,
    canvas_course_id: Option<String>,
    materials: Vec<String>,
    question_counts: BTreeMap<QuestionType, u32>,
    instructions: String,
    file: Option<(String, FilePayload)>,
}

impl QuizRequestBuilder {
    pub fn new(
        course_id: String,
        canvas_course_id: Option<String>,
        materials: Vec<String>,
        question_counts: BTreeMap<QuestionType, u32>,
        instructions: String,
    ) -> Self {
        Self {
            course_id,
            canvas_course_id,
            materials,
            question_counts,
            instructions,
            file: None,
        }
    }

    pub fn from_draft(draft: &QuizDraft) -> Self {
        Self::new(
            draft.course_id.clone(),
            draft.canvas_course_id.clone(),
            draft.selection.ids(),
            draft.allocator.distribution().to_wire_counts(),
            draft.instructions.clone(),
        )
    }

    pub fn with_file(mut self, name: String, payload: FilePayload) -> Self {
        self.file = Some((name, payload));
        self
    }

    /// Validates the preconditions in order and produces the request. The
    /// payload is normalized to a bare base64 body here and nowhere else.
    pub fn build(self) -> Result<GenerateQuizRequest, ValidationError> {
        if self.materials.is_empty() {
            return Err(ValidationError::NoMaterialSelected);
        }

        // Counts arrive from the wire on the one-shot path, so sum in u64
        // rather than trusting them to stay within u32 together.
        let total: u64 = self.question_counts.values().map(|&c| u64::from(c)).sum();
        if total == 0 {
            return Err(ValidationError::NoQuestionsAllocated);
        }

        let (file_name, payload) = self.file.ok_or(ValidationError::MaterialNotFound)?;
        let file_data = payload.into_base64_body();
        if file_data.is_empty() {
            return Err(ValidationError::MissingFileData);
        }

        Ok(GenerateQuizRequest {
            course_id: self.course_id,
            canvas_course_id: self.canvas_course_id,
            materials: self.materials,
            question_counts: self.question_counts,
            instructions: self.instructions,
            file_data,
            file_name,
        })
    }
}
