use axum::http::StatusCode;
use thiserror::Error;
use url::Url;
use uuid::Uuid;

use crate::models::material::FilePayload;
use crate::models::quiz::{GenerateQuizRequest, GenerateQuizResponse, QuizRecord, RelayErrorBody};
use crate::services::draft_service::DraftError;
use crate::services::quiz_store::QuizStore;
use crate::services::request_builder::{QuizRequestBuilder, ValidationError};
use crate::services::AppState;

/// Everything that can take a submission off the happy path. Validation and
/// draft errors block before anything leaves the process; transport and
/// relay errors surface the relay's message where one exists. No variant
/// leaves a draft's in-flight flag set.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Draft(#[from] DraftError),
    #[error("Failed to reach the generation relay: {0}")]
    Transport(String),
    #[error("Invalid response from the generation relay")]
    MalformedResponse,
    #[error("{message}")]
    Relay { status: u16, message: String },
    #[error("Failed to persist the generated quiz")]
    Commit(#[source] anyhow::Error),
}

impl GenerationError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            GenerationError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            GenerationError::Draft(DraftError::NotFound) => StatusCode::NOT_FOUND,
            GenerationError::Draft(DraftError::InFlight) => StatusCode::CONFLICT,
            GenerationError::Transport(_)
            | GenerationError::MalformedResponse
            | GenerationError::Relay { .. } => StatusCode::BAD_GATEWAY,
            GenerationError::Commit(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Drives one submission end to end: validate preconditions, post the
/// request to the external relay, interpret the response, commit the result
/// to the quiz store.
pub struct GenerationService {
    http: reqwest::Client,
    relay_url: String,
}

impl GenerationService {
    pub fn new(state: &AppState) -> Self {
        Self {
            http: state.http.clone(),
            relay_url: state.config.relay_url.clone(),
        }
    }

    /// Submits the draft's configuration. Exactly one submission per draft
    /// may be in flight; the flag is cleared on every exit path so a failed
    /// attempt can be resubmitted immediately.
    pub async fn generate_from_draft(
        &self,
        state: &AppState,
        draft_id: Uuid,
    ) -> Result<QuizRecord, GenerationError> {
        let draft = state.drafts.begin_submission(draft_id).await?;
        let result = async {
            tracing::debug!("Validating draft {} for generation", draft_id);

            let mut builder = QuizRequestBuilder::from_draft(&draft);
            if let Some(material) = state.materials.first_selected(&draft.selection.ids()).await {
                let payload =
                    FilePayload::Base64Encoded(material.data.unwrap_or_default());
                builder = builder.with_file(material.name, payload);
            }
            let request = builder.build()?;

            self.generate(request, &state.quizzes).await
        }
        .await;
        state.drafts.end_submission(draft_id).await;
        result
    }

    /// One-shot path taking the client wire body directly. Runs through the
    /// same builder so validation and payload normalization are identical.
    pub async fn generate_from_request(
        &self,
        body: GenerateQuizRequest,
        quizzes: &QuizStore,
    ) -> Result<QuizRecord, GenerationError> {
        let request = QuizRequestBuilder::new(
            body.course_id,
            body.canvas_course_id,
            body.materials,
            body.question_counts,
            body.instructions,
        )
        .with_file(body.file_name, FilePayload::Base64Encoded(body.file_data))
        .build()?;

        self.generate(request, quizzes).await
    }

    async fn generate(
        &self,
        request: GenerateQuizRequest,
        quizzes: &QuizStore,
    ) -> Result<QuizRecord, GenerationError> {
        tracing::info!(
            "Submitting generation request: course={}, materials={}, questions={}",
            request.course_id,
            request.materials.len(),
            request
                .question_counts
                .values()
                .map(|&c| u64::from(c))
                .sum::<u64>()
        );

        let response = self.call_relay(&request).await?;

        let record = QuizRecord::from(response);
        quizzes
            .append(record.clone())
            .await
            .map_err(GenerationError::Commit)?;

        tracing::info!("Quiz committed: id={}", record.id);
        Ok(record)
    }

    async fn call_relay(
        &self,
        request: &GenerateQuizRequest,
    ) -> Result<GenerateQuizResponse, GenerationError> {
        let url = self.endpoint("generate-quiz")?;

        let response = self
            .http
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(|e| GenerationError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| GenerationError::Transport(e.to_string()))?;

        interpret_relay_response(status, &body)
    }

    fn endpoint(&self, path: &str) -> Result<Url, GenerationError> {
        Url::parse(&self.relay_url)
            .and_then(|base| base.join(path))
            .map_err(|e| GenerationError::Transport(format!("Invalid relay URL: {}", e)))
    }
}

/// Interprets the relay's response body. Anything that is not well-formed
/// JSON becomes a generic parse failure rather than propagating the fault;
/// a non-2xx status surfaces the relay's `error` field when present.
fn interpret_relay_response(
    status: StatusCode,
    body: &str,
) -> Result<GenerateQuizResponse, GenerationError> {
    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|_| GenerationError::MalformedResponse)?;

    if !status.is_success() {
        let message = serde_json::from_value::<RelayErrorBody>(value)
            .ok()
            .and_then(|body| body.error)
            .unwrap_or_else(|| "Failed to generate quiz".to_string());
        return Err(GenerationError::Relay {
            status: status.as_u16(),
            message,
        });
    }

    serde_json::from_value(value).map_err(|_| GenerationError::MalformedResponse)
}
