//! Axum route handlers for the Session API.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::candidate::models::CandidateForm;
use crate::errors::AppError;
use crate::session::models::SessionState;
use crate::session::orchestrator::{submit_candidate, SubmissionOutcome};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    pub answer: String,
}

#[derive(Debug, Deserialize)]
pub struct TextInput {
    pub text: String,
}

/// Reply to a free-text action. `reply` is absent when the input was ignored.
#[derive(Debug, Serialize)]
pub struct InteractionResponse {
    pub reply: Option<String>,
    pub session: SessionState,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> (StatusCode, Json<SessionState>) {
    let session = state.sessions.create().await;
    (StatusCode::CREATED, Json(session))
}

/// GET /api/v1/sessions/:id
///
/// Readable after exit, so the final transcript can still be fetched.
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionState>, AppError> {
    Ok(Json(state.sessions.get(id).await?))
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.sessions.remove(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/sessions/:id/reset
pub async fn handle_reset_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionState>, AppError> {
    Ok(Json(state.sessions.reset(id).await?))
}

/// POST /api/v1/sessions/:id/candidate
///
/// Records the candidate form and generates the question set.
/// Generation failures come back as `error` in a 200 response, not as an HTTP error.
pub async fn handle_submit_candidate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(form): Json<CandidateForm>,
) -> Result<Json<SubmissionOutcome>, AppError> {
    let outcome = submit_candidate(
        &state.sessions,
        state.generator.as_ref(),
        &state.config,
        id,
        form,
    )
    .await?;
    Ok(Json(outcome))
}

/// PUT /api/v1/sessions/:id/answers/:index
pub async fn handle_record_answer(
    State(state): State<AppState>,
    Path((id, index)): Path<(Uuid, usize)>,
    Json(request): Json<AnswerRequest>,
) -> Result<Json<SessionState>, AppError> {
    let session = state
        .sessions
        .update_active(id, |session| {
            session.record_answer(index, request.answer)?;
            Ok(session.clone())
        })
        .await?;
    Ok(Json(session))
}

/// POST /api/v1/sessions/:id/follow-up
pub async fn handle_follow_up(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<TextInput>,
) -> Result<Json<InteractionResponse>, AppError> {
    let response = state
        .sessions
        .update_active(id, |session| {
            let reply = session.request_follow_up(&input.text);
            Ok(InteractionResponse {
                reply,
                session: session.clone(),
            })
        })
        .await?;
    Ok(Json(response))
}

/// POST /api/v1/sessions/:id/messages
///
/// Fallback free-text input. "exit", "quit" or "bye" end the session.
pub async fn handle_message(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<TextInput>,
) -> Result<Json<InteractionResponse>, AppError> {
    let response = state
        .sessions
        .update_active(id, |session| {
            let reply = session.handle_message(&input.text).map(str::to_string);
            Ok(InteractionResponse {
                reply,
                session: session.clone(),
            })
        })
        .await?;

    if response.session.is_exited() {
        tracing::info!("Session {id} exited");
    }
    Ok(Json(response))
}
