//! HTTP handlers for the conversational form.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::dialogue::engine::{Message, SubmitOutcome};
use crate::dialogue::step::Step;
use crate::errors::AppError;
use crate::models::ResumeRecord;
use crate::state::AppState;

#[derive(Serialize)]
pub struct SessionResponse {
    pub session_id: Uuid,
    pub current_step: Step,
    pub transcript: Vec<Message>,
}

#[derive(Deserialize)]
pub struct SubmitRequest {
    pub text: String,
}

#[derive(Serialize)]
pub struct SubmitResponse {
    /// False when the input was rejected (empty on a required step) or the
    /// dialogue is already complete.
    pub accepted: bool,
    pub current_step: Step,
    pub terminal: bool,
    /// Transcript entries appended by this submission (user echo + bot reply).
    pub new_messages: Vec<Message>,
}

/// POST /api/v1/sessions
///
/// Starts a new session. The stored record is fully replaced with the empty
/// state; prior data for a returning user is deliberately discarded.
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> Result<Json<SessionResponse>, AppError> {
    let (session_id, session) = state.sessions.create();
    state
        .store
        .save(session_id, &ResumeRecord::default(), false)
        .await?;

    let session = session.lock().await;
    tracing::info!(%session_id, "session started");
    Ok(Json(SessionResponse {
        session_id,
        current_step: session.engine.current_step(),
        transcript: session.engine.transcript().to_vec(),
    }))
}

/// POST /api/v1/sessions/:id/messages
///
/// Processes one user submission to completion: the session lock is held across
/// the state transition and the persistence write, so overlapping submissions
/// for a session are serialized rather than interleaved.
pub async fn handle_submit(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(req): Json<SubmitRequest>,
) -> Result<Json<SubmitResponse>, AppError> {
    let session = state
        .sessions
        .get(session_id)
        .ok_or_else(|| AppError::NotFound(format!("Session {session_id} not found")))?;
    let mut session = session.lock().await;

    let before = session.engine.transcript().len();
    let outcome = session.engine.submit(&req.text);

    if let SubmitOutcome::Accepted { persisted: true } = outcome {
        state
            .store
            .save(session_id, session.engine.record(), true)
            .await?;
    }

    Ok(Json(SubmitResponse {
        accepted: matches!(outcome, SubmitOutcome::Accepted { .. }),
        current_step: session.engine.current_step(),
        terminal: session.engine.current_step().is_terminal(),
        new_messages: session.engine.transcript()[before..].to_vec(),
    }))
}

/// GET /api/v1/sessions/:id/transcript
pub async fn handle_get_transcript(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<Vec<Message>>, AppError> {
    let session = state
        .sessions
        .get(session_id)
        .ok_or_else(|| AppError::NotFound(format!("Session {session_id} not found")))?;
    let session = session.lock().await;
    Ok(Json(session.engine.transcript().to_vec()))
}

/// GET /api/v1/sessions/:id/resume
pub async fn handle_get_resume(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<ResumeRecord>, AppError> {
    let record = state
        .store
        .load(session_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Session {session_id} not found")))?;
    Ok(Json(record))
}
