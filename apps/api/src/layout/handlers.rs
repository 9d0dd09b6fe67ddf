//! HTTP handlers for the live preview.

use std::time::Duration;

use axum::{
    extract::{Path, Query, State},
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse,
    },
    Json,
};
use futures_util::stream;
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::layout::renderer::{render, RenderedResume};
use crate::models::{AccentColor, Template};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct PreviewParams {
    pub template: Option<Template>,
    pub accent: Option<AccentColor>,
}

/// GET /api/v1/sessions/:id/preview?template=modern&accent=blue
///
/// Renders the current record into the laid-out line model. Pure over the
/// stored record; switching template or accent never touches the data.
pub async fn handle_preview(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Query(params): Query<PreviewParams>,
) -> Result<Json<RenderedResume>, AppError> {
    let record = state
        .store
        .load(session_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Session {session_id} not found")))?;

    let template = params.template.unwrap_or(Template::DEFAULT);
    let accent = params.accent.unwrap_or(AccentColor::DEFAULT);
    Ok(Json(render(&record, template, accent)))
}

/// GET /api/v1/sessions/:id/events
///
/// Streams the record as Server-Sent Events: the current state immediately,
/// then one event per committed save. The watch channel may coalesce rapid
/// saves into one delivery; each event carries the full record, so replaying
/// the latest one is always safe.
pub async fn handle_events(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let rx = state
        .store
        .subscribe(session_id)
        .ok_or_else(|| AppError::NotFound(format!("Session {session_id} not found")))?;

    let s = stream::unfold((rx, true), move |(mut rx, first)| async move {
        if !first && rx.changed().await.is_err() {
            return None;
        }
        let record = rx.borrow_and_update().clone();
        let event = match Event::default().event("resume").json_data(&record) {
            Ok(ev) => ev,
            Err(e) => {
                tracing::error!("Failed to serialize resume event: {e}");
                return None;
            }
        };
        Some((Ok::<Event, std::convert::Infallible>(event), (rx, false)))
    });

    Ok(Sse::new(s).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("ping"),
    ))
}
