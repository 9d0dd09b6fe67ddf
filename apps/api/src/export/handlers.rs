//! HTTP handler for document export.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::export::exporter::export_to_file;
use crate::models::{AccentColor, Template};
use crate::session::ExportGuard;
use crate::state::AppState;

#[derive(Deserialize, Default)]
pub struct ExportRequest {
    pub template: Option<Template>,
    pub accent: Option<AccentColor>,
}

#[derive(Serialize)]
pub struct ExportResponse {
    pub filename: String,
}

/// POST /api/v1/sessions/:id/export
///
/// Writes the rendered document to the export directory. One export per
/// session at a time; a second request while one is running gets 409.
pub async fn handle_export(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    body: Option<Json<ExportRequest>>,
) -> Result<Json<ExportResponse>, AppError> {
    let Json(req) = body.unwrap_or_default();

    let session = state
        .sessions
        .get(session_id)
        .ok_or_else(|| AppError::NotFound(format!("Session {session_id} not found")))?;
    let flag = {
        let session = session.lock().await;
        session.export_in_flight.clone()
    };

    let record = state
        .store
        .load(session_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Session {session_id} not found")))?;

    if !record.has_any_data() {
        return Err(AppError::Validation(
            "Nothing to export yet: the resume has no data".to_string(),
        ));
    }

    let guard = ExportGuard::acquire(&flag).ok_or(AppError::ExportInFlight)?;

    let template = req.template.unwrap_or(Template::DEFAULT);
    let accent = req.accent.unwrap_or(AccentColor::DEFAULT);
    let export_dir = state.config.export_dir.clone();

    // Layout and file writing are CPU/blocking work; keep them off the runtime.
    let path = tokio::task::spawn_blocking(move || {
        let result = export_to_file(session_id, &record, template, accent, &export_dir);
        drop(guard);
        result
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("Export task panicked: {e}")))??;

    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    tracing::info!(%session_id, %filename, "exported resume document");

    Ok(Json(ExportResponse { filename }))
}
