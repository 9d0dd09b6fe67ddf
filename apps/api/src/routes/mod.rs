pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::dialogue::handlers as dialogue;
use crate::export::handlers as export;
use crate::layout::handlers as layout;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Dialogue API
        .route("/api/v1/sessions", post(dialogue::handle_create_session))
        .route(
            "/api/v1/sessions/:id/messages",
            post(dialogue::handle_submit),
        )
        .route(
            "/api/v1/sessions/:id/transcript",
            get(dialogue::handle_get_transcript),
        )
        .route(
            "/api/v1/sessions/:id/resume",
            get(dialogue::handle_get_resume),
        )
        // Preview API
        .route("/api/v1/sessions/:id/preview", get(layout::handle_preview))
        .route("/api/v1/sessions/:id/events", get(layout::handle_events))
        // Export API
        .route("/api/v1/sessions/:id/export", post(export::handle_export))
        .with_state(state)
}
