use std::sync::Arc;

use crate::config::Config;
use crate::session::SessionRegistry;
use crate::store::ResumeStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable persistence port. Default: the in-process `MemoryStore`.
    pub store: Arc<dyn ResumeStore>,
    pub sessions: Arc<SessionRegistry>,
    pub config: Config,
}
