//! The persistence port: load on session start, save on every atomic mutation,
//! subscribe for change notifications.

pub mod memory;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::watch;
use uuid::Uuid;

use crate::models::ResumeRecord;

pub use memory::MemoryStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Session {0} not found")]
    SessionNotFound(Uuid),
    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Write-time semantics: `merge = false` fully replaces the stored record
/// (session-start reset); `merge = true` field-merges, leaving empty incoming
/// fields untouched.
///
/// Callers must serialize saves for a given session; the store commits writes
/// in call order, and the dialogue handlers guarantee call order by holding the
/// session lock across submit + save.
#[async_trait]
pub trait ResumeStore: Send + Sync {
    async fn load(&self, session: Uuid) -> Result<Option<ResumeRecord>, StoreError>;

    async fn save(
        &self,
        session: Uuid,
        record: &ResumeRecord,
        merge: bool,
    ) -> Result<(), StoreError>;

    /// At-least-once change notifications for the session's record. The watch
    /// channel may coalesce or re-deliver states; consumers re-render the
    /// latest value, which is idempotent. Returns `None` for a session the
    /// store has never seen; subscribing must not create state.
    fn subscribe(&self, session: Uuid) -> Option<watch::Receiver<ResumeRecord>>;
}
