//! In-process implementation of the persistence port.
//!
//! A mutex-guarded map of session records, each paired with a `watch` channel
//! that fans change notifications out to the SSE preview feed. The single lock
//! makes per-session commits total-ordered across all writers.
//!
//! Slots are never evicted: a record lives until the process exits. Acceptable
//! for an in-process store; a capped or TTL-based policy belongs in a real
//! backend implementation of the port.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::watch;
use uuid::Uuid;

use crate::models::ResumeRecord;
use crate::store::{ResumeStore, StoreError};

struct SessionSlot {
    record: ResumeRecord,
    notifier: watch::Sender<ResumeRecord>,
}

impl SessionSlot {
    fn new(record: ResumeRecord) -> Self {
        let (notifier, _) = watch::channel(record.clone());
        SessionSlot { record, notifier }
    }
}

#[derive(Default)]
pub struct MemoryStore {
    sessions: Mutex<HashMap<Uuid, SessionSlot>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<Uuid, SessionSlot>>, StoreError> {
        self.sessions
            .lock()
            .map_err(|e| StoreError::Backend(format!("store lock poisoned: {e}")))
    }
}

#[async_trait]
impl ResumeStore for MemoryStore {
    async fn load(&self, session: Uuid) -> Result<Option<ResumeRecord>, StoreError> {
        let sessions = self.lock()?;
        Ok(sessions.get(&session).map(|slot| slot.record.clone()))
    }

    async fn save(
        &self,
        session: Uuid,
        record: &ResumeRecord,
        merge: bool,
    ) -> Result<(), StoreError> {
        let mut sessions = self.lock()?;
        let slot = sessions
            .entry(session)
            .or_insert_with(|| SessionSlot::new(ResumeRecord::default()));
        if merge {
            slot.record.merge_from(record);
        } else {
            slot.record = record.clone();
        }
        // send_replace never fails, even with no live subscribers.
        slot.notifier.send_replace(slot.record.clone());
        Ok(())
    }

    fn subscribe(&self, session: Uuid) -> Option<watch::Receiver<ResumeRecord>> {
        // Read-only: an unknown session id must not create a slot.
        let sessions = self.lock().ok()?;
        sessions
            .get(&session)
            .map(|slot| slot.notifier.subscribe())
    }
}
