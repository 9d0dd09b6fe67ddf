//! The in-process session registry.
//!
//! Each session owns its dialogue engine behind a `tokio::sync::Mutex`; handlers
//! hold the lock across submit + persist, so a submission is processed to
//! completion before the next one for the same session starts, and saves commit
//! in submission order.
//!
//! The registry never evicts: completed sessions stay resident until the
//! process exits, same as the in-memory store slots they pair with.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::Mutex as AsyncMutex;
use uuid::Uuid;

use crate::dialogue::engine::DialogueEngine;

pub struct Session {
    pub engine: DialogueEngine,
    /// Set while an export runs for this session; the export endpoint rejects
    /// concurrent requests instead of interleaving them.
    pub export_in_flight: Arc<AtomicBool>,
}

impl Session {
    fn new() -> Self {
        Session {
            engine: DialogueEngine::new(),
            export_in_flight: Arc::new(AtomicBool::new(false)),
        }
    }
}

#[derive(Default)]
pub struct SessionRegistry {
    sessions: Mutex<HashMap<Uuid, Arc<AsyncMutex<Session>>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a fresh session and returns its id and handle.
    pub fn create(&self) -> (Uuid, Arc<AsyncMutex<Session>>) {
        let id = Uuid::new_v4();
        let session = Arc::new(AsyncMutex::new(Session::new()));
        self.sessions
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(id, session.clone());
        (id, session)
    }

    pub fn get(&self, id: Uuid) -> Option<Arc<AsyncMutex<Session>>> {
        self.sessions
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(&id)
            .cloned()
    }
}

/// Clears the in-flight flag when dropped, so a failed export always re-enables
/// the download affordance.
pub struct ExportGuard {
    flag: Arc<AtomicBool>,
}

impl ExportGuard {
    /// Acquires the flag; `None` if an export is already running.
    pub fn acquire(flag: &Arc<AtomicBool>) -> Option<Self> {
        if flag
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
        {
            Some(ExportGuard { flag: flag.clone() })
        } else {
            None
        }
    }
}

impl Drop for ExportGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
