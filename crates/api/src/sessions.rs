//! Per-session generation slots.
//!
//! Each browser session drives at most one generation at a time. The slot
//! keeps the finished status until the session clears it or leaves it
//! unread for longer than the result TTL.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use medidoc_core::error::CoreError;
use medidoc_pipeline::{GenerationHandle, GenerationRequest, GenerationStatus, SummaryOrchestrator};

const MSG_GENERATION_RUNNING: &str = "このセッションでは既に文書を作成中です";

/// How long a finished result survives without being read.
pub const DEFAULT_RESULT_TTL: Duration = Duration::from_secs(30 * 60);

struct Slot {
    handle: GenerationHandle,
    last_access: Instant,
}

impl Slot {
    fn is_stale(&self, now: Instant, ttl: Duration) -> bool {
        self.handle.is_finished() && now.duration_since(self.last_access) >= ttl
    }
}

pub struct SessionSlots {
    slots: Mutex<HashMap<String, Slot>>,
    result_ttl: Duration,
}

impl SessionSlots {
    pub fn new(result_ttl: Duration) -> Self {
        Self {
            slots: Mutex::new(HashMap::new()),
            result_ttl,
        }
    }

    /// Start a generation for `session_id`, replacing a finished one.
    pub fn start(
        &self,
        session_id: &str,
        orchestrator: Arc<SummaryOrchestrator>,
        request: GenerationRequest,
    ) -> Result<GenerationStatus, CoreError> {
        let mut slots = self.lock()?;
        if slots.get(session_id).is_some_and(|s| !s.handle.is_finished()) {
            return Err(CoreError::Conflict(MSG_GENERATION_RUNNING.into()));
        }

        let handle = GenerationHandle::spawn(orchestrator, request);
        let status = handle.status();
        slots.insert(
            session_id.to_string(),
            Slot {
                handle,
                last_access: Instant::now(),
            },
        );
        Ok(status)
    }

    pub fn status(&self, session_id: &str) -> Result<Option<GenerationStatus>, CoreError> {
        let mut slots = self.lock()?;
        Ok(slots.get_mut(session_id).map(|slot| {
            slot.last_access = Instant::now();
            slot.handle.status()
        }))
    }

    /// Drop a finished result. Returns `false` when the slot is empty.
    pub fn clear(&self, session_id: &str) -> Result<bool, CoreError> {
        let mut slots = self.lock()?;
        match slots.get(session_id) {
            None => Ok(false),
            Some(slot) if !slot.handle.is_finished() => {
                Err(CoreError::Conflict(MSG_GENERATION_RUNNING.into()))
            }
            Some(_) => {
                slots.remove(session_id);
                Ok(true)
            }
        }
    }

    /// Lock the map, evicting finished results nobody read within the TTL.
    /// Running generations are never evicted.
    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, Slot>>, CoreError> {
        let mut slots = self
            .slots
            .lock()
            .map_err(|_| CoreError::Internal("session slots lock poisoned".into()))?;

        let now = Instant::now();
        let before = slots.len();
        slots.retain(|_, slot| !slot.is_stale(now, self.result_ttl));
        let evicted = before - slots.len();
        if evicted > 0 {
            tracing::debug!(evicted, remaining = slots.len(), "Evicted stale generation results");
        }
        Ok(slots)
    }
}
