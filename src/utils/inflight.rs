// src/utils/inflight.rs

use std::{
    collections::HashSet,
    sync::{Arc, Mutex, MutexGuard},
};

/// Tracks outstanding calls per (client, operation) so a client cannot fire
/// the same generative request twice while the first is still running.
#[derive(Debug, Default, Clone)]
pub struct InFlight {
    keys: Arc<Mutex<HashSet<String>>>,
}

impl InFlight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims the slot for `client`/`operation`.
    /// Returns `None` when a call for the same pair is already pending.
    pub fn try_acquire(&self, client: &str, operation: &str) -> Option<InFlightGuard> {
        let key = format!("{}:{}", client, operation);
        if !lock(&self.keys).insert(key.clone()) {
            return None;
        }
        Some(InFlightGuard {
            keys: Arc::clone(&self.keys),
            key,
        })
    }
}

/// Releases the slot when dropped, on success, error or cancellation alike.
#[derive(Debug)]
pub struct InFlightGuard {
    keys: Arc<Mutex<HashSet<String>>>,
    key: String,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        lock(&self.keys).remove(&self.key);
    }
}

fn lock(keys: &Mutex<HashSet<String>>) -> MutexGuard<'_, HashSet<String>> {
    keys.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
