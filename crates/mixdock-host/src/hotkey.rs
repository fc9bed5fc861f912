//! Host hotkey registry
//!
//! Registration hands out ids the plugin stores alongside its own data;
//! the host's dispatcher (or the UI, for direct triggering) invokes the
//! callback by id.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use mixdock_core::HotkeyId;
use tracing::debug;

use crate::error::{HostError, Result};

type HotkeyCallback = Arc<dyn Fn() + Send + Sync + 'static>;

struct HotkeyEntry {
    name: String,
    callback: HotkeyCallback,
}

struct RegistryInner {
    next_id: u64,
    entries: HashMap<HotkeyId, HotkeyEntry>,
}

/// Shared handle to the host's hotkey table.
#[derive(Clone)]
pub struct HotkeyRegistry {
    inner: Arc<Mutex<RegistryInner>>,
}

impl HotkeyRegistry {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(RegistryInner {
                next_id: 1,
                entries: HashMap::new(),
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, RegistryInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn register(
        &self,
        name: impl Into<String>,
        callback: impl Fn() + Send + Sync + 'static,
    ) -> HotkeyId {
        let name = name.into();
        let mut inner = self.lock();
        let id = HotkeyId(inner.next_id);
        inner.next_id += 1;
        debug!("registered hotkey '{name}' as {id}");
        inner.entries.insert(
            id,
            HotkeyEntry {
                name,
                callback: Arc::new(callback),
            },
        );
        id
    }

    /// Remove a hotkey. Unknown ids are a no-op, matching host behavior
    /// for already-released keys.
    pub fn unregister(&self, id: HotkeyId) {
        if let Some(entry) = self.lock().entries.remove(&id) {
            debug!("unregistered hotkey '{}' ({id})", entry.name);
        }
    }

    pub fn is_registered(&self, id: HotkeyId) -> bool {
        self.lock().entries.contains_key(&id)
    }

    /// Invoke the callback registered under `id`.
    pub fn trigger(&self, id: HotkeyId) -> Result<()> {
        // Snapshot outside the lock; the callback may re-enter the registry
        let callback = {
            let inner = self.lock();
            inner
                .entries
                .get(&id)
                .map(|entry| entry.callback.clone())
                .ok_or(HostError::UnknownHotkey(id))?
        };
        callback();
        Ok(())
    }
}

impl Default for HotkeyRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn trigger_invokes_callback() {
        let registry = HotkeyRegistry::new();
        let fired = Arc::new(AtomicUsize::new(0));
        let fired_cb = fired.clone();
        let id = registry.register("soundboard.play.horn", move || {
            fired_cb.fetch_add(1, Ordering::SeqCst);
        });

        registry.trigger(id).unwrap();
        registry.trigger(id).unwrap();
        assert_eq!(fired.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn unregistered_id_is_an_error() {
        let registry = HotkeyRegistry::new();
        let id = registry.register("temp", || {});
        registry.unregister(id);

        assert!(!registry.is_registered(id));
        assert!(matches!(
            registry.trigger(id),
            Err(HostError::UnknownHotkey(_))
        ));

        // Double unregister is harmless
        registry.unregister(id);
    }
}
