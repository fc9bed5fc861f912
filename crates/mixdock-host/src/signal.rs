//! Named change signals with calldata-style payloads
//!
//! Callbacks run on the emitting thread. Subscribers that drive UI state
//! must forward through a [`crate::UiQueue`] instead of touching widgets.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use crate::error::{HostError, Result};

pub type SignalCallback = Arc<dyn Fn(&SignalData) + Send + Sync + 'static>;

/// Payload of a signal emission, keyed by parameter name.
#[derive(Debug, Default, Clone)]
pub struct SignalData {
    ints: HashMap<&'static str, i64>,
    floats: HashMap<&'static str, f64>,
}

impl SignalData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_int(mut self, key: &'static str, value: i64) -> Self {
        self.ints.insert(key, value);
        self
    }

    pub fn with_float(mut self, key: &'static str, value: f64) -> Self {
        self.floats.insert(key, value);
        self
    }

    pub fn int(&self, key: &str) -> Option<i64> {
        self.ints.get(key).copied()
    }

    pub fn float(&self, key: &str) -> Option<f64> {
        self.floats.get(key).copied()
    }
}

struct HubInner {
    slots: HashMap<&'static str, Vec<(u64, SignalCallback)>>,
    next_token: u64,
}

/// Signal hub keyed by event name. Signals must be declared up front;
/// connecting to an undeclared name is an error.
#[derive(Clone)]
pub struct SignalHub {
    inner: Arc<Mutex<HubInner>>,
}

impl SignalHub {
    pub fn new(names: &[&'static str]) -> Self {
        let slots = names.iter().map(|n| (*n, Vec::new())).collect();
        Self {
            inner: Arc::new(Mutex::new(HubInner { slots, next_token: 0 })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HubInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Subscribe to a named signal. The returned connection disconnects on
    /// drop.
    pub fn connect(
        &self,
        name: &'static str,
        callback: impl Fn(&SignalData) + Send + Sync + 'static,
    ) -> Result<SignalConnection> {
        let mut inner = self.lock();
        let token = inner.next_token;
        inner.next_token += 1;
        let slot = inner
            .slots
            .get_mut(name)
            .ok_or(HostError::UnknownSignal(name))?;
        slot.push((token, Arc::new(callback)));
        Ok(SignalConnection {
            hub: Arc::downgrade(&self.inner),
            name,
            token,
        })
    }

    /// Invoke all callbacks registered for `name`. Undeclared names are
    /// ignored; emission is host-internal.
    pub fn emit(&self, name: &'static str, data: &SignalData) {
        // Snapshot the callbacks so they can reconnect/disconnect freely
        let callbacks: Vec<SignalCallback> = {
            let inner = self.lock();
            match inner.slots.get(name) {
                Some(slot) => slot.iter().map(|(_, cb)| cb.clone()).collect(),
                None => return,
            }
        };
        for cb in callbacks {
            cb(data);
        }
    }
}

/// RAII handle for one signal subscription.
pub struct SignalConnection {
    hub: Weak<Mutex<HubInner>>,
    name: &'static str,
    token: u64,
}

impl Drop for SignalConnection {
    fn drop(&mut self) {
        let Some(inner) = self.hub.upgrade() else {
            return;
        };
        let mut inner = inner.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(slot) = inner.slots.get_mut(self.name) {
            slot.retain(|(token, _)| *token != self.token);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};

    #[test]
    fn connect_and_emit_delivers_payload() {
        let hub = SignalHub::new(&["volume"]);
        let seen = Arc::new(AtomicI64::new(0));
        let seen_cb = seen.clone();
        let _conn = hub
            .connect("volume", move |data| {
                seen_cb.store((data.float("volume").unwrap() * 100.0) as i64, Ordering::SeqCst);
            })
            .unwrap();

        hub.emit("volume", &SignalData::new().with_float("volume", 0.25));
        assert_eq!(seen.load(Ordering::SeqCst), 25);
    }

    #[test]
    fn unknown_signal_name_is_an_error() {
        let hub = SignalHub::new(&["volume"]);
        assert!(matches!(
            hub.connect("bogus", |_| {}),
            Err(HostError::UnknownSignal("bogus"))
        ));
    }

    #[test]
    fn dropping_connection_disconnects() {
        let hub = SignalHub::new(&["tick"]);
        let count = Arc::new(AtomicUsize::new(0));

        let count_a = count.clone();
        let conn_a = hub.connect("tick", move |_| {
            count_a.fetch_add(1, Ordering::SeqCst);
        });
        let count_b = count.clone();
        let _conn_b = hub.connect("tick", move |_| {
            count_b.fetch_add(1, Ordering::SeqCst);
        });

        hub.emit("tick", &SignalData::new());
        assert_eq!(count.load(Ordering::SeqCst), 2);

        drop(conn_a);
        hub.emit("tick", &SignalData::new());
        assert_eq!(count.load(Ordering::SeqCst), 3);
    }
}
