//! Cross-thread UI dispatch queue
//!
//! The host's asynchronous method-invocation facility: change callbacks
//! post from whatever thread they run on, the UI thread drains once per
//! frame. A waker hook lets the UI request a repaint when something lands.

use std::sync::{Arc, Mutex, PoisonError};

use crossbeam_channel::{unbounded, Receiver, Sender};

type Waker = Box<dyn Fn() + Send + Sync + 'static>;

/// Receiving end, owned by the UI thread.
pub struct UiQueue<T> {
    tx: Sender<T>,
    rx: Receiver<T>,
    waker: Arc<Mutex<Option<Waker>>>,
}

/// Posting end, clonable into callbacks on any thread.
pub struct UiSender<T> {
    tx: Sender<T>,
    waker: Arc<Mutex<Option<Waker>>>,
}

impl<T> UiQueue<T> {
    pub fn new() -> Self {
        let (tx, rx) = unbounded();
        Self {
            tx,
            rx,
            waker: Arc::new(Mutex::new(None)),
        }
    }

    pub fn sender(&self) -> UiSender<T> {
        UiSender {
            tx: self.tx.clone(),
            waker: self.waker.clone(),
        }
    }

    /// Install the wake hook invoked after every post (e.g. an egui
    /// repaint request).
    pub fn set_waker(&self, waker: impl Fn() + Send + Sync + 'static) {
        *self.waker.lock().unwrap_or_else(PoisonError::into_inner) = Some(Box::new(waker));
    }

    /// Drain everything queued so far, in post order.
    pub fn drain(&self) -> impl Iterator<Item = T> + '_ {
        self.rx.try_iter()
    }
}

impl<T> Default for UiQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> UiSender<T> {
    pub fn post(&self, value: T) {
        // Receiver outlives all senders in practice; a closed queue just
        // drops the update.
        let _ = self.tx.send(value);
        if let Ok(guard) = self.waker.lock() {
            if let Some(waker) = guard.as_ref() {
                waker();
            }
        }
    }
}

impl<T> Clone for UiSender<T> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
            waker: self.waker.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn cross_thread_post_preserves_order() {
        let queue = UiQueue::new();
        let sender = queue.sender();

        let handle = std::thread::spawn(move || {
            for i in 0..10 {
                sender.post(i);
            }
        });
        handle.join().unwrap();

        let drained: Vec<i32> = queue.drain().collect();
        assert_eq!(drained, (0..10).collect::<Vec<_>>());
        assert_eq!(queue.drain().count(), 0);
    }

    #[test]
    fn waker_fires_on_post() {
        let queue = UiQueue::new();
        let woken = Arc::new(AtomicUsize::new(0));
        let woken_cb = woken.clone();
        queue.set_waker(move || {
            woken_cb.fetch_add(1, Ordering::SeqCst);
        });

        queue.sender().post(());
        queue.sender().post(());
        assert_eq!(woken.load(Ordering::SeqCst), 2);
    }
}
