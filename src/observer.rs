//! Minimal observer plumbing
//!
//! Replaces DOM events (`settingsChanged`, media-query `change`, ...) with an
//! explicit `on_change(callback)` interface. Dropping the returned
//! [`Subscription`] unsubscribes.

use std::sync::{Arc, Mutex, Weak};

type Callback<T> = Arc<Mutex<Box<dyn FnMut(&T) + Send>>>;

struct ListenerSet<T> {
    next_id: u64,
    entries: Vec<(u64, Callback<T>)>,
}

/// A set of callbacks notified with `&T`
pub struct Listeners<T> {
    inner: Arc<Mutex<ListenerSet<T>>>,
}

impl<T> Clone for Listeners<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: 'static> Default for Listeners<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> Listeners<T> {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(ListenerSet {
                next_id: 0,
                entries: Vec::new(),
            })),
        }
    }

    /// Register `callback`; it stays registered until the subscription drops
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: FnMut(&T) + Send + 'static,
    {
        let id = match self.inner.lock() {
            Ok(mut set) => {
                let id = set.next_id;
                set.next_id += 1;
                set.entries
                    .push((id, Arc::new(Mutex::new(Box::new(callback)))));
                id
            }
            Err(_) => {
                tracing::warn!("Listener set poisoned, callback not registered");
                return Subscription::noop();
            }
        };

        let weak: Weak<Mutex<ListenerSet<T>>> = Arc::downgrade(&self.inner);
        Subscription {
            unsubscribe: Some(Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    if let Ok(mut set) = inner.lock() {
                        set.entries.retain(|(entry_id, _)| *entry_id != id);
                    }
                }
            })),
        }
    }

    /// Invoke every registered callback with `value`
    ///
    /// The set is snapshotted first so callbacks may subscribe or unsubscribe
    /// while being notified. A callback that is already running (re-entrant
    /// notification) is skipped.
    pub fn notify(&self, value: &T) {
        let snapshot: Vec<Callback<T>> = match self.inner.lock() {
            Ok(set) => set.entries.iter().map(|(_, cb)| Arc::clone(cb)).collect(),
            Err(_) => return,
        };

        for callback in snapshot {
            if let Ok(mut cb) = callback.try_lock() {
                (&mut **cb)(value);
            }
        }
    }

    /// Number of live subscriptions
    pub fn len(&self) -> usize {
        self.inner.lock().map(|set| set.entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Handle keeping a callback registered
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    unsubscribe: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    fn noop() -> Self {
        Self { unsubscribe: None }
    }

    /// Explicitly unsubscribe (same as dropping)
    pub fn cancel(mut self) {
        if let Some(f) = self.unsubscribe.take() {
            f();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(f) = self.unsubscribe.take() {
            f();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.unsubscribe.is_some())
            .finish()
    }
}
