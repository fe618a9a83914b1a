//! Subscription handles
//!
//! Every listener registration (store snapshots, mirror updates, identity
//! changes) hands back a [`Subscription`]. Dropping it, or calling
//! [`Subscription::unsubscribe`], removes the listener.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, Weak};

/// Handle that removes a listener when dropped
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    /// Create a handle that runs `cancel` exactly once
    pub fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// A handle with nothing to cancel
    pub fn empty() -> Self {
        Self { cancel: None }
    }

    /// Remove the listener now
    pub fn unsubscribe(mut self) {
        self.cancel_now();
    }

    fn cancel_now(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel_now();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

type Callback<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// A list of callbacks keyed by registration order
///
/// Clones share the same list.
///
/// Callbacks are cloned out of the lock before they run, so a callback may
/// register or drop listeners on the same list.
pub struct ListenerSet<T: ?Sized> {
    inner: Arc<Mutex<ListenerState<T>>>,
}

struct ListenerState<T: ?Sized> {
    next_key: u64,
    callbacks: BTreeMap<u64, Callback<T>>,
}

impl<T: ?Sized + 'static> ListenerSet<T> {
    /// Create an empty listener set
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(ListenerState {
                next_key: 0,
                callbacks: BTreeMap::new(),
            })),
        }
    }

    /// Register a callback
    pub fn add(&self, callback: impl Fn(&T) + Send + Sync + 'static) -> Subscription {
        let key = {
            let mut state = lock(&self.inner);
            let key = state.next_key;
            state.next_key += 1;
            state.callbacks.insert(key, Arc::new(callback));
            key
        };

        let weak: Weak<Mutex<ListenerState<T>>> = Arc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                lock(&inner).callbacks.remove(&key);
            }
        })
    }

    /// Call every registered callback with `value`
    pub fn notify(&self, value: &T) {
        let callbacks: Vec<Callback<T>> = lock(&self.inner).callbacks.values().cloned().collect();
        for callback in callbacks {
            callback(value);
        }
    }

    /// Number of registered callbacks
    pub fn len(&self) -> usize {
        lock(&self.inner).callbacks.len()
    }

    /// Check if no callback is registered
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: ?Sized> Clone for ListenerSet<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: ?Sized + 'static> Default for ListenerSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Lock a mutex, recovering the data if a callback panicked while holding it
fn lock<S>(mutex: &Mutex<S>) -> std::sync::MutexGuard<'_, S> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_drop_unsubscribes() {
        let listeners: ListenerSet<u32> = ListenerSet::new();
        let hits = Arc::new(AtomicUsize::new(0));

        let counter = hits.clone();
        let sub = listeners.add(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        listeners.notify(&1);
        assert_eq!(listeners.len(), 1);

        drop(sub);
        listeners.notify(&2);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert!(listeners.is_empty());
    }

    #[test]
    fn test_explicit_unsubscribe_runs_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let sub = Subscription::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        sub.unsubscribe();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_subscription_outliving_set_is_harmless() {
        let listeners: ListenerSet<u32> = ListenerSet::new();
        let sub = listeners.add(|_| {});
        drop(listeners);
        drop(sub);
    }
}
