//! Observer registration with scoped lifetimes.
//!
//! [`Observers::subscribe`] hands back a [`Subscription`]; dropping it removes the
//! callback. Components that re-subscribe (the screen tracker does on every
//! primary-display switch) just replace the guard they hold.

use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Weak};

type Callback<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct Slots<T> {
    next_id: u64,
    callbacks: BTreeMap<u64, Callback<T>>,
}

/// A set of callbacks notified with `&T`.
pub struct Observers<T> {
    slots: Arc<Mutex<Slots<T>>>,
}

impl<T: 'static> Observers<T> {
    pub fn new() -> Self {
        Self {
            slots: Arc::new(Mutex::new(Slots {
                next_id: 0,
                callbacks: BTreeMap::new(),
            })),
        }
    }

    /// Registers `callback` until the returned guard is dropped.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let id = {
            let mut slots = self.slots.lock();
            let id = slots.next_id;
            slots.next_id += 1;
            slots.callbacks.insert(id, Arc::new(callback));
            id
        };

        let slots: Weak<Mutex<Slots<T>>> = Arc::downgrade(&self.slots);
        Subscription {
            release: Some(Box::new(move || {
                if let Some(slots) = slots.upgrade() {
                    slots.lock().callbacks.remove(&id);
                }
            })),
        }
    }

    /// Calls every live callback. Callbacks run outside the lock, so they may
    /// subscribe or drop subscriptions themselves.
    pub fn notify(&self, value: &T) {
        let callbacks: Vec<Callback<T>> = self.slots.lock().callbacks.values().cloned().collect();
        for callback in callbacks {
            callback(value);
        }
    }

    pub fn len(&self) -> usize {
        self.slots.lock().callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: 'static> Default for Observers<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Observers<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers")
            .field("count", &self.slots.lock().callbacks.len())
            .finish()
    }
}

/// Unregisters its callback when dropped.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    release: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    /// Unsubscribes now. Equivalent to dropping the guard.
    pub fn cancel(mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.release.is_some())
            .finish()
    }
}
