//! Synchronous observable values
//!
//! The pub/sub primitive the model and view-model layers are built on.
//! Subscribers are invoked synchronously: once with the current value at
//! subscription time, then on every `set`. Callbacks run outside the
//! observer-list lock, so a callback may subscribe or unsubscribe without
//! deadlocking; subscriptions made during a notification see the next `set`.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;

struct Observer<T> {
    active: Arc<AtomicBool>,
    callback: Box<dyn FnMut(&T) + Send>,
}

struct Inner<T> {
    value: Mutex<T>,
    observers: Mutex<Vec<Observer<T>>>,
}

/// Shared observable value
///
/// Cloning yields another handle to the same value and observer list.
pub struct Observable<T> {
    inner: Arc<Inner<T>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: Clone + Send + 'static> Observable<T> {
    pub fn new(initial: T) -> Self {
        Self {
            inner: Arc::new(Inner {
                value: Mutex::new(initial),
                observers: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Current value
    pub fn get(&self) -> T {
        self.inner.value.lock().clone()
    }

    /// Replace the value and synchronously notify every active observer
    pub fn set(&self, value: T) {
        *self.inner.value.lock() = value.clone();

        let mut notified = std::mem::take(&mut *self.inner.observers.lock());
        for observer in notified.iter_mut() {
            if observer.active.load(Ordering::Acquire) {
                (observer.callback)(&value);
            }
        }

        // Merge back, keeping observers subscribed during the notification
        let mut observers = self.inner.observers.lock();
        notified.extend(observers.drain(..));
        notified.retain(|o| o.active.load(Ordering::Acquire));
        *observers = notified;
    }

    /// Register an observer; it is invoked immediately with the current value
    pub fn subscribe(&self, mut callback: impl FnMut(&T) + Send + 'static) -> Subscription {
        let current = self.get();
        callback(&current);

        let active = Arc::new(AtomicBool::new(true));
        self.inner.observers.lock().push(Observer {
            active: active.clone(),
            callback: Box::new(callback),
        });
        Subscription { active }
    }
}

/// Token deactivating one observer
pub struct Subscription {
    active: Arc<AtomicBool>,
}

impl Subscription {
    pub fn unsubscribe(self) {
        self.active.store(false, Ordering::Release);
    }
}

/// Collects subscriptions and releases them together
///
/// Dropping the subscriber unsubscribes everything it tracked.
#[derive(Default)]
pub struct Subscriber {
    subscriptions: Vec<Subscription>,
}

impl Subscriber {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<T: Clone + Send + 'static>(
        &mut self,
        observable: &Observable<T>,
        callback: impl FnMut(&T) + Send + 'static,
    ) {
        self.subscriptions.push(observable.subscribe(callback));
    }

    pub fn unsubscribe_all(&mut self) {
        for subscription in self.subscriptions.drain(..) {
            subscription.unsubscribe();
        }
    }
}

impl Drop for Subscriber {
    fn drop(&mut self) {
        self.unsubscribe_all();
    }
}
