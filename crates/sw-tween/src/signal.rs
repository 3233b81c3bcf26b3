//! Single-resolution completion signals
//!
//! Explicit Pending → Resolved state plus a continuation list, no async
//! runtime involved. Continuations run synchronously at resolution time;
//! for tween completions that means inside the same scheduler tick that
//! finished the tween.

use std::sync::Arc;

use parking_lot::Mutex;

#[derive(Default)]
struct SignalState {
    resolved: bool,
    continuations: Vec<Box<dyn FnOnce() + Send>>,
}

/// Resolver side of a completion signal
#[derive(Clone, Default)]
pub struct Completion {
    state: Arc<Mutex<SignalState>>,
}

impl Completion {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waiter handle onto this signal
    pub fn handle(&self) -> CompletionHandle {
        CompletionHandle {
            state: self.state.clone(),
        }
    }

    /// Handle that is already resolved
    pub fn resolved_handle() -> CompletionHandle {
        let completion = Completion::new();
        completion.resolve();
        completion.handle()
    }

    /// Resolve the signal, running all registered continuations
    ///
    /// Resolves exactly once; later calls are ignored. Continuations run
    /// outside the state lock, so they may register further waiters.
    pub fn resolve(&self) {
        let continuations = {
            let mut state = self.state.lock();
            if state.resolved {
                return;
            }
            state.resolved = true;
            std::mem::take(&mut state.continuations)
        };
        for continuation in continuations {
            continuation();
        }
    }
}

/// Waiter side of a completion signal
#[derive(Clone)]
pub struct CompletionHandle {
    state: Arc<Mutex<SignalState>>,
}

impl CompletionHandle {
    pub fn is_resolved(&self) -> bool {
        self.state.lock().resolved
    }

    /// Run `continuation` when the signal resolves
    ///
    /// If it already resolved, the continuation runs immediately.
    pub fn on_resolved(&self, continuation: impl FnOnce() + Send + 'static) {
        let mut state = self.state.lock();
        if state.resolved {
            drop(state);
            continuation();
        } else {
            state.continuations.push(Box::new(continuation));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_resolves_exactly_once() {
        let completion = Completion::new();
        let handle = completion.handle();
        let fired = Arc::new(AtomicUsize::new(0));

        let count = fired.clone();
        handle.on_resolved(move || {
            count.fetch_add(1, Ordering::SeqCst);
        });

        assert!(!handle.is_resolved());
        completion.resolve();
        completion.resolve();

        assert!(handle.is_resolved());
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_waiter_after_resolution_runs_immediately() {
        let completion = Completion::new();
        completion.resolve();

        let fired = Arc::new(AtomicUsize::new(0));
        let count = fired.clone();
        completion.handle().on_resolved(move || {
            count.fetch_add(1, Ordering::SeqCst);
        });

        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_multiple_waiters_observe_one_resolution() {
        let completion = Completion::new();
        let fired = Arc::new(AtomicUsize::new(0));

        for _ in 0..3 {
            let count = fired.clone();
            completion.handle().on_resolved(move || {
                count.fetch_add(1, Ordering::SeqCst);
            });
        }

        completion.resolve();
        assert_eq!(fired.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_continuation_may_register_waiters() {
        let completion = Completion::new();
        let handle = completion.handle();
        let fired = Arc::new(AtomicUsize::new(0));

        let count = fired.clone();
        let inner_handle = handle.clone();
        handle.on_resolved(move || {
            // Signal already resolved here, runs immediately
            inner_handle.on_resolved(move || {
                count.fetch_add(1, Ordering::SeqCst);
            });
        });

        completion.resolve();
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }
}
