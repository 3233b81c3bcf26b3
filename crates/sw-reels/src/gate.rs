//! Spin completion gate

use std::sync::Arc;

use parking_lot::Mutex;

use sw_tween::{Completion, CompletionHandle};

#[derive(Default)]
struct GateState {
    current: Option<Completion>,
    completed_once: bool,
}

/// Awaitable gate resolving when a whole multi-reel spin settles
///
/// All concurrent waiters observe the same resolution. Wait contract:
/// during an active spin the in-flight signal is returned; before the first
/// spin ever runs, a signal armed for that first spin's completion; while
/// idle after a completed spin, an already-resolved signal, so a re-wait
/// after resolution never hangs.
#[derive(Clone, Default)]
pub struct SpinGate {
    state: Arc<Mutex<GateState>>,
}

impl SpinGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle resolving when the current (or first upcoming) spin settles
    pub fn wait(&self) -> CompletionHandle {
        let mut state = self.state.lock();
        match &state.current {
            Some(completion) => completion.handle(),
            None if state.completed_once => Completion::resolved_handle(),
            None => {
                // Arm the signal the first spin will resolve
                let completion = Completion::new();
                let handle = completion.handle();
                state.current = Some(completion);
                handle
            }
        }
    }

    /// Mark a spin as in flight, keeping a signal armed by an early waiter
    pub fn begin(&self) {
        let mut state = self.state.lock();
        if state.current.is_none() {
            state.current = Some(Completion::new());
        }
    }

    /// Resolve the in-flight spin's signal, outside the gate lock
    pub fn finish(&self) {
        let completion = {
            let mut state = self.state.lock();
            state.completed_once = true;
            state.current.take()
        };
        if let Some(completion) = completion {
            completion.resolve();
        }
    }

    /// True while a spin is in flight (or armed by an early waiter)
    pub fn is_spinning(&self) -> bool {
        self.state.lock().current.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_wait_before_first_spin_resolves_with_it() {
        let gate = SpinGate::new();
        let handle = gate.wait();
        assert!(!handle.is_resolved());

        gate.begin();
        gate.finish();
        assert!(handle.is_resolved());
    }

    #[test]
    fn test_resolves_exactly_once_for_all_waiters() {
        let gate = SpinGate::new();
        gate.begin();

        let fired = Arc::new(AtomicUsize::new(0));
        for _ in 0..3 {
            let count = fired.clone();
            gate.wait().on_resolved(move || {
                count.fetch_add(1, Ordering::SeqCst);
            });
        }

        gate.finish();
        gate.finish(); // idempotent
        assert_eq!(fired.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_rewait_after_resolution_does_not_hang() {
        let gate = SpinGate::new();
        gate.begin();
        gate.finish();

        // No spin in flight: an already-resolved handle comes back
        assert!(gate.wait().is_resolved());
    }

    #[test]
    fn test_new_spin_arms_fresh_signal() {
        let gate = SpinGate::new();
        gate.begin();
        gate.finish();

        gate.begin();
        let handle = gate.wait();
        assert!(!handle.is_resolved());
        gate.finish();
        assert!(handle.is_resolved());
    }
}
