//! Tween scheduler
//!
//! Owns the active tween set and advances it once per frame. Cloning the
//! scheduler yields another handle onto the same set, so animation code can
//! schedule tweens while a frame driver elsewhere owns the tick.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::easing::Easing;
use crate::signal::CompletionHandle;
use crate::tween::{PropertyTween, Tween, TweenError, TweenTarget, UpdateFn};
use crate::value::FieldValues;

/// Options for [`TweenScheduler::tween_to`]
pub struct TweenOptions<T: TweenTarget> {
    pub easing: Easing,
    pub on_update: Option<Box<UpdateFn<T>>>,
}

impl<T: TweenTarget> Default for TweenOptions<T> {
    fn default() -> Self {
        Self {
            easing: Easing::default(),
            on_update: None,
        }
    }
}

impl<T: TweenTarget> TweenOptions<T> {
    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn on_update(mut self, callback: impl FnMut(f64, &mut T, &FieldValues) + Send + 'static) -> Self {
        self.on_update = Some(Box::new(callback));
        self
    }
}

/// Handle onto a scheduled tween
#[derive(Clone)]
pub struct TweenHandle {
    completion: CompletionHandle,
}

impl TweenHandle {
    pub fn completion(&self) -> CompletionHandle {
        self.completion.clone()
    }

    pub fn is_complete(&self) -> bool {
        self.completion.is_resolved()
    }
}

/// Frame-driven scheduler for the active tween set
///
/// Single-threaded cooperative model: exactly one driver calls [`tick`]
/// per frame with `dt >= 0`; all tween mutation happens synchronously
/// inside that call. Scheduling two tweens against overlapping fields of
/// one target is a caller error (last write per tick wins, order
/// unspecified).
///
/// [`tick`]: TweenScheduler::tick
#[derive(Clone, Default)]
pub struct TweenScheduler {
    active: Arc<Mutex<Vec<Box<dyn Tween>>>>,
}

impl TweenScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a transition of `target`'s fields to the values in `to`
    ///
    /// Defaults to linear easing. Returns a handle exposing the tween's
    /// completion signal. A tween always runs to completion; there is no
    /// cancellation.
    pub fn tween_to<T: TweenTarget + Send + 'static>(
        &self,
        target: Arc<Mutex<T>>,
        to: FieldValues,
        duration: f64,
        options: TweenOptions<T>,
    ) -> Result<TweenHandle, TweenError> {
        let tween = PropertyTween::new(target, to, duration, options.easing, options.on_update)?;
        let handle = TweenHandle {
            completion: tween.completion(),
        };
        self.active.lock().push(Box::new(tween));
        Ok(handle)
    }

    /// Advance every active tween by `dt`, then reap completed ones
    ///
    /// Every tween advances (and a tween completing this tick still fires
    /// its final update and resolves its signal) before any removal.
    /// Tweens scheduled from inside an update or completion callback join
    /// the set for the next tick.
    pub fn tick(&self, dt: f64) {
        if dt < 0.0 {
            log::warn!("tick with negative dt {dt} ignored");
            return;
        }
        let mut running = std::mem::take(&mut *self.active.lock());
        for tween in running.iter_mut() {
            tween.advance(dt);
        }
        running.retain(|tween| !tween.is_complete());

        let mut active = self.active.lock();
        // Keep tweens scheduled mid-tick; they start on the next tick
        running.extend(active.drain(..));
        *active = running;
    }

    /// Number of currently registered tweens
    pub fn active_count(&self) -> usize {
        self.active.lock().len()
    }
}
