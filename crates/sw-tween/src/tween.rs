//! Property tweens
//!
//! A tween drives a named subset of a shared target's fields from their
//! values at animation start to fixed end values over a duration. The
//! target is reached through the [`TweenTarget`] accessor seam; the tween
//! owns a handle, never the target's lifetime.

use std::sync::Arc;

use parking_lot::Mutex;
use thiserror::Error;

use crate::easing::Easing;
use crate::signal::{Completion, CompletionHandle};
use crate::value::{FieldValues, Value, blend_records};

/// Named-field accessor implemented by tweenable targets
pub trait TweenTarget {
    /// Read a field; `None` if the target has no such field
    fn field(&self, name: &str) -> Option<Value>;
    /// Write a field; writes to unknown fields are ignored
    fn set_field(&mut self, name: &str, value: Value);
}

/// Per-frame update callback: `(dt, target, previous field values)`
///
/// Invoked after the blended values have been written, with the target's
/// pre-mutation values for the tweened fields.
pub type UpdateFn<T> = dyn FnMut(f64, &mut T, &FieldValues) + Send;

/// Tween scheduling errors
#[derive(Error, Debug)]
pub enum TweenError {
    #[error("Target has no field named '{0}'")]
    UnknownField(String),
}

/// Object-safe tween interface the scheduler drives
pub trait Tween: Send {
    /// Advance by `dt`; no-op once complete
    fn advance(&mut self, dt: f64);
    /// True once the tween has delivered its final update
    fn is_complete(&self) -> bool;
    /// Signal resolving when the tween completes
    fn completion(&self) -> CompletionHandle;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TweenState {
    Pending,
    Running,
    Complete,
}

/// Timed transition of a subset of a target's fields
pub struct PropertyTween<T: TweenTarget> {
    target: Arc<Mutex<T>>,
    to: FieldValues,
    /// Captured on the first advance so the transition starts from the
    /// target's state at animation start, not at scheduling time
    from: Option<FieldValues>,
    elapsed: f64,
    duration: f64,
    easing: Easing,
    on_update: Option<Box<UpdateFn<T>>>,
    state: TweenState,
    completion: Completion,
}

impl<T: TweenTarget> PropertyTween<T> {
    /// Create a tween; every destination field must exist on the target
    pub fn new(
        target: Arc<Mutex<T>>,
        to: FieldValues,
        duration: f64,
        easing: Easing,
        on_update: Option<Box<UpdateFn<T>>>,
    ) -> Result<Self, TweenError> {
        {
            let target = target.lock();
            for name in to.keys() {
                if target.field(name).is_none() {
                    return Err(TweenError::UnknownField(name.clone()));
                }
            }
        }
        Ok(Self {
            target,
            to,
            from: None,
            elapsed: 0.0,
            duration,
            easing,
            on_update,
            state: TweenState::Pending,
            completion: Completion::new(),
        })
    }
}

fn snapshot<T: TweenTarget>(target: &T, fields: &FieldValues) -> FieldValues {
    fields
        .keys()
        .filter_map(|name| target.field(name).map(|value| (name.clone(), value)))
        .collect()
}

impl<T: TweenTarget + Send> Tween for PropertyTween<T> {
    fn advance(&mut self, dt: f64) {
        if self.state == TweenState::Complete {
            return;
        }
        self.state = TweenState::Running;

        {
            let mut target = self.target.lock();
            let from = self
                .from
                .get_or_insert_with(|| snapshot(&*target, &self.to));

            self.elapsed += dt;
            // A non-positive duration completes on the first frame at t = eval(1)
            let normal = if self.duration > 0.0 {
                (self.elapsed / self.duration).min(1.0)
            } else {
                1.0
            };
            let t = self.easing.eval(normal);

            let blended = blend_records(from, &self.to, t);
            let prev = snapshot(&*target, &self.to);
            for (name, value) in blended {
                target.set_field(&name, value);
            }
            if let Some(on_update) = self.on_update.as_mut() {
                on_update(dt, &mut *target, &prev);
            }
        }

        // Resolve outside the target lock so continuations may re-lock it
        if self.elapsed >= self.duration {
            self.state = TweenState::Complete;
            self.completion.resolve();
        }
    }

    fn is_complete(&self) -> bool {
        self.state == TweenState::Complete
    }

    fn completion(&self) -> CompletionHandle {
        self.completion.handle()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::single_field;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Dot {
        x: f64,
        y: f64,
        label: String,
    }

    impl Dot {
        fn origin() -> Self {
            Self {
                x: 0.0,
                y: 0.0,
                label: "start".to_string(),
            }
        }
    }

    impl TweenTarget for Dot {
        fn field(&self, name: &str) -> Option<Value> {
            match name {
                "x" => Some(Value::Number(self.x)),
                "y" => Some(Value::Number(self.y)),
                "label" => Some(Value::Text(self.label.clone())),
                _ => None,
            }
        }

        fn set_field(&mut self, name: &str, value: Value) {
            match (name, value) {
                ("x", Value::Number(n)) => self.x = n,
                ("y", Value::Number(n)) => self.y = n,
                ("label", Value::Text(s)) => self.label = s,
                _ => {}
            }
        }
    }

    fn tween_x_to(
        target: &Arc<Mutex<Dot>>,
        end: f64,
        duration: f64,
    ) -> PropertyTween<Dot> {
        PropertyTween::new(
            target.clone(),
            single_field("x", end),
            duration,
            Easing::Linear,
            None,
        )
        .unwrap()
    }

    #[test]
    fn test_linear_progression() {
        let dot = Arc::new(Mutex::new(Dot::origin()));
        let mut tween = tween_x_to(&dot, 10.0, 1.0);

        tween.advance(0.25);
        assert_eq!(dot.lock().x, 2.5);
        assert!(!tween.is_complete());

        tween.advance(0.75);
        assert_eq!(dot.lock().x, 10.0);
        assert!(tween.is_complete());
    }

    #[test]
    fn test_from_captured_at_first_advance() {
        let dot = Arc::new(Mutex::new(Dot::origin()));
        let mut tween = tween_x_to(&dot, 10.0, 1.0);

        // Target moves between scheduling and animation start
        dot.lock().x = 5.0;

        tween.advance(0.5);
        assert_eq!(dot.lock().x, 7.5);
    }

    #[test]
    fn test_completed_tween_is_inert() {
        let dot = Arc::new(Mutex::new(Dot::origin()));
        let mut tween = tween_x_to(&dot, 10.0, 1.0);
        let resolutions = Arc::new(AtomicUsize::new(0));

        let count = resolutions.clone();
        tween.completion().on_resolved(move || {
            count.fetch_add(1, Ordering::SeqCst);
        });

        tween.advance(2.0);
        assert!(tween.is_complete());
        assert_eq!(dot.lock().x, 10.0);

        // Later advances neither mutate the target nor re-resolve
        dot.lock().x = -1.0;
        tween.advance(1.0);
        assert_eq!(dot.lock().x, -1.0);
        assert!(tween.is_complete());
        assert_eq!(resolutions.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_zero_duration_completes_on_first_frame() {
        let dot = Arc::new(Mutex::new(Dot::origin()));
        let mut tween = tween_x_to(&dot, 10.0, 0.0);

        assert!(!tween.is_complete());
        tween.advance(0.0);

        assert!(tween.is_complete());
        assert_eq!(dot.lock().x, 10.0);
        assert!(tween.completion().is_resolved());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let dot = Arc::new(Mutex::new(Dot::origin()));
        let result = PropertyTween::new(
            dot,
            single_field("scale", 2.0),
            1.0,
            Easing::Linear,
            None,
        );

        assert!(matches!(result, Err(TweenError::UnknownField(name)) if name == "scale"));
    }

    #[test]
    fn test_update_callback_sees_previous_values() {
        let dot = Arc::new(Mutex::new(Dot::origin()));
        let deltas = Arc::new(Mutex::new(Vec::new()));

        let sink = deltas.clone();
        let on_update: Box<UpdateFn<Dot>> = Box::new(move |dt, dot, prev| {
            let prev_x = prev.get("x").and_then(Value::as_number).unwrap_or(0.0);
            sink.lock().push((dt, dot.x - prev_x));
        });
        let mut tween = PropertyTween::new(
            dot.clone(),
            single_field("x", 10.0),
            1.0,
            Easing::Linear,
            Some(on_update),
        )
        .unwrap();

        tween.advance(0.25);
        tween.advance(0.25);

        let seen = deltas.lock();
        assert_eq!(seen.len(), 2);
        assert!((seen[0].0 - 0.25).abs() < 1e-12);
        assert!((seen[0].1 - 2.5).abs() < 1e-12);
        assert!((seen[1].1 - 2.5).abs() < 1e-12);
    }

    #[test]
    fn test_discrete_field_snaps_at_halfway() {
        let dot = Arc::new(Mutex::new(Dot::origin()));
        let mut tween = PropertyTween::new(
            dot.clone(),
            single_field("label", "end"),
            1.0,
            Easing::Linear,
            None,
        )
        .unwrap();

        tween.advance(0.5);
        assert_eq!(dot.lock().label, "start");

        tween.advance(0.25);
        assert_eq!(dot.lock().label, "end");
    }
}
