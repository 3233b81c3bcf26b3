//! # sw-tween — frame-driven tween engine
//!
//! Time-based interpolation of named fields on shared targets, advanced by
//! an external frame driver. Single-threaded and cooperative: one driver
//! calls [`TweenScheduler::tick`] per frame, all mutation happens
//! synchronously inside that call, and completion continuations run within
//! the same tick that finishes the underlying tween.
//!
//! ## Architecture
//!
//! ```text
//! tween_to(target, to, duration, options)
//!          │
//!          v
//!   TweenScheduler ──tick(dt)──▶ PropertyTween ──▶ TweenTarget fields
//!          │                          │
//!          └── reaps completed        └──▶ Completion ──▶ CompletionHandle
//! ```

pub mod easing;
pub mod scheduler;
pub mod signal;
pub mod tween;
pub mod value;

pub use easing::*;
pub use scheduler::*;
pub use signal::*;
pub use tween::*;
pub use value::*;
