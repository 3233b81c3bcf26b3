//! # sw-reels — reel spin engine
//!
//! The observable slot model/view-model layer and the reel-spin animation
//! controller: staggered per-reel tweens, continuous symbol-strip updates
//! with wrap-boundary symbol swaps, motion-blur intensity, and an awaitable
//! spin completion gate.
//!
//! ## Architecture
//!
//! ```text
//! SlotReelsModel ──▶ SlotReelsViewModel ──▶ ReelSpinController
//!       │                                        │
//!       └──▶ SlotMachineViewModel (title)        ├──▶ TweenScheduler (per-reel position tweens)
//!                                                ├──▶ Reel slots (symbol swaps, blur)
//!                                                └──▶ SpinGate (await all reels)
//! ```

pub mod controller;
pub mod gate;
pub mod model;
pub mod reel;
pub mod strings;
pub mod viewmodel;

pub use controller::*;
pub use gate::*;
pub use model::*;
pub use reel::*;
pub use strings::*;
pub use viewmodel::*;
