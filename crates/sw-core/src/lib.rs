//! # sw-core — SpinWorks foundation
//!
//! Shared building blocks for the SpinWorks slot game core:
//!
//! - **Symbols & results**: opaque symbol identifiers, visible lines,
//!   win positions, and the immutable per-spin outcome
//! - **Machine**: the spin source trait and the basic full-line-win machine
//! - **Randomness**: an injectable unit-interval random source, seeded or
//!   scripted, shared by outcome generation and visual filler draws
//! - **Observables**: the synchronous pub/sub primitive the model and
//!   view-model layers are built on
//!
//! ## Architecture
//!
//! ```text
//! SymbolSet ──▶ FullLinesMachine ──▶ SpinResult { lines, wins }
//!      │               │
//!      └── SharedRandom ┘        Observable<T> / Subscriber
//! ```

pub mod error;
pub mod machine;
pub mod observe;
pub mod random;
pub mod spin;
pub mod symbols;

pub use error::*;
pub use machine::*;
pub use observe::*;
pub use random::*;
pub use spin::*;
pub use symbols::*;
