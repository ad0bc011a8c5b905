//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Frame-driven steps only (no wall clock)
//! - Injected RNG only
//! - No rendering, scheduling or platform dependencies

pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Collected, Rect, collect_overlapping, footprint};
pub use spawn::spawn;
pub use state::{Collectible, CollectibleKind, Phase, Session};
pub use tick::{Countdown, FrameOutcome, countdown, frame};
