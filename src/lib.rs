//! Data Treasure - a pointer-chasing collection minigame
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, spawning, collisions, session state)
//! - `game`: Session controller and round lifecycle
//! - `schedule`: Frame/timer subscriptions that drive the controller
//! - `surface`: Presentation surface the controller writes to
//! - `platform`: Browser and headless backends
//! - `settings`: Data-driven round tuning and effect toggles

pub mod game;
pub mod platform;
pub mod schedule;
pub mod settings;
pub mod sim;
pub mod surface;

pub use game::Game;
pub use schedule::{Cadence, Scheduler, Subscription, VirtualScheduler, Wake};
pub use settings::Settings;
pub use surface::{BubbleAnchor, Surface};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Round length in seconds
    pub const ROUND_SECS: u32 = 60;
    /// Countdown period (one second)
    pub const COUNTDOWN_MS: u32 = 1000;
    /// Spawn policy period
    pub const SPAWN_PERIOD_MS: u32 = 2000;
    /// How long the game over banner stays up
    pub const END_BANNER_MS: u32 = 5000;
    /// Pause between the banner going away and the next round
    pub const RESTART_DELAY_MS: u32 = 2000;
    /// Delay before the very first round after boot
    pub const AUTOSTART_DELAY_MS: u32 = 1000;

    /// Maximum live collectibles
    pub const CAPACITY: usize = 8;
    /// Collectible footprint (square, top-left anchored)
    pub const COLLECTIBLE_SIZE: f32 = 40.0;
    /// Actor hitbox half extent (hitbox is 80x80 centred on the actor)
    pub const ACTOR_HALF_EXTENT: f32 = 40.0;
    /// Fraction of the remaining distance to the pointer covered per frame
    pub const FOLLOW_FACTOR: f32 = 0.12;
    /// Where the actor and pointer start on first boot
    pub const ACTOR_START: Vec2 = Vec2::new(250.0, 250.0);

    /// Eye centres relative to the actor centre
    pub const EYE_OFFSETS: [Vec2; 2] = [Vec2::new(-12.0, -10.0), Vec2::new(12.0, -10.0)];
    /// Maximum pupil displacement in pixels
    pub const PUPIL_MAX_OFFSET: f32 = 3.0;
    /// Pointer distance per pixel of pupil displacement
    pub const PUPIL_DISTANCE_SCALE: f32 = 20.0;

    /// Speech bubble placement relative to the actor
    pub const BUBBLE_OFFSET: Vec2 = Vec2::new(50.0, -30.0);
    /// Bubble lifetime after a collection
    pub const COLLECT_BUBBLE_MS: u32 = 2000;
    /// Bubble lifetime after clicking the actor
    pub const CHATTER_BUBBLE_MS: u32 = 3000;
}

/// Move `from` toward `to` by `factor` of the remaining distance
#[inline]
pub fn approach(from: Vec2, to: Vec2, factor: f32) -> Vec2 {
    from + (to - from) * factor
}

/// Pupil displacement for an eye at `eye` looking at `target`
///
/// Direction is `atan2` of the delta, magnitude is the distance scaled down
/// and capped at [`consts::PUPIL_MAX_OFFSET`].
#[inline]
pub fn look_offset(eye: Vec2, target: Vec2) -> Vec2 {
    use consts::{PUPIL_DISTANCE_SCALE, PUPIL_MAX_OFFSET};

    let delta = target - eye;
    let angle = delta.y.atan2(delta.x);
    let distance = (delta.length() / PUPIL_DISTANCE_SCALE).min(PUPIL_MAX_OFFSET);
    Vec2::new(angle.cos(), angle.sin()) * distance
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_approach_covers_fraction() {
        let next = approach(Vec2::new(250.0, 250.0), Vec2::new(350.0, 150.0), 0.12);
        assert!((next.x - 262.0).abs() < 1e-4);
        assert!((next.y - 238.0).abs() < 1e-4);
    }

    #[test]
    fn test_look_offset_capped() {
        let offset = look_offset(Vec2::ZERO, Vec2::new(400.0, 0.0));
        assert!((offset.length() - 3.0).abs() < 1e-5);
        assert!(offset.x > 0.0);
        assert!(offset.y.abs() < 1e-5);
    }

    #[test]
    fn test_look_offset_scales_when_close() {
        // 20px away -> 1px of pupil travel, pointing straight down
        let offset = look_offset(Vec2::new(10.0, 10.0), Vec2::new(10.0, 30.0));
        assert!(offset.x.abs() < 1e-5);
        assert!((offset.y - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_look_offset_same_point() {
        let offset = look_offset(Vec2::ONE, Vec2::ONE);
        assert_eq!(offset, Vec2::ZERO);
    }
}
