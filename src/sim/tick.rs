//! Per-frame and per-second simulation steps

use glam::Vec2;

use super::collision::{Collected, collect_overlapping};
use super::state::Session;
use crate::consts::EYE_OFFSETS;
use crate::settings::Settings;
use crate::{approach, look_offset};

/// What one frame changed
#[derive(Debug, Clone, Default)]
pub struct FrameOutcome {
    /// Actor centre after movement
    pub actor: Vec2,
    /// Pupil displacement for each eye in [`EYE_OFFSETS`]
    pub pupils: [Vec2; 2],
    /// Collectibles picked up this frame
    pub collected: Vec<Collected>,
}

/// Advance one display frame
///
/// Movement happens before collision: a collectible is only picked up if it is
/// inside the hitbox after this frame's step. Returns `None` when no round is
/// running.
pub fn frame(session: &mut Session, settings: &Settings) -> Option<FrameOutcome> {
    if !session.is_playing() {
        return None;
    }

    session.actor = approach(session.actor, session.pointer, settings.follow_factor);

    let pupils = EYE_OFFSETS.map(|offset| look_offset(session.actor + offset, session.pointer));

    let collected = collect_overlapping(
        session,
        settings.actor_half_extent,
        settings.collectible_size,
    );

    Some(FrameOutcome {
        actor: session.actor,
        pupils,
        collected,
    })
}

/// Result of a countdown tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Countdown {
    /// Seconds remaining
    Running(u32),
    /// The clock just hit zero
    Expired,
    /// No round running, nothing changed
    Inactive,
}

/// Advance the round clock by one second
pub fn countdown(session: &mut Session) -> Countdown {
    if !session.is_playing() {
        return Countdown::Inactive;
    }
    session.time_left = session.time_left.saturating_sub(1);
    if session.time_left == 0 {
        Countdown::Expired
    } else {
        Countdown::Running(session.time_left)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Collectible, CollectibleKind};

    fn running() -> Session {
        let mut session = Session::new();
        session.begin_round(60);
        session
    }

    #[test]
    fn test_frame_idle_is_noop() {
        let mut session = Session::new();
        session.pointer = Vec2::new(400.0, 400.0);
        assert!(frame(&mut session, &Settings::default()).is_none());
        assert_eq!(session.actor, Vec2::new(250.0, 250.0));
    }

    #[test]
    fn test_frame_exponential_pursuit() {
        let mut session = running();
        session.pointer = Vec2::new(350.0, 250.0);
        let settings = Settings::default();

        frame(&mut session, &settings);
        assert!((session.actor.x - 262.0).abs() < 1e-3);

        // Each frame closes 12% of what is left, never overshooting
        let before = session.pointer.x - session.actor.x;
        frame(&mut session, &settings);
        let after = session.pointer.x - session.actor.x;
        assert!((after - before * 0.88).abs() < 1e-3);
        assert!(session.actor.x < session.pointer.x);
    }

    #[test]
    fn test_pupils_follow_pointer() {
        let mut session = running();
        session.pointer = Vec2::new(900.0, 240.0);

        let outcome = frame(&mut session, &Settings::default()).unwrap();
        for pupil in outcome.pupils {
            assert!(pupil.x > 0.0);
            assert!(pupil.length() <= 3.0 + 1e-5);
        }
    }

    #[test]
    fn test_collision_checked_after_movement() {
        let mut session = running();
        // Hitbox spans 210..290 before moving; the footprint starts at 295
        session.collectibles.push(Collectible {
            id: 1,
            kind: CollectibleKind::Star,
            pos: Vec2::new(295.0, 240.0),
        });
        // One step toward 350 moves the actor to 262, hitbox now 222..302
        session.pointer = Vec2::new(350.0, 250.0);

        let outcome = frame(&mut session, &Settings::default()).unwrap();
        assert_eq!(outcome.collected.len(), 1);
        assert_eq!(session.score, 30);
        assert!(session.collectibles.is_empty());
    }

    #[test]
    fn test_countdown_expires_at_zero() {
        let mut session = running();
        for expected in (1..60).rev() {
            assert_eq!(countdown(&mut session), Countdown::Running(expected));
        }
        assert_eq!(countdown(&mut session), Countdown::Expired);
        assert_eq!(session.time_left, 0);
    }

    #[test]
    fn test_countdown_inactive_when_idle() {
        let mut session = Session::new();
        assert_eq!(countdown(&mut session), Countdown::Inactive);
        assert_eq!(session.time_left, 60);
    }
}
