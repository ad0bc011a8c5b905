//! Session state and core simulation types
//!
//! Everything the round lifecycle reads or mutates lives in [`Session`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Round lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Phase {
    /// No round in progress, waiting for a start
    #[default]
    Idle,
    /// Round in progress
    Running,
    /// Round over, game over banner showing
    Ending,
}

/// Collectible categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CollectibleKind {
    Gem,
    Coin,
    Star,
}

impl CollectibleKind {
    /// Every kind, in spawn-table order
    pub const ALL: [CollectibleKind; 3] = [
        CollectibleKind::Gem,
        CollectibleKind::Coin,
        CollectibleKind::Star,
    ];

    /// Score awarded on collection
    ///
    /// Not ordered by rarity: every kind spawns equally often.
    pub fn value(self) -> u32 {
        match self {
            CollectibleKind::Gem => 20,
            CollectibleKind::Coin => 10,
            CollectibleKind::Star => 30,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CollectibleKind::Gem => "gem",
            CollectibleKind::Coin => "coin",
            CollectibleKind::Star => "star",
        }
    }

    /// What the actor says when collecting one
    pub fn cheer(self) -> &'static str {
        match self {
            CollectibleKind::Gem => "Wow! A gem! 💎",
            CollectibleKind::Coin => "Money! 🪙",
            CollectibleKind::Star => "A star! ⭐",
        }
    }
}

/// A collectible entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collectible {
    pub id: u32,
    pub kind: CollectibleKind,
    /// Top-left corner of the footprint
    pub pos: Vec2,
}

impl Collectible {
    pub fn value(&self) -> u32 {
        self.kind.value()
    }
}

/// Session state for the collection game (one per controller, reused across rounds)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub score: u32,
    /// Seconds remaining in the round
    pub time_left: u32,
    pub phase: Phase,
    /// Actor centre
    pub actor: Vec2,
    /// Last known pointer position (written by input only)
    pub pointer: Vec2,
    /// Live collectibles
    pub collectibles: Vec<Collectible>,
    /// Rounds started so far
    pub round: u32,
    /// Next entity ID
    next_id: u32,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            score: 0,
            time_left: ROUND_SECS,
            phase: Phase::Idle,
            actor: ACTOR_START,
            pointer: ACTOR_START,
            collectibles: Vec::new(),
            round: 0,
            next_id: 1,
        }
    }

    /// True while a round is running
    pub fn is_playing(&self) -> bool {
        self.phase == Phase::Running
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Enter Running with a fresh score and clock
    ///
    /// Returns false (and changes nothing) unless the session is Idle.
    pub fn begin_round(&mut self, round_secs: u32) -> bool {
        if self.phase != Phase::Idle {
            return false;
        }
        self.score = 0;
        self.time_left = round_secs;
        self.phase = Phase::Running;
        self.round += 1;
        true
    }

    /// Leave Running, handing back every live collectible for teardown
    ///
    /// Returns `None` unless the session is Running.
    pub fn finish_round(&mut self) -> Option<Vec<Collectible>> {
        if self.phase != Phase::Running {
            return None;
        }
        self.phase = Phase::Ending;
        Some(std::mem::take(&mut self.collectibles))
    }

    /// Ending -> Idle once the banner is gone
    pub fn settle(&mut self) {
        if self.phase == Phase::Ending {
            self.phase = Phase::Idle;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_tied_to_kind() {
        assert_eq!(CollectibleKind::Gem.value(), 20);
        assert_eq!(CollectibleKind::Coin.value(), 10);
        assert_eq!(CollectibleKind::Star.value(), 30);
    }

    #[test]
    fn test_begin_round_only_from_idle() {
        let mut session = Session::new();
        assert!(session.begin_round(60));
        assert_eq!(session.round, 1);

        session.score = 50;
        session.time_left = 12;
        assert!(!session.begin_round(60));
        assert_eq!(session.score, 50);
        assert_eq!(session.time_left, 12);
        assert_eq!(session.round, 1);
    }

    #[test]
    fn test_finish_round_drains_collectibles() {
        let mut session = Session::new();
        assert!(session.finish_round().is_none());

        session.begin_round(60);
        let id = session.next_entity_id();
        session.collectibles.push(Collectible {
            id,
            kind: CollectibleKind::Coin,
            pos: Vec2::ZERO,
        });

        let drained = session.finish_round().unwrap();
        assert_eq!(drained.len(), 1);
        assert!(session.collectibles.is_empty());
        assert_eq!(session.phase, Phase::Ending);
        assert!(!session.is_playing());

        // Second end is a no-op
        assert!(session.finish_round().is_none());

        session.settle();
        assert_eq!(session.phase, Phase::Idle);
    }

    #[test]
    fn test_new_round_resets_score() {
        let mut session = Session::new();
        session.begin_round(60);
        session.score = 120;
        session.time_left = 0;
        session.finish_round();
        session.settle();

        assert!(session.begin_round(60));
        assert_eq!(session.score, 0);
        assert_eq!(session.time_left, 60);
        assert_eq!(session.round, 2);
    }
}
