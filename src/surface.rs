//! Presentation surface the controller writes to
//!
//! The surface owns every visual element; the controller only pushes state.

use glam::Vec2;

use crate::sim::Collectible;

/// Where a speech bubble is anchored
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BubbleAnchor {
    /// Top-left corner at this play-surface position
    At(Vec2),
    /// Centred on the play surface (game over banner)
    Centered,
}

/// Display surface for the game
pub trait Surface {
    /// Current play surface size in pixels
    fn size(&self) -> Vec2;

    /// Create the visual for a freshly spawned collectible
    fn place_collectible(&mut self, collectible: &Collectible);

    /// Destroy the visual of a collected or cleared collectible
    fn remove_collectible(&mut self, id: u32);

    fn move_actor(&mut self, pos: Vec2);

    /// Pupil displacement per eye
    fn aim_pupils(&mut self, offsets: &[Vec2]);

    fn set_score(&mut self, score: u32);

    fn set_time_left(&mut self, secs: u32);

    fn show_bubble(&mut self, text: &str, anchor: BubbleAnchor);

    fn hide_bubble(&mut self);

    /// Short-lived particle burst (visual feedback only)
    fn burst(&mut self, at: Vec2);
}
