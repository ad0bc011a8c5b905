//! Headless surface: records what a display would show
//!
//! Used by the native demo and by tests.

use std::collections::BTreeMap;

use glam::Vec2;

use crate::sim::{Collectible, CollectibleKind};
use crate::surface::{BubbleAnchor, Surface};

#[derive(Debug, Clone, Default)]
pub struct HeadlessSurface {
    size: Vec2,
    actor: Vec2,
    pupils: Vec<Vec2>,
    live: BTreeMap<u32, (CollectibleKind, Vec2)>,
    placed: usize,
    removed: usize,
    score: u32,
    time_left: u32,
    bubble: Option<(String, BubbleAnchor)>,
    bursts: usize,
}

impl HeadlessSurface {
    pub fn new(size: Vec2) -> Self {
        Self {
            size,
            ..Default::default()
        }
    }

    /// Resize the play surface (affects later spawns only)
    pub fn resize(&mut self, size: Vec2) {
        self.size = size;
    }

    pub fn actor(&self) -> Vec2 {
        self.actor
    }

    pub fn pupils(&self) -> &[Vec2] {
        &self.pupils
    }

    /// Collectibles currently shown
    pub fn live_collectibles(&self) -> usize {
        self.live.len()
    }

    /// Total collectibles ever placed
    pub fn placed(&self) -> usize {
        self.placed
    }

    /// Total collectibles ever removed
    pub fn removed(&self) -> usize {
        self.removed
    }

    pub fn score_label(&self) -> u32 {
        self.score
    }

    pub fn time_label(&self) -> u32 {
        self.time_left
    }

    /// Text of the visible bubble, if any
    pub fn bubble(&self) -> Option<&str> {
        self.bubble.as_ref().map(|(text, _)| text.as_str())
    }

    pub fn bubble_anchor(&self) -> Option<BubbleAnchor> {
        self.bubble.as_ref().map(|(_, anchor)| *anchor)
    }

    pub fn bursts(&self) -> usize {
        self.bursts
    }
}

impl Surface for HeadlessSurface {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn place_collectible(&mut self, collectible: &Collectible) {
        self.live
            .insert(collectible.id, (collectible.kind, collectible.pos));
        self.placed += 1;
    }

    fn remove_collectible(&mut self, id: u32) {
        if self.live.remove(&id).is_some() {
            self.removed += 1;
        } else {
            log::warn!("Removing unknown collectible #{}", id);
        }
    }

    fn move_actor(&mut self, pos: Vec2) {
        self.actor = pos;
    }

    fn aim_pupils(&mut self, offsets: &[Vec2]) {
        self.pupils.clear();
        self.pupils.extend_from_slice(offsets);
    }

    fn set_score(&mut self, score: u32) {
        self.score = score;
    }

    fn set_time_left(&mut self, secs: u32) {
        self.time_left = secs;
    }

    fn show_bubble(&mut self, text: &str, anchor: BubbleAnchor) {
        log::debug!("Bubble: {}", text);
        self.bubble = Some((text.to_string(), anchor));
    }

    fn hide_bubble(&mut self) {
        self.bubble = None;
    }

    fn burst(&mut self, _at: Vec2) {
        self.bursts += 1;
    }
}
