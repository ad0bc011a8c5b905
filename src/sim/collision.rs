//! Axis-aligned collision detection and collection scoring

use glam::Vec2;

use super::state::{Collectible, CollectibleKind, Session};

/// Axis-aligned rectangle (top-left anchored)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    /// Square of edge `2 * half_extent` centred on `center`
    pub fn centered(center: Vec2, half_extent: f32) -> Self {
        Self {
            min: center - Vec2::splat(half_extent),
            size: Vec2::splat(half_extent * 2.0),
        }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.min + self.size / 2.0
    }

    /// Strict overlap: touching edges do not count
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.min.x < other.max().x
            && self.max().x > other.min.x
            && self.min.y < other.max().y
            && self.max().y > other.min.y
    }
}

/// Footprint of a collectible
#[inline]
pub fn footprint(collectible: &Collectible, size: f32) -> Rect {
    Rect {
        min: collectible.pos,
        size: Vec2::splat(size),
    }
}

/// A collectible removed by [`collect_overlapping`]
#[derive(Debug, Clone, PartialEq)]
pub struct Collected {
    pub id: u32,
    pub kind: CollectibleKind,
    pub value: u32,
    /// Centre of the footprint, for feedback effects
    pub center: Vec2,
}

/// Collect every collectible overlapping the actor hitbox
///
/// Single pass over the live set: all simultaneous overlaps are honored, each
/// entity is removed immediately and can only be scored once.
pub fn collect_overlapping(
    session: &mut Session,
    actor_half_extent: f32,
    collectible_size: f32,
) -> Vec<Collected> {
    let hitbox = Rect::centered(session.actor, actor_half_extent);
    let mut collected = Vec::new();

    session.collectibles.retain(|c| {
        let rect = footprint(c, collectible_size);
        if hitbox.overlaps(&rect) {
            collected.push(Collected {
                id: c.id,
                kind: c.kind,
                value: c.value(),
                center: rect.center(),
            });
            false
        } else {
            true
        }
    });

    for c in &collected {
        session.score += c.value;
    }

    collected
}
