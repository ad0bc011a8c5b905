//! Collectible spawn policy

use glam::Vec2;
use rand::Rng;

use super::state::{Collectible, CollectibleKind, Session};

/// Spawn at most one collectible if the session is below capacity
///
/// Kind is uniform over [`CollectibleKind::ALL`]; position is uniform over the
/// play surface inset so the whole footprint stays on it.
pub fn spawn<R: Rng>(
    session: &mut Session,
    rng: &mut R,
    bounds: Vec2,
    capacity: usize,
    collectible_size: f32,
) -> Option<Collectible> {
    if session.collectibles.len() >= capacity {
        return None;
    }

    let kind = CollectibleKind::ALL[rng.random_range(0..CollectibleKind::ALL.len())];
    let span = (bounds - Vec2::splat(collectible_size)).max(Vec2::ZERO);
    let pos = Vec2::new(rng.random::<f32>() * span.x, rng.random::<f32>() * span.y);

    let collectible = Collectible {
        id: session.next_entity_id(),
        kind,
        pos,
    };
    session.collectibles.push(collectible.clone());
    Some(collectible)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{CAPACITY, COLLECTIBLE_SIZE};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use std::collections::HashMap;

    const BOUNDS: Vec2 = Vec2::new(500.0, 400.0);

    #[test]
    fn test_spawns_one_below_capacity() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut session = Session::new();

        for expected in 1..=CAPACITY {
            let spawned = spawn(&mut session, &mut rng, BOUNDS, CAPACITY, COLLECTIBLE_SIZE);
            assert!(spawned.is_some());
            assert_eq!(session.collectibles.len(), expected);
        }
    }

    #[test]
    fn test_no_spawn_at_capacity() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut session = Session::new();
        while session.collectibles.len() < CAPACITY {
            spawn(&mut session, &mut rng, BOUNDS, CAPACITY, COLLECTIBLE_SIZE);
        }

        assert!(spawn(&mut session, &mut rng, BOUNDS, CAPACITY, COLLECTIBLE_SIZE).is_none());
        assert_eq!(session.collectibles.len(), CAPACITY);
    }

    #[test]
    fn test_footprint_stays_on_surface() {
        let mut rng = Pcg32::seed_from_u64(3);
        for _ in 0..2000 {
            let mut session = Session::new();
            let c = spawn(&mut session, &mut rng, BOUNDS, CAPACITY, COLLECTIBLE_SIZE).unwrap();
            assert!(c.pos.x >= 0.0 && c.pos.x + COLLECTIBLE_SIZE <= BOUNDS.x);
            assert!(c.pos.y >= 0.0 && c.pos.y + COLLECTIBLE_SIZE <= BOUNDS.y);
        }
    }

    #[test]
    fn test_tiny_surface_pins_to_origin() {
        let mut rng = Pcg32::seed_from_u64(4);
        let mut session = Session::new();
        let c = spawn(&mut session, &mut rng, Vec2::new(10.0, 10.0), CAPACITY, COLLECTIBLE_SIZE)
            .unwrap();
        assert_eq!(c.pos, Vec2::ZERO);
    }

    #[test]
    fn test_kinds_uniform() {
        const TRIALS: usize = 30_000;
        let mut rng = Pcg32::seed_from_u64(0xC0FFEE);
        let mut counts: HashMap<CollectibleKind, usize> = HashMap::new();

        for _ in 0..TRIALS {
            let mut session = Session::new();
            let c = spawn(&mut session, &mut rng, BOUNDS, CAPACITY, COLLECTIBLE_SIZE).unwrap();
            assert_eq!(c.value(), c.kind.value());
            *counts.entry(c.kind).or_default() += 1;
        }

        for kind in CollectibleKind::ALL {
            let share = counts[&kind] as f64 / TRIALS as f64;
            assert!((share - 1.0 / 3.0).abs() < 0.02, "{:?} share {}", kind, share);
        }
    }

    #[test]
    fn test_same_seed_same_spawns() {
        let mut a = Pcg32::seed_from_u64(99);
        let mut b = Pcg32::seed_from_u64(99);
        let mut sa = Session::new();
        let mut sb = Session::new();

        for _ in 0..CAPACITY {
            spawn(&mut sa, &mut a, BOUNDS, CAPACITY, COLLECTIBLE_SIZE);
            spawn(&mut sb, &mut b, BOUNDS, CAPACITY, COLLECTIBLE_SIZE);
        }
        assert_eq!(sa.collectibles, sb.collectibles);
    }
}
