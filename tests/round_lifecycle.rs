use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use data_treasure::platform::HeadlessSurface;
use data_treasure::sim::Phase;
use data_treasure::{BubbleAnchor, Game, Settings, VirtualScheduler, Wake};

type HeadlessGame = Game<Pcg32, VirtualScheduler, HeadlessSurface>;

fn new_game(seed: u64) -> HeadlessGame {
    Game::new(
        Settings::default(),
        Pcg32::seed_from_u64(seed),
        VirtualScheduler::new(),
        HeadlessSurface::new(Vec2::new(600.0, 400.0)),
    )
}

#[test]
fn full_round_with_fixed_pointer() {
    let mut game = new_game(2024);
    game.pointer_moved(Vec2::new(400.0, 400.0));
    game.start();

    let mut last_score = 0;
    for tick in 1..=60 {
        game.advance(1_000);
        let session = game.session();
        assert!(session.score >= last_score, "score dropped at tick {}", tick);
        last_score = session.score;
        assert!(session.collectibles.len() <= 8);
    }

    let session = game.session();
    assert_eq!(session.time_left, 0);
    assert!(!session.is_playing());
    assert!(session.collectibles.is_empty());

    let surface = game.surface();
    assert_eq!(surface.live_collectibles(), 0);
    assert_eq!(surface.placed(), surface.removed());
    assert_eq!(surface.bubble_anchor(), Some(BubbleAnchor::Centered));
    assert_eq!(
        surface.bubble(),
        Some(format!("Game Over! Score: {} 🎉", last_score).as_str())
    );

    // Banner, pause, then a fresh round
    game.advance(5_000 + 2_000);
    let session = game.session();
    assert!(session.is_playing());
    assert_eq!(session.round, 2);
    assert_eq!(session.score, 0);
    assert_eq!(session.time_left, 60);
    assert_eq!(session.collectibles.len(), 1);
    assert_eq!(game.surface().score_label(), 0);
}

#[test]
fn end_cancels_every_round_subscription() {
    let mut game = new_game(7);
    game.start();
    game.advance(3_000);

    game.end();
    for wake in [Wake::Frame, Wake::Countdown, Wake::Spawn] {
        assert!(!game.subscriptions().is_armed(wake), "{:?}", wake);
        assert!(!game.scheduler().has_pending(wake), "{:?}", wake);
    }
    assert!(game.scheduler().has_pending(Wake::EndBanner));

    // Ending twice changes nothing
    let pending = game.scheduler().pending();
    game.end();
    assert_eq!(game.scheduler().pending(), pending);
    assert_eq!(game.session().phase, Phase::Ending);
}

#[test]
fn actor_tracks_pointer_and_pupils_follow() {
    let mut game = new_game(3);
    game.start();
    game.pointer_moved(Vec2::new(100.0, 300.0));
    game.advance(2_000);

    let actor = game.surface().actor();
    assert!(actor.distance(Vec2::new(100.0, 300.0)) < 1.0);
    assert_eq!(game.surface().pupils().len(), 2);
    assert!(game.surface().pupils().iter().all(|p| p.length() <= 3.0 + 1e-5));
}

#[test]
fn same_seed_same_round() {
    let run = |seed| {
        let mut game = new_game(seed);
        game.boot();
        for step in 0..120u32 {
            let x = (step * 37 % 600) as f32;
            let y = (step * 53 % 400) as f32;
            game.pointer_moved(Vec2::new(x, y));
            game.advance(500);
        }
        (game.session().score, game.surface().placed())
    };

    assert_eq!(run(11), run(11));
}
