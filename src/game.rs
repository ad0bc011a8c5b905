//! Session controller
//!
//! Owns the [`Session`], the injected RNG, a [`Scheduler`] and a [`Surface`],
//! and runs the round lifecycle:
//!
//! `Idle -> Running -> Ending -> Idle -> Running ...`
//!
//! Every wake the scheduler delivers goes through [`Game::wake`].

use glam::Vec2;
use rand::Rng;

use crate::consts::{BUBBLE_OFFSET, CHATTER_BUBBLE_MS, COLLECT_BUBBLE_MS};
use crate::schedule::{Cadence, Scheduler, Subscriptions, VirtualScheduler, Wake};
use crate::settings::Settings;
use crate::sim::{self, Countdown, Phase, Session};
use crate::surface::{BubbleAnchor, Surface};

/// Lines the actor says when clicked
pub const CHATTER: [&str; 10] = [
    "Hi! I'm Data Bot! 🤖",
    "Let's find some data! 💎",
    "Yay! Treasure! ⭐",
    "I love data science! 📊",
    "Keep going! 💪",
    "You're doing great! 🎉",
    "Data is everywhere! 🔍",
    "Thanks for helping! 🙏",
    "Let's explore more! 🚀",
    "Finding patterns is fun! 🎯",
];

/// Game instance holding all state
pub struct Game<R, S, D> {
    session: Session,
    settings: Settings,
    rng: R,
    scheduler: S,
    surface: D,
    subscriptions: Subscriptions,
}

impl<R: Rng, S: Scheduler, D: Surface> Game<R, S, D> {
    pub fn new(settings: Settings, rng: R, scheduler: S, surface: D) -> Self {
        Self {
            session: Session::new(),
            settings,
            rng,
            scheduler,
            surface,
            subscriptions: Subscriptions::default(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn surface(&self) -> &D {
        &self.surface
    }

    pub fn subscriptions(&self) -> &Subscriptions {
        &self.subscriptions
    }

    /// Draw the initial HUD and schedule the first round
    pub fn boot(&mut self) {
        self.surface.move_actor(self.session.actor);
        self.surface.set_score(self.session.score);
        self.surface.set_time_left(self.session.time_left);
        self.subscriptions.arm(
            &mut self.scheduler,
            Wake::Restart,
            Cadence::After(self.settings.autostart_delay_ms),
        );
        log::info!(
            "Game booted, first round in {}ms",
            self.settings.autostart_delay_ms
        );
    }

    /// Start a round (silently ignored unless Idle)
    pub fn start(&mut self) {
        if !self.session.begin_round(self.settings.round_secs) {
            return;
        }
        log::info!("Round {} started", self.session.round);

        self.surface.set_score(self.session.score);
        self.surface.set_time_left(self.session.time_left);

        let scheduler = &mut self.scheduler;
        self.subscriptions.disarm(scheduler, Wake::Restart);
        self.subscriptions.arm(scheduler, Wake::Frame, Cadence::NextFrame);
        self.subscriptions.arm(
            scheduler,
            Wake::Countdown,
            Cadence::Every(self.settings.countdown_ms),
        );

        self.spawn();
        self.subscriptions.arm(
            &mut self.scheduler,
            Wake::Spawn,
            Cadence::Every(self.settings.spawn_period_ms),
        );
    }

    /// End the running round (silently ignored unless Running)
    pub fn end(&mut self) {
        let Some(cleared) = self.session.finish_round() else {
            return;
        };
        log::info!(
            "Round {} over, score {}",
            self.session.round,
            self.session.score
        );

        let scheduler = &mut self.scheduler;
        self.subscriptions.disarm(scheduler, Wake::Frame);
        self.subscriptions.disarm(scheduler, Wake::Countdown);
        self.subscriptions.disarm(scheduler, Wake::Spawn);
        self.subscriptions.disarm(scheduler, Wake::HideBubble);

        for collectible in &cleared {
            self.surface.remove_collectible(collectible.id);
        }

        let banner = format!("Game Over! Score: {} 🎉", self.session.score);
        self.surface.show_bubble(&banner, BubbleAnchor::Centered);
        self.subscriptions.arm(
            &mut self.scheduler,
            Wake::EndBanner,
            Cadence::After(self.settings.end_banner_ms),
        );
    }

    /// Dispatch a scheduler callback
    pub fn wake(&mut self, wake: Wake) {
        if !wake_is_periodic(wake) {
            self.subscriptions.fired(wake);
        }

        match wake {
            Wake::Frame => self.update(),
            Wake::Countdown => self.tick_clock(),
            Wake::Spawn => {
                if self.session.is_playing() {
                    self.spawn();
                }
            }
            Wake::EndBanner => {
                self.surface.hide_bubble();
                self.session.settle();
                self.subscriptions.arm(
                    &mut self.scheduler,
                    Wake::Restart,
                    Cadence::After(self.settings.restart_delay_ms),
                );
            }
            Wake::Restart => self.start(),
            Wake::HideBubble => self.surface.hide_bubble(),
        }
    }

    /// Pointer or touch moved (play-surface coordinates)
    pub fn pointer_moved(&mut self, pos: Vec2) {
        self.session.pointer = pos;
    }

    /// Click on the play surface: starts a round when Idle
    pub fn surface_clicked(&mut self) {
        if self.session.phase == Phase::Idle {
            self.start();
        }
    }

    /// Click on the actor: chatter and a particle burst, never starts a round
    pub fn actor_clicked(&mut self) {
        let line = CHATTER[self.rng.random_range(0..CHATTER.len())];
        self.say(line, CHATTER_BUBBLE_MS);
        if self.settings.effective_particles() {
            self.surface.burst(self.session.actor);
        }
    }

    /// One display frame: move, aim, collect, re-subscribe
    fn update(&mut self) {
        let Some(outcome) = sim::frame(&mut self.session, &self.settings) else {
            return;
        };

        self.surface.move_actor(outcome.actor);
        self.surface.aim_pupils(&outcome.pupils);

        if !outcome.collected.is_empty() {
            for collected in &outcome.collected {
                log::debug!(
                    "Collected {} #{} (+{})",
                    collected.kind.as_str(),
                    collected.id,
                    collected.value
                );
                self.surface.remove_collectible(collected.id);
                if self.settings.effective_particles() {
                    self.surface.burst(collected.center);
                }
                self.say(collected.kind.cheer(), COLLECT_BUBBLE_MS);
            }
            self.surface.set_score(self.session.score);
        }

        self.subscriptions
            .arm(&mut self.scheduler, Wake::Frame, Cadence::NextFrame);
    }

    fn tick_clock(&mut self) {
        match sim::countdown(&mut self.session) {
            Countdown::Running(secs) => self.surface.set_time_left(secs),
            Countdown::Expired => {
                self.surface.set_time_left(0);
                self.end();
            }
            Countdown::Inactive => {}
        }
    }

    fn spawn(&mut self) {
        let bounds = self.surface.size();
        if let Some(collectible) = sim::spawn(
            &mut self.session,
            &mut self.rng,
            bounds,
            self.settings.capacity,
            self.settings.collectible_size,
        ) {
            log::debug!(
                "Spawned {} #{} at ({:.0}, {:.0})",
                collectible.kind.as_str(),
                collectible.id,
                collectible.pos.x,
                collectible.pos.y
            );
            self.surface.place_collectible(&collectible);
        }
    }

    /// Show a bubble beside the actor; replaces any pending dismissal
    fn say(&mut self, text: &str, duration_ms: u32) {
        if !self.settings.chatter {
            return;
        }
        self.surface
            .show_bubble(text, BubbleAnchor::At(self.session.actor + BUBBLE_OFFSET));
        self.subscriptions.arm(
            &mut self.scheduler,
            Wake::HideBubble,
            Cadence::After(duration_ms),
        );
    }
}

fn wake_is_periodic(wake: Wake) -> bool {
    matches!(wake, Wake::Countdown | Wake::Spawn)
}

impl<R: Rng, D: Surface> Game<R, VirtualScheduler, D> {
    /// Advance the virtual clock, dispatching everything that comes due
    pub fn advance(&mut self, ms: u64) {
        let until = self.scheduler.now_ms() + ms;
        while let Some(wake) = self.scheduler.pop_due(until) {
            self.wake(wake);
        }
        self.scheduler.settle(until);
    }

    /// Current virtual time
    pub fn now_ms(&self) -> u64 {
        self.scheduler.now_ms()
    }
}
