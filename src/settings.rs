//! Round tuning and effect toggles
//!
//! Read-only: loaded from the play surface's `data-config` attribute in the
//! browser, or from an optional JSON file natively. Never written back.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Round ===
    /// Round length in seconds
    pub round_secs: u32,
    /// Maximum live collectibles
    pub capacity: usize,
    /// Countdown period
    pub countdown_ms: u32,
    /// Spawn policy period
    pub spawn_period_ms: u32,
    /// Game over banner duration
    pub end_banner_ms: u32,
    /// Pause after the banner before the next round
    pub restart_delay_ms: u32,
    /// Delay before the first round after boot
    pub autostart_delay_ms: u32,

    // === Movement / hitboxes ===
    /// Fraction of remaining distance covered per frame
    pub follow_factor: f32,
    /// Actor hitbox half extent
    pub actor_half_extent: f32,
    /// Collectible footprint edge
    pub collectible_size: f32,

    // === Randomness ===
    /// Fixed RNG seed (clock-seeded when absent)
    pub seed: Option<u64>,

    // === Visual Effects ===
    /// Particle bursts on collection and actor clicks
    pub particles: bool,
    /// Speech bubbles on collection and actor clicks
    pub chatter: bool,
    /// Reduced motion (disables particle bursts)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            round_secs: ROUND_SECS,
            capacity: CAPACITY,
            countdown_ms: COUNTDOWN_MS,
            spawn_period_ms: SPAWN_PERIOD_MS,
            end_banner_ms: END_BANNER_MS,
            restart_delay_ms: RESTART_DELAY_MS,
            autostart_delay_ms: AUTOSTART_DELAY_MS,

            follow_factor: FOLLOW_FACTOR,
            actor_half_extent: ACTOR_HALF_EXTENT,
            collectible_size: COLLECTIBLE_SIZE,

            seed: None,

            particles: true,
            chatter: true,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Parse settings from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Parse settings, falling back to defaults on malformed input
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(settings) => {
                log::info!("Loaded settings");
                settings
            }
            Err(e) => {
                log::warn!("Ignoring malformed settings ({}), using defaults", e);
                Self::default()
            }
        }
    }

    /// Effective particle bursts (respects reduced_motion)
    pub fn effective_particles(&self) -> bool {
        self.particles && !self.reduced_motion
    }

    /// Element attribute holding the JSON settings
    #[cfg(target_arch = "wasm32")]
    const CONFIG_ATTRIBUTE: &'static str = "data-config";

    /// Load settings from the play surface element (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load(element: &web_sys::Element) -> Self {
        match element.get_attribute(Self::CONFIG_ATTRIBUTE) {
            Some(json) => Self::from_json_or_default(&json),
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Load settings from an optional JSON file (native only)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: Option<&std::path::Path>) -> Self {
        let Some(path) = path else {
            log::info!("Using default settings");
            return Self::default();
        };
        match std::fs::read_to_string(path) {
            Ok(json) => Self::from_json_or_default(&json),
            Err(e) => {
                log::warn!("Could not read {}: {}, using defaults", path.display(), e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_constants() {
        let settings = Settings::default();
        assert_eq!(settings.round_secs, 60);
        assert_eq!(settings.capacity, 8);
        assert_eq!(settings.spawn_period_ms, 2000);
        assert_eq!(settings.end_banner_ms, 5000);
        assert_eq!(settings.restart_delay_ms, 2000);
        assert!((settings.follow_factor - 0.12).abs() < f32::EPSILON);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "seed": 7, "particles": false }"#).unwrap();
        assert_eq!(settings.seed, Some(7));
        assert!(!settings.particles);
        assert_eq!(settings.capacity, CAPACITY);
        assert_eq!(settings.round_secs, ROUND_SECS);
    }

    #[test]
    fn test_malformed_json_falls_back() {
        assert!(Settings::from_json("{ nope").is_err());
        assert_eq!(Settings::from_json_or_default("{ nope"), Settings::default());
    }

    #[test]
    fn test_reduced_motion_disables_particles() {
        let settings = Settings {
            reduced_motion: true,
            ..Default::default()
        };
        assert!(!settings.effective_particles());
    }
}
