//! Game settings and tuning
//!
//! Read-only configuration: loaded from JSON when present, otherwise the
//! defaults from [`crate::consts`]. Nothing is ever written back.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::input::KeyBindings;

/// Errors produced while loading settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings are not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("could not read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid setting `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Game settings/tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Paddles ===
    pub paddle_width: f32,
    pub paddle_height: f32,
    /// Vertical distance moved per frame while a key is held
    pub paddle_speed: f32,
    /// Gap between a court edge and the paddle's outer face
    pub paddle_margin: f32,

    // === Ball ===
    pub ball_radius: f32,
    /// Serve speed, restored after every point
    pub ball_base_speed: f32,
    /// Added per point of the leading score on each paddle hit
    pub ball_speed_increment: f32,
    pub ball_max_speed: f32,
    /// Half-angle (radians) of the serve cone around horizontal
    pub serve_cone: f32,

    // === Particles ===
    pub burst_size: usize,
    pub particle_min_radius: f32,
    pub particle_max_radius: f32,
    pub particle_spread: f32,
    /// Alpha lost per frame
    pub particle_fade: f32,

    // === HUD ===
    pub score_font: String,

    // === Controls ===
    pub keys: KeyBindings,

    // === Driver ===
    /// Run the simulation at a fixed 60 Hz instead of once per display refresh
    pub fixed_timestep: bool,
    /// RNG seed; the driver picks one from the clock when absent
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_speed: PADDLE_SPEED,
            paddle_margin: PADDLE_MARGIN,

            ball_radius: BALL_RADIUS,
            ball_base_speed: BALL_BASE_SPEED,
            ball_speed_increment: BALL_SPEED_INCREMENT,
            ball_max_speed: BALL_MAX_SPEED,
            serve_cone: SERVE_CONE,

            burst_size: BURST_SIZE,
            particle_min_radius: PARTICLE_MIN_RADIUS,
            particle_max_radius: PARTICLE_MAX_RADIUS,
            particle_spread: PARTICLE_SPREAD,
            particle_fade: PARTICLE_FADE,

            score_font: SCORE_FONT.to_string(),

            keys: KeyBindings::default(),

            fixed_timestep: false,
            seed: None,
        }
    }
}

impl Settings {
    /// Parse settings from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject values that would break the simulation's invariants
    pub fn validate(&self) -> Result<(), SettingsError> {
        fn positive(field: &'static str, value: f32) -> Result<(), SettingsError> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(SettingsError::Invalid {
                    field,
                    reason: "must be a positive number",
                })
            }
        }

        positive("paddle_width", self.paddle_width)?;
        positive("paddle_height", self.paddle_height)?;
        positive("paddle_speed", self.paddle_speed)?;
        positive("ball_radius", self.ball_radius)?;
        positive("ball_base_speed", self.ball_base_speed)?;
        positive("particle_fade", self.particle_fade)?;
        positive("particle_min_radius", self.particle_min_radius)?;

        if !(self.paddle_margin.is_finite() && self.paddle_margin >= 0.0) {
            return Err(SettingsError::Invalid {
                field: "paddle_margin",
                reason: "must not be negative",
            });
        }
        if !(self.ball_speed_increment.is_finite() && self.ball_speed_increment >= 0.0) {
            return Err(SettingsError::Invalid {
                field: "ball_speed_increment",
                reason: "must not be negative",
            });
        }
        if !(self.ball_max_speed.is_finite() && self.ball_max_speed >= self.ball_base_speed) {
            return Err(SettingsError::Invalid {
                field: "ball_max_speed",
                reason: "must be at least ball_base_speed",
            });
        }
        if !(self.serve_cone >= 0.0 && self.serve_cone < std::f32::consts::FRAC_PI_2) {
            return Err(SettingsError::Invalid {
                field: "serve_cone",
                reason: "must lie in [0, pi/2)",
            });
        }
        if !(self.particle_max_radius.is_finite()
            && self.particle_max_radius > self.particle_min_radius)
        {
            return Err(SettingsError::Invalid {
                field: "particle_max_radius",
                reason: "must exceed particle_min_radius",
            });
        }
        if !(self.particle_spread.is_finite() && self.particle_spread >= 0.0) {
            return Err(SettingsError::Invalid {
                field: "particle_spread",
                reason: "must not be negative",
            });
        }
        if self.burst_size > Self::MAX_BURST_SIZE {
            return Err(SettingsError::Invalid {
                field: "burst_size",
                reason: "must not exceed 1000",
            });
        }
        Ok(())
    }

    /// Largest burst a single bounce may spawn
    pub const MAX_BURST_SIZE: usize = 1000;

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "particle_pong_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Load settings from an optional JSON file path (native)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: Option<&std::path::Path>) -> Self {
        let Some(path) = path else {
            log::info!("Using default settings");
            return Self::default();
        };

        match std::fs::read_to_string(path)
            .map_err(SettingsError::from)
            .and_then(|json| Self::from_json(&json))
        {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Ignoring settings file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.burst_size, 20);
        assert_eq!(settings.ball_base_speed, 2.0);
        assert_eq!(settings.ball_max_speed, 10.0);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "paddle_speed": 6.0, "seed": 7 }"#).unwrap();
        assert_eq!(settings.paddle_speed, 6.0);
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.paddle_height, PADDLE_HEIGHT);
        assert_eq!(settings.keys, KeyBindings::default());
    }

    #[test]
    fn test_rejects_bad_json() {
        let err = Settings::from_json("{ paddle_speed: ").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn test_rejects_max_below_base() {
        let err = Settings::from_json(r#"{ "ball_base_speed": 5.0, "ball_max_speed": 3.0 }"#)
            .unwrap_err();
        assert!(matches!(
            err,
            SettingsError::Invalid {
                field: "ball_max_speed",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_out_of_range_floats() {
        // serde_json reads 1e39 into an f32 as infinity
        let err = Settings::from_json(r#"{ "particle_max_radius": 1e39 }"#).unwrap_err();
        assert!(matches!(
            err,
            SettingsError::Invalid {
                field: "particle_max_radius",
                ..
            }
        ));

        let err = Settings::from_json(r#"{ "ball_max_speed": 1e39 }"#).unwrap_err();
        assert!(matches!(
            err,
            SettingsError::Invalid {
                field: "ball_max_speed",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_huge_bursts() {
        let settings = Settings {
            burst_size: Settings::MAX_BURST_SIZE + 1,
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::Invalid {
                field: "burst_size",
                ..
            })
        ));
        assert!(
            Settings {
                burst_size: Settings::MAX_BURST_SIZE,
                ..Default::default()
            }
            .validate()
            .is_ok()
        );
    }

    #[test]
    fn test_rejects_non_fading_particles() {
        let settings = Settings {
            particle_fade: 0.0,
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_rejects_vertical_serve_cone() {
        let settings = Settings {
            serve_cone: std::f32::consts::FRAC_PI_2,
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_load_missing_file_falls_back() {
        let settings = Settings::load(Some(std::path::Path::new("/nonexistent/pong.json")));
        assert_eq!(settings, Settings::default());
    }
}
