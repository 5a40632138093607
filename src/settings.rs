//! Simulation and control settings
//!
//! Loaded from `marble_mixer.json` in the working directory when present.
//! Every field has a default, so a partial file only overrides what it names.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Largest accepted inventory capacity
pub const MAX_INVENTORY_CAPACITY: usize = 1_000;

/// Largest accepted ball count for startup spawning
pub const MAX_BALL_COUNT: usize = 10_000;

/// Arena and inventory setup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub screen_width: f32,
    pub screen_height: f32,
    /// Maximum balls the inventory can hold
    pub inventory_capacity: usize,
    /// Cursor reach for absorbing, in pixels
    pub absorption_radius: f32,
    /// Random balls spawned at construction
    pub initial_balls: usize,
    /// Side of the square deletion zone in the top-right corner
    pub deletion_zone_size: f32,
    /// Screen position of inventory slot 0
    pub inventory_origin: (f32, f32),
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            screen_width: 800.0,
            screen_height: 600.0,
            inventory_capacity: 10,
            absorption_radius: 80.0,
            initial_balls: 5,
            deletion_zone_size: 100.0,
            inventory_origin: (50.0, 50.0),
        }
    }
}

/// Input driver policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlSettings {
    /// Seconds between successful absorbs while the button is held
    pub absorb_cooldown: f32,
    /// Seconds between successful releases while the button is held
    pub release_cooldown: f32,
    /// The driver tops the arena up to this many balls at start
    pub target_ball_count: usize,
}

impl Default for ControlSettings {
    fn default() -> Self {
        Self {
            absorb_cooldown: 0.2,
            release_cooldown: 0.3,
            target_ball_count: 8,
        }
    }
}

/// All settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub sim: SimConfig,
    pub controls: ControlSettings,
}

/// Settings failures
#[derive(Debug)]
pub enum SettingsError {
    /// The file could not be read
    Io(std::io::Error),
    /// The JSON was malformed
    Parse(serde_json::Error),
    /// A value is outside its usable range
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "failed to read settings: {}", e),
            SettingsError::Parse(e) => write!(f, "failed to parse settings: {}", e),
            SettingsError::Invalid { field, reason } => write!(f, "invalid setting '{}': {}", field, reason),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io(e) => Some(e),
            SettingsError::Parse(e) => Some(e),
            SettingsError::Invalid { .. } => None,
        }
    }
}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        SettingsError::Io(e)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        SettingsError::Parse(e)
    }
}

impl Settings {
    /// Default settings file name
    pub const FILE_NAME: &'static str = "marble_mixer.json";

    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read settings from a file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        let sim = &self.sim;
        let positive = [
            ("sim.screen_width", sim.screen_width),
            ("sim.screen_height", sim.screen_height),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(SettingsError::Invalid {
                    field,
                    reason: "must be a positive number",
                });
            }
        }

        let non_negative = [
            ("sim.absorption_radius", sim.absorption_radius),
            ("sim.deletion_zone_size", sim.deletion_zone_size),
            ("controls.absorb_cooldown", self.controls.absorb_cooldown),
            ("controls.release_cooldown", self.controls.release_cooldown),
        ];
        for (field, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(SettingsError::Invalid {
                    field,
                    reason: "must be zero or a positive number",
                });
            }
        }

        if !(sim.inventory_origin.0.is_finite() && sim.inventory_origin.1.is_finite()) {
            return Err(SettingsError::Invalid {
                field: "sim.inventory_origin",
                reason: "must be finite",
            });
        }

        let counts = [
            ("sim.inventory_capacity", sim.inventory_capacity, MAX_INVENTORY_CAPACITY),
            ("sim.initial_balls", sim.initial_balls, MAX_BALL_COUNT),
            ("controls.target_ball_count", self.controls.target_ball_count, MAX_BALL_COUNT),
        ];
        for (field, value, max) in counts {
            if value > max {
                return Err(SettingsError::Invalid {
                    field,
                    reason: "is larger than the supported maximum",
                });
            }
        }
        Ok(())
    }

    /// Load `marble_mixer.json` from the working directory, falling back to defaults
    pub fn load() -> Self {
        let path = Path::new(Self::FILE_NAME);
        if !path.exists() {
            log::info!("Using default settings");
            return Self::default();
        }
        match Self::from_file(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("{}; using default settings", e);
                Self::default()
            }
        }
    }

    /// Write settings to `path` as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        std::fs::write(path, self.to_json()?)?;
        log::info!("Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.sim.inventory_capacity, 10);
        assert_eq!(settings.sim.absorption_radius, 80.0);
        assert_eq!(settings.sim.initial_balls, 5);
        assert_eq!(settings.controls.absorb_cooldown, 0.2);
        assert_eq!(settings.controls.release_cooldown, 0.3);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "sim": { "screen_width": 1000, "screen_height": 700 } }"#)
            .expect("valid settings");
        assert_eq!(settings.sim.screen_width, 1000.0);
        assert_eq!(settings.sim.screen_height, 700.0);
        assert_eq!(settings.sim.inventory_capacity, 10);
        assert_eq!(settings.controls, ControlSettings::default());
    }

    #[test]
    fn test_round_trip_through_json() {
        let mut settings = Settings::default();
        settings.sim.inventory_capacity = 3;
        settings.controls.target_ball_count = 12;
        let json = settings.to_json().expect("serializes");
        assert_eq!(Settings::from_json(&json).expect("parses"), settings);
    }

    #[test]
    fn test_malformed_json() {
        let err = Settings::from_json("{ not json").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn test_invalid_values() {
        let err = Settings::from_json(r#"{ "sim": { "screen_width": -5 } }"#).unwrap_err();
        assert!(matches!(
            err,
            SettingsError::Invalid {
                field: "sim.screen_width",
                ..
            }
        ));

        let err = Settings::from_json(r#"{ "controls": { "release_cooldown": -0.1 } }"#).unwrap_err();
        assert!(err.to_string().contains("controls.release_cooldown"));
    }

    #[test]
    fn test_oversized_counts_rejected() {
        let err = Settings::from_json(r#"{ "sim": { "inventory_capacity": 18446744073709551615, "initial_balls": 0 } }"#)
            .unwrap_err();
        assert!(matches!(
            err,
            SettingsError::Invalid {
                field: "sim.inventory_capacity",
                ..
            }
        ));

        let err = Settings::from_json(r#"{ "sim": { "initial_balls": 4000000000 } }"#).unwrap_err();
        assert!(err.to_string().contains("sim.initial_balls"));

        let err = Settings::from_json(r#"{ "controls": { "target_ball_count": 10001 } }"#).unwrap_err();
        assert!(err.to_string().contains("controls.target_ball_count"));

        let mut settings = Settings::default();
        settings.sim.inventory_capacity = MAX_INVENTORY_CAPACITY;
        settings.controls.target_ball_count = MAX_BALL_COUNT;
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_missing_file() {
        let err = Settings::from_file("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, SettingsError::Io(_)));
    }
}
