//! Pitch and ball settings
//!
//! Loaded from a JSON file on native builds; every field falls back to its
//! default when missing.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SettingsError;

/// Simulation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Physical units per grid cell
    pub discretisation: f64,
    /// Ball radius in physical units (also sizes the wall bands)
    pub ball_radius: u32,
    /// Net serve speed in grid cells per timestep
    pub ball_speed: i32,
    /// Serve direction components are drawn from `1..=serve_sample_range`
    pub serve_sample_range: u32,
    /// Resample cap before the flat fallback serve is used
    pub max_serve_samples: u32,
    /// Run seed for reproducibility
    pub seed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            discretisation: DISCRETISATION,
            ball_radius: BALL_RADIUS,
            ball_speed: BALL_SPEED,
            serve_sample_range: SERVE_SAMPLE_RANGE,
            max_serve_samples: MAX_SERVE_SAMPLES,
            seed: 0,
        }
    }
}

impl Settings {
    /// Parse and validate settings from a JSON string
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if !self.discretisation.is_finite() || self.discretisation <= 0.0 {
            return Err(SettingsError::Invalid(format!(
                "discretisation must be positive, got {}",
                self.discretisation
            )));
        }
        if self.ball_speed <= 0 {
            return Err(SettingsError::Invalid(format!(
                "ball_speed must be positive, got {}",
                self.ball_speed
            )));
        }
        if self.serve_sample_range == 0 {
            return Err(SettingsError::Invalid(
                "serve_sample_range must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Wall band depth in cells: the ball radius rounded up to whole cells
    pub fn wall_margin_cells(&self) -> u32 {
        (f64::from(self.ball_radius) / self.discretisation).ceil() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.ball_radius, 50);
        assert_eq!(settings.ball_speed, 5);
        assert_eq!(settings.wall_margin_cells(), 5);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_wall_margin_rounds_up() {
        let settings = Settings {
            ball_radius: 51,
            ..Default::default()
        };
        assert_eq!(settings.wall_margin_cells(), 6);

        let settings = Settings {
            ball_radius: 1,
            discretisation: 1.0,
            ..Default::default()
        };
        assert_eq!(settings.wall_margin_cells(), 1);
    }

    #[test]
    fn test_from_json_partial() {
        let settings = Settings::from_json(r#"{ "seed": 42, "ball_speed": 7 }"#).unwrap();
        assert_eq!(settings.seed, 42);
        assert_eq!(settings.ball_speed, 7);
        assert_eq!(settings.discretisation, DISCRETISATION);
    }

    #[test]
    fn test_from_json_rejects_invalid() {
        assert!(matches!(
            Settings::from_json(r#"{ "discretisation": 0.0 }"#),
            Err(SettingsError::Invalid(_))
        ));
        assert!(matches!(
            Settings::from_json(r#"{ "ball_speed": 0 }"#),
            Err(SettingsError::Invalid(_))
        ));
        assert!(matches!(
            Settings::from_json("not json"),
            Err(SettingsError::Json(_))
        ));
    }

    #[test]
    fn test_json_round_trip() {
        let settings = Settings {
            seed: 7,
            ..Default::default()
        };
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            Settings::load("/nonexistent/sing-pong.json"),
            Err(SettingsError::Io(_))
        ));
    }
}
