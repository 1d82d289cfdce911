//! Simulator configuration
//!
//! Everything the engine and renderer need that used to be process-wide
//! state lives here and is passed in explicitly.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Limits applied to inbound drop frames and the outbound queue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DropConfig {
    /// Largest accepted drop name, in bytes
    pub max_name_len: usize,
    /// Largest accepted drop payload, in bytes
    pub max_payload_len: usize,
    /// Outbound drops kept before the oldest is discarded
    pub max_queued: usize,
}

impl Default for DropConfig {
    fn default() -> Self {
        Self {
            max_name_len: 1024,
            max_payload_len: 65536,
            max_queued: 16,
        }
    }
}

/// Omnidirectional drive parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriveConfig {
    /// Converts integer drop velocities into simulator units
    pub velocity_scale: f64,
    /// Distance from the robot centre to each wheel
    pub wheel_base: f64,
    /// Force (and torque) per unit of velocity error
    pub force_gain: f64,
}

impl Default for DriveConfig {
    fn default() -> Self {
        Self {
            velocity_scale: 1.0,
            wheel_base: 0.1,
            force_gain: 1.0,
        }
    }
}

/// Rendering switches.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawConfig {
    /// Emit vector (SVG-friendly) output instead of raster hints
    pub svg: bool,
}

/// Top-level simulator configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Gravitational acceleration (m/s^2) used for friction and the
    /// accelerometer's vertical axis
    pub gravity: f64,
    pub drops: DropConfig,
    pub drive: DriveConfig,
    pub draw: DrawConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            gravity: 9.81,
            drops: DropConfig::default(),
            drive: DriveConfig::default(),
            draw: DrawConfig::default(),
        }
    }
}

impl SimConfig {
    /// Parses a JSON document. Missing fields take their default values.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SimConfig::default();
        assert_eq!(config.gravity, 9.81);
        assert_eq!(config.drops.max_name_len, 1024);
        assert!(!config.draw.svg);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config =
            SimConfig::from_json_str(r#"{ "gravity": 1.62, "drops": { "max_queued": 4 } }"#)
                .unwrap();
        assert_eq!(config.gravity, 1.62);
        assert_eq!(config.drops.max_queued, 4);
        assert_eq!(config.drops.max_name_len, 1024);
        assert_eq!(config.drive, DriveConfig::default());
    }

    #[test]
    fn test_json_round_trip() {
        let mut config = SimConfig::default();
        config.draw.svg = true;
        config.drive.wheel_base = 0.2;
        let json = config.to_json().unwrap();
        assert_eq!(SimConfig::from_json_str(&json).unwrap(), config);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(matches!(
            SimConfig::from_json_str("{ gravity: "),
            Err(ConfigError::Serde(_))
        ));
        assert!(matches!(
            SimConfig::from_path("/nonexistent/critter.json"),
            Err(ConfigError::Io(_))
        ));
    }
}
