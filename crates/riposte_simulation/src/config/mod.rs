//! Parry tuning (`ParryConfig` resource).
//!
//! Defaults match the shipped boss fight. Hosts may override them from RON:
//!
//! ```text
//! (
//!     fail_distance: 0.6,
//!     parry_range: 4.5,
//!     reaction_window: 0.2,
//!     parry_cooldown: 0.5,
//!     easy_mode: true,
//! )
//! ```
//!
//! Missing fields fall back to defaults.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub mod error;

pub use error::ConfigError;

/// Tunables for parry arbitration and the defender's parry window.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize, Reflect)]
#[reflect(Resource)]
#[serde(default)]
pub struct ParryConfig {
    /// Inner radius: an attacker this close is already hitting (meters).
    pub fail_distance: f32,
    /// Guardable band outer radius (meters).
    pub parry_range: f32,
    /// Parry animation commit time (seconds).
    pub reaction_window: f32,
    /// Refractory period after every resolution (seconds).
    pub parry_cooldown: f32,
    /// Halves `fail_distance`.
    pub easy_mode: bool,
    /// An attacker that cannot arrive in time withdraws the aggregate Success.
    pub force_resolve_out_of_range: bool,
    /// Floor for attacker speed before dividing by it.
    pub speed_epsilon: f32,
    /// Defender hit-reaction duration; guard and parry are blocked meanwhile (seconds).
    pub hit_stun: f32,
    /// How long a counter opportunity stays open after a clean parry (seconds).
    pub counter_window: f32,
    /// Damage dealt to the attacker by a counter.
    pub counter_damage: u32,
    /// Defender recovery after a counter; parry input is ignored meanwhile (seconds).
    pub counter_recovery: f32,
}

impl Default for ParryConfig {
    fn default() -> Self {
        Self {
            fail_distance: 0.6,
            parry_range: 4.5,
            reaction_window: 0.2,
            parry_cooldown: 0.5,
            easy_mode: false,
            force_resolve_out_of_range: false,
            speed_epsilon: 0.01,
            hit_stun: 0.5,
            counter_window: 1.5,
            counter_damage: 1,
            counter_recovery: 1.0,
        }
    }
}

impl ParryConfig {
    /// Fail radius actually used by the predictor (halved in easy mode).
    pub fn effective_fail_distance(&self) -> f32 {
        if self.easy_mode {
            self.fail_distance / 2.0
        } else {
            self.fail_distance
        }
    }

    /// Parse from RON text and validate.
    pub fn from_ron_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(text).map_err(|e| ConfigError::ParseError {
            details: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read a RON file from disk, parse and validate.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.display().to_string(),
            details: e.to_string(),
        })?;
        Self::from_ron_str(&text)
    }

    /// Reject values that would make arbitration meaningless.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let non_negative = [
            ("fail_distance", self.fail_distance),
            ("parry_range", self.parry_range),
            ("parry_cooldown", self.parry_cooldown),
            ("hit_stun", self.hit_stun),
            ("counter_window", self.counter_window),
            ("counter_recovery", self.counter_recovery),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidValue {
                    field,
                    value,
                    reason: "must be finite and >= 0",
                });
            }
        }

        let positive = [
            ("reaction_window", self.reaction_window),
            ("speed_epsilon", self.speed_epsilon),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidValue {
                    field,
                    value,
                    reason: "must be finite and > 0",
                });
            }
        }

        if self.fail_distance >= self.parry_range {
            return Err(ConfigError::InvalidValue {
                field: "fail_distance",
                value: self.fail_distance,
                reason: "must be smaller than parry_range",
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ParryConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.fail_distance, 0.6);
        assert_eq!(config.parry_range, 4.5);
        assert_eq!(config.reaction_window, 0.2);
        assert_eq!(config.parry_cooldown, 0.5);
    }

    #[test]
    fn test_easy_mode_halves_fail_distance() {
        let config = ParryConfig {
            easy_mode: true,
            ..Default::default()
        };
        assert_eq!(config.effective_fail_distance(), 0.3);
        assert_eq!(ParryConfig::default().effective_fail_distance(), 0.6);
    }

    #[test]
    fn test_partial_ron_uses_defaults() {
        let config = ParryConfig::from_ron_str("(easy_mode: true, parry_range: 5.0)").unwrap();
        assert!(config.easy_mode);
        assert_eq!(config.parry_range, 5.0);
        assert_eq!(config.reaction_window, 0.2);
    }

    #[test]
    fn test_malformed_ron_is_parse_error() {
        let err = ParryConfig::from_ron_str("(parry_range: ").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn test_fail_distance_must_be_inside_parry_range() {
        let err = ParryConfig::from_ron_str("(fail_distance: 5.0, parry_range: 4.5)").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { field: "fail_distance", .. }
        ));
    }

    #[test]
    fn test_zero_reaction_window_rejected() {
        let config = ParryConfig {
            reaction_window: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field: "reaction_window", .. })
        ));
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let err = ParryConfig::load("/definitely/not/here/parry.ron").unwrap_err();
        assert!(matches!(err, ConfigError::ReadError { .. }));
    }
}
