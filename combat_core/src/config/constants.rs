//! Combat constants configuration

use super::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

/// Tunable engine constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CombatConstants {
    #[serde(default)]
    pub scheduler: SchedulerConstants,
    #[serde(default)]
    pub penalty: PenaltyConstants,
}

impl CombatConstants {
    /// Load and validate constants from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let constants: CombatConstants = super::load_toml(path)?;
        constants.validate()?;
        Ok(constants)
    }

    /// Parse and validate constants from a TOML string
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let constants: CombatConstants = super::parse_toml(content)?;
        constants.validate()?;
        Ok(constants)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let s = &self.scheduler;
        if !(s.tick_interval.is_finite() && s.tick_interval > 0.0) {
            return Err(ConfigError::ValidationError(format!(
                "scheduler.tick_interval must be positive, got {}",
                s.tick_interval
            )));
        }
        if !(s.min_tick_interval.is_finite() && s.min_tick_interval > 0.0) {
            return Err(ConfigError::ValidationError(format!(
                "scheduler.min_tick_interval must be positive, got {}",
                s.min_tick_interval
            )));
        }
        if s.failsafe_action_limit == 0 {
            return Err(ConfigError::ValidationError(
                "scheduler.failsafe_action_limit must be at least 1".to_string(),
            ));
        }
        if !(s.fallback_attack_speed.is_finite() && s.fallback_attack_speed > 0.0) {
            return Err(ConfigError::ValidationError(format!(
                "scheduler.fallback_attack_speed must be positive, got {}",
                s.fallback_attack_speed
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulerConstants {
    /// Seconds between ticks
    #[serde(default = "default_tick_interval")]
    pub tick_interval: f64,
    /// Floor applied to `tick_interval` when arming the timer
    #[serde(default = "default_min_tick_interval")]
    pub min_tick_interval: f64,
    /// Resolved actions after which an encounter is force-stopped
    #[serde(default = "default_failsafe_action_limit")]
    pub failsafe_action_limit: u32,
    /// Attack speed used when the computed one is unusable
    #[serde(default = "default_fallback_attack_speed")]
    pub fallback_attack_speed: f64,
}

impl Default for SchedulerConstants {
    fn default() -> Self {
        SchedulerConstants {
            tick_interval: default_tick_interval(),
            min_tick_interval: default_min_tick_interval(),
            failsafe_action_limit: default_failsafe_action_limit(),
            fallback_attack_speed: default_fallback_attack_speed(),
        }
    }
}

impl SchedulerConstants {
    /// Interval the repeating timer is armed with
    pub fn effective_tick_interval(&self) -> f64 {
        self.tick_interval.max(self.min_tick_interval)
    }
}

fn default_tick_interval() -> f64 {
    1.0
}
fn default_min_tick_interval() -> f64 {
    0.01
}
fn default_failsafe_action_limit() -> u32 {
    3000
}
fn default_fallback_attack_speed() -> f64 {
    1.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PenaltyConstants {
    /// Scale dodge and parry down by the equipment weight penalty
    #[serde(default)]
    pub apply_to_defense: bool,
}

/// Constants shipped with the crate
pub fn default_constants() -> CombatConstants {
    parse_or_default(include_str!("../../config/combat.toml"))
}

fn parse_or_default(toml: &str) -> CombatConstants {
    CombatConstants::parse(toml).unwrap_or_else(|err| {
        warn!(%err, "Bundled combat constants are invalid, using built-in defaults");
        CombatConstants::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let constants = CombatConstants::default();
        assert!((constants.scheduler.tick_interval - 1.0).abs() < f64::EPSILON);
        assert_eq!(constants.scheduler.failsafe_action_limit, 3000);
        assert!(!constants.penalty.apply_to_defense);
    }

    #[test]
    fn test_shipped_constants_parse() {
        let toml = include_str!("../../config/combat.toml");
        let constants = CombatConstants::parse(toml).unwrap();
        assert_eq!(constants, default_constants());
        assert_eq!(constants.scheduler.failsafe_action_limit, 3000);
    }

    #[test]
    fn test_invalid_bundled_constants_fall_back() {
        assert_eq!(parse_or_default("[scheduler"), CombatConstants::default());
        assert_eq!(
            parse_or_default("[scheduler]\ntick_interval = -1.0\n"),
            CombatConstants::default()
        );
    }

    #[test]
    fn test_partial_override() {
        let toml = r#"
[scheduler]
tick_interval = 0.001

[penalty]
apply_to_defense = true
"#;
        let constants = CombatConstants::parse(toml).unwrap();
        assert!((constants.scheduler.min_tick_interval - 0.01).abs() < f64::EPSILON);
        assert!((constants.scheduler.effective_tick_interval() - 0.01).abs() < f64::EPSILON);
        assert!(constants.penalty.apply_to_defense);
    }

    #[test]
    fn test_validation_errors() {
        let zero_failsafe = "[scheduler]\nfailsafe_action_limit = 0\n";
        assert!(matches!(
            CombatConstants::parse(zero_failsafe),
            Err(ConfigError::ValidationError(_))
        ));

        let negative_tick = "[scheduler]\ntick_interval = -1.0\n";
        assert!(CombatConstants::parse(negative_tick).is_err());

        assert!(matches!(
            CombatConstants::parse("[scheduler\n"),
            Err(ConfigError::ParseError(_))
        ));
    }
}
