//! Session configuration: day count, health economy and starting hair state.
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{
    DEFAULT_MAX_HEALTH, DEFAULT_STARTING_DAYS_SINCE_WASH, DEFAULT_STARTING_HEALTH,
    DEFAULT_TOTAL_DAYS, DEFAULT_WAIT_RECOVERY, DEFAULT_WASH_COST, HEALTH_FIELD_LIMIT,
    MAX_TOTAL_DAYS, SCHEDULE_GUARANTEED_EVENTS,
};

/// Immutable per-session tuning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    #[serde(default = "GameConfig::default_total_days")]
    pub total_days: u32,
    #[serde(default = "GameConfig::default_starting_health")]
    pub starting_health: i32,
    #[serde(default = "GameConfig::default_wash_cost")]
    pub wash_cost: i32,
    #[serde(default = "GameConfig::default_wait_recovery")]
    pub wait_recovery: i32,
    #[serde(default = "GameConfig::default_starting_days_since_wash")]
    pub starting_days_since_wash: u32,
    /// Health recovered by waiting never exceeds this.
    #[serde(default = "GameConfig::default_max_health")]
    pub max_health: i32,
}

/// Errors raised when configuration invariants are violated.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("total_days must be between {min} and {max} (got {value})")]
    DayRange { min: u32, max: u32, value: u32 },
    #[error("starting_health must be positive (got {value})")]
    StartingHealth { value: i32 },
    #[error("starting_health {starting} exceeds max_health {max}")]
    HealthAboveCap { starting: i32, max: i32 },
    #[error("{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: i32 },
    #[error("{field} must be at most {max} (got {value})")]
    AboveLimit {
        field: &'static str,
        value: i32,
        max: i32,
    },
    #[error("config parse error: {0}")]
    Parse(String),
}

impl GameConfig {
    const fn default_total_days() -> u32 {
        DEFAULT_TOTAL_DAYS
    }

    const fn default_starting_health() -> i32 {
        DEFAULT_STARTING_HEALTH
    }

    const fn default_wash_cost() -> i32 {
        DEFAULT_WASH_COST
    }

    const fn default_wait_recovery() -> i32 {
        DEFAULT_WAIT_RECOVERY
    }

    const fn default_starting_days_since_wash() -> u32 {
        DEFAULT_STARTING_DAYS_SINCE_WASH
    }

    const fn default_max_health() -> i32 {
        DEFAULT_MAX_HEALTH
    }

    /// Load configuration from JSON; absent fields fall back to defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed or the result fails validation.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Return a copy with a different day count.
    #[must_use]
    pub fn with_total_days(mut self, total_days: u32) -> Self {
        self.total_days = total_days;
        self
    }

    /// Validate configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns an error if the day count cannot fit the guaranteed events,
    /// starting health is not positive or above the cap, or a cost is negative
    /// or larger than [`HEALTH_FIELD_LIMIT`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(SCHEDULE_GUARANTEED_EVENTS..=MAX_TOTAL_DAYS).contains(&self.total_days) {
            return Err(ConfigError::DayRange {
                min: SCHEDULE_GUARANTEED_EVENTS,
                max: MAX_TOTAL_DAYS,
                value: self.total_days,
            });
        }
        if self.starting_health <= 0 {
            return Err(ConfigError::StartingHealth {
                value: self.starting_health,
            });
        }
        if self.starting_health > self.max_health {
            return Err(ConfigError::HealthAboveCap {
                starting: self.starting_health,
                max: self.max_health,
            });
        }
        for (field, value) in [
            ("wash_cost", self.wash_cost),
            ("wait_recovery", self.wait_recovery),
        ] {
            if value < 0 {
                return Err(ConfigError::Negative { field, value });
            }
        }
        for (field, value) in [
            ("max_health", self.max_health),
            ("wash_cost", self.wash_cost),
            ("wait_recovery", self.wait_recovery),
        ] {
            if value > HEALTH_FIELD_LIMIT {
                return Err(ConfigError::AboveLimit {
                    field,
                    value,
                    max: HEALTH_FIELD_LIMIT,
                });
            }
        }
        Ok(())
    }

    /// Schedule length as an index bound.
    #[must_use]
    pub fn day_count(&self) -> usize {
        self.total_days as usize
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            total_days: Self::default_total_days(),
            starting_health: Self::default_starting_health(),
            wash_cost: Self::default_wash_cost(),
            wait_recovery: Self::default_wait_recovery(),
            starting_days_since_wash: Self::default_starting_days_since_wash(),
            max_health: Self::default_max_health(),
        }
    }
}
