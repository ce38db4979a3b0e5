// ABOUTME: Table configuration - number of philosophers, meals, and timing.
// ABOUTME: Supports defaults, JSON files, and environment variable overrides.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::timing::{DelayRange, Timing};
use crate::error::ConfigError;

/// Environment variable for the number of philosophers.
pub const ENV_PHILOSOPHERS: &str = "SYMPOSIUM_PHILOSOPHERS";
/// Environment variable for the meals each philosopher must eat.
pub const ENV_MEALS: &str = "SYMPOSIUM_MEALS";
/// Environment variable for the think delay range.
pub const ENV_THINK_MS: &str = "SYMPOSIUM_THINK_MS";
/// Environment variable for the pre-eat delay range.
pub const ENV_PRE_EAT_MS: &str = "SYMPOSIUM_PRE_EAT_MS";
/// Environment variable for the eat delay range.
pub const ENV_EAT_MS: &str = "SYMPOSIUM_EAT_MS";

fn default_philosophers() -> usize {
    5
}

fn default_meals() -> u32 {
    7
}

/// Configuration for a dining table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableConfig {
    /// Number of philosophers, and therefore forks, around the ring.
    #[serde(default = "default_philosophers")]
    pub philosophers: usize,
    /// Meals each philosopher eats before leaving. Zero is allowed.
    #[serde(default = "default_meals")]
    pub meals: u32,
    #[serde(default)]
    pub timing: Timing,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            philosophers: default_philosophers(),
            meals: default_meals(),
            timing: Timing::default(),
        }
    }
}

impl TableConfig {
    /// Create a config with default timing.
    pub fn new(philosophers: usize, meals: u32) -> Self {
        Self {
            philosophers,
            meals,
            timing: Timing::default(),
        }
    }

    /// Replace the phase delays.
    pub fn with_timing(mut self, timing: Timing) -> Self {
        self.timing = timing;
        self
    }

    /// Parse a config from a JSON document. Missing fields take defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a config from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Build a config from `SYMPOSIUM_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from defaults overridden by whatever `lookup` returns.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(ENV_PHILOSOPHERS) {
            config.philosophers = parse_number(ENV_PHILOSOPHERS, &value)?;
        }
        if let Some(value) = lookup(ENV_MEALS) {
            config.meals = parse_number(ENV_MEALS, &value)?;
        }
        if let Some(value) = lookup(ENV_THINK_MS) {
            config.timing.think = DelayRange::parse(ENV_THINK_MS, &value)?;
        }
        if let Some(value) = lookup(ENV_PRE_EAT_MS) {
            config.timing.pre_eat = DelayRange::parse(ENV_PRE_EAT_MS, &value)?;
        }
        if let Some(value) = lookup(ENV_EAT_MS) {
            config.timing.eat = DelayRange::parse(ENV_EAT_MS, &value)?;
        }

        Ok(config)
    }

    /// Check the config describes a meaningful ring.
    ///
    /// A single philosopher would share one fork with itself, so the ring
    /// needs at least two.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.philosophers < 2 {
            return Err(ConfigError::TooFewPhilosophers(self.philosophers));
        }
        self.timing.validate()
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    })
}
