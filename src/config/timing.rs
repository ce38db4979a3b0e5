// ABOUTME: Randomized delay ranges for the think, pre-eat, and eat phases.
// ABOUTME: Delays are tunable and never load-bearing for correctness.

use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// An inclusive range of milliseconds a phase may last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelayRange {
    #[serde(default)]
    pub min_ms: u64,
    #[serde(default)]
    pub max_ms: u64,
}

impl DelayRange {
    /// A range covering `min_ms..=max_ms`.
    pub const fn new(min_ms: u64, max_ms: u64) -> Self {
        Self { min_ms, max_ms }
    }

    /// A range that always yields a zero delay.
    pub const fn zero() -> Self {
        Self::new(0, 0)
    }

    /// Returns true if every sample is zero.
    pub fn is_zero(&self) -> bool {
        self.max_ms == 0
    }

    /// Draw a uniformly random delay from the range.
    pub fn sample(&self) -> Duration {
        if self.min_ms >= self.max_ms {
            return Duration::from_millis(self.min_ms);
        }
        let ms = rand::thread_rng().gen_range(self.min_ms..=self.max_ms);
        Duration::from_millis(ms)
    }

    /// Parse `"min-max"` or a single upper bound `"max"`.
    pub(crate) fn parse(key: &str, value: &str) -> Result<Self, ConfigError> {
        let invalid = || ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        };

        let trimmed = value.trim();
        match trimmed.split_once('-') {
            Some((min, max)) => {
                let min = min.trim().parse().map_err(|_| invalid())?;
                let max = max.trim().parse().map_err(|_| invalid())?;
                Ok(Self::new(min, max))
            }
            None => {
                let max = trimmed.parse().map_err(|_| invalid())?;
                Ok(Self::new(0, max))
            }
        }
    }

    fn validate(&self, phase: &'static str) -> Result<(), ConfigError> {
        if self.min_ms > self.max_ms {
            return Err(ConfigError::InvalidDelay {
                phase,
                min_ms: self.min_ms,
                max_ms: self.max_ms,
            });
        }
        Ok(())
    }
}

impl Default for DelayRange {
    fn default() -> Self {
        Self::new(0, 1000)
    }
}

/// Delays for each phase of a philosopher's cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Timing {
    /// Time spent thinking before each acquisition attempt.
    #[serde(default)]
    pub think: DelayRange,
    /// Time spent holding both forks before the meal starts.
    #[serde(default)]
    pub pre_eat: DelayRange,
    /// Time spent eating, with the eating flag raised.
    #[serde(default)]
    pub eat: DelayRange,
}

impl Timing {
    /// All phases complete immediately.
    pub const fn instant() -> Self {
        Self {
            think: DelayRange::zero(),
            pre_eat: DelayRange::zero(),
            eat: DelayRange::zero(),
        }
    }

    /// Every phase draws from the same range.
    pub const fn uniform(min_ms: u64, max_ms: u64) -> Self {
        let range = DelayRange::new(min_ms, max_ms);
        Self {
            think: range,
            pre_eat: range,
            eat: range,
        }
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        self.think.validate("think")?;
        self.pre_eat.validate("pre_eat")?;
        self.eat.validate("eat")
    }
}
