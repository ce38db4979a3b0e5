// ABOUTME: Configuration module - table size, meal count, and phase delays.
// ABOUTME: Loads from defaults, JSON files, or environment variables.

mod table_config;
mod timing;

pub use table_config::{
    ENV_EAT_MS, ENV_MEALS, ENV_PHILOSOPHERS, ENV_PRE_EAT_MS, ENV_THINK_MS, TableConfig,
};
pub use timing::{DelayRange, Timing};

#[cfg(test)]
mod config_test;
