// ABOUTME: Defines all error types for the symposium library using thiserror.
// ABOUTME: Each submodule has its own error enum, unified under SymposiumError.

use std::time::Duration;

/// Top-level error type for the symposium library.
#[derive(Debug, thiserror::Error)]
pub enum SymposiumError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Table error: {0}")]
    Table(#[from] TableError),
}

/// Errors from building or validating a table configuration.
///
/// These are reported synchronously by `Table::start`, before any
/// philosopher is spawned.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("a ring needs at least 2 philosophers, got {0}")]
    TooFewPhilosophers(usize),

    #[error("invalid {phase} delay: min {min_ms}ms exceeds max {max_ms}ms")]
    InvalidDelay {
        phase: &'static str,
        min_ms: u64,
        max_ms: u64,
    },

    #[error("invalid value for {key}: '{value}'")]
    InvalidValue { key: String, value: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors from waiting on a running table.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("table did not finish within {0:?}")]
    Timeout(Duration),

    #[error("philosopher {id} task failed: {message}")]
    Join { id: usize, message: String },
}
