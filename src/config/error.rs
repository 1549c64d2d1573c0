//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid AI request timeout (must be 1..=300 seconds)")]
    InvalidTimeout,

    #[error("Invalid temperature (must be 0.0..=2.0)")]
    InvalidTemperature,

    #[error("Invalid max_tokens (must be greater than zero)")]
    InvalidMaxTokens,

    #[error("Invalid max_steps {0} (must be 1..=10)")]
    InvalidMaxSteps(usize),

    #[error("Invalid log filter: {0}")]
    InvalidLogFilter(String),
}
