//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `GIFT_FINDER` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use gift_finder::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Asking at most {} questions", config.questionnaire.max_steps);
//! ```

mod ai;
mod error;
mod logging;
mod questionnaire;

pub use ai::{AiConfig, AiProvider};
pub use error::{ConfigError, ValidationError};
pub use logging::{LogFormat, LoggingConfig};
pub use questionnaire::QuestionnaireConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a working
/// offline configuration (mock generator, built-in catalog, 10 steps).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Log filter and output format
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Question generation backend (OpenAI/Anthropic/mock)
    #[serde(default)]
    pub ai: AiConfig,

    /// Step ceiling and seed catalog
    #[serde(default)]
    pub questionnaire: QuestionnaireConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `GIFT_FINDER` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `GIFT_FINDER__AI__PROVIDER=openai` -> `ai.provider = openai`
    /// - `GIFT_FINDER__QUESTIONNAIRE__MAX_STEPS=8` -> `questionnaire.max_steps = 8`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("GIFT_FINDER")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for the first invalid section.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.logging.validate()?;
        self.ai.validate()?;
        self.questionnaire.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: &[&str] = &[
        "GIFT_FINDER__AI__PROVIDER",
        "GIFT_FINDER__AI__OPENAI_API_KEY",
        "GIFT_FINDER__AI__TIMEOUT_SECS",
        "GIFT_FINDER__QUESTIONNAIRE__MAX_STEPS",
        "GIFT_FINDER__LOGGING__FORMAT",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_load_defaults_from_empty_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        let config = result.unwrap();
        assert_eq!(config.ai.provider, AiProvider::Mock);
        assert_eq!(config.questionnaire.max_steps, 10);
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("GIFT_FINDER__AI__PROVIDER", "openai");
        env::set_var("GIFT_FINDER__AI__OPENAI_API_KEY", "sk-test");
        env::set_var("GIFT_FINDER__AI__TIMEOUT_SECS", "12");
        env::set_var("GIFT_FINDER__QUESTIONNAIRE__MAX_STEPS", "6");
        env::set_var("GIFT_FINDER__LOGGING__FORMAT", "json");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.ai.provider, AiProvider::OpenAI);
        assert_eq!(config.ai.openai_api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.ai.timeout_secs, 12);
        assert_eq!(config.questionnaire.max_steps, 6);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_reports_missing_key() {
        let config = AppConfig {
            ai: AiConfig {
                provider: AiProvider::Anthropic,
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::MissingRequired("ANTHROPIC_API_KEY"))
        );
    }
}
