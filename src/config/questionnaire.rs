//! Questionnaire configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;
use crate::domain::questionnaire::{CatalogError, QuestionCatalog, MAX_CEILING};

/// Questionnaire configuration
#[derive(Debug, Clone, Deserialize)]
pub struct QuestionnaireConfig {
    /// Step ceiling; finishing happens on this step (at most 10)
    #[serde(default = "default_max_steps")]
    pub max_steps: usize,

    /// YAML or JSON seed catalog; the built-in gift finder catalog if unset
    pub catalog_path: Option<PathBuf>,
}

impl QuestionnaireConfig {
    /// Loads the configured seed catalog.
    pub fn load_catalog(&self) -> Result<QuestionCatalog, CatalogError> {
        match &self.catalog_path {
            Some(path) => QuestionCatalog::from_path(path),
            None => Ok(QuestionCatalog::gift_finder()),
        }
    }

    /// Validate questionnaire configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_steps == 0 || self.max_steps > MAX_CEILING {
            return Err(ValidationError::InvalidMaxSteps(self.max_steps));
        }
        Ok(())
    }
}

impl Default for QuestionnaireConfig {
    fn default() -> Self {
        Self {
            max_steps: default_max_steps(),
            catalog_path: None,
        }
    }
}

fn default_max_steps() -> usize {
    MAX_CEILING
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_questionnaire_defaults() {
        let config = QuestionnaireConfig::default();
        assert_eq!(config.max_steps, 10);
        assert!(config.validate().is_ok());
        assert_eq!(config.load_catalog().unwrap(), QuestionCatalog::gift_finder());
    }

    #[test]
    fn test_max_steps_bounds() {
        for good in [1, 6, 10] {
            let config = QuestionnaireConfig {
                max_steps: good,
                ..Default::default()
            };
            assert!(config.validate().is_ok());
        }
        for bad in [0, 11, 50] {
            let config = QuestionnaireConfig {
                max_steps: bad,
                ..Default::default()
            };
            assert_eq!(config.validate(), Err(ValidationError::InvalidMaxSteps(bad)));
        }
    }

    #[test]
    fn test_missing_catalog_file_is_error() {
        let config = QuestionnaireConfig {
            catalog_path: Some(PathBuf::from("/nonexistent/catalog.yaml")),
            ..Default::default()
        };
        assert!(config.load_catalog().is_err());
    }
}
