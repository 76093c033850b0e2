//! Configuration validation with range checks.

use crate::error::ConfigError;

use super::Config;

impl Config {
    /// Validate configuration values are within acceptable ranges.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.databricks.model.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "databricks.model must not be empty".into(),
            ));
        }
        if self.databricks.timeout_ms == 0 {
            return Err(ConfigError::ValidationError(
                "databricks.timeout_ms must be > 0".into(),
            ));
        }
        if !(0.0..=2.0).contains(&self.databricks.temperature) {
            return Err(ConfigError::ValidationError(
                "databricks.temperature must be between 0.0 and 2.0".into(),
            ));
        }
        Ok(())
    }
}
