//! Main configuration type.
//!
//! This module provides the top-level [`CovenantConfig`] struct, its
//! validation rules and the development/production presets.

use serde::{Deserialize, Serialize};

use crate::{ConfigError, LogFormat, LoggingConfig, RouterConfig};

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Complete Covenant configuration.
///
/// Use [`ConfigLoader`](crate::ConfigLoader) to load configuration from files
/// and environment variables.
///
/// # Example
///
/// ```
/// use covenant_config::CovenantConfig;
///
/// let config = CovenantConfig::default();
/// assert_eq!(config.router.base_path, "/");
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct CovenantConfig {
    /// Router configuration.
    #[serde(default)]
    pub router: RouterConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CovenantConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if:
    /// - the base path does not start with `/` or contains `?` or `#`
    /// - a status code is outside `100..=599`
    /// - the breach status is not an error status (4xx or 5xx)
    /// - the log level is unknown
    pub fn validate(&self) -> Result<(), ConfigError> {
        let base_path = &self.router.base_path;
        if !base_path.starts_with('/') {
            return Err(ConfigError::invalid_value(
                "router.base_path",
                format!("must start with '/': {base_path}"),
            ));
        }
        if base_path.contains(['?', '#']) {
            return Err(ConfigError::invalid_value(
                "router.base_path",
                format!("must be a plain path: {base_path}"),
            ));
        }

        for (field, status) in [
            ("router.breach_status", self.router.breach_status),
            ("router.not_found_status", self.router.not_found_status),
        ] {
            if !(100..=599).contains(&status) {
                return Err(ConfigError::invalid_value(
                    field,
                    format!("not an HTTP status code: {status}"),
                ));
            }
        }

        if self.router.breach_status < 400 {
            return Err(ConfigError::invalid_value(
                "router.breach_status",
                "must be a 4xx or 5xx status",
            ));
        }

        if !LOG_LEVELS.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::invalid_value(
                "logging.level",
                format!("expected one of {}", LOG_LEVELS.join(", ")),
            ));
        }

        Ok(())
    }

    /// Create a development configuration preset.
    ///
    /// Debug level, pretty output.
    ///
    /// # Example
    ///
    /// ```
    /// use covenant_config::CovenantConfig;
    ///
    /// let config = CovenantConfig::development();
    /// assert_eq!(config.logging.level, "debug");
    /// ```
    #[must_use]
    pub fn development() -> Self {
        let mut config = Self::default();
        config.logging.level = "debug".to_string();
        config.logging.format = LogFormat::Pretty;
        config
    }

    /// Create a production configuration preset.
    ///
    /// Info level, JSON output, and breach bodies that carry the status only.
    ///
    /// # Example
    ///
    /// ```
    /// use covenant_config::{CovenantConfig, LogFormat};
    ///
    /// let config = CovenantConfig::production();
    /// assert_eq!(config.logging.format, LogFormat::Json);
    /// assert!(!config.router.expose_failures);
    /// ```
    #[must_use]
    pub fn production() -> Self {
        let mut config = Self::default();
        config.logging.level = "info".to_string();
        config.logging.format = LogFormat::Json;
        config.router.expose_failures = false;
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(CovenantConfig::default().validate().is_ok());
        assert!(CovenantConfig::development().validate().is_ok());
        assert!(CovenantConfig::production().validate().is_ok());
    }

    #[test]
    fn test_relative_base_path_rejected() {
        let mut config = CovenantConfig::default();
        config.router.base_path = "api".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("router.base_path"));
    }

    #[test]
    fn test_base_path_with_query_rejected() {
        let mut config = CovenantConfig::default();
        config.router.base_path = "/api?x=1".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_status_out_of_range_rejected() {
        let mut config = CovenantConfig::default();
        config.router.not_found_status = 1000;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("router.not_found_status"));
    }

    #[test]
    fn test_breach_status_must_be_error() {
        let mut config = CovenantConfig::default();
        config.router.breach_status = 200;
        assert!(config.validate().is_err());

        config.router.breach_status = 422;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unknown_log_level_rejected() {
        let mut config = CovenantConfig::default();
        config.logging.level = "verbose".to_string();
        assert!(config.validate().is_err());

        config.logging.level = "WARN".to_string();
        assert!(config.validate().is_ok());
    }
}
