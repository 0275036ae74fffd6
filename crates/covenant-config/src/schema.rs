//! Configuration schema types.
//!
//! This module defines the structure of each configuration section.

use serde::{Deserialize, Serialize};

/// Router configuration section.
///
/// Controls where a `ContractRouter` is mounted and how it answers requests
/// that match no route or breach a route's contract.
///
/// # Example
///
/// ```
/// use covenant_config::RouterConfig;
///
/// let config = RouterConfig {
///     base_path: "/api".to_string(),
///     ..Default::default()
/// };
/// assert_eq!(config.breach_status, 400);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RouterConfig {
    /// Path prefix prepended to every route (e.g., "/api/v1").
    #[serde(default = "default_base_path")]
    pub base_path: String,

    /// Status returned when a matched route rejects the request.
    #[serde(default = "default_breach_status")]
    pub breach_status: u16,

    /// Status returned when no route matches.
    #[serde(default = "default_not_found_status")]
    pub not_found_status: u16,

    /// Render the failures of a breach as a JSON body.
    #[serde(default = "default_true")]
    pub expose_failures: bool,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            base_path: default_base_path(),
            breach_status: default_breach_status(),
            not_found_status: default_not_found_status(),
            expose_failures: true,
        }
    }
}

fn default_base_path() -> String {
    "/".to_string()
}

fn default_breach_status() -> u16 {
    400
}

fn default_not_found_status() -> u16 {
    404
}

/// Log format.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// JSON formatted logs (production).
    #[default]
    Json,
    /// Human-readable pretty format (development).
    Pretty,
}

/// Logging configuration section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Enable logging.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log output format.
    #[serde(default)]
    pub format: LogFormat,

    /// Include the event target (module path) in each line.
    #[serde(default = "default_true")]
    pub include_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: default_log_level(),
            format: LogFormat::default(),
            include_target: true,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}
