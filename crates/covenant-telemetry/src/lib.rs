//! Structured logging for Covenant.
//!
//! - [`logging`] - installs a `tracing-subscriber` registry (JSON or pretty)
//! - [`RequestLogging`] - a filter logging each request with its status and
//!   duration
//!
//! Configuration comes either from [`LogConfig`] presets or from the
//! `[logging]` section of a `covenant-config` file:
//!
//! ```rust,no_run
//! use covenant_config::ConfigLoader;
//! use covenant_telemetry::{init_logging, LogConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ConfigLoader::new().with_env_prefix("COVENANT").load()?;
//! init_logging(&LogConfig::from(&config.logging).with_service_name("orders"))?;
//! # Ok(())
//! # }
//! ```

#![doc(html_root_url = "https://docs.rs/covenant-telemetry/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
pub mod filter;
pub mod logging;

pub use error::{TelemetryError, TelemetryResult};
pub use filter::RequestLogging;
pub use logging::{init_logging, LogConfig};
