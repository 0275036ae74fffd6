//! Typed configuration for Covenant.
//!
//! Configuration is layered: built-in defaults, then a TOML or JSON file,
//! then environment variables. Every section rejects unknown fields.
//!
//! - [`RouterConfig`] - base path and the statuses a router answers with
//! - [`LoggingConfig`] - level and output format for `covenant-telemetry`
//!
//! # Example
//!
//! ```no_run
//! use covenant_config::ConfigLoader;
//!
//! # fn main() -> Result<(), covenant_config::ConfigError> {
//! let config = ConfigLoader::new()
//!     .with_optional_file("covenant.toml")?
//!     .with_env_prefix("COVENANT")
//!     .load()?;
//!
//! println!("routes mounted at {}", config.router.base_path);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration File Format
//!
//! ```toml
//! [router]
//! base_path = "/api"
//! breach_status = 400
//! not_found_status = 404
//! expose_failures = true
//!
//! [logging]
//! level = "info"
//! format = "json"
//! ```
//!
//! # Environment Variable Overrides
//!
//! Values can be overridden with `PREFIX__SECTION__KEY` variables:
//!
//! - `COVENANT__ROUTER__BASE_PATH=/api`
//! - `COVENANT__LOGGING__FORMAT=pretty`

#![doc(html_root_url = "https://docs.rs/covenant-config/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod error;
mod loader;
mod schema;

pub use config::CovenantConfig;
pub use error::{ConfigError, ConfigResult};
pub use loader::ConfigLoader;
pub use schema::{LogFormat, LoggingConfig, RouterConfig};
