//! # Covenant
//!
//! Typed, bidirectional lenses over HTTP messages and contract-checked
//! routes built from them.
//!
//! Declare where a value lives and how it converts once, then use the same
//! lens to read it from incoming requests, to validate requests before a
//! handler runs, and to build well-formed requests:
//!
//! ```rust
//! use covenant::prelude::*;
//!
//! let id = Path::spec().int().of("id");
//! let verbose = Query::spec().boolean().defaulted("verbose", false);
//!
//! let route = (RouteSpec0::new("users") / id.clone())
//!     .query(verbose.clone())
//!     .at(Method::GET)
//!     .bind(move |id: i32, request: &Request| {
//!         let verbose = verbose.extract(request).unwrap_or(false);
//!         Response::ok().with_body(format!("user {id} verbose={verbose}"))
//!     });
//!
//! let request = route
//!     .new_request(&Uri::from_static("http://localhost"))
//!     .with([id.of(7)])
//!     .query("verbose", "true");
//!
//! let app = routes([route]);
//! assert_eq!(app.handle(&request).body_string(), "user 7 verbose=true");
//! ```
//!
//! ## Crates
//!
//! - [`core`] - message model, handlers and filters
//! - [`lens`] - lens specs, lenses, failures and web forms
//! - [`router`] - route specs, matching and dispatch
//! - [`config`] - layered configuration
//! - [`telemetry`] - logging setup and request logging

#![doc(html_root_url = "https://docs.rs/covenant/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export message model
pub use covenant_core as core;

// Re-export lenses
pub use covenant_lens as lens;

// Re-export routing
pub use covenant_router as router;

// Re-export configuration
pub use covenant_config as config;

// Re-export logging
pub use covenant_telemetry as telemetry;

/// Prelude module for convenient imports.
///
/// # Example
///
/// ```rust
/// use covenant::prelude::*;
///
/// let name = Query::required("name");
/// assert_eq!(name.extract(&Request::get("/?name=bob")).unwrap(), "bob");
/// ```
pub mod prelude {
    pub use covenant_core::{
        ContentType, Cookie, FilterExt, HttpHandler, HttpMessage, Method, Request, Response,
        StatusCode, Uri, UriExt,
    };

    pub use covenant_lens::{
        BiDiLens, Body, ContractBreach, Cookies, Failure, FormField, FormValidator, Header, Lens,
        Path, Query, Validator, WebForm, With,
    };

    pub use covenant_router::{
        routes, BasePath, ContractRoute, ContractRouter, RouteError, RouteMeta, RouteSpec,
        RouteSpec0, RouteSpec1, RouteSpec2, RouteSpec3, RouteSpec4,
    };

    pub use covenant_config::{ConfigLoader, CovenantConfig};

    pub use covenant_telemetry::{init_logging, LogConfig, RequestLogging};
}
