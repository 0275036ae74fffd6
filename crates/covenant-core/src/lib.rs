//! # Covenant Core
//!
//! Message model and handler traits shared by the Covenant crates.
//!
//! The lens and routing layers only need a small view of an HTTP message:
//! named multi-valued headers, query parameters and cookies, a raw body, and
//! the method and path of a request. This crate provides exactly that as
//! immutable values:
//!
//! - [`Request`] / [`Response`] with the shared [`HttpMessage`] trait
//! - [`Cookie`], [`ContentType`], and [`uri`] helpers over [`http::Uri`]
//! - [`HttpHandler`] and [`filter`] for composing handlers
//!
//! ## Example
//!
//! ```rust
//! use covenant_core::{HttpMessage, Request, Response, HttpHandler};
//!
//! let handler = |request: &Request| {
//!     let name = request.queries("name").into_iter().next().unwrap_or_default();
//!     Response::ok().with_body(format!("hello {name}"))
//! };
//!
//! let response = handler.handle(&Request::get("/greet?name=bob"));
//! assert_eq!(response.body_string(), "hello bob");
//! ```

#![doc(html_root_url = "https://docs.rs/covenant-core/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod content_type;
mod cookie;
pub mod filter;
mod handler;
mod message;
pub mod uri;

pub use content_type::ContentType;
pub use cookie::Cookie;
pub use filter::{Filter, FilterExt};
pub use handler::{BoxedHandler, HttpHandler};
pub use message::{HttpMessage, Request, Response, CONTENT_TYPE, COOKIE};
pub use uri::UriExt;

// Re-export the HTTP vocabulary used in signatures
pub use http::{HeaderMap, Method, StatusCode, Uri};
