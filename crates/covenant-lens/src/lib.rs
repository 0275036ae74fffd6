//! # Covenant Lens
//!
//! Typed, named, cardinality-aware views into HTTP messages.
//!
//! A *spec* ([`LensSpec`], [`BiDiLensSpec`], [`PathSpec`], [`BodySpec`])
//! describes where values live and how to convert them. Binding a name
//! (`required`, `optional`, `defaulted`, or `multi()` for every value)
//! yields a *lens* ([`Lens`], [`BiDiLens`], [`PathLens`]) that extracts a
//! typed value or reports a [`ContractBreach`] made of [`Failure`]s:
//!
//! - `Missing` when a required value is absent
//! - `Invalid` when a present value does not convert
//!
//! Bidirectional lenses also write values, which is how typed requests and
//! responses are built with [`With::with`].
//!
//! ## Example
//!
//! ```rust
//! use covenant_core::Request;
//! use covenant_lens::{Failure, Header, Query, With};
//!
//! let page = Query::spec().int().defaulted("page", 1);
//! let token = Header::required::<Request>("X-Token");
//!
//! let request = Request::get("/items?page=3").with([token.of("secret".into())]);
//! assert_eq!(page.extract(&request).unwrap(), 3);
//! assert_eq!(token.extract(&request).unwrap(), "secret");
//!
//! let breach = token.extract(&Request::get("/")).unwrap_err();
//! assert_eq!(breach.failures(), &[Failure::Missing(token.meta().clone())]);
//! ```

#![doc(html_root_url = "https://docs.rs/covenant-lens/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod body;
mod convert;
mod cookie;
mod error;
mod form;
mod header;
mod lens;
mod meta;
mod path;
mod query;
pub mod spec;

pub use body::{Body, BodySpec, FormFields};
pub use cookie::Cookies;
pub use error::{BoxError, ContractBreach, Failure};
pub use form::{FormField, FormValidator, WebForm};
pub use header::Header;
pub use lens::{BiDiLens, Injection, Lens, Validator, With};
pub use meta::{Location, Meta};
pub use path::{Path, PathLens, PathSpec};
pub use query::Query;
pub use spec::{BiDiLensSpec, BiDiMultiLensSpec, LensSpec, MultiLensSpec};
