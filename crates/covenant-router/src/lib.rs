//! # Covenant Router
//!
//! Typed route specs and contract-checked request matching.
//!
//! Routes are declared by composing literal segments and path lenses with
//! `/`, pairing the result with a method and binding a handler that receives
//! the converted captures:
//!
//! - [`RouteSpec0`] .. [`RouteSpec4`] - specs by number of captures
//! - [`PathMethod`] - a spec paired with a method, see [`RouteSpec0::at`]
//! - [`ContractRoute`] - a bound route
//! - [`ContractRouter`] - routes mounted under a [`BasePath`]
//!
//! Matching is structural: method, segment count and literals. A matched
//! route then checks its path, query, header and body lenses and reports
//! every failure at once as a [`ContractBreach`](covenant_lens::ContractBreach).
//!
//! ## Example
//!
//! ```rust
//! use covenant_core::{HttpMessage, Method, Request, Response};
//! use covenant_lens::{Path, Query};
//! use covenant_router::{BasePath, ContractRouter, RouteSpec0};
//!
//! let page = Query::spec().int().defaulted("page", 1);
//! let id = Path::spec().int().of("id");
//!
//! let route = (RouteSpec0::new("users") / id / "posts")
//!     .query(page.clone())
//!     .at(Method::GET)
//!     .bind(move |id: i32, request: &Request| {
//!         let page = page.extract(request).unwrap_or(1);
//!         Response::ok().with_body(format!("user {id}, page {page}"))
//!     });
//!
//! let router = ContractRouter::new(BasePath::root() / "api").with_route(route);
//! let request = Request::get("/api/users/42/posts?page=3");
//!
//! let handler = router.match_request(&request).unwrap();
//! assert_eq!(handler.invoke(&request).unwrap().body_string(), "user 42, page 3");
//!
//! let breach = handler.invoke(&Request::get("/api/users/42/posts?page=x")).unwrap_err();
//! assert_eq!(breach.failures().len(), 1);
//! ```

#![doc(html_root_url = "https://docs.rs/covenant-router/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod captures;
mod error;
mod route;
mod router;
mod segment;
mod spec;

pub use captures::Captures;
pub use error::RouteError;
pub use route::{ContractRoute, MatchedHandler, RouteMeta};
pub use router::{routes, BasePath, ContractRouter};
pub use segment::Segment;
pub use spec::{PathMethod, RouteSpec, RouteSpec0, RouteSpec1, RouteSpec2, RouteSpec3, RouteSpec4};

/// Maximum number of path captures a route can bind.
pub const MAX_CAPTURES: usize = 4;
