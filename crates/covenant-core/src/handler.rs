//! The handler abstraction.
//!
//! An [`HttpHandler`] turns a request into a response. Plain closures are
//! handlers, and so are routers and filtered handler chains.

use std::sync::Arc;

use crate::{Request, Response};

/// A synchronous request handler.
///
/// # Example
///
/// ```rust
/// use covenant_core::{HttpHandler, HttpMessage, Request, Response};
///
/// let handler = |request: &Request| Response::ok().with_body(request.path().to_string());
/// assert_eq!(handler.handle(&Request::get("/bob")).body_string(), "/bob");
/// ```
pub trait HttpHandler: Send + Sync {
    /// Handles a request.
    fn handle(&self, request: &Request) -> Response;
}

impl<F> HttpHandler for F
where
    F: Fn(&Request) -> Response + Send + Sync,
{
    fn handle(&self, request: &Request) -> Response {
        self(request)
    }
}

impl<H: HttpHandler + ?Sized> HttpHandler for Arc<H> {
    fn handle(&self, request: &Request) -> Response {
        (**self).handle(request)
    }
}

/// A shareable, type-erased handler.
pub type BoxedHandler = Arc<dyn HttpHandler>;
