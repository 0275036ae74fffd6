//! Filters wrapping handlers.
//!
//! A [`Filter`] sees the request before the wrapped handler and the response
//! after it. Filters compose with [`FilterExt::then`], which yields a new
//! handler, so chains read outermost first:
//!
//! ```rust
//! use covenant_core::filter::{FilterExt, RequestFilters, ResponseFilters};
//! use covenant_core::{HttpHandler, Request, Response};
//!
//! let app = RequestFilters::tap(|request: &Request| {
//!     assert_eq!(request.path(), "/");
//! })
//! .then(ResponseFilters::tap(|_response: &Response| {}).then(|_: &Request| Response::ok()));
//!
//! assert_eq!(app.handle(&Request::get("/")).status(), http::StatusCode::OK);
//! ```

use std::time::{Duration, Instant};

use crate::{HttpHandler, Request, Response};

/// A request/response interceptor.
///
/// Implementations call `next.handle(request)` at most once; not calling it
/// short-circuits the chain with the filter's own response.
pub trait Filter: Send + Sync {
    /// Returns the filter name, used in logs.
    fn name(&self) -> &'static str;

    /// Processes a request, delegating to `next`.
    fn process(&self, request: &Request, next: &dyn HttpHandler) -> Response;
}

/// Composition helpers for filters.
pub trait FilterExt: Filter + Sized {
    /// Wraps a handler with this filter.
    fn then<H: HttpHandler>(self, handler: H) -> Filtered<Self, H> {
        Filtered {
            filter: self,
            next: handler,
        }
    }
}

impl<F: Filter> FilterExt for F {}

/// A handler wrapped by a filter.
#[derive(Debug, Clone)]
pub struct Filtered<F, H> {
    filter: F,
    next: H,
}

impl<F: Filter, H: HttpHandler> HttpHandler for Filtered<F, H> {
    fn handle(&self, request: &Request) -> Response {
        tracing::trace!(filter = self.filter.name(), path = request.path(), "entering filter");
        self.filter.process(request, &self.next)
    }
}

/// Filters that observe the incoming request.
#[derive(Debug, Clone, Copy)]
pub struct RequestFilters;

impl RequestFilters {
    /// Passes the request to `observe` before forwarding it unchanged.
    pub fn tap<F>(observe: F) -> RequestTap<F>
    where
        F: Fn(&Request) + Send + Sync,
    {
        RequestTap { observe }
    }
}

/// See [`RequestFilters::tap`].
#[derive(Debug, Clone)]
pub struct RequestTap<F> {
    observe: F,
}

impl<F> Filter for RequestTap<F>
where
    F: Fn(&Request) + Send + Sync,
{
    fn name(&self) -> &'static str {
        "request-tap"
    }

    fn process(&self, request: &Request, next: &dyn HttpHandler) -> Response {
        (self.observe)(request);
        next.handle(request)
    }
}

/// Filters that observe the outgoing response.
#[derive(Debug, Clone, Copy)]
pub struct ResponseFilters;

impl ResponseFilters {
    /// Passes the response to `observe` before returning it unchanged.
    pub fn tap<F>(observe: F) -> ResponseTap<F>
    where
        F: Fn(&Response) + Send + Sync,
    {
        ResponseTap { observe }
    }

    /// Measures the wrapped handler and reports the elapsed time.
    pub fn report_latency<F>(record: F) -> ReportLatency<F>
    where
        F: Fn(&Request, &Response, Duration) + Send + Sync,
    {
        ReportLatency { record }
    }
}

/// See [`ResponseFilters::tap`].
#[derive(Debug, Clone)]
pub struct ResponseTap<F> {
    observe: F,
}

impl<F> Filter for ResponseTap<F>
where
    F: Fn(&Response) + Send + Sync,
{
    fn name(&self) -> &'static str {
        "response-tap"
    }

    fn process(&self, request: &Request, next: &dyn HttpHandler) -> Response {
        let response = next.handle(request);
        (self.observe)(&response);
        response
    }
}

/// See [`ResponseFilters::report_latency`].
#[derive(Debug, Clone)]
pub struct ReportLatency<F> {
    record: F,
}

impl<F> Filter for ReportLatency<F>
where
    F: Fn(&Request, &Response, Duration) + Send + Sync,
{
    fn name(&self) -> &'static str {
        "report-latency"
    }

    fn process(&self, request: &Request, next: &dyn HttpHandler) -> Response {
        let start = Instant::now();
        let response = next.handle(request);
        (self.record)(request, &response, start.elapsed());
        response
    }
}
