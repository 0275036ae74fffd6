//! Request logging.
//!
//! [`RequestLogging`] is a [`Filter`] that emits one event per request with
//! the method, path, status and duration, at `info` for successes and `warn`
//! for client or server errors.

use std::time::Instant;

use covenant_core::{Filter, HttpHandler, Request, Response};

/// Standard log field names.
pub mod fields {
    /// HTTP method field name.
    pub const HTTP_METHOD: &str = "http.method";

    /// HTTP path field name.
    pub const HTTP_PATH: &str = "http.path";

    /// HTTP status code field name.
    pub const HTTP_STATUS: &str = "http.status_code";

    /// Duration field name (in milliseconds).
    pub const DURATION_MS: &str = "duration_ms";
}

/// Logs every request passing through it.
///
/// # Example
///
/// ```rust
/// use covenant_core::{FilterExt, HttpHandler, Request, Response};
/// use covenant_telemetry::RequestLogging;
///
/// let app = RequestLogging::new().then(|_: &Request| Response::ok());
/// assert!(app.handle(&Request::get("/")).status().is_success());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestLogging;

impl RequestLogging {
    /// Creates the filter.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Filter for RequestLogging {
    fn name(&self) -> &'static str {
        "request-logging"
    }

    fn process(&self, request: &Request, next: &dyn HttpHandler) -> Response {
        let start = Instant::now();
        let response = next.handle(request);
        let duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
        let status = response.status().as_u16();

        if response.status().is_client_error() || response.status().is_server_error() {
            tracing::warn!(
                http.method = %request.method(),
                http.path = request.path(),
                http.status_code = status,
                duration_ms,
                "request failed"
            );
        } else {
            tracing::info!(
                http.method = %request.method(),
                http.path = request.path(),
                http.status_code = status,
                duration_ms,
                "request completed"
            );
        }

        response
    }
}
