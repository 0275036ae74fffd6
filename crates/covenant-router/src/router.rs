//! Route collections.
//!
//! A [`ContractRouter`] holds routes mounted under a [`BasePath`]. Routes are
//! tried in insertion order and the first structural match wins; validation
//! of the matched route's lenses happens afterwards, on invoke.

use std::fmt;
use std::ops::Div;

use covenant_config::RouterConfig;
use covenant_core::{ContentType, HttpHandler, HttpMessage, Request, Response, StatusCode, CONTENT_TYPE};
use covenant_lens::ContractBreach;

use crate::segment::{request_segments, split_path};
use crate::{ContractRoute, MatchedHandler, RouteError};

/// The literal prefix a router mounts its routes under.
///
/// # Example
///
/// ```rust
/// use covenant_router::BasePath;
///
/// let base = BasePath::root() / "api" / "v1";
/// assert_eq!(base.to_string(), "/api/v1");
/// assert_eq!(BasePath::parse("/api/v1"), base);
/// assert_eq!(BasePath::root().to_string(), "/");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct BasePath {
    segments: Vec<String>,
}

impl BasePath {
    /// The root path, which adds no segments.
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    /// Parses a path such as `"/api/v1"`.
    #[must_use]
    pub fn parse(path: &str) -> Self {
        Self {
            segments: split_path(path).into_iter().map(str::to_string).collect(),
        }
    }

    /// Returns the segments.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

impl Div<&str> for BasePath {
    type Output = Self;

    fn div(mut self, segment: &str) -> Self {
        self.segments
            .extend(split_path(segment).into_iter().map(str::to_string));
        self
    }
}

impl fmt::Display for BasePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("/");
        }
        for segment in &self.segments {
            write!(f, "/{segment}")?;
        }
        Ok(())
    }
}

/// Routes mounted under a base path.
///
/// # Example
///
/// ```rust
/// use covenant_core::{HttpHandler, HttpMessage, Method, Request, Response, StatusCode};
/// use covenant_lens::Path;
/// use covenant_router::{BasePath, ContractRouter, RouteSpec1};
///
/// let router = ContractRouter::new(BasePath::root() / "somePrefix").with_route(
///     RouteSpec1::from(Path::of("value"))
///         .at(Method::GET)
///         .bind(|value: String, _: &Request| Response::ok().with_body(value)),
/// );
///
/// assert_eq!(router.handle(&Request::get("/somePrefix/hello")).body_string(), "hello");
/// assert_eq!(router.handle(&Request::get("/somePrefix")).status(), StatusCode::NOT_FOUND);
/// ```
#[derive(Debug, Clone)]
pub struct ContractRouter {
    base: BasePath,
    routes: Vec<ContractRoute>,
    breach_status: StatusCode,
    not_found_status: StatusCode,
    expose_failures: bool,
}

impl Default for ContractRouter {
    fn default() -> Self {
        Self::new(BasePath::root())
    }
}

impl ContractRouter {
    /// Creates an empty router answering breaches with `400` and misses with `404`.
    #[must_use]
    pub fn new(base: BasePath) -> Self {
        Self {
            base,
            routes: Vec::new(),
            breach_status: StatusCode::BAD_REQUEST,
            not_found_status: StatusCode::NOT_FOUND,
            expose_failures: true,
        }
    }

    /// Creates an empty router from configuration.
    ///
    /// # Errors
    ///
    /// Returns `RouteError::InvalidStatus` if a configured status is not a
    /// valid HTTP status code.
    pub fn from_config(config: &RouterConfig) -> Result<Self, RouteError> {
        let status = |code: u16| {
            StatusCode::from_u16(code).map_err(|_| RouteError::InvalidStatus(code))
        };

        Ok(Self {
            base: BasePath::parse(&config.base_path),
            routes: Vec::new(),
            breach_status: status(config.breach_status)?,
            not_found_status: status(config.not_found_status)?,
            expose_failures: config.expose_failures,
        })
    }

    /// Adds a route.
    #[must_use]
    pub fn with_route(mut self, route: ContractRoute) -> Self {
        self.routes.push(route);
        self
    }

    /// Adds several routes, keeping their order.
    #[must_use]
    pub fn with_routes<I: IntoIterator<Item = ContractRoute>>(mut self, routes: I) -> Self {
        self.routes.extend(routes);
        self
    }

    /// Returns the base path.
    #[must_use]
    pub fn base(&self) -> &BasePath {
        &self.base
    }

    /// Returns the routes in match order.
    #[must_use]
    pub fn routes(&self) -> &[ContractRoute] {
        &self.routes
    }

    /// Returns the number of routes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Returns true if there are no routes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Finds the first route whose method and path shape match the request.
    ///
    /// Only the structure is checked; declared lenses are validated by
    /// [`MatchedHandler::invoke`].
    #[must_use]
    pub fn match_request(&self, request: &Request) -> Option<MatchedHandler<'_>> {
        let segments = request_segments(request.path());
        let base = self.base.segments();

        let matched = self.routes.iter().find_map(|route| {
            if route.method() != request.method() {
                return None;
            }
            route
                .match_segments(base, &segments)
                .map(|captures| MatchedHandler::new(route, captures))
        });

        match &matched {
            Some(handler) => tracing::debug!(
                method = %request.method(),
                path = request.path(),
                route = %handler.route(),
                "route matched"
            ),
            None => tracing::debug!(
                method = %request.method(),
                path = request.path(),
                "no route matched"
            ),
        }

        matched
    }

    fn breach_response(&self, breach: &ContractBreach) -> Response {
        let response = Response::new(self.breach_status);
        if !self.expose_failures {
            return response;
        }
        match serde_json::to_string(breach) {
            Ok(body) => response
                .header(CONTENT_TYPE, ContentType::APPLICATION_JSON.value())
                .with_body(body),
            Err(e) => {
                tracing::warn!(error = %e, "failed to render contract breach");
                response
            }
        }
    }
}

impl HttpHandler for ContractRouter {
    fn handle(&self, request: &Request) -> Response {
        let Some(handler) = self.match_request(request) else {
            return Response::new(self.not_found_status);
        };

        match handler.invoke(request) {
            Ok(response) => response,
            Err(breach) => {
                tracing::warn!(
                    method = %request.method(),
                    path = request.path(),
                    failures = breach.failures().len(),
                    "contract breached"
                );
                self.breach_response(&breach)
            }
        }
    }
}

/// Builds a root-mounted router from routes, tried in order.
///
/// # Example
///
/// ```rust
/// use covenant_core::{HttpHandler, HttpMessage, Method, Request, Response};
/// use covenant_router::{routes, RouteSpec0};
///
/// let app = routes([
///     RouteSpec0::new("bob").at(Method::GET).bind(|_: &Request| Response::ok().with_body("bob")),
///     RouteSpec0::new("rita").at(Method::GET).bind(|_: &Request| Response::ok().with_body("rita")),
/// ]);
///
/// assert_eq!(app.handle(&Request::get("/rita")).body_string(), "rita");
/// ```
#[must_use]
pub fn routes<I: IntoIterator<Item = ContractRoute>>(routes: I) -> ContractRouter {
    ContractRouter::default().with_routes(routes)
}
