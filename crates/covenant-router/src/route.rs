//! Bound routes.
//!
//! A [`ContractRoute`] is what [`PathMethod::bind`](crate::PathMethod) produces:
//! a method, a tokenized template, the declared non-path lenses and the bound
//! handler. Matching is structural only; validation happens on
//! [`MatchedHandler::invoke`].

use std::fmt;
use std::sync::Arc;

use covenant_core::{Method, Request, Response, Uri, UriExt};
use covenant_lens::{ContractBreach, Failure, Validator};

use crate::segment::join_path;
use crate::{BasePath, Captures, ContractRouter, Segment};

/// Decodes captures, validates the request and calls the handler.
pub(crate) type Invoker =
    Arc<dyn Fn(&Captures, &Request) -> Result<Response, ContractBreach> + Send + Sync>;

/// A non-path lens declared on a route.
pub(crate) type RequestValidator = Arc<dyn Validator<Request>>;

/// Descriptive metadata attached to a route.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RouteMeta {
    /// One-line summary.
    pub summary: String,
    /// Longer description.
    pub description: Option<String>,
    /// Grouping tags.
    pub tags: Vec<String>,
}

impl RouteMeta {
    /// Creates metadata with a summary.
    #[must_use]
    pub fn new(summary: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            ..Self::default()
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Adds a tag.
    #[must_use]
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }
}

/// A route template bound to a method and a handler.
#[derive(Clone)]
pub struct ContractRoute {
    method: Method,
    segments: Vec<Segment>,
    validators: Vec<RequestValidator>,
    invoker: Invoker,
    meta: Option<RouteMeta>,
}

impl ContractRoute {
    pub(crate) fn new(
        method: Method,
        segments: Vec<Segment>,
        validators: Vec<RequestValidator>,
        invoker: Invoker,
    ) -> Self {
        Self {
            method,
            segments,
            validators,
            invoker,
            meta: None,
        }
    }

    /// Returns the route method.
    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Returns the template segments.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Returns the declared non-path lenses, in declaration order.
    #[must_use]
    pub fn validators(&self) -> &[Arc<dyn Validator<Request>>] {
        &self.validators
    }

    /// Returns the template as a path, captures rendered as `{name}`.
    #[must_use]
    pub fn template(&self) -> String {
        join_path("", &self.segments)
    }

    /// Attaches descriptive metadata.
    #[must_use]
    pub fn with_meta(mut self, meta: RouteMeta) -> Self {
        self.meta = Some(meta);
        self
    }

    /// Returns the attached metadata.
    #[must_use]
    pub fn meta(&self) -> Option<&RouteMeta> {
        self.meta.as_ref()
    }

    /// Builds a request for this route: the base URI's path followed by the
    /// template. Fill the captures with `path_lens.of(value)`.
    #[must_use]
    pub fn new_request(&self, base: &Uri) -> Request {
        let path = join_path(base.path(), &self.segments);
        Request::new(self.method.clone(), base.with_path(&path))
    }

    /// Mounts this route alone under `base`.
    #[must_use]
    pub fn to_router(self, base: BasePath) -> ContractRouter {
        ContractRouter::new(base).with_route(self)
    }

    /// Matches decoded request segments against `base` followed by the
    /// template. The method is not checked here.
    #[must_use]
    pub fn match_segments<S: AsRef<str>>(&self, base: &[String], request: &[S]) -> Option<Captures> {
        if request.len() != base.len() + self.segments.len() {
            return None;
        }

        let (prefix, rest) = request.split_at(base.len());
        if !base.iter().zip(prefix).all(|(b, r)| b == r.as_ref()) {
            return None;
        }

        let mut captures = Captures::new();
        for (segment, value) in self.segments.iter().zip(rest) {
            let value = value.as_ref();
            match segment {
                Segment::Literal(literal) if literal != value => return None,
                Segment::Literal(_) => {}
                Segment::Capture(name) => captures.push(name.as_str(), value),
            }
        }

        Some(captures)
    }

    /// Decodes `captures`, validates `request` and calls the handler.
    ///
    /// # Errors
    ///
    /// Returns every failure from the path lenses followed by those of the
    /// declared lenses.
    pub fn invoke(&self, captures: &Captures, request: &Request) -> Result<Response, ContractBreach> {
        (self.invoker)(captures, request)
    }
}

impl fmt::Debug for ContractRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContractRoute")
            .field("method", &self.method)
            .field("template", &self.template())
            .field("validators", &self.validators.len())
            .field("meta", &self.meta)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for ContractRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.template())
    }
}

/// A route that structurally matched a request, captures not yet decoded.
#[derive(Debug, Clone)]
pub struct MatchedHandler<'a> {
    route: &'a ContractRoute,
    captures: Captures,
}

impl<'a> MatchedHandler<'a> {
    pub(crate) fn new(route: &'a ContractRoute, captures: Captures) -> Self {
        Self { route, captures }
    }

    /// Returns the matched route.
    #[must_use]
    pub fn route(&self) -> &'a ContractRoute {
        self.route
    }

    /// Returns the captured segments.
    #[must_use]
    pub fn captures(&self) -> &Captures {
        &self.captures
    }

    /// Validates `request` against the route and calls its handler.
    ///
    /// # Errors
    ///
    /// Returns a breach aggregating every failure found.
    pub fn invoke(&self, request: &Request) -> Result<Response, ContractBreach> {
        self.route.invoke(&self.captures, request)
    }
}

/// Converts one capture through its lens, recording a failure.
pub(crate) fn decode<T>(
    lens: &covenant_lens::PathLens<T>,
    captures: &Captures,
    index: usize,
    failures: &mut Vec<Failure>,
) -> Option<T> {
    let Some(segment) = captures.get_index(index) else {
        failures.push(lens.invalid());
        return None;
    };
    match lens.extract(segment) {
        Ok(value) => Some(value),
        Err(breach) => {
            failures.extend(breach.into_failures());
            None
        }
    }
}

/// Runs every declared lens against the request, recording failures.
pub(crate) fn validate(validators: &[RequestValidator], request: &Request, failures: &mut Vec<Failure>) {
    for validator in validators {
        if let Err(breach) = validator.validate(request) {
            tracing::trace!(lens = %validator.meta(), "lens rejected request");
            failures.extend(breach.into_failures());
        }
    }
}
