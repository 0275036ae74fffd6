//! Route specs and `/` composition.
//!
//! A route spec is built left to right with `/`. Literals keep the arity,
//! each [`PathLens`] moves to the next `RouteSpecN`, so the handler bound with
//! [`PathMethod::bind`] receives exactly the declared captures, in order,
//! already converted:
//!
//! ```rust
//! use covenant_core::{HttpMessage, Method, Request, Response};
//! use covenant_lens::Path;
//! use covenant_router::{RouteSpec0, RouteSpec1};
//!
//! let id = Path::spec().int().of("id");
//! let name = Path::of("name");
//!
//! let route = (RouteSpec1::from(id) / "greet" / name)
//!     .at(Method::GET)
//!     .bind(|id: i32, name: String, _: &Request| {
//!         Response::ok().with_body(format!("{id}:{name}"))
//!     });
//! assert_eq!(route.template(), "/{id}/greet/{name}");
//!
//! let health = RouteSpec0::new("health").at(Method::GET).bind(|_: &Request| Response::ok());
//! assert_eq!(health.template(), "/health");
//! ```
//!
//! A route binds at most four captures; composing a fifth yields
//! [`RouteError::UnsupportedComposition`].

use std::convert::Infallible;
use std::fmt;
use std::ops::Div;
use std::sync::Arc;

use covenant_core::{Method, Request, Response, Uri, UriExt};
use covenant_lens::{ContractBreach, PathLens, Validator};

use crate::route::{decode, validate, ContractRoute, Invoker, RequestValidator};
use crate::segment::{join_path, literals};
use crate::{Captures, RouteError, Segment};

/// Behaviour shared by route specs of every arity.
pub trait RouteSpec {
    /// Returns the template segments.
    fn segments(&self) -> &[Segment];

    /// Returns the declared non-path lenses.
    fn validators(&self) -> &[Arc<dyn Validator<Request>>];

    /// Returns the template as a path, captures rendered as `{name}`.
    fn template(&self) -> String {
        join_path("", self.segments())
    }
}

// Declaring lenses and choosing the method work the same at every arity.
macro_rules! builder_methods {
    () => {
        /// Declares a query lens, checked when the route is invoked.
        #[must_use]
        pub fn query<V: Validator<Request> + 'static>(self, lens: V) -> Self {
            self.declare(lens)
        }

        /// Declares a header lens, checked when the route is invoked.
        #[must_use]
        pub fn header<V: Validator<Request> + 'static>(self, lens: V) -> Self {
            self.declare(lens)
        }

        /// Declares a body lens, checked when the route is invoked.
        #[must_use]
        pub fn body<V: Validator<Request> + 'static>(self, lens: V) -> Self {
            self.declare(lens)
        }

        /// Pairs the spec with a method.
        #[must_use]
        pub fn at(self, method: Method) -> PathMethod<Self> {
            PathMethod { spec: self, method }
        }

        fn declare<V: Validator<Request> + 'static>(mut self, lens: V) -> Self {
            self.validators.push(Arc::new(lens));
            self
        }
    };
}

/// A route spec without captures.
#[derive(Clone, Default)]
pub struct RouteSpec0 {
    segments: Vec<Segment>,
    validators: Vec<RequestValidator>,
}

impl RouteSpec0 {
    /// Starts a spec from literal segments, e.g. `"api/v1"`.
    #[must_use]
    pub fn new(literal: &str) -> Self {
        Self {
            segments: literals(literal).collect(),
            validators: Vec::new(),
        }
    }

    builder_methods!();
}

impl RouteSpec for RouteSpec0 {
    fn segments(&self) -> &[Segment] {
        &self.segments
    }

    fn validators(&self) -> &[Arc<dyn Validator<Request>>] {
        &self.validators
    }
}

impl fmt::Debug for RouteSpec0 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteSpec0")
            .field("template", &self.template())
            .finish_non_exhaustive()
    }
}

impl Div<&str> for RouteSpec0 {
    type Output = Self;

    fn div(mut self, literal: &str) -> Self {
        self.segments.extend(literals(literal));
        self
    }
}

impl<A> Div<PathLens<A>> for RouteSpec0 {
    type Output = RouteSpec1<A>;

    fn div(mut self, lens: PathLens<A>) -> RouteSpec1<A> {
        self.segments.push(Segment::Capture(lens.name().to_string()));
        RouteSpec1 {
            segments: self.segments,
            validators: self.validators,
            a: lens,
        }
    }
}

impl PathMethod<RouteSpec0> {
    /// Binds a handler receiving the request.
    #[must_use]
    pub fn bind<F>(self, handler: F) -> ContractRoute
    where
        F: Fn(&Request) -> Response + Send + Sync + 'static,
    {
        let RouteSpec0 {
            segments,
            validators,
        } = self.spec;
        let declared = validators.clone();

        let invoker: Invoker = Arc::new(move |_: &Captures, request: &Request| {
            let mut failures = Vec::new();
            validate(&declared, request, &mut failures);
            if failures.is_empty() {
                Ok(handler(request))
            } else {
                Err(ContractBreach::new(failures))
            }
        });

        ContractRoute::new(self.method, segments, validators, invoker)
    }
}

macro_rules! route_spec {
    ($(#[$doc:meta])* $name:ident<$($T:ident: $field:ident @ $idx:tt),+>) => {
        $(#[$doc])*
        pub struct $name<$($T),+> {
            segments: Vec<Segment>,
            validators: Vec<RequestValidator>,
            $($field: PathLens<$T>,)+
        }

        impl<$($T),+> $name<$($T),+> {
            builder_methods!();
        }

        impl<$($T),+> RouteSpec for $name<$($T),+> {
            fn segments(&self) -> &[Segment] {
                &self.segments
            }

            fn validators(&self) -> &[Arc<dyn Validator<Request>>] {
                &self.validators
            }
        }

        impl<$($T),+> Clone for $name<$($T),+> {
            fn clone(&self) -> Self {
                Self {
                    segments: self.segments.clone(),
                    validators: self.validators.clone(),
                    $($field: self.$field.clone(),)+
                }
            }
        }

        impl<$($T),+> fmt::Debug for $name<$($T),+> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_struct(stringify!($name))
                    .field("template", &self.template())
                    .finish_non_exhaustive()
            }
        }

        impl<$($T),+> Div<&str> for $name<$($T),+> {
            type Output = Self;

            fn div(mut self, literal: &str) -> Self {
                self.segments.extend(literals(literal));
                self
            }
        }

        impl<$($T: 'static),+> PathMethod<$name<$($T),+>> {
            /// Binds a handler receiving the converted captures, in template
            /// order, followed by the request.
            #[must_use]
            pub fn bind<F>(self, handler: F) -> ContractRoute
            where
                F: Fn($($T,)+ &Request) -> Response + Send + Sync + 'static,
            {
                let $name { segments, validators, $($field,)+ } = self.spec;
                let declared = validators.clone();

                let invoker: Invoker = Arc::new(move |captures: &Captures, request: &Request| {
                    let mut failures = Vec::new();
                    $(let $field = decode(&$field, captures, $idx, &mut failures);)+
                    validate(&declared, request, &mut failures);
                    match ($($field,)+) {
                        ($(Some($field),)+) if failures.is_empty() => Ok(handler($($field,)+ request)),
                        _ => Err(ContractBreach::new(failures)),
                    }
                });

                ContractRoute::new(self.method, segments, validators, invoker)
            }
        }
    };
}

// Appending a capture moves to the next arity.
macro_rules! next_capture {
    ($name:ident<$($T:ident: $field:ident),+> => $next:ident<$N:ident: $nfield:ident>) => {
        impl<$($T,)+ $N> Div<PathLens<$N>> for $name<$($T),+> {
            type Output = $next<$($T,)+ $N>;

            fn div(mut self, lens: PathLens<$N>) -> Self::Output {
                self.segments.push(Segment::Capture(lens.name().to_string()));
                $next {
                    segments: self.segments,
                    validators: self.validators,
                    $($field: self.$field,)+
                    $nfield: lens,
                }
            }
        }
    };
}

route_spec! {
    /// A route spec with one capture.
    RouteSpec1<A: a @ 0>
}

route_spec! {
    /// A route spec with two captures.
    RouteSpec2<A: a @ 0, B: b @ 1>
}

route_spec! {
    /// A route spec with three captures.
    RouteSpec3<A: a @ 0, B: b @ 1, C: c @ 2>
}

route_spec! {
    /// A route spec with four captures, the most a route can bind.
    RouteSpec4<A: a @ 0, B: b @ 1, C: c @ 2, D: d @ 3>
}

next_capture!(RouteSpec1<A: a> => RouteSpec2<B: b>);
next_capture!(RouteSpec2<A: a, B: b> => RouteSpec3<C: c>);
next_capture!(RouteSpec3<A: a, B: b, C: c> => RouteSpec4<D: d>);

impl<A, B, C, D, E> Div<PathLens<E>> for RouteSpec4<A, B, C, D> {
    type Output = Result<Infallible, RouteError>;

    fn div(self, lens: PathLens<E>) -> Self::Output {
        tracing::debug!(
            template = %self.template(),
            capture = lens.name(),
            "rejected fifth path capture"
        );
        Err(RouteError::UnsupportedComposition)
    }
}

impl<A> From<PathLens<A>> for RouteSpec1<A> {
    fn from(lens: PathLens<A>) -> Self {
        RouteSpec0::default() / lens
    }
}

/// A route spec paired with a method, ready to [`bind`](PathMethod::bind).
#[derive(Debug, Clone)]
pub struct PathMethod<S> {
    spec: S,
    method: Method,
}

impl<S: RouteSpec> PathMethod<S> {
    /// Returns the method.
    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Returns the route spec.
    #[must_use]
    pub fn spec(&self) -> &S {
        &self.spec
    }

    /// Builds a request for this route: the base URI's path followed by the
    /// template. Fill the captures with `path_lens.of(value)`.
    #[must_use]
    pub fn new_request(&self, base: &Uri) -> Request {
        let path = join_path(base.path(), self.spec.segments());
        Request::new(self.method.clone(), base.with_path(&path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use covenant_core::HttpMessage;
    use covenant_lens::{Header, Path, Query, With};

    #[test]
    fn test_literals_keep_arity() {
        let spec = RouteSpec0::new("/api/v1") / "users" / "all/of/them";
        assert_eq!(spec.template(), "/api/v1/users/all/of/them");
        assert!(spec.segments().iter().all(|s| !s.is_capture()));
    }

    #[test]
    fn test_captures_increase_arity() {
        let spec = RouteSpec0::new("a") / Path::of("b") / "c" / Path::of("d");
        let _: &RouteSpec2<String, String> = &spec;
        assert_eq!(spec.template(), "/a/{b}/c/{d}");
    }

    #[test]
    fn test_from_path_lens() {
        let spec = RouteSpec1::from(Path::of("first")) / Path::spec().int().of("second");
        assert_eq!(spec.template(), "/{first}/{second}");
    }

    #[test]
    fn test_fifth_capture_rejected() {
        let spec = RouteSpec1::from(Path::of("a")) / Path::of("b") / Path::of("c") / Path::of("d");
        let result = spec / Path::of("e");
        assert_eq!(result.unwrap_err(), RouteError::UnsupportedComposition);
    }

    #[test]
    fn test_literals_after_four_captures() {
        let spec = RouteSpec1::from(Path::of("a")) / Path::of("b") / Path::of("c") / Path::of("d") / "x";
        assert_eq!(spec.template(), "/{a}/{b}/{c}/{d}/x");
    }

    #[test]
    fn test_declared_lenses_kept_in_order() {
        let spec = RouteSpec0::new("search")
            .query(Query::required("q"))
            .header(Header::required::<Request>("X-Token"));
        let names: Vec<_> = spec.validators().iter().map(|v| v.meta().name().to_string()).collect();
        assert_eq!(names, vec!["q", "X-Token"]);
    }

    #[test]
    fn test_bind_four_captures() {
        let route = (RouteSpec1::from(Path::of("a"))
            / Path::spec().int().of("b")
            / Path::spec().boolean().of("c")
            / Path::of("d"))
        .at(Method::PUT)
        .bind(|a: String, b: i32, c: bool, d: String, _: &Request| {
            Response::ok().with_body(format!("{a}{b}{c}{d}"))
        });

        let captures = route.match_segments::<&str>(&[], &["x", "1", "true", "y"]).unwrap();
        let response = route.invoke(&captures, &Request::of(Method::PUT, "/")).unwrap();
        assert_eq!(response.body_string(), "x1truey");
    }

    #[test]
    fn test_new_request_fills_captures() {
        let id = Path::spec().int().of("id");
        let name = Path::of("name");
        let method = (RouteSpec1::from(id.clone()) / "greet" / name.clone()).at(Method::GET);

        let request = method
            .new_request(&Uri::from_static("http://rita.com/base"))
            .with([id.of(7), name.of("bob smith".to_string())]);

        assert_eq!(request.uri().to_string(), "http://rita.com/base/7/greet/bob%20smith");
        assert_eq!(method.method(), &Method::GET);
    }
}
