//! Path segment lenses.
//!
//! A path lens works on a single, already percent-decoded segment captured by
//! the router. Unlike the other lenses it is always required: a route only
//! matches when every capture is present, so the only possible failure is an
//! `Invalid` conversion.
//!
//! When building requests, a path lens fills its `{name}` placeholder in the
//! request path with the percent-encoded value.

use std::convert::Infallible;
use std::fmt;
use std::sync::Arc;

use covenant_core::{Request, UriExt};

use crate::convert::string_conversions;
use crate::{BiDiLens, BoxError, ContractBreach, Failure, Injection, Location, Meta};

type Decode<T> = Arc<dyn Fn(&str) -> Result<T, BoxError> + Send + Sync>;
type Encode<T> = Arc<dyn Fn(T) -> String + Send + Sync>;

/// Lenses over captured path segments.
///
/// # Example
///
/// ```rust
/// use covenant_core::{Request, UriExt};
/// use covenant_lens::{Path, With};
///
/// let id = Path::spec().int().of("id");
/// assert_eq!(id.extract("123").unwrap(), 123);
///
/// let name = Path::of("name");
/// let request = Request::get("/users/{name}").with([name.of("bob smith".into())]);
/// assert_eq!(request.path(), "/users/bob%20smith");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Path;

impl Path {
    /// Returns the string spec for path segments.
    #[must_use]
    pub fn spec() -> PathSpec<String> {
        PathSpec::new(
            |segment: &str| Ok::<_, Infallible>(segment.to_string()),
            |value: String| value,
        )
    }

    /// A string segment.
    #[must_use]
    pub fn of(name: &str) -> PathLens<String> {
        Self::spec().of(name)
    }
}

/// A spec for path segments of type `T`.
pub struct PathSpec<T> {
    decode: Decode<T>,
    encode: Encode<T>,
}

impl<T: 'static> PathSpec<T> {
    /// Creates a spec from a segment parser and a renderer.
    pub fn new<D, E, R>(decode: D, encode: R) -> Self
    where
        D: Fn(&str) -> Result<T, E> + Send + Sync + 'static,
        E: Into<BoxError>,
        R: Fn(T) -> String + Send + Sync + 'static,
    {
        Self {
            decode: Arc::new(move |segment: &str| -> Result<T, BoxError> {
                decode(segment).map_err(Into::into)
            }),
            encode: Arc::new(encode),
        }
    }

    /// Converts values with `f` when reading and `g` when writing.
    #[must_use]
    pub fn map<U, F, G>(&self, f: F, g: G) -> PathSpec<U>
    where
        U: 'static,
        F: Fn(T) -> U + Send + Sync + 'static,
        G: Fn(U) -> T + Send + Sync + 'static,
    {
        self.try_map(move |value| Ok::<_, Infallible>(f(value)), g)
    }

    /// Like [`map`](Self::map) with a fallible reader.
    #[must_use]
    pub fn try_map<U, E, F, G>(&self, f: F, g: G) -> PathSpec<U>
    where
        U: 'static,
        E: Into<BoxError>,
        F: Fn(T) -> Result<U, E> + Send + Sync + 'static,
        G: Fn(U) -> T + Send + Sync + 'static,
    {
        let decode = Arc::clone(&self.decode);
        let encode = Arc::clone(&self.encode);
        PathSpec {
            decode: Arc::new(move |segment: &str| -> Result<U, BoxError> {
                f(decode(segment)?).map_err(Into::into)
            }),
            encode: Arc::new(move |value: U| encode(g(value))),
        }
    }

    /// Binds a name.
    #[must_use]
    pub fn of(&self, name: &str) -> PathLens<T> {
        PathLens {
            meta: Meta::new(Location::Path, name, true),
            decode: Arc::clone(&self.decode),
            encode: Arc::clone(&self.encode),
        }
    }

    /// Binds a name with a description.
    #[must_use]
    pub fn of_with_description(&self, name: &str, description: &str) -> PathLens<T> {
        let mut lens = self.of(name);
        lens.meta = lens.meta.with_description(description);
        lens
    }
}

impl PathSpec<String> {
    string_conversions!(PathSpec<>);
}

impl<T> Clone for PathSpec<T> {
    fn clone(&self) -> Self {
        Self {
            decode: Arc::clone(&self.decode),
            encode: Arc::clone(&self.encode),
        }
    }
}

impl<T> fmt::Debug for PathSpec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PathSpec").finish_non_exhaustive()
    }
}

/// A named path segment of type `T`.
pub struct PathLens<T> {
    meta: Meta,
    decode: Decode<T>,
    encode: Encode<T>,
}

impl<T> PathLens<T> {
    /// Returns the lens metadata.
    #[must_use]
    pub fn meta(&self) -> &Meta {
        &self.meta
    }

    /// Returns the segment name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.meta.name()
    }

    /// Returns the `{name}` placeholder used in route templates.
    #[must_use]
    pub fn placeholder(&self) -> String {
        format!("{{{}}}", self.meta.name())
    }

    /// Converts a decoded segment.
    ///
    /// # Errors
    ///
    /// Returns an `Invalid` breach if the segment does not convert.
    pub fn extract(&self, segment: &str) -> Result<T, ContractBreach> {
        (self.decode)(segment).map_err(|e| {
            tracing::debug!(lens = %self.meta, segment, error = %e, "path segment rejected");
            ContractBreach::invalid(self.meta.clone())
        })
    }

    /// Renders a value as an unencoded segment.
    #[must_use]
    pub fn render(&self, value: T) -> String {
        (self.encode)(value)
    }

    /// Returns the failure reported for an unconvertible segment.
    #[must_use]
    pub fn invalid(&self) -> Failure {
        Failure::Invalid(self.meta.clone())
    }

    /// Replaces the first remaining `{name}` segment of the request path
    /// with the percent-encoded value, so repeated names fill in order.
    #[must_use]
    pub fn inject(&self, value: T, request: Request) -> Request {
        let placeholder = self.placeholder();
        let rendered = self.render(value);
        let encoded = urlencoding::encode(&rendered);

        let mut filled = false;
        let path = request
            .path()
            .split('/')
            .map(|segment| {
                if !filled && segment == placeholder {
                    filled = true;
                    &*encoded
                } else {
                    segment
                }
            })
            .collect::<Vec<_>>()
            .join("/");

        if !filled {
            return request;
        }
        let uri = request.uri().with_path(&path);
        request.with_uri(uri)
    }
}

impl<T: Send + 'static> PathLens<T> {
    /// Captures a value for a later write into a request template.
    #[must_use]
    pub fn of(&self, value: T) -> Injection<Request> {
        let lens = self.clone();
        Box::new(move |request: Request| lens.inject(value, request))
    }

    /// Returns this lens as a lens over a single segment string.
    #[must_use]
    pub fn to_lens(&self) -> BiDiLens<String, T> {
        let decode = self.clone();
        let encode = Arc::clone(&self.encode);
        BiDiLens::new(
            self.meta.clone(),
            move |segment: &String| decode.extract(segment),
            move |value: T, _segment: String| encode(value),
        )
    }
}

impl<T> Clone for PathLens<T> {
    fn clone(&self) -> Self {
        Self {
            meta: self.meta.clone(),
            decode: Arc::clone(&self.decode),
            encode: Arc::clone(&self.encode),
        }
    }
}

impl<T> fmt::Debug for PathLens<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PathLens")
            .field("meta", &self.meta)
            .finish_non_exhaustive()
    }
}

impl<T> fmt::Display for PathLens<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.meta, f)
    }
}
