//! Lens specifications.
//!
//! A spec knows how to pull the raw values for a name out of a message (and,
//! for [`BiDiLensSpec`], how to write them back) but has no name of its own.
//! Binding a name with a cardinality produces a lens:
//!
//! | binder       | absent value      | several values      |
//! |--------------|-------------------|---------------------|
//! | `required`   | `Missing`         | first value         |
//! | `optional`   | `None`            | first value         |
//! | `defaulted`  | the default       | first value         |
//! | `multi()...` | `Missing` / `None` / default | all values |
//!
//! A conversion failure on any present value is reported as `Invalid`.
//!
//! Specs are cheap to clone and to reuse: binding borrows the spec.

use std::convert::Infallible;
use std::fmt;
use std::sync::Arc;

use crate::{BiDiLens, BoxError, ContractBreach, Lens, Location, Meta};

type Get<M, T> = Arc<dyn Fn(&str, &M) -> Result<Vec<T>, BoxError> + Send + Sync>;
type Set<M, T> = Arc<dyn Fn(&str, Vec<T>, M) -> M + Send + Sync>;

fn read<M, T>(get: &Get<M, T>, meta: &Meta, target: &M) -> Result<Vec<T>, ContractBreach> {
    get(meta.name(), target).map_err(|e| {
        tracing::debug!(lens = %meta, error = %e, "lens value rejected");
        ContractBreach::invalid(meta.clone())
    })
}

fn read_first<M, T>(get: &Get<M, T>, meta: &Meta, target: &M) -> Result<Option<T>, ContractBreach> {
    read(get, meta, target).map(|values| values.into_iter().next())
}

fn read_all<M, T>(get: &Get<M, T>, meta: &Meta, target: &M) -> Result<Option<Vec<T>>, ContractBreach> {
    read(get, meta, target).map(|values| if values.is_empty() { None } else { Some(values) })
}

fn describe(meta: Meta, description: Option<&str>) -> Meta {
    match description {
        Some(description) => meta.with_description(description),
        None => meta,
    }
}

fn composed_get<M, T, U, E, F>(get: &Get<M, T>, f: F) -> Get<M, U>
where
    M: 'static,
    T: 'static,
    U: 'static,
    E: Into<BoxError>,
    F: Fn(T) -> Result<U, E> + Send + Sync + 'static,
{
    let get = Arc::clone(get);
    Arc::new(move |name: &str, target: &M| -> Result<Vec<U>, BoxError> {
        get(name, target)?
            .into_iter()
            .map(|value| f(value).map_err(Into::into))
            .collect()
    })
}

/// A read-only spec for values of type `T` within messages of type `M`.
///
/// # Example
///
/// ```rust
/// use covenant_core::{HttpMessage, Request};
/// use covenant_lens::{LensSpec, Location};
///
/// let accept = LensSpec::new(Location::Header, |name: &str, request: &Request| {
///     request.header_values(name).into_iter().map(str::to_string).collect::<Vec<String>>()
/// });
///
/// let lens = accept.map(|v: String| v.len()).required("Accept");
/// assert_eq!(lens.extract(&Request::get("/").header("Accept", "text/plain")).unwrap(), 10);
/// ```
pub struct LensSpec<M, T> {
    location: Location,
    get: Get<M, T>,
}

impl<M: 'static, T: 'static> LensSpec<M, T> {
    /// Creates a spec from a function returning every raw value for a name.
    pub fn new<G>(location: Location, get: G) -> Self
    where
        G: Fn(&str, &M) -> Vec<T> + Send + Sync + 'static,
    {
        Self {
            location,
            get: Arc::new(move |name: &str, target: &M| -> Result<Vec<T>, BoxError> {
                Ok(get(name, target))
            }),
        }
    }

    /// Returns the location of the values.
    #[must_use]
    pub fn location(&self) -> Location {
        self.location
    }

    /// Converts every value with an infallible function.
    #[must_use]
    pub fn map<U, F>(&self, f: F) -> LensSpec<M, U>
    where
        U: 'static,
        F: Fn(T) -> U + Send + Sync + 'static,
    {
        self.try_map(move |value| Ok::<_, Infallible>(f(value)))
    }

    /// Converts every value with a fallible function; an error makes the
    /// bound lens report `Invalid`.
    #[must_use]
    pub fn try_map<U, E, F>(&self, f: F) -> LensSpec<M, U>
    where
        U: 'static,
        E: Into<BoxError>,
        F: Fn(T) -> Result<U, E> + Send + Sync + 'static,
    {
        LensSpec {
            location: self.location,
            get: composed_get(&self.get, f),
        }
    }

    /// Binds a name; an absent value is `Missing`.
    #[must_use]
    pub fn required(&self, name: &str) -> Lens<M, T> {
        self.bind_required(name, None)
    }

    /// Like [`required`](Self::required), with a description.
    #[must_use]
    pub fn required_with_description(&self, name: &str, description: &str) -> Lens<M, T> {
        self.bind_required(name, Some(description))
    }

    /// Binds a name; an absent value is `None`.
    #[must_use]
    pub fn optional(&self, name: &str) -> Lens<M, Option<T>> {
        self.bind_optional(name, None)
    }

    /// Like [`optional`](Self::optional), with a description.
    #[must_use]
    pub fn optional_with_description(&self, name: &str, description: &str) -> Lens<M, Option<T>> {
        self.bind_optional(name, Some(description))
    }

    /// Binds a name; an absent value becomes `default`.
    #[must_use]
    pub fn defaulted(&self, name: &str, default: T) -> Lens<M, T>
    where
        T: Clone + Send + Sync,
    {
        self.bind_defaulted(name, None, default)
    }

    /// Like [`defaulted`](Self::defaulted), with a description.
    #[must_use]
    pub fn defaulted_with_description(
        &self,
        name: &str,
        description: &str,
        default: T,
    ) -> Lens<M, T>
    where
        T: Clone + Send + Sync,
    {
        self.bind_defaulted(name, Some(description), default)
    }

    /// Switches to binding every value of a name.
    #[must_use]
    pub fn multi(&self) -> MultiLensSpec<M, T> {
        MultiLensSpec {
            location: self.location,
            get: Arc::clone(&self.get),
        }
    }

    fn bind_defaulted(&self, name: &str, description: Option<&str>, default: T) -> Lens<M, T>
    where
        T: Clone + Send + Sync,
    {
        let meta = describe(Meta::new(self.location, name, false), description);
        let get = Arc::clone(&self.get);
        Lens::new(meta.clone(), move |target: &M| {
            Ok(read_first(&get, &meta, target)?.unwrap_or_else(|| default.clone()))
        })
    }

    fn bind_required(&self, name: &str, description: Option<&str>) -> Lens<M, T> {
        let meta = describe(Meta::new(self.location, name, true), description);
        let get = Arc::clone(&self.get);
        Lens::new(meta.clone(), move |target: &M| {
            read_first(&get, &meta, target)?.ok_or_else(|| ContractBreach::missing(meta.clone()))
        })
    }

    fn bind_optional(&self, name: &str, description: Option<&str>) -> Lens<M, Option<T>> {
        let meta = describe(Meta::new(self.location, name, false), description);
        let get = Arc::clone(&self.get);
        Lens::new(meta.clone(), move |target: &M| read_first(&get, &meta, target))
    }
}

impl<M, T> Clone for LensSpec<M, T> {
    fn clone(&self) -> Self {
        Self {
            location: self.location,
            get: Arc::clone(&self.get),
        }
    }
}

impl<M, T> fmt::Debug for LensSpec<M, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LensSpec")
            .field("location", &self.location)
            .finish_non_exhaustive()
    }
}

/// A read-only spec binding every value of a name, from [`LensSpec::multi`].
pub struct MultiLensSpec<M, T> {
    location: Location,
    get: Get<M, T>,
}

impl<M: 'static, T: 'static> MultiLensSpec<M, T> {
    /// Binds a name; no values at all is `Missing`.
    #[must_use]
    pub fn required(&self, name: &str) -> Lens<M, Vec<T>> {
        let meta = Meta::new(self.location, name, true);
        let get = Arc::clone(&self.get);
        Lens::new(meta.clone(), move |target: &M| {
            read_all(&get, &meta, target)?.ok_or_else(|| ContractBreach::missing(meta.clone()))
        })
    }

    /// Binds a name; no values at all is `None`.
    #[must_use]
    pub fn optional(&self, name: &str) -> Lens<M, Option<Vec<T>>> {
        let meta = Meta::new(self.location, name, false);
        let get = Arc::clone(&self.get);
        Lens::new(meta.clone(), move |target: &M| read_all(&get, &meta, target))
    }

    /// Binds a name; no values at all becomes `default`.
    #[must_use]
    pub fn defaulted(&self, name: &str, default: Vec<T>) -> Lens<M, Vec<T>>
    where
        T: Clone + Send + Sync,
    {
        let meta = Meta::new(self.location, name, false);
        let get = Arc::clone(&self.get);
        Lens::new(meta.clone(), move |target: &M| {
            Ok(read_all(&get, &meta, target)?.unwrap_or_else(|| default.clone()))
        })
    }
}

/// A spec that can read and write values of type `T` within messages of
/// type `M`.
///
/// Writing replaces every value previously bound to the name.
///
/// # Example
///
/// ```rust
/// use covenant_core::Request;
/// use covenant_lens::{Query, With};
///
/// let page = Query::spec().int().defaulted("page", 1);
///
/// assert_eq!(page.extract(&Request::get("/")).unwrap(), 1);
/// let request = Request::get("/?page=4").with([page.of(7)]);
/// assert_eq!(page.extract(&request).unwrap(), 7);
/// ```
pub struct BiDiLensSpec<M, T> {
    location: Location,
    get: Get<M, T>,
    set: Set<M, T>,
}

impl<M: 'static, T: 'static> BiDiLensSpec<M, T> {
    /// Creates a spec from a raw reader and a raw writer.
    ///
    /// The writer receives every value to store under the name and must
    /// replace what was there.
    pub fn new<G, S>(location: Location, get: G, set: S) -> Self
    where
        G: Fn(&str, &M) -> Vec<T> + Send + Sync + 'static,
        S: Fn(&str, Vec<T>, M) -> M + Send + Sync + 'static,
    {
        Self {
            location,
            get: Arc::new(move |name: &str, target: &M| -> Result<Vec<T>, BoxError> {
                Ok(get(name, target))
            }),
            set: Arc::new(set),
        }
    }

    /// Returns the location of the values.
    #[must_use]
    pub fn location(&self) -> Location {
        self.location
    }

    /// Returns the read-only view of this spec.
    #[must_use]
    pub fn get_only(&self) -> LensSpec<M, T> {
        LensSpec {
            location: self.location,
            get: Arc::clone(&self.get),
        }
    }

    /// Converts values with `f` when reading and `g` when writing.
    #[must_use]
    pub fn map<U, F, G>(&self, f: F, g: G) -> BiDiLensSpec<M, U>
    where
        U: 'static,
        F: Fn(T) -> U + Send + Sync + 'static,
        G: Fn(U) -> T + Send + Sync + 'static,
    {
        self.try_map(move |value| Ok::<_, Infallible>(f(value)), g)
    }

    /// Like [`map`](Self::map) with a fallible reader; an error makes the
    /// bound lens report `Invalid`.
    #[must_use]
    pub fn try_map<U, E, F, G>(&self, f: F, g: G) -> BiDiLensSpec<M, U>
    where
        U: 'static,
        E: Into<BoxError>,
        F: Fn(T) -> Result<U, E> + Send + Sync + 'static,
        G: Fn(U) -> T + Send + Sync + 'static,
    {
        let set = Arc::clone(&self.set);
        BiDiLensSpec {
            location: self.location,
            get: composed_get(&self.get, f),
            set: Arc::new(move |name: &str, values: Vec<U>, target: M| {
                set(name, values.into_iter().map(&g).collect(), target)
            }),
        }
    }

    /// Binds a name; an absent value is `Missing`.
    #[must_use]
    pub fn required(&self, name: &str) -> BiDiLens<M, T> {
        self.bind_required(name, None)
    }

    /// Like [`required`](Self::required), with a description.
    #[must_use]
    pub fn required_with_description(&self, name: &str, description: &str) -> BiDiLens<M, T> {
        self.bind_required(name, Some(description))
    }

    /// Binds a name; an absent value is `None`, and writing `None` clears
    /// the name.
    #[must_use]
    pub fn optional(&self, name: &str) -> BiDiLens<M, Option<T>> {
        self.bind_optional(name, None)
    }

    /// Like [`optional`](Self::optional), with a description.
    #[must_use]
    pub fn optional_with_description(
        &self,
        name: &str,
        description: &str,
    ) -> BiDiLens<M, Option<T>> {
        self.bind_optional(name, Some(description))
    }

    /// Binds a name; an absent value becomes `default`.
    #[must_use]
    pub fn defaulted(&self, name: &str, default: T) -> BiDiLens<M, T>
    where
        T: Clone + Send + Sync,
    {
        self.bind_defaulted(name, None, default)
    }

    /// Like [`defaulted`](Self::defaulted), with a description.
    #[must_use]
    pub fn defaulted_with_description(
        &self,
        name: &str,
        description: &str,
        default: T,
    ) -> BiDiLens<M, T>
    where
        T: Clone + Send + Sync,
    {
        self.bind_defaulted(name, Some(description), default)
    }

    /// Switches to binding every value of a name.
    #[must_use]
    pub fn multi(&self) -> BiDiMultiLensSpec<M, T> {
        BiDiMultiLensSpec {
            location: self.location,
            get: Arc::clone(&self.get),
            set: Arc::clone(&self.set),
        }
    }

    fn bind_defaulted(&self, name: &str, description: Option<&str>, default: T) -> BiDiLens<M, T>
    where
        T: Clone + Send + Sync,
    {
        let meta = describe(Meta::new(self.location, name, false), description);
        let get = Arc::clone(&self.get);
        let reader = meta.clone();
        BiDiLens::new(
            meta,
            move |target: &M| {
                Ok(read_first(&get, &reader, target)?.unwrap_or_else(|| default.clone()))
            },
            self.single_writer(name),
        )
    }

    fn bind_required(&self, name: &str, description: Option<&str>) -> BiDiLens<M, T> {
        let meta = describe(Meta::new(self.location, name, true), description);
        let get = Arc::clone(&self.get);
        let reader = meta.clone();
        BiDiLens::new(
            meta,
            move |target: &M| {
                read_first(&get, &reader, target)?
                    .ok_or_else(|| ContractBreach::missing(reader.clone()))
            },
            self.single_writer(name),
        )
    }

    fn bind_optional(&self, name: &str, description: Option<&str>) -> BiDiLens<M, Option<T>> {
        let meta = describe(Meta::new(self.location, name, false), description);
        let get = Arc::clone(&self.get);
        let set = Arc::clone(&self.set);
        let reader = meta.clone();
        let name = name.to_string();
        BiDiLens::new(
            meta,
            move |target: &M| read_first(&get, &reader, target),
            move |value: Option<T>, target: M| set(&name, value.into_iter().collect(), target),
        )
    }

    fn single_writer(&self, name: &str) -> impl Fn(T, M) -> M + Send + Sync + 'static {
        let set = Arc::clone(&self.set);
        let name = name.to_string();
        move |value: T, target: M| set(&name, vec![value], target)
    }
}

impl<M, T> Clone for BiDiLensSpec<M, T> {
    fn clone(&self) -> Self {
        Self {
            location: self.location,
            get: Arc::clone(&self.get),
            set: Arc::clone(&self.set),
        }
    }
}

impl<M, T> fmt::Debug for BiDiLensSpec<M, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BiDiLensSpec")
            .field("location", &self.location)
            .finish_non_exhaustive()
    }
}

/// A read-write spec binding every value of a name, from
/// [`BiDiLensSpec::multi`].
pub struct BiDiMultiLensSpec<M, T> {
    location: Location,
    get: Get<M, T>,
    set: Set<M, T>,
}

impl<M: 'static, T: 'static> BiDiMultiLensSpec<M, T> {
    /// Binds a name; no values at all is `Missing`.
    #[must_use]
    pub fn required(&self, name: &str) -> BiDiLens<M, Vec<T>> {
        let meta = Meta::new(self.location, name, true);
        let get = Arc::clone(&self.get);
        let reader = meta.clone();
        BiDiLens::new(
            meta,
            move |target: &M| {
                read_all(&get, &reader, target)?
                    .ok_or_else(|| ContractBreach::missing(reader.clone()))
            },
            self.writer(name),
        )
    }

    /// Binds a name; no values at all is `None`, and writing `None` clears
    /// the name.
    #[must_use]
    pub fn optional(&self, name: &str) -> BiDiLens<M, Option<Vec<T>>> {
        let meta = Meta::new(self.location, name, false);
        let get = Arc::clone(&self.get);
        let set = Arc::clone(&self.set);
        let reader = meta.clone();
        let name = name.to_string();
        BiDiLens::new(
            meta,
            move |target: &M| read_all(&get, &reader, target),
            move |values: Option<Vec<T>>, target: M| set(&name, values.unwrap_or_default(), target),
        )
    }

    /// Binds a name; no values at all becomes `default`.
    #[must_use]
    pub fn defaulted(&self, name: &str, default: Vec<T>) -> BiDiLens<M, Vec<T>>
    where
        T: Clone + Send + Sync,
    {
        let meta = Meta::new(self.location, name, false);
        let get = Arc::clone(&self.get);
        let reader = meta.clone();
        BiDiLens::new(
            meta,
            move |target: &M| {
                Ok(read_all(&get, &reader, target)?.unwrap_or_else(|| default.clone()))
            },
            self.writer(name),
        )
    }

    fn writer(&self, name: &str) -> impl Fn(Vec<T>, M) -> M + Send + Sync + 'static {
        let set = Arc::clone(&self.set);
        let name = name.to_string();
        move |values: Vec<T>, target: M| set(&name, values, target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Failure, With};

    /// Messages are plain `name=value` pair lists in these tests.
    type Pairs = Vec<(String, String)>;

    fn pairs_spec() -> BiDiLensSpec<Pairs, String> {
        BiDiLensSpec::new(
            Location::Query,
            |name: &str, pairs: &Pairs| {
                pairs
                    .iter()
                    .filter(|(n, _)| n == name)
                    .map(|(_, v)| v.clone())
                    .collect()
            },
            |name: &str, values: Vec<String>, pairs: Pairs| {
                let mut kept: Pairs = pairs.into_iter().filter(|(n, _)| n != name).collect();
                kept.extend(values.into_iter().map(|v| (name.to_string(), v)));
                kept
            },
        )
    }

    fn pairs(items: &[(&str, &str)]) -> Pairs {
        items
            .iter()
            .map(|(n, v)| ((*n).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_required() {
        let lens = pairs_spec().required("a");
        assert_eq!(lens.extract(&pairs(&[("a", "1"), ("a", "2")])).unwrap(), "1");
        assert_eq!(
            lens.extract(&pairs(&[])).unwrap_err().into_failures(),
            vec![Failure::Missing(lens.meta().clone())]
        );
        assert!(lens.meta().is_required());
    }

    #[test]
    fn test_optional() {
        let lens = pairs_spec().optional("a");
        assert_eq!(lens.extract(&pairs(&[("a", "1")])).unwrap(), Some("1".into()));
        assert_eq!(lens.extract(&pairs(&[])).unwrap(), None);
        assert!(!lens.meta().is_required());
    }

    #[test]
    fn test_defaulted() {
        let lens = pairs_spec().defaulted("a", "x".into());
        assert_eq!(lens.extract(&pairs(&[])).unwrap(), "x");
        assert_eq!(lens.extract(&pairs(&[("a", "1")])).unwrap(), "1");
    }

    #[test]
    fn test_multi() {
        let spec = pairs_spec().multi();
        let message = pairs(&[("a", "1"), ("b", "9"), ("a", "2")]);

        assert_eq!(spec.required("a").extract(&message).unwrap(), vec!["1", "2"]);
        assert!(spec.required("c").extract(&message).is_err());
        assert_eq!(spec.optional("c").extract(&message).unwrap(), None);
        assert_eq!(
            spec.defaulted("c", vec!["z".into()]).extract(&message).unwrap(),
            vec!["z"]
        );
    }

    #[test]
    fn test_try_map_reports_invalid() {
        let lens = pairs_spec().try_map(|v| v.parse::<i32>(), |v: i32| v.to_string()).required("a");
        assert_eq!(lens.extract(&pairs(&[("a", "12")])).unwrap(), 12);
        assert_eq!(
            lens.extract(&pairs(&[("a", "twelve")])).unwrap_err().into_failures(),
            vec![Failure::Invalid(lens.meta().clone())]
        );
    }

    #[test]
    fn test_invalid_wins_over_default() {
        let lens = pairs_spec()
            .try_map(|v| v.parse::<i32>(), |v: i32| v.to_string())
            .defaulted("a", 5);
        assert!(lens.extract(&pairs(&[("a", "x")])).is_err());
    }

    #[test]
    fn test_set_replaces_and_map_round_trips() {
        let lens = pairs_spec().map(|v| v.len(), |n: usize| "x".repeat(n)).required("a");
        let message = pairs(&[("a", "old"), ("b", "keep")]).with([lens.of(2)]);

        assert_eq!(message, pairs(&[("b", "keep"), ("a", "xx")]));
        assert_eq!(lens.extract(&message).unwrap(), 2);
    }

    #[test]
    fn test_optional_none_clears() {
        let lens = pairs_spec().optional("a");
        let message = lens.inject(None, pairs(&[("a", "1")]));
        assert!(message.is_empty());
    }

    #[test]
    fn test_multi_inject() {
        let lens = pairs_spec().multi().required("a");
        let message = lens.inject(vec!["1".into(), "2".into()], Vec::new());
        assert_eq!(message, pairs(&[("a", "1"), ("a", "2")]));
    }

    #[test]
    fn test_description_is_kept() {
        let lens = pairs_spec().required_with_description("a", "the a value");
        assert_eq!(lens.meta().description(), Some("the a value"));

        let defaulted = pairs_spec().defaulted_with_description("b", "fallback", "x".into());
        assert_eq!(defaulted.meta().description(), Some("fallback"));
        assert_eq!(defaulted.extract(&pairs(&[])).unwrap(), "x");
    }

    #[test]
    fn test_get_only_view() {
        let lens = pairs_spec().get_only().map(|v| v.to_uppercase()).required("a");
        assert_eq!(lens.extract(&pairs(&[("a", "up")])).unwrap(), "UP");
    }
}
