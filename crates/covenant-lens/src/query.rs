//! Query parameter lenses.

use covenant_core::Request;

use crate::{BiDiLens, BiDiLensSpec, BiDiMultiLensSpec, Location};

/// Lenses over the query string of a [`Request`].
///
/// Values are read decoded; writing replaces every value of the name.
///
/// # Example
///
/// ```rust
/// use covenant_core::Request;
/// use covenant_lens::Query;
///
/// let page = Query::spec().int().optional("page");
/// assert_eq!(page.extract(&Request::get("/list?page=2")).unwrap(), Some(2));
/// assert_eq!(page.extract(&Request::get("/list")).unwrap(), None);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Query;

impl Query {
    /// Returns the string spec for query parameters.
    #[must_use]
    pub fn spec() -> BiDiLensSpec<Request, String> {
        BiDiLensSpec::new(
            Location::Query,
            |name: &str, request: &Request| request.queries(name),
            |name: &str, values: Vec<String>, request: Request| {
                values
                    .iter()
                    .fold(request.remove_query(name), |request, value| {
                        request.query(name, value)
                    })
            },
        )
    }

    /// A required string parameter.
    #[must_use]
    pub fn required(name: &str) -> BiDiLens<Request, String> {
        Self::spec().required(name)
    }

    /// An optional string parameter.
    #[must_use]
    pub fn optional(name: &str) -> BiDiLens<Request, Option<String>> {
        Self::spec().optional(name)
    }

    /// A string parameter with a default.
    #[must_use]
    pub fn defaulted(name: &str, default: impl Into<String>) -> BiDiLens<Request, String> {
        Self::spec().defaulted(name, default.into())
    }

    /// Every value of a string parameter.
    #[must_use]
    pub fn multi() -> BiDiMultiLensSpec<Request, String> {
        Self::spec().multi()
    }
}
