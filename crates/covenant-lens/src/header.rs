//! Header lenses.

use covenant_core::{ContentType, HttpMessage, CONTENT_TYPE};

use crate::{BiDiLens, BiDiLensSpec, BiDiMultiLensSpec, Location, Meta};

/// Lenses over the headers of any [`HttpMessage`].
///
/// Names compare case-insensitively. Writing replaces every value of the
/// name.
///
/// # Example
///
/// ```rust
/// use covenant_core::{HttpMessage, Request};
/// use covenant_lens::Header;
///
/// let request = Request::get("/").header("hello", "world");
/// assert_eq!(Header::required::<Request>("Hello").extract(&request).unwrap(), "world");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Header;

impl Header {
    /// Returns the string spec for headers of message type `M`.
    #[must_use]
    pub fn spec<M: HttpMessage + 'static>() -> BiDiLensSpec<M, String> {
        BiDiLensSpec::new(
            Location::Header,
            |name: &str, message: &M| {
                message
                    .header_values(name)
                    .into_iter()
                    .map(str::to_string)
                    .collect()
            },
            |name: &str, values: Vec<String>, message: M| {
                values
                    .into_iter()
                    .fold(message.remove_header(name), |message, value| {
                        message.header(name, value)
                    })
            },
        )
    }

    /// A required string header.
    #[must_use]
    pub fn required<M: HttpMessage + 'static>(name: &str) -> BiDiLens<M, String> {
        Self::spec().required(name)
    }

    /// An optional string header.
    #[must_use]
    pub fn optional<M: HttpMessage + 'static>(name: &str) -> BiDiLens<M, Option<String>> {
        Self::spec().optional(name)
    }

    /// A string header with a default.
    #[must_use]
    pub fn defaulted<M: HttpMessage + 'static>(
        name: &str,
        default: impl Into<String>,
    ) -> BiDiLens<M, String> {
        Self::spec().defaulted(name, default.into())
    }

    /// Every value of a string header.
    #[must_use]
    pub fn multi<M: HttpMessage + 'static>() -> BiDiMultiLensSpec<M, String> {
        Self::spec().multi()
    }

    /// The optional `Content-Type` header.
    #[must_use]
    pub fn content_type<M: HttpMessage + 'static>() -> BiDiLens<M, Option<ContentType>> {
        Self::spec()
            .map(ContentType::new, |content_type: ContentType| {
                content_type.value().to_string()
            })
            .optional(CONTENT_TYPE)
    }

    /// Metadata of [`Header::content_type`], reported when a body arrives
    /// with the wrong media type.
    #[must_use]
    pub fn content_type_meta() -> Meta {
        Meta::new(Location::Header, CONTENT_TYPE, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Failure, With};
    use covenant_core::{Request, Response};

    #[test]
    fn test_value_present() {
        let request = Request::get("/").header("hello", "world").header("hello", "world2");
        assert_eq!(Header::required::<Request>("hello").extract(&request).unwrap(), "world");
        assert_eq!(
            Header::optional::<Request>("hello").extract(&request).unwrap(),
            Some("world".into())
        );
        assert_eq!(
            Header::multi::<Request>().required("hello").extract(&request).unwrap(),
            vec!["world", "world2"]
        );
    }

    #[test]
    fn test_value_missing() {
        let request = Request::get("/");
        let required = Header::required::<Request>("world");
        assert_eq!(
            required.extract(&request).unwrap_err().into_failures(),
            vec![Failure::Missing(required.meta().clone())]
        );
        assert_eq!(Header::optional::<Request>("world").extract(&request).unwrap(), None);
        assert_eq!(
            Header::multi::<Request>().optional("world").extract(&request).unwrap(),
            None
        );
    }

    #[test]
    fn test_invalid_value() {
        let request = Request::get("/").header("hello", "world");
        let lens = Header::spec::<Request>().int().required("hello");
        assert_eq!(
            lens.extract(&request).unwrap_err().into_failures(),
            vec![Failure::Invalid(lens.meta().clone())]
        );
    }

    #[test]
    fn test_sets_value_on_response() {
        let lens = Header::spec::<Response>().int().required("count");
        let response = Response::ok().header("count", "1").with([lens.of(123)]);
        assert_eq!(response.header_values("count"), vec!["123"]);
    }

    #[test]
    fn test_content_type() {
        let lens = Header::content_type::<Request>();
        let request = Request::post("/").with([lens.of(Some(ContentType::TEXT_PLAIN))]);
        assert_eq!(request.header_value("content-type"), Some("text/plain"));
        assert_eq!(lens.extract(&request).unwrap(), Some(ContentType::TEXT_PLAIN));
        assert_eq!(lens.meta(), &Header::content_type_meta());
    }

    #[test]
    fn test_to_string() {
        assert_eq!(
            Header::required::<Request>("hello").to_string(),
            "Required header 'hello'"
        );
        assert_eq!(
            Header::optional::<Request>("hello").to_string(),
            "Optional header 'hello'"
        );
    }
}
