//! Cookie lenses.

use covenant_core::{Cookie, Request};

use crate::{BiDiLens, BiDiLensSpec, Location};

/// Lenses over the cookies sent with a [`Request`].
///
/// Values are whole [`Cookie`]s; [`Cookies::value`] reads just the value.
/// Writing replaces every cookie of the name, always under the lens name.
///
/// # Example
///
/// ```rust
/// use covenant_core::{Cookie, Request};
/// use covenant_lens::{Cookies, With};
///
/// let session = Cookies::required("session");
/// let request = Request::get("/").with([session.of(Cookie::new("session", "abc"))]);
/// assert_eq!(session.extract(&request).unwrap().value(), "abc");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Cookies;

impl Cookies {
    /// Returns the cookie spec.
    #[must_use]
    pub fn spec() -> BiDiLensSpec<Request, Cookie> {
        BiDiLensSpec::new(
            Location::Cookie,
            |name: &str, request: &Request| {
                request
                    .cookies()
                    .into_iter()
                    .filter(|cookie| cookie.name() == name)
                    .collect()
            },
            |name: &str, cookies: Vec<Cookie>, request: Request| {
                cookies
                    .iter()
                    .fold(request.remove_cookie(name), |request, cookie| {
                        request.cookie(&Cookie::new(name, cookie.value()))
                    })
            },
        )
    }

    /// A required cookie.
    #[must_use]
    pub fn required(name: &str) -> BiDiLens<Request, Cookie> {
        Self::spec().required(name)
    }

    /// An optional cookie.
    #[must_use]
    pub fn optional(name: &str) -> BiDiLens<Request, Option<Cookie>> {
        Self::spec().optional(name)
    }

    /// The value of a cookie, as a string spec.
    #[must_use]
    pub fn value() -> BiDiLensSpec<Request, String> {
        Self::spec().map(
            |cookie: Cookie| cookie.value().to_string(),
            |value: String| Cookie::new("", value),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Failure;

    fn request() -> Request {
        Request::get("/")
            .cookie(&Cookie::new("hello", "world"))
            .cookie(&Cookie::new("other", "thing"))
    }

    #[test]
    fn test_value_present() {
        assert_eq!(
            Cookies::required("hello").extract(&request()).unwrap(),
            Cookie::new("hello", "world")
        );
        assert_eq!(
            Cookies::optional("other").extract(&request()).unwrap(),
            Some(Cookie::new("other", "thing"))
        );
    }

    #[test]
    fn test_value_missing() {
        let lens = Cookies::required("missing");
        assert_eq!(
            lens.extract(&request()).unwrap_err().into_failures(),
            vec![Failure::Missing(lens.meta().clone())]
        );
        assert_eq!(Cookies::optional("missing").extract(&request()).unwrap(), None);
    }

    #[test]
    fn test_value_spec() {
        let lens = Cookies::value().required("hello");
        assert_eq!(lens.extract(&request()).unwrap(), "world");

        let updated = lens.inject("again".into(), request());
        assert_eq!(
            updated.cookies(),
            vec![Cookie::new("other", "thing"), Cookie::new("hello", "again")]
        );
    }

    #[test]
    fn test_set_replaces_same_name_only() {
        let lens = Cookies::required("hello");
        let updated = lens.inject(Cookie::new("hello", "again"), request());
        assert_eq!(
            updated.cookies(),
            vec![Cookie::new("other", "thing"), Cookie::new("hello", "again")]
        );
    }
}
