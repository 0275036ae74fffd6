//! Request and response value objects.
//!
//! Messages are immutable values: every builder consumes the message and
//! returns the updated copy, so a message handed to a lens is never changed
//! behind the caller's back.
//!
//! Only the accessors the lens layer needs are provided: named multi-valued
//! headers, query parameters and cookies, a raw body, and the request method
//! and path.

use bytes::Bytes;
use http::header::{HeaderName, HeaderValue};
use http::{HeaderMap, Method, StatusCode, Uri};

use crate::uri::{self, UriExt};
use crate::{ContentType, Cookie};

/// Name of the `Content-Type` header.
pub const CONTENT_TYPE: &str = "Content-Type";

/// Name of the `Cookie` header.
pub const COOKIE: &str = "Cookie";

/// Behaviour shared by requests and responses.
///
/// Headers live in an [`http::HeaderMap`]: names compare case-insensitively
/// and a name keeps its values in insertion order.
pub trait HttpMessage: Sized {
    /// Returns the headers.
    fn headers(&self) -> &HeaderMap;

    /// Returns the headers for in-place edits by the default builders.
    fn headers_mut(&mut self) -> &mut HeaderMap;

    /// Returns the raw body.
    fn body(&self) -> &Bytes;

    /// Replaces the raw body.
    fn set_body(&mut self, body: Bytes);

    /// Returns all UTF-8 values of a header, in order.
    fn header_values(&self, name: &str) -> Vec<&str> {
        self.headers()
            .get_all(name)
            .into_iter()
            .filter_map(|value| std::str::from_utf8(value.as_bytes()).ok())
            .collect()
    }

    /// Returns the first value of a header.
    fn header_value(&self, name: &str) -> Option<&str> {
        self.headers()
            .get(name)
            .and_then(|value| std::str::from_utf8(value.as_bytes()).ok())
    }

    /// Appends a header value.
    ///
    /// A name or value `http` rejects (control characters, spaces in the
    /// name) is dropped with a warning.
    fn header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        let (name, value) = (name.as_ref(), value.as_ref());
        match (HeaderName::try_from(name), HeaderValue::try_from(value)) {
            (Ok(name), Ok(value)) => {
                self.headers_mut().append(name, value);
            }
            _ => tracing::warn!(header = name, "invalid header dropped"),
        }
        self
    }

    /// Replaces every value of a header with a single one.
    fn replace_header(self, name: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        self.remove_header(name.as_ref()).header(name, value)
    }

    /// Removes every value of a header.
    fn remove_header(mut self, name: &str) -> Self {
        self.headers_mut().remove(name);
        self
    }

    /// Returns a copy of this message with a new body.
    fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.set_body(body.into());
        self
    }

    /// Returns the body decoded as UTF-8, replacing invalid sequences.
    fn body_string(&self) -> String {
        String::from_utf8_lossy(self.body()).into_owned()
    }

    /// Returns the declared `Content-Type`, if any.
    fn content_type(&self) -> Option<ContentType> {
        self.header_value(CONTENT_TYPE).map(ContentType::new)
    }
}

/// An HTTP request.
///
/// # Example
///
/// ```rust
/// use covenant_core::{HttpMessage, Request};
///
/// let request = Request::get("/search?q=rust")
///     .header("Accept", "text/plain")
///     .query("page", "2");
///
/// assert_eq!(request.path(), "/search");
/// assert_eq!(request.queries("q"), vec!["rust"]);
/// assert_eq!(request.queries("page"), vec!["2"]);
/// assert_eq!(request.header_value("accept"), Some("text/plain"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
}

impl Request {
    /// Creates a request with no headers and an empty body.
    #[must_use]
    pub fn new(method: Method, uri: Uri) -> Self {
        Self {
            method,
            uri,
            headers: HeaderMap::new(),
            body: Bytes::new(),
        }
    }

    /// Creates a request from URI text, parsed with [`uri::parse`].
    #[must_use]
    pub fn of(method: Method, uri: impl AsRef<str>) -> Self {
        Self::new(method, uri::parse(uri.as_ref()))
    }

    /// Creates a `GET` request.
    #[must_use]
    pub fn get(uri: impl AsRef<str>) -> Self {
        Self::of(Method::GET, uri)
    }

    /// Creates a `POST` request.
    #[must_use]
    pub fn post(uri: impl AsRef<str>) -> Self {
        Self::of(Method::POST, uri)
    }

    /// Returns the request method.
    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Returns the request URI.
    #[must_use]
    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    /// Returns the (still encoded) request path.
    #[must_use]
    pub fn path(&self) -> &str {
        self.uri.path()
    }

    /// Returns a copy of this request with a different URI.
    #[must_use]
    pub fn with_uri(mut self, uri: Uri) -> Self {
        self.uri = uri;
        self
    }

    /// Returns every query parameter as decoded `(name, value)` pairs.
    ///
    /// A parameter without `=` decodes to an empty value. A query string that
    /// cannot be decoded yields no parameters.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        serde_urlencoded::from_str(self.uri.query_str()).unwrap_or_else(|e| {
            tracing::trace!(query = self.uri.query_str(), error = %e, "undecodable query string");
            Vec::new()
        })
    }

    /// Returns all decoded values of a query parameter, in order.
    #[must_use]
    pub fn queries(&self, name: &str) -> Vec<String> {
        self.query_pairs()
            .into_iter()
            .filter(|(n, _)| n == name)
            .map(|(_, v)| v)
            .collect()
    }

    /// Appends a query parameter.
    #[must_use]
    pub fn query(mut self, name: &str, value: &str) -> Self {
        let encoded = serde_urlencoded::to_string([(name, value)].as_slice()).unwrap_or_default();
        let query = if self.uri.query_str().is_empty() {
            encoded
        } else {
            format!("{}&{encoded}", self.uri.query_str())
        };
        self.uri = self.uri.with_query(&query);
        self
    }

    /// Removes every value of a query parameter.
    ///
    /// The remaining parameters are re-encoded in their original order.
    #[must_use]
    pub fn remove_query(mut self, name: &str) -> Self {
        let remaining: Vec<(String, String)> = self
            .query_pairs()
            .into_iter()
            .filter(|(n, _)| n != name)
            .collect();
        let query = serde_urlencoded::to_string(remaining.as_slice()).unwrap_or_default();
        self.uri = self.uri.with_query(&query);
        self
    }

    /// Returns every cookie sent with this request, in header order.
    #[must_use]
    pub fn cookies(&self) -> Vec<Cookie> {
        self.header_values(COOKIE)
            .into_iter()
            .flat_map(Cookie::parse_header)
            .collect()
    }

    /// Appends a cookie to the `Cookie` header.
    #[must_use]
    pub fn cookie(self, cookie: &Cookie) -> Self {
        let value = match self.header_value(COOKIE) {
            Some(existing) if !existing.is_empty() => format!("{existing}; {cookie}"),
            _ => cookie.to_string(),
        };
        self.replace_header(COOKIE, value)
    }

    /// Removes every cookie with the given name, keeping the others.
    #[must_use]
    pub fn remove_cookie(self, name: &str) -> Self {
        let remaining: Vec<String> = self
            .cookies()
            .into_iter()
            .filter(|c| c.name() != name)
            .map(|c| c.to_string())
            .collect();
        let request = self.remove_header(COOKIE);
        if remaining.is_empty() {
            request
        } else {
            request.header(COOKIE, remaining.join("; "))
        }
    }
}

impl HttpMessage for Request {
    fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    fn body(&self) -> &Bytes {
        &self.body
    }

    fn set_body(&mut self, body: Bytes) {
        self.body = body;
    }
}

/// An HTTP response.
///
/// # Example
///
/// ```rust
/// use covenant_core::{HttpMessage, Response};
/// use http::StatusCode;
///
/// let response = Response::ok().with_body("hello");
/// assert_eq!(response.status(), StatusCode::OK);
/// assert_eq!(response.body_string(), "hello");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
}

impl Response {
    /// Creates a response with no headers and an empty body.
    #[must_use]
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: Bytes::new(),
        }
    }

    /// Creates a `200 OK` response.
    #[must_use]
    pub fn ok() -> Self {
        Self::new(StatusCode::OK)
    }

    /// Creates a `404 Not Found` response.
    #[must_use]
    pub fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND)
    }

    /// Returns the status code.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Returns a copy of this response with a different status.
    #[must_use]
    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }
}

impl HttpMessage for Response {
    fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    fn body(&self) -> &Bytes {
        &self.body
    }

    fn set_body(&mut self, body: Bytes) {
        self.body = body;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headers_are_case_insensitive_and_ordered() {
        let request = Request::get("/")
            .header("hello", "world")
            .header("Hello", "world2");

        assert_eq!(request.header_values("HELLO"), vec!["world", "world2"]);
        assert_eq!(request.header_value("hello"), Some("world"));
        assert_eq!(request.header_value("missing"), None);
    }

    #[test]
    fn test_invalid_header_is_dropped() {
        let request = Request::get("/")
            .header("bad name", "x")
            .header("ok", "line\nbreak")
            .header("ok", "fine");
        assert_eq!(request.headers().len(), 1);
        assert_eq!(request.header_values("ok"), vec!["fine"]);
    }

    #[test]
    fn test_replace_and_remove_header() {
        let request = Request::get("/")
            .header("a", "1")
            .header("a", "2")
            .replace_header("A", "3");
        assert_eq!(request.header_values("a"), vec!["3"]);

        let request = request.remove_header("a");
        assert!(request.header_values("a").is_empty());
    }

    #[test]
    fn test_builders_do_not_touch_original() {
        let original = Request::get("/");
        let changed = original.clone().header("x", "y");
        assert!(original.headers().is_empty());
        assert_eq!(changed.headers().len(), 1);
    }

    #[test]
    fn test_query_append_and_read() {
        let request = Request::get("http://host/path?a=1")
            .query("a", "2")
            .query("b", "hello world");

        assert_eq!(request.queries("a"), vec!["1", "2"]);
        assert_eq!(request.queries("b"), vec!["hello world"]);
        assert_eq!(request.uri().query(), Some("a=1&a=2&b=hello+world"));
        assert_eq!(request.path(), "/path");
    }

    #[test]
    fn test_remove_query_keeps_others() {
        let request = Request::get("/p?a=1&b=2&a=3").remove_query("a");
        assert!(request.queries("a").is_empty());
        assert_eq!(request.uri().query(), Some("b=2"));

        let request = request.remove_query("b");
        assert_eq!(request.uri().to_string(), "/p");
    }

    #[test]
    fn test_remove_cookie_keeps_others() {
        let request = Request::get("/")
            .cookie(&Cookie::new("a", "1"))
            .cookie(&Cookie::new("b", "2"))
            .remove_cookie("a");
        assert_eq!(request.cookies(), vec![Cookie::new("b", "2")]);

        let request = request.remove_cookie("b");
        assert!(request.header_value(COOKIE).is_none());
    }

    #[test]
    fn test_query_without_value_reads_empty() {
        let request = Request::get("/?flag");
        assert_eq!(request.queries("flag"), vec![""]);
    }

    #[test]
    fn test_cookies() {
        let request = Request::get("/")
            .cookie(&Cookie::new("a", "1"))
            .cookie(&Cookie::new("b", "2"));

        assert_eq!(request.header_value("cookie"), Some("a=1; b=2"));
        assert_eq!(
            request.cookies(),
            vec![Cookie::new("a", "1"), Cookie::new("b", "2")]
        );
    }

    #[test]
    fn test_body_and_content_type() {
        let request = Request::post("/")
            .header(CONTENT_TYPE, "text/plain")
            .with_body("hello");

        assert_eq!(request.body_string(), "hello");
        assert_eq!(request.content_type(), Some(ContentType::new("text/plain")));
    }

    #[test]
    fn test_response_builders() {
        let response = Response::not_found().with_status(StatusCode::CONFLICT);
        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert!(response.body().is_empty());
    }
}
