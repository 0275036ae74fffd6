//! Content-Type values.

use std::borrow::Cow;
use std::fmt;

/// A declared `Content-Type`.
///
/// Matching compares media-type essences (`type/subtype`, case-insensitive),
/// so `text/plain; charset=utf-8` matches [`ContentType::TEXT_PLAIN`].
///
/// # Example
///
/// ```rust
/// use covenant_core::ContentType;
///
/// assert!(ContentType::APPLICATION_JSON.matches("application/json; charset=utf-8"));
/// assert!(!ContentType::APPLICATION_JSON.matches("text/plain"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentType(Cow<'static, str>);

impl ContentType {
    /// `text/plain`
    pub const TEXT_PLAIN: Self = Self(Cow::Borrowed("text/plain"));
    /// `text/html`
    pub const TEXT_HTML: Self = Self(Cow::Borrowed("text/html"));
    /// `application/json`
    pub const APPLICATION_JSON: Self = Self(Cow::Borrowed("application/json"));
    /// `application/x-www-form-urlencoded`
    pub const APPLICATION_FORM_URLENCODED: Self =
        Self(Cow::Borrowed("application/x-www-form-urlencoded"));

    /// Creates a content type from a header value.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(Cow::Owned(value.into()))
    }

    /// Returns the full header value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }

    /// Returns true if `header_value` names the same media type.
    #[must_use]
    pub fn matches(&self, header_value: &str) -> bool {
        match (self.0.parse::<mime::Mime>(), header_value.parse::<mime::Mime>()) {
            (Ok(declared), Ok(actual)) => declared.essence_str() == actual.essence_str(),
            _ => self.0.trim().eq_ignore_ascii_case(header_value.trim()),
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
