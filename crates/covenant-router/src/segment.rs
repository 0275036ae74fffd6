//! Path tokenization.
//!
//! Templates and request paths share one splitting rule: a single leading
//! `/` is dropped, an empty remainder has no segments, and anything else is
//! split on every `/`. Trailing slashes are not normalized, so `/a/` has the
//! segments `a` and the empty string.

use std::borrow::Cow;
use std::fmt;

/// One segment of a route template.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Matches a request segment equal to this text (case-sensitive).
    Literal(String),
    /// Matches any single segment and binds it to the named path lens.
    Capture(String),
}

impl Segment {
    /// Returns true if this segment accepts the decoded request segment.
    #[must_use]
    pub fn matches(&self, segment: &str) -> bool {
        match self {
            Self::Literal(literal) => literal == segment,
            Self::Capture(_) => true,
        }
    }

    /// Returns true for capturing segments.
    #[must_use]
    pub fn is_capture(&self) -> bool {
        matches!(self, Self::Capture(_))
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(literal) => f.write_str(literal),
            Self::Capture(name) => write!(f, "{{{name}}}"),
        }
    }
}

/// Splits a path into raw segments.
pub(crate) fn split_path(path: &str) -> Vec<&str> {
    let path = path.strip_prefix('/').unwrap_or(path);
    if path.is_empty() {
        Vec::new()
    } else {
        path.split('/').collect()
    }
}

/// Tokenizes a literal template fragment such as `"api/v1"`.
pub(crate) fn literals(fragment: &str) -> impl Iterator<Item = Segment> + '_ {
    split_path(fragment)
        .into_iter()
        .map(|segment| Segment::Literal(segment.to_string()))
}

/// Splits a request path into percent-decoded segments.
///
/// A segment that does not decode to UTF-8 is kept as written.
pub(crate) fn request_segments(path: &str) -> Vec<Cow<'_, str>> {
    split_path(path)
        .into_iter()
        .map(|segment| urlencoding::decode(segment).unwrap_or(Cow::Borrowed(segment)))
        .collect()
}

/// Joins a base path and template segments into a request path.
pub(crate) fn join_path<'a, I>(base: &str, segments: I) -> String
where
    I: IntoIterator<Item = &'a Segment>,
{
    let mut path = base.trim_end_matches('/').to_string();
    for segment in segments {
        path.push('/');
        path.push_str(&segment.to_string());
    }
    if path.is_empty() {
        path.push('/');
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_path() {
        assert!(split_path("").is_empty());
        assert!(split_path("/").is_empty());
        assert_eq!(split_path("/a/b"), vec!["a", "b"]);
        assert_eq!(split_path("a/b"), vec!["a", "b"]);
        assert_eq!(split_path("/a/"), vec!["a", ""]);
        assert_eq!(split_path("//a"), vec!["", "a"]);
    }

    #[test]
    fn test_literals() {
        let segments: Vec<_> = literals("/api/v1").collect();
        assert_eq!(
            segments,
            vec![Segment::Literal("api".into()), Segment::Literal("v1".into())]
        );
        assert_eq!(literals("").count(), 0);
    }

    #[test]
    fn test_request_segments_decode() {
        assert_eq!(request_segments("/hello%20world/a%2Fb"), vec!["hello world", "a/b"]);
        assert_eq!(request_segments("/bad%FF"), vec!["bad%FF"]);
    }

    #[test]
    fn test_segment_matching_is_case_sensitive() {
        let literal = Segment::Literal("Users".into());
        assert!(literal.matches("Users"));
        assert!(!literal.matches("users"));
        assert!(Segment::Capture("id".into()).matches("anything"));
    }

    #[test]
    fn test_join_path() {
        let segments = vec![Segment::Literal("a".into()), Segment::Capture("id".into())];
        assert_eq!(join_path("", &segments), "/a/{id}");
        assert_eq!(join_path("/base/", &segments), "/base/a/{id}");
        assert_eq!(join_path("", &[]), "/");
    }
}
