//! Request cookies.
//!
//! Cookies travel in the `Cookie` header as `name=value` pairs separated by
//! `;`. This module parses and renders that form; attributes such as
//! `Max-Age` or `Path` belong to `Set-Cookie` and are not modelled here.

use std::fmt;

/// A single `name=value` cookie.
///
/// # Example
///
/// ```rust
/// use covenant_core::Cookie;
///
/// let cookies = Cookie::parse_header("session=abc123; theme=\"dark\"");
/// assert_eq!(cookies, vec![Cookie::new("session", "abc123"), Cookie::new("theme", "dark")]);
/// assert_eq!(cookies[0].to_string(), "session=abc123");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cookie {
    name: String,
    value: String,
}

impl Cookie {
    /// Creates a new cookie.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Returns the cookie name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the cookie value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Parses every cookie out of a `Cookie` header value, keeping header order.
    ///
    /// Pairs without `=` are skipped; surrounding quotes are removed from values.
    #[must_use]
    pub fn parse_header(header_value: &str) -> Vec<Self> {
        header_value
            .split(';')
            .filter_map(|pair| {
                let (name, value) = pair.trim().split_once('=')?;
                let name = name.trim();
                if name.is_empty() {
                    return None;
                }
                Some(Self::new(name, value.trim().trim_matches('"')))
            })
            .collect()
    }
}

impl fmt::Display for Cookie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_header_keeps_order() {
        let cookies = Cookie::parse_header("b=2; a=1; b=3");
        let names: Vec<_> = cookies.iter().map(Cookie::name).collect();
        assert_eq!(names, vec!["b", "a", "b"]);
        assert_eq!(cookies[2].value(), "3");
    }

    #[test]
    fn test_parse_header_skips_malformed() {
        let cookies = Cookie::parse_header("valid=yes; novalue; =orphan");
        assert_eq!(cookies, vec![Cookie::new("valid", "yes")]);
    }

    #[test]
    fn test_parse_empty_header() {
        assert!(Cookie::parse_header("").is_empty());
    }
}
