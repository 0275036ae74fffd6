//! Helpers over [`http::Uri`].
//!
//! Requests carry an [`http::Uri`]. Lenses rewrite its path and query, so
//! [`UriExt`] rebuilds the path-and-query part while keeping scheme and
//! authority. [`parse`] is the lenient entry point used by the request
//! constructors.

use http::uri::{Parts, PathAndQuery};
use http::Uri;

/// Parses a URI, percent-encoding characters `http` refuses.
///
/// Text that still does not parse becomes `/`.
///
/// # Example
///
/// ```rust
/// use covenant_core::uri;
///
/// assert_eq!(uri::parse("/users/{id}?q=1").path(), "/users/{id}");
/// assert_eq!(uri::parse("/hello world").path(), "/hello%20world");
/// ```
#[must_use]
pub fn parse(value: &str) -> Uri {
    if let Ok(uri) = value.parse::<Uri>() {
        return uri;
    }
    escape(value).parse::<Uri>().unwrap_or_else(|e| {
        tracing::warn!(uri = value, error = %e, "unparseable uri replaced by /");
        Uri::from_static("/")
    })
}

fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for byte in value.bytes() {
        if byte <= b' ' || byte >= 0x7f || b"\"<>\\^`|".contains(&byte) {
            escaped.push_str(&format!("%{byte:02X}"));
        } else {
            escaped.push(char::from(byte));
        }
    }
    escaped
}

/// Path and query rewrites for [`Uri`].
pub trait UriExt {
    /// Returns the raw query string (without `?`), or an empty string.
    fn query_str(&self) -> &str;

    /// Returns a copy with a different path, keeping the query.
    fn with_path(&self, path: &str) -> Uri;

    /// Returns a copy with a different raw query; an empty query drops the `?`.
    fn with_query(&self, query: &str) -> Uri;
}

impl UriExt for Uri {
    fn query_str(&self) -> &str {
        self.query().unwrap_or("")
    }

    fn with_path(&self, path: &str) -> Uri {
        rebuild(self, path, self.query_str())
    }

    fn with_query(&self, query: &str) -> Uri {
        rebuild(self, self.path(), query)
    }
}

fn rebuild(uri: &Uri, path: &str, query: &str) -> Uri {
    let path_and_query = if query.is_empty() {
        path.to_string()
    } else {
        format!("{path}?{query}")
    };

    let mut parts = Parts::from(uri.clone());
    let rebuilt = PathAndQuery::try_from(path_and_query.as_str())
        .map_err(http::Error::from)
        .and_then(|pq| {
            parts.path_and_query = Some(pq);
            Uri::from_parts(parts).map_err(http::Error::from)
        });

    rebuilt.unwrap_or_else(|e| {
        tracing::warn!(uri = %uri, path_and_query = %path_and_query, error = %e, "uri rewrite rejected");
        uri.clone()
    })
}
