//! Captured path segments.
//!
//! Uses a small-vector so the common case (at most four captures, which is
//! also the most a route can declare) stays on the stack.

use smallvec::SmallVec;

use crate::MAX_CAPTURES;

/// Decoded path segments captured by a matched route, in template order.
///
/// # Example
///
/// ```rust
/// use covenant_router::Captures;
///
/// let mut captures = Captures::new();
/// captures.push("userId", "123");
/// captures.push("action", "view");
///
/// assert_eq!(captures.get("userId"), Some("123"));
/// assert_eq!(captures.get_index(1), Some("view"));
/// assert_eq!(captures.get("unknown"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Captures {
    inner: SmallVec<[(String, String); MAX_CAPTURES]>,
}

impl Captures {
    /// Creates an empty set of captures.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a capture.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.inner.push((name.into(), value.into()));
    }

    /// Returns the first value captured under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.inner
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Returns the value of the capture at `index`.
    #[must_use]
    pub fn get_index(&self, index: usize) -> Option<&str> {
        self.inner.get(index).map(|(_, v)| v.as_str())
    }

    /// Returns true if nothing was captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns the number of captures.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns an iterator over `(name, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.inner.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_get() {
        let mut captures = Captures::new();
        assert!(captures.is_empty());

        captures.push("id", "42");
        captures.push("id", "43");

        assert_eq!(captures.len(), 2);
        assert_eq!(captures.get("id"), Some("42"));
        assert_eq!(captures.get_index(1), Some("43"));
        assert_eq!(captures.get_index(2), None);
    }

    #[test]
    fn test_iter_in_order() {
        let mut captures = Captures::new();
        captures.push("a", "1");
        captures.push("b", "2");
        assert_eq!(captures.iter().collect::<Vec<_>>(), vec![("a", "1"), ("b", "2")]);
    }
}
