//! Lens metadata.
//!
//! Every lens carries a [`Meta`] describing where its value lives and under
//! which name. The metadata is what a [`Failure`](crate::Failure) reports, so
//! callers can tell exactly which part of a message broke the contract.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::Serialize;

/// Where in a message a lens reads and writes its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Location {
    /// Query string parameters
    Query,
    /// HTTP headers
    Header,
    /// Captured path segments
    Path,
    /// Request cookies
    Cookie,
    /// The message body
    Body,
    /// Fields of a decoded web form
    Form,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Query => write!(f, "query"),
            Self::Header => write!(f, "header"),
            Self::Path => write!(f, "path"),
            Self::Cookie => write!(f, "cookie"),
            Self::Body => write!(f, "body"),
            Self::Form => write!(f, "form"),
        }
    }
}

/// Describes a lens: its location, name, and whether a value is required.
///
/// Two metas are equal when they share location and name; the required flag
/// and description are informational.
///
/// # Example
///
/// ```rust
/// use covenant_lens::{Location, Meta};
///
/// let meta = Meta::new(Location::Header, "hello", true);
/// assert_eq!(meta.to_string(), "Required header 'hello'");
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct Meta {
    location: Location,
    name: String,
    required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

impl Meta {
    /// Creates metadata without a description.
    #[must_use]
    pub fn new(location: Location, name: impl Into<String>, required: bool) -> Self {
        Self {
            location,
            name: name.into(),
            required,
            description: None,
        }
    }

    /// Attaches a human-readable description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Returns the location.
    #[must_use]
    pub fn location(&self) -> Location {
        self.location
    }

    /// Returns the name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns true if the lens requires a value.
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

impl PartialEq for Meta {
    fn eq(&self, other: &Self) -> bool {
        self.location == other.location && self.name == other.name
    }
}

impl Eq for Meta {}

impl Hash for Meta {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.location.hash(state);
        self.name.hash(state);
    }
}

impl fmt::Display for Meta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cardinality = if self.required { "Required" } else { "Optional" };
        write!(f, "{cardinality} {} '{}'", self.location, self.name)
    }
}
