//! Contract failures.
//!
//! A lens that cannot produce a value reports a [`Failure`]: the value is
//! either absent ([`Failure::Missing`]) or present but unconvertible
//! ([`Failure::Invalid`]). Failures travel inside a [`ContractBreach`], which
//! can hold several of them when a whole route is validated at once.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::Meta;

/// Error type accepted from conversion functions.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// A single way in which a message failed a lens.
///
/// Serializes as the lens metadata tagged with the failure kind:
/// `{"type": "missing", "location": "query", "name": "q", "required": true}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Failure {
    /// A required value was absent.
    Missing(Meta),
    /// A value was present but could not be converted.
    Invalid(Meta),
}

impl Failure {
    /// Returns the metadata of the lens that failed.
    #[must_use]
    pub fn meta(&self) -> &Meta {
        match self {
            Self::Missing(meta) | Self::Invalid(meta) => meta,
        }
    }

    /// Returns true for [`Failure::Missing`].
    #[must_use]
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing(_))
    }

    /// Returns true for [`Failure::Invalid`].
    #[must_use]
    pub fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid(_))
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing(meta) => write!(f, "{meta} is missing"),
            Self::Invalid(meta) => write!(f, "{meta} is invalid"),
        }
    }
}

/// The error returned when a message does not satisfy one or more lenses.
///
/// # Example
///
/// ```rust
/// use covenant_lens::{ContractBreach, Failure, Location, Meta};
///
/// let breach = ContractBreach::new(vec![
///     Failure::Missing(Meta::new(Location::Query, "q", true)),
///     Failure::Invalid(Meta::new(Location::Header, "page", true)),
/// ]);
///
/// assert_eq!(breach.failures().len(), 2);
/// assert_eq!(
///     breach.to_string(),
///     "contract breached: Required query 'q' is missing, Required header 'page' is invalid"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("contract breached: {}", join(.failures))]
pub struct ContractBreach {
    failures: Vec<Failure>,
}

impl ContractBreach {
    /// Creates a breach from failures, keeping their order.
    #[must_use]
    pub fn new(failures: Vec<Failure>) -> Self {
        Self { failures }
    }

    /// Creates a breach for a single missing value.
    #[must_use]
    pub fn missing(meta: Meta) -> Self {
        Self::new(vec![Failure::Missing(meta)])
    }

    /// Creates a breach for a single invalid value.
    #[must_use]
    pub fn invalid(meta: Meta) -> Self {
        Self::new(vec![Failure::Invalid(meta)])
    }

    /// Returns the failures in the order they were detected.
    #[must_use]
    pub fn failures(&self) -> &[Failure] {
        &self.failures
    }

    /// Consumes the breach, returning its failures.
    #[must_use]
    pub fn into_failures(self) -> Vec<Failure> {
        self.failures
    }

    /// Appends the failures of another breach.
    pub fn merge(&mut self, other: Self) {
        self.failures.extend(other.failures);
    }
}

impl From<Failure> for ContractBreach {
    fn from(failure: Failure) -> Self {
        Self::new(vec![failure])
    }
}

impl FromIterator<Failure> for ContractBreach {
    fn from_iter<I: IntoIterator<Item = Failure>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

fn join(failures: &[Failure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
