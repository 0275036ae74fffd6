//! Route definition errors.

use thiserror::Error;

use crate::MAX_CAPTURES;

/// Errors raised while defining routes or routers.
///
/// Requests that do not match are not errors (`match_request` returns
/// `None`), and requests that match but fail validation produce a
/// [`ContractBreach`](covenant_lens::ContractBreach).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// A route spec already binds the maximum number of path captures.
    #[error("unsupported composition: a route binds at most {} path captures", MAX_CAPTURES)]
    UnsupportedComposition,

    /// A configured status code is not a valid HTTP status.
    #[error("invalid status code: {0}")]
    InvalidStatus(u16),
}
