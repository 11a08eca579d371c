//! The status-query boundary between the poller core and a remote API.

use futures::future::BoxFuture;

/// Result of a single status query against the remote system.
///
/// A status query is any `FnMut` closure returning a future of
/// `Result<PollResult<T>, E>`, typically capturing a client handle and a
/// resource identifier. Implementations must translate the remote API's
/// "no such resource" condition into [`PollResult::NotFound`] rather than
/// an error; the wait loop relies on that distinction to decide deletion
/// semantics. Any other query failure is reported through `Err` and ends
/// the wait immediately — the poller core does not retry failed queries,
/// so callers needing resilience wrap the query with their own retry
/// policy. A query should not block longer than a single network round
/// trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollResult<T> {
    /// The resource exists and reported `status`.
    Found { status: String, payload: T },
    /// The remote system has no record of the resource.
    NotFound,
}

impl<T> PollResult<T> {
    pub fn found(status: impl Into<String>, payload: T) -> Self {
        PollResult::Found {
            status: status.into(),
            payload,
        }
    }
}

/// Boxed status query, for the layers that store a query in a struct
/// instead of taking it through generics.
pub type BoxStatusQuery<'a, T, E> =
    Box<dyn FnMut() -> BoxFuture<'a, Result<PollResult<T>, E>> + Send + 'a>;
