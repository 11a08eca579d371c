//! Error types for waitstate

/// Error form of a non-successful [`Outcome`](crate::Outcome), for callers
/// that propagate waits with `?`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WaitError<E> {
    #[error("operation ended in unexpected status {status:?}")]
    UnexpectedStatus { status: String },

    #[error("timed out waiting for operation to reach a target status")]
    TimedOut,

    #[error("status query failed: {0}")]
    Query(E),

    #[error("resource not found")]
    NotFound,

    #[error("billing order ended in status {status:?}")]
    OrderFailed { status: String },

    #[error("billing order succeeded but the requested change is not reflected on the resource")]
    OrderNotReflected,
}
