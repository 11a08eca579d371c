//! Terminal results of a wait.

use crate::error::WaitError;

/// Terminal result of waiting on a remote state transition.
///
/// Only [`Outcome::Succeeded`] and [`Outcome::Deleted`] mean the wait ended
/// the way the caller asked for; everything else is surfaced for the caller
/// to decide on, never retried internally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T, E> {
    /// The operation reached a target status.
    Succeeded(T),
    /// The resource disappeared while polling and the wait was configured
    /// to treat not-found as deletion.
    Deleted,
    /// The operation reached a status in neither the pending nor the target
    /// set. Not assumed recoverable; the remote status is surfaced verbatim
    /// so the caller can report it.
    Failed { status: String, payload: T },
    /// Still pending when the wait budget ran out. Distinct from `Failed`:
    /// the remote operation may yet complete out of band.
    TimedOut,
    /// A status query, verification fetch or sub-operation request failed.
    QueryError(E),
    /// The resource was not found and the wait was not configured to treat
    /// that as deletion.
    UnexpectedNotFound,
    /// The billing order attached to the operation reached a terminal state
    /// other than success.
    OrderFailed { status: String },
    /// The billing order settled but the requested change is not visible on
    /// the resource. Indicates billing/infrastructure desynchronization and
    /// is always a hard error.
    OrderNotReflected,
}

impl<T, E> Outcome<T, E> {
    pub fn is_succeeded(&self) -> bool {
        matches!(self, Outcome::Succeeded(_))
    }

    /// Payload of a successful wait, if there was one.
    pub fn succeeded(self) -> Option<T> {
        match self {
            Outcome::Succeeded(payload) => Some(payload),
            _ => None,
        }
    }

    /// Convert into a `Result` for callers that treat anything but success
    /// as fatal. [`Outcome::Deleted`] maps to `Ok(None)` since a delete
    /// wait ends exactly that way.
    pub fn into_result(self) -> Result<Option<T>, WaitError<E>> {
        match self {
            Outcome::Succeeded(payload) => Ok(Some(payload)),
            Outcome::Deleted => Ok(None),
            Outcome::Failed { status, .. } => Err(WaitError::UnexpectedStatus { status }),
            Outcome::TimedOut => Err(WaitError::TimedOut),
            Outcome::QueryError(cause) => Err(WaitError::Query(cause)),
            Outcome::UnexpectedNotFound => Err(WaitError::NotFound),
            Outcome::OrderFailed { status } => Err(WaitError::OrderFailed { status }),
            Outcome::OrderNotReflected => Err(WaitError::OrderNotReflected),
        }
    }
}
