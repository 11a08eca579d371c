//! Poller core: drives one remote operation to a terminal state.

use std::future::Future;
use std::time::Duration;

use tokio::time::{sleep, Instant};

use crate::outcome::Outcome;
use crate::poll::PollResult;

/// One wait on a remote state transition.
///
/// A config is built right before the wait, consumed by
/// [`WaitConfig::wait`] and discarded; it owns no resources. The pending
/// and target sets must be disjoint.
#[derive(Debug, Clone)]
pub struct WaitConfig {
    pending: Vec<String>,
    target: Vec<String>,
    not_found_means_deleted: bool,
    timeout: Duration,
    initial_delay: Duration,
    poll_interval: Duration,
}

impl WaitConfig {
    /// Wait budget used when none is configured.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10 * 60);
    /// Pause between successive polls used when none is configured.
    pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(10);

    /// Describe a wait by its in-progress and successfully-complete
    /// statuses. A target set may be empty for waits that only end by
    /// deletion.
    pub fn new<P, Q>(pending: P, target: Q) -> Self
    where
        P: IntoIterator,
        P::Item: Into<String>,
        Q: IntoIterator,
        Q::Item: Into<String>,
    {
        let pending: Vec<String> = pending.into_iter().map(Into::into).collect();
        let target: Vec<String> = target.into_iter().map(Into::into).collect();
        debug_assert!(
            pending.iter().all(|s| !target.contains(s)),
            "pending and target status sets overlap"
        );
        Self {
            pending,
            target,
            not_found_means_deleted: false,
            timeout: Self::DEFAULT_TIMEOUT,
            initial_delay: Duration::ZERO,
            poll_interval: Self::DEFAULT_POLL_INTERVAL,
        }
    }

    /// Treat a not-found poll as the resource having been deleted, ending
    /// the wait as [`Outcome::Deleted`] instead of an error. Used by delete
    /// waits, where the remote record vanishes instead of reporting a
    /// terminal status.
    pub fn deleted_on_not_found(mut self) -> Self {
        self.not_found_means_deleted = true;
        self
    }

    /// Maximum wall-clock time to keep polling, measured from the first
    /// poll (after the initial delay).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Delay before the first poll, giving the asynchronous side effect
    /// time to propagate on the remote side.
    pub fn initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    /// Pause between successive polls. Zero is legal and polls as fast as
    /// the query returns, which can hammer the remote API; production call
    /// sites rely on generous fixed intervals (10-20s) rather than backoff.
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Poll `query` until the operation reaches a terminal state.
    ///
    /// The timeout is checked only after a poll has been evaluated, so even
    /// a timeout shorter than the initial delay performs one poll before
    /// giving up; the last poll may overshoot the budget by at most one
    /// poll interval. The calling task blocks for the full duration;
    /// cancellation is the ambient context's job (drop the future or wrap
    /// it in `tokio::time::timeout`).
    pub async fn wait<T, E, F, Fut>(self, mut query: F) -> Outcome<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<PollResult<T>, E>>,
    {
        tracing::debug!(
            "waiting for state change: pending={:?} target={:?} timeout={:?}",
            self.pending,
            self.target,
            self.timeout
        );

        if !self.initial_delay.is_zero() {
            sleep(self.initial_delay).await;
        }

        let started = Instant::now();
        loop {
            match query().await {
                Err(cause) => return Outcome::QueryError(cause),
                Ok(PollResult::NotFound) => {
                    return if self.not_found_means_deleted {
                        Outcome::Deleted
                    } else {
                        Outcome::UnexpectedNotFound
                    };
                }
                Ok(PollResult::Found { status, payload }) => {
                    if self.target.iter().any(|t| *t == status) {
                        return Outcome::Succeeded(payload);
                    }
                    if !self.pending.iter().any(|p| *p == status) {
                        // Unexpected terminal status; not assumed recoverable.
                        return Outcome::Failed { status, payload };
                    }
                    tracing::debug!("operation still pending in status {:?}", status);
                }
            }

            if started.elapsed() >= self.timeout {
                return Outcome::TimedOut;
            }
            sleep(self.poll_interval).await;
        }
    }
}
