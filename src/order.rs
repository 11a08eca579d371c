//! Billing-order reconciliation layered on the poller core.
//!
//! Some remote operations are asynchronously billed: the change request
//! returns an order identifier and the infrastructure change only starts
//! once that order settles. Waiting such an operation out takes up to
//! three steps: the billing order, the resource status, and a final check
//! that the requested change actually took effect, since billing success
//! does not guarantee the underlying change completed.

use std::future::Future;

use futures::future::BoxFuture;
use futures::FutureExt;

use crate::outcome::Outcome;
use crate::poll::{BoxStatusQuery, PollResult};
use crate::wait::WaitConfig;

/// Asynchronous billing order attached to a remote change, with its own
/// wait budget and status query.
pub struct BillingOrder<'a, E> {
    order_id: String,
    wait: WaitConfig,
    query: BoxStatusQuery<'a, (), E>,
}

impl<'a, E> BillingOrder<'a, E> {
    pub fn new<F, Fut>(order_id: impl Into<String>, wait: WaitConfig, mut query: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'a,
        Fut: Future<Output = Result<PollResult<()>, E>> + Send + 'a,
    {
        Self {
            order_id: order_id.into(),
            wait,
            query: Box::new(move || query().boxed()),
        }
    }
}

/// Re-fetches the resource and reports whether the requested change is
/// visible on it.
pub type BoxVerify<'a, E> = Box<dyn FnMut() -> BoxFuture<'a, Result<bool, E>> + Send + 'a>;

/// One remote change plus everything needed to wait it out: an optional
/// billing order, the resource-status wait, and an optional verification
/// of the final state.
pub struct OrderedOperation<'a, T, E> {
    order: Option<BillingOrder<'a, E>>,
    wait: WaitConfig,
    query: BoxStatusQuery<'a, T, E>,
    verify: Option<BoxVerify<'a, E>>,
}

impl<'a, T, E> OrderedOperation<'a, T, E> {
    pub fn new<F, Fut>(wait: WaitConfig, mut query: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'a,
        Fut: Future<Output = Result<PollResult<T>, E>> + Send + 'a,
    {
        Self {
            order: None,
            wait,
            query: Box::new(move || query().boxed()),
            verify: None,
        }
    }

    /// Attach a billing order that must settle before the resource wait
    /// starts.
    pub fn with_order(mut self, order: BillingOrder<'a, E>) -> Self {
        self.order = Some(order);
        self
    }

    /// Attach a verification step. It runs after both waits succeed, and
    /// only when a billing order was attached; unbilled changes are already
    /// confirmed by the status wait itself.
    pub fn with_verify<F, Fut>(mut self, mut verify: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'a,
        Fut: Future<Output = Result<bool, E>> + Send + 'a,
    {
        self.verify = Some(Box::new(move || verify().boxed()));
        self
    }

    /// Wait for the billing order (if any) to settle, then for the
    /// resource to reach a target status, then verify the change.
    ///
    /// A non-success order wait short-circuits: the resource is never
    /// polled. A verification that reports the change missing yields
    /// [`Outcome::OrderNotReflected`].
    pub async fn wait(self) -> Outcome<T, E> {
        let OrderedOperation {
            order,
            wait,
            query,
            verify,
        } = self;

        let had_order = order.is_some();
        if let Some(order) = order {
            tracing::debug!("waiting for billing order {} to settle", order.order_id);
            match order.wait.wait(order.query).await {
                Outcome::Succeeded(()) => {}
                Outcome::Failed { status, .. } | Outcome::OrderFailed { status } => {
                    return Outcome::OrderFailed { status }
                }
                Outcome::Deleted => {
                    return Outcome::OrderFailed {
                        status: "deleted".to_string(),
                    }
                }
                Outcome::TimedOut => return Outcome::TimedOut,
                Outcome::QueryError(cause) => return Outcome::QueryError(cause),
                Outcome::UnexpectedNotFound => return Outcome::UnexpectedNotFound,
                Outcome::OrderNotReflected => return Outcome::OrderNotReflected,
            }
        }

        let payload = match wait.wait(query).await {
            Outcome::Succeeded(payload) => payload,
            other => return other,
        };

        if had_order {
            if let Some(mut verify) = verify {
                match verify().await {
                    Ok(true) => {}
                    Ok(false) => return Outcome::OrderNotReflected,
                    Err(cause) => return Outcome::QueryError(cause),
                }
            }
        }

        Outcome::Succeeded(payload)
    }
}
