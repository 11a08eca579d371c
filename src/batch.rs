//! Splits an oversized delta into capped sub-operations and waits on each.
//!
//! Some structural changes are capped per call by the remote API (node
//! reduction accepts at most 10 nodes per request, for example) while the
//! user asks for the full delta at once. The orchestrator splits the delta
//! deterministically and drives each sub-operation to completion before
//! issuing the next, because the remote resource rejects a second
//! structural change while one is in flight.

use std::future::Future;
use std::num::NonZeroU32;

use crate::order::OrderedOperation;
use crate::outcome::Outcome;

/// Unit counts for each sub-operation: full batches of `max_per_call`
/// first, any remainder as the final call.
pub fn batch_sizes(total: NonZeroU32, max_per_call: NonZeroU32) -> Vec<u32> {
    let total = total.get();
    let max = max_per_call.get();
    let mut sizes = vec![max; (total / max) as usize];
    let remainder = total % max;
    if remainder > 0 {
        sizes.push(remainder);
    }
    sizes
}

/// Apply a delta of `total` units in sequential sub-operations of at most
/// `max_per_call` units each.
///
/// `issue` triggers one sub-operation for the given unit count and returns
/// the [`OrderedOperation`] to wait on; an error from `issue` surfaces as
/// [`Outcome::QueryError`]. The first non-success outcome stops the
/// sequence and is returned verbatim. Already-applied batches are not
/// rolled back; partial progress is permanent and visible to the caller.
/// On success the last batch's payload is returned.
pub async fn apply_in_batches<'a, T, E, F, Fut>(
    total: NonZeroU32,
    max_per_call: NonZeroU32,
    mut issue: F,
) -> Outcome<T, E>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<OrderedOperation<'a, T, E>, E>>,
{
    let sizes = batch_sizes(total, max_per_call);
    let batches = sizes.len();

    for (i, units) in sizes.into_iter().enumerate() {
        tracing::debug!("issuing sub-operation {}/{} for {} units", i + 1, batches, units);

        let op = match issue(units).await {
            Ok(op) => op,
            Err(cause) => return Outcome::QueryError(cause),
        };

        let outcome = op.wait().await;
        if i + 1 == batches || !outcome.is_succeeded() {
            return outcome;
        }
    }

    // A non-zero total always plans at least one batch, and the final
    // iteration above returns.
    unreachable!("apply_in_batches issued no sub-operations")
}
