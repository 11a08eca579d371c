//! Sequencing behaviour of the batch orchestrator.

use std::num::NonZeroU32;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use waitstate::{
    apply_in_batches, BillingOrder, OrderedOperation, Outcome, PollResult, WaitConfig,
};

fn nz(n: u32) -> NonZeroU32 {
    NonZeroU32::new(n).unwrap()
}

fn reduce_wait() -> WaitConfig {
    WaitConfig::new(["REDUCING"], ["available"])
        .timeout(Duration::from_secs(60))
        .poll_interval(Duration::ZERO)
}

#[tokio::test(start_paused = true)]
async fn splits_the_delta_with_the_remainder_last() {
    let issued = Arc::new(Mutex::new(Vec::new()));
    let rec = Arc::clone(&issued);

    let outcome = apply_in_batches(nz(23), nz(10), move |units| {
        let rec = Arc::clone(&rec);
        async move {
            rec.lock().unwrap().push(units);
            Ok::<_, String>(OrderedOperation::new(reduce_wait(), move || async move {
                Ok(PollResult::found("available", units))
            }))
        }
    })
    .await;

    assert_eq!(*issued.lock().unwrap(), vec![10, 10, 3]);
    // The payload is the last batch's, and the last batch is the remainder.
    assert_eq!(outcome, Outcome::Succeeded(3));
}

#[tokio::test(start_paused = true)]
async fn exact_multiple_issues_no_remainder_call() {
    let issued = Arc::new(Mutex::new(Vec::new()));
    let rec = Arc::clone(&issued);

    let outcome = apply_in_batches(nz(20), nz(10), move |units| {
        let rec = Arc::clone(&rec);
        async move {
            rec.lock().unwrap().push(units);
            Ok::<_, String>(OrderedOperation::new(reduce_wait(), move || async move {
                Ok(PollResult::found("available", units))
            }))
        }
    })
    .await;

    assert_eq!(*issued.lock().unwrap(), vec![10, 10]);
    assert_eq!(outcome, Outcome::Succeeded(10));
}

#[tokio::test(start_paused = true)]
async fn stops_at_the_first_failed_batch() {
    let issued = Arc::new(Mutex::new(Vec::new()));
    let rec = Arc::clone(&issued);

    let outcome = apply_in_batches(nz(23), nz(10), move |units| {
        let rec = Arc::clone(&rec);
        async move {
            let batch = {
                let mut rec = rec.lock().unwrap();
                rec.push(units);
                rec.len()
            };
            Ok::<_, String>(OrderedOperation::new(reduce_wait(), move || async move {
                if batch == 2 {
                    Ok(PollResult::found("REDUCE_FAILED", units))
                } else {
                    Ok(PollResult::found("available", units))
                }
            }))
        }
    })
    .await;

    // The third sub-operation is never issued and the failing batch's
    // outcome is surfaced verbatim. The first batch stays applied.
    assert_eq!(*issued.lock().unwrap(), vec![10, 10]);
    assert_eq!(
        outcome,
        Outcome::Failed {
            status: "REDUCE_FAILED".to_string(),
            payload: 10,
        }
    );
}

#[tokio::test(start_paused = true)]
async fn issue_failure_surfaces_as_a_query_error() {
    let issued = Arc::new(Mutex::new(Vec::new()));
    let rec = Arc::clone(&issued);

    let outcome = apply_in_batches(nz(23), nz(10), move |units| {
        let rec = Arc::clone(&rec);
        async move {
            let batch = {
                let mut rec = rec.lock().unwrap();
                rec.push(units);
                rec.len()
            };
            if batch == 2 {
                return Err("quota exceeded".to_string());
            }
            Ok(OrderedOperation::new(reduce_wait(), move || async move {
                Ok(PollResult::found("available", units))
            }))
        }
    })
    .await;

    assert_eq!(*issued.lock().unwrap(), vec![10, 10]);
    assert_eq!(outcome, Outcome::QueryError("quota exceeded".to_string()));
}

#[tokio::test(start_paused = true)]
async fn each_batch_settles_its_own_order_first() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let issue_log = Arc::clone(&log);

    let outcome = apply_in_batches(nz(12), nz(10), move |units| {
        let log = Arc::clone(&issue_log);
        async move {
            let order_id = format!("CS-{units}");
            let billing_log = Arc::clone(&log);
            let status_log = Arc::clone(&log);
            let order = BillingOrder::new(
                &order_id,
                WaitConfig::new(["PROCESSING"], ["COMPLETED"]).poll_interval(Duration::ZERO),
                move || {
                    billing_log.lock().unwrap().push(format!("order:{units}"));
                    async move { Ok(PollResult::found("COMPLETED", ())) }
                },
            );
            Ok::<_, String>(
                OrderedOperation::new(reduce_wait(), move || {
                    status_log.lock().unwrap().push(format!("status:{units}"));
                    async move { Ok(PollResult::found("available", units)) }
                })
                .with_order(order),
            )
        }
    })
    .await;

    assert_eq!(outcome, Outcome::Succeeded(2));
    // Strictly sequential: each batch's order settles before its status
    // wait, and batch 10 finishes entirely before batch 2 starts.
    assert_eq!(
        *log.lock().unwrap(),
        vec!["order:10", "status:10", "order:2", "status:2"]
    );
}
