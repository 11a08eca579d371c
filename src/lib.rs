//! waitstate - poll-until-stable waiting for asynchronous cloud operations
//!
//! Cloud APIs acknowledge a change long before it completes: an instance
//! stays in `creating` for minutes, a node reduction reports `REDUCING`, a
//! billing order settles out of band. This crate owns that wait. A
//! [`WaitConfig`] describes the pending and target statuses plus the timing
//! budget, a status-query closure fetches the current remote status, and
//! [`WaitConfig::wait`] polls until the operation succeeds, fails,
//! disappears or runs out of time.
//!
//! The wait is blocking from the caller's point of view: the calling task
//! is suspended for the full duration and nothing runs in the background.
//! Cancellation comes from the ambient context, by dropping the future or
//! wrapping it in `tokio::time::timeout`.
//!
//! ```no_run
//! use std::time::Duration;
//! use waitstate::{Outcome, PollResult, WaitConfig};
//!
//! # async fn demo(client: reqwest::Client, url: String) {
//! let outcome: Outcome<(), String> = WaitConfig::new(["creating"], ["normal"])
//!     .timeout(Duration::from_secs(30 * 60))
//!     .initial_delay(Duration::from_secs(120))
//!     .poll_interval(Duration::from_secs(20))
//!     .wait(move || {
//!         let client = client.clone();
//!         let url = url.clone();
//!         async move {
//!             let resp = client.get(&url).send().await.map_err(|e| e.to_string())?;
//!             if resp.status() == reqwest::StatusCode::NOT_FOUND {
//!                 return Ok(PollResult::NotFound);
//!             }
//!             let status = resp.text().await.map_err(|e| e.to_string())?;
//!             Ok(PollResult::found(status, ()))
//!         }
//!     })
//!     .await;
//!
//! match outcome {
//!     Outcome::Succeeded(_) => {}
//!     other => panic!("instance never became ready: {:?}", other),
//! }
//! # }
//! ```
//!
//! Two layers build on the core wait: [`apply_in_batches`] splits a delta
//! that exceeds the remote API's per-call cap into sequential
//! sub-operations, and [`OrderedOperation`] reconciles asynchronously
//! billed changes (order settlement, then resource status, then a check
//! that the change actually took effect).

pub mod batch;
pub mod error;
pub mod order;
pub mod outcome;
pub mod poll;
pub mod wait;

pub use batch::{apply_in_batches, batch_sizes};
pub use error::WaitError;
pub use order::{BillingOrder, OrderedOperation};
pub use outcome::Outcome;
pub use poll::{BoxStatusQuery, PollResult};
pub use wait::WaitConfig;
