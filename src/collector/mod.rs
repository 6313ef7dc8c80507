//! Scrape orchestration
//!
//! A scrape cycle walks a fixed sequence of stages (see [`CycleStage`]):
//! log in, fetch and extract the three pages, reconcile, publish. Any failure
//! aborts the cycle and nothing from it is published.
//!
//! Two bindings are offered, and a deployment picks exactly one:
//! - pull: [`Collector::scrape`] runs a cycle per request, retrying once
//! - timer: [`Collector::run_periodic`] runs cycles on an interval and
//!   publishes into a [`SnapshotStore`]

mod orchestrator;
mod retry;
mod stage;
mod timer;

pub use orchestrator::{Collector, ScrapeError, PULL_ATTEMPTS};
pub use retry::retry_bounded;
pub use stage::CycleStage;
pub use timer::SnapshotStore;
