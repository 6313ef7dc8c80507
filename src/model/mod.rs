//! Data model for one scrape cycle
//!
//! # Components
//!
//! - `WirelessRecord` / `StatsRecord`: partial per-page client records
//! - `Client`: a reconciled device keyed by canonical hardware address
//! - `WanCounters` / `Snapshot`: what a finished cycle publishes

mod client;
mod snapshot;

pub use client::{canonical_mac, Client, StatsRecord, WirelessRecord, UNKNOWN_CLIENT_NAME};
pub use snapshot::{Snapshot, WanCounters};
