//! Output module for publishing snapshots
//!
//! This module handles:
//! - Rendering a snapshot in the Prometheus text exposition format
//! - Serving `/metrics` (and `/reboot`) over HTTP in either collection mode

pub mod prometheus;
mod server;

pub use prometheus::render;
pub use server::{build_app, serve, AppState};
