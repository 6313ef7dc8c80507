//! tplink-exporter: Prometheus exporter for TP-Link web-admin routers
//!
//! This crate logs into the router's HTML administration interface, scrapes
//! the WAN counters and the connected-client pages, reconciles the client
//! lists by hardware address and exposes the result as a snapshot.

pub mod collector;
pub mod config;
pub mod extract;
pub mod model;
pub mod naming;
pub mod output;
pub mod reconcile;
pub mod router;

use thiserror::Error;

/// Main error type for exporter operations
#[derive(Debug, Error)]
pub enum ExporterError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Router error: {0}")]
    Router(#[from] RouterError),

    #[error("Scrape failed: {0}")]
    Scrape(#[from] collector::ScrapeError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while talking to the router or reading its pages
#[derive(Debug, Error)]
pub enum RouterError {
    /// Login response did not contain exactly one session token
    #[error("Session token not found in login response:\n{body}")]
    Auth { body: String },

    /// Connection failure, timeout or non-success status
    #[error("Request to {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("Extraction error: {0}")]
    Extraction(String),

    #[error("Cannot parse {field} from {value:?}")]
    Parse { field: &'static str, value: String },

    #[error("No session token; log in first")]
    NotLoggedIn,

    #[error("Invalid router address: {0}")]
    Address(String),

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid router address in config: {0}")]
    InvalidAddress(String),
}

/// Result type alias for exporter operations
pub type Result<T> = std::result::Result<T, ExporterError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for router operations
pub type RouterResult<T> = std::result::Result<T, RouterError>;

// Re-export commonly used types
pub use collector::{Collector, CycleStage, ScrapeError};
pub use config::Config;
pub use model::{Client, Snapshot, WanCounters};
pub use naming::NamingTable;
