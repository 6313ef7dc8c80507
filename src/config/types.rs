use clap::ValueEnum;
use serde::Deserialize;
use std::time::Duration;

/// Main configuration structure for the exporter
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub router: RouterConfig,
    pub exporter: ExporterConfig,
    pub naming: NamingConfig,
}

/// Router identity and transport settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Host (optionally with port or scheme) of the router's web interface
    pub address: String,

    pub username: String,

    pub password: String,

    /// Timeout applied to every request (milliseconds)
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,
}

impl RouterConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            address: "192.168.0.1".to_string(),
            username: "admin".to_string(),
            password: "admin".to_string(),
            timeout_ms: 2000,
        }
    }
}

/// How scrape cycles are triggered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CollectionMode {
    /// One cycle per incoming scrape request, retried once on failure
    Pull,
    /// Cycles on a fixed interval; requests read the latest snapshot
    Timer,
}

/// Metrics endpoint and cycle scheduling
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExporterConfig {
    #[serde(rename = "listen-address")]
    pub listen_address: String,

    #[serde(rename = "collection-mode")]
    pub collection_mode: CollectionMode,

    /// Wait between cycles in timer mode (seconds)
    #[serde(rename = "interval-secs")]
    pub interval_secs: u64,

    /// Log out of the router once a cycle has finished
    #[serde(rename = "logout-after-scrape")]
    pub logout_after_scrape: bool,
}

impl ExporterConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

impl Default for ExporterConfig {
    fn default() -> Self {
        Self {
            listen_address: "0.0.0.0:9300".to_string(),
            collection_mode: CollectionMode::Pull,
            interval_secs: 60,
            logout_after_scrape: false,
        }
    }
}

/// Display-name override database
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NamingConfig {
    /// Path to the `key=value` MAC database; empty disables lookups
    #[serde(rename = "database-path")]
    pub database_path: String,
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            database_path: "/etc/known_macs".to_string(),
        }
    }
}
