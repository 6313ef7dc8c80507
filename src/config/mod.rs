//! Configuration module for the exporter
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every section is optional; missing keys fall back to the router's factory
//! defaults.
//!
//! # Example
//!
//! ```no_run
//! use tplink_exporter::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("exporter.toml")).unwrap();
//! println!("Scraping router at {}", config.router.address);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{CollectionMode, Config, ExporterConfig, NamingConfig, RouterConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use validation::validate;
