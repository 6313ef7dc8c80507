//! Display-name overrides for known devices
//!
//! Operators can keep a `key=value` file mapping hardware addresses (or the
//! 8-character vendor prefix of an address, e.g. `AA-BB-CC`) to friendly
//! names. The table only ever changes how a client is labelled; it never
//! affects which clients exist.

mod parser;

pub use parser::parse_naming_database;

use crate::model::canonical_mac;
use std::collections::HashMap;
use std::path::Path;

/// Length of a vendor-prefix key such as `AA-BB-CC`
pub const VENDOR_PREFIX_LEN: usize = 8;

/// Exact-address and vendor-prefix name overrides
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamingTable {
    exact: HashMap<String, String>,
    vendor: HashMap<String, String>,
}

impl NamingTable {
    /// Builds a table from `(key, name)` pairs
    ///
    /// Keys of exactly [`VENDOR_PREFIX_LEN`] characters become vendor
    /// prefixes; all others are exact addresses.
    pub fn from_entries<K, V, I>(entries: I) -> Self
    where
        K: AsRef<str>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut table = Self::default();
        for (key, name) in entries {
            table.insert(key.as_ref(), name.into());
        }
        table
    }

    fn insert(&mut self, key: &str, name: String) {
        let key = canonical_mac(key);
        if key.chars().count() == VENDOR_PREFIX_LEN {
            self.vendor.insert(key, name);
        } else {
            self.exact.insert(key, name);
        }
    }

    /// Reads a naming database from disk
    pub fn load(path: &Path) -> std::io::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(parse_naming_database(&content))
    }

    /// Reads a naming database, falling back to an empty table
    ///
    /// An empty path disables lookups. A missing or unreadable file is logged
    /// and treated as empty.
    pub fn load_or_empty(path: &str) -> Self {
        if path.is_empty() {
            return Self::default();
        }

        match Self::load(Path::new(path)) {
            Ok(table) => {
                tracing::info!(
                    "Loaded {} custom and {} vendor names from {}",
                    table.exact_len(),
                    table.vendor_len(),
                    path
                );
                table
            }
            Err(e) => {
                tracing::warn!("Unable to load MAC database {}: {}", path, e);
                Self::default()
            }
        }
    }

    /// Returns the override for a hardware address, if any
    pub fn lookup(&self, mac: &str) -> Option<&str> {
        let mac = canonical_mac(mac);
        if let Some(name) = self.exact.get(&mac) {
            return Some(name.as_str());
        }
        vendor_prefix(&mac)
            .and_then(|prefix| self.vendor.get(prefix))
            .map(String::as_str)
    }

    pub fn exact_len(&self) -> usize {
        self.exact.len()
    }

    pub fn vendor_len(&self) -> usize {
        self.vendor.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exact.is_empty() && self.vendor.is_empty()
    }
}

/// The first [`VENDOR_PREFIX_LEN`] characters of `mac`, if it has that many
fn vendor_prefix(mac: &str) -> Option<&str> {
    match mac.char_indices().nth(VENDOR_PREFIX_LEN) {
        Some((end, _)) => Some(&mac[..end]),
        None if mac.chars().count() == VENDOR_PREFIX_LEN => Some(mac),
        None => None,
    }
}
