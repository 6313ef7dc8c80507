//! Client record definitions
//!
//! The router reports connected devices on two pages that each know only part
//! of the picture. These types carry the partial records and the merged result.

/// Display name given to devices seen only in the traffic statistics
pub const UNKNOWN_CLIENT_NAME: &str = "Unknown";

/// Normalizes a hardware address into its canonical key form
///
/// Surrounding whitespace is removed and letters are upper-cased. Separators
/// are kept as the router printed them.
pub fn canonical_mac(mac: &str) -> String {
    mac.trim().to_ascii_uppercase()
}

/// One row of the wireless/DHCP client list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WirelessRecord {
    pub name: String,
    /// Canonical hardware address
    pub mac: String,
    pub ip: String,
    /// Remaining lease in seconds (0 for permanent or unparseable leases)
    pub lease_secs: u64,
}

/// One row of the per-host traffic statistics page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsRecord {
    pub ip: String,
    /// Canonical hardware address
    pub mac: String,
    pub packets: u64,
    pub bytes: u64,
}

impl StatsRecord {
    pub fn kbytes(&self) -> f64 {
        self.bytes as f64 / 1024.0
    }
}

/// A reconciled device
#[derive(Debug, Clone, PartialEq)]
pub struct Client {
    /// Canonical hardware address, unique within one snapshot
    pub mac: String,
    pub name: String,
    pub ip: String,
    pub lease_secs: u64,
    pub packets: u64,
    pub kbytes: f64,
}

impl Client {
    /// Combines the two sources for a device that appears on both pages
    pub fn from_both(wireless: &WirelessRecord, stats: &StatsRecord) -> Self {
        Self {
            mac: wireless.mac.clone(),
            name: wireless.name.clone(),
            ip: wireless.ip.clone(),
            lease_secs: wireless.lease_secs,
            packets: stats.packets,
            kbytes: stats.kbytes(),
        }
    }

    /// A device only present in the traffic statistics
    pub fn from_stats(stats: &StatsRecord) -> Self {
        Self {
            mac: stats.mac.clone(),
            name: UNKNOWN_CLIENT_NAME.to_string(),
            ip: stats.ip.clone(),
            lease_secs: 0,
            packets: stats.packets,
            kbytes: stats.kbytes(),
        }
    }

    /// A device only present in the wireless list; it has no traffic yet
    pub fn from_wireless(wireless: &WirelessRecord) -> Self {
        Self {
            mac: wireless.mac.clone(),
            name: wireless.name.clone(),
            ip: wireless.ip.clone(),
            lease_secs: wireless.lease_secs,
            packets: 0,
            kbytes: 0.0,
        }
    }
}
