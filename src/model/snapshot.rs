use crate::model::Client;
use chrono::{DateTime, Utc};
use std::time::Duration;

/// WAN interface totals for the current cycle, in kilobytes
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WanCounters {
    pub rx_kbytes: f64,
    pub tx_kbytes: f64,
}

/// Everything one successful scrape cycle produced
///
/// A snapshot is built from a single cycle and never merged with earlier
/// ones. Clients are sorted by hardware address.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub wan: WanCounters,
    pub clients: Vec<Client>,
    pub taken_at: DateTime<Utc>,
    /// Wall-clock time the cycle took, login included
    pub duration: Duration,
}

impl Snapshot {
    /// Looks up a client by canonical hardware address
    pub fn client(&self, mac: &str) -> Option<&Client> {
        self.clients
            .binary_search_by(|c| c.mac.as_str().cmp(mac))
            .ok()
            .map(|idx| &self.clients[idx])
    }
}
