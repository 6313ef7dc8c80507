//! Client reconciliation
//!
//! Merges the wireless client list and the traffic statistics into a single
//! client set keyed by canonical hardware address, then applies display-name
//! overrides.

use crate::model::{Client, StatsRecord, WirelessRecord};
use crate::naming::NamingTable;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

/// What to do with a wireless client that has no statistics row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnmatchedWireless {
    /// Keep the client with zero packets and zero kilobytes
    #[default]
    Retain,
    /// Leave the client out of the result
    Drop,
}

/// Merges both sources, keeping wireless-only clients
///
/// See [`merge_with_policy`].
pub fn merge(wireless: &[WirelessRecord], stats: &[StatsRecord]) -> Vec<Client> {
    merge_with_policy(wireless, stats, UnmatchedWireless::Retain)
}

/// Merges wireless and statistics records into one client per hardware address
///
/// - address on both pages: wireless name, IP and lease with the statistics
///   packet and byte counts
/// - statistics only: placeholder name and lease 0
/// - wireless only: handled according to `unmatched`
///
/// Duplicate addresses inside one source collapse to a single record chosen
/// by value, so the output does not depend on input order. The result is
/// sorted by hardware address.
pub fn merge_with_policy(
    wireless: &[WirelessRecord],
    stats: &[StatsRecord],
    unmatched: UnmatchedWireless,
) -> Vec<Client> {
    let wireless_by_mac = index_wireless(wireless);
    let stats_by_mac = index_stats(stats);

    let mut clients: BTreeMap<&str, Client> = BTreeMap::new();

    for (mac, stats) in &stats_by_mac {
        let client = match wireless_by_mac.get(mac) {
            Some(wireless) => Client::from_both(wireless, stats),
            None => {
                tracing::debug!("No wireless entry for {}, using placeholder name", mac);
                Client::from_stats(stats)
            }
        };
        clients.insert(*mac, client);
    }

    if unmatched == UnmatchedWireless::Retain {
        for (mac, wireless) in &wireless_by_mac {
            if !stats_by_mac.contains_key(mac) {
                tracing::debug!("No traffic statistics for {}, reporting zero", mac);
                clients.insert(*mac, Client::from_wireless(wireless));
            }
        }
    }

    clients.into_values().collect()
}

fn index_wireless(records: &[WirelessRecord]) -> BTreeMap<&str, &WirelessRecord> {
    let mut index: BTreeMap<&str, &WirelessRecord> = BTreeMap::new();
    for record in records {
        match index.entry(record.mac.as_str()) {
            Entry::Vacant(slot) => {
                slot.insert(record);
            }
            Entry::Occupied(mut slot) => {
                let key = |r: &WirelessRecord| (r.lease_secs, r.name.clone(), r.ip.clone());
                if key(record) > key(*slot.get()) {
                    slot.insert(record);
                }
            }
        }
    }
    index
}

fn index_stats(records: &[StatsRecord]) -> BTreeMap<&str, &StatsRecord> {
    let mut index: BTreeMap<&str, &StatsRecord> = BTreeMap::new();
    for record in records {
        match index.entry(record.mac.as_str()) {
            Entry::Vacant(slot) => {
                slot.insert(record);
            }
            Entry::Occupied(mut slot) => {
                let key = |r: &StatsRecord| (r.bytes, r.packets, r.ip.clone());
                if key(record) > key(*slot.get()) {
                    slot.insert(record);
                }
            }
        }
    }
    index
}

/// Replaces display names with operator overrides where one matches
///
/// Exact-address entries win over vendor-prefix entries. Clients without a
/// matching entry keep their current name.
pub fn apply_naming(clients: &mut [Client], naming: &NamingTable) {
    for client in clients.iter_mut() {
        if let Some(name) = naming.lookup(&client.mac) {
            tracing::trace!("Renaming {} from {:?} to {:?}", client.mac, client.name, name);
            client.name = name.to_string();
        }
    }
}
