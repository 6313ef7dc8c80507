//! Wireless/DHCP client list extraction
//!
//! The client list page embeds rows as four consecutive quoted strings:
//! `"name", "AA-BB-CC-DD-EE-FF", "192.168.0.100", "01:23:45"`.

use crate::extract::{parse_lease, script_text};
use crate::model::{canonical_mac, WirelessRecord};
use regex::Regex;
use std::sync::OnceLock;

fn record_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#""([^"]*)",\s*"([^"]*)",\s*"([^"]*)",\s*"([^"]*)""#)
            .expect("wireless record regex should compile")
    })
}

fn mac_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[0-9A-Fa-f]{2}([-:][0-9A-Fa-f]{2}){5}$")
            .expect("hardware address regex should compile")
    })
}

/// Extracts every client row from the client list page
///
/// Four-string groups whose second field is not a hardware address are
/// skipped. A page without rows yields an empty list.
pub fn extract_wireless_records(body: &str) -> Vec<WirelessRecord> {
    let text = script_text(body);
    let mut records = Vec::new();

    for captures in record_pattern().captures_iter(&text) {
        let mac = captures[2].trim();
        if !mac_pattern().is_match(mac) {
            tracing::trace!("Skipping non-client quoted group: {}", &captures[0]);
            continue;
        }

        let record = WirelessRecord {
            name: captures[1].trim().to_string(),
            mac: canonical_mac(mac),
            ip: captures[3].trim().to_string(),
            lease_secs: parse_lease(&captures[4]),
        };
        tracing::trace!("Wireless client: {:?}", record);
        records.push(record);
    }

    records
}
