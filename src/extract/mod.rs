//! Extractors for the router's status pages
//!
//! The admin pages carry their data as array literals inside inline
//! `<script>` blocks. Each extractor takes one raw page body and returns typed
//! records; none of them touch the network or the session.
//!
//! - `wan`: WAN receive/transmit totals from the status page
//! - `wireless`: name/MAC/IP/lease rows from the DHCP client list
//! - `stats`: per-host packet and byte counters from the statistics page

mod lease;
mod script;
mod stats;
mod wan;
mod wireless;

pub use lease::parse_lease;
pub use script::script_text;
pub use stats::extract_stats_records;
pub use wan::extract_wan_counters;
pub use wireless::extract_wireless_records;
