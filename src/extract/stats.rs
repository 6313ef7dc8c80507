//! Per-host traffic statistics extraction
//!
//! Rows on the statistics page look like
//! `1, "192.168.0.100", "AA-BB-CC-DD-EE-01", 5120, 3145728, ...` where the
//! numbers after the addresses are total packets and total bytes.

use crate::extract::script_text;
use crate::model::{canonical_mac, StatsRecord};
use crate::{RouterError, RouterResult};
use regex::Regex;
use std::sync::OnceLock;

fn record_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"\d+,\s*"([^"]*)",\s*"([^"]*)",\s*(\d+),\s*(\d+)"#)
            .expect("statistics record regex should compile")
    })
}

/// Extracts every host row from the statistics page
///
/// A page without rows yields an empty list.
///
/// # Errors
///
/// * `RouterError::Parse` - a packet or byte count does not fit in a `u64`
pub fn extract_stats_records(body: &str) -> RouterResult<Vec<StatsRecord>> {
    let text = script_text(body);
    let mut records = Vec::new();

    for captures in record_pattern().captures_iter(&text) {
        let record = StatsRecord {
            ip: captures[1].trim().to_string(),
            mac: canonical_mac(&captures[2]),
            packets: parse_count(&captures[3], "packet count")?,
            bytes: parse_count(&captures[4], "byte count")?,
        };
        tracing::trace!("Stats row: {:?}", record);
        records.push(record);
    }

    Ok(records)
}

fn parse_count(raw: &str, field: &'static str) -> RouterResult<u64> {
    raw.parse::<u64>().map_err(|_| RouterError::Parse {
        field,
        value: raw.to_string(),
    })
}
