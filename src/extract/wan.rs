//! WAN counter extraction from the status page
//!
//! The status page declares `var statistList = new Array(` followed by the
//! byte totals as comma-grouped strings, e.g. `"1,234,567", "89,012"`.

use crate::extract::script_text;
use crate::model::WanCounters;
use crate::{RouterError, RouterResult};
use regex::Regex;
use std::sync::OnceLock;

fn statist_list_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"var statistList = new Array\(\s*"([^"]*)",\s*"([^"]*)""#)
            .expect("statistList regex should compile")
    })
}

/// Extracts WAN totals in kilobytes
///
/// The first array field is reported as transmitted, the second as received.
///
/// # Errors
///
/// * `RouterError::Extraction` - the array literal is missing or appears more
///   than once
/// * `RouterError::Parse` - a field is not a number once separators are removed
pub fn extract_wan_counters(body: &str) -> RouterResult<WanCounters> {
    let text = script_text(body);
    let matches: Vec<_> = statist_list_pattern().captures_iter(&text).collect();

    let [captures] = matches.as_slice() else {
        return Err(RouterError::Extraction(format!(
            "expected exactly one statistList array, found {}",
            matches.len()
        )));
    };

    let tx_bytes = parse_grouped_number(&captures[1], "WAN transmit bytes")?;
    let rx_bytes = parse_grouped_number(&captures[2], "WAN receive bytes")?;

    Ok(WanCounters {
        tx_kbytes: tx_bytes / 1024.0,
        rx_kbytes: rx_bytes / 1024.0,
    })
}

/// Parses a number printed with thousands separators
fn parse_grouped_number(raw: &str, field: &'static str) -> RouterResult<f64> {
    let digits: String = raw.chars().filter(|c| *c != ',' && *c != ' ').collect();
    digits.parse::<f64>().map_err(|_| RouterError::Parse {
        field,
        value: raw.to_string(),
    })
}
