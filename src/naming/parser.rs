use crate::naming::NamingTable;

/// Parses the `key=value` naming database format
///
/// One entry per line. Lines that do not split into exactly two parts on `=`
/// or whose trimmed key or value is empty are skipped.
pub fn parse_naming_database(content: &str) -> NamingTable {
    let entries = content.lines().filter_map(|line| {
        let mut parts = line.split('=');
        let (Some(key), Some(value), None) = (parts.next(), parts.next(), parts.next()) else {
            return None;
        };

        let (key, value) = (key.trim(), value.trim());
        if key.is_empty() || value.is_empty() {
            tracing::debug!("Skipping naming entry with empty field: {:?}", line);
            return None;
        }
        Some((key, value))
    });

    NamingTable::from_entries(entries)
}
