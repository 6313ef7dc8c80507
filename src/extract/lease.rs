/// Parses a DHCP lease string into remaining seconds
///
/// Accepts `HH:MM:SS`. `Permanent` leases and anything that does not split
/// into exactly three colon-separated fields yield 0; so does a field that is
/// not a number, and a total that does not fit in a `u64`. Spaces are ignored.
pub fn parse_lease(lease: &str) -> u64 {
    let compact: String = lease.chars().filter(|c| *c != ' ').collect();

    if compact == "Permanent" {
        return 0;
    }

    let fields: Vec<&str> = compact.split(':').collect();
    let [hours, minutes, seconds] = fields.as_slice() else {
        return 0;
    };

    let number = |field: &str| field.parse::<u64>().unwrap_or(0);
    number(hours)
        .checked_mul(3600)
        .and_then(|total| total.checked_add(number(minutes).checked_mul(60)?))
        .and_then(|total| total.checked_add(number(seconds)))
        .unwrap_or(0)
}
