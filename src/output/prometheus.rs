//! Prometheus text exposition
//!
//! Metric names follow the exporter's historical `tplink_` series so
//! existing dashboards keep working.

use crate::model::{Client, Snapshot};

/// Content type of the text exposition format
pub const CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// Renders a snapshot as Prometheus text
pub fn render(snapshot: &Snapshot) -> String {
    let mut out = String::new();

    gauge(
        &mut out,
        "tplink_wan_tx_kbytes",
        "Total kbytes transmitted",
        snapshot.wan.tx_kbytes,
    );
    gauge(
        &mut out,
        "tplink_wan_rx_kbytes",
        "Total kbytes received",
        snapshot.wan.rx_kbytes,
    );

    let series: [(&str, &str, fn(&Client) -> f64); 3] = [
        (
            "tplink_lan_traffic_kbytes",
            "KBytes sent/received per device",
            |c| c.kbytes,
        ),
        (
            "tplink_lan_traffic_packets",
            "Packets sent/received per device",
            |c| c.packets as f64,
        ),
        (
            "tplink_lan_lease_seconds",
            "Lease seconds left",
            |c| c.lease_secs as f64,
        ),
    ];

    for (name, help, value) in series {
        header(&mut out, name, help);
        for client in &snapshot.clients {
            out.push_str(&format!(
                "{}{{name=\"{}\",ip=\"{}\",mac=\"{}\"}} {}\n",
                name,
                escape_label(&client.name),
                escape_label(&client.ip),
                escape_label(&client.mac),
                value(client)
            ));
        }
    }

    gauge(
        &mut out,
        "tplink_scrape_duration_seconds",
        "Time that took the scraping process",
        snapshot.duration.as_secs_f64(),
    );

    out
}

fn header(out: &mut String, name: &str, help: &str) {
    out.push_str(&format!("# HELP {} {}\n# TYPE {} gauge\n", name, help, name));
}

fn gauge(out: &mut String, name: &str, help: &str, value: f64) {
    header(out, name, help);
    out.push_str(&format!("{} {}\n", name, value));
}

/// Escapes a label value: backslash, double quote and newline
fn escape_label(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            other => escaped.push(other),
        }
    }
    escaped
}
