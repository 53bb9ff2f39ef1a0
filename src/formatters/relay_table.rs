use chrono::NaiveDateTime;
use colored::Colorize;

use crate::schemas::{Relay, RelaySet};

/// Where a fingerprint cell points when the query asked for links.
const ATLAS_BASE: &str = "https://atlas.torproject.org/#details/";

fn percent(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.4}%"),
        None => "-".to_string(),
    }
}

fn flag(set: bool) -> &'static str {
    if set { "yes" } else { "" }
}

/// One relay as a table row.
pub fn format_relay_row(relay: &Relay, links: bool) -> String {
    let fingerprint = if links && relay.link && !relay.fp.is_empty() {
        format!("{ATLAS_BASE}{}", relay.fp)
    } else {
        relay.fp.clone()
    };

    format!(
        "{:>3}  {:<20} {:>10} {:>10} {:>9} {:>9} {:>8} {:>4} {:>5} {:>3}  {}",
        relay.index.map(|i| i.to_string()).unwrap_or_default(),
        relay.nick,
        percent(relay.cw),
        percent(relay.adv_bw),
        percent(relay.p_guard),
        percent(relay.p_exit),
        format!("{:.2}%", relay.donation_share),
        flag(relay.exit.is_set()),
        flag(relay.guard.is_set()),
        relay.cc,
        fingerprint,
    )
}

/// The whole result set as a colored table with the summary rows and the
/// consensus timestamp footer.
pub fn format_relay_set(set: &RelaySet, links: bool) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "{:>3}  {:<20} {:>10} {:>10} {:>9} {:>9} {:>8} {:>4} {:>5} {:>3}  {}\n",
        "#".bold(),
        "nickname".bold(),
        "cw".bold(),
        "adv_bw".bold(),
        "p_guard".bold(),
        "p_exit".bold(),
        "share".bold(),
        "exit".bold(),
        "guard".bold(),
        "cc".bold(),
        "fingerprint".bold(),
    ));

    for relay in &set.results {
        out.push_str(&format_relay_row(relay, links));
        out.push('\n');
    }

    if let Some(excluded) = &set.excluded {
        out.push_str(&format!("{}\n", format_relay_row(excluded, false).dimmed()));
    }
    if let Some(total) = &set.total {
        out.push_str(&format!("{}\n", format_relay_row(total, false).dimmed()));
    }

    if !set.relays_published.is_empty() {
        out.push_str(&format!(
            "\nrelay consensus published: {}\n",
            format_published(&set.relays_published).green()
        ));
    }

    out
}

/// The service reports the consensus timestamp as `YYYY-MM-DD HH:MM:SS`
/// (UTC); anything else is shown verbatim.
fn format_published(raw: &str) -> String {
    match NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        Ok(ts) => format!("{} UTC", ts.format("%a %e %b %Y, %H:%M")),
        Err(_) => raw.to_string(),
    }
}
