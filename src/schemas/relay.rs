use serde::{Deserialize, Serialize};

/// One relay row as the service reports it. Every field is optional on the
/// wire in practice; defaults keep odd rows (the `excluded`/`total` summary
/// lines reuse this shape with most fields zeroed) from failing the decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Relay {
    #[serde(default)]
    pub index: Option<u32>,
    #[serde(default)]
    pub nick: String,
    /// Fingerprint, or an Atlas link when the service renders links.
    #[serde(default)]
    pub fp: String,
    #[serde(default)]
    pub link: bool,
    /// Consensus weight fraction, percent.
    #[serde(default)]
    pub cw: Option<f64>,
    /// Advertised bandwidth fraction, percent.
    #[serde(default)]
    pub adv_bw: Option<f64>,
    #[serde(default)]
    pub p_guard: Option<f64>,
    #[serde(default)]
    pub p_middle: Option<f64>,
    #[serde(default)]
    pub p_exit: Option<f64>,
    /// Share of the donation routed to this relay, percent.
    #[serde(default)]
    pub donation_share: f64,
    #[serde(default)]
    pub exit: RelayFlag,
    #[serde(default)]
    pub guard: RelayFlag,
    #[serde(default)]
    pub cc: String,
    #[serde(default)]
    pub primary_ip: String,
    #[serde(default)]
    pub as_info: String,
    #[serde(default)]
    pub bitcoin_address: String,
}

/// Relay flag columns arrive as a boolean for plain rows and as a
/// `"(n)"` count string for grouped summary rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RelayFlag {
    Flag(bool),
    Grouped(String),
}

impl Default for RelayFlag {
    fn default() -> Self {
        RelayFlag::Grouped(String::new())
    }
}

impl RelayFlag {
    pub fn is_set(&self) -> bool {
        match self {
            RelayFlag::Flag(b) => *b,
            RelayFlag::Grouped(s) => !s.is_empty(),
        }
    }
}

/// The search payload: selected relays plus the service's summary rows and
/// the consensus publication timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RelaySet {
    #[serde(default)]
    pub relays_published: String,
    #[serde(default)]
    pub results: Vec<Relay>,
    #[serde(default)]
    pub excluded: Option<Relay>,
    #[serde(default)]
    pub total: Option<Relay>,
}

impl RelaySet {
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}
