use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which slice of the relay population a search runs over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ExitFilter {
    #[default]
    AllRelays,
    FastExits,
    AlmostFastExits,
    ExitsOnly,
    GuardsOnly,
}

impl ExitFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExitFilter::AllRelays => "all_relays",
            ExitFilter::FastExits => "fast_exits",
            ExitFilter::AlmostFastExits => "almost_fast_exits",
            ExitFilter::ExitsOnly => "exits_only",
            ExitFilter::GuardsOnly => "guards_only",
        }
    }

    pub fn all() -> &'static [ExitFilter] {
        &[
            ExitFilter::AllRelays,
            ExitFilter::FastExits,
            ExitFilter::AlmostFastExits,
            ExitFilter::ExitsOnly,
            ExitFilter::GuardsOnly,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            ExitFilter::AllRelays => "All relays",
            ExitFilter::FastExits => "Fast exits",
            ExitFilter::AlmostFastExits => "Almost-fast exits",
            ExitFilter::ExitsOnly => "Exits only",
            ExitFilter::GuardsOnly => "Guards only",
        }
    }
}

impl FromStr for ExitFilter {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all_relays" => Ok(ExitFilter::AllRelays),
            "fast_exits" => Ok(ExitFilter::FastExits),
            "almost_fast_exits" => Ok(ExitFilter::AlmostFastExits),
            "exits_only" => Ok(ExitFilter::ExitsOnly),
            "guards_only" => Ok(ExitFilter::GuardsOnly),
            _ => Err(()),
        }
    }
}

impl fmt::Display for ExitFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sort column for relay results. Identifiers double as the `sort`
/// query-string value and as the id of sort-trigger elements on the
/// server-rendered pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Consensus weight fraction.
    #[default]
    Cw,
    /// Advertised bandwidth fraction.
    AdvBw,
    PGuard,
    PMiddle,
    PExit,
    Nick,
    /// Country code.
    Cc,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Cw => "cw",
            SortKey::AdvBw => "adv_bw",
            SortKey::PGuard => "p_guard",
            SortKey::PMiddle => "p_middle",
            SortKey::PExit => "p_exit",
            SortKey::Nick => "nick",
            SortKey::Cc => "cc",
        }
    }

    pub fn all() -> &'static [SortKey] {
        &[
            SortKey::Cw,
            SortKey::AdvBw,
            SortKey::PGuard,
            SortKey::PMiddle,
            SortKey::PExit,
            SortKey::Nick,
            SortKey::Cc,
        ]
    }
}

impl FromStr for SortKey {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cw" => Ok(SortKey::Cw),
            "adv_bw" => Ok(SortKey::AdvBw),
            "p_guard" => Ok(SortKey::PGuard),
            "p_middle" => Ok(SortKey::PMiddle),
            "p_exit" => Ok(SortKey::PExit),
            "nick" => Ok(SortKey::Nick),
            "cc" => Ok(SortKey::Cc),
            _ => Err(()),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The user-chosen search parameters. Serialized verbatim into the navigable
/// address and as request parameters, and reconstructed from either.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub exit_filter: ExitFilter,
    pub links: bool,
    pub sort: SortKey,
    pub sort_reverse: bool,
    pub country: Option<String>,
    /// Result-count override. Its presence on a navigated address is also
    /// what marks the address as a saved search to replay.
    pub top: Option<u32>,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            exit_filter: ExitFilter::AllRelays,
            links: true,
            sort: SortKey::Cw,
            sort_reverse: true,
            country: None,
            top: None,
        }
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw {
        "true" | "True" | "TRUE" | "T" => Some(true),
        "false" | "False" | "FALSE" | "F" => Some(false),
        _ => None,
    }
}

impl SearchQuery {
    /// Request parameters in a stable order, ready for the query string and
    /// for `reqwest`'s `query()`.
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = vec![
            ("exit_filter".to_string(), self.exit_filter.to_string()),
            ("links".to_string(), self.links.to_string()),
            ("sort".to_string(), self.sort.to_string()),
            ("sort_reverse".to_string(), self.sort_reverse.to_string()),
        ];
        if let Some(country) = &self.country {
            params.push(("country".to_string(), country.clone()));
        }
        if let Some(top) = self.top {
            params.push(("top".to_string(), top.to_string()));
        }
        params
    }

    /// Rebuild a query from raw name/value pairs. Unknown names are ignored;
    /// unparseable values fall back to the field default, the way the
    /// service's own option table treats them.
    pub fn from_params<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut query = SearchQuery::default();
        for (name, raw) in pairs {
            match name {
                "exit_filter" => {
                    if let Ok(filter) = raw.parse() {
                        query.exit_filter = filter;
                    }
                }
                "links" => query.links = parse_bool(raw).unwrap_or(true),
                "sort" => {
                    if let Ok(sort) = raw.parse() {
                        query.sort = sort;
                    }
                }
                "sort_reverse" => query.sort_reverse = parse_bool(raw).unwrap_or(true),
                "country" => {
                    if !raw.is_empty() {
                        query.country = Some(raw.to_string());
                    }
                }
                "top" => query.top = raw.parse().ok(),
                _ => {}
            }
        }
        query
    }
}
