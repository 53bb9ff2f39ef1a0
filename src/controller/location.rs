//! Model of the navigable address the controller keeps in sync with its
//! query, so any search is bookmarkable and shareable.

use std::collections::BTreeMap;

use crate::query::{SearchQuery, build_query_string, parse_query_string};

/// Result-count value stamped onto share links when the user never set one.
/// Its presence is what marks an address as a saved search.
pub const DEFAULT_TOP: u32 = 5;

const REPLAY_FLAG: &str = "top";

#[derive(Debug, Clone)]
pub struct Location {
    origin: String,
    path: String,
    query_string: String,
    /// Armed only by an external navigation whose parameters carry the
    /// replay flag; disarmed by the first [`Location::take_replay`]. The
    /// controller's own mirror writes never arm it, which is what keeps the
    /// watch/replay cycle from feeding back.
    replay_armed: bool,
}

impl Location {
    pub fn new(base_url: &str) -> Self {
        let trimmed = base_url.trim_end_matches('/');
        Self {
            origin: trimmed.to_string(),
            path: "/".to_string(),
            query_string: String::new(),
            replay_armed: false,
        }
    }

    /// External navigation: a pasted link, a bookmark, a sort link. Arms
    /// replay when the parameters include the replay flag.
    pub fn navigate(&mut self, address: &str) {
        let params = parse_query_string(address);
        self.query_string = address
            .splitn(2, '?')
            .nth(1)
            .unwrap_or("")
            .to_string();
        self.replay_armed = params.contains_key(REPLAY_FLAG);
    }

    /// Controller-side mirror: reflect the current query into the address.
    pub fn set_query(&mut self, query: &SearchQuery) {
        let params = query.to_params();
        self.query_string =
            build_query_string(params.iter().map(|(n, v)| (n.as_str(), v.as_str())));
    }

    /// Consume an armed replay, handing back the query encoded in the
    /// address. At most one replay per navigation.
    pub fn take_replay(&mut self) -> Option<SearchQuery> {
        if !self.replay_armed {
            return None;
        }
        self.replay_armed = false;
        let params = self.params();
        Some(SearchQuery::from_params(
            params.iter().map(|(n, v)| (n.as_str(), v.as_str())),
        ))
    }

    pub fn params(&self) -> BTreeMap<String, String> {
        parse_query_string(&format!("?{}", self.query_string))
    }

    pub fn query_string(&self) -> &str {
        &self.query_string
    }

    /// The full navigable address for the current query string.
    pub fn href(&self) -> String {
        if self.query_string.is_empty() {
            format!("{}{}", self.origin, self.path)
        } else {
            format!("{}{}?{}", self.origin, self.path, self.query_string)
        }
    }

    /// A shareable link for `query` that will replay when opened: the replay
    /// flag is always present, defaulted when the query has no override.
    pub fn share_link(&self, query: &SearchQuery) -> String {
        let mut stamped = query.clone();
        stamped.top = Some(stamped.top.unwrap_or(DEFAULT_TOP));
        let params = stamped.to_params();
        format!(
            "{}{}?{}",
            self.origin,
            self.path,
            build_query_string(params.iter().map(|(n, v)| (n.as_str(), v.as_str())))
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigate_arms_replay_only_with_flag() {
        let mut location = Location::new("http://127.0.0.1:5000");

        location.navigate("http://127.0.0.1:5000/?sort=nick&top=5");
        assert!(location.take_replay().is_some());

        location.navigate("http://127.0.0.1:5000/?sort=nick");
        assert!(location.take_replay().is_none());
    }

    #[test]
    fn test_take_replay_is_one_shot() {
        let mut location = Location::new("http://127.0.0.1:5000");
        location.navigate("?top=10");
        assert!(location.take_replay().is_some());
        assert!(location.take_replay().is_none());
    }

    #[test]
    fn test_set_query_never_arms_replay() {
        let mut location = Location::new("http://127.0.0.1:5000");
        let query = SearchQuery {
            top: Some(5),
            ..SearchQuery::default()
        };
        location.set_query(&query);
        assert!(location.take_replay().is_none());
        assert!(location.query_string().contains("top=5"));
    }

    #[test]
    fn test_replay_decodes_parameters() {
        let mut location = Location::new("http://127.0.0.1:5000");
        location.navigate("?exit_filter=exits_only&sort=p_exit&sort_reverse=false&top=3");
        let query = location.take_replay().unwrap();
        assert_eq!(query.sort.as_str(), "p_exit");
        assert!(!query.sort_reverse);
        assert_eq!(query.top, Some(3));
    }

    #[test]
    fn test_share_link_always_carries_flag() {
        let location = Location::new("http://127.0.0.1:5000/");
        let link = location.share_link(&SearchQuery::default());
        assert!(link.starts_with("http://127.0.0.1:5000/?"));
        assert!(link.contains("top=5"));
    }

    #[test]
    fn test_href_mirrors_query() {
        let mut location = Location::new("http://127.0.0.1:5000");
        assert_eq!(location.href(), "http://127.0.0.1:5000/");
        location.set_query(&SearchQuery::default());
        assert!(location.href().contains("?exit_filter=all_relays"));
    }
}
