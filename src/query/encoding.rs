//! Query-string codec for the navigable address and the server-rendered
//! pages.
//!
//! Parsing keeps values raw (no URL decoding) and lets the last occurrence of
//! a repeated name win, matching what the service's pages expect.

use nom::{
    IResult, Parser,
    bytes::complete::{tag, take_while},
    combinator::opt,
    multi::separated_list0,
    sequence::preceded,
};
use std::collections::BTreeMap;

/// Split a query string into a name → raw-value mapping.
///
/// Accepts either a bare query string or a full address; everything before
/// the first `?` is discarded. No `?` at all yields an empty mapping.
pub fn parse_query_string(raw: &str) -> BTreeMap<String, String> {
    let Some(query) = raw.splitn(2, '?').nth(1) else {
        return BTreeMap::new();
    };

    match pairs(query) {
        Ok((_, parsed)) => parsed
            .into_iter()
            .filter(|(name, _)| !name.is_empty())
            .map(|(name, value)| (name.to_string(), value.unwrap_or("").to_string()))
            .collect(),
        Err(_) => BTreeMap::new(),
    }
}

fn pairs(input: &str) -> IResult<&str, Vec<(&str, Option<&str>)>> {
    separated_list0(tag("&"), pair).parse(input)
}

fn pair(input: &str) -> IResult<&str, (&str, Option<&str>)> {
    let (input, name) = take_while(|c| c != '=' && c != '&')(input)?;
    let (input, value) = opt(preceded(tag("="), take_while(|c| c != '&'))).parse(input)?;
    Ok((input, (name, value)))
}

/// Join name/value pairs back into a query string, escaping the handful of
/// characters that would break the pair structure.
pub fn build_query_string<'a, I>(params: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    params
        .into_iter()
        .map(|(name, value)| format!("{}={}", encode_component(name), encode_component(value)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Minimal component escaping: structural characters and whitespace only.
/// Values produced by [`SearchQuery`](crate::SearchQuery) are plain tokens,
/// so round-tripping through [`parse_query_string`] is the identity on them.
pub fn encode_component(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' | '=' | '?' | '#' | '%' | '+' => {
                out.push('%');
                out.push_str(&format!("{:02X}", c as u32));
            }
            ' ' => out.push_str("%20"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::options::{SearchQuery, SortKey};

    #[test]
    fn test_basic_pairs() {
        let parsed = parse_query_string("?a=1&b=2");
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed["a"], "1");
        assert_eq!(parsed["b"], "2");
    }

    #[test]
    fn test_no_question_mark_is_empty() {
        assert!(parse_query_string("").is_empty());
        assert!(parse_query_string("a=1&b=2").is_empty());
    }

    #[test]
    fn test_last_occurrence_wins() {
        let parsed = parse_query_string("?a=1&a=2");
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed["a"], "2");
    }

    #[test]
    fn test_values_stay_raw() {
        let parsed = parse_query_string("?name=a%20b");
        assert_eq!(parsed["name"], "a%20b");
    }

    #[test]
    fn test_full_address_accepted() {
        let parsed = parse_query_string("https://host/path?sort=cw&links=true");
        assert_eq!(parsed["sort"], "cw");
        assert_eq!(parsed["links"], "true");
    }

    #[test]
    fn test_name_without_value() {
        let parsed = parse_query_string("?flag&a=1");
        assert_eq!(parsed["flag"], "");
        assert_eq!(parsed["a"], "1");
    }

    #[test]
    fn test_query_round_trip() {
        let query = SearchQuery {
            sort: SortKey::PExit,
            sort_reverse: false,
            country: Some("de".to_string()),
            top: Some(25),
            ..SearchQuery::default()
        };

        let params = query.to_params();
        let encoded = build_query_string(params.iter().map(|(n, v)| (n.as_str(), v.as_str())));
        let decoded = parse_query_string(&format!("?{encoded}"));
        let rebuilt =
            SearchQuery::from_params(decoded.iter().map(|(n, v)| (n.as_str(), v.as_str())));

        assert_eq!(rebuilt, query);
    }

    #[test]
    fn test_default_query_round_trip() {
        let query = SearchQuery::default();
        let encoded = build_query_string(
            query
                .to_params()
                .iter()
                .map(|(n, v)| (n.as_str(), v.as_str())),
        );
        let decoded = parse_query_string(&format!("?{encoded}"));
        let rebuilt =
            SearchQuery::from_params(decoded.iter().map(|(n, v)| (n.as_str(), v.as_str())));
        assert_eq!(rebuilt, query);
    }

    #[test]
    fn test_encode_component_escapes_structure() {
        assert_eq!(encode_component("a&b=c"), "a%26b%3Dc");
        assert_eq!(encode_component("plain_token"), "plain_token");
    }
}
