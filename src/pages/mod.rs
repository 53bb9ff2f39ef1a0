//! Helpers for the server-rendered (non-interactive) pages: sort links that
//! carry the current filters, one-shot loading of the rendered results
//! fragment, and pre-filling form controls from the address.
//!
//! Each helper is stateless and idempotent; none of them share anything with
//! the interactive controller.

pub mod form;

pub use crate::query::parse_query_string;
pub use form::{ControlKind, FormControl, LegacyPage, SortTrigger};

use crate::client::{ApiClient, ApiError};
use crate::query::build_query_string;

/// Rebuild every sort trigger's link target from the page's current
/// parameters, with `sort` overridden by the trigger's identifier: current
/// filters, new sort.
pub fn build_sort_links(page: &mut LegacyPage) {
    let base = page.base_address().to_string();
    let params = parse_query_string(&page.address);

    for trigger in &mut page.sort_triggers {
        let mut params = params.clone();
        params.insert("sort".to_string(), trigger.id.clone());
        let query = build_query_string(params.iter().map(|(n, v)| (n.as_str(), v.as_str())));
        trigger.href = format!("{base}?{query}");
    }
}

/// Fetch the rendered results fragment for the page's query string and
/// splice it in. Does nothing when the address has no query string. Returns
/// whether a fragment was loaded.
///
/// On a failed fetch the loading indicator is left showing, exactly like the
/// page it models.
pub fn load_results_fragment(page: &mut LegacyPage, client: &ApiClient) -> Result<bool, ApiError> {
    let query_string = page.query_string().to_string();
    if query_string.is_empty() {
        return Ok(false);
    }

    page.loading_visible = true;
    let markup = client.result_fragment(&format!("?{query_string}"))?;
    page.loading_visible = false;
    page.fragment = Some(markup);
    page.tooltips_active = true;
    Ok(true)
}

/// Copy every address parameter into the form controls that carry its name:
/// checkbox/radio controls become checked when their value matches, text
/// controls take the raw value. Parameters without a control are ignored.
pub fn prefill_form_from_address(page: &mut LegacyPage) {
    let params = parse_query_string(&page.address);
    if params.is_empty() {
        return;
    }

    for (name, value) in &params {
        for control in page.controls.iter_mut().filter(|c| &c.name == name) {
            match control.kind {
                ControlKind::Checkbox | ControlKind::Radio => {
                    control.checked = control.value == *value;
                }
                ControlKind::Text => control.value = value.clone(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_links_override_sort_and_keep_filters() {
        let mut page = LegacyPage::at("http://127.0.0.1:5000/?sort=a&country=de");
        page.sort_triggers = vec![SortTrigger::new("z"), SortTrigger::new("nick")];

        build_sort_links(&mut page);

        let first = parse_query_string(&page.sort_triggers[0].href);
        assert_eq!(first["sort"], "z");
        assert_eq!(first["country"], "de");
        assert!(page.sort_triggers[0]
            .href
            .starts_with("http://127.0.0.1:5000/?"));

        let second = parse_query_string(&page.sort_triggers[1].href);
        assert_eq!(second["sort"], "nick");
        assert_eq!(second["country"], "de");
    }

    #[test]
    fn test_sort_links_on_address_without_query() {
        let mut page = LegacyPage::at("http://127.0.0.1:5000/relays");
        page.sort_triggers = vec![SortTrigger::new("cw")];

        build_sort_links(&mut page);

        assert_eq!(
            page.sort_triggers[0].href,
            "http://127.0.0.1:5000/relays?sort=cw"
        );
    }

    #[test]
    fn test_prefill_sets_matching_controls() {
        let mut page = LegacyPage::at("/?country=de&links=true&family=myfamily");
        page.controls = vec![
            FormControl::text("country"),
            FormControl::checkbox("links", "true"),
            FormControl::radio("exit_filter", "exits_only"),
            FormControl::text("family"),
        ];

        prefill_form_from_address(&mut page);

        assert_eq!(page.controls[0].value, "de");
        assert!(page.controls[1].checked);
        // No parameter named exit_filter: untouched
        assert!(!page.controls[2].checked);
        assert_eq!(page.controls[3].value, "myfamily");
    }

    #[test]
    fn test_prefill_radio_unchecks_on_value_mismatch() {
        let mut page = LegacyPage::at("/?exit_filter=guards_only");
        let mut checked = FormControl::radio("exit_filter", "exits_only");
        checked.checked = true;
        page.controls = vec![checked, FormControl::radio("exit_filter", "guards_only")];

        prefill_form_from_address(&mut page);

        assert!(!page.controls[0].checked);
        assert!(page.controls[1].checked);
    }

    #[test]
    fn test_prefill_without_query_is_a_no_op() {
        let mut page = LegacyPage::at("http://127.0.0.1:5000/");
        page.controls = vec![FormControl::text("country")];

        prefill_form_from_address(&mut page);

        assert_eq!(page.controls[0].value, "");
    }

    #[test]
    fn test_query_string_parsing_contract() {
        let parsed = parse_query_string("?a=1&b=2");
        assert_eq!(parsed["a"], "1");
        assert_eq!(parsed["b"], "2");

        assert!(parse_query_string("").is_empty());

        let parsed = parse_query_string("?a=1&a=2");
        assert_eq!(parsed["a"], "2");
    }
}
