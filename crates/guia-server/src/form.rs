//! Filter state carried in `application/x-www-form-urlencoded` strings.
//!
//! The search form submits `q` and one `cat` per checked box, both as the
//! query string of `/` and as the body of `POST /more`.

use guia_core::FilterState;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Everything but unreserved characters gets escaped.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Percent-encodes a query value or path segment.
pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT).to_string()
}

/// Decoded `key=value` pairs in submission order, as produced by axum's
/// `Query` and `Form` extractors. Repeated keys stay separate entries.
pub type FormPairs = Vec<(String, String)>;

/// Reads `q` and every non-empty `cat` out of decoded form pairs.
///
/// Unknown keys are ignored; a repeated `q` keeps the last value.
pub fn parse_filter(pairs: FormPairs) -> FilterState {
    let mut filter = FilterState::default();
    for (key, value) in pairs {
        match key.as_str() {
            "q" => filter.search_term = value,
            "cat" if !value.is_empty() => filter.select(value),
            _ => {}
        }
    }
    filter
}

/// Encodes `filter` back into a query string, without the leading `?`.
pub fn filter_query_string(filter: &FilterState) -> String {
    let mut parts = Vec::with_capacity(filter.selected_categories.len() + 1);
    if !filter.search_term.is_empty() {
        parts.push(format!("q={}", encode_component(&filter.search_term)));
    }
    for category in &filter.selected_categories {
        parts.push(format!("cat={}", encode_component(category)));
    }
    parts.join("&")
}

/// Listing URL that reproduces `filter`.
pub fn listing_href(filter: &FilterState) -> String {
    let query = filter_query_string(filter);
    if query.is_empty() {
        "/".to_owned()
    } else {
        format!("/?{query}")
    }
}
