//! Filter options derived from whatever listings are loaded.

use std::collections::HashSet;

use crate::listing::Listing;

/// Unique primary category labels in first-seen order.
///
/// Only the head of a list-valued category is considered. The result is
/// derived from scratch on every call, so it always mirrors `listings`.
#[must_use]
pub fn extract_categories(listings: &[Listing]) -> Vec<String> {
    let mut seen = HashSet::new();
    listings
        .iter()
        .filter_map(Listing::primary_category)
        .filter(|label| seen.insert(*label))
        .map(str::to_owned)
        .collect()
}

/// Caption for a category checkbox: everything up to the first `:` and the
/// whitespace after it is dropped (`"Food: Bakery"` → `"Bakery"`).
#[must_use]
pub fn category_label(raw: &str) -> &str {
    match raw.split_once(':') {
        Some((_, rest)) => rest.trim_start(),
        None => raw,
    }
}
