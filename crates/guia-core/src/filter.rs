//! Client-side narrowing of the loaded listings.

use std::collections::HashSet;

use crate::listing::Listing;
use crate::normalize::normalize;

/// Search box text plus the checked category boxes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterState {
    pub search_term: String,
    /// Raw category labels, in the order they were checked, without repeats.
    pub selected_categories: Vec<String>,
}

impl FilterState {
    #[must_use]
    pub fn new(search_term: impl Into<String>) -> Self {
        Self {
            search_term: search_term.into(),
            selected_categories: Vec::new(),
        }
    }

    /// Checks a category box. Selecting the same label twice is a no-op.
    pub fn select(&mut self, category: impl Into<String>) {
        let category = category.into();
        if !self.selected_categories.contains(&category) {
            self.selected_categories.push(category);
        }
    }

    #[must_use]
    pub fn is_selected(&self, category: &str) -> bool {
        self.selected_categories.iter().any(|c| c == category)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.search_term.is_empty() && self.selected_categories.is_empty()
    }
}

/// Returns the listings matching `filter`, preserving their order.
///
/// A listing matches when both hold:
/// - the term is empty, or its normalized form is a substring of the
///   normalized title or of the normalized primary category;
/// - no category is selected, or the normalized primary category equals one
///   of the normalized selected labels.
#[must_use]
pub fn filter_listings<'a>(filter: &FilterState, listings: &'a [Listing]) -> Vec<&'a Listing> {
    let term = normalize(filter.search_term.as_str());
    let selected: HashSet<String> = filter
        .selected_categories
        .iter()
        .map(|c| normalize(c.as_str()))
        .collect();

    listings
        .iter()
        .filter(|listing| {
            let category = normalize(listing.primary_category().unwrap_or_default());
            let title = normalize(listing.title.as_str());

            let text_match = term.is_empty() || title.contains(&term) || category.contains(&term);
            let category_match = selected.is_empty() || selected.contains(&category);
            text_match && category_match
        })
        .collect()
}
