//! Canonical comparison form for search terms, titles and category labels.

use unicode_normalization::UnicodeNormalization;

/// Lowercases, strips diacritics and trims `raw`.
///
/// `None` normalizes to the empty string. The text is NFD-decomposed and
/// combining diacritical marks (U+0300..=U+036F) are dropped, so `"Café"`
/// and `"cafe"` compare equal.
#[must_use]
pub fn normalize<'a>(raw: impl Into<Option<&'a str>>) -> String {
    let Some(raw) = raw.into() else {
        return String::new();
    };

    // Lowercased as a whole string: the Greek final sigma depends on context.
    let stripped: String = raw.nfd().filter(|c| !is_combining_diacritic(*c)).collect();

    stripped.to_lowercase().trim().to_owned()
}

fn is_combining_diacritic(c: char) -> bool {
    ('\u{0300}'..='\u{036F}').contains(&c)
}
