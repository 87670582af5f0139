//! Text processing utilities for tokenization and category sets

use std::collections::HashSet;

/// Punctuation stripped before tokenizing
const STRIPPED_PUNCTUATION: &[char] = &[
    '.', ',', '/', '#', '!', '$', '%', '^', '&', '*', ';', ':', '{', '}', '=', '-', '_', '`',
    '~', '(', ')',
];

/// Tokens at or below this many characters are dropped
const MIN_TOKEN_CHARS: usize = 2;

/// Word tokenizer used for free-text fields
///
/// Lowercases, removes the fixed punctuation set (without inserting a space,
/// so `land-use` becomes `landuse`), splits on whitespace, and drops tokens of
/// two characters or fewer. Duplicates and source order are kept.
pub fn tokenize(text: &str) -> Vec<String> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .filter(|c| !STRIPPED_PUNCTUATION.contains(c))
        .collect();

    cleaned
        .split_whitespace()
        .filter(|word| word.chars().count() > MIN_TOKEN_CHARS)
        .map(|word| word.to_string())
        .collect()
}

/// Split a multi-valued categorical field into a normalized set
///
/// Values are comma-separated, trimmed, and lowercased. Empty entries are
/// dropped, so an empty field yields an empty set.
pub fn normalize_category_set(text: &str) -> HashSet<String> {
    text.split(',')
        .map(|value| value.trim().to_lowercase())
        .filter(|value| !value.is_empty())
        .collect()
}
