use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s]").expect("valid regex"));

/// Lowercases `text` and strips diacritics, so "Ação" and "acao" compare equal.
///
/// Every string the search pipeline compares (queries, synopses, catalog
/// fields, vocabulary entries) goes through this function first.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect()
}

/// Splits already-normalized text into tokens longer than two characters,
/// treating punctuation as whitespace.
pub fn tokenize(normalized: &str) -> Vec<String> {
    NON_WORD
        .replace_all(normalized, " ")
        .split_whitespace()
        .filter(|token| token.chars().count() > 2)
        .map(str::to_string)
        .collect()
}
