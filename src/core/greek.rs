// src/core/greek.rs
//! Accent- and case-insensitive comparison for Greek text.
//!
//! Government documents mix tonos/dialytika, all-caps and title case freely
//! ("Οκτωβρίου", "ΟΚΤΩΒΡΙΟΥ", "ΜΑΪΟΥ", "ΜΑΙΟΥ"). Everything that compares
//! Greek strings goes through [`fold`] first.

use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

/// Decompose, drop combining marks, uppercase. Final sigma folds to Σ.
pub fn fold(s: &str) -> String {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_uppercase)
        .collect()
}

/// Folded alphanumeric runs, in order. Punctuation and whitespace separate.
pub fn tokens(s: &str) -> Vec<String> {
    fold(s)
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// `"01"` and `"1"` are the same day.
pub fn numeric_value(token: &str) -> Option<u32> {
    if token.is_empty() || !token.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    token.parse().ok()
}

/// Token equality where all-digit tokens compare by value.
pub fn token_eq(a: &str, b: &str) -> bool {
    match (numeric_value(a), numeric_value(b)) {
        (Some(x), Some(y)) => x == y,
        _ => a == b,
    }
}

/// First 4-digit `20xx` run standing on its own.
pub fn find_year(s: &str) -> Option<i32> {
    s.split(|c: char| !c.is_ascii_digit())
        .filter(|run| run.len() == 4 && run.starts_with("20"))
        .find_map(|run| run.parse().ok())
}
