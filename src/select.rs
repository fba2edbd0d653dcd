// src/select.rs
//! Picking the published document for a date, and checking a month
//! document against the month the caller asked for.

use chrono::{Datelike, NaiveDate};

use crate::core::greek::{fold, token_eq, tokens};
use crate::model::{AvailableFileEntry, MonthYear};
use crate::normalize::{genitive_month, weekday_name};

/// Folded `[weekday, day, genitive month, year]`, e.g. `["ΤΡΙΤΗ", "14", "ΟΚΤΩΒΡΙΟΥ", "2025"]`.
pub fn expected_date_tokens(date: NaiveDate) -> Vec<String> {
    let month = genitive_month(date.month()).unwrap_or_default();
    vec![
        fold(weekday_name(date.weekday())),
        date.day().to_string(),
        fold(month),
        date.year().to_string(),
    ]
}

/// First entry, in listing order, whose text carries the date's token
/// sequence. Numbers compare by value, so "01" matches day 1.
pub fn select_file(entries: &[AvailableFileEntry], date: NaiveDate) -> Option<&AvailableFileEntry> {
    let want = expected_date_tokens(date);
    let hit = entries.iter().find(|e| {
        let have = tokens(&e.display_text);
        have.windows(want.len())
            .any(|w| w.iter().zip(&want).all(|(a, b)| token_eq(a, b)))
    });
    match hit {
        Some(e) => logd!("Selected `{}` (id {}) for {}", e.display_text, e.identifier, date),
        None => logw!("No listing entry for {} ({})", date, want.join(" ")),
    }
    hit
}

/// Outcome of comparing a document's month with the requested one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MonthCheck {
    Match,
    Mismatch { found: MonthYear, expected: MonthYear },
}

pub fn check_month_year(found: MonthYear, expected: MonthYear) -> MonthCheck {
    if found == expected {
        MonthCheck::Match
    } else {
        MonthCheck::Mismatch { found, expected }
    }
}
