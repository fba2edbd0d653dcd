// src/specs/listing.rs
//! Scraping spec for the ministry's listing page.
//!
//! Each published document is an anchor such as
//! `<a href="/articles/...?fdl=31234">ΤΡΙΤΗ 14 ΟΚΤΩΒΡΙΟΥ 2025.pdf</a>`.
//! Anchors without an `fdl=` id, or whose text carries no year, are
//! navigation and are ignored. Listing order is preserved.

use crate::core::greek::{find_year, numeric_value, tokens};
use crate::core::html::{attr_value_ci, inner_after_open_tag, next_tag_block_ci, open_tag, strip_tags};
use crate::core::sanitize::{normalize_entities, normalize_ws};
use crate::model::{AvailableFileEntry, DateTokens, DocumentFormat, EntryKind};
use crate::normalize::NormalizationTables;

pub fn parse_listing(html: &str, tables: &NormalizationTables) -> Vec<AvailableFileEntry> {
    let mut out = Vec::new();
    let mut pos = 0usize;

    while let Some((start, end)) = next_tag_block_ci(html, "<a", "</a>", pos) {
        let block = &html[start..end];
        // `<abbr>`, `<article>`...
        if !block[2..].starts_with(|c: char| c.is_whitespace() || c == '>') {
            pos = start + 2;
            continue;
        }
        pos = end;

        let Some(href) = attr_value_ci(open_tag(block), "href") else { continue };
        let href = normalize_entities(&href);
        let Some(id) = fdl_id(&href) else { continue };

        let text = normalize_ws(&normalize_entities(&strip_tags(inner_after_open_tag(block))));
        if find_year(&text).is_none() {
            continue;
        }

        let is_pdf = text.to_lowercase().contains(".pdf") || href.to_lowercase().contains(".pdf");
        let format = if is_pdf { DocumentFormat::Pdf } else { DocumentFormat::Docx };
        out.push(infer_entry(text, id, format, tables));
    }

    logd!("Listing: {} document link(s)", out.len());
    out
}

/// Build an entry from display text, guessing its kind and date parts.
pub fn infer_entry(
    display_text: String,
    identifier: String,
    format: DocumentFormat,
    tables: &NormalizationTables,
) -> AvailableFileEntry {
    let date = date_tokens(&display_text, tables);
    let kind = if date.day.is_some() && date.month.is_some() {
        EntryKind::Schedule
    } else {
        EntryKind::Unknown
    };
    AvailableFileEntry { display_text, identifier, format, kind, date }
}

/// Day is the number right before the month name when there is one,
/// otherwise the first number that can be a day.
pub fn date_tokens(text: &str, tables: &NormalizationTables) -> DateTokens {
    let toks = tokens(text);
    let month_at = toks.iter().position(|t| tables.month_number(t).is_some());
    let month = month_at.and_then(|i| tables.month_number(&toks[i]));

    let is_day = |t: &String| numeric_value(t).filter(|d| (1..=31).contains(d));
    let day = month_at
        .and_then(|i| i.checked_sub(1))
        .and_then(|i| is_day(&toks[i]))
        .or_else(|| toks.iter().find_map(is_day));

    DateTokens { day, month, year: find_year(text) }
}

fn fdl_id(href: &str) -> Option<String> {
    let at = href.find("fdl=")? + 4;
    let digits: String = href[at..].chars().take_while(|c| c.is_ascii_digit()).collect();
    (!digits.is_empty()).then_some(digits)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <ul class="menu"><li><a href="/articles/citizen">Πολίτης</a></li></ul>
        <article><p>Εφημερίες</p>
        <a href="/articles/citizen/efhmeries?fdl=31250" class="doc">ΤΕΤΑΡΤΗ 15 ΟΚΤΩΒΡΙΟΥ 2025.pdf</a><br>
        <A HREF="/articles/citizen/efhmeries?fdl=31249&amp;x=1">Τρίτη&nbsp;14 Οκτωβρίου 2025</A>
        <a href="/articles/citizen/efhmeries?fdl=31000">Οδηγίες 2025</a>
        <a href="/articles/citizen/efhmeries?view=all">ΤΡΙΤΗ 14 ΟΚΤΩΒΡΙΟΥ 2025</a>
        </article>"#;

    #[test]
    fn anchors_with_fdl_and_year_are_kept_in_order() {
        let t = NormalizationTables::builtin();
        let entries = parse_listing(PAGE, &t);
        let ids: Vec<&str> = entries.iter().map(|e| e.identifier.as_str()).collect();
        assert_eq!(ids, vec!["31250", "31249", "31000"]);

        assert_eq!(entries[0].format, DocumentFormat::Pdf);
        assert_eq!(entries[1].format, DocumentFormat::Docx);
        assert_eq!(entries[1].display_text, "Τρίτη 14 Οκτωβρίου 2025");
        assert_eq!(entries[1].kind, EntryKind::Schedule);
        assert_eq!(entries[1].date, DateTokens { day: Some(14), month: Some(10), year: Some(2025) });
        assert_eq!(entries[2].kind, EntryKind::Unknown);
    }

    #[test]
    fn day_prefers_number_before_month() {
        let t = NormalizationTables::builtin();
        let d = date_tokens("Αρ. 3 - ΣΑΒΒΑΤΟ 01 ΝΟΕΜΒΡΙΟΥ 2025", &t);
        assert_eq!(d, DateTokens { day: Some(1), month: Some(11), year: Some(2025) });
    }
}
