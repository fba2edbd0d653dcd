// src/extract/docx.rs
//! DOCX table reader: `word/document.xml` walked with quick-xml.
//!
//! Only the body structure matters here: `w:tbl` / `w:tr` / `w:tc` for
//! tables, `w:p` / `w:t` / `w:br` for text. Paragraphs inside one cell are
//! joined with `\n`. A horizontally merged cell (`w:gridSpan`) is repeated
//! so column positions stay aligned with the header; a vertically merged
//! continuation (`w:vMerge` without `restart`) repeats the text above it.
//! Tables nested inside a cell contribute their text to that cell.

use std::io::{Cursor, Read};

use quick_xml::Reader as XmlReader;
use quick_xml::events::{BytesStart, Event};
use zip::ZipArchive;

use super::{DocumentKind, ExtractedDocument, Row, Table, drop_empty_rows};
use crate::core::sanitize::normalize_ws;
use crate::error::ExtractError;

const DOC_XML_PATH: &str = "word/document.xml";

pub fn extract(bytes: &[u8]) -> Result<ExtractedDocument, ExtractError> {
    let xml = read_document_xml(bytes)?;
    parse_document_xml(&xml)
}

fn read_document_xml(bytes: &[u8]) -> Result<String, ExtractError> {
    let corrupt = |reason: String| ExtractError::corrupt(DocumentKind::RichText, reason);

    let mut archive = ZipArchive::new(Cursor::new(bytes))
        .map_err(|err| corrupt(format!("failed to open docx archive: {err}")))?;
    let mut file = archive
        .by_name(DOC_XML_PATH)
        .map_err(|err| corrupt(format!("docx missing document.xml: {err}")))?;
    let mut xml = String::new();
    file.read_to_string(&mut xml)
        .map_err(|err| corrupt(format!("failed to read document.xml: {err}")))?;
    Ok(xml)
}

/// Builder state for the table currently open at depth 1.
#[derive(Default)]
struct OpenTable {
    rows: Table,
    row: Option<Row>,
    cell: Option<Vec<String>>,
    span: usize,
    /// Current cell continues the vertical merge from the row above.
    merged: bool,
}

pub(crate) fn parse_document_xml(xml: &str) -> Result<ExtractedDocument, ExtractError> {
    let mut reader = XmlReader::from_str(xml);
    let mut buf = Vec::new();

    let mut doc = ExtractedDocument::default();
    let mut table: Option<OpenTable> = None;
    let mut depth = 0usize; // w:tbl nesting
    let mut para: Option<String> = None;
    let mut in_text = false;

    loop {
        let event = reader
            .read_event_into(&mut buf)
            .map_err(|err| ExtractError::corrupt(DocumentKind::RichText, format!("malformed document.xml: {err}")))?;

        match event {
            Event::Start(e) => match local(&e) {
                b"tbl" => {
                    depth += 1;
                    if depth == 1 {
                        table = Some(OpenTable::default());
                    }
                }
                b"tr" if depth == 1 => {
                    if let Some(t) = table.as_mut() {
                        t.row = Some(Vec::new());
                    }
                }
                b"tc" if depth == 1 => {
                    if let Some(t) = table.as_mut() {
                        t.cell = Some(Vec::new());
                        t.span = 1;
                        t.merged = false;
                    }
                }
                b"vMerge" if depth == 1 => {
                    if let Some(t) = table.as_mut() {
                        t.merged = is_continuation(&e);
                    }
                }
                b"p" => para = Some(s!()),
                b"t" => in_text = true,
                _ => {}
            },
            Event::Empty(e) => match local(&e) {
                b"gridSpan" if depth == 1 => {
                    if let (Some(t), Some(n)) = (table.as_mut(), grid_span(&e)) {
                        t.span = n.max(1);
                    }
                }
                b"vMerge" if depth == 1 => {
                    if let Some(t) = table.as_mut() {
                        t.merged = is_continuation(&e);
                    }
                }
                b"br" | b"cr" => {
                    if let Some(p) = para.as_mut() {
                        p.push('\n');
                    }
                }
                b"tab" => {
                    if let Some(p) = para.as_mut() {
                        p.push(' ');
                    }
                }
                b"p" => close_paragraph(s!(), &mut table, &mut doc),
                _ => {}
            },
            Event::Text(t) if in_text => {
                let text = t
                    .unescape()
                    .map_err(|err| ExtractError::corrupt(DocumentKind::RichText, err))?;
                if let Some(p) = para.as_mut() {
                    p.push_str(&text);
                }
            }
            Event::End(e) => match e.local_name().as_ref() {
                b"t" => in_text = false,
                b"p" => {
                    if let Some(p) = para.take() {
                        close_paragraph(p, &mut table, &mut doc);
                    }
                }
                b"tc" if depth == 1 => {
                    if let Some(t) = table.as_mut() {
                        if let (Some(cell), Some(row)) = (t.cell.take(), t.row.as_mut()) {
                            let col = row.len();
                            let above = t.rows.last().and_then(|r| r.get(col));
                            let text = match above {
                                Some(above) if t.merged => above.clone(),
                                _ => cell.join("\n").trim().to_string(),
                            };
                            for _ in 0..t.span {
                                row.push(text.clone());
                            }
                        }
                    }
                }
                b"tr" if depth == 1 => {
                    if let Some(t) = table.as_mut() {
                        if let Some(row) = t.row.take() {
                            t.rows.push(row);
                        }
                    }
                }
                b"tbl" => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        if let Some(mut t) = table.take() {
                            drop_empty_rows(&mut t.rows);
                            doc.tables.push(t.rows);
                        }
                    }
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(doc)
}

fn local<'a>(e: &'a BytesStart<'_>) -> &'a [u8] {
    let name = e.name().into_inner();
    match name.iter().rposition(|&b| b == b':') {
        Some(i) => &name[i + 1..],
        None => name,
    }
}

/// `<w:vMerge/>` or `w:val="continue"`; `restart` opens a new merge.
fn is_continuation(e: &BytesStart<'_>) -> bool {
    !e.attributes()
        .flatten()
        .any(|a| a.key.local_name().as_ref() == b"val" && a.value.as_ref() == b"restart")
}

fn grid_span(e: &BytesStart<'_>) -> Option<usize> {
    e.attributes().flatten().find_map(|a| {
        if a.key.local_name().as_ref() == b"val" {
            std::str::from_utf8(&a.value).ok()?.trim().parse().ok()
        } else {
            None
        }
    })
}

/// A finished paragraph goes to the open cell, or to the document body.
fn close_paragraph(text: String, table: &mut Option<OpenTable>, doc: &mut ExtractedDocument) {
    let in_table = table.is_some();
    match table.as_mut().and_then(|t| t.cell.as_mut()) {
        Some(cell) => {
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                cell.push(s!(trimmed));
            }
        }
        None if !in_table => {
            let line = normalize_ws(&text);
            if !line.is_empty() {
                doc.paragraphs.push(line);
            }
        }
        None => {}
    }
}
