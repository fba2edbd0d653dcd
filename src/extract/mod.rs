// src/extract/mod.rs
//! Raw document bytes → tables of cell strings.
//!
//! Both decoders return every table they find, in document order. Cells
//! keep their internal line breaks; a cell is never split across columns.
//! Unreadable input is a hard [`ExtractError`], never a partial result.

use std::fmt;

use crate::error::ExtractError;

pub mod docx;
pub mod grid;
pub mod pdf;

pub type Row = Vec<String>;
pub type Table = Vec<Row>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DocumentKind {
    /// Ruled tables laid out on PDF pages.
    TabularPdf,
    /// Word-processing document (DOCX) carrying real table markup.
    RichText,
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DocumentKind::TabularPdf => "PDF",
            DocumentKind::RichText => "DOCX",
        })
    }
}

/// Tables plus the free text around them (titles, captions).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExtractedDocument {
    pub paragraphs: Vec<String>,
    pub tables: Vec<Table>,
}

pub fn extract(bytes: &[u8], kind: DocumentKind) -> Result<ExtractedDocument, ExtractError> {
    let doc = match kind {
        DocumentKind::TabularPdf => pdf::extract(bytes)?,
        DocumentKind::RichText => docx::extract(bytes)?,
    };
    logd!(
        "Extracted {} table(s), {} paragraph(s) from {} ({} bytes)",
        doc.tables.len(),
        doc.paragraphs.len(),
        kind,
        bytes.len()
    );
    Ok(doc)
}

pub fn extract_tables(bytes: &[u8], kind: DocumentKind) -> Result<Vec<Table>, ExtractError> {
    extract(bytes, kind).map(|doc| doc.tables)
}

/// Drop rows whose cells are all blank.
pub(crate) fn drop_empty_rows(table: &mut Table) {
    table.retain(|row| row.iter().any(|c| !c.trim().is_empty()));
}
