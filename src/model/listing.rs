// src/model/listing.rs
use crate::extract::DocumentKind;

/// Which published listing to read.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListingKind {
    /// Daily on-duty hospital schedules.
    Duty,
    /// Monthly department shift documents.
    Shift,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
}

impl DocumentFormat {
    pub fn kind(self) -> DocumentKind {
        match self {
            DocumentFormat::Pdf => DocumentKind::TabularPdf,
            DocumentFormat::Docx => DocumentKind::RichText,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let lower = name.to_ascii_lowercase();
        if lower.ends_with(".pdf") {
            Some(DocumentFormat::Pdf)
        } else if lower.ends_with(".docx") {
            Some(DocumentFormat::Docx)
        } else {
            None
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryKind {
    Schedule,
    Unknown,
}

/// Best-effort date parts read from a listing entry's text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DateTokens {
    pub day: Option<u32>,
    pub month: Option<u32>,
    pub year: Option<i32>,
}

/// One downloadable document as advertised by a byte source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AvailableFileEntry {
    pub display_text: String,
    /// Opaque token handed back to `ByteSource::fetch`.
    pub identifier: String,
    pub format: DocumentFormat,
    pub kind: EntryKind,
    pub date: DateTokens,
}
