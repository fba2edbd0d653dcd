// src/source.rs
//! Where document bytes come from.
//!
//! The pipeline only sees [`ByteSource`]: a listing of available documents
//! and a way to fetch one by identifier. Transport errors are returned as
//! they are; nothing here retries.

use std::fs;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use crate::error::SourceError;
use crate::model::{AvailableFileEntry, DocumentFormat, ListingKind};
use crate::normalize::NormalizationTables;
use crate::specs::listing::infer_entry;

pub trait ByteSource {
    fn list_available(&self, kind: ListingKind) -> Result<Vec<AvailableFileEntry>, SourceError>;
    fn fetch(&self, identifier: &str) -> Result<Vec<u8>, SourceError>;
}

/// A directory of already-downloaded documents. Identifiers are file names.
pub struct LocalDirSource {
    dir: PathBuf,
    tables: Arc<NormalizationTables>,
}

impl LocalDirSource {
    pub fn new(dir: impl Into<PathBuf>, tables: Arc<NormalizationTables>) -> Self {
        Self { dir: dir.into(), tables }
    }

    fn resolve(&self, identifier: &str) -> Result<PathBuf, SourceError> {
        let rel = Path::new(identifier);
        let plain = rel.components().count() == 1
            && matches!(rel.components().next(), Some(Component::Normal(_)));
        if !plain {
            return Err(SourceError::NotFound(s!(identifier)));
        }
        Ok(self.dir.join(rel))
    }
}

impl ByteSource for LocalDirSource {
    fn list_available(&self, kind: ListingKind) -> Result<Vec<AvailableFileEntry>, SourceError> {
        let mut found: Vec<(SystemTime, String, DocumentFormat)> = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            let Ok(name) = entry.file_name().into_string() else { continue };
            let Some(format) = DocumentFormat::from_name(&name) else { continue };
            if kind == ListingKind::Shift && format != DocumentFormat::Docx {
                continue;
            }
            let mtime = entry
                .metadata()
                .and_then(|m| m.modified())
                .unwrap_or(SystemTime::UNIX_EPOCH);
            found.push((mtime, name, format));
        }
        // Newest first, name as tie-break so the order is stable.
        found.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(&b.1)));

        Ok(found
            .into_iter()
            .map(|(_, name, format)| {
                let stem = Path::new(&name)
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or(&name)
                    .to_string();
                infer_entry(stem, name, format, &self.tables)
            })
            .collect())
    }

    fn fetch(&self, identifier: &str) -> Result<Vec<u8>, SourceError> {
        let path = self.resolve(identifier)?;
        fs::read(&path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => SourceError::NotFound(s!(identifier)),
            _ => SourceError::Io(e),
        })
    }
}

#[cfg(feature = "net")]
pub use http::HttpSource;

#[cfg(feature = "net")]
mod http {
    use std::io::Read;
    use std::sync::Arc;
    use std::time::Duration;

    use super::ByteSource;
    use crate::config::consts::{HTTP_TIMEOUT_SECS, MAX_DOCUMENT_BYTES, USER_AGENT};
    use crate::error::SourceError;
    use crate::model::{AvailableFileEntry, ListingKind};
    use crate::normalize::NormalizationTables;
    use crate::specs::listing::parse_listing;

    /// The ministry's listing page and its `?fdl=<id>` downloads.
    pub struct HttpSource {
        agent: ureq::Agent,
        listing_url: String,
        tables: Arc<NormalizationTables>,
    }

    impl HttpSource {
        pub fn new(listing_url: impl Into<String>, tables: Arc<NormalizationTables>) -> Self {
            let agent = ureq::AgentBuilder::new()
                .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
                .user_agent(USER_AGENT)
                .build();
            Self { agent, listing_url: listing_url.into(), tables }
        }

        fn get(&self, url: &str) -> Result<ureq::Response, SourceError> {
            logd!("GET {}", url);
            self.agent.get(url).call().map_err(|err| match err {
                ureq::Error::Status(status, _) => SourceError::Status { status, url: s!(url) },
                ureq::Error::Transport(t) => SourceError::Unreachable(t.to_string()),
            })
        }
    }

    impl ByteSource for HttpSource {
        fn list_available(&self, kind: ListingKind) -> Result<Vec<AvailableFileEntry>, SourceError> {
            if kind == ListingKind::Shift {
                // Department shift documents are not published online.
                return Ok(Vec::new());
            }
            let html = self.get(&self.listing_url)?.into_string()?;
            Ok(parse_listing(&html, &self.tables))
        }

        fn fetch(&self, identifier: &str) -> Result<Vec<u8>, SourceError> {
            let url = format!("{}?fdl={}", self.listing_url, identifier);
            let mut bytes = Vec::new();
            self.get(&url)?
                .into_reader()
                .take(MAX_DOCUMENT_BYTES)
                .read_to_end(&mut bytes)?;
            logd!("Fetched {} byte(s) for fdl={}", bytes.len(), identifier);
            Ok(bytes)
        }
    }
}
