// src/error.rs
//! Error types, one enum per layer.
//!
//! Expected operating conditions (cache miss, month mismatch, no file for a
//! date during manual selection) are plain enums elsewhere, not errors.

use std::{io, path::PathBuf};

use chrono::NaiveDate;
use thiserror::Error;

use crate::extract::DocumentKind;
use crate::model::MonthYear;

/// Raised by the document decoders. Never carries a partial result.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("unreadable {kind} document: {reason}")]
    Corrupt { kind: DocumentKind, reason: String },

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl ExtractError {
    pub(crate) fn corrupt(kind: DocumentKind, reason: impl std::fmt::Display) -> Self {
        Self::Corrupt { kind, reason: reason.to_string() }
    }
}

/// Structural-format problems found while turning tables into records.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("header row with `{sentinel}` not found in any table")]
    MissingHeader { sentinel: &'static str },

    #[error("expected {expected} tables, found {found}")]
    TableCount { expected: usize, found: usize },

    #[error("could not infer month and year from the document")]
    MonthYearNotFound,

    #[error(transparent)]
    Extract(#[from] ExtractError),
}

/// Byte-source failures. Propagated unchanged, never retried.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("source unreachable: {0}")]
    Unreachable(String),

    #[error("HTTP {status} for {url}")]
    Status { status: u16, url: String },

    #[error("no such document: {0}")]
    NotFound(String),

    #[error(transparent)]
    Io(#[from] io::Error),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("cache I/O on {path}: {source}")]
    Io { path: PathBuf, source: io::Error },

    #[error("cache file {path} is not valid JSON: {source}")]
    Json { path: PathBuf, source: serde_json::Error },

    #[error("invalid cache contents: {0}")]
    Invalid(String),
}

/// Rejected `update(day, field, value)` requests.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditError {
    #[error("unknown shift field `{0}`")]
    UnknownField(String),

    #[error("no shift record for day {0}")]
    UnknownDay(u32),
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error(transparent)]
    Build(#[from] BuildError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Edit(#[from] EditError),

    #[error("no published document for {0}")]
    NoFileForDate(NaiveDate),

    #[error("no shift schedule cached for {0}")]
    NoShiftsFor(MonthYear),
}

/// Coarse classification callers use to pick a recovery path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Transport,
    Structural,
    NoMatch,
    Storage,
    Edit,
}

impl PipelineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Source(_) => ErrorKind::Transport,
            // Unreadable bytes count as transport: the source handed us garbage.
            Self::Extract(_) | Self::Build(BuildError::Extract(_)) => ErrorKind::Transport,
            Self::Build(_) => ErrorKind::Structural,
            Self::Store(_) => ErrorKind::Storage,
            Self::Edit(_) => ErrorKind::Edit,
            Self::NoFileForDate(_) | Self::NoShiftsFor(_) => ErrorKind::NoMatch,
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Transport => "transport",
            Self::Structural => "structural",
            Self::NoMatch => "no-match",
            Self::Storage => "storage",
            Self::Edit => "edit",
        })
    }
}
