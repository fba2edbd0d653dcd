// src/lib.rs
//! On-duty hospital schedules and department shift rosters, read from the
//! tables in government-published PDF/DOCX documents.

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod config;
pub mod core;
pub mod error;
pub mod extract;
pub mod model;
pub mod normalize;
pub mod pipeline;
pub mod progress;
pub mod sample;
pub mod select;
pub mod source;
pub mod specs;
pub mod store;

#[cfg(feature = "cli")]
pub mod cli;

pub use config::options::{LogOptions, PipelineOptions};
pub use error::{ErrorKind, PipelineError};
pub use model::{DailyShiftRecord, DutyRecord, MonthYear, ShiftSchedule, TimeSlot};
pub use normalize::NormalizationTables;
pub use pipeline::{DutyPipeline, Provider, RefreshOutcome, ShiftLoad};
pub use store::{CacheLookup, CacheStore};
