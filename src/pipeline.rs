// src/pipeline.rs
//! Top-level driver: document selection → extraction → records → cache.
//!
//! Daily duty data resolves through an ordered provider chain
//! (`Live`, `Cache`, `Sample`): the first provider that yields records
//! wins, every failure is logged with its error kind and the next one is
//! tried. Monthly shift documents are loaded on request and never replace
//! a different month's data without an explicit confirmation.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::NaiveDate;

use crate::config::options::PipelineOptions;
use crate::error::PipelineError;
use crate::extract::{self, DocumentKind};
use crate::model::{AvailableFileEntry, DutyRecord, ListingKind, MonthYear, ShiftSchedule};
use crate::normalize::NormalizationTables;
use crate::progress::Progress;
use crate::sample;
use crate::select::{MonthCheck, check_month_year, select_file};
use crate::source::ByteSource;
use crate::specs::{ScheduleBuilder, ShiftBuilder};
use crate::store::{CacheLookup, CacheStore};

/// Where a refresh got its records from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Provider {
    Live,
    Cache,
    Sample,
}

impl Provider {
    pub const CHAIN: [Provider; 3] = [Provider::Live, Provider::Cache, Provider::Sample];

    pub fn name(self) -> &'static str {
        match self {
            Provider::Live => "live",
            Provider::Cache => "cache",
            Provider::Sample => "sample",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RefreshOutcome {
    pub records: Vec<DutyRecord>,
    pub origin: Provider,
}

/// Result of loading a month document against the month the caller expects.
#[derive(Clone, Debug, PartialEq)]
pub enum ShiftLoad {
    /// Months agree; the schedule has been cached.
    Ready(ShiftSchedule),
    /// Months differ; nothing was cached. Pass the schedule to
    /// [`DutyPipeline::confirm_shifts`] to use it anyway.
    Mismatch { schedule: ShiftSchedule, found: MonthYear, expected: MonthYear },
}

pub struct DutyPipeline {
    options: PipelineOptions,
    tables: Arc<NormalizationTables>,
    store: CacheStore,
    source: Box<dyn ByteSource>,
}

impl DutyPipeline {
    pub fn new(options: PipelineOptions, tables: Arc<NormalizationTables>, source: Box<dyn ByteSource>) -> Self {
        let store = CacheStore::new(options.store_dir.clone());
        Self { options, tables, store, source }
    }

    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    pub fn store(&self) -> &CacheStore {
        &self.store
    }

    pub fn tables(&self) -> &NormalizationTables {
        &self.tables
    }

    fn chain(&self) -> Vec<Provider> {
        Provider::CHAIN
            .into_iter()
            .filter(|p| *p != Provider::Sample || self.options.use_sample_fallback)
            .collect()
    }

    /// Duty records for `date` from the first provider that has them.
    ///
    /// Only fails when every provider failed and the sample tier is disabled.
    pub fn refresh(&self, date: NaiveDate, progress: &mut dyn Progress) -> Result<RefreshOutcome, PipelineError> {
        let chain = self.chain();
        progress.begin(chain.len());
        let mut last_err = None;

        for provider in chain {
            progress.log(&format!("Trying {provider} data for {date}"));
            match self.provide(provider, date) {
                Ok(Some(records)) => {
                    logf!("Refresh {}: {} record(s) from {}", date, records.len(), provider);
                    progress.item_done(provider.name());
                    progress.finish();
                    return Ok(RefreshOutcome { records, origin: provider });
                }
                Ok(None) => {
                    logf!("Refresh {}: {} had nothing", date, provider);
                    progress.item_failed(provider.name(), "no records");
                }
                Err(e) => {
                    logw!("Refresh {}: {} failed ({}): {}", date, provider, e.kind(), e);
                    progress.item_failed(provider.name(), &e.to_string());
                    last_err = Some(e);
                }
            }
        }

        progress.finish();
        Err(last_err.unwrap_or(PipelineError::NoFileForDate(date)))
    }

    fn provide(&self, provider: Provider, date: NaiveDate) -> Result<Option<Vec<DutyRecord>>, PipelineError> {
        match provider {
            Provider::Live => {
                let records = self.fetch_live(date)?;
                if records.is_empty() {
                    return Ok(None);
                }
                if let Err(e) = self.store.save_duties(date, &records) {
                    // The records are still good; only the snapshot is lost.
                    loge!("Could not cache duty records: {}", e);
                }
                Ok(Some(records))
            }
            Provider::Cache => match self.store.load_duties(date)? {
                CacheLookup::Hit(records) if !records.is_empty() => Ok(Some(records)),
                _ => Ok(None),
            },
            Provider::Sample => Ok(Some(sample::duty_records(date))),
        }
    }

    /// The live tier alone: listing → selection → fetch → extract → build.
    pub fn fetch_live(&self, date: NaiveDate) -> Result<Vec<DutyRecord>, PipelineError> {
        let entries = self.source.list_available(ListingKind::Duty)?;
        let entry = select_file(&entries, date).ok_or(PipelineError::NoFileForDate(date))?;
        let bytes = self.source.fetch(&entry.identifier)?;
        let doc = extract::extract(&bytes, entry.format.kind())?;
        Ok(ScheduleBuilder::new(&self.tables).build(&doc.tables, date)?)
    }

    pub fn list_documents(&self, kind: ListingKind) -> Result<Vec<AvailableFileEntry>, PipelineError> {
        Ok(self.source.list_available(kind)?)
    }

    /// Parse a month document. A matching month is cached right away; a
    /// different month is handed back for the operator to decide.
    pub fn load_shift_document(&self, bytes: &[u8], expected: MonthYear) -> Result<ShiftLoad, PipelineError> {
        let doc = extract::extract(bytes, DocumentKind::RichText)?;
        let schedule = ShiftBuilder::new(&self.tables).build(&doc)?;

        match check_month_year(schedule.period(), expected) {
            MonthCheck::Match => {
                self.store.save_shifts(&schedule)?;
                Ok(ShiftLoad::Ready(schedule))
            }
            MonthCheck::Mismatch { found, expected } => {
                logw!("Shift document is for {}, expected {}", found, expected);
                Ok(ShiftLoad::Mismatch { schedule, found, expected })
            }
        }
    }

    /// Fetch a month document from the byte source by identifier, then load it.
    pub fn load_shift_file(&self, identifier: &str, expected: MonthYear) -> Result<ShiftLoad, PipelineError> {
        let bytes = self.source.fetch(identifier)?;
        self.load_shift_document(&bytes, expected)
    }

    /// Operator accepted a schedule (possibly for another month): cache it as is.
    pub fn confirm_shifts(&self, schedule: &ShiftSchedule) -> Result<PathBuf, PipelineError> {
        Ok(self.store.save_shifts(schedule)?)
    }

    pub fn cached_shifts(&self, period: MonthYear) -> Result<CacheLookup<ShiftSchedule>, PipelineError> {
        Ok(self.store.load_shifts(period)?)
    }

    /// Edit one field of one day in the cached schedule and write it back.
    pub fn edit_shift(&self, period: MonthYear, day: u32, field: &str, value: &str) -> Result<ShiftSchedule, PipelineError> {
        let mut schedule = self
            .cached_shifts(period)?
            .hit()
            .ok_or(PipelineError::NoShiftsFor(period))?;
        schedule.update(day, field, value)?;
        self.store.save_shifts(&schedule)?;
        Ok(schedule)
    }
}
