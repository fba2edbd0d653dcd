// src/store.rs
//! On-disk snapshots of the last good duty and shift data.
//!
//! One pretty-printed JSON file per record family under the store
//! directory. A snapshot answers a request only when its validity key
//! matches exactly; otherwise the caller gets a miss, with the stale
//! snapshot attached so an operator can still choose to use it.
//!
//! ```json
//! {
//!   "valid_for": "2025-10-14",
//!   "generated_at": "2025-10-14T08:00:03.120+03:00",
//!   "records": { "2025-10-14": [ { "institution": "...", ... } ] }
//! }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, NaiveDate};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::consts::{DUTY_CACHE_FILE, SHIFT_CACHE_FILE};
use crate::error::StoreError;
use crate::model::{DailyShiftRecord, DutyRecord, MonthYear, ShiftSchedule};

/// What a snapshot is valid for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ValidityKey {
    Date(NaiveDate),
    MonthYear(MonthYear),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CacheSnapshot<B> {
    pub valid_for: ValidityKey,
    pub generated_at: DateTime<Local>,
    pub records: B,
}

/// Duty records keyed by ISO date.
pub type DutyBody = BTreeMap<String, Vec<DutyRecord>>;
/// Shift records keyed by day of month.
pub type ShiftBody = BTreeMap<u32, DailyShiftRecord>;

/// A snapshot for some other key, offered for manual override.
#[derive(Clone, Debug, PartialEq)]
pub struct Stale<T> {
    pub valid_for: ValidityKey,
    pub generated_at: DateTime<Local>,
    pub value: T,
}

#[derive(Clone, Debug, PartialEq)]
pub enum CacheLookup<T> {
    Hit(T),
    Miss { stale: Option<Stale<T>> },
}

impl<T> CacheLookup<T> {
    pub fn is_hit(&self) -> bool {
        matches!(self, CacheLookup::Hit(_))
    }

    pub fn hit(self) -> Option<T> {
        match self {
            CacheLookup::Hit(v) => Some(v),
            CacheLookup::Miss { .. } => None,
        }
    }
}

pub struct CacheStore {
    dir: PathBuf,
}

impl CacheStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn duty_path(&self) -> PathBuf {
        self.dir.join(DUTY_CACHE_FILE)
    }

    pub fn shift_path(&self) -> PathBuf {
        self.dir.join(SHIFT_CACHE_FILE)
    }

    pub fn save_duties(&self, date: NaiveDate, records: &[DutyRecord]) -> Result<PathBuf, StoreError> {
        let mut body = DutyBody::new();
        body.insert(date.to_string(), records.to_vec());
        let snap = CacheSnapshot {
            valid_for: ValidityKey::Date(date),
            generated_at: Local::now(),
            records: body,
        };
        let path = self.duty_path();
        write_json(&path, &snap)?;
        logf!("Cached {} duty record(s) for {} in {}", records.len(), date, path.display());
        Ok(path)
    }

    pub fn load_duties(&self, date: NaiveDate) -> Result<CacheLookup<Vec<DutyRecord>>, StoreError> {
        let path = self.duty_path();
        let Some(snap) = read_json::<DutyBody>(&path)? else {
            logd!("Duty cache {} absent", path.display());
            return Ok(CacheLookup::Miss { stale: None });
        };
        let records: Vec<DutyRecord> = snap.records.into_values().flatten().collect();

        if snap.valid_for == ValidityKey::Date(date) {
            logf!("Duty cache hit for {} ({} record(s))", date, records.len());
            return Ok(CacheLookup::Hit(records));
        }
        logf!("Duty cache is for {:?}, not {}", snap.valid_for, date);
        Ok(CacheLookup::Miss {
            stale: Some(Stale { valid_for: snap.valid_for, generated_at: snap.generated_at, value: records }),
        })
    }

    pub fn save_shifts(&self, schedule: &ShiftSchedule) -> Result<PathBuf, StoreError> {
        let snap = CacheSnapshot {
            valid_for: ValidityKey::MonthYear(schedule.period()),
            generated_at: Local::now(),
            records: schedule.days.clone(),
        };
        let path = self.shift_path();
        write_json(&path, &snap)?;
        logf!("Cached {} shift day(s) for {} in {}", schedule.days.len(), schedule.period(), path.display());
        Ok(path)
    }

    pub fn load_shifts(&self, period: MonthYear) -> Result<CacheLookup<ShiftSchedule>, StoreError> {
        let path = self.shift_path();
        let Some(snap) = read_json::<ShiftBody>(&path)? else {
            logd!("Shift cache {} absent", path.display());
            return Ok(CacheLookup::Miss { stale: None });
        };
        let ValidityKey::MonthYear(found) = snap.valid_for else {
            return Err(StoreError::Invalid(format!(
                "{} is keyed by {:?}, expected a month",
                path.display(),
                snap.valid_for
            )));
        };
        let schedule = ShiftSchedule { month: found.month, year: found.year, days: snap.records };

        if found == period {
            logf!("Shift cache hit for {}", period);
            return Ok(CacheLookup::Hit(schedule));
        }
        logf!("Shift cache is for {}, not {}", found, period);
        Ok(CacheLookup::Miss {
            stale: Some(Stale { valid_for: snap.valid_for, generated_at: snap.generated_at, value: schedule }),
        })
    }
}

fn write_json<B: Serialize>(path: &Path, snap: &CacheSnapshot<B>) -> Result<(), StoreError> {
    let io_err = |source| StoreError::Io { path: path.to_path_buf(), source };
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
    }
    let json = serde_json::to_string_pretty(snap)
        .map_err(|source| StoreError::Json { path: path.to_path_buf(), source })?;
    fs::write(path, json).map_err(io_err)
}

/// `Ok(None)` when the file does not exist.
fn read_json<B: DeserializeOwned>(path: &Path) -> Result<Option<CacheSnapshot<B>>, StoreError> {
    let text = match fs::read_to_string(path) {
        Ok(t) => t,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => return Err(StoreError::Io { path: path.to_path_buf(), source }),
    };
    serde_json::from_str(&text)
        .map(Some)
        .map_err(|source| StoreError::Json { path: path.to_path_buf(), source })
}
