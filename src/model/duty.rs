// src/model/duty.rs
use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::greek::fold;

/// The five duty windows, in the column order of the published tables.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TimeSlot {
    #[serde(rename = "08:00-14:30")]
    Morning,
    #[serde(rename = "08:00-16:00")]
    ExtendedMorning,
    #[serde(rename = "08:00-23:00")]
    Day,
    #[serde(rename = "14:30-08:00 επομένης")]
    EveningToNextMorning,
    #[serde(rename = "08:00-08:00 επομένης")]
    FullDay,
}

impl TimeSlot {
    pub const ALL: [TimeSlot; 5] = [
        TimeSlot::Morning,
        TimeSlot::ExtendedMorning,
        TimeSlot::Day,
        TimeSlot::EveningToNextMorning,
        TimeSlot::FullDay,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TimeSlot::Morning => "08:00-14:30",
            TimeSlot::ExtendedMorning => "08:00-16:00",
            TimeSlot::Day => "08:00-23:00",
            TimeSlot::EveningToNextMorning => "14:30-08:00 επομένης",
            TimeSlot::FullDay => "08:00-08:00 επομένης",
        }
    }

    /// Table column (1-based, column 0 is the specialty) → slot.
    pub fn from_column(col: usize) -> Option<Self> {
        col.checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One institution on duty for one specialty and window on one date.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DutyRecord {
    pub institution: String,
    pub specialty: String,
    pub time_slot: TimeSlot,
    pub duty_date: NaiveDate,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub area: String,
}

impl DutyRecord {
    pub fn new(institution: String, specialty: String, time_slot: TimeSlot, duty_date: NaiveDate) -> Self {
        Self {
            institution,
            specialty,
            time_slot,
            duty_date,
            address: s!(),
            phone: s!(),
            area: s!(),
        }
    }

    /// Greek half of the bilingual specialty label.
    pub fn greek_specialty(&self) -> &str {
        self.specialty
            .split(" / ")
            .next()
            .unwrap_or(&self.specialty)
            .trim()
    }
}

/// Records whose Greek specialty label starts with `prefix` (accent- and case-insensitive).
pub fn filter_by_specialty<'a>(records: &'a [DutyRecord], prefix: &str) -> Vec<&'a DutyRecord> {
    let want = fold(prefix.trim());
    records
        .iter()
        .filter(|r| fold(r.greek_specialty()).starts_with(&want))
        .collect()
}

/// Records whose area mentions `keyword` anywhere (accent- and case-insensitive).
/// A blank keyword matches everything.
pub fn filter_by_area<'a>(records: &'a [DutyRecord], keyword: &str) -> Vec<&'a DutyRecord> {
    let want = fold(keyword.trim());
    records
        .iter()
        .filter(|r| fold(&r.area).contains(&want))
        .collect()
}

/// Sorted, de-duplicated Greek specialty labels.
pub fn specialties(records: &[DutyRecord]) -> Vec<String> {
    let mut out: Vec<String> = records.iter().map(|r| s!(r.greek_specialty())).collect();
    out.sort();
    out.dedup();
    out
}

/// Full specialty label → records, keeping record order within each group.
pub fn group_by_specialty(records: &[DutyRecord]) -> BTreeMap<&str, Vec<&DutyRecord>> {
    let mut out: BTreeMap<&str, Vec<&DutyRecord>> = BTreeMap::new();
    for r in records {
        out.entry(r.specialty.as_str()).or_default().push(r);
    }
    out
}
