// src/model/shift.rs
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::EditError;
use crate::select::{MonthCheck, check_month_year};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MonthYear {
    pub month: u32,
    pub year: i32,
}

impl MonthYear {
    pub fn new(month: u32, year: i32) -> Self {
        Self { month, year }
    }

    pub fn of(date: NaiveDate) -> Self {
        Self { month: date.month(), year: date.year() }
    }

    /// Number of days in this month, `None` for an invalid month.
    pub fn days(self) -> Option<u32> {
        let first = NaiveDate::from_ymd_opt(self.year, self.month, 1)?;
        let next = if self.month == 12 {
            NaiveDate::from_ymd_opt(self.year + 1, 1, 1)?
        } else {
            NaiveDate::from_ymd_opt(self.year, self.month + 1, 1)?
        };
        u32::try_from(next.signed_duration_since(first).num_days()).ok()
    }
}

impl fmt::Display for MonthYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{}", self.month, self.year)
    }
}

/// One calendar day's physician assignments.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyShiftRecord {
    pub day: u32,
    /// Genitive month as printed, e.g. "ΟΚΤΩΒΡΙΟΥ".
    pub month_name: String,
    pub weekday: String,
    pub attendings: Vec<String>,
    pub major_shift: Option<String>,
    pub minor_shift: Option<String>,
    pub on_call_specialist: Option<String>,
    pub senior_cardiac_surgeon: Option<String>,
    pub junior_cardiac_surgeon: Option<String>,
    pub anesthesiologist_1: Option<String>,
    pub anesthesiologist_2: Option<String>,
    pub pediatric_cardiologist: Option<String>,
}

impl DailyShiftRecord {
    pub fn new(day: u32, month_name: String, weekday: String) -> Self {
        Self { day, month_name, weekday, ..Self::default() }
    }

    fn slot_mut(&mut self, field: ShiftField) -> Option<&mut Option<String>> {
        Some(match field {
            ShiftField::Attendings => return None,
            ShiftField::MajorShift => &mut self.major_shift,
            ShiftField::MinorShift => &mut self.minor_shift,
            ShiftField::OnCallSpecialist => &mut self.on_call_specialist,
            ShiftField::SeniorCardiacSurgeon => &mut self.senior_cardiac_surgeon,
            ShiftField::JuniorCardiacSurgeon => &mut self.junior_cardiac_surgeon,
            ShiftField::Anesthesiologist1 => &mut self.anesthesiologist_1,
            ShiftField::Anesthesiologist2 => &mut self.anesthesiologist_2,
            ShiftField::PediatricCardiologist => &mut self.pediatric_cardiologist,
        })
    }

    /// `attendings` takes a comma-separated list; other fields clear on blank.
    pub fn set(&mut self, field: ShiftField, value: &str) {
        match self.slot_mut(field) {
            Some(slot) => {
                let v = value.trim();
                *slot = (!v.is_empty()).then(|| s!(v));
            }
            None => {
                self.attendings = value
                    .split(',')
                    .map(str::trim)
                    .filter(|n| !n.is_empty())
                    .map(str::to_string)
                    .collect();
            }
        }
    }
}

impl fmt::Display for DailyShiftRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.attendings.is_empty() {
            write!(f, "Επιμελητές: Κανένας")?;
        } else {
            write!(f, "Επιμελητές: {}", self.attendings.join(", "))?;
        }
        let optional = [
            ("Μεγάλη Εφημερία", &self.major_shift),
            ("Μικρή Εφημερία", &self.minor_shift),
            ("ΤΕΠ", &self.on_call_specialist),
            ("Καρδιοχειρουργός 1", &self.senior_cardiac_surgeon),
            ("Καρδιοχειρουργός 2", &self.junior_cardiac_surgeon),
            ("Αναισθησιολόγος 1", &self.anesthesiologist_1),
            ("Αναισθησιολόγος 2", &self.anesthesiologist_2),
            ("Παιδοκαρδιολόγος", &self.pediatric_cardiologist),
        ];
        for (label, value) in optional {
            if let Some(v) = value {
                write!(f, " | {label}: {v}")?;
            }
        }
        Ok(())
    }
}

/// Fields a consumer may edit through [`ShiftSchedule::update`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShiftField {
    Attendings,
    MajorShift,
    MinorShift,
    OnCallSpecialist,
    SeniorCardiacSurgeon,
    JuniorCardiacSurgeon,
    Anesthesiologist1,
    Anesthesiologist2,
    PediatricCardiologist,
}

impl ShiftField {
    pub const ALL: [ShiftField; 9] = [
        ShiftField::Attendings,
        ShiftField::MajorShift,
        ShiftField::MinorShift,
        ShiftField::OnCallSpecialist,
        ShiftField::SeniorCardiacSurgeon,
        ShiftField::JuniorCardiacSurgeon,
        ShiftField::Anesthesiologist1,
        ShiftField::Anesthesiologist2,
        ShiftField::PediatricCardiologist,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ShiftField::Attendings => "attendings",
            ShiftField::MajorShift => "major_shift",
            ShiftField::MinorShift => "minor_shift",
            ShiftField::OnCallSpecialist => "on_call_specialist",
            ShiftField::SeniorCardiacSurgeon => "senior_cardiac_surgeon",
            ShiftField::JuniorCardiacSurgeon => "junior_cardiac_surgeon",
            ShiftField::Anesthesiologist1 => "anesthesiologist_1",
            ShiftField::Anesthesiologist2 => "anesthesiologist_2",
            ShiftField::PediatricCardiologist => "pediatric_cardiologist",
        }
    }
}

impl FromStr for ShiftField {
    type Err = EditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.name() == s)
            .ok_or_else(|| EditError::UnknownField(s!(s)))
    }
}

/// A month's worth of shift records, indexed by day.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShiftSchedule {
    pub month: u32,
    pub year: i32,
    pub days: BTreeMap<u32, DailyShiftRecord>,
}

impl ShiftSchedule {
    pub fn new(period: MonthYear) -> Self {
        Self { month: period.month, year: period.year, days: BTreeMap::new() }
    }

    pub fn period(&self) -> MonthYear {
        MonthYear::new(self.month, self.year)
    }

    pub fn get_day(&self, day: u32) -> Option<&DailyShiftRecord> {
        self.days.get(&day)
    }

    /// `None` when `date` falls outside this schedule's month.
    pub fn get_for_date(&self, date: NaiveDate) -> Option<&DailyShiftRecord> {
        if MonthYear::of(date) != self.period() {
            return None;
        }
        self.days.get(&date.day())
    }

    pub fn check_month(&self, expected_month: u32, expected_year: i32) -> MonthCheck {
        check_month_year(self.period(), MonthYear::new(expected_month, expected_year))
    }

    /// Field-level edit of one day's record.
    pub fn update(&mut self, day: u32, field: &str, value: &str) -> Result<(), EditError> {
        let field: ShiftField = field.parse()?;
        let record = self.days.get_mut(&day).ok_or(EditError::UnknownDay(day))?;
        record.set(field, value);
        logd!("Shift {}/{}: {} updated", day, self.month, field.name());
        Ok(())
    }
}

impl fmt::Display for ShiftSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rec in self.days.values() {
            writeln!(f, "{} {} ({}): {}", rec.day, rec.month_name, rec.weekday, rec)?;
        }
        Ok(())
    }
}
