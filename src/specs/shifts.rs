// src/specs/shifts.rs
//! Monthly department shift document (DOCX).
//!
//! Exactly two tables:
//! 1. attendings: `[day, month, weekday, names...]`, names one per line, a
//!    trailing `*` marks readiness and is dropped;
//! 2. residents: header row, then `[day, month, weekday, major, minor,
//!    on-call, anaesthetist 1?, anaesthetist 2?, paediatric cardiologist?]`.
//!
//! Records merge by day number. Weekday and month text come from whichever
//! table mentions the day first.

use crate::config::consts::{ATTENDING_MIN_CELLS, RESIDENT_MIN_CELLS, SHIFT_TABLES};
use crate::core::greek::{find_year, numeric_value};
use crate::core::sanitize::{cell_lines, strip_readiness};
use crate::error::BuildError;
use crate::extract::{ExtractedDocument, Row, Table};
use crate::model::{DailyShiftRecord, MonthYear, ShiftSchedule};
use crate::normalize::NormalizationTables;

pub struct ShiftBuilder<'t> {
    tables: &'t NormalizationTables,
}

impl<'t> ShiftBuilder<'t> {
    pub fn new(tables: &'t NormalizationTables) -> Self {
        Self { tables }
    }

    pub fn build(&self, doc: &ExtractedDocument) -> Result<ShiftSchedule, BuildError> {
        if doc.tables.len() != SHIFT_TABLES {
            return Err(BuildError::TableCount { expected: SHIFT_TABLES, found: doc.tables.len() });
        }
        let period = self.infer_month_year(doc).ok_or(BuildError::MonthYearNotFound)?;
        let mut schedule = ShiftSchedule::new(period);
        let last_day = period.days().unwrap_or(31);

        self.read_attendings(&doc.tables[0], last_day, &mut schedule);
        self.read_residents(&doc.tables[1], last_day, &mut schedule);

        logf!("Shift schedule {}: {} day(s)", period, schedule.days.len());
        Ok(schedule)
    }

    /// Paragraphs first, then table cells, left to right. The first text
    /// naming exactly one month fixes the month, and its own `20xx` fixes
    /// the year. Only when that text has no year does the first `20xx`
    /// anywhere in the document stand in.
    pub fn infer_month_year(&self, doc: &ExtractedDocument) -> Option<MonthYear> {
        let texts = || doc.paragraphs.iter().chain(doc.tables.iter().flatten().flatten());

        let Some((month, own_year)) = texts().find_map(|text| match self.tables.months_in(text)[..] {
            [only] => Some((only, find_year(text))),
            _ => None,
        }) else {
            logw!("Shift document: no text names a single month");
            return None;
        };

        match own_year.or_else(|| texts().find_map(|text| find_year(text))) {
            Some(year) => Some(MonthYear::new(month, year)),
            None => {
                logw!("Shift document: month {} but no year", month);
                None
            }
        }
    }

    fn read_attendings(&self, table: &Table, last_day: u32, schedule: &mut ShiftSchedule) {
        for row in table {
            if row.len() < ATTENDING_MIN_CELLS {
                continue;
            }
            let Some(day) = day_of(row, last_day) else { continue };
            let names: Vec<String> = cell_lines(&row[3])
                .map(strip_readiness)
                .filter(|n| !n.is_empty())
                .collect();
            entry(schedule, day, row).attendings = names;
        }
    }

    fn read_residents(&self, table: &Table, last_day: u32, schedule: &mut ShiftSchedule) {
        for row in table.iter().skip(1) {
            if row.len() < RESIDENT_MIN_CELLS {
                continue;
            }
            let Some(day) = day_of(row, last_day) else { continue };
            let rec = entry(schedule, day, row);
            rec.major_shift = optional(row, 3);
            rec.minor_shift = optional(row, 4);
            rec.on_call_specialist = optional(row, 5);
            rec.anesthesiologist_1 = optional(row, 6);
            rec.anesthesiologist_2 = optional(row, 7);
            rec.pediatric_cardiologist = optional(row, 8);
        }
    }
}

/// Day number from column 0; rows that are not days (headers, notes) yield `None`.
fn day_of(row: &Row, last_day: u32) -> Option<u32> {
    let day = numeric_value(row[0].trim())?;
    if day == 0 || day > last_day {
        logw!("Shift row for day {} outside the month (1..={}), skipped", day, last_day);
        return None;
    }
    Some(day)
}

fn entry<'s>(schedule: &'s mut ShiftSchedule, day: u32, row: &Row) -> &'s mut DailyShiftRecord {
    schedule
        .days
        .entry(day)
        .or_insert_with(|| DailyShiftRecord::new(day, s!(row[1].trim()), s!(row[2].trim())))
}

fn optional(row: &Row, col: usize) -> Option<String> {
    row.get(col)
        .map(|c| c.trim())
        .filter(|c| !c.is_empty())
        .map(str::to_string)
}
