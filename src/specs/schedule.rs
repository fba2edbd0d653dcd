// src/specs/schedule.rs
//! Daily duty schedule.
//!
//! Layout (one table per PDF page, or one per DOCX table):
//! ```text
//! | Κλινικές     | 08:00-14:30 | 08:00-16:00 | 08:00-23:00 | 14:30-08:00 | 08:00-08:00 |
//! | Καρδιολογική | ΛΑΪΚΟ       |             |             | ΚΑΤ\nΕΛΠΙΣ  |             |
//! ```
//! The header row is found by its first-column label within the first few
//! rows. A later table without its own header is accepted as a continuation
//! (page break) when it has the same number of columns.

use chrono::NaiveDate;

use crate::config::consts::{HEADER_SCAN_ROWS, HEADER_SENTINEL};
use crate::core::greek::fold;
use crate::core::sanitize::{cell_lines, strip_markers};
use crate::error::BuildError;
use crate::extract::{Row, Table};
use crate::model::{DutyRecord, TimeSlot};
use crate::normalize::NormalizationTables;

pub struct ScheduleBuilder<'t> {
    tables: &'t NormalizationTables,
    sentinel: String,
}

impl<'t> ScheduleBuilder<'t> {
    pub fn new(tables: &'t NormalizationTables) -> Self {
        Self { tables, sentinel: fold(HEADER_SENTINEL) }
    }

    /// Duty records for `date`, in table/row/column order.
    ///
    /// No tables (or only empty ones) is an empty result; tables without
    /// any header row are a [`BuildError::MissingHeader`].
    pub fn build(&self, extracted: &[Table], date: NaiveDate) -> Result<Vec<DutyRecord>, BuildError> {
        if extracted.iter().all(|t| t.is_empty()) {
            logf!("Duty schedule for {}: no tables", date);
            return Ok(Vec::new());
        }

        let mut out = Vec::new();
        let mut header_width: Option<usize> = None;

        for (ti, table) in extracted.iter().enumerate() {
            let data: &[Row] = match self.header_index(table) {
                Some(h) => {
                    header_width = table.get(h).map(Vec::len);
                    &table[h + 1..]
                }
                None => match (header_width, table.first()) {
                    (Some(w), Some(first)) if first.len() == w => {
                        logd!("Table {}: no header, continuing previous table", ti);
                        &table[..]
                    }
                    _ => {
                        logw!("Table {}: no `{}` header, skipped", ti, HEADER_SENTINEL);
                        continue;
                    }
                },
            };

            for row in data {
                self.emit_row(row, date, &mut out);
            }
        }

        if header_width.is_none() {
            return Err(BuildError::MissingHeader { sentinel: HEADER_SENTINEL });
        }
        logf!("Duty schedule for {}: {} record(s)", date, out.len());
        Ok(out)
    }

    fn is_sentinel(&self, cell: &str) -> bool {
        fold(cell).contains(&self.sentinel)
    }

    fn header_index(&self, table: &Table) -> Option<usize> {
        table
            .iter()
            .take(HEADER_SCAN_ROWS)
            .position(|row| row.iter().any(|c| self.is_sentinel(c)))
    }

    fn emit_row(&self, row: &Row, date: NaiveDate, out: &mut Vec<DutyRecord>) {
        let Some(raw_specialty) = row.first().map(|c| c.trim()) else { return };
        if raw_specialty.is_empty() || row.len() < 2 || self.is_sentinel(raw_specialty) {
            return;
        }
        let specialty = self.tables.specialty(raw_specialty);

        for (col, cell) in row.iter().enumerate().skip(1) {
            let Some(slot) = TimeSlot::from_column(col) else { break };
            for line in cell_lines(cell) {
                let name = strip_markers(line);
                if name.is_empty() {
                    continue;
                }
                out.push(DutyRecord::new(
                    self.tables.institution(&name),
                    specialty.clone(),
                    slot,
                    date,
                ));
            }
        }
    }
}
