// src/model/mod.rs
//! Record types shared by the builders, the store and the consumers.

pub mod duty;
pub mod listing;
pub mod shift;

pub use duty::{DutyRecord, TimeSlot};
pub use listing::{AvailableFileEntry, DateTokens, DocumentFormat, EntryKind, ListingKind};
pub use shift::{DailyShiftRecord, MonthYear, ShiftField, ShiftSchedule};
