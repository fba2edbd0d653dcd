// src/specs/mod.rs
//! # Document "specs"
//!
//! Each spec knows how one kind of published document is laid out and turns
//! already-extracted tables (or listing HTML) into records.
//!
//! ## What lives here
//! - `schedule`: the daily on-duty table (specialty rows × five time-slot
//!   columns) → `DutyRecord`s.
//! - `shifts`: the monthly department shift document (attendings table +
//!   residents table) → `ShiftSchedule`.
//! - `listing`: the ministry's listing page → `AvailableFileEntry`s.
//!
//! ## What does **not** live here
//! - Decoding bytes into tables (`extract`).
//! - Fetching bytes (`source`), caching (`store`), fallback policy (`pipeline`).
//!
//! ## Conventions
//! - Specs are pure: same tables in, same records out.
//! - Header and column detection is tolerant of whitespace, accents and case;
//!   a missing structural anchor is a `BuildError`, never a guess.
//! - Every skipped table or row is logged once with the reason.
pub mod listing;
pub mod schedule;
pub mod shifts;

pub use listing::parse_listing;
pub use schedule::ScheduleBuilder;
pub use shifts::ShiftBuilder;
