// tests/pipeline_fallback.rs
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use chrono::NaiveDate;

use hospital_duty::error::SourceError;
use hospital_duty::extract::{self, DocumentKind};
use hospital_duty::model::{AvailableFileEntry, DocumentFormat, ListingKind};
use hospital_duty::progress::{NullProgress, Progress};
use hospital_duty::source::ByteSource;
use hospital_duty::specs::ShiftBuilder;
use hospital_duty::specs::listing::infer_entry;
use hospital_duty::{
    CacheLookup, DutyPipeline, ErrorKind, MonthYear, NormalizationTables, PipelineError, PipelineOptions,
    Provider, ShiftLoad, sample,
};

mod common;

/// In-memory publisher. `down` makes every call fail like a dead network.
struct FakeSource {
    entries: Vec<AvailableFileEntry>,
    files: HashMap<String, Vec<u8>>,
    down: bool,
}

impl FakeSource {
    fn down() -> Self {
        Self { entries: Vec::new(), files: HashMap::new(), down: true }
    }

    fn with(tables: &NormalizationTables, docs: Vec<(&str, &str, DocumentFormat, Vec<u8>)>) -> Self {
        let mut entries = Vec::new();
        let mut files = HashMap::new();
        for (text, id, format, bytes) in docs {
            entries.push(infer_entry(text.to_string(), id.to_string(), format, tables));
            files.insert(id.to_string(), bytes);
        }
        Self { entries, files, down: false }
    }
}

impl ByteSource for FakeSource {
    fn list_available(&self, _kind: ListingKind) -> Result<Vec<AvailableFileEntry>, SourceError> {
        if self.down {
            return Err(SourceError::Unreachable("connection refused".into()));
        }
        Ok(self.entries.clone())
    }

    fn fetch(&self, identifier: &str) -> Result<Vec<u8>, SourceError> {
        if self.down {
            return Err(SourceError::Unreachable("connection refused".into()));
        }
        self.files
            .get(identifier)
            .cloned()
            .ok_or_else(|| SourceError::NotFound(identifier.to_string()))
    }
}

#[derive(Default)]
struct Recorder {
    done: Vec<String>,
    failed: Vec<String>,
    finished: bool,
}

impl Progress for Recorder {
    fn item_done(&mut self, name: &str) {
        self.done.push(name.to_string());
    }

    fn item_failed(&mut self, name: &str, _reason: &str) {
        self.failed.push(name.to_string());
    }

    fn finish(&mut self) {
        self.finished = true;
    }
}

fn d(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 10, day).unwrap()
}

fn options(dir: &Path, sample: bool) -> PipelineOptions {
    let mut opts = PipelineOptions::default();
    opts.set_store_dir(dir.to_path_buf());
    opts.use_sample_fallback = sample;
    opts
}

fn pipeline(dir: &Path, sample: bool, source: FakeSource) -> DutyPipeline {
    DutyPipeline::new(options(dir, sample), Arc::new(NormalizationTables::builtin()), Box::new(source))
}

fn duty_docx() -> Vec<u8> {
    common::docx(
        &[],
        &[vec![
            vec!["Κλινικές", "08:00-14:30", "08:00-16:00", "08:00-23:00", "14:30-08:00", "08:00-08:00"],
            vec!["Καρδιολογική", "ΛΑΪΚΟ", "", "", "ΚΑΤ", ""],
        ]],
    )
}

fn shift_docx() -> Vec<u8> {
    common::docx(
        &["ΟΚΤΩΒΡΙΟΣ 2025"],
        &[
            vec![vec!["01", "ΟΚΤΩΒΡΙΟΥ", "Τετάρτη", "Καρυοφύλλης\nΤσιάπρας*"]],
            vec![
                vec!["Ημ/νία", "Μήνας", "Ημέρα", "Μεγάλη", "Μικρή", "ΤΕΠ"],
                vec!["01", "ΟΚΤΩΒΡΙΟΥ", "Τετάρτη", "Γεωργίου", "Νικολάου", "Δημητρίου"],
            ],
        ],
    )
}

fn live_source(tables: &NormalizationTables) -> FakeSource {
    FakeSource::with(
        tables,
        vec![
            ("ΔΕΥΤΕΡΑ 13 ΟΚΤΩΒΡΙΟΥ 2025", "100", DocumentFormat::Docx, Vec::new()),
            ("ΤΡΙΤΗ 14 ΟΚΤΩΒΡΙΟΥ 2025", "101", DocumentFormat::Docx, duty_docx()),
        ],
    )
}

#[test]
fn live_records_win_and_are_cached() {
    let dir = tempfile::tempdir().unwrap();
    let tables = NormalizationTables::builtin();
    let p = pipeline(dir.path(), true, live_source(&tables));
    let mut progress = Recorder::default();

    let out = p.refresh(d(14), &mut progress).unwrap();

    assert_eq!(out.origin, Provider::Live);
    assert_eq!(out.records.len(), 2);
    assert_eq!(progress.done, vec!["live"]);
    assert!(progress.failed.is_empty());
    assert!(progress.finished);
    assert_eq!(p.store().load_duties(d(14)).unwrap().hit().unwrap(), out.records);
}

#[test]
fn cache_answers_when_the_source_is_down() {
    let dir = tempfile::tempdir().unwrap();
    let tables = NormalizationTables::builtin();
    let first = pipeline(dir.path(), true, live_source(&tables))
        .refresh(d(14), &mut NullProgress)
        .unwrap();

    let mut progress = Recorder::default();
    let out = pipeline(dir.path(), true, FakeSource::down())
        .refresh(d(14), &mut progress)
        .unwrap();

    assert_eq!(out.origin, Provider::Cache);
    assert_eq!(out.records, first.records);
    assert_eq!(progress.failed, vec!["live"]);
    assert_eq!(progress.done, vec!["cache"]);
}

#[test]
fn stale_cache_falls_through_to_sample() {
    let dir = tempfile::tempdir().unwrap();
    let tables = NormalizationTables::builtin();
    pipeline(dir.path(), true, live_source(&tables))
        .refresh(d(14), &mut NullProgress)
        .unwrap();

    let mut progress = Recorder::default();
    let out = pipeline(dir.path(), true, FakeSource::down())
        .refresh(d(15), &mut progress)
        .unwrap();

    assert_eq!(out.origin, Provider::Sample);
    assert_eq!(out.records, sample::duty_records(d(15)));
    assert_eq!(progress.failed, vec!["live", "cache"]);
    assert_eq!(progress.done, vec!["sample"]);
}

#[test]
fn without_sample_the_last_failure_surfaces() {
    let dir = tempfile::tempdir().unwrap();

    let err = pipeline(dir.path(), false, FakeSource::down())
        .refresh(d(14), &mut NullProgress)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);

    let tables = NormalizationTables::builtin();
    let err = pipeline(dir.path(), false, live_source(&tables))
        .refresh(d(20), &mut NullProgress)
        .unwrap_err();
    assert!(matches!(err, PipelineError::NoFileForDate(date) if date == d(20)));
    assert_eq!(err.kind(), ErrorKind::NoMatch);
}

#[test]
fn unreadable_live_document_is_a_transport_failure() {
    let dir = tempfile::tempdir().unwrap();
    let tables = NormalizationTables::builtin();
    let source = FakeSource::with(
        &tables,
        vec![("ΤΡΙΤΗ 14 ΟΚΤΩΒΡΙΟΥ 2025.pdf", "7", DocumentFormat::Pdf, b"<html>error</html>".to_vec())],
    );

    let err = pipeline(dir.path(), true, source).fetch_live(d(14)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
}

#[test]
fn other_month_needs_confirmation() {
    let dir = tempfile::tempdir().unwrap();
    let p = pipeline(dir.path(), true, FakeSource::down());
    let bytes = shift_docx();

    let outcome = p.load_shift_document(&bytes, MonthYear::new(11, 2025)).unwrap();
    let ShiftLoad::Mismatch { schedule, found, expected } = outcome else {
        panic!("expected a month mismatch");
    };
    assert_eq!(found, MonthYear::new(10, 2025));
    assert_eq!(expected, MonthYear::new(11, 2025));
    assert!(!p.store().shift_path().exists());

    // Proceeding keeps the parsed October data exactly as built.
    let tables = NormalizationTables::builtin();
    let doc = extract::extract(&bytes, DocumentKind::RichText).unwrap();
    let direct = ShiftBuilder::new(&tables).build(&doc).unwrap();
    assert_eq!(schedule, direct);

    p.confirm_shifts(&schedule).unwrap();
    let cached = p.cached_shifts(MonthYear::new(10, 2025)).unwrap();
    assert_eq!(cached, CacheLookup::Hit(direct));
}

#[test]
fn matching_month_is_cached_immediately() {
    let dir = tempfile::tempdir().unwrap();
    let tables = NormalizationTables::builtin();
    let source = FakeSource::with(
        &tables,
        vec![("ΕΦΗΜΕΡΙΕΣ ΟΚΤΩΒΡΙΟΣ 2025", "shifts.docx", DocumentFormat::Docx, shift_docx())],
    );
    let p = pipeline(dir.path(), true, source);

    let outcome = p.load_shift_file("shifts.docx", MonthYear::new(10, 2025)).unwrap();
    let ShiftLoad::Ready(schedule) = outcome else { panic!("expected a ready schedule") };

    assert_eq!(schedule.get_day(1).unwrap().attendings, vec!["Καρυοφύλλης", "Τσιάπρας"]);
    assert!(p.cached_shifts(MonthYear::new(10, 2025)).unwrap().is_hit());
}

#[test]
fn edits_are_written_back() {
    let dir = tempfile::tempdir().unwrap();
    let p = pipeline(dir.path(), true, FakeSource::down());
    let october = MonthYear::new(10, 2025);
    p.load_shift_document(&shift_docx(), october).unwrap();

    let edited = p.edit_shift(october, 1, "senior_cardiac_surgeon", "Λαμπρόπουλος").unwrap();
    assert_eq!(edited.get_day(1).unwrap().senior_cardiac_surgeon.as_deref(), Some("Λαμπρόπουλος"));

    let reloaded = p.cached_shifts(october).unwrap().hit().unwrap();
    assert_eq!(reloaded, edited);

    p.edit_shift(october, 1, "attendings", "Α, Β ,").unwrap();
    let reloaded = p.cached_shifts(october).unwrap().hit().unwrap();
    assert_eq!(reloaded.get_day(1).unwrap().attendings, vec!["Α", "Β"]);

    let err = p.edit_shift(october, 1, "surgeon", "x").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Edit);
    let err = p.edit_shift(october, 30, "major_shift", "x").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Edit);
    let err = p.edit_shift(MonthYear::new(11, 2025), 1, "major_shift", "x").unwrap_err();
    assert!(matches!(err, PipelineError::NoShiftsFor(_)));
}
