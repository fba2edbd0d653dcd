// tests/schedule_builder.rs
use chrono::NaiveDate;

use hospital_duty::ErrorKind;
use hospital_duty::error::BuildError;
use hospital_duty::extract::{self, DocumentKind, Table};
use hospital_duty::model::TimeSlot;
use hospital_duty::normalize::NormalizationTables;
use hospital_duty::specs::ScheduleBuilder;

mod common;

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 10, 14).unwrap()
}

fn row(cells: &[&str]) -> Vec<String> {
    cells.iter().map(|c| c.to_string()).collect()
}

fn header() -> Vec<String> {
    row(&["Κλινικές", "08:00-14:30", "08:00-16:00", "08:00-23:00", "14:30-08:00", "08:00-08:00"])
}

#[test]
fn starred_institution_yields_one_morning_record() {
    let tables = NormalizationTables::builtin();
    let table: Table = vec![header(), row(&["Καρδιολογία", "Νοσοκομείο Χ*", "", "", "", ""])];

    let records = ScheduleBuilder::new(&tables).build(&[table], date()).unwrap();

    assert_eq!(records.len(), 1);
    let r = &records[0];
    assert_eq!(r.institution, "Νοσοκομείο Χ");
    assert_eq!(r.specialty, "Καρδιολογία / Cardiology");
    assert_eq!(r.time_slot, TimeSlot::Morning);
    assert_eq!(r.duty_date, date());
}

#[test]
fn every_slot_and_line_becomes_a_record() {
    let tables = NormalizationTables::builtin();
    let table: Table = vec![
        row(&["Τίτλος εγγράφου", "", "", "", "", ""]),
        header(),
        row(&["Καρδιολογική", "ΛΑΪΚΟ", "", "", "ΚΑΤ\nΕΛΠΙΣ", ""]),
        row(&["Χειρουργική", "", "ΑΤΤΙΚΟΝ", "ΣΩΤΗΡΙΑ", "", "ΙΠΠΟΚΡΑΤΕΙΟ"]),
    ];

    let records = ScheduleBuilder::new(&tables).build(&[table], date()).unwrap();

    let got: Vec<(TimeSlot, &str)> = records
        .iter()
        .map(|r| (r.time_slot, r.institution.as_str()))
        .collect();
    assert_eq!(
        got,
        vec![
            (TimeSlot::Morning, "Γενικό Νοσοκομείο Αθηνών «Λαϊκό»"),
            (TimeSlot::EveningToNextMorning, "Γενικό Νοσοκομείο Αθηνών «ΚΑΤ»"),
            (TimeSlot::EveningToNextMorning, "Γενικό Νοσοκομείο Αθηνών «Ελπίς»"),
            (TimeSlot::ExtendedMorning, "Πανεπιστημιακό Γενικό Νοσοκομείο «Αττικόν»"),
            (TimeSlot::Day, "Νοσοκομείο Θώρακος Αθηνών «Σωτηρία»"),
            (TimeSlot::FullDay, "Γενικό Νοσοκομείο Αθηνών «Ιπποκράτειο»"),
        ]
    );
    assert!(records.iter().all(|r| r.duty_date == date()));
}

#[test]
fn building_twice_gives_the_same_records() {
    let tables = NormalizationTables::builtin();
    let input: Vec<Table> = vec![vec![
        header(),
        row(&["Νευρολογική", "ΕΥΑΓΓΕΛΙΣΜΟΣ", "", "", "ΚΑΤ*", ""]),
    ]];
    let builder = ScheduleBuilder::new(&tables);

    let first = builder.build(&input, date()).unwrap();
    let second = builder.build(&input, date()).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.len(), 2);
}

#[test]
fn continuation_page_without_header_is_read() {
    let tables = NormalizationTables::builtin();
    let page1: Table = vec![header(), row(&["Καρδιολογική", "ΛΑΪΚΟ", "", "", "", ""])];
    let page2: Table = vec![row(&["Ουρολογική", "", "", "", "", "ΚΑΤ"])];

    let records = ScheduleBuilder::new(&tables).build(&[page1, page2], date()).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[1].specialty, "Ουρολογία / Urology");
    assert_eq!(records[1].time_slot, TimeSlot::FullDay);
}

#[test]
fn no_tables_or_blank_rows_is_empty() {
    let tables = NormalizationTables::builtin();
    let builder = ScheduleBuilder::new(&tables);

    assert!(builder.build(&[], date()).unwrap().is_empty());

    let blank: Table = vec![header(), row(&["Καρδιολογική", "", " ", "", "", ""])];
    assert!(builder.build(&[blank], date()).unwrap().is_empty());
}

#[test]
fn tables_without_header_are_a_structural_error() {
    let tables = NormalizationTables::builtin();
    let table: Table = vec![row(&["Όνομα", "Τηλέφωνο"]), row(&["ΛΑΪΚΟ", "210"])];

    let err = ScheduleBuilder::new(&tables).build(&[table], date()).unwrap_err();
    assert!(matches!(err, BuildError::MissingHeader { .. }));
    assert_eq!(hospital_duty::PipelineError::from(err).kind(), ErrorKind::Structural);
}

#[test]
fn docx_schedule_builds_end_to_end() {
    let tables = NormalizationTables::builtin();
    let bytes = common::docx(
        &["ΠΡΟΓΡΑΜΜΑ ΕΦΗΜΕΡΙΩΝ ΤΡΙΤΗ 14 ΟΚΤΩΒΡΙΟΥ 2025"],
        &[vec![
            vec!["Κλινικές", "08:00-14:30", "08:00-16:00", "08:00-23:00", "14:30-08:00", "08:00-08:00"],
            vec!["Παθολογική", "", "", "", "ΛΑΪΚΟ\nΑΤΤΙΚΟΝ*", ""],
        ]],
    );

    let doc = extract::extract(&bytes, DocumentKind::RichText).unwrap();
    let records = ScheduleBuilder::new(&tables).build(&doc.tables, date()).unwrap();

    assert_eq!(records.len(), 2);
    assert!(records.iter().all(|r| r.specialty == "Παθολογία / Internal Medicine"));
    assert_eq!(records[1].institution, "Πανεπιστημιακό Γενικό Νοσοκομείο «Αττικόν»");
}
