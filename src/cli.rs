// src/cli.rs
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use std::{env, fs, path::{Path, PathBuf}};

use chrono::{Datelike, Local, NaiveDate};
use color_eyre::eyre::{Result, WrapErr, bail, eyre};

use crate::config::options::PipelineOptions;
use crate::model::duty::{filter_by_area, filter_by_specialty, group_by_specialty};
use crate::model::{DutyRecord, ListingKind, MonthYear, ShiftSchedule};
use crate::normalize::NormalizationTables;
use crate::pipeline::{DutyPipeline, ShiftLoad};
use crate::progress::Progress;
use crate::source::{ByteSource, HttpSource, LocalDirSource};

#[derive(Debug, Default)]
pub struct Params {
    pub date: Option<NaiveDate>,
    pub dir: Option<PathBuf>,
    pub shifts: Option<PathBuf>,
    pub month: Option<u32>,
    pub year: Option<i32>,
    pub yes: bool,
    pub list: bool,
    pub store: Option<PathBuf>,
    pub specialty: Option<String>,
    pub area: Option<String>,
    pub verbose: bool,
}

/// Prints chain progress to stderr.
struct CliProgress;

impl Progress for CliProgress {
    fn log(&mut self, msg: &str) {
        eprintln!("  {msg}");
    }
    fn item_done(&mut self, name: &str) {
        eprintln!("  ✓ {name}");
    }
    fn item_failed(&mut self, name: &str, reason: &str) {
        eprintln!("  ✗ {name}: {reason}");
    }
}

pub fn run() -> Result<()> {
    let params = parse_cli(env::args().skip(1))?;

    let mut options = PipelineOptions::from_env();
    if let Some(dir) = &params.store {
        options.set_store_dir(dir.clone());
    }
    if params.verbose {
        options.log.stderr = true;
        options.log.directive = s!("hospital_duty=debug");
    }
    crate::log::init(&options.log);

    let tables = Arc::new(NormalizationTables::builtin());
    let source: Box<dyn ByteSource> = match &params.dir {
        Some(dir) => Box::new(LocalDirSource::new(dir.clone(), Arc::clone(&tables))),
        None => Box::new(HttpSource::new(options.listing_url.clone(), Arc::clone(&tables))),
    };
    let pipeline = DutyPipeline::new(options, tables, source);

    if params.list {
        return list(&pipeline);
    }
    if let Some(path) = &params.shifts {
        return shifts(&pipeline, &params, path);
    }
    duties(&pipeline, &params)
}

fn list(pipeline: &DutyPipeline) -> Result<()> {
    for e in pipeline.list_documents(ListingKind::Duty)? {
        println!("[{:?}] {} (id {})", e.format, e.display_text, e.identifier);
    }
    Ok(())
}

fn duties(pipeline: &DutyPipeline, params: &Params) -> Result<()> {
    let date = params.date.unwrap_or_else(|| Local::now().date_naive());
    let outcome = pipeline.refresh(date, &mut CliProgress)?;

    let mut shown: Vec<DutyRecord> = match &params.specialty {
        Some(prefix) => filter_by_specialty(&outcome.records, prefix).into_iter().cloned().collect(),
        None => outcome.records,
    };
    if let Some(area) = &params.area {
        shown = filter_by_area(&shown, area).into_iter().cloned().collect();
    }

    println!("ΝΟΣΟΚΟΜΕΙΑ ΕΦΗΜΕΡΙΑΣ {} ({})", date.format("%d/%m/%Y"), outcome.origin);
    for (specialty, records) in group_by_specialty(&shown) {
        println!("\n{specialty}");
        for r in records {
            println!("  • {} [{}]", r.institution, r.time_slot);
            for extra in [&r.address, &r.phone, &r.area] {
                if !extra.is_empty() {
                    println!("      {extra}");
                }
            }
        }
    }
    Ok(())
}

fn shifts(pipeline: &DutyPipeline, params: &Params, path: &Path) -> Result<()> {
    let today = Local::now().date_naive();
    let expected = MonthYear::new(
        params.month.unwrap_or(today.month()),
        params.year.unwrap_or(today.year()),
    );
    let bytes = fs::read(path).wrap_err_with(|| format!("reading {}", path.display()))?;

    let schedule = match pipeline.load_shift_document(&bytes, expected)? {
        ShiftLoad::Ready(s) => s,
        ShiftLoad::Mismatch { schedule, found, expected } => {
            eprintln!("Το αρχείο αφορά {found}, αναμενόταν {expected}.");
            if !(params.yes || confirm("Χρήση παρ' όλα αυτά; [y/N] ")?) {
                bail!("shift document for {found} rejected");
            }
            pipeline.confirm_shifts(&schedule)?;
            schedule
        }
    };
    print_schedule(&schedule, today);
    Ok(())
}

fn print_schedule(schedule: &ShiftSchedule, today: NaiveDate) {
    println!("Εφημερίες {}", schedule.period());
    if let Some(rec) = schedule.get_for_date(today) {
        println!("Σήμερα: {rec}\n");
    }
    print!("{schedule}");
}

fn confirm(prompt: &str) -> Result<bool> {
    eprint!("{prompt}");
    io::stderr().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(matches!(line.trim(), "y" | "Y" | "ν" | "Ν"))
}

pub fn parse_cli(args: impl IntoIterator<Item = String>) -> Result<Params> {
    let mut params = Params::default();
    let mut args = args.into_iter();
    while let Some(a) = args.next() {
        let mut value = |flag: &str| args.next().ok_or_else(|| eyre!("Missing value for {flag}"));
        match a.as_str() {
            "--date" => {
                let v = value("--date")?;
                params.date = Some(
                    NaiveDate::parse_from_str(&v, "%Y-%m-%d").wrap_err_with(|| format!("Bad date: {v}"))?,
                );
            }
            "--dir" => params.dir = Some(PathBuf::from(value("--dir")?)),
            "--shifts" => params.shifts = Some(PathBuf::from(value("--shifts")?)),
            "--month" => {
                let m: u32 = value("--month")?.parse()?;
                if !(1..=12).contains(&m) {
                    bail!("Month out of range (1..12): {m}");
                }
                params.month = Some(m);
            }
            "--year" => params.year = Some(value("--year")?.parse()?),
            "--yes" | "-y" => params.yes = true,
            "--list" => params.list = true,
            "--store" => params.store = Some(PathBuf::from(value("--store")?)),
            "--specialty" => params.specialty = Some(value("--specialty")?),
            "--area" => params.area = Some(value("--area")?),
            "-v" | "--verbose" => params.verbose = true,
            "-h" | "--help" => {
                eprintln!("{}", include_str!("cli_help.txt"));
                std::process::exit(0);
            }
            _ => bail!("Unknown arg: {a}"),
        }
    }
    Ok(params)
}
