// benches/schedule.rs
use criterion::{Criterion, black_box, criterion_group, criterion_main};

use chrono::NaiveDate;

use hospital_duty::extract::Table;
use hospital_duty::normalize::NormalizationTables;
use hospital_duty::specs::{ScheduleBuilder, parse_listing};
use hospital_duty::select::select_file;

const SPECIALTIES: [&str; 6] = [
    "Παθολογική",
    "Καρδιολογική",
    "Χειρουργική",
    "Ορθοπαιδική",
    "Αγγειοχειρ/κή",
    "Ω.Ρ.Λ.",
];
const HOSPITALS: [&str; 6] = ["ΛΑΪΚΟ", "ΚΑΤ*", "ΑΤΤΙΚΟΝ", "Γ.Ν. ΕΛΠΙΣ", "ΑΓ. ΣΑΒΒΑΣ", "Άγνωστο Κέντρο"];

/// A few pages of a typical day: header on the first page only.
fn synthetic_tables(pages: usize, rows_per_page: usize) -> Vec<Table> {
    let header: Vec<String> = ["Κλινικές", "08:00-14:30", "08:00-16:00", "08:00-23:00", "14:30-08:00", "08:00-08:00"]
        .iter()
        .map(|s| s.to_string())
        .collect();

    (0..pages)
        .map(|p| {
            let mut t: Table = Vec::new();
            if p == 0 {
                t.push(header.clone());
            }
            for r in 0..rows_per_page {
                let mut row = vec![SPECIALTIES[(p + r) % SPECIALTIES.len()].to_string()];
                for c in 0..5 {
                    let cell = if (r + c) % 3 == 0 {
                        format!("{}\n{}", HOSPITALS[c % HOSPITALS.len()], HOSPITALS[(r + 1) % HOSPITALS.len()])
                    } else if (r + c) % 3 == 1 {
                        HOSPITALS[(r + c) % HOSPITALS.len()].to_string()
                    } else {
                        String::new()
                    };
                    row.push(cell);
                }
                t.push(row);
            }
            t
        })
        .collect()
}

fn synthetic_listing(n: usize) -> String {
    let mut html = String::from("<html><body><ul>");
    for i in 0..n {
        let day = 1 + i % 28;
        html.push_str(&format!(
            "<li><a href=\"/articles/health/dom/3410?fdl={}\">ΕΦΗΜΕΡΙΑ {} ΟΚΤΩΒΡΙΟΥ 2025.pdf</a></li>",
            30000 + i,
            day
        ));
    }
    html.push_str("<li><a href=\"/articles/health/dom/3410?fdl=1\">ΤΡΙΤΗ 14 ΟΚΤΩΒΡΙΟΥ 2025.pdf</a></li>");
    html.push_str("</ul></body></html>");
    html
}

fn bench_schedule(c: &mut Criterion) {
    let tables = NormalizationTables::builtin();
    let input = synthetic_tables(4, 40);
    let date = NaiveDate::from_ymd_opt(2025, 10, 14).unwrap_or_default();

    c.bench_function("schedule_build", |b| {
        let builder = ScheduleBuilder::new(&tables);
        b.iter(|| {
            let records = builder.build(black_box(&input), date).unwrap_or_default();
            black_box(records.len())
        })
    });

    c.bench_function("normalize_institution", |b| {
        b.iter(|| {
            for h in HOSPITALS {
                black_box(tables.institution(black_box(h)));
            }
        })
    });

    let html = synthetic_listing(200);
    c.bench_function("listing_select", |b| {
        b.iter(|| {
            let entries = parse_listing(black_box(&html), &tables);
            black_box(select_file(&entries, date).map(|e| e.identifier.len()))
        })
    });
}

criterion_group!(benches, bench_schedule);
criterion_main!(benches);
