// src/extract/grid.rs
//! Lattice table detection: ruling lines define the cell grid, positioned
//! text runs are dropped into the cells they start in.

use std::cmp::Ordering;

use super::{Row, Table, drop_empty_rows};
use crate::config::consts::{LINE_SNAP_RATIO, MIN_RULING_LEN, RULING_SNAP};

/// A run of text at a baseline position, in page space.
#[derive(Clone, Debug, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub size: f32,
}

impl TextRun {
    /// Point used to decide cell membership: just inside the glyph box.
    fn anchor(&self) -> (f32, f32) {
        (self.x + 1.0, self.y + self.size * 0.3)
    }
}

/// A stroked or filled straight segment, in page space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ruling {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl Ruling {
    pub fn length(&self) -> f32 {
        ((self.x2 - self.x1).powi(2) + (self.y2 - self.y1).powi(2)).sqrt()
    }

    pub fn is_horizontal(&self) -> bool {
        (self.y1 - self.y2).abs() <= RULING_SNAP && self.length() >= MIN_RULING_LEN
    }

    pub fn is_vertical(&self) -> bool {
        (self.x1 - self.x2).abs() <= RULING_SNAP && self.length() >= MIN_RULING_LEN
    }

    fn x_range(&self) -> (f32, f32) {
        (self.x1.min(self.x2), self.x1.max(self.x2))
    }

    fn y_range(&self) -> (f32, f32) {
        (self.y1.min(self.y2), self.y1.max(self.y2))
    }
}

/// Everything the interpreter saw on one page.
#[derive(Clone, Debug, Default)]
pub struct PageLayout {
    pub runs: Vec<TextRun>,
    pub rulings: Vec<Ruling>,
}

/// A page's grid table (if it has one) and the text lines outside it.
#[derive(Debug, Default)]
pub struct PageTables {
    pub table: Option<Table>,
    pub paragraphs: Vec<String>,
}

/// Group values within `threshold` of their neighbour; return centroids, ascending.
pub fn cluster(values: &[f32], threshold: f32) -> Vec<f32> {
    let mut sorted: Vec<f32> = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

    let mut groups: Vec<Vec<f32>> = Vec::new();
    for v in sorted {
        match groups.last_mut() {
            Some(g) if g.last().is_some_and(|last| v - last <= threshold) => g.push(v),
            _ => groups.push(vec![v]),
        }
    }
    groups
        .iter()
        .map(|g| g.iter().sum::<f32>() / g.len() as f32)
        .collect()
}

fn overlaps(a: (f32, f32), b: (f32, f32)) -> bool {
    a.0 <= b.1 + RULING_SNAP && b.0 <= a.1 + RULING_SNAP
}

impl PageLayout {
    pub fn tables(&self) -> PageTables {
        let horiz: Vec<&Ruling> = self.rulings.iter().filter(|r| r.is_horizontal()).collect();
        let vert: Vec<&Ruling> = self.rulings.iter().filter(|r| r.is_vertical()).collect();
        if horiz.len() < 2 || vert.len() < 2 {
            return PageTables { table: None, paragraphs: lines_of(self.runs.iter()) };
        }

        // Keep only rulings that touch the other family's extent, so a stray
        // title underline does not add a row.
        let v_span = span(vert.iter().map(|r| r.x1));
        let h_span = span(horiz.iter().map(|r| r.y1));
        let hs: Vec<f32> = horiz
            .iter()
            .filter(|r| overlaps(r.x_range(), v_span))
            .map(|r| (r.y1 + r.y2) / 2.0)
            .collect();
        let vs: Vec<f32> = vert
            .iter()
            .filter(|r| overlaps(r.y_range(), h_span))
            .map(|r| (r.x1 + r.x2) / 2.0)
            .collect();

        let mut ys = cluster(&hs, RULING_SNAP);
        let xs = cluster(&vs, RULING_SNAP);
        if ys.len() < 2 || xs.len() < 2 {
            return PageTables { table: None, paragraphs: lines_of(self.runs.iter()) };
        }
        ys.reverse(); // top of page first

        let n_rows = ys.len() - 1;
        let n_cols = xs.len() - 1;
        let mut buckets: Vec<Vec<Vec<&TextRun>>> = vec![vec![Vec::new(); n_cols]; n_rows];
        let mut outside: Vec<&TextRun> = Vec::new();

        for run in &self.runs {
            let (ax, ay) = run.anchor();
            let col = xs.windows(2).position(|w| ax >= w[0] && ax <= w[1]);
            let row = ys.windows(2).position(|w| ay <= w[0] && ay >= w[1]);
            match (row, col) {
                (Some(r), Some(c)) => buckets[r][c].push(run),
                _ => outside.push(run),
            }
        }

        let mut table: Table = buckets
            .into_iter()
            .map(|cols| {
                cols.into_iter()
                    .map(|runs| lines_of(runs.into_iter()).join("\n"))
                    .collect::<Row>()
            })
            .collect();
        drop_empty_rows(&mut table);

        PageTables {
            table: Some(table),
            paragraphs: lines_of(outside.into_iter()),
        }
    }
}

fn span(values: impl Iterator<Item = f32>) -> (f32, f32) {
    values.fold((f32::MAX, f32::MIN), |(lo, hi), v| (lo.min(v), hi.max(v)))
}

/// Runs → visual lines, top to bottom; runs on a line are ordered by x and
/// a space is inserted where there is a visible gap between them.
fn lines_of<'a>(runs: impl Iterator<Item = &'a TextRun>) -> Vec<String> {
    let mut runs: Vec<&TextRun> = runs.filter(|r| !r.text.trim().is_empty()).collect();
    runs.sort_by(|a, b| b.y.partial_cmp(&a.y).unwrap_or(Ordering::Equal));

    let mut lines: Vec<Vec<&TextRun>> = Vec::new();
    for run in runs {
        let snap = run.size.max(1.0) * LINE_SNAP_RATIO;
        match lines.last_mut() {
            Some(line) if line.first().is_some_and(|f| (f.y - run.y).abs() <= snap) => line.push(run),
            _ => lines.push(vec![run]),
        }
    }

    lines
        .into_iter()
        .map(|mut line| {
            line.sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(Ordering::Equal));
            let mut text = String::new();
            let mut end: Option<f32> = None;
            for run in line {
                if let Some(prev_end) = end {
                    let gap = run.x - prev_end;
                    if gap > run.size * 0.15 && !text.ends_with(' ') && !run.text.starts_with(' ') {
                        text.push(' ');
                    }
                }
                text.push_str(&run.text);
                end = Some(run.x + run.width);
            }
            text.trim().to_string()
        })
        .filter(|l| !l.is_empty())
        .collect()
}
