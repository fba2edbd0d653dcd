// src/extract/pdf.rs
//! PDF page interpreter: walks each page's content stream with lopdf and
//! records positioned text runs and straight path segments, which
//! [`grid`](super::grid) turns into tables.
//!
//! Glyph widths are not read from font programs; advances are estimated
//! from the font size, which is enough to order runs and find word gaps.

use std::collections::BTreeMap;

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, ObjectId};

use super::grid::{PageLayout, Ruling, TextRun};
use super::{DocumentKind, ExtractedDocument};
use crate::config::consts::{GLYPH_ADVANCE, TJ_SPACE_THRESHOLD};
use crate::error::ExtractError;

pub fn extract(bytes: &[u8]) -> Result<ExtractedDocument, ExtractError> {
    let corrupt = |reason: String| ExtractError::corrupt(DocumentKind::TabularPdf, reason);

    let doc = Document::load_mem(bytes).map_err(|e| corrupt(format!("failed to load PDF: {e}")))?;
    let mut out = ExtractedDocument::default();

    for (page_no, page_id) in doc.get_pages() {
        let layout = page_layout(&doc, page_id)
            .map_err(|e| corrupt(format!("page {page_no}: {e}")))?;
        let page = layout.tables();
        match page.table {
            Some(table) => {
                logd!("PDF page {}: {} row(s)", page_no, table.len());
                out.tables.push(table);
            }
            None => logd!("PDF page {}: no ruled table", page_no),
        }
        out.paragraphs.extend(page.paragraphs);
    }
    Ok(out)
}

/// Interpret one page's content stream.
pub fn page_layout(doc: &Document, page_id: ObjectId) -> lopdf::Result<PageLayout> {
    let encodings: BTreeMap<Vec<u8>, _> = doc
        .get_page_fonts(page_id)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|(name, font)| font.get_font_encoding(doc).ok().map(|enc| (name, enc)))
        .collect();

    let data = doc.get_page_content(page_id)?;
    let content = Content::decode(&data)?;

    let mut state = Interpreter::default();
    for op in &content.operations {
        state.apply(op, &|font: &[u8], bytes: &[u8]| {
            encodings
                .get(font)
                .and_then(|enc| Document::decode_text(enc, bytes).ok())
                .unwrap_or_else(|| fallback_decode(bytes))
        });
    }
    Ok(state.layout)
}

/// Simple fonts without a usable encoding: try UTF-8, then Latin-1.
fn fallback_decode(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(s) => s!(s),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

/// Affine matrix `[a b c d e f]` in PDF row-vector convention.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Matrix([f32; 6]);

impl Default for Matrix {
    fn default() -> Self {
        Matrix([1.0, 0.0, 0.0, 1.0, 0.0, 0.0])
    }
}

impl Matrix {
    fn translate(tx: f32, ty: f32) -> Self {
        Matrix([1.0, 0.0, 0.0, 1.0, tx, ty])
    }

    /// `self × other`: apply `self` first.
    fn then(self, other: Matrix) -> Matrix {
        let [a1, b1, c1, d1, e1, f1] = self.0;
        let [a2, b2, c2, d2, e2, f2] = other.0;
        Matrix([
            a1 * a2 + b1 * c2,
            a1 * b2 + b1 * d2,
            c1 * a2 + d1 * c2,
            c1 * b2 + d1 * d2,
            e1 * a2 + f1 * c2 + e2,
            e1 * b2 + f1 * d2 + f2,
        ])
    }

    fn apply(self, x: f32, y: f32) -> (f32, f32) {
        let [a, b, c, d, e, f] = self.0;
        (a * x + c * y + e, b * x + d * y + f)
    }

    fn vertical_scale(self) -> f32 {
        let [_, _, c, d, _, _] = self.0;
        (c * c + d * d).sqrt()
    }
}

#[derive(Default)]
struct Interpreter {
    ctm: Matrix,
    stack: Vec<Matrix>,
    tm: Matrix,
    lm: Matrix,
    font: Vec<u8>,
    size: f32,
    leading: f32,
    // Path under construction, user space.
    current: Option<(f32, f32)>,
    start: Option<(f32, f32)>,
    pending: Vec<((f32, f32), (f32, f32))>,
    layout: PageLayout,
}

fn nums(op: &Operation) -> Vec<f32> {
    op.operands.iter().filter_map(|o| o.as_float().ok()).collect()
}

impl Interpreter {
    fn apply(&mut self, op: &Operation, decode: &dyn Fn(&[u8], &[u8]) -> String) {
        let n = nums(op);
        match op.operator.as_str() {
            "q" => self.stack.push(self.ctm),
            "Q" => {
                if let Some(m) = self.stack.pop() {
                    self.ctm = m;
                }
            }
            "cm" if n.len() == 6 => {
                self.ctm = Matrix([n[0], n[1], n[2], n[3], n[4], n[5]]).then(self.ctm);
            }

            "BT" => {
                self.tm = Matrix::default();
                self.lm = Matrix::default();
            }
            "Tf" => {
                if let Some(Ok(name)) = op.operands.first().map(Object::as_name) {
                    self.font = name.to_vec();
                }
                if let Some(size) = op.operands.get(1).and_then(|o| o.as_float().ok()) {
                    self.size = size;
                }
            }
            "TL" if !n.is_empty() => self.leading = n[0],
            "Td" if n.len() == 2 => self.next_line(n[0], n[1]),
            "TD" if n.len() == 2 => {
                self.leading = -n[1];
                self.next_line(n[0], n[1]);
            }
            "Tm" if n.len() == 6 => {
                self.tm = Matrix([n[0], n[1], n[2], n[3], n[4], n[5]]);
                self.lm = self.tm;
            }
            "T*" => self.next_line(0.0, -self.leading),
            "Tj" => {
                if let Some(Ok(bytes)) = op.operands.first().map(Object::as_str) {
                    let text = decode(&self.font, bytes);
                    self.show(text);
                }
            }
            "'" => {
                self.next_line(0.0, -self.leading);
                if let Some(Ok(bytes)) = op.operands.first().map(Object::as_str) {
                    let text = decode(&self.font, bytes);
                    self.show(text);
                }
            }
            "\"" => {
                self.next_line(0.0, -self.leading);
                if let Some(Ok(bytes)) = op.operands.get(2).map(Object::as_str) {
                    let text = decode(&self.font, bytes);
                    self.show(text);
                }
            }
            "TJ" => {
                if let Some(Ok(items)) = op.operands.first().map(Object::as_array) {
                    self.show_array(items, decode);
                }
            }

            "m" if n.len() == 2 => {
                self.current = Some((n[0], n[1]));
                self.start = self.current;
            }
            "l" if n.len() == 2 => {
                if let Some(from) = self.current {
                    self.pending.push((from, (n[0], n[1])));
                }
                self.current = Some((n[0], n[1]));
            }
            "h" => {
                if let (Some(from), Some(to)) = (self.current, self.start) {
                    if from != to {
                        self.pending.push((from, to));
                    }
                }
                self.current = self.start;
            }
            "re" if n.len() == 4 => {
                let (x, y, w, h) = (n[0], n[1], n[2], n[3]);
                let corners = [(x, y), (x + w, y), (x + w, y + h), (x, y + h)];
                for i in 0..4 {
                    self.pending.push((corners[i], corners[(i + 1) % 4]));
                }
                self.current = Some((x, y));
                self.start = self.current;
            }
            "c" if n.len() == 6 => self.current = Some((n[4], n[5])),
            "v" | "y" if n.len() == 4 => self.current = Some((n[2], n[3])),
            "S" | "s" | "f" | "F" | "f*" | "B" | "B*" | "b" | "b*" => self.commit_path(),
            "n" => self.pending.clear(),
            _ => {}
        }
    }

    fn next_line(&mut self, tx: f32, ty: f32) {
        self.lm = Matrix::translate(tx, ty).then(self.lm);
        self.tm = self.lm;
    }

    fn show(&mut self, text: String) {
        let advance = text.chars().count() as f32 * self.size * GLYPH_ADVANCE;
        let device = self.tm.then(self.ctm);
        let (x, y) = device.apply(0.0, 0.0);
        let (x_end, _) = device.apply(advance, 0.0);
        let scale = device.vertical_scale();

        if !text.trim().is_empty() {
            self.layout.runs.push(TextRun {
                text,
                x,
                y,
                width: (x_end - x).abs(),
                size: (self.size * scale).abs(),
            });
        }
        self.tm = Matrix::translate(advance, 0.0).then(self.tm);
    }

    fn show_array(&mut self, items: &[Object], decode: &dyn Fn(&[u8], &[u8]) -> String) {
        // Glue the array into one run; large negative kerns are word gaps.
        let mut text = String::new();
        let mut shift = 0.0f32;
        for item in items {
            match item {
                Object::String(bytes, _) => text.push_str(&decode(&self.font, bytes)),
                other => {
                    if let Ok(adj) = other.as_float() {
                        if adj <= -TJ_SPACE_THRESHOLD && !text.ends_with(' ') {
                            text.push(' ');
                        }
                        shift -= adj / 1000.0 * self.size;
                    }
                }
            }
        }
        self.show(text);
        self.tm = Matrix::translate(shift, 0.0).then(self.tm);
    }

    fn commit_path(&mut self) {
        for ((x1, y1), (x2, y2)) in self.pending.drain(..) {
            let (x1, y1) = self.ctm.apply(x1, y1);
            let (x2, y2) = self.ctm.apply(x2, y2);
            self.layout.rulings.push(Ruling { x1, y1, x2, y2 });
        }
        self.current = None;
        self.start = None;
    }
}
