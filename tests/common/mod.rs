// tests/common/mod.rs
//
// In-memory document fixtures shared by the integration tests.
//
#![allow(dead_code)]

use std::io::{Cursor, Write};

use lopdf::dictionary;
use lopdf::{Document, Object, Stream};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

fn esc(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

/// A minimal DOCX: free paragraphs first, then each table. Cell text may
/// contain `\n`, which becomes separate paragraphs inside the cell.
pub fn docx(paragraphs: &[&str], tables: &[Vec<Vec<&str>>]) -> Vec<u8> {
    let mut body = String::new();
    for p in paragraphs {
        body.push_str(&format!("<w:p><w:r><w:t>{}</w:t></w:r></w:p>", esc(p)));
    }
    for table in tables {
        body.push_str("<w:tbl><w:tblPr/>");
        for row in table {
            body.push_str("<w:tr>");
            for cell in row {
                body.push_str("<w:tc>");
                for line in cell.split('\n') {
                    body.push_str(&format!(
                        "<w:p><w:r><w:t xml:space=\"preserve\">{}</w:t></w:r></w:p>",
                        esc(line)
                    ));
                }
                body.push_str("</w:tc>");
            }
            body.push_str("</w:tr>");
        }
        body.push_str("</w:tbl>");
    }
    let xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}<w:sectPr/></w:body></w:document>"#
    );

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let opts = SimpleFileOptions::default();
    zip.start_file("[Content_Types].xml", opts).unwrap();
    zip.write_all(br#"<?xml version="1.0" encoding="UTF-8"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"/>"#)
        .unwrap();
    zip.start_file("word/document.xml", opts).unwrap();
    zip.write_all(xml.as_bytes()).unwrap();
    zip.finish().unwrap().into_inner()
}

/// One PDF page: ruled grid lines plus positioned text, ASCII only.
pub struct PdfPage {
    pub h_lines: Vec<(f32, f32, f32)>, // (y, x1, x2)
    pub v_lines: Vec<(f32, f32, f32)>, // (x, y1, y2)
    pub texts: Vec<(f32, f32, &'static str)>,
}

impl PdfPage {
    /// Full grid over the given column and row boundaries.
    pub fn grid(xs: &[f32], ys: &[f32]) -> Self {
        let (x0, x1) = (xs[0], xs[xs.len() - 1]);
        let (y0, y1) = (ys[ys.len() - 1], ys[0]);
        PdfPage {
            h_lines: ys.iter().map(|&y| (y, x0, x1)).collect(),
            v_lines: xs.iter().map(|&x| (x, y0, y1)).collect(),
            texts: Vec::new(),
        }
    }

    fn content(&self) -> String {
        let mut ops = String::from("0.5 w\n");
        for (y, x1, x2) in &self.h_lines {
            ops.push_str(&format!("{x1} {y} m {x2} {y} l S\n"));
        }
        for (x, y1, y2) in &self.v_lines {
            ops.push_str(&format!("{x} {y1} m {x} {y2} l S\n"));
        }
        for (x, y, text) in &self.texts {
            ops.push_str(&format!("BT /F1 10 Tf {x} {y} Td ({text}) Tj ET\n"));
        }
        ops
    }
}

pub fn pdf(pages: &[PdfPage]) -> Vec<u8> {
    let mut doc = Document::with_version("1.4");

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let pages_id = doc.new_object_id();

    let mut kids: Vec<Object> = Vec::new();
    for page in pages {
        let content_id = doc.add_object(Stream::new(dictionary! {}, page.content().into_bytes()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            "Contents" => content_id,
            "Resources" => dictionary! {
                "Font" => dictionary! { "F1" => font_id },
            },
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap();
    buf
}
