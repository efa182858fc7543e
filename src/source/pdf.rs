//! PDF document source backed by lopdf.
//!
//! Walks each page's content stream, tracking the text matrix and current
//! font, and emits positioned spans. Spans sharing a baseline become a line;
//! lines separated by a large vertical gap or a font size change start a new
//! block.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::path::Path;

use lopdf::{Dictionary, Document as LopdfDocument, Object, ObjectId};
use unicode_normalization::UnicodeNormalization;

use super::DocumentSource;
use crate::error::{Error, Result};
use crate::model::{SourceBlock, SourceLine, SourcePage, SourceSpan};

/// PDF magic bytes: %PDF-
const PDF_MAGIC: &[u8] = b"%PDF-";

/// Check whether data starts with the PDF header.
pub fn is_pdf_bytes(data: &[u8]) -> bool {
    data.starts_with(PDF_MAGIC)
}

/// Reads styled spans from PDF files.
#[derive(Debug, Clone, Default)]
pub struct PdfSource {
    _private: (),
}

impl PdfSource {
    /// Create a new PDF source.
    pub fn new() -> Self {
        Self { _private: () }
    }

    fn load_document(data: &[u8]) -> Result<LopdfDocument> {
        if !is_pdf_bytes(data) {
            return Err(Error::UnknownFormat("missing %PDF- header".into()));
        }

        let doc = LopdfDocument::load_mem(data).map_err(|e| match e {
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::from(e),
        })?;

        if doc.is_encrypted() {
            return Err(Error::Encrypted);
        }
        Ok(doc)
    }

    fn extract_pages(doc: &LopdfDocument) -> Vec<SourcePage> {
        let reader = PageReader { doc };
        doc.get_pages()
            .into_iter()
            .map(|(page_num, page_id)| match reader.read_page(page_id) {
                Ok(spans) => build_page(page_num, spans),
                Err(e) => {
                    log::warn!("Skipping text of page {}: {}", page_num, e);
                    SourcePage::new(page_num)
                }
            })
            .collect()
    }
}

impl DocumentSource for PdfSource {
    fn name(&self) -> &str {
        "pdf"
    }

    fn supported_extensions(&self) -> &[&str] {
        &["pdf"]
    }

    fn load(&self, path: &Path) -> Result<Vec<SourcePage>> {
        let data = std::fs::read(path)?;
        self.load_bytes(&data)
    }

    fn load_bytes(&self, data: &[u8]) -> Result<Vec<SourcePage>> {
        let doc = Self::load_document(data)?;
        let pages = Self::extract_pages(&doc);
        log::debug!("Read {} pages from PDF", pages.len());
        Ok(pages)
    }
}

/// A span with its position on the page.
#[derive(Debug, Clone)]
struct PositionedSpan {
    text: String,
    x: f32,
    y: f32,
    size: f32,
    font: String,
}

struct PageReader<'a> {
    doc: &'a LopdfDocument,
}

impl<'a> PageReader<'a> {
    fn read_page(&self, page_id: ObjectId) -> Result<Vec<PositionedSpan>> {
        let fonts = self
            .doc
            .get_page_fonts(page_id)
            .map_err(|e| Error::PdfParse(e.to_string()))?;
        let content = self
            .doc
            .get_page_content(page_id)
            .map_err(|e| Error::PdfParse(e.to_string()))?;
        self.interpret(&content, &fonts)
    }

    fn base_font_name(fonts: &BTreeMap<Vec<u8>, &Dictionary>, resource: &[u8]) -> String {
        fonts
            .get(resource)
            .and_then(|f| f.get(b"BaseFont").ok())
            .and_then(|o| o.as_name().ok())
            .map(|n| String::from_utf8_lossy(n).to_string())
            .unwrap_or_else(|| String::from_utf8_lossy(resource).to_string())
    }

    fn decode(&self, fonts: &BTreeMap<Vec<u8>, &Dictionary>, font: &[u8], bytes: &[u8]) -> String {
        let encoding = fonts
            .get(font)
            .and_then(|f| f.get_font_encoding(self.doc).ok());
        match encoding {
            Some(enc) => LopdfDocument::decode_text(&enc, bytes).unwrap_or_default(),
            None => decode_text_simple(bytes),
        }
    }

    fn interpret(
        &self,
        content: &[u8],
        fonts: &BTreeMap<Vec<u8>, &Dictionary>,
    ) -> Result<Vec<PositionedSpan>> {
        let content =
            lopdf::content::Content::decode(content).map_err(|e| Error::PdfParse(e.to_string()))?;

        let mut spans = Vec::new();
        let mut font_resource: Vec<u8> = Vec::new();
        let mut font_name = String::new();
        let mut font_size: f32 = 12.0;
        let mut matrix = TextMatrix::default();
        let mut in_text = false;

        for op in content.operations {
            let text = match op.operator.as_str() {
                "BT" => {
                    in_text = true;
                    matrix = TextMatrix::default();
                    continue;
                }
                "ET" => {
                    in_text = false;
                    continue;
                }
                "Tf" => {
                    if op.operands.len() >= 2 {
                        if let Object::Name(name) = &op.operands[0] {
                            font_resource = name.clone();
                            font_name = Self::base_font_name(fonts, name);
                        }
                        font_size = get_number(&op.operands[1]).unwrap_or(12.0);
                    }
                    continue;
                }
                "TL" => {
                    if let Some(leading) = op.operands.first().and_then(get_number) {
                        matrix.leading = leading;
                    }
                    continue;
                }
                "Td" | "TD" => {
                    if op.operands.len() >= 2 {
                        let tx = get_number(&op.operands[0]).unwrap_or(0.0);
                        let ty = get_number(&op.operands[1]).unwrap_or(0.0);
                        if op.operator == "TD" {
                            matrix.leading = -ty;
                        }
                        matrix.translate(tx, ty);
                    }
                    continue;
                }
                "Tm" => {
                    if op.operands.len() >= 6 {
                        let n = |i: usize, d: f32| get_number(&op.operands[i]).unwrap_or(d);
                        matrix.set(n(0, 1.0), n(1, 0.0), n(2, 0.0), n(3, 1.0), n(4, 0.0), n(5, 0.0));
                    }
                    continue;
                }
                "T*" => {
                    matrix.next_line();
                    continue;
                }
                "Tj" if in_text => match op.operands.first() {
                    Some(Object::String(bytes, _)) => self.decode(fonts, &font_resource, bytes),
                    _ => continue,
                },
                "TJ" if in_text => match op.operands.first() {
                    Some(Object::Array(items)) => self.decode_array(fonts, &font_resource, items),
                    _ => continue,
                },
                "'" | "\"" => {
                    matrix.next_line();
                    if !in_text {
                        continue;
                    }
                    let idx = if op.operator == "\"" { 2 } else { 0 };
                    match op.operands.get(idx) {
                        Some(Object::String(bytes, _)) => self.decode(fonts, &font_resource, bytes),
                        _ => continue,
                    }
                }
                _ => continue,
            };

            if text.trim().is_empty() {
                continue;
            }
            let (x, y) = matrix.position();
            spans.push(PositionedSpan {
                text: text.nfc().collect(),
                x,
                y,
                size: font_size * matrix.scale(),
                font: font_name.clone(),
            });
        }

        Ok(spans)
    }

    /// Decode a `TJ` array, turning large negative adjustments into spaces.
    fn decode_array(
        &self,
        fonts: &BTreeMap<Vec<u8>, &Dictionary>,
        font: &[u8],
        items: &[Object],
    ) -> String {
        // In thousandths of text space; wider gaps read as word breaks.
        const SPACE_THRESHOLD: f32 = 200.0;

        let mut combined = String::new();
        for item in items {
            match item {
                Object::String(bytes, _) => combined.push_str(&self.decode(fonts, font, bytes)),
                other => {
                    let Some(adjustment) = get_number(other).map(|n| -n) else {
                        continue;
                    };
                    let needs_space = adjustment > SPACE_THRESHOLD
                        && combined
                            .chars()
                            .last()
                            .is_some_and(|c| !c.is_whitespace() && !is_spaceless_script_char(c));
                    if needs_space {
                        combined.push(' ');
                    }
                }
            }
        }
        combined
    }
}

/// Group positioned spans into lines and blocks.
fn build_page(number: u32, spans: Vec<PositionedSpan>) -> SourcePage {
    let lines = group_into_lines(spans);
    let mut page = SourcePage::new(number);
    for block in group_into_blocks(lines) {
        page.add_block(block);
    }
    page
}

/// A line with the geometry needed for block grouping.
struct PlacedLine {
    y: f32,
    size: f32,
    line: SourceLine,
}

/// Group spans into lines by baseline, top to bottom then left to right.
fn group_into_lines(mut spans: Vec<PositionedSpan>) -> Vec<PlacedLine> {
    spans.sort_by(|a, b| match b.y.partial_cmp(&a.y).unwrap_or(Ordering::Equal) {
        Ordering::Equal => a.x.partial_cmp(&b.x).unwrap_or(Ordering::Equal),
        other => other,
    });

    let mut lines = Vec::new();
    let mut current: Vec<PositionedSpan> = Vec::new();
    for span in spans {
        let same_line = current
            .first()
            .is_some_and(|first| (span.y - first.y).abs() <= span.size * 0.3);
        if !same_line && !current.is_empty() {
            lines.push(place_line(std::mem::take(&mut current)));
        }
        current.push(span);
    }
    if !current.is_empty() {
        lines.push(place_line(current));
    }
    lines
}

fn place_line(mut spans: Vec<PositionedSpan>) -> PlacedLine {
    spans.sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(Ordering::Equal));
    let y = spans[0].y;
    let size = spans.iter().map(|s| s.size).fold(0.0, f32::max);
    let line = SourceLine::new(
        spans
            .into_iter()
            .map(|s| SourceSpan::new(s.text, s.size, s.font))
            .collect(),
    );
    PlacedLine { y, size, line }
}

/// Split lines into blocks on large vertical gaps or font size changes.
fn group_into_blocks(lines: Vec<PlacedLine>) -> Vec<SourceBlock> {
    let avg_spacing = average_spacing(&lines);
    let mut blocks = Vec::new();
    let mut current: Vec<SourceLine> = Vec::new();
    let mut prev: Option<(f32, f32)> = None;

    for placed in lines {
        if let Some((prev_y, prev_size)) = prev {
            let gap = (prev_y - placed.y).abs();
            if gap > avg_spacing * 1.5 || (prev_size - placed.size).abs() > 1.0 {
                blocks.push(SourceBlock::new(std::mem::take(&mut current)));
            }
        }
        prev = Some((placed.y, placed.size));
        current.push(placed.line);
    }
    if !current.is_empty() {
        blocks.push(SourceBlock::new(current));
    }
    blocks
}

fn average_spacing(lines: &[PlacedLine]) -> f32 {
    let spacings: Vec<f32> = lines
        .windows(2)
        .map(|w| (w[0].y - w[1].y).abs())
        .filter(|s| *s > 0.1)
        .collect();
    if spacings.is_empty() {
        return 12.0;
    }
    spacings.iter().sum::<f32>() / spacings.len() as f32
}

/// Text matrix for tracking position in a content stream.
#[derive(Debug, Clone)]
struct TextMatrix {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32,
    f: f32,
    leading: f32,
}

impl Default for TextMatrix {
    fn default() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
            leading: 12.0,
        }
    }
}

impl TextMatrix {
    fn set(&mut self, a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) {
        self.a = a;
        self.b = b;
        self.c = c;
        self.d = d;
        self.e = e;
        self.f = f;
    }

    fn translate(&mut self, tx: f32, ty: f32) {
        self.e += tx * self.a + ty * self.c;
        self.f += tx * self.b + ty * self.d;
    }

    fn next_line(&mut self) {
        self.translate(0.0, -self.leading);
    }

    fn position(&self) -> (f32, f32) {
        (self.e, self.f)
    }

    /// Vertical scale factor applied to the font size.
    fn scale(&self) -> f32 {
        (self.b * self.b + self.d * self.d).sqrt()
    }
}

fn get_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

/// Scripts written without spaces between words (Chinese, Japanese kana).
fn is_spaceless_script_char(c: char) -> bool {
    matches!(
        c as u32,
        0x4E00..=0x9FFF
            | 0x3400..=0x4DBF
            | 0x20000..=0x2EBEF
            | 0x3040..=0x309F
            | 0x30A0..=0x30FF
            | 0x3000..=0x303F
    )
}

/// Decode text without a font encoding: UTF-16BE with BOM, UTF-8, then Latin-1.
fn decode_text_simple(bytes: &[u8]) -> String {
    if let Some(rest) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let utf16: Vec<u16> = rest
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16_lossy(&utf16);
    }

    if let Ok(s) = std::str::from_utf8(bytes) {
        return s.to_string();
    }

    bytes.iter().map(|&b| b as char).collect()
}
