//! # PDF Serializer
//!
//! A [`Canvas`] that writes PDF content streams, and the code that turns
//! those streams into a complete file.
//!
//! This is a from-scratch PDF 1.7 writer. The documents only need filled and
//! stroked paths plus text in the three standard Helvetica faces, so there is
//! nothing to embed and the whole file is a handful of dictionaries around
//! one compressed content stream per page.
//!
//! ## PDF Structure (simplified)
//!
//! ```text
//! %PDF-1.7            <- header
//! 1 0 obj ... endobj  <- objects (catalog, page tree, fonts, pages, streams)
//! 2 0 obj ... endobj
//! ...
//! xref                <- cross-reference table (byte offsets of each object)
//! trailer             <- points to the root and info objects
//! %%EOF
//! ```
//!
//! Layout works in millimetres from the top-left corner; PDF user space is
//! points from the bottom-left. Every coordinate is converted on the way in.

use std::fmt::Write as FmtWrite; // for write! on String
use std::io::Write as IoWrite; // for write! on Vec<u8>

use miniz_oxide::deflate::compress_to_vec_zlib;

use crate::canvas::{Canvas, Rect, Stroke};
use crate::error::{Result, VademecumError};
use crate::font::{Font, FontFace, StandardFont};
use crate::layout::{PAGE_HEIGHT, PAGE_WIDTH};
use crate::metadata::DocumentMetadata;
use crate::style::Color;

/// Points per millimetre.
const MM_TO_PT: f64 = 72.0 / 25.4;

/// Bezier control-point factor for quarter circles.
const KAPPA: f64 = 0.5522847498;

/// Font resources, in `/F<index>` order.
const FONT_FACES: [FontFace; 3] = [FontFace::Regular, FontFace::Bold, FontFace::Italic];

fn pt(mm: f64) -> f64 {
    mm * MM_TO_PT
}

/// Flip a top-left y (mm) into PDF user space (pt).
fn pdf_y(mm: f64) -> f64 {
    (PAGE_HEIGHT - mm) * MM_TO_PT
}

/// Draws into per-page PDF content streams.
#[derive(Debug, Default)]
pub struct PdfCanvas {
    streams: Vec<String>,
    current: Option<usize>,
}

/// Tracks allocated PDF objects during writing.
struct PdfBuilder {
    objects: Vec<PdfObject>,
}

struct PdfObject {
    data: Vec<u8>,
}

impl PdfCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    fn stream(&mut self) -> Result<&mut String> {
        let index = self.current.ok_or(VademecumError::NoPage)?;
        Ok(&mut self.streams[index])
    }

    /// Serialize every page and the document info into a PDF file.
    pub fn finish(self, metadata: &DocumentMetadata) -> Result<Vec<u8>> {
        let mut builder = PdfBuilder { objects: Vec::new() };

        // Reserve object IDs:
        // 0 = placeholder (PDF objects are 1-indexed)
        // 1 = Catalog
        // 2 = Pages (page tree root)
        // 3.. = fonts, then content stream and page object pairs, then info
        builder.objects.push(PdfObject { data: vec![] });
        builder.objects.push(PdfObject { data: vec![] });
        builder.objects.push(PdfObject { data: vec![] });

        let mut font_ids = Vec::with_capacity(FONT_FACES.len());
        for face in FONT_FACES {
            font_ids.push(builder.objects.len());
            let font_dict = format!(
                "<< /Type /Font /Subtype /Type1 /BaseFont /{} /Encoding /WinAnsiEncoding >>",
                StandardFont::from(face).pdf_name()
            );
            builder.objects.push(PdfObject { data: font_dict.into_bytes() });
        }
        let font_resources = font_ids
            .iter()
            .enumerate()
            .map(|(i, id)| format!("/F{} {} 0 R", i, id))
            .collect::<Vec<_>>()
            .join(" ");

        let mut page_obj_ids = Vec::with_capacity(self.streams.len());
        for content in &self.streams {
            let compressed = compress_to_vec_zlib(content.as_bytes(), 6);

            let content_obj_id = builder.objects.len();
            let mut content_data: Vec<u8> = Vec::new();
            write!(
                content_data,
                "<< /Length {} /Filter /FlateDecode >>\nstream\n",
                compressed.len()
            )?;
            content_data.extend_from_slice(&compressed);
            content_data.extend_from_slice(b"\nendstream");
            builder.objects.push(PdfObject { data: content_data });

            let page_obj_id = builder.objects.len();
            let page_dict = format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {:.2} {:.2}] \
                 /Contents {} 0 R /Resources << /Font << {} >> >> >>",
                pt(PAGE_WIDTH),
                pt(PAGE_HEIGHT),
                content_obj_id,
                font_resources
            );
            builder.objects.push(PdfObject { data: page_dict.into_bytes() });
            page_obj_ids.push(page_obj_id);
        }

        builder.objects[1].data = b"<< /Type /Catalog /Pages 2 0 R >>".to_vec();

        let kids: String = page_obj_ids
            .iter()
            .map(|id| format!("{} 0 R", id))
            .collect::<Vec<_>>()
            .join(" ");
        builder.objects[2].data = format!(
            "<< /Type /Pages /Kids [{}] /Count {} >>",
            kids,
            page_obj_ids.len()
        )
        .into_bytes();

        let info_obj_id = builder.objects.len();
        builder.objects.push(PdfObject { data: info_dict(metadata).into_bytes() });

        tracing::debug!(pages = page_obj_ids.len(), objects = builder.objects.len(), "PDF assembled");
        serialize(&builder, info_obj_id)
    }
}

impl Canvas for PdfCanvas {
    fn add_page(&mut self) -> Result<()> {
        self.streams.push(String::new());
        self.current = Some(self.streams.len() - 1);
        Ok(())
    }

    fn set_page(&mut self, index: usize) -> Result<()> {
        if index >= self.streams.len() {
            return Err(VademecumError::PageOutOfRange {
                index,
                count: self.streams.len(),
            });
        }
        self.current = Some(index);
        Ok(())
    }

    fn page_count(&self) -> usize {
        self.streams.len()
    }

    fn rect(&mut self, rect: Rect, fill: Option<Color>, stroke: Option<Stroke>) -> Result<()> {
        let paint = match (fill, stroke) {
            (Some(_), Some(_)) => "B",
            (Some(_), None) => "f",
            (None, Some(_)) => "S",
            (None, None) => return Ok(()),
        };
        let stream = self.stream()?;
        stream.push_str("q\n");
        write_paint_state(stream, fill, stroke);
        let _ = write!(
            stream,
            "{:.2} {:.2} {:.2} {:.2} re\n{}\nQ\n",
            pt(rect.x),
            pdf_y(rect.bottom()),
            pt(rect.width),
            pt(rect.height),
            paint
        );
        Ok(())
    }

    fn rounded_rect(&mut self, rect: Rect, radius: f64, fill: Color) -> Result<()> {
        let stream = self.stream()?;
        stream.push_str("q\n");
        write_paint_state(stream, Some(fill), None);
        write_rounded_rect(
            stream,
            pt(rect.x),
            pdf_y(rect.bottom()),
            pt(rect.width),
            pt(rect.height),
            pt(radius),
        );
        stream.push_str("f\nQ\n");
        Ok(())
    }

    fn circle(&mut self, cx: f64, cy: f64, radius: f64, fill: Color) -> Result<()> {
        let stream = self.stream()?;
        stream.push_str("q\n");
        write_paint_state(stream, Some(fill), None);
        let r = pt(radius);
        write_rounded_rect(stream, pt(cx) - r, pdf_y(cy) - r, 2.0 * r, 2.0 * r, r);
        stream.push_str("f\nQ\n");
        Ok(())
    }

    fn line(&mut self, from: (f64, f64), to: (f64, f64), stroke: Stroke) -> Result<()> {
        let stream = self.stream()?;
        stream.push_str("q\n");
        write_paint_state(stream, None, Some(stroke));
        let _ = write!(
            stream,
            "{:.2} {:.2} m\n{:.2} {:.2} l\nS\nQ\n",
            pt(from.0),
            pdf_y(from.1),
            pt(to.0),
            pdf_y(to.1)
        );
        Ok(())
    }

    fn text(&mut self, x: f64, y: f64, text: &str, font: Font, color: Color) -> Result<()> {
        if text.is_empty() {
            return Ok(());
        }
        let font_index = FONT_FACES.iter().position(|f| *f == font.face).unwrap_or(0);
        let (r, g, b) = color.unit();
        let stream = self.stream()?;
        let _ = write!(
            stream,
            "BT\n{:.3} {:.3} {:.3} rg\n/F{} {:.1} Tf\n{:.2} {:.2} Td\n({}) Tj\nET\n",
            r,
            g,
            b,
            font_index,
            font.size,
            pt(x),
            pdf_y(y),
            encode_winansi(text)
        );
        Ok(())
    }
}

fn write_paint_state(stream: &mut String, fill: Option<Color>, stroke: Option<Stroke>) {
    if let Some(fill) = fill {
        let (r, g, b) = fill.unit();
        let _ = write!(stream, "{:.3} {:.3} {:.3} rg\n", r, g, b);
    }
    if let Some(stroke) = stroke {
        let (r, g, b) = stroke.color.unit();
        let _ = write!(stream, "{:.3} {:.3} {:.3} RG\n{:.2} w\n", r, g, b, pt(stroke.width));
    }
}

/// Closed path of a rectangle with all four corners rounded, in PDF space.
fn write_rounded_rect(stream: &mut String, x: f64, y: f64, w: f64, h: f64, radius: f64) {
    let r = radius.min(w / 2.0).min(h / 2.0);
    let k = r * KAPPA;

    let _ = write!(stream, "{:.2} {:.2} m\n", x + r, y);
    let _ = write!(stream, "{:.2} {:.2} l\n", x + w - r, y);
    let _ = write!(
        stream,
        "{:.2} {:.2} {:.2} {:.2} {:.2} {:.2} c\n",
        x + w - r + k, y,
        x + w, y + r - k,
        x + w, y + r
    );
    let _ = write!(stream, "{:.2} {:.2} l\n", x + w, y + h - r);
    let _ = write!(
        stream,
        "{:.2} {:.2} {:.2} {:.2} {:.2} {:.2} c\n",
        x + w, y + h - r + k,
        x + w - r + k, y + h,
        x + w - r, y + h
    );
    let _ = write!(stream, "{:.2} {:.2} l\n", x + r, y + h);
    let _ = write!(
        stream,
        "{:.2} {:.2} {:.2} {:.2} {:.2} {:.2} c\n",
        x + r - k, y + h,
        x, y + h - r + k,
        x, y + h - r
    );
    let _ = write!(stream, "{:.2} {:.2} l\n", x, y + r);
    let _ = write!(
        stream,
        "{:.2} {:.2} {:.2} {:.2} {:.2} {:.2} c\n",
        x, y + r - k,
        x + r - k, y,
        x + r, y
    );
    stream.push_str("h\n");
}

/// Text as the body of a WinAnsi literal string, with `\`, `(` and `)`
/// escaped and non-ASCII bytes written as octal escapes.
fn encode_winansi(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        let b = unicode_to_winansi(ch).unwrap_or(b'?');
        match b {
            b'\\' => out.push_str("\\\\"),
            b'(' => out.push_str("\\("),
            b')' => out.push_str("\\)"),
            0x20..=0x7E => out.push(b as char),
            _ => {
                let _ = write!(out, "\\{:03o}", b);
            }
        }
    }
    out
}

/// Map a Unicode codepoint to a WinAnsiEncoding byte value.
///
/// WinAnsiEncoding is based on Windows-1252. Most codepoints in
/// 0x20..=0x7E and 0xA0..=0xFF map directly. The 0x80..=0x9F range
/// contains special mappings for smart quotes, bullets, dashes, etc.
fn unicode_to_winansi(ch: char) -> Option<u8> {
    let cp = ch as u32;
    if (0x20..=0x7E).contains(&cp) || (0xA0..=0xFF).contains(&cp) {
        return Some(cp as u8);
    }
    match cp {
        0x20AC => Some(0x80), // Euro sign
        0x201A => Some(0x82), // Single low-9 quotation mark
        0x0192 => Some(0x83), // Latin small letter f with hook
        0x201E => Some(0x84), // Double low-9 quotation mark
        0x2026 => Some(0x85), // Horizontal ellipsis
        0x2020 => Some(0x86), // Dagger
        0x2021 => Some(0x87), // Double dagger
        0x02C6 => Some(0x88), // Modifier letter circumflex accent
        0x2030 => Some(0x89), // Per mille sign
        0x0160 => Some(0x8A), // Latin capital letter S with caron
        0x2039 => Some(0x8B), // Single left-pointing angle quotation
        0x0152 => Some(0x8C), // Latin capital ligature OE
        0x017D => Some(0x8E), // Latin capital letter Z with caron
        0x2018 => Some(0x91), // Left single quotation mark
        0x2019 => Some(0x92), // Right single quotation mark
        0x201C => Some(0x93), // Left double quotation mark
        0x201D => Some(0x94), // Right double quotation mark
        0x2022 => Some(0x95), // Bullet
        0x2013 => Some(0x96), // En dash
        0x2014 => Some(0x97), // Em dash
        0x02DC => Some(0x98), // Small tilde
        0x2122 => Some(0x99), // Trade mark sign
        0x0161 => Some(0x9A), // Latin small letter s with caron
        0x203A => Some(0x9B), // Single right-pointing angle quotation
        0x0153 => Some(0x9C), // Latin small ligature oe
        0x017E => Some(0x9E), // Latin small letter z with caron
        0x0178 => Some(0x9F), // Latin capital letter Y with diaeresis
        _ => None,
    }
}

/// Escape special characters in a PDF string.
fn escape_pdf_string(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('(', "\\(")
        .replace(')', "\\)")
}

/// A PDF text string: a plain literal for ASCII, UTF-16BE hex otherwise.
fn pdf_text_string(s: &str) -> String {
    if s.is_ascii() {
        format!("({})", escape_pdf_string(s))
    } else {
        let mut hex = String::from("<FEFF");
        for unit in s.encode_utf16() {
            let _ = write!(hex, "{:04X}", unit);
        }
        hex.push('>');
        hex
    }
}

fn info_dict(metadata: &DocumentMetadata) -> String {
    let mut info = String::from("<< ");
    let entries = [
        ("Title", &metadata.title),
        ("Subject", &metadata.subject),
        ("Author", &metadata.author),
        ("Creator", &metadata.creator),
        ("Keywords", &metadata.keywords),
        ("Producer", &metadata.producer),
    ];
    for (key, value) in entries {
        let _ = write!(info, "/{} {} ", key, pdf_text_string(value));
    }
    let _ = write!(info, "/CreationDate (D:{}000000) >>", metadata.created.format("%Y%m%d"));
    info
}

/// Serialize all objects into the final PDF byte stream.
fn serialize(builder: &PdfBuilder, info_obj_id: usize) -> Result<Vec<u8>> {
    let mut output: Vec<u8> = Vec::new();
    let mut offsets: Vec<usize> = vec![0; builder.objects.len()];

    output.extend_from_slice(b"%PDF-1.7\n");
    output.extend_from_slice(b"%\xe2\xe3\xcf\xd3\n");

    for (i, obj) in builder.objects.iter().enumerate().skip(1) {
        offsets[i] = output.len();
        write!(output, "{} 0 obj\n", i)?;
        output.extend_from_slice(&obj.data);
        output.extend_from_slice(b"\nendobj\n\n");
    }

    let xref_offset = output.len();
    write!(output, "xref\n0 {}\n", builder.objects.len())?;
    write!(output, "0000000000 65535 f \n")?;
    for offset in offsets.iter().skip(1) {
        write!(output, "{:010} 00000 n \n", offset)?;
    }

    write!(
        output,
        "trailer\n<< /Size {} /Root 1 0 R /Info {} 0 R >>\nstartxref\n{}\n%%EOF\n",
        builder.objects.len(),
        info_obj_id,
        xref_offset
    )?;

    Ok(output)
}
