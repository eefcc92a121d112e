//! # Vademecum
//!
//! Compiles annotated legal text into a printable two-column PDF.
//!
//! The input is a list of laws, each an ordered list of clauses that may
//! carry a color highlight, an annotation, tags and an importance rating.
//! The output is a study booklet: cover, marking statistics, notices,
//! color legend, table of contents, a transition page, and then every
//! clause poured into two columns with highlighted clauses painted in
//! their color.
//!
//! ## Architecture
//!
//! ```text
//! Input (JSON/API)
//!       ↓
//!   [model]    Laws, clauses, render configuration
//!       ↓
//!   [layout]   Front matter, contents, clause flow, decoration
//!       ↓        (records positioned draw commands per page)
//!   [canvas]   Replay onto a drawing surface
//!       ↓
//!   [pdf]      Serialize to PDF bytes
//! ```
//!
//! Layout is page-native: the flow engine always knows which page and
//! column it is filling, and decides before drawing each clause whether it
//! fits, moves to the next column, or starts a new page.

pub mod canvas;
pub mod error;
pub mod font;
pub mod layout;
pub mod metadata;
pub mod model;
pub mod pdf;
pub mod style;
pub mod text;

#[cfg(feature = "wasm")]
pub mod wasm;

use std::path::{Path, PathBuf};

use canvas::Canvas;
use font::{FontContext, TextMeasure};
use layout::toc::TocEntry;
use layout::{LaidOutDocument, LayoutEngine};
use metadata::{export_file_name, DocumentMetadata};
use pdf::PdfCanvas;

pub use error::{Result, VademecumError};
pub use model::{Clause, Compilation, Law, RenderConfig};

/// A finished PDF and what is known about it.
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    /// Suggested file name, derived from the title.
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub page_count: usize,
    pub toc: Vec<TocEntry>,
}

impl RenderedDocument {
    /// Write the PDF into `dir` under its file name and return the path.
    pub fn save_to(&self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        let path = dir.as_ref().join(&self.file_name);
        std::fs::write(&path, &self.bytes)?;
        tracing::debug!(path = %path.display(), bytes = self.bytes.len(), "PDF saved");
        Ok(path)
    }
}

/// Lay out a document with the given text measure, without drawing it.
pub fn layout(laws: &[Law], config: &RenderConfig, measure: &dyn TextMeasure) -> LaidOutDocument {
    LayoutEngine::new(measure).layout(laws, config)
}

/// Lay out a document and replay it onto any canvas.
pub fn render_to_canvas(
    laws: &[Law],
    config: &RenderConfig,
    measure: &dyn TextMeasure,
    canvas: &mut dyn Canvas,
) -> Result<LaidOutDocument> {
    let document = layout(laws, config, measure);
    document.pages.replay(canvas)?;
    Ok(document)
}

/// Render laws to PDF bytes.
///
/// This is the primary entry point. Layout itself cannot fail; errors come
/// from the drawing backend.
pub fn render(laws: &[Law], config: &RenderConfig) -> Result<RenderedDocument> {
    let measure = FontContext::new();
    let mut canvas = PdfCanvas::new();
    let document = render_to_canvas(laws, config, &measure, &mut canvas)?;

    let metadata = DocumentMetadata::from_config(config);
    let bytes = canvas.finish(&metadata)?;
    tracing::debug!(
        title = %config.title,
        pages = document.pages.len(),
        bytes = bytes.len(),
        "Document rendered"
    );

    Ok(RenderedDocument {
        file_name: export_file_name(&config.title),
        bytes,
        page_count: document.pages.len(),
        toc: document.toc,
    })
}

/// Render a compilation described as JSON: `{ "laws": [...], "config": {...} }`.
pub fn render_json(json: &str) -> Result<RenderedDocument> {
    let compilation: Compilation = serde_json::from_str(json)?;
    render(&compilation.laws, &compilation.config)
}
