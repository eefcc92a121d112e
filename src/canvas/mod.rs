//! # Canvas
//!
//! The drawing surface the laid-out pages are replayed onto. Coordinates
//! are millimetres with the origin at the top-left corner of the page;
//! text is positioned by its baseline.
//!
//! Layout never draws on a canvas directly. It records
//! [`DrawCommand`]s into a [`PageSet`](crate::layout::PageSet), and
//! [`PageSet::replay`](crate::layout::PageSet::replay) executes them here.
//! The PDF backend is one implementation; [`RecordingCanvas`] is another,
//! used to assert on exactly what reached the backend.

use crate::error::{Result, VademecumError};
use crate::font::Font;
use crate::layout::DrawCommand;
use crate::style::Color;

/// An axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// Outline color and width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f64,
}

/// A paginated drawing surface.
pub trait Canvas {
    /// Append a page and make it current.
    fn add_page(&mut self) -> Result<()>;

    /// Make an existing page current for further drawing.
    fn set_page(&mut self, index: usize) -> Result<()>;

    fn page_count(&self) -> usize;

    /// Filled and/or stroked rectangle.
    fn rect(&mut self, rect: Rect, fill: Option<Color>, stroke: Option<Stroke>) -> Result<()>;

    fn rounded_rect(&mut self, rect: Rect, radius: f64, fill: Color) -> Result<()>;

    fn circle(&mut self, cx: f64, cy: f64, radius: f64, fill: Color) -> Result<()>;

    fn line(&mut self, from: (f64, f64), to: (f64, f64), stroke: Stroke) -> Result<()>;

    /// Single line of text with its baseline at `y`.
    fn text(&mut self, x: f64, y: f64, text: &str, font: Font, color: Color) -> Result<()>;
}

/// A canvas that remembers every operation, per page.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    pages: Vec<Vec<DrawCommand>>,
    current: Option<usize>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Operations recorded on a page, in call order.
    pub fn commands(&self, page: usize) -> &[DrawCommand] {
        self.pages.get(page).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Text strings recorded on a page.
    pub fn texts(&self, page: usize) -> Vec<&str> {
        self.commands(page)
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    fn record(&mut self, command: DrawCommand) -> Result<()> {
        let index = self.current.ok_or(VademecumError::NoPage)?;
        self.pages[index].push(command);
        Ok(())
    }
}

impl Canvas for RecordingCanvas {
    fn add_page(&mut self) -> Result<()> {
        self.pages.push(Vec::new());
        self.current = Some(self.pages.len() - 1);
        Ok(())
    }

    fn set_page(&mut self, index: usize) -> Result<()> {
        if index >= self.pages.len() {
            return Err(VademecumError::PageOutOfRange {
                index,
                count: self.pages.len(),
            });
        }
        self.current = Some(index);
        Ok(())
    }

    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn rect(&mut self, rect: Rect, fill: Option<Color>, stroke: Option<Stroke>) -> Result<()> {
        self.record(DrawCommand::Rect { rect, fill, stroke })
    }

    fn rounded_rect(&mut self, rect: Rect, radius: f64, fill: Color) -> Result<()> {
        self.record(DrawCommand::RoundedRect { rect, radius, fill })
    }

    fn circle(&mut self, cx: f64, cy: f64, radius: f64, fill: Color) -> Result<()> {
        self.record(DrawCommand::Circle { cx, cy, radius, fill })
    }

    fn line(&mut self, from: (f64, f64), to: (f64, f64), stroke: Stroke) -> Result<()> {
        self.record(DrawCommand::Line { from, to, stroke })
    }

    fn text(&mut self, x: f64, y: f64, text: &str, font: Font, color: Color) -> Result<()> {
        self.record(DrawCommand::Text {
            x,
            y,
            text: text.to_string(),
            font,
            color,
        })
    }
}
