//! # Two-Column Layout Engine
//!
//! Turns the ordered laws into positioned drawing commands, page by page.
//!
//! ## How a Render Is Laid Out
//!
//! 1. Front matter: cover, statistics, optional notices, legend
//! 2. Table of contents, whose page numbers come from a dry run of step 4
//! 3. A transition page
//! 4. The main flow: every law's clauses, poured into two columns
//! 5. Decoration: running headers and "k / N" page numbers
//!
//! Nothing here touches a drawing backend. Each step records
//! [`DrawCommand`]s into a [`PageSet`], and only once the page count is final
//! does [`PageSet::replay`] hand them to a [`Canvas`]. That is what lets the
//! numbering pass print "k / N" and lets the table of contents run the flow
//! a second time on scratch pages.
//!
//! All coordinates are millimetres from the top-left corner of an A4 page.

pub mod article;
pub mod decorate;
pub mod flow;
pub mod front_matter;
pub mod toc;
pub mod transition;

use serde::Serialize;

use crate::canvas::{Canvas, Rect, Stroke};
use crate::error::Result;
use crate::font::{Font, TextMeasure};
use crate::model::{Law, RenderConfig};
use crate::style::{sizes, Color};

use self::flow::{FlowEngine, FlowReport};
use self::front_matter::FrontMatter;
use self::toc::TocEntry;

// ── Page geometry ───────────────────────────────────────────────

pub const PAGE_WIDTH: f64 = 210.0;
pub const PAGE_HEIGHT: f64 = 297.0;
pub const MARGIN_TOP: f64 = 15.0;
pub const MARGIN_BOTTOM: f64 = 15.0;
pub const MARGIN_LEFT: f64 = 10.0;
pub const MARGIN_RIGHT: f64 = 10.0;

pub const COLUMN_WIDTH: f64 = 92.0;
pub const COLUMN_GAP: f64 = 6.0;

/// Lowest y any column content may reach.
pub const CONTENT_BOTTOM: f64 = PAGE_HEIGHT - MARGIN_BOTTOM;

/// Pages at or past this index that hold content get the running header.
pub const FRONT_MATTER_PAGES: usize = 5;

/// Column top on pages that carry the running header.
pub const RUNNING_HEADER_TOP: f64 = 30.0;

pub const LINE_HEIGHT: f64 = 3.5;
pub const CLAUSE_SPACING: f64 = 8.0;
pub const LAW_SPACING: f64 = 20.0;

/// Height of the colored title band on notices, legend and contents pages.
pub(crate) const TITLE_BAND_HEIGHT: f64 = 35.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Column {
    Left,
    Right,
}

impl Column {
    /// Left edge of the column.
    pub fn x(self) -> f64 {
        match self {
            Column::Left => MARGIN_LEFT,
            Column::Right => MARGIN_LEFT + COLUMN_WIDTH + COLUMN_GAP,
        }
    }
}

/// Where the next unit of content goes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Cursor {
    pub page: usize,
    pub column: Column,
    pub y: f64,
}

impl Cursor {
    pub fn x(&self) -> f64 {
        self.column.x()
    }

    /// Vertical space left in the current column.
    pub fn remaining(&self) -> f64 {
        CONTENT_BOTTOM - self.y
    }

    /// Move down by `dy`, never past the column bottom.
    pub fn advance(self, dy: f64) -> Self {
        Self {
            y: (self.y + dy).min(CONTENT_BOTTOM),
            ..self
        }
    }
}

// ── Recorded output ─────────────────────────────────────────────

/// What a page is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PageKind {
    Cover,
    Statistics,
    Notices,
    Legend,
    Contents,
    Transition,
    Content,
    /// Stand-in for a page that exists in the real document but is not
    /// drawn, used when the flow runs on scratch pages.
    Reserved,
}

/// One positioned drawing operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Rect {
        rect: Rect,
        fill: Option<Color>,
        stroke: Option<Stroke>,
    },
    RoundedRect {
        rect: Rect,
        radius: f64,
        fill: Color,
    },
    Circle {
        cx: f64,
        cy: f64,
        radius: f64,
        fill: Color,
    },
    Line {
        from: (f64, f64),
        to: (f64, f64),
        stroke: Stroke,
    },
    /// Single line of text, `y` is the baseline.
    Text {
        x: f64,
        y: f64,
        text: String,
        font: Font,
        color: Color,
    },
}

impl DrawCommand {
    /// Execute this command on the canvas's current page.
    pub fn paint(&self, canvas: &mut dyn Canvas) -> Result<()> {
        match self {
            DrawCommand::Rect { rect, fill, stroke } => canvas.rect(*rect, *fill, *stroke),
            DrawCommand::RoundedRect { rect, radius, fill } => {
                canvas.rounded_rect(*rect, *radius, *fill)
            }
            DrawCommand::Circle { cx, cy, radius, fill } => canvas.circle(*cx, *cy, *radius, *fill),
            DrawCommand::Line { from, to, stroke } => canvas.line(*from, *to, *stroke),
            DrawCommand::Text { x, y, text, font, color } => canvas.text(*x, *y, text, *font, *color),
        }
    }
}

/// A laid-out page: its commands in paint order.
#[derive(Debug, Clone)]
pub struct LayoutPage {
    pub kind: PageKind,
    /// Whether the running header band has been drawn on this page.
    pub running_header: bool,
    /// Lowest y of a law heading on this page. Headings span both columns.
    pub heading_bottom: Option<f64>,
    pub commands: Vec<DrawCommand>,
}

impl LayoutPage {
    pub fn new(kind: PageKind) -> Self {
        Self {
            kind,
            running_header: false,
            heading_bottom: None,
            commands: Vec::new(),
        }
    }

    /// Where columns start on this page.
    pub fn column_top(&self) -> f64 {
        if self.running_header {
            RUNNING_HEADER_TOP
        } else {
            MARGIN_TOP
        }
    }

    /// Where the right column starts: below any heading on the page.
    pub fn right_column_top(&self) -> f64 {
        let top = self.column_top();
        self.heading_bottom.map_or(top, |bottom| bottom.max(top))
    }

    pub fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color) {
        self.commands.push(DrawCommand::Rect {
            rect: Rect::new(x, y, width, height),
            fill: Some(color),
            stroke: None,
        });
    }

    pub fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color, line_width: f64) {
        self.commands.push(DrawCommand::Rect {
            rect: Rect::new(x, y, width, height),
            fill: None,
            stroke: Some(Stroke { color, width: line_width }),
        });
    }

    pub fn rounded_rect(&mut self, x: f64, y: f64, width: f64, height: f64, radius: f64, color: Color) {
        self.commands.push(DrawCommand::RoundedRect {
            rect: Rect::new(x, y, width, height),
            radius,
            fill: color,
        });
    }

    pub fn circle(&mut self, cx: f64, cy: f64, radius: f64, color: Color) {
        self.commands.push(DrawCommand::Circle { cx, cy, radius, fill: color });
    }

    pub fn line(&mut self, from: (f64, f64), to: (f64, f64), color: Color, line_width: f64) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            stroke: Stroke { color, width: line_width },
        });
    }

    pub fn text(&mut self, x: f64, y: f64, text: impl Into<String>, font: Font, color: Color) {
        self.commands.push(DrawCommand::Text {
            x,
            y,
            text: text.into(),
            font,
            color,
        });
    }

    /// Text centered horizontally on the page.
    pub fn centered_text(
        &mut self,
        measure: &dyn TextMeasure,
        y: f64,
        text: impl Into<String>,
        font: Font,
        color: Color,
    ) {
        let text = text.into();
        let x = (PAGE_WIDTH - measure.text_width(&text, font)) / 2.0;
        self.text(x, y, text, font, color);
    }

    /// Every text string on the page, in paint order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.texts().any(|t| t.contains(needle))
    }
}

/// The ordered pages of a document under construction.
#[derive(Debug, Clone, Default)]
pub struct PageSet {
    pages: Vec<LayoutPage>,
}

impl PageSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// A page set that already holds `count` undrawn pages.
    pub fn reserved(count: usize) -> Self {
        Self {
            pages: (0..count).map(|_| LayoutPage::new(PageKind::Reserved)).collect(),
        }
    }

    /// Append a page and return its index.
    pub fn add_page(&mut self, kind: PageKind) -> usize {
        self.pages.push(LayoutPage::new(kind));
        self.pages.len() - 1
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn page(&self, index: usize) -> &LayoutPage {
        &self.pages[index]
    }

    pub fn page_mut(&mut self, index: usize) -> &mut LayoutPage {
        &mut self.pages[index]
    }

    /// The most recently added page.
    pub fn last_mut(&mut self) -> &mut LayoutPage {
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    pub fn pages(&self) -> &[LayoutPage] {
        &self.pages
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut LayoutPage> {
        self.pages.iter_mut()
    }

    /// Draw every recorded page onto the canvas, in order.
    pub fn replay(&self, canvas: &mut dyn Canvas) -> Result<()> {
        for page in &self.pages {
            canvas.add_page()?;
            for command in &page.commands {
                command.paint(canvas)?;
            }
        }
        Ok(())
    }
}

/// Colored band across the top of a titled page.
pub(crate) fn title_band(page: &mut LayoutPage, measure: &dyn TextMeasure, title: &str) {
    page.fill_rect(0.0, 0.0, PAGE_WIDTH, TITLE_BAND_HEIGHT, Color::PRIMARY);
    page.centered_text(measure, 25.0, title, Font::bold(sizes::TITLE), Color::WHITE);
}

// ── Engine ──────────────────────────────────────────────────────

/// The result of laying out a whole document.
#[derive(Debug, Clone)]
pub struct LaidOutDocument {
    pub pages: PageSet,
    pub toc: Vec<TocEntry>,
    /// Index of the first page holding clause content, if any.
    pub first_content_page: Option<usize>,
    pub flow: FlowReport,
}

pub struct LayoutEngine<'a> {
    measure: &'a dyn TextMeasure,
}

impl<'a> LayoutEngine<'a> {
    pub fn new(measure: &'a dyn TextMeasure) -> Self {
        Self { measure }
    }

    /// Lay out the full document: front matter, contents, transition,
    /// clause flow, then headers and page numbers.
    pub fn layout(&self, laws: &[Law], config: &RenderConfig) -> LaidOutDocument {
        let mut pages = PageSet::new();

        let front = FrontMatter::new(self.measure, config);
        front.cover(&mut pages);
        front.statistics(&mut pages, laws);
        if config.notices().is_some() || config.comments().is_some() {
            front.notices(&mut pages);
        }
        front.legend(&mut pages);
        tracing::debug!(pages = pages.len(), "Front matter laid out");

        let toc_start = pages.len();
        let flow = FlowEngine::new(self.measure, &config.options);
        let entries = toc::build_entries(laws, config.options.toc_strategy, toc_start, &flow);
        toc::layout_contents(&mut pages, self.measure, &entries);

        transition::layout_transition(&mut pages, self.measure, config);

        let content_start = pages.len();
        let report = flow.run(laws, &mut pages);
        let first_content_page = (!laws.is_empty()).then_some(content_start);
        tracing::debug!(
            laws = laws.len(),
            clauses = report.placements.len(),
            pages = pages.len(),
            "Content flow laid out"
        );

        if let Some(first) = first_content_page {
            decorate::stamp_running_headers(&mut pages, first, &config.options.running_header_text);
        }
        decorate::number_pages(&mut pages, self.measure);

        LaidOutDocument {
            pages,
            toc: entries,
            first_content_page,
            flow: report,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::RecordingCanvas;

    #[test]
    fn test_column_positions() {
        assert_eq!(Column::Left.x(), 10.0);
        assert_eq!(Column::Right.x(), 108.0);
        assert_eq!(Column::Right.x() + COLUMN_WIDTH, PAGE_WIDTH - MARGIN_RIGHT);
    }

    #[test]
    fn test_cursor_advance_clamps_at_column_bottom() {
        let cursor = Cursor { page: 6, column: Column::Left, y: 280.0 };
        let moved = cursor.advance(LAW_SPACING);
        assert_eq!(moved.y, CONTENT_BOTTOM);
        assert_eq!(moved.remaining(), 0.0);
        assert_eq!(cursor.advance(1.0).y, 281.0);
    }

    #[test]
    fn test_column_top_follows_running_header() {
        let mut page = LayoutPage::new(PageKind::Content);
        assert_eq!(page.column_top(), MARGIN_TOP);
        page.running_header = true;
        assert_eq!(page.column_top(), RUNNING_HEADER_TOP);
    }

    #[test]
    fn test_right_column_starts_below_heading() {
        let mut page = LayoutPage::new(PageKind::Content);
        page.running_header = true;
        assert_eq!(page.right_column_top(), RUNNING_HEADER_TOP);
        page.heading_bottom = Some(50.0);
        assert_eq!(page.right_column_top(), 50.0);
        assert_eq!(page.column_top(), RUNNING_HEADER_TOP);
    }

    #[test]
    fn test_replay_reaches_canvas_in_order() {
        let mut pages = PageSet::new();
        let first = pages.add_page(PageKind::Cover);
        pages.page_mut(first).text(10.0, 10.0, "capa", Font::regular(8.0), Color::TEXT);
        let second = pages.add_page(PageKind::Content);
        pages.page_mut(second).fill_rect(0.0, 0.0, 5.0, 5.0, Color::LIGHT);
        pages.page_mut(second).text(10.0, 10.0, "conteúdo", Font::regular(8.0), Color::TEXT);

        let mut canvas = RecordingCanvas::new();
        pages.replay(&mut canvas).unwrap();
        assert_eq!(canvas.page_count(), 2);
        assert_eq!(canvas.texts(0), vec!["capa"]);
        assert_eq!(canvas.commands(1).len(), 2);
        assert_eq!(canvas.commands(1), pages.page(1).commands.as_slice());
    }

    #[test]
    fn test_reserved_pages() {
        let mut pages = PageSet::reserved(4);
        assert_eq!(pages.len(), 4);
        assert_eq!(pages.add_page(PageKind::Content), 4);
        assert!(pages.page(0).commands.is_empty());
    }
}
