//! # Clause Renderer
//!
//! Measures a clause, decides which branch places it, and draws it.
//!
//! A clause block is a label row, the wrapped body, and padding:
//!
//! ```text
//! required height = LABEL_ROW + lines × LINE_HEIGHT + BLOCK_PADDING
//! ```
//!
//! Blocks that would fill most of a column take the long branch: they start
//! on a fresh page, only a short band is tinted, and the lines pour across
//! as many columns as they need with a continuation marker at each break.
//! Everything else takes the normal branch and is moved to the next column
//! whole when it does not fit.

use serde::Serialize;

use crate::font::{Font, TextMeasure};
use crate::model::{Clause, ContinuationPolicy, HighlightColor, LayoutOptions};
use crate::style::{sizes, Color};
use crate::text::TextLayout;

use super::flow::FlowEngine;
use super::{Column, Cursor, LayoutPage, PageSet, CLAUSE_SPACING, COLUMN_WIDTH, CONTENT_BOTTOM, LINE_HEIGHT};

pub const LABEL_ROW: f64 = 8.0;
pub const BLOCK_PADDING: f64 = 6.0;
/// Distance from the column edge to the label and body text.
pub const TEXT_INSET: f64 = 6.0;
pub const TEXT_WIDTH: f64 = COLUMN_WIDTH - 8.0;
pub const ACCENT_BAR_WIDTH: f64 = 4.0;
pub const INDICATOR_RADIUS: f64 = 2.5;
/// Tinted band height for clauses on the long branch.
pub const LONG_BAND_HEIGHT: f64 = 15.0;
/// Share of the usable column height above which a clause is "long".
pub const LONG_CLAUSE_RATIO: f64 = 0.8;

const LABEL_ADVANCE: f64 = 10.0;
const CONTINUATION_ADVANCE: f64 = 8.0;

/// Height a block with `line_count` body lines occupies.
pub fn required_height(line_count: usize) -> f64 {
    LABEL_ROW + line_count as f64 * LINE_HEIGHT + BLOCK_PADDING
}

pub fn continuation_marker(label: &str) -> String {
    format!("[...continuação {}]", label)
}

// ── Label stripping ─────────────────────────────────────────────

fn is_separator(ch: char) -> bool {
    ch.is_whitespace() || matches!(ch, '-' | '–' | '—' | '.')
}

fn is_ordinal(ch: char) -> bool {
    matches!(ch, 'º' | 'ª' | '°')
}

fn strip_prefix_ignore_case<'t>(text: &'t str, prefix: &str) -> Option<&'t str> {
    let mut chars = text.chars();
    for expected in prefix.chars() {
        let actual = chars.next()?;
        if !actual.to_lowercase().eq(expected.to_lowercase()) {
            return None;
        }
    }
    Some(chars.as_str())
}

/// "Art" + "12" from "Art. 12", matched loosely against the body.
fn match_label_parts<'t>(body: &'t str, label: &str) -> Option<&'t str> {
    let prefix_end = label.find(|c: char| !c.is_alphabetic())?;
    let (prefix, number) = label.split_at(prefix_end);
    let number = number
        .trim_start_matches('.')
        .trim_start()
        .trim_end_matches(is_ordinal);
    if prefix.is_empty() || number.is_empty() {
        return None;
    }

    let rest = strip_prefix_ignore_case(body, prefix)?;
    let rest = rest.strip_prefix('.').unwrap_or(rest).trim_start();
    let rest = rest.strip_prefix(number)?;
    let rest = rest.strip_prefix(is_ordinal).unwrap_or(rest);
    rest.starts_with(is_separator).then_some(rest)
}

/// Drop a leading copy of the label from a clause body.
///
/// Editors often paste "Art. 12º - O consumidor..." into a clause already
/// labelled "Art. 12". The leading label is removed when it is followed by
/// whitespace, a dash or a period; otherwise the body is returned untouched.
pub fn strip_redundant_label<'t>(body: &'t str, label: &str) -> &'t str {
    let label = label.trim();
    if label.is_empty() {
        return body;
    }
    let trimmed = body.trim_start();
    let rest = match_label_parts(trimmed, label).or_else(|| {
        strip_prefix_ignore_case(trimmed, label).filter(|rest| rest.starts_with(is_separator))
    });
    match rest {
        Some(rest) => rest.trim_start_matches(is_separator),
        None => body,
    }
}

// ── Measurement ─────────────────────────────────────────────────

/// What a line of a block carries, which decides how it is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Body,
    Annotation,
    /// Tags and importance.
    Meta,
}

impl LineKind {
    pub fn font(self) -> Font {
        match self {
            LineKind::Body => Font::regular(sizes::BODY),
            LineKind::Annotation => Font::italic(sizes::SMALL),
            LineKind::Meta => Font::regular(sizes::TINY),
        }
    }

    pub fn color(self) -> Color {
        match self {
            LineKind::Body => Color::TEXT,
            LineKind::Annotation | LineKind::Meta => Color::MUTED,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlockLine {
    pub text: String,
    pub kind: LineKind,
}

/// A clause measured and wrapped, ready to place.
#[derive(Debug, Clone)]
pub struct ClauseBlock {
    pub label: String,
    pub lines: Vec<BlockLine>,
    pub highlight: Option<HighlightColor>,
}

impl ClauseBlock {
    pub fn measure(clause: &Clause, measure: &dyn TextMeasure, options: &LayoutOptions) -> Self {
        let layout = TextLayout::new(measure);
        let mut lines = Vec::new();
        let mut push_wrapped = |text: &str, kind: LineKind| {
            lines.extend(
                layout
                    .wrap(text, TEXT_WIDTH, kind.font())
                    .into_iter()
                    .map(|text| BlockLine { text, kind }),
            );
        };

        push_wrapped(strip_redundant_label(&clause.text, &clause.label), LineKind::Body);

        let annotation = clause.annotation.trim();
        if options.export_annotations && !annotation.is_empty() {
            push_wrapped(annotation, LineKind::Annotation);
        }
        if options.export_tags && !clause.tags.is_empty() {
            let tags: Vec<String> = clause.tags.iter().map(|t| format!("#{}", t)).collect();
            push_wrapped(&tags.join(" "), LineKind::Meta);
        }
        if options.show_importance {
            push_wrapped(&format!("Relevância: {}/5", clause.importance.get()), LineKind::Meta);
        }

        Self {
            label: clause.label.clone(),
            lines,
            highlight: clause.highlight(),
        }
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn height(&self) -> f64 {
        required_height(self.lines.len())
    }
}

// ── Placement ───────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Branch {
    Normal,
    Long,
}

/// Where one clause ended up.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClausePlacement {
    pub law_index: usize,
    pub label: String,
    pub start: Cursor,
    pub height: f64,
    pub line_count: usize,
    pub branch: Branch,
    pub highlight: Option<HighlightColor>,
    /// Cursor after the clause and its trailing spacing.
    pub end: Cursor,
}

fn draw_frame(page: &mut LayoutPage, at: Cursor, height: f64, color: HighlightColor) {
    let style = color.style();
    let x = at.x();
    page.fill_rect(x, at.y, COLUMN_WIDTH, height, style.pastel);
    page.fill_rect(x, at.y, ACCENT_BAR_WIDTH, height, style.accent);
    page.circle(x + COLUMN_WIDTH - 8.0, at.y + 4.0, INDICATOR_RADIUS, style.accent);
}

fn draw_label(page: &mut LayoutPage, at: Cursor, block: &ClauseBlock) {
    let color = block.highlight.map_or(Color::PRIMARY, |c| c.style().accent);
    page.text(
        at.x() + TEXT_INSET,
        at.y + 5.0,
        block.label.as_str(),
        Font::bold(sizes::SUBHEADING),
        color,
    );
}

impl<'a> FlowEngine<'a> {
    /// Measure, position and draw one clause.
    pub fn place_clause(
        &self,
        clause: &Clause,
        law_index: usize,
        cursor: Cursor,
        pages: &mut PageSet,
    ) -> (ClausePlacement, Cursor) {
        let block = ClauseBlock::measure(clause, self.measure, self.options);
        let height = block.height();
        let (branch, start) = self.position_block(height, cursor, pages);

        let end = match branch {
            Branch::Long => {
                tracing::debug!(clause = %block.label, lines = block.line_count(), page = start.page, "Long clause");
                self.draw_long(&block, start, pages)
            }
            Branch::Normal => self.draw_normal(&block, start, pages),
        };

        let placement = ClausePlacement {
            law_index,
            label: block.label.clone(),
            start,
            height,
            line_count: block.line_count(),
            branch,
            highlight: block.highlight,
            end,
        };
        (placement, end)
    }

    /// Pick the branch and the cursor the block starts at.
    pub fn position_block(&self, height: f64, cursor: Cursor, pages: &mut PageSet) -> (Branch, Cursor) {
        let top = pages.page(cursor.page).column_top();
        if height > LONG_CLAUSE_RATIO * (CONTENT_BOTTOM - top) {
            let at_top = cursor.column == Column::Left && cursor.y <= top;
            let start = if at_top { cursor } else { self.new_page(pages) };
            (Branch::Long, start)
        } else if height + CLAUSE_SPACING > cursor.remaining() {
            let mut start = self.break_column(cursor, pages);
            // A right column shortened by a heading may still be too short.
            if height + CLAUSE_SPACING > start.remaining() {
                start = self.break_column(start, pages);
            }
            (Branch::Normal, start)
        } else {
            (Branch::Normal, cursor)
        }
    }

    fn draw_normal(&self, block: &ClauseBlock, start: Cursor, pages: &mut PageSet) -> Cursor {
        let page = pages.page_mut(start.page);
        if let Some(color) = block.highlight {
            draw_frame(page, start, block.height(), color);
        }
        draw_label(page, start, block);

        let cursor = self.flow_lines(block, start.advance(LABEL_ADVANCE), pages, self.marks_normal_breaks());
        cursor.advance(CLAUSE_SPACING)
    }

    fn draw_long(&self, block: &ClauseBlock, start: Cursor, pages: &mut PageSet) -> Cursor {
        let page = pages.page_mut(start.page);
        if let Some(color) = block.highlight {
            draw_frame(page, start, LONG_BAND_HEIGHT.min(block.height()), color);
        }
        draw_label(page, start, block);

        let cursor = self.flow_lines(block, start.advance(LABEL_ADVANCE), pages, true);
        cursor.advance(CLAUSE_SPACING)
    }

    /// Whether a normal-branch clause gets a marker when it breaks.
    pub(crate) fn marks_normal_breaks(&self) -> bool {
        self.options.continuation_policy == ContinuationPolicy::Always
    }

    /// Draw the block's lines from `cursor`, breaking to the next column or
    /// page whenever a line would cross the column bottom.
    pub(crate) fn flow_lines(
        &self,
        block: &ClauseBlock,
        mut cursor: Cursor,
        pages: &mut PageSet,
        marker: bool,
    ) -> Cursor {
        for line in &block.lines {
            if cursor.y + LINE_HEIGHT > CONTENT_BOTTOM {
                cursor = self.break_column(cursor, pages);
                if marker {
                    pages.page_mut(cursor.page).text(
                        cursor.x() + TEXT_INSET,
                        cursor.y,
                        continuation_marker(&block.label),
                        Font::italic(sizes::TINY),
                        Color::MUTED,
                    );
                    cursor = cursor.advance(CONTINUATION_ADVANCE);
                }
            }
            pages.page_mut(cursor.page).text(
                cursor.x() + TEXT_INSET,
                cursor.y,
                line.text.as_str(),
                line.kind.font(),
                line.kind.color(),
            );
            cursor = cursor.advance(LINE_HEIGHT);
        }
        cursor
    }
}
