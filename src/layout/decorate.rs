//! # Page Decoration
//!
//! Running headers and page numbers. Headers are stamped as content pages
//! open, because they push the column top down; numbers wait until the page
//! count is final.

use crate::canvas::{Rect, Stroke};
use crate::font::{Font, TextMeasure};
use crate::style::{sizes, Color};

use super::{DrawCommand, LayoutPage, PageKind, PageSet, PAGE_HEIGHT, PAGE_WIDTH};

pub const RUNNING_HEADER_HEIGHT: f64 = 20.0;
/// Baseline of the "k / N" page number.
pub const PAGE_NUMBER_Y: f64 = PAGE_HEIGHT - 8.0;

/// Paint the running header band under everything already on the page.
///
/// Does nothing on a page that already has one.
pub fn stamp_running_header(page: &mut LayoutPage, text: &str) {
    if page.running_header {
        return;
    }
    page.running_header = true;

    let band = [
        DrawCommand::Rect {
            rect: Rect::new(0.0, 0.0, PAGE_WIDTH, RUNNING_HEADER_HEIGHT),
            fill: Some(Color::LIGHT),
            stroke: None,
        },
        DrawCommand::Text {
            x: 10.0,
            y: 12.0,
            text: text.to_string(),
            font: Font::regular(sizes::TINY),
            color: Color::MUTED,
        },
        DrawCommand::Line {
            from: (0.0, RUNNING_HEADER_HEIGHT),
            to: (PAGE_WIDTH, RUNNING_HEADER_HEIGHT),
            stroke: Stroke { color: Color::BORDER, width: 0.3 },
        },
    ];
    page.commands.splice(0..0, band);
}

/// Make sure every content page from `first_content_page` on carries the
/// running header. Returns how many pages had to be stamped.
pub fn stamp_running_headers(pages: &mut PageSet, first_content_page: usize, text: &str) -> usize {
    let mut stamped = 0;
    for page in pages
        .iter_mut()
        .skip(first_content_page)
        .filter(|page| page.kind == PageKind::Content && !page.running_header)
    {
        stamp_running_header(page, text);
        stamped += 1;
    }
    if stamped > 0 {
        tracing::debug!(stamped, "Running headers added after flow");
    }
    stamped
}

/// Print "k / N" at the foot of every page except the cover.
pub fn number_pages(pages: &mut PageSet, measure: &dyn TextMeasure) {
    let total = pages.len();
    for (index, page) in pages.iter_mut().enumerate().skip(1) {
        page.centered_text(
            measure,
            PAGE_NUMBER_Y,
            format!("{} / {}", index + 1, total),
            Font::regular(sizes::TINY),
            Color::MUTED,
        );
    }
}
