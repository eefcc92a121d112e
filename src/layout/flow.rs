//! # Flow Engine
//!
//! The cursor state machine that pours laws into two columns.
//!
//! The cursor only ever moves three ways: down within a column, from the
//! left column to the top of the right one, or to the left column of a new
//! page. Every layout step takes the cursor by value and returns where the
//! next step starts, so there is no shared position to get out of sync.

use serde::Serialize;

use crate::font::{Font, TextMeasure};
use crate::model::{Law, LayoutOptions};
use crate::style::{sizes, Color};
use crate::text::truncate_with_ellipsis;

use super::article::ClausePlacement;
use super::decorate::stamp_running_header;
use super::{Column, Cursor, PageKind, PageSet, FRONT_MATTER_PAGES, LAW_SPACING, PAGE_WIDTH};

/// Room a heading needs below the column top before it forces a new page.
const HEADING_ROOM: f64 = 40.0;
const HEADING_ADVANCE: f64 = 20.0;
const HEADING_MAX_CHARS: usize = 85;
const HEADING_RULE_WIDTH: f64 = 100.0;

/// What the flow did, for the table of contents and for diagnostics.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowReport {
    /// Page index of each law's heading, in law order.
    pub law_openings: Vec<usize>,
    pub placements: Vec<ClausePlacement>,
}

impl FlowReport {
    /// One-based page number each law opens on.
    pub fn opening_page_numbers(&self) -> Vec<usize> {
        self.law_openings.iter().map(|index| index + 1).collect()
    }
}

pub struct FlowEngine<'a> {
    pub(super) measure: &'a dyn TextMeasure,
    pub(super) options: &'a LayoutOptions,
}

impl<'a> FlowEngine<'a> {
    pub fn new(measure: &'a dyn TextMeasure, options: &'a LayoutOptions) -> Self {
        Self { measure, options }
    }

    /// Lay out every law, opening content pages on `pages` as needed.
    ///
    /// Nothing is added when there are no laws.
    pub fn run(&self, laws: &[Law], pages: &mut PageSet) -> FlowReport {
        let mut report = FlowReport::default();
        if laws.is_empty() {
            return report;
        }

        let mut cursor = self.new_page(pages);
        for (law_index, law) in laws.iter().enumerate() {
            cursor = self.place_heading(law, cursor, pages);
            report.law_openings.push(cursor.page);

            for clause in law.ordered_clauses() {
                let (placement, next) = self.place_clause(clause, law_index, cursor, pages);
                report.placements.push(placement);
                cursor = next;
            }

            tracing::debug!(
                law = %law.name,
                clauses = law.clauses.len(),
                opening_page = report.law_openings[law_index],
                end_page = cursor.page,
                "Law laid out"
            );
            cursor = cursor.advance(LAW_SPACING);
        }
        report
    }

    /// Run the flow on scratch pages, as if content began at
    /// `first_content_page`, and report where everything would land.
    pub fn dry_run(&self, laws: &[Law], first_content_page: usize) -> FlowReport {
        let mut scratch = PageSet::reserved(first_content_page);
        self.run(laws, &mut scratch)
    }

    /// Open a content page and return the cursor at its left column top.
    pub fn new_page(&self, pages: &mut PageSet) -> Cursor {
        let index = pages.add_page(PageKind::Content);
        if index >= FRONT_MATTER_PAGES {
            stamp_running_header(pages.page_mut(index), &self.options.running_header_text);
        }
        tracing::trace!(page = index, "New content page");
        Cursor {
            page: index,
            column: Column::Left,
            y: pages.page(index).column_top(),
        }
    }

    /// Move to the top of the right column, or to a new page from the right.
    ///
    /// The right column starts below a heading drawn on the same page.
    pub fn break_column(&self, cursor: Cursor, pages: &mut PageSet) -> Cursor {
        match cursor.column {
            Column::Left => {
                tracing::trace!(page = cursor.page, "Switch to right column");
                Cursor {
                    column: Column::Right,
                    y: pages.page(cursor.page).right_column_top(),
                    ..cursor
                }
            }
            Column::Right => self.new_page(pages),
        }
    }

    /// Draw a law's centered heading, starting a page if the current one is
    /// already in use.
    fn place_heading(&self, law: &Law, cursor: Cursor, pages: &mut PageSet) -> Cursor {
        let top = pages.page(cursor.page).column_top();
        let cursor = if cursor.column == Column::Right || cursor.y > top + HEADING_ROOM {
            self.new_page(pages)
        } else {
            cursor
        };

        let name = truncate_with_ellipsis(&law.name, HEADING_MAX_CHARS).to_uppercase();
        let page = pages.page_mut(cursor.page);
        page.centered_text(
            self.measure,
            cursor.y + 5.0,
            name,
            Font::bold(sizes::HEADING),
            Color::PRIMARY,
        );
        page.fill_rect(
            (PAGE_WIDTH - HEADING_RULE_WIDTH) / 2.0,
            cursor.y + 10.0,
            HEADING_RULE_WIDTH,
            0.5,
            Color::PRIMARY,
        );
        page.heading_bottom = Some(cursor.y + HEADING_ADVANCE);
        cursor.advance(HEADING_ADVANCE)
    }
}
