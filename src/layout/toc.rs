//! # Table of Contents
//!
//! One card per law with its clause counts and the page it opens on.
//!
//! The contents pages come before the flow that decides those page numbers,
//! so the number of contents pages is computed up front from the entry
//! count alone. With [`TocStrategy::Exact`] the flow is then run once on
//! scratch pages that start exactly where the real content will start.

use serde::Serialize;

use crate::font::{Font, TextMeasure};
use crate::model::{Law, TocStrategy};
use crate::style::{sizes, Color};
use crate::text::truncate_with_ellipsis;

use super::flow::FlowEngine;
use super::{title_band, PageKind, PageSet};

const FIRST_ENTRY_Y: f64 = 60.0;
const CONTINUED_ENTRY_Y: f64 = 40.0;
const ENTRY_STEP: f64 = 35.0;
/// Past this y the next entry goes on a new page.
const ENTRY_LIMIT_Y: f64 = 237.0;
const NAME_MAX_CHARS: usize = 60;
const FOOTER_Y: f64 = 272.0;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TocEntry {
    /// Law name, shortened for the card.
    pub name: String,
    pub clause_count: usize,
    pub highlighted_count: usize,
    /// One-based page the law opens on.
    pub page: usize,
}

impl TocEntry {
    pub fn counts_line(&self) -> String {
        format!("{} artigos • {} marcados", self.clause_count, self.highlighted_count)
    }
}

/// Page offset (from the first contents page) and y of each entry.
pub fn entry_slots(count: usize) -> Vec<(usize, f64)> {
    let mut slots = Vec::with_capacity(count);
    let (mut offset, mut y) = (0, FIRST_ENTRY_Y);
    for index in 0..count {
        slots.push((offset, y));
        y += ENTRY_STEP;
        if y > ENTRY_LIMIT_Y && index + 1 < count {
            offset += 1;
            y = CONTINUED_ENTRY_Y;
        }
    }
    slots
}

/// How many contents pages `count` entries take.
pub fn page_span(count: usize) -> usize {
    entry_slots(count).last().map_or(1, |(offset, _)| offset + 1)
}

/// Build the entries, resolving opening pages with the chosen strategy.
///
/// `toc_start` is the index of the first contents page; the transition page
/// follows the contents and content starts right after it.
pub fn build_entries(laws: &[Law], strategy: TocStrategy, toc_start: usize, flow: &FlowEngine) -> Vec<TocEntry> {
    let slots = entry_slots(laws.len());
    let pages: Vec<usize> = match strategy {
        TocStrategy::Exact => {
            let first_content_page = toc_start + page_span(laws.len()) + 1;
            flow.dry_run(laws, first_content_page).opening_page_numbers()
        }
        TocStrategy::Estimated => slots
            .iter()
            .enumerate()
            .map(|(index, (offset, _))| {
                let toc_page_number = toc_start + offset + 1;
                toc_page_number + 1 + 2 * index
            })
            .collect(),
    };
    tracing::debug!(?strategy, entries = laws.len(), "Contents resolved");

    laws.iter()
        .zip(pages)
        .map(|(law, page)| TocEntry {
            name: truncate_with_ellipsis(&law.name, NAME_MAX_CHARS),
            clause_count: law.clauses.len(),
            highlighted_count: law.highlighted_count(),
            page,
        })
        .collect()
}

/// Append the contents pages.
pub fn layout_contents(pages: &mut PageSet, measure: &dyn TextMeasure, entries: &[TocEntry]) {
    let first = pages.add_page(PageKind::Contents);
    title_band(pages.page_mut(first), measure, "SUMÁRIO GERAL");

    let mut current = 0;
    for (entry, (offset, y)) in entries.iter().zip(entry_slots(entries.len())) {
        while current < offset {
            pages.add_page(PageKind::Contents);
            current += 1;
        }
        let page = pages.last_mut();
        page.rounded_rect(10.0, y - 5.0, 190.0, 25.0, 3.0, Color::LIGHT);
        page.text(15.0, y + 5.0, entry.name.as_str(), Font::bold(sizes::SUBHEADING), Color::TEXT);
        page.text(15.0, y + 14.0, entry.counts_line(), Font::regular(sizes::SMALL), Color::MUTED);
        page.text(
            175.0,
            y + 10.0,
            format!("Pág. {}", entry.page),
            Font::bold(sizes::BODY),
            Color::PRIMARY,
        );
    }

    let clauses: usize = entries.iter().map(|e| e.clause_count).sum();
    let highlighted: usize = entries.iter().map(|e| e.highlighted_count).sum();
    pages.last_mut().centered_text(
        measure,
        FOOTER_Y,
        format!("Total: {} leis • {} artigos • {} marcados", entries.len(), clauses, highlighted),
        Font::regular(sizes::TINY),
        Color::MUTED,
    );
}
