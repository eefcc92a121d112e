//! Divider page between the front matter and the laws.

use crate::font::{Font, TextMeasure};
use crate::model::RenderConfig;
use crate::style::{sizes, Color};

use super::{PageKind, PageSet, PAGE_HEIGHT, PAGE_WIDTH};

pub const DEFAULT_TITLE: &str = "LEGISLAÇÃO";
pub const DEFAULT_SUBTITLE: &str = "Compilação de Artigos por Lei";

pub fn layout_transition(pages: &mut PageSet, measure: &dyn TextMeasure, config: &RenderConfig) {
    let title = RenderConfig::field(&config.transition_title).unwrap_or(DEFAULT_TITLE);
    let subtitle = RenderConfig::field(&config.transition_subtitle).unwrap_or(DEFAULT_SUBTITLE);
    let middle = PAGE_HEIGHT / 2.0;

    let index = pages.add_page(PageKind::Transition);
    let page = pages.page_mut(index);
    page.fill_rect(0.0, 0.0, PAGE_WIDTH, PAGE_HEIGHT, Color::LIGHT);
    page.centered_text(measure, middle - 20.0, title, Font::bold(sizes::TITLE), Color::PRIMARY);
    page.centered_text(measure, middle + 10.0, subtitle, Font::regular(sizes::SUBHEADING), Color::MUTED);
    page.fill_rect((PAGE_WIDTH - 80.0) / 2.0, middle + 20.0, 80.0, 1.0, Color::PRIMARY);
}
