//! # Front Matter
//!
//! Cover, marking statistics, the optional notices page and the color
//! legend. These pages have fixed designs; only the notices page can grow
//! past one page.

use chrono::{Datelike, Local, NaiveDate};

use crate::font::{Font, TextMeasure};
use crate::model::{HighlightColor, Law, RenderConfig};
use crate::style::{sizes, Color};
use crate::text::TextLayout;

use super::{title_band, PageKind, PageSet, CONTENT_BOTTOM, PAGE_HEIGHT, PAGE_WIDTH};

const COVER_SUBTITLE: &str = "Compilação Jurídica com Marcação Inteligente";
const NOTICE_BANNER_FILL: Color = Color::rgb(255, 248, 220);
const NOTICE_BANNER_TEXT: Color = Color::rgb(180, 83, 9);
const BAR_TRACK: Color = Color::rgb(240, 240, 240);
const BAR_OUTLINE: Color = Color::rgb(200, 200, 200);
const BAR_MAX_WIDTH: f64 = 100.0;

/// Notices-page text wraps to this width and flows onto a new page past
/// `SECTION_LIMIT_Y`.
const SECTION_TEXT_WIDTH: f64 = 180.0;
const SECTION_LIMIT_Y: f64 = PAGE_HEIGHT - 40.0;
const CONTINUED_SECTION_Y: f64 = 40.0;

const MONTHS: [&str; 12] = [
    "janeiro",
    "fevereiro",
    "março",
    "abril",
    "maio",
    "junho",
    "julho",
    "agosto",
    "setembro",
    "outubro",
    "novembro",
    "dezembro",
];

/// "05 de março de 2026".
pub fn long_date_pt_br(date: NaiveDate) -> String {
    format!("{:02} de {} de {}", date.day(), MONTHS[date.month0() as usize], date.year())
}

/// Marking counts across every law.
#[derive(Debug, Clone, PartialEq)]
pub struct Statistics {
    pub total_clauses: usize,
    /// Clauses flagged as highlighted, whatever their color key.
    pub highlighted: usize,
    /// Count per palette color, in palette order.
    pub per_color: Vec<(HighlightColor, usize)>,
}

impl Statistics {
    pub fn collect(laws: &[Law]) -> Self {
        let clauses = || laws.iter().flat_map(|law| law.clauses.iter());
        let per_color = HighlightColor::ALL
            .iter()
            .map(|&color| {
                let count = clauses()
                    .filter(|c| c.highlighted)
                    .filter(|c| c.color.as_deref().and_then(HighlightColor::from_key) == Some(color))
                    .count();
                (color, count)
            })
            .collect();

        Self {
            total_clauses: clauses().count(),
            highlighted: clauses().filter(|c| c.highlighted).count(),
            per_color,
        }
    }

    /// Percentage of highlighted clauses painted with `count`.
    pub fn share(&self, count: usize) -> f64 {
        if self.highlighted == 0 {
            0.0
        } else {
            count as f64 / self.highlighted as f64 * 100.0
        }
    }
}

pub struct FrontMatter<'a> {
    measure: &'a dyn TextMeasure,
    config: &'a RenderConfig,
    date: NaiveDate,
}

impl<'a> FrontMatter<'a> {
    pub fn new(measure: &'a dyn TextMeasure, config: &'a RenderConfig) -> Self {
        Self {
            measure,
            config,
            date: config.generated_on.unwrap_or_else(|| Local::now().date_naive()),
        }
    }

    fn wrap(&self, text: &str, width: f64, font: Font) -> Vec<String> {
        TextLayout::new(self.measure).wrap(text, width, font)
    }

    pub fn cover(&self, pages: &mut PageSet) {
        let config = self.config;
        let m = self.measure;
        let index = pages.add_page(PageKind::Cover);
        let page = pages.page_mut(index);

        page.fill_rect(0.0, 0.0, PAGE_WIDTH, 3.0, Color::PRIMARY);
        page.centered_text(m, 70.0, config.title.to_uppercase(), Font::bold(22.0), Color::TEXT);
        page.fill_rect(PAGE_WIDTH / 2.0 - 40.0, 80.0, 80.0, 1.0, Color::PRIMARY);

        if let Some(contest) = config.contest() {
            page.centered_text(m, 100.0, contest, Font::regular(16.0), Color::PRIMARY);
        }
        page.centered_text(m, 120.0, COVER_SUBTITLE, Font::regular(12.0), Color::MUTED);

        let mut y = 140.0;
        if let Some(author) = config.author() {
            page.centered_text(m, y, format!("Autor: {}", author), Font::bold(sizes::SUBTITLE), Color::TEXT);
            y += 15.0;
        }
        if let Some(publisher) = RenderConfig::field(&config.publisher) {
            page.centered_text(m, y, publisher, Font::regular(12.0), Color::MUTED);
            y += 15.0;
        }
        let edition = RenderConfig::field(&config.edition);
        let year = RenderConfig::field(&config.year);
        if edition.is_some() || year.is_some() {
            let line = format!("{} {}", edition.unwrap_or(""), year.unwrap_or(""));
            page.centered_text(m, y, line.trim(), Font::regular(sizes::SUBHEADING), Color::MUTED);
            y += 15.0;
        }
        if let Some(code) = RenderConfig::field(&config.code) {
            page.centered_text(m, y, format!("Código: {}", code), Font::regular(9.0), Color::MUTED);
        }

        page.centered_text(
            m,
            PAGE_HEIGHT - 60.0,
            format!("Gerado em {}", long_date_pt_br(self.date)),
            Font::regular(sizes::SUBHEADING),
            Color::MUTED,
        );

        if let Some(notices) = config.notices() {
            let lines = self.wrap(notices, PAGE_WIDTH - 24.0, Font::regular(sizes::BODY));
            let page = pages.page_mut(index);
            page.fill_rect(10.0, PAGE_HEIGHT - 50.0, PAGE_WIDTH - 20.0, 15.0, NOTICE_BANNER_FILL);
            page.text(12.0, PAGE_HEIGHT - 42.0, "AVISO IMPORTANTE:", Font::bold(sizes::BODY), NOTICE_BANNER_TEXT);
            for (i, line) in lines.into_iter().take(2).enumerate() {
                let y = PAGE_HEIGHT - 38.0 + i as f64 * 3.25;
                page.text(12.0, y, line, Font::regular(sizes::BODY), NOTICE_BANNER_TEXT);
            }
        }

        let page = pages.page_mut(index);
        page.fill_rect(0.0, PAGE_HEIGHT - 25.0, PAGE_WIDTH, 25.0, Color::LIGHT);
        page.text(10.0, PAGE_HEIGHT - 10.0, "Vademecum Editor", Font::regular(sizes::BODY), Color::MUTED);
        page.text(
            PAGE_WIDTH - 55.0,
            PAGE_HEIGHT - 10.0,
            "Vade Mecum Estatístico",
            Font::regular(sizes::BODY),
            Color::MUTED,
        );
        page.fill_rect(0.0, PAGE_HEIGHT - 25.0, PAGE_WIDTH, 1.0, Color::PRIMARY);
    }

    pub fn statistics(&self, pages: &mut PageSet, laws: &[Law]) {
        let stats = Statistics::collect(laws);
        let m = self.measure;
        let index = pages.add_page(PageKind::Statistics);
        let page = pages.page_mut(index);

        page.centered_text(m, 40.0, "ESTATÍSTICAS DE MARCAÇÃO", Font::bold(20.0), Color::TEXT);
        page.fill_rect(PAGE_WIDTH / 2.0 - 50.0, 50.0, 100.0, 1.0, Color::PRIMARY);

        let card_y = 70.0;
        page.rounded_rect(30.0, card_y, 70.0, 50.0, 5.0, Color::LIGHT);
        page.text(50.0, card_y + 20.0, stats.total_clauses.to_string(), Font::bold(20.0), Color::TEXT);
        page.text(35.0, card_y + 35.0, "Total de Artigos", Font::regular(sizes::BODY), Color::TEXT);

        page.rounded_rect(125.0, card_y, 70.0, 50.0, 5.0, Color::PRIMARY);
        page.text(145.0, card_y + 20.0, stats.highlighted.to_string(), Font::bold(20.0), Color::WHITE);
        page.text(140.0, card_y + 35.0, "Marcados", Font::regular(sizes::BODY), Color::WHITE);

        page.text(30.0, 140.0, "DISTRIBUIÇÃO POR CATEGORIA", Font::bold(12.0), Color::TEXT);

        let mut y = 160.0;
        for &(color, count) in stats.per_color.iter().filter(|(_, count)| *count > 0) {
            let accent = color.style().accent;
            let share = stats.share(count);
            let width = (share / 100.0 * BAR_MAX_WIDTH).max(8.0);

            page.fill_rect(25.0, y, BAR_MAX_WIDTH, 12.0, BAR_TRACK);
            page.fill_rect(25.0, y, width, 12.0, accent);
            page.stroke_rect(25.0, y, BAR_MAX_WIDTH, 12.0, BAR_OUTLINE, 0.5);
            page.text(
                27.0,
                y + 5.0,
                self.config.color_legend.describe(color),
                Font::bold(sizes::SMALL),
                Color::TEXT,
            );

            let figures = format!("{} ({:.1}%)", count, share);
            if width > 50.0 {
                page.text(27.0, y + 12.0, figures, Font::regular(sizes::TINY), Color::WHITE);
            } else {
                page.text(BAR_MAX_WIDTH + 35.0, y + 10.0, figures, Font::regular(sizes::TINY), Color::TEXT);
            }
            page.circle(20.0, y + 8.0, 3.0, accent);
            y += 16.0;
        }
    }

    /// Notices and comments, then a block of technical details.
    pub fn notices(&self, pages: &mut PageSet) {
        let index = pages.add_page(PageKind::Notices);
        title_band(pages.page_mut(index), self.measure, "INFORMAÇÕES IMPORTANTES");

        let mut y = 60.0;
        if let Some(notices) = self.config.notices() {
            y = self.section(
                pages,
                y,
                "AVISOS IMPORTANTES",
                notices,
                Color::rgb(255, 245, 245),
                Color::rgb(220, 38, 38),
            );
            y += 20.0;
        }
        if let Some(comments) = self.config.comments() {
            y = self.section(
                pages,
                y,
                "COMENTÁRIOS E OBSERVAÇÕES",
                comments,
                Color::rgb(240, 249, 255),
                Color::PRIMARY,
            );
        }

        let mut y = (y + 30.0).max(PAGE_HEIGHT - 80.0);
        if y + 50.0 > CONTENT_BOTTOM {
            pages.add_page(PageKind::Notices);
            y = CONTINUED_SECTION_Y;
        }
        let page = pages.last_mut();
        page.rounded_rect(10.0, y, PAGE_WIDTH - 20.0, 50.0, 5.0, Color::LIGHT);
        page.text(15.0, y + 12.0, "INFORMAÇÕES TÉCNICAS", Font::bold(sizes::SMALL), Color::MUTED);
        for (i, line) in self.technical_details().into_iter().enumerate() {
            page.text(20.0, y + 20.0 + i as f64 * 3.5, line, Font::regular(sizes::TINY), Color::MUTED);
        }
    }

    /// Titled, wrapped section of the notices page. Returns the y below it.
    fn section(
        &self,
        pages: &mut PageSet,
        mut y: f64,
        title: &str,
        body: &str,
        background: Color,
        title_color: Color,
    ) -> f64 {
        let page = pages.last_mut();
        page.rounded_rect(10.0, y - 5.0, PAGE_WIDTH - 20.0, 8.0, 2.0, background);
        page.text(15.0, y + 2.0, title, Font::bold(12.0), title_color);
        y += 15.0;

        for line in self.wrap(body, SECTION_TEXT_WIDTH, Font::regular(9.0)) {
            if y > SECTION_LIMIT_Y {
                pages.add_page(PageKind::Notices);
                y = CONTINUED_SECTION_Y;
            }
            pages.last_mut().text(15.0, y, line, Font::regular(9.0), Color::TEXT);
            y += 4.0;
        }
        y
    }

    fn technical_details(&self) -> Vec<String> {
        let config = self.config;
        let or = |value: &Option<String>, fallback: &str| {
            RenderConfig::field(value).unwrap_or(fallback).to_string()
        };
        vec![
            format!("• Título: {}", config.title),
            format!("• Autor: {}", or(&config.author, "Não especificado")),
            format!("• Empresa/Editora: {}", or(&config.publisher, "Não especificada")),
            format!("• Edição: {}", or(&config.edition, "Não especificada")),
            format!("• Ano: {}", or(&config.year, &self.date.year().to_string())),
            format!("• Código: {}", or(&config.code, "Não especificado")),
            "• Sistema: Vademecum Editor".to_string(),
            format!("• Gerado em: {}", self.date.format("%d/%m/%Y")),
        ]
    }

    /// Color legend and reading instructions, closing the front matter.
    pub fn legend(&self, pages: &mut PageSet) {
        let m = self.measure;
        let index = pages.add_page(PageKind::Legend);
        let page = pages.page_mut(index);
        title_band(page, m, "SISTEMA DE CORES");

        let mut y = 60.0;
        for color in HighlightColor::ALL {
            page.rounded_rect(10.0, y - 8.0, PAGE_WIDTH - 20.0, 20.0, 3.0, Color::LIGHT);
            page.circle(25.0, y, 5.0, color.style().accent);
            page.text(40.0, y - 2.0, color.key().to_uppercase(), Font::bold(9.0), Color::TEXT);
            page.text(
                40.0,
                y + 6.0,
                self.config.color_legend.describe(color),
                Font::regular(sizes::SMALL),
                Color::TEXT,
            );
            y += 20.0;
        }

        y += 15.0;
        page.fill_rect(0.0, y, PAGE_WIDTH, 20.0, Color::SECONDARY);
        page.centered_text(m, y + 13.0, "COMO USAR ESTE VADEMECUM", Font::bold(sizes::SUBHEADING), Color::WHITE);

        y += 30.0;
        for instruction in [
            "Os artigos estão organizados por lei de origem",
            "Cada cor representa um tipo de importância específica",
            "Use o sumário para navegação rápida entre leis",
            "Layout em duas colunas para máximo aproveitamento",
            "Artigos marcados possuem fundo colorido e círculo identificador",
        ] {
            page.text(15.0, y, format!("• {}", instruction), Font::regular(sizes::SMALL), Color::TEXT);
            y += 10.0;
        }

        let footer_y = PAGE_HEIGHT - 40.0;
        page.rounded_rect(10.0, footer_y, PAGE_WIDTH - 20.0, 25.0, 5.0, Color::LIGHT);
        page.centered_text(
            m,
            footer_y + 15.0,
            "Vademecum Editor • Marcação estatística de legislação",
            Font::regular(sizes::TINY),
            Color::MUTED,
        );
    }
}
