//! Integration tests for the Vademecum rendering pipeline.
//!
//! These tests exercise the full path from laws to pages to PDF bytes.
//! They verify:
//! - Clauses never run past the column bottom
//! - Oversized clauses open a fresh page and carry continuation markers
//! - The contents pages agree with where the flow actually put each law
//! - Page numbering, file naming and the PDF envelope

use std::collections::BTreeSet;

use vademecum::canvas::{Canvas, RecordingCanvas};
use vademecum::font::FixedAdvance;
use vademecum::layout::article::{required_height, Branch, LONG_BAND_HEIGHT};
use vademecum::layout::{Column, Cursor, DrawCommand, LaidOutDocument, PageKind, CONTENT_BOTTOM};
use vademecum::model::*;
use vademecum::VademecumError;

// ─── Helpers ────────────────────────────────────────────────────

fn make_clause(order: u32, lines: usize) -> Clause {
    let text: Vec<String> = (1..=lines).map(|i| format!("linha {}", i)).collect();
    Clause {
        id: order as u64,
        order,
        label: format!("Art. {}", order),
        text: text.join("\n"),
        highlighted: false,
        color: None,
        annotation: String::new(),
        tags: BTreeSet::new(),
        importance: Importance::default(),
        last_edited: None,
    }
}

fn make_highlighted(order: u32, lines: usize, color: &str) -> Clause {
    Clause {
        highlighted: true,
        color: Some(color.to_string()),
        ..make_clause(order, lines)
    }
}

fn make_law(name: &str, clauses: Vec<Clause>) -> Law {
    Law {
        id: 1,
        name: name.to_string(),
        clauses,
        category: String::new(),
    }
}

fn lay_out(laws: &[Law], config: &RenderConfig) -> LaidOutDocument {
    vademecum::layout(laws, config, &FixedAdvance(1.0))
}

fn config() -> RenderConfig {
    let mut config = RenderConfig::new("Vademecum de Teste");
    config.generated_on = chrono::NaiveDate::from_ymd_opt(2026, 3, 5);
    config
}

// ─── Flow ───────────────────────────────────────────────────────

#[test]
fn test_short_law_fits_one_content_page() {
    let laws = vec![make_law(
        "Lei Curta",
        vec![make_clause(1, 1), make_clause(2, 1), make_clause(3, 1)],
    )];
    let doc = lay_out(&laws, &config());

    // cover, statistics, legend, contents, transition, content
    assert_eq!(doc.pages.len(), 6);
    assert_eq!(doc.first_content_page, Some(5));
    assert_eq!(doc.pages.page(5).kind, PageKind::Content);
    assert!(doc.pages.page(5).running_header);

    assert_eq!(doc.flow.placements.len(), 3);
    for placement in &doc.flow.placements {
        assert_eq!(placement.start.page, 5);
        assert_eq!(placement.start.column, Column::Left);
        assert_eq!(placement.branch, Branch::Normal);
    }

    assert_eq!(doc.toc.len(), 1);
    assert_eq!(doc.toc[0].page, 6);
    assert_eq!(doc.toc[0].counts_line(), "3 artigos • 0 marcados");
}

#[test]
fn test_normal_clauses_stay_inside_the_column() {
    let clauses = (1..=40).map(|i| make_clause(i, (i as usize % 12) + 1)).collect();
    let laws = vec![make_law("Código Extenso", clauses)];
    let doc = lay_out(&laws, &config());

    assert!(doc.flow.placements.iter().any(|p| p.start.column == Column::Right));
    assert!(doc.pages.len() > 6);
    for placement in &doc.flow.placements {
        assert_eq!(placement.branch, Branch::Normal);
        assert_eq!(placement.height, required_height(placement.line_count));
        assert!(
            placement.start.y + placement.height <= CONTENT_BOTTOM,
            "{} ends at {}",
            placement.label,
            placement.start.y + placement.height
        );
    }
}

#[test]
fn test_clauses_follow_order_key() {
    let laws = vec![make_law(
        "Fora de Ordem",
        vec![make_clause(3, 1), make_clause(1, 1), make_clause(2, 1)],
    )];
    let doc = lay_out(&laws, &config());
    let labels: Vec<&str> = doc.flow.placements.iter().map(|p| p.label.as_str()).collect();
    assert_eq!(labels, vec!["Art. 1", "Art. 2", "Art. 3"]);
}

#[test]
fn test_long_clause_opens_a_new_page() {
    let laws = vec![make_law(
        "Constituição",
        vec![make_clause(1, 1), make_highlighted(2, 70, "verde")],
    )];
    let doc = lay_out(&laws, &config());

    let first = &doc.flow.placements[0];
    let long = &doc.flow.placements[1];
    assert_eq!(long.branch, Branch::Long);
    assert_eq!(
        long.start,
        Cursor {
            page: first.start.page + 1,
            column: Column::Left,
            y: 30.0,
        }
    );

    // Only a short band is tinted.
    let pastel = HighlightColor::Green.style().pastel;
    let band = doc.pages.page(long.start.page).commands.iter().find_map(|cmd| match cmd {
        DrawCommand::Rect { rect, fill: Some(fill), .. } if *fill == pastel => Some(*rect),
        _ => None,
    });
    assert_eq!(band.map(|r| r.height), Some(LONG_BAND_HEIGHT));

    // 69 lines fit in the left column; the rest resumes on the right with a marker.
    let page = doc.pages.page(long.start.page);
    assert!(page.contains_text("[...continuação Art. 2]"));
    assert!(page.contains_text("linha 70"));
}

#[test]
fn test_highlight_background_matches_required_height() {
    let laws = vec![make_law(
        "Lei Marcada",
        vec![make_clause(1, 2), make_highlighted(2, 4, "azul")],
    )];
    let doc = lay_out(&laws, &config());
    let placement = &doc.flow.placements[1];
    assert_eq!(placement.highlight, Some(HighlightColor::Blue));

    let pastel = HighlightColor::Blue.style().pastel;
    let background = doc.pages.page(placement.start.page).commands.iter().find_map(|cmd| match cmd {
        DrawCommand::Rect { rect, fill: Some(fill), .. } if *fill == pastel => Some(*rect),
        _ => None,
    });
    let background = background.expect("highlighted clause has a background");
    assert_eq!(background.y, placement.start.y);
    assert_eq!(background.height, required_height(4));
}

#[test]
fn test_right_column_clears_the_heading() {
    let laws = vec![make_law(
        "Código Civil",
        vec![make_clause(1, 20), make_clause(2, 20), make_clause(3, 20)],
    )];
    let doc = lay_out(&laws, &config());
    let third = &doc.flow.placements[2];
    assert_eq!(third.start.column, Column::Right);

    let page = doc.pages.page(third.start.page);
    let rule_y = page.commands.iter().find_map(|cmd| match cmd {
        DrawCommand::Rect { rect, .. } if rect.width == 100.0 && rect.height == 0.5 => Some(rect.y),
        _ => None,
    });
    let rule_y = rule_y.expect("heading rule");
    assert!(third.start.y > rule_y);
    assert_eq!(page.heading_bottom, Some(third.start.y));
}

#[test]
fn test_always_policy_never_splits_normal_clauses() {
    let clauses = (1..=40).map(|i| make_clause(i, (i as usize % 15) + 1)).collect();
    let laws = vec![
        make_law("Vazia", vec![]),
        make_law("Código Extenso", clauses),
        make_law("Lei Final", vec![make_clause(1, 52)]),
    ];
    let mut config = config();
    config.options.continuation_policy = ContinuationPolicy::Always;
    let doc = lay_out(&laws, &config);

    for placement in &doc.flow.placements {
        assert_eq!(placement.branch, Branch::Normal);
        assert!(placement.start.y + placement.height <= CONTENT_BOTTOM);
    }
    assert!(doc.pages.pages().iter().all(|p| !p.contains_text("continuação")));
}

#[test]
fn test_unknown_color_renders_plain() {
    let laws = vec![make_law("Lei", vec![make_highlighted(1, 1, "magenta")])];
    let doc = lay_out(&laws, &config());
    assert_eq!(doc.flow.placements[0].highlight, None);
    // Still counted as marked.
    assert_eq!(doc.toc[0].highlighted_count, 1);
}

#[test]
fn test_no_laws_no_content_pages() {
    let doc = lay_out(&[], &config());
    assert_eq!(doc.pages.len(), 5);
    assert_eq!(doc.first_content_page, None);
    assert!(doc.toc.is_empty());
    assert!(doc.pages.pages().iter().all(|p| p.kind != PageKind::Content));
}

// ─── Contents ───────────────────────────────────────────────────

#[test]
fn test_contents_lists_laws_in_order_with_counts() {
    let mut clauses: Vec<Clause> = (1..=7).map(|i| make_clause(i, 1)).collect();
    clauses.extend((8..=12).map(|i| make_highlighted(i, 1, "amarelo")));
    let laws = vec![
        make_law("Código Civil", clauses),
        make_law("Código Penal", vec![make_clause(1, 1)]),
    ];
    let doc = lay_out(&laws, &config());

    let names: Vec<&str> = doc.toc.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["Código Civil", "Código Penal"]);
    assert_eq!(doc.toc[0].counts_line(), "12 artigos • 5 marcados");

    let contents = doc.pages.page(3);
    assert_eq!(contents.kind, PageKind::Contents);
    assert!(contents.contains_text("SUMÁRIO GERAL"));
    assert!(contents.contains_text("12 artigos • 5 marcados"));
    assert!(contents.contains_text("Total: 2 leis • 13 artigos • 5 marcados"));
}

#[test]
fn test_exact_contents_match_the_flow() {
    let laws: Vec<Law> = (1..=9)
        .map(|n| {
            let clauses = (1..=(n * 4)).map(|i| make_clause(i, 6)).collect();
            make_law(&format!("Lei {}", n), clauses)
        })
        .collect();
    let doc = lay_out(&laws, &config());

    // Nine entries take two contents pages.
    assert_eq!(doc.pages.page(4).kind, PageKind::Contents);
    assert_eq!(doc.pages.page(5).kind, PageKind::Transition);
    assert_eq!(doc.first_content_page, Some(6));

    let pages: Vec<usize> = doc.toc.iter().map(|e| e.page).collect();
    assert_eq!(pages, doc.flow.opening_page_numbers());
    for entry in &doc.toc {
        let heading = entry.name.to_uppercase();
        assert!(doc.pages.page(entry.page - 1).contains_text(&heading));
    }
}

#[test]
fn test_estimated_contents_use_two_pages_per_law() {
    let laws = vec![
        make_law("Lei A", vec![make_clause(1, 1)]),
        make_law("Lei B", vec![make_clause(1, 1)]),
        make_law("Lei C", vec![make_clause(1, 1)]),
    ];
    let mut config = config();
    config.options.toc_strategy = TocStrategy::Estimated;
    let doc = lay_out(&laws, &config);

    let pages: Vec<usize> = doc.toc.iter().map(|e| e.page).collect();
    assert_eq!(pages, vec![5, 7, 9]);
}

// ─── Front matter and decoration ────────────────────────────────

#[test]
fn test_notices_page_shifts_content() {
    let mut config = config();
    config.notices = Some("Atualizado até março.".to_string());
    let laws = vec![make_law("Lei", vec![make_clause(1, 1)])];
    let doc = lay_out(&laws, &config);

    assert_eq!(doc.pages.page(2).kind, PageKind::Notices);
    assert_eq!(doc.first_content_page, Some(6));
    assert_eq!(doc.toc[0].page, 7);
}

#[test]
fn test_page_numbers_skip_the_cover() {
    let clauses = (1..=60).map(|i| make_clause(i, 10)).collect();
    let laws = vec![make_law("Lei Longa", clauses)];
    let doc = lay_out(&laws, &config());
    let total = doc.pages.len();

    assert!(!doc.pages.page(0).contains_text(&format!("1 / {}", total)));
    assert!(doc.pages.page(1).contains_text(&format!("2 / {}", total)));
    assert!(doc.pages.page(total - 1).contains_text(&format!("{} / {}", total, total)));
}

#[test]
fn test_every_content_page_has_running_header() {
    let clauses = (1..=60).map(|i| make_clause(i, 10)).collect();
    let laws = vec![make_law("Lei Longa", clauses)];
    let mut config = config();
    config.options.running_header_text = "CABEÇALHO".to_string();
    let doc = lay_out(&laws, &config);

    for page in doc.pages.pages().iter().filter(|p| p.kind == PageKind::Content) {
        assert!(page.running_header);
        assert!(page.contains_text("CABEÇALHO"));
    }
    assert!(!doc.pages.page(0).running_header);
}

// ─── Canvas and PDF ─────────────────────────────────────────────

#[test]
fn test_replay_reaches_canvas_unchanged() {
    let laws = vec![make_law(
        "Lei",
        vec![make_clause(1, 3), make_highlighted(2, 2, "roxo")],
    )];
    let mut canvas = RecordingCanvas::new();
    let doc = vademecum::render_to_canvas(&laws, &config(), &FixedAdvance(1.0), &mut canvas).unwrap();

    assert_eq!(canvas.page_count(), doc.pages.len());
    for (index, page) in doc.pages.pages().iter().enumerate() {
        assert_eq!(canvas.commands(index), page.commands.as_slice());
    }
}

#[test]
fn test_render_produces_pdf() {
    let laws = vec![make_law(
        "Código de Defesa do Consumidor",
        vec![make_clause(1, 2), make_highlighted(2, 3, "verde")],
    )];
    let document = vademecum::render(&laws, &config()).unwrap();

    assert!(document.bytes.starts_with(b"%PDF"));
    assert!(document.bytes.ends_with(b"%%EOF\n") || document.bytes.ends_with(b"%%EOF"));
    assert_eq!(document.page_count, 6);
    assert_eq!(document.file_name, "Vademecum-de-Teste.pdf");
    assert_eq!(document.toc.len(), 1);
}

#[test]
fn test_render_json() {
    let json = r#"{
        "laws": [{ "name": "CDC", "clauses": [{ "order": 1, "label": "Art. 1", "text": "Texto" }] }],
        "config": { "title": "Vade OAB", "generatedOn": "2026-03-05" }
    }"#;
    let document = vademecum::render_json(json).unwrap();
    assert_eq!(document.file_name, "Vade-OAB.pdf");
    assert!(document.bytes.starts_with(b"%PDF"));
}

#[test]
fn test_render_json_tolerates_unknown_legend_keys() {
    let json = r#"{
        "laws": [],
        "config": {
            "title": "Vade",
            "colorLegend": { "verde": "Mais cobrados", "rosa": "extra", "Grey": "Notas" }
        }
    }"#;
    let compilation: Compilation = serde_json::from_str(json).unwrap();
    let legend = &compilation.config.color_legend;
    assert_eq!(legend.describe(HighlightColor::Green), "Mais cobrados");
    assert_eq!(legend.describe(HighlightColor::Gray), "Notas");
    assert!(vademecum::render_json(json).is_ok());
}

#[test]
fn test_render_json_reports_parse_errors() {
    let err = vademecum::render_json(r#"{ "laws": [], "config": { "title": "x", } }"#).unwrap_err();
    match err {
        VademecumError::ParseError { hint, .. } => assert!(!hint.is_empty()),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_save_to_writes_the_file() {
    let laws = vec![make_law("Lei", vec![make_clause(1, 1)])];
    let document = vademecum::render(&laws, &config()).unwrap();
    let dir = std::env::temp_dir().join(format!("vademecum-test-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();

    let path = document.save_to(&dir).unwrap();
    assert_eq!(path.file_name().unwrap(), "Vademecum-de-Teste.pdf");
    assert_eq!(std::fs::read(&path).unwrap(), document.bytes);
    std::fs::remove_dir_all(&dir).unwrap();
}
