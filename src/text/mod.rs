//! # Text Layout
//!
//! Greedy line breaking over UAX#14 break opportunities.
//!
//! The engine only ever needs "which words go on which line" for a fixed
//! width: no justification, no hyphenation. Explicit newlines in clause text
//! are honored as mandatory breaks, and a word wider than the line is split
//! at the character that overflows.

use crate::font::{Font, TextMeasure};
use unicode_linebreak::{linebreaks, BreakOpportunity};

fn is_newline(ch: char) -> bool {
    matches!(ch, '\n' | '\r' | '\u{2028}' | '\u{2029}' | '\u{0085}')
}

pub struct TextLayout<'a> {
    measure: &'a dyn TextMeasure,
}

impl<'a> TextLayout<'a> {
    pub fn new(measure: &'a dyn TextMeasure) -> Self {
        Self { measure }
    }

    /// Break `text` into lines no wider than `max_width`.
    ///
    /// Always returns at least one line; empty input yields a single empty
    /// line. Trailing spaces are trimmed from every line.
    pub fn wrap(&self, text: &str, max_width: f64, font: Font) -> Vec<String> {
        let mut lines: Vec<String> = Vec::new();
        let mut current = String::new();
        let mut current_width = 0.0;
        let mut segment_start = 0;

        // Each segment runs from one break opportunity to the next and
        // carries its trailing whitespace (and newline, for mandatory breaks).
        for (offset, opportunity) in linebreaks(text) {
            let segment = &text[segment_start..offset];
            segment_start = offset;

            let ends_paragraph = opportunity == BreakOpportunity::Mandatory
                && segment.chars().last().is_some_and(is_newline);
            let segment = segment.trim_end_matches(is_newline);
            let word = segment.trim_end();
            let word_width = self.measure.text_width(word, font);

            if !current.is_empty() && current_width + word_width > max_width {
                lines.push(current.trim_end().to_string());
                current.clear();
                current_width = 0.0;
            }

            if current.is_empty() && word_width > max_width {
                // A single word wider than the line: split it by character.
                for ch in segment.chars() {
                    let w = self.measure.char_width(ch, font);
                    if !current.is_empty() && current_width + w > max_width && !ch.is_whitespace() {
                        lines.push(current.trim_end().to_string());
                        current.clear();
                        current_width = 0.0;
                    }
                    current.push(ch);
                    current_width += w;
                }
            } else {
                current.push_str(segment);
                current_width += self.measure.text_width(segment, font);
            }

            if ends_paragraph {
                lines.push(current.trim_end().to_string());
                current.clear();
                current_width = 0.0;
            }
        }

        if !current.is_empty() || lines.is_empty() {
            lines.push(current.trim_end().to_string());
        }

        lines
    }
}

/// Truncate to `max_chars` characters, appending "..." when anything was cut.
pub fn truncate_with_ellipsis(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let head: String = text.chars().take(max_chars).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}
