//! # Font Management
//!
//! The document uses three of the 14 standard PDF fonts (Helvetica in
//! regular, bold and oblique), which need no embedding. This module maps
//! the faces the layout asks for to those fonts and measures text with
//! their AFM metrics.
//!
//! Layout code never talks to metrics directly. It goes through the
//! [`TextMeasure`] trait, so tests can swap in [`FixedAdvance`] and get line
//! counts they can compute by hand.

pub mod metrics;

pub use metrics::StandardFontMetrics;

/// Millimetres per PDF point.
pub const PT_TO_MM: f64 = 25.4 / 72.0;

/// The weight/style variants the layout uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FontFace {
    Regular,
    Bold,
    Italic,
}

/// A face at a size in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Font {
    pub face: FontFace,
    pub size: f64,
}

impl Font {
    pub const fn regular(size: f64) -> Self {
        Self { face: FontFace::Regular, size }
    }

    pub const fn bold(size: f64) -> Self {
        Self { face: FontFace::Bold, size }
    }

    pub const fn italic(size: f64) -> Self {
        Self { face: FontFace::Italic, size }
    }
}

/// The standard PDF fonts backing each face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StandardFont {
    Helvetica,
    HelveticaBold,
    HelveticaOblique,
}

impl StandardFont {
    /// The PDF name for this font.
    pub fn pdf_name(&self) -> &'static str {
        match self {
            Self::Helvetica => "Helvetica",
            Self::HelveticaBold => "Helvetica-Bold",
            Self::HelveticaOblique => "Helvetica-Oblique",
        }
    }

    pub fn metrics(&self) -> StandardFontMetrics {
        match self {
            Self::HelveticaBold => StandardFontMetrics::HELVETICA_BOLD,
            // Oblique shares the upright advance widths.
            Self::Helvetica | Self::HelveticaOblique => StandardFontMetrics::HELVETICA,
        }
    }
}

impl From<FontFace> for StandardFont {
    fn from(face: FontFace) -> Self {
        match face {
            FontFace::Regular => StandardFont::Helvetica,
            FontFace::Bold => StandardFont::HelveticaBold,
            FontFace::Italic => StandardFont::HelveticaOblique,
        }
    }
}

/// Text measurement in page units (millimetres).
pub trait TextMeasure {
    /// Advance width of one character.
    fn char_width(&self, ch: char, font: Font) -> f64;

    /// Width of a run of text on a single line.
    fn text_width(&self, text: &str, font: Font) -> f64 {
        text.chars().map(|ch| self.char_width(ch, font)).sum()
    }
}

/// Measurement with the real Helvetica metrics.
#[derive(Debug, Clone, Copy, Default)]
pub struct FontContext;

impl FontContext {
    pub fn new() -> Self {
        Self
    }
}

impl TextMeasure for FontContext {
    fn char_width(&self, ch: char, font: Font) -> f64 {
        StandardFont::from(font.face)
            .metrics()
            .char_width(ch, font.size)
            * PT_TO_MM
    }

    fn text_width(&self, text: &str, font: Font) -> f64 {
        StandardFont::from(font.face)
            .metrics()
            .measure_string(text, font.size)
            * PT_TO_MM
    }
}

/// Every character advances by the same width regardless of face or size.
///
/// Makes wrapping predictable: a line holds `floor(width / advance)`
/// characters.
#[derive(Debug, Clone, Copy)]
pub struct FixedAdvance(pub f64);

impl TextMeasure for FixedAdvance {
    fn char_width(&self, ch: char, _font: Font) -> f64 {
        if ch == '\u{00AD}' {
            0.0
        } else {
            self.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_context_measures_in_millimetres() {
        let ctx = FontContext::new();
        // 'M' is 833/1000 em; at 10pt that is 8.33pt.
        let w = ctx.char_width('M', Font::regular(10.0));
        assert!((w - 8.33 * PT_TO_MM).abs() < 1e-9);
    }

    #[test]
    fn test_bold_wider_than_regular() {
        let ctx = FontContext::new();
        let regular = ctx.text_width("Art. 12", Font::regular(10.0));
        let bold = ctx.text_width("Art. 12", Font::bold(10.0));
        assert!(bold > regular);
    }

    #[test]
    fn test_oblique_uses_regular_widths() {
        let ctx = FontContext::new();
        let regular = ctx.text_width("continuação", Font::regular(6.0));
        let italic = ctx.text_width("continuação", Font::italic(6.0));
        assert!((regular - italic).abs() < 1e-9);
    }

    #[test]
    fn test_text_width_matches_char_sum() {
        let ctx = FontContext::new();
        let font = Font::bold(8.0);
        let text = "Parágrafo único";
        let summed: f64 = text.chars().map(|ch| ctx.char_width(ch, font)).sum();
        assert!((ctx.text_width(text, font) - summed).abs() < 1e-9);
    }

    #[test]
    fn test_fixed_advance() {
        let m = FixedAdvance(2.0);
        assert_eq!(m.text_width("abc", Font::bold(20.0)), 6.0);
    }
}
