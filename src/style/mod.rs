//! # Style
//!
//! Colors and type sizes shared by every page generator. All colors are
//! 8-bit RGB; the PDF backend scales them to the 0..1 range on output.

use crate::model::HighlightColor;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    /// Brand blue used for titles, labels and decorative rules.
    pub const PRIMARY: Color = Color::rgb(41, 98, 255);
    pub const SECONDARY: Color = Color::rgb(99, 102, 241);
    /// Body text.
    pub const TEXT: Color = Color::rgb(30, 30, 30);
    pub const MUTED: Color = Color::rgb(100, 116, 139);
    /// Card and band backgrounds.
    pub const LIGHT: Color = Color::rgb(248, 250, 252);
    pub const BORDER: Color = Color::rgb(226, 232, 240);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Components scaled to `0.0..=1.0`.
    pub fn unit(self) -> (f64, f64, f64) {
        (
            self.r as f64 / 255.0,
            self.g as f64 / 255.0,
            self.b as f64 / 255.0,
        )
    }
}

/// Accent and pastel pair used to paint a highlighted clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorStyle {
    /// Strong color: side bar, indicator circle, label.
    pub accent: Color,
    /// Light tint behind the clause.
    pub pastel: Color,
}

/// Palette key to accent/pastel pair.
pub const PALETTE: [(HighlightColor, ColorStyle); 6] = [
    (
        HighlightColor::Green,
        ColorStyle { accent: Color::rgb(34, 197, 94), pastel: Color::rgb(200, 255, 210) },
    ),
    (
        HighlightColor::Blue,
        ColorStyle { accent: Color::rgb(59, 130, 246), pastel: Color::rgb(200, 230, 255) },
    ),
    (
        HighlightColor::Yellow,
        ColorStyle { accent: Color::rgb(255, 193, 7), pastel: Color::rgb(255, 248, 180) },
    ),
    (
        HighlightColor::Orange,
        ColorStyle { accent: Color::rgb(255, 87, 34), pastel: Color::rgb(255, 220, 180) },
    ),
    (
        HighlightColor::Purple,
        ColorStyle { accent: Color::rgb(156, 39, 176), pastel: Color::rgb(230, 200, 255) },
    ),
    (
        HighlightColor::Gray,
        ColorStyle { accent: Color::rgb(96, 125, 139), pastel: Color::rgb(220, 220, 225) },
    ),
];

impl HighlightColor {
    pub fn style(self) -> ColorStyle {
        PALETTE
            .iter()
            .find(|(key, _)| *key == self)
            .map(|(_, style)| *style)
            .unwrap_or(ColorStyle { accent: Color::MUTED, pastel: Color::rgb(240, 240, 240) })
    }
}

/// Font sizes in points.
pub mod sizes {
    pub const TITLE: f64 = 16.0;
    pub const SUBTITLE: f64 = 14.0;
    pub const HEADING: f64 = 11.0;
    pub const SUBHEADING: f64 = 10.0;
    pub const BODY: f64 = 8.0;
    pub const SMALL: f64 = 7.0;
    pub const TINY: f64 = 6.0;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_covers_every_key() {
        for color in HighlightColor::ALL {
            assert!(PALETTE.iter().any(|(key, _)| *key == color), "{:?} missing", color);
        }
    }

    #[test]
    fn test_palette_lookup() {
        let style = HighlightColor::Yellow.style();
        assert_eq!(style.accent, Color::rgb(255, 193, 7));
        assert_eq!(style.pastel, Color::rgb(255, 248, 180));
    }

    #[test]
    fn test_unit_scaling() {
        let (r, g, b) = Color::WHITE.unit();
        assert_eq!((r, g, b), (1.0, 1.0, 1.0));
        let (r, _, _) = Color::BLACK.unit();
        assert_eq!(r, 0.0);
    }
}
