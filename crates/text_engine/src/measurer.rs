//! Font specifications and the measurement interface

use crate::Result;
use serde::{Deserialize, Serialize};

/// Font style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
}

/// Font weight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

/// Face and size a piece of text is drawn with
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FontSpec {
    pub weight: FontWeight,
    pub style: FontStyle,
    /// Font size in points
    pub size: f32,
}

impl FontSpec {
    /// Regular upright text at the given size
    pub fn regular(size: f32) -> Self {
        Self {
            weight: FontWeight::Normal,
            style: FontStyle::Normal,
            size,
        }
    }

    pub fn bold(size: f32) -> Self {
        Self::regular(size).with_weight(FontWeight::Bold)
    }

    pub fn italic(size: f32) -> Self {
        Self::regular(size).with_style(FontStyle::Italic)
    }

    pub fn with_style(mut self, style: FontStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_weight(mut self, weight: FontWeight) -> Self {
        self.weight = weight;
        self
    }
}

/// Font metrics in font units
#[derive(Debug, Clone)]
pub struct FontMetrics {
    /// Units per em
    pub units_per_em: u16,
    /// Ascender (positive)
    pub ascender: i16,
    /// Descender (negative)
    pub descender: i16,
    /// Line gap
    pub line_gap: i16,
}

impl Default for FontMetrics {
    fn default() -> Self {
        Self {
            units_per_em: 1000,
            ascender: 800,
            descender: -200,
            line_gap: 0,
        }
    }
}

/// Width measurement supplied by the rendering backend.
///
/// Widths are returned in the same unit as the page geometry the layout
/// engine works in. Implementations must be pure: the same text and font
/// always measure the same, and measuring never mutates shared state.
pub trait TextMeasurer {
    /// Rendered width of `text` drawn with `font`
    fn measure(&self, text: &str, font: &FontSpec) -> Result<f32>;
}

impl<T: TextMeasurer + ?Sized> TextMeasurer for &T {
    fn measure(&self, text: &str, font: &FontSpec) -> Result<f32> {
        (**self).measure(text, font)
    }
}

impl<T: TextMeasurer + ?Sized> TextMeasurer for Box<T> {
    fn measure(&self, text: &str, font: &FontSpec) -> Result<f32> {
        (**self).measure(text, font)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_spec_builders() {
        let spec = FontSpec::bold(12.0);
        assert_eq!(spec.weight, FontWeight::Bold);
        assert_eq!(spec.style, FontStyle::Normal);

        let spec = FontSpec::italic(9.0).with_weight(FontWeight::Bold);
        assert_eq!(spec.style, FontStyle::Italic);
        assert_eq!(spec.weight, FontWeight::Bold);
        assert_eq!(spec.size, 9.0);
    }
}
