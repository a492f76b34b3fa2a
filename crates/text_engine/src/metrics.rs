//! Text metric calculations

use crate::{FontMetrics, FontSpec, FontWeight, Result, TextMeasurer};

/// Points per inch
pub const POINTS_PER_INCH: f32 = 72.0;
/// Millimetres per inch
pub const MM_PER_INCH: f32 = 25.4;

/// Estimate a character's advance width in font units
pub fn estimate_char_width(ch: char, units_per_em: u16) -> u32 {
    let em = units_per_em as u32;

    match ch {
        // Narrow characters
        ' ' | 'i' | 'l' | 'j' | 't' | 'f' | 'r' | '!' | '|' | '\'' | '`' | '.' | ',' | ':' | ';' => {
            em * 30 / 100
        }
        // Very narrow
        'I' | '1' => em * 35 / 100,
        // Wide characters
        'm' | 'w' | 'M' | 'W' | '@' | '%' => em * 90 / 100,
        // Uppercase typically wider
        'A'..='Z' => em * 70 / 100,
        // Lowercase average
        'a'..='z' => em * 55 / 100,
        // Digits are typically monospaced
        '0'..='9' => em * 60 / 100,
        // Zero-width characters
        '\u{200B}' | '\u{200C}' | '\u{200D}' | '\u{FEFF}' | '\u{00AD}' => 0,
        // No-break space same as regular space
        '\u{00A0}' => em * 30 / 100,
        _ => em * 60 / 100,
    }
}

/// Deterministic measurer that sums per-character width estimates.
///
/// Needs no font data, so layouts built with it are reproducible on any
/// machine. Widths are reported in document units: `unit_per_point` converts
/// from points (1.0 for point-based pages, `25.4 / 72` for millimetres).
#[derive(Debug, Clone)]
pub struct CharWidthMeasurer {
    metrics: FontMetrics,
    unit_per_point: f32,
    /// Extra width for bold faces, in percent of the regular width
    bold_extra_percent: u32,
}

impl CharWidthMeasurer {
    pub fn new(unit_per_point: f32) -> Self {
        Self {
            metrics: FontMetrics::default(),
            unit_per_point,
            bold_extra_percent: 5,
        }
    }

    /// Widths in points
    pub fn points() -> Self {
        Self::new(1.0)
    }

    /// Widths in millimetres
    pub fn millimetres() -> Self {
        Self::new(MM_PER_INCH / POINTS_PER_INCH)
    }

    /// Width of `text` in font units
    pub fn text_units(&self, text: &str, weight: FontWeight) -> u32 {
        let units: u32 = text
            .chars()
            .map(|ch| estimate_char_width(ch, self.metrics.units_per_em))
            .sum();
        match weight {
            FontWeight::Normal => units,
            FontWeight::Bold => units * (100 + self.bold_extra_percent) / 100,
        }
    }
}

impl Default for CharWidthMeasurer {
    fn default() -> Self {
        Self::millimetres()
    }
}

impl TextMeasurer for CharWidthMeasurer {
    fn measure(&self, text: &str, font: &FontSpec) -> Result<f32> {
        let units = self.text_units(text, font.weight) as f32;
        Ok(units / self.metrics.units_per_em as f32 * font.size * self.unit_per_point)
    }
}
