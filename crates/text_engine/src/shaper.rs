//! Text measurement using rustybuzz
//!
//! `ShapingMeasurer` measures text the way a font-embedding renderer will draw
//! it: the string is shaped against the loaded face (kerning and ligatures
//! included) and the glyph advances are summed.

use crate::{FontMetrics, FontSpec, FontStyle, FontWeight, MeasurementError, Result, TextMeasurer};
use std::collections::HashMap;

/// Measurer backed by font data owned by the rendering backend
pub struct ShapingMeasurer<'a> {
    faces: HashMap<(FontWeight, FontStyle), rustybuzz::Face<'a>>,
    unit_per_point: f32,
}

impl<'a> ShapingMeasurer<'a> {
    /// Create a measurer reporting widths in document units
    /// (`unit_per_point` = document units per point)
    pub fn new(unit_per_point: f32) -> Self {
        Self {
            faces: HashMap::new(),
            unit_per_point,
        }
    }

    /// Register a face for a weight/style combination
    pub fn load_font(&mut self, weight: FontWeight, style: FontStyle, data: &'a [u8]) -> Result<()> {
        let face = rustybuzz::Face::from_slice(data, 0)
            .ok_or_else(|| MeasurementError::InvalidFontData("Failed to parse font".into()))?;
        self.faces.insert((weight, style), face);
        Ok(())
    }

    /// Check if a face is registered for the exact weight/style
    pub fn has_font(&self, weight: FontWeight, style: FontStyle) -> bool {
        self.faces.contains_key(&(weight, style))
    }

    /// Metrics of the face used for `font`
    pub fn metrics(&self, font: &FontSpec) -> Result<FontMetrics> {
        let face = self.face_for(font)?;
        Ok(FontMetrics {
            units_per_em: face.units_per_em() as u16,
            ascender: face.ascender(),
            descender: face.descender(),
            line_gap: face.line_gap(),
        })
    }

    /// Exact face, else the regular face of the same weight, else the
    /// regular upright face
    fn face_for(&self, font: &FontSpec) -> Result<&rustybuzz::Face<'a>> {
        self.faces
            .get(&(font.weight, font.style))
            .or_else(|| self.faces.get(&(font.weight, FontStyle::Normal)))
            .or_else(|| self.faces.get(&(FontWeight::Normal, FontStyle::Normal)))
            .ok_or(MeasurementError::FontNotLoaded {
                weight: font.weight,
                style: font.style,
            })
    }
}

impl TextMeasurer for ShapingMeasurer<'_> {
    fn measure(&self, text: &str, font: &FontSpec) -> Result<f32> {
        let face = self.face_for(font)?;
        if text.is_empty() {
            return Ok(0.0);
        }

        let mut buffer = rustybuzz::UnicodeBuffer::new();
        buffer.push_str(text);
        let output = rustybuzz::shape(face, &[], buffer);

        let advance: i64 = output
            .glyph_positions()
            .iter()
            .map(|pos| pos.x_advance as i64)
            .sum();
        let scale = font.size / face.units_per_em() as f32;
        Ok(advance as f32 * scale * self.unit_per_point)
    }
}
