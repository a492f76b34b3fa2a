//! Convert a draw instruction stream to the render model

use crate::{Color, GlyphRun, PageRender, Rect, RenderError, RenderItem, RenderModel, Result};
use layout_engine::{DrawInstruction, PageGeometry, Point, TextAlign};
use text_engine::{FontSpec, FontStyle, FontWeight};

/// Configuration for render conversion
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Background color for pages
    pub page_background: Color,
    /// Page outline, if any
    pub page_border: Option<Color>,
    /// Default text color
    pub text_color: Color,
    /// Font family for all runs
    pub font_family: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            page_background: Color::WHITE,
            page_border: Some(Color::rgb(200, 200, 200)),
            text_color: Color::BLACK,
            font_family: "helvetica".to_string(),
        }
    }
}

/// Converts draw instructions into per-page render items
#[derive(Debug, Clone, Default)]
pub struct RenderConverter {
    config: RenderConfig,
}

impl RenderConverter {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Split `instructions` into pages at every page break.
    ///
    /// Multi-column batches are flattened into one run per entry. Any text
    /// positioned off the page makes the stream invalid.
    pub fn convert(
        &self,
        instructions: &[DrawInstruction],
        geometry: &PageGeometry,
    ) -> Result<RenderModel> {
        let mut model = RenderModel::new();
        let mut page = self.blank_page(0, geometry);

        for (index, instruction) in instructions.iter().enumerate() {
            match instruction {
                DrawInstruction::PageBreak => {
                    let next = self.blank_page(page.page_index + 1, geometry);
                    model.add_page(std::mem::replace(&mut page, next));
                }
                DrawInstruction::Text {
                    text,
                    position,
                    font,
                    align,
                } => {
                    check_position(index, position, geometry)?;
                    let run = self.glyph_run(text, position, font, *align);
                    page.items.push(RenderItem::GlyphRun(run));
                }
                DrawInstruction::MultiColumnText { entries, font } => {
                    for entry in entries {
                        check_position(index, &entry.position, geometry)?;
                        page.items.push(RenderItem::GlyphRun(self.glyph_run(
                            &entry.text,
                            &entry.position,
                            font,
                            TextAlign::Left,
                        )));
                    }
                }
            }
        }
        model.add_page(page);

        tracing::debug!(pages = model.page_count(), "render model built");
        Ok(model)
    }

    fn blank_page(&self, page_index: u32, geometry: &PageGeometry) -> PageRender {
        let mut page = PageRender::new(page_index, geometry.width as f64, geometry.height as f64);
        page.items.push(RenderItem::Rectangle {
            bounds: Rect::new(0.0, 0.0, page.width, page.height),
            fill: Some(self.config.page_background),
            stroke: self.config.page_border,
            stroke_width: 1.0,
        });
        page
    }

    fn glyph_run(&self, text: &str, position: &Point, font: &FontSpec, align: TextAlign) -> GlyphRun {
        GlyphRun {
            text: text.to_string(),
            font_family: self.config.font_family.clone(),
            font_size: font.size as f64,
            bold: font.weight == FontWeight::Bold,
            italic: font.style == FontStyle::Italic,
            color: self.config.text_color,
            x: position.x as f64,
            y: position.y as f64,
            align,
        }
    }
}

fn check_position(index: usize, position: &Point, geometry: &PageGeometry) -> Result<()> {
    let inside = position.x.is_finite()
        && position.y.is_finite()
        && (0.0..=geometry.width).contains(&position.x)
        && (0.0..=geometry.height).contains(&position.y);
    if inside {
        return Ok(());
    }
    Err(RenderError::InvalidInstructionStream(format!(
        "instruction {index} is positioned at ({}, {}), outside the {}x{} page",
        position.x, position.y, geometry.width, geometry.height
    )))
}

impl RenderModel {
    /// Build a render model with the default render configuration
    pub fn from_instructions(
        instructions: &[DrawInstruction],
        geometry: &PageGeometry,
    ) -> Result<Self> {
        RenderConverter::default().convert(instructions, geometry)
    }
}
