//! Render item types

use layout_engine::TextAlign;
use serde::{Deserialize, Serialize};

/// A rectangle in render coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }
}

/// Color representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

/// A run of text at a fixed position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlyphRun {
    /// The text to render
    pub text: String,
    /// Font family
    pub font_family: String,
    /// Font size in points
    pub font_size: f64,
    pub bold: bool,
    pub italic: bool,
    /// Text color
    pub color: Color,
    /// Anchor position; `y` is the baseline
    pub x: f64,
    pub y: f64,
    /// Whether `x` is the left edge or the centre of the run
    pub align: TextAlign,
}

/// A renderable item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RenderItem {
    /// A glyph run (text)
    GlyphRun(GlyphRun),
    /// A filled rectangle
    Rectangle {
        bounds: Rect,
        fill: Option<Color>,
        stroke: Option<Color>,
        stroke_width: f64,
    },
}

/// A single page's render data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageRender {
    pub page_index: u32,
    pub width: f64,
    pub height: f64,
    pub items: Vec<RenderItem>,
}

impl PageRender {
    pub fn new(page_index: u32, width: f64, height: f64) -> Self {
        Self {
            page_index,
            width,
            height,
            items: Vec::new(),
        }
    }

    /// Text runs on this page in drawing order
    pub fn glyph_runs(&self) -> impl Iterator<Item = &GlyphRun> {
        self.items.iter().filter_map(|item| match item {
            RenderItem::GlyphRun(run) => Some(run),
            _ => None,
        })
    }
}

/// The complete render model
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RenderModel {
    pub pages: Vec<PageRender>,
}

impl RenderModel {
    pub fn new() -> Self {
        Self { pages: Vec::new() }
    }

    pub fn add_page(&mut self, page: PageRender) {
        self.pages.push(page);
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}
