//! Draw instructions: the output of a document build

use serde::{Deserialize, Serialize};
use text_engine::FontSpec;

/// A position on the page. `y` grows downwards from the top edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Horizontal anchor of a text fragment's position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
}

/// One cell of a multi-column batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnEntry {
    /// Index of the item within the batch
    pub index: usize,
    pub column: usize,
    pub row: usize,
    pub text: String,
    pub position: Point,
}

/// A renderer-agnostic unit of output.
///
/// The ordered instruction sequence of one build fully determines the
/// rendered pages: text belongs to the page opened by the most recent
/// `PageBreak` (or the first page).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrawInstruction {
    /// Positioned text fragment
    Text {
        text: String,
        position: Point,
        font: FontSpec,
        #[serde(default)]
        align: TextAlign,
    },
    /// Start a new page
    PageBreak,
    /// A batch of fragments laid out in a column grid
    MultiColumnText {
        entries: Vec<ColumnEntry>,
        font: FontSpec,
    },
}

impl DrawInstruction {
    /// Left-aligned text
    pub fn text(text: impl Into<String>, position: Point, font: FontSpec) -> Self {
        DrawInstruction::Text {
            text: text.into(),
            position,
            font,
            align: TextAlign::Left,
        }
    }

    /// Text centred on `position.x`
    pub fn centered(text: impl Into<String>, position: Point, font: FontSpec) -> Self {
        DrawInstruction::Text {
            text: text.into(),
            position,
            font,
            align: TextAlign::Center,
        }
    }

    pub fn is_page_break(&self) -> bool {
        matches!(self, DrawInstruction::PageBreak)
    }

    /// The text of a `Text` instruction
    pub fn as_text(&self) -> Option<&str> {
        match self {
            DrawInstruction::Text { text, .. } => Some(text),
            _ => None,
        }
    }
}
