//! Layout configuration
//!
//! Every size, gap and threshold the assembler uses lives here, in one value
//! shared by all document variants. Units are whatever the page geometry is
//! expressed in (millimetres for the defaults); font sizes are in points.

use crate::{LayoutError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Page size and margin. Immutable for the lifetime of one document build.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageGeometry {
    /// Page width
    pub width: f32,
    /// Page height
    pub height: f32,
    /// Margin applied on all four sides
    pub margin: f32,
}

impl PageGeometry {
    pub fn new(width: f32, height: f32, margin: f32) -> Self {
        Self {
            width,
            height,
            margin,
        }
    }

    /// A4 portrait in millimetres with a 20mm margin
    pub fn a4() -> Self {
        Self::new(210.0, 297.0, 20.0)
    }

    /// US Letter portrait in millimetres with a 20mm margin
    pub fn letter() -> Self {
        Self::new(215.9, 279.4, 20.0)
    }

    /// Width between the left and right margins
    pub fn usable_width(&self) -> f32 {
        self.width - 2.0 * self.margin
    }

    /// Height between the top and bottom margins
    pub fn usable_height(&self) -> f32 {
        self.height - 2.0 * self.margin
    }

    /// First writable offset on a page
    pub fn top(&self) -> f32 {
        self.margin
    }

    /// Last writable offset on a page
    pub fn bottom(&self) -> f32 {
        self.height - self.margin
    }

    /// Left edge of the content area
    pub fn left(&self) -> f32 {
        self.margin
    }

    /// Horizontal page centre, used for centred titles
    pub fn center_x(&self) -> f32 {
        self.width / 2.0
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::a4()
    }
}

/// Font sizes in points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontSizes {
    pub title: f32,
    pub metadata: f32,
    pub question_number: f32,
    pub topic_label: f32,
    pub body: f32,
    pub answer_key_title: f32,
    pub answer_entry: f32,
}

impl Default for FontSizes {
    fn default() -> Self {
        Self {
            title: 18.0,
            metadata: 10.0,
            question_number: 12.0,
            topic_label: 9.0,
            body: 10.0,
            answer_key_title: 16.0,
            answer_entry: 10.0,
        }
    }
}

/// Vertical advances, gaps, indents and overflow thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Spacing {
    /// Space taken by the document title
    pub title_advance: f32,
    /// Height of one metadata line
    pub metadata_line: f32,
    /// Gap between the metadata lines and the topic distribution
    pub header_section_gap: f32,
    /// Height of one topic distribution entry
    pub distribution_line: f32,
    /// Gap between the header block and the first question
    pub header_block_gap: f32,
    /// Height of the "question number (topic)" line
    pub question_header: f32,
    /// Height of one wrapped body line
    pub text_line: f32,
    /// Gap between the question text and its options
    pub question_text_gap: f32,
    /// Horizontal offset of the topic label from the question number
    pub topic_label_indent: f32,
    /// How much narrower the option wrap width is than the question text's
    pub option_indent: f32,
    /// Horizontal offset of option lines from the left margin
    pub option_x_offset: f32,
    /// Trailing gap after each question block
    pub question_gap: f32,
    /// Room that must remain below the cursor before a question starts
    pub question_block_reserve: f32,
    /// Room that must remain below the cursor before an option starts
    pub option_line_reserve: f32,
    /// Space taken by the answer key title
    pub answer_title_advance: f32,
    /// Row height of the answer grid
    pub answer_row_height: f32,
    /// Distance from the page's bottom edge below which grid rows are clipped
    pub answer_grid_bottom_inset: f32,
    /// Gap between the answer grid and the topic breakdown
    pub answer_key_gap: f32,
    /// The breakdown is skipped when the grid ends within this distance of
    /// the page's bottom edge
    pub breakdown_cutoff: f32,
    /// Space taken by the breakdown heading
    pub breakdown_heading: f32,
    /// Gap after each breakdown entry
    pub breakdown_line_gap: f32,
}

impl Default for Spacing {
    fn default() -> Self {
        Self {
            title_advance: 15.0,
            metadata_line: 7.0,
            header_section_gap: 3.0,
            distribution_line: 6.0,
            header_block_gap: 10.0,
            question_header: 8.0,
            text_line: 6.0,
            question_text_gap: 5.0,
            topic_label_indent: 20.0,
            option_indent: 5.0,
            option_x_offset: 3.0,
            question_gap: 10.0,
            question_block_reserve: 40.0,
            option_line_reserve: 6.0,
            answer_title_advance: 15.0,
            answer_row_height: 7.0,
            answer_grid_bottom_inset: 30.0,
            answer_key_gap: 15.0,
            breakdown_cutoff: 40.0,
            breakdown_heading: 10.0,
            breakdown_line_gap: 3.0,
        }
    }
}

/// Fixed strings printed by the assembler
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentLabels {
    pub question_count: String,
    pub difficulty: String,
    pub estimated_time: String,
    pub topic_distribution: String,
    pub question_prefix: String,
    /// Unit noun used after counts, e.g. "3 soru"
    pub question_unit: String,
    pub answer_key_title: String,
    pub topic_breakdown: String,
}

impl Default for DocumentLabels {
    fn default() -> Self {
        Self {
            question_count: "Toplam Soru".into(),
            difficulty: "Zorluk".into(),
            estimated_time: "Tahmini Sure".into(),
            topic_distribution: "Konu Dagilimi:".into(),
            question_prefix: "Soru".into(),
            question_unit: "soru".into(),
            answer_key_title: "CEVAP ANAHTARI".into(),
            topic_breakdown: "Konu Bazinda Cevap Dagilimi:".into(),
        }
    }
}

/// The single configuration surface of the layout engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub geometry: PageGeometry,
    pub fonts: FontSizes,
    pub spacing: Spacing,
    pub labels: DocumentLabels,
    /// Number of columns in the answer grid
    pub answer_columns: usize,
    /// Upper bound on the number of questions a single build accepts
    pub max_questions: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            geometry: PageGeometry::default(),
            fonts: FontSizes::default(),
            spacing: Spacing::default(),
            labels: DocumentLabels::default(),
            answer_columns: 4,
            max_questions: 500,
        }
    }
}

impl LayoutConfig {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: LayoutConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    /// Serialize to pretty JSON
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Width of one answer grid column
    pub fn answer_column_width(&self) -> f32 {
        self.geometry.usable_width() / self.answer_columns.max(1) as f32
    }

    /// Offset below which answer grid rows are clipped
    pub fn answer_grid_bottom(&self) -> f32 {
        self.geometry.height - self.spacing.answer_grid_bottom_inset
    }

    /// Check that the configuration describes a layout that can be built
    pub fn validate(&self) -> Result<()> {
        let g = &self.geometry;
        if !(g.width > 0.0 && g.height > 0.0) {
            return Err(invalid(format!(
                "page size must be positive, got {}x{}",
                g.width, g.height
            )));
        }
        if !(g.margin >= 0.0) {
            return Err(invalid(format!("margin must not be negative, got {}", g.margin)));
        }
        if !(g.usable_width() > 0.0 && g.usable_height() > 0.0) {
            return Err(invalid(format!(
                "margin {} leaves no usable area on a {}x{} page",
                g.margin, g.width, g.height
            )));
        }
        if self.answer_columns == 0 {
            return Err(invalid("answer grid needs at least one column".into()));
        }

        let f = &self.fonts;
        for (name, size) in [
            ("title", f.title),
            ("metadata", f.metadata),
            ("question_number", f.question_number),
            ("topic_label", f.topic_label),
            ("body", f.body),
            ("answer_key_title", f.answer_key_title),
            ("answer_entry", f.answer_entry),
        ] {
            if !(size > 0.0) {
                return Err(invalid(format!("font size {name} must be positive, got {size}")));
            }
        }

        let s = &self.spacing;
        let available = g.usable_height();
        for (name, value) in [
            ("title_advance", s.title_advance),
            ("metadata_line", s.metadata_line),
            ("header_section_gap", s.header_section_gap),
            ("distribution_line", s.distribution_line),
            ("header_block_gap", s.header_block_gap),
            ("question_header", s.question_header),
            ("text_line", s.text_line),
            ("question_text_gap", s.question_text_gap),
            ("question_gap", s.question_gap),
            ("question_block_reserve", s.question_block_reserve),
            ("option_line_reserve", s.option_line_reserve),
            ("answer_title_advance", s.answer_title_advance),
            ("answer_row_height", s.answer_row_height),
            ("answer_key_gap", s.answer_key_gap),
            ("breakdown_heading", s.breakdown_heading),
            ("breakdown_line_gap", s.breakdown_line_gap),
        ] {
            if !(value >= 0.0 && value <= available) {
                return Err(invalid(format!(
                    "{name} must be between 0 and the usable page height {available}, got {value}"
                )));
            }
        }

        if !(s.option_indent >= 0.0 && s.option_indent < g.usable_width()) {
            return Err(invalid(format!(
                "option_indent must be smaller than the usable width {}, got {}",
                g.usable_width(),
                s.option_indent
            )));
        }

        if !(s.answer_grid_bottom_inset >= 0.0 && s.answer_grid_bottom_inset <= g.height - g.top()) {
            return Err(invalid(format!(
                "answer_grid_bottom_inset must be between 0 and {}, got {}",
                g.height - g.top(),
                s.answer_grid_bottom_inset
            )));
        }

        // a grid that clears the cutoff must also clear the bottom margin
        if !(s.breakdown_cutoff >= g.margin && s.breakdown_cutoff <= g.height - g.top()) {
            return Err(invalid(format!(
                "breakdown_cutoff must be between the margin {} and {}, got {}",
                g.margin,
                g.height - g.top(),
                s.breakdown_cutoff
            )));
        }

        // grid rows must stay above the bottom margin
        if self.answer_grid_bottom() + s.answer_row_height > g.bottom() {
            return Err(invalid(format!(
                "answer_grid_bottom_inset {} lets grid rows cross the bottom margin",
                s.answer_grid_bottom_inset
            )));
        }

        Ok(())
    }
}

fn invalid(message: String) -> LayoutError {
    LayoutError::InvalidConfig(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = LayoutConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.geometry.usable_width(), 170.0);
        assert_eq!(config.geometry.bottom(), 277.0);
        assert_eq!(config.answer_column_width(), 42.5);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = LayoutConfig::from_json_str(
            r#"{"geometry": {"width": 216.0, "height": 279.0, "margin": 15.0},
                "spacing": {"question_block_reserve": 50.0}}"#,
        )
        .unwrap();
        assert_eq!(config.geometry.margin, 15.0);
        assert_eq!(config.spacing.question_block_reserve, 50.0);
        assert_eq!(config.spacing.option_line_reserve, 6.0);
        assert_eq!(config.answer_columns, 4);
        assert_eq!(config.labels.answer_key_title, "CEVAP ANAHTARI");
    }

    #[test]
    fn test_json_round_trip() {
        let config = LayoutConfig::default();
        let json = config.to_json_string().unwrap();
        assert_eq!(LayoutConfig::from_json_str(&json).unwrap(), config);
    }

    #[test]
    fn test_margin_too_large() {
        let mut config = LayoutConfig::default();
        config.geometry.margin = 110.0;
        assert!(matches!(config.validate(), Err(LayoutError::InvalidConfig(_))));
    }

    #[test]
    fn test_zero_columns() {
        let mut config = LayoutConfig::default();
        config.answer_columns = 0;
        assert!(matches!(config.validate(), Err(LayoutError::InvalidConfig(_))));
    }

    #[test]
    fn test_line_taller_than_page() {
        let mut config = LayoutConfig::default();
        config.spacing.text_line = 300.0;
        assert!(matches!(config.validate(), Err(LayoutError::InvalidConfig(_))));
    }

    #[test]
    fn test_grid_inset_below_margin() {
        let mut config = LayoutConfig::default();
        config.spacing.answer_grid_bottom_inset = 10.0;
        assert!(matches!(config.validate(), Err(LayoutError::InvalidConfig(_))));
    }

    #[test]
    fn test_grid_inset_above_top_margin() {
        let mut config = LayoutConfig::default();
        config.spacing.answer_grid_bottom_inset = 290.0;
        assert!(matches!(config.validate(), Err(LayoutError::InvalidConfig(_))));
        config.spacing.answer_grid_bottom_inset = -5.0;
        assert!(matches!(config.validate(), Err(LayoutError::InvalidConfig(_))));
    }

    #[test]
    fn test_breakdown_cutoff_range() {
        let mut config = LayoutConfig::default();
        config.spacing.breakdown_cutoff = -10.0;
        assert!(matches!(config.validate(), Err(LayoutError::InvalidConfig(_))));
        config.spacing.breakdown_cutoff = 19.0;
        assert!(matches!(config.validate(), Err(LayoutError::InvalidConfig(_))));
        config.spacing.breakdown_cutoff = 300.0;
        assert!(matches!(config.validate(), Err(LayoutError::InvalidConfig(_))));

        config.spacing.breakdown_cutoff = config.geometry.margin;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_bad_json() {
        let err = LayoutConfig::from_json_str("{").unwrap_err();
        assert!(matches!(err, LayoutError::ConfigParse(_)));
    }
}
