//! Renderers for assembled documents
//!
//! A renderer turns an [`AssembledDocument`] into output bytes. The layout is
//! already final at this point; renderers only decide how to encode it.

use crate::{GlyphRun, RenderModel, Result};
use layout_engine::{AssembledDocument, PageGeometry, TextAlign};
use std::path::Path;

/// Separates pages in plain text output
pub const PAGE_SEPARATOR: char = '\u{000C}';

/// Encodes an assembled document
pub trait DocumentRenderer {
    /// Render the whole document to bytes
    fn render(&self, doc: &AssembledDocument, geometry: &PageGeometry) -> Result<Vec<u8>>;

    /// File extension of the rendered output, without the dot
    fn extension(&self) -> &'static str;

    /// Render and write the result to `path`
    fn render_to_file(
        &self,
        doc: &AssembledDocument,
        geometry: &PageGeometry,
        path: &Path,
    ) -> Result<()> {
        let bytes = self.render(doc, geometry)?;
        std::fs::write(path, bytes)?;
        Ok(())
    }
}

/// Monospace approximation of the pages.
///
/// Every distinct baseline becomes one text row and horizontal positions are
/// mapped to character cells. Pages are separated by a form feed line.
#[derive(Debug, Clone)]
pub struct PlainTextRenderer {
    /// Width of one character cell in page units
    pub cell_width: f64,
}

impl Default for PlainTextRenderer {
    fn default() -> Self {
        // average 10pt character in millimetres
        Self { cell_width: 1.9 }
    }
}

impl PlainTextRenderer {
    pub fn new(cell_width: f64) -> Self {
        Self { cell_width }
    }

    fn column(&self, run: &GlyphRun, left: f64) -> usize {
        let cell = ((run.x - left) / self.cell_width).round().max(0.0) as usize;
        match run.align {
            TextAlign::Left => cell,
            TextAlign::Center => cell.saturating_sub(run.text.chars().count() / 2),
        }
    }

    fn render_page(&self, runs: &mut [&GlyphRun], left: f64) -> String {
        runs.sort_by(|a, b| a.y.total_cmp(&b.y).then(a.x.total_cmp(&b.x)));

        let mut rows: Vec<String> = Vec::new();
        let mut row_y = None;
        for run in runs.iter() {
            if row_y != Some(run.y) {
                rows.push(String::new());
                row_y = Some(run.y);
            }
            let Some(row) = rows.last_mut() else {
                continue;
            };

            let width = row.chars().count();
            let column = self.column(run, left);
            if width < column {
                row.extend(std::iter::repeat(' ').take(column - width));
            } else if width > 0 {
                row.push(' ');
            }
            row.push_str(&run.text);
        }
        rows.join("\n")
    }
}

impl DocumentRenderer for PlainTextRenderer {
    fn render(&self, doc: &AssembledDocument, geometry: &PageGeometry) -> Result<Vec<u8>> {
        let model = RenderModel::from_instructions(&doc.instructions, geometry)?;
        let left = geometry.left() as f64;

        let pages: Vec<String> = model
            .pages
            .iter()
            .map(|page| {
                let mut runs: Vec<&GlyphRun> = page.glyph_runs().collect();
                self.render_page(&mut runs, left)
            })
            .collect();

        let separator = format!("\n{PAGE_SEPARATOR}\n");
        let mut out = pages.join(&separator);
        out.push('\n');
        Ok(out.into_bytes())
    }

    fn extension(&self) -> &'static str {
        "txt"
    }
}

/// Dumps the assembled document as JSON
#[derive(Debug, Clone, Default)]
pub struct JsonRenderer {
    pub pretty: bool,
}

impl JsonRenderer {
    pub fn pretty() -> Self {
        Self { pretty: true }
    }
}

impl DocumentRenderer for JsonRenderer {
    fn render(&self, doc: &AssembledDocument, geometry: &PageGeometry) -> Result<Vec<u8>> {
        // reject streams a drawing backend could not place
        RenderModel::from_instructions(&doc.instructions, geometry)?;
        let bytes = if self.pretty {
            serde_json::to_vec_pretty(doc)?
        } else {
            serde_json::to_vec(doc)?
        };
        Ok(bytes)
    }

    fn extension(&self) -> &'static str {
        "json"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use exam_model::{Exam, OptionKey, Question, QuestionOptions};
    use layout_engine::{DocumentAssembler, DocumentTemplate, DrawInstruction, LayoutConfig, Point};
    use text_engine::{CharWidthMeasurer, FontSpec};

    fn assembled() -> AssembledDocument {
        let questions = vec![
            Question::new(
                "Friendship",
                "Which one is a good friend?",
                QuestionOptions::new("Ali", "Ayse", "Can", "Deniz"),
                OptionKey::B,
            ),
            Question::new(
                "Teen Life",
                "What does Elif do after school?",
                QuestionOptions::new("Swims", "Reads", "Sleeps", "Cooks"),
                OptionKey::A,
            ),
        ];
        let exam = Exam::from_questions(questions, "kolay", "5 dakika");
        let assembler =
            DocumentAssembler::new(LayoutConfig::default(), CharWidthMeasurer::default()).unwrap();
        assembler.build(&exam, &DocumentTemplate::exam()).unwrap()
    }

    #[test]
    fn test_plain_text_pages() {
        let doc = assembled();
        let bytes = PlainTextRenderer::default()
            .render(&doc, &PageGeometry::a4())
            .unwrap();
        let text = String::from_utf8(bytes).unwrap();

        assert_eq!(text.split(PAGE_SEPARATOR).count(), doc.page_count);
        let header = text.lines().find(|l| l.starts_with("Soru 1")).unwrap();
        assert!(header.ends_with("(Friendship)"));
        assert!(text.contains("B) Ayse"));
        assert!(text.contains("CEVAP ANAHTARI"));
    }

    #[test]
    fn test_same_baseline_shares_a_row() {
        let font = FontSpec::regular(10.0);
        let doc = AssembledDocument {
            instructions: vec![
                DrawInstruction::text("right", Point::new(39.0, 50.0), font),
                DrawInstruction::text("left", Point::new(20.0, 50.0), font),
                DrawInstruction::text("below", Point::new(20.0, 56.0), font),
            ],
            page_count: 1,
            clipped_answers: Vec::new(),
            breakdown_skipped: false,
        };
        let bytes = PlainTextRenderer::default()
            .render(&doc, &PageGeometry::a4())
            .unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), "left      right\nbelow\n");
    }

    #[test]
    fn test_json_output_parses_back() {
        let doc = assembled();
        let bytes = JsonRenderer::pretty().render(&doc, &PageGeometry::a4()).unwrap();
        let parsed: AssembledDocument = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(parsed, doc);
        assert_eq!(JsonRenderer::default().extension(), "json");
    }
}
