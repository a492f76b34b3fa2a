//! Document assembly
//!
//! Turns an [`Exam`] into the ordered draw instructions of a printable
//! document: a header block, one block per question and an answer key on a
//! page of its own. Every string handed to the renderer is normalized first.

use crate::{
    column_grid, ColumnEntry, DocumentTemplate, DrawInstruction, LayoutConfig, LayoutError,
    LineWrapper, PageCursor, Point, Result,
};
use exam_model::{Exam, Question};
use serde::{Deserialize, Serialize};
use text_engine::{normalize, FontSpec, TextMeasurer};

/// The result of one document build
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssembledDocument {
    /// Instructions in drawing order
    pub instructions: Vec<DrawInstruction>,
    /// Number of pages the instructions span
    pub page_count: usize,
    /// Zero-based indices of questions whose answer-key entry fell below the
    /// answer page and was left out
    pub clipped_answers: Vec<usize>,
    /// The per-topic breakdown did not fit under the answer grid
    pub breakdown_skipped: bool,
}

impl AssembledDocument {
    pub fn page_breaks(&self) -> usize {
        self.instructions.iter().filter(|i| i.is_page_break()).count()
    }
}

/// Builds documents for one layout configuration and measurer.
///
/// The assembler holds no per-build state, so a single instance can build
/// any number of documents, from any number of threads if the measurer
/// allows it.
pub struct DocumentAssembler<M: TextMeasurer> {
    config: LayoutConfig,
    measurer: M,
}

impl<M: TextMeasurer> DocumentAssembler<M> {
    /// Create an assembler, rejecting an unusable configuration
    pub fn new(config: LayoutConfig, measurer: M) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, measurer })
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn measurer(&self) -> &M {
        &self.measurer
    }

    /// Lay out `exam` with `template`.
    ///
    /// The exam is validated before any layout happens; on error nothing is
    /// produced.
    pub fn build(&self, exam: &Exam, template: &DocumentTemplate) -> Result<AssembledDocument> {
        let limit = self.config.max_questions;
        if exam.len() > limit {
            return Err(LayoutError::TooManyQuestions {
                count: exam.len(),
                limit,
            });
        }
        exam.validate()?;

        tracing::debug!(questions = exam.len(), title = %template.title, "building document");

        let mut build = Build {
            config: &self.config,
            measurer: &self.measurer,
            cursor: PageCursor::new(self.config.geometry),
            out: Vec::new(),
        };

        build.header(exam, template)?;
        for (index, question) in exam.questions.iter().enumerate() {
            build.question(index, question)?;
        }
        let clipped_answers = build.answer_grid(exam)?;
        let breakdown_skipped = if template.show_topic_breakdown {
            build.topic_breakdown(exam)?
        } else {
            false
        };

        let page_count = build.cursor.page_count();
        tracing::debug!(
            pages = page_count,
            instructions = build.out.len(),
            "document built"
        );

        Ok(AssembledDocument {
            instructions: build.out,
            page_count,
            clipped_answers,
            breakdown_skipped,
        })
    }
}

/// State owned by a single build
struct Build<'a, M: TextMeasurer> {
    config: &'a LayoutConfig,
    measurer: &'a M,
    cursor: PageCursor,
    out: Vec<DrawInstruction>,
}

impl<M: TextMeasurer> Build<'_, M> {
    /// Reserve a line and draw `text` on it at `x`
    fn line(&mut self, text: &str, x: f32, height: f32, font: FontSpec) -> Result<()> {
        let y = self.cursor.reserve(height, &mut self.out)?;
        self.out.push(DrawInstruction::text(normalize(text), Point::new(x, y), font));
        Ok(())
    }

    /// Wrap `text` and reserve one line per wrapped line
    fn paragraph(&mut self, text: &str, x: f32, max_width: f32, font: FontSpec) -> Result<()> {
        let wrapper = LineWrapper::new(self.measurer, font);
        let lines = wrapper.wrap(&normalize(text), max_width)?;
        let line_height = self.config.spacing.text_line;
        for line in lines {
            let y = self.cursor.reserve(line_height, &mut self.out)?;
            self.out.push(DrawInstruction::text(line, Point::new(x, y), font));
        }
        Ok(())
    }

    fn header(&mut self, exam: &Exam, template: &DocumentTemplate) -> Result<()> {
        let config = self.config;
        let (fonts, spacing, labels) = (&config.fonts, &config.spacing, &config.labels);
        let left = config.geometry.left();
        let metadata = FontSpec::regular(fonts.metadata);

        let y = self.cursor.reserve(spacing.title_advance, &mut self.out)?;
        let center = Point::new(config.geometry.center_x(), y);
        self.out.push(DrawInstruction::centered(
            normalize(&template.title),
            center,
            FontSpec::bold(fonts.title),
        ));

        for header_line in &template.header_lines {
            let text = header_line.render(exam, labels);
            self.line(&text, left, spacing.metadata_line, metadata)?;
        }
        self.cursor.advance(spacing.header_section_gap)?;

        let distribution = &exam.metadata.topic_distribution;
        if template.show_topic_distribution && !distribution.is_empty() {
            self.line(
                &labels.topic_distribution,
                left,
                spacing.metadata_line,
                FontSpec::bold(fonts.metadata),
            )?;
            for entry in distribution.iter() {
                let text = format!("  - {}: {} {}", entry.topic, entry.count, labels.question_unit);
                self.line(&text, left, spacing.distribution_line, metadata)?;
            }
        }
        self.cursor.advance(spacing.header_block_gap)?;
        Ok(())
    }

    fn question(&mut self, index: usize, question: &Question) -> Result<()> {
        let config = self.config;
        let (fonts, spacing) = (&config.fonts, &config.spacing);
        let left = config.geometry.left();
        let body = FontSpec::regular(fonts.body);

        self.cursor.ensure(spacing.question_block_reserve, &mut self.out)?;

        let y = self.cursor.reserve(spacing.question_header, &mut self.out)?;
        let number = format!("{} {}", config.labels.question_prefix, index + 1);
        self.out.push(DrawInstruction::text(
            normalize(&number),
            Point::new(left, y),
            FontSpec::bold(fonts.question_number),
        ));
        let label = normalize(question.label());
        if !label.trim().is_empty() {
            self.out.push(DrawInstruction::text(
                format!("({label})"),
                Point::new(left + spacing.topic_label_indent, y),
                FontSpec::italic(fonts.topic_label),
            ));
        }

        let usable = config.geometry.usable_width();
        self.paragraph(&question.text, left, usable, body)?;
        self.cursor.advance(spacing.question_text_gap)?;

        let option_width = usable - spacing.option_indent;
        let option_x = left + spacing.option_x_offset;
        for (key, text) in question.options.iter() {
            self.cursor.ensure(spacing.option_line_reserve, &mut self.out)?;
            self.paragraph(&format!("{key}) {text}"), option_x, option_width, body)?;
        }

        self.cursor.advance(spacing.question_gap)?;
        Ok(())
    }

    /// Answer key title and grid. Returns the indices of clipped entries.
    fn answer_grid(&mut self, exam: &Exam) -> Result<Vec<usize>> {
        let config = self.config;
        let (fonts, spacing) = (&config.fonts, &config.spacing);

        self.cursor.break_page(&mut self.out);
        let y = self.cursor.reserve(spacing.answer_title_advance, &mut self.out)?;
        self.out.push(DrawInstruction::centered(
            normalize(&config.labels.answer_key_title),
            Point::new(config.geometry.center_x(), y),
            FontSpec::bold(fonts.answer_key_title),
        ));

        let placements = column_grid::layout(
            exam.len(),
            config.answer_columns,
            config.answer_column_width(),
            spacing.answer_row_height,
            Point::new(config.geometry.left(), self.cursor.offset()),
            config.answer_grid_bottom(),
        );

        let mut entries = Vec::with_capacity(placements.len());
        let mut clipped = Vec::new();
        for (placement, question) in placements.iter().zip(&exam.questions) {
            if placement.clipped {
                clipped.push(placement.index);
                continue;
            }
            entries.push(ColumnEntry {
                index: placement.index,
                column: placement.column,
                row: placement.row,
                text: normalize(&format!("{}. {}", placement.index + 1, question.correct)),
                position: placement.position,
            });
        }

        if !entries.is_empty() {
            self.out.push(DrawInstruction::MultiColumnText {
                entries,
                font: FontSpec::regular(fonts.answer_entry),
            });
        }
        if !clipped.is_empty() {
            tracing::warn!(
                clipped = clipped.len(),
                first = clipped[0] + 1,
                "answer key entries fell below the answer page and were left out"
            );
        }
        Ok(clipped)
    }

    /// Per-topic answer listing under the grid. Returns whether it was skipped.
    fn topic_breakdown(&mut self, exam: &Exam) -> Result<bool> {
        let config = self.config;
        let (fonts, spacing, geometry) = (&config.fonts, &config.spacing, &config.geometry);

        let rows = column_grid::rows_per_column(exam.len(), config.answer_columns);
        let grid_height = rows as f32 * spacing.answer_row_height + spacing.answer_key_gap;
        let grid_end = self.cursor.offset() + grid_height;
        if grid_end >= geometry.height - spacing.breakdown_cutoff {
            tracing::info!(grid_end, "no room for the topic breakdown, skipping it");
            return Ok(true);
        }
        self.cursor.advance(grid_height)?;

        let left = geometry.left();
        self.line(
            &config.labels.topic_breakdown,
            left,
            spacing.breakdown_heading,
            FontSpec::bold(fonts.body),
        )?;

        let unit = &config.labels.question_unit;
        let usable = geometry.usable_width();
        for entry in exam.metadata.topic_distribution.iter() {
            let answers = exam
                .questions
                .iter()
                .enumerate()
                .filter(|(_, q)| q.topic == entry.topic)
                .map(|(i, q)| format!("{}.{}", i + 1, q.correct))
                .collect::<Vec<_>>()
                .join(", ");
            let text = format!("{} ({} {}): {}", entry.topic, entry.count, unit, answers);
            self.paragraph(&text, left, usable, FontSpec::regular(fonts.body))?;
            self.cursor.advance(spacing.breakdown_line_gap)?;
        }
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use exam_model::{ExamMetadata, OptionKey, QuestionOptions, TopicDistribution, ValidationError};
    use text_engine::CharWidthMeasurer;

    fn question(topic: &str, correct: OptionKey) -> Question {
        Question::new(
            topic,
            "Choose the correct answer.",
            QuestionOptions::new("apple", "banana", "cherry", "date"),
            correct,
        )
    }

    fn small_exam() -> Exam {
        Exam::from_questions(
            vec![
                question("Friendship", OptionKey::A),
                question("Teen Life", OptionKey::C),
                question("Friendship", OptionKey::D),
            ],
            "orta",
            "10 dakika",
        )
    }

    fn assembler() -> DocumentAssembler<CharWidthMeasurer> {
        DocumentAssembler::new(LayoutConfig::default(), CharWidthMeasurer::default()).unwrap()
    }

    fn texts(doc: &AssembledDocument) -> Vec<&str> {
        doc.instructions.iter().filter_map(|i| i.as_text()).collect()
    }

    #[test]
    fn test_small_exam_layout() {
        let doc = assembler().build(&small_exam(), &DocumentTemplate::exam()).unwrap();
        assert_eq!(doc.page_count, 2);
        assert_eq!(doc.page_breaks(), 1);
        assert!(doc.clipped_answers.is_empty());
        assert!(!doc.breakdown_skipped);

        let texts = texts(&doc);
        assert_eq!(texts[0], "LGS INGILIZCE SINAVI");
        assert_eq!(texts[1], "Toplam Soru: 3");
        assert!(texts.contains(&"  - Friendship: 2 soru"));
        assert!(texts.contains(&"Soru 1"));
        assert!(texts.contains(&"(Teen Life)"));
        assert!(texts.contains(&"A) apple"));
        assert!(texts.contains(&"CEVAP ANAHTARI"));
        assert!(texts.contains(&"Friendship (2 soru): 1.A, 3.D"));
        assert!(texts.contains(&"Teen Life (1 soru): 2.C"));
    }

    #[test]
    fn test_header_positions() {
        let doc = assembler().build(&small_exam(), &DocumentTemplate::exam()).unwrap();
        match &doc.instructions[0] {
            DrawInstruction::Text { position, align, .. } => {
                assert_eq!(*position, Point::new(105.0, 20.0));
                assert_eq!(*align, crate::TextAlign::Center);
            }
            other => panic!("unexpected first instruction {other:?}"),
        }
        match &doc.instructions[1] {
            DrawInstruction::Text { position, .. } => assert_eq!(*position, Point::new(20.0, 35.0)),
            other => panic!("unexpected instruction {other:?}"),
        }
    }

    #[test]
    fn test_answer_grid_entries() {
        let doc = assembler().build(&small_exam(), &DocumentTemplate::exam()).unwrap();
        let grid = doc
            .instructions
            .iter()
            .find_map(|i| match i {
                DrawInstruction::MultiColumnText { entries, .. } => Some(entries),
                _ => None,
            })
            .unwrap();
        let labels: Vec<&str> = grid.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(labels, vec!["1. A", "2. C", "3. D"]);
        // one row per column, title at y = 20
        assert!(grid.iter().all(|e| e.position.y == 35.0));
        assert_eq!(grid[1].position.x, 62.5);
    }

    #[test]
    fn test_annotation_replaces_topic_label() {
        let q = question("Friendship", OptionKey::B).with_annotation("ML: Teen Life - 91.0%");
        let exam = Exam::from_questions(vec![q], "", "");
        let doc = assembler().build(&exam, &DocumentTemplate::ml_set("nb", 80.0)).unwrap();
        let texts = texts(&doc);
        assert!(texts.contains(&"(ML: Teen Life - 91.0%)"));
        assert!(!texts.contains(&"(Friendship)"));
        assert!(!texts.iter().any(|t| t.contains("Konu Bazinda")));
    }

    #[test]
    fn test_text_is_normalized() {
        let q = Question::new(
            "Arkadaşlık",
            "Hangisi doğru?",
            QuestionOptions::new("İyi", "Güzel", "Çok", "Öğle"),
            OptionKey::A,
        );
        let exam = Exam::from_questions(vec![q], "kolay", "5 dakika");
        let doc = assembler().build(&exam, &DocumentTemplate::exam()).unwrap();
        let texts = texts(&doc);
        assert!(texts.contains(&"(Arkadaslik)"));
        assert!(texts.contains(&"Hangisi dogru?"));
        assert!(texts.contains(&"D) Ogle"));
        assert!(texts.iter().all(|t| t.is_ascii()));
    }

    #[test]
    fn test_invalid_exam_produces_nothing() {
        let metadata = ExamMetadata {
            total_questions: 1,
            difficulty: "orta".into(),
            estimated_time: "5 dakika".into(),
            topic_distribution: [("Friendship", 2)].into_iter().collect::<TopicDistribution>(),
        };
        let exam = Exam {
            questions: vec![question("Friendship", OptionKey::A)],
            metadata,
        };
        let err = assembler().build(&exam, &DocumentTemplate::exam()).unwrap_err();
        assert!(matches!(
            err,
            LayoutError::Validation(ValidationError::DistributionTotalMismatch { .. })
        ));
    }

    #[test]
    fn test_question_limit() {
        let config = LayoutConfig {
            max_questions: 2,
            ..LayoutConfig::default()
        };
        let assembler = DocumentAssembler::new(config, CharWidthMeasurer::default()).unwrap();
        let err = assembler.build(&small_exam(), &DocumentTemplate::exam()).unwrap_err();
        assert!(matches!(err, LayoutError::TooManyQuestions { count: 3, limit: 2 }));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = LayoutConfig::default();
        config.answer_columns = 0;
        assert!(DocumentAssembler::new(config, CharWidthMeasurer::default()).is_err());
    }

    #[test]
    fn test_empty_exam() {
        let exam = Exam::from_questions(Vec::new(), "", "");
        let doc = assembler().build(&exam, &DocumentTemplate::exam()).unwrap();
        assert_eq!(doc.page_count, 2);
        assert!(!doc
            .instructions
            .iter()
            .any(|i| matches!(i, DrawInstruction::MultiColumnText { .. })));
    }
}
