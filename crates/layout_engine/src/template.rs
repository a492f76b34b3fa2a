//! Document variants
//!
//! The header and answer-key sections differ slightly between a full exam and
//! an ad-hoc question set. A `DocumentTemplate` captures those differences as
//! data so one assembler builds all of them.

use crate::DocumentLabels;
use exam_model::Exam;
use serde::{Deserialize, Serialize};

/// One metadata line printed under the title
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HeaderLine {
    QuestionCount,
    Difficulty,
    EstimatedTime,
    /// A fixed `label: value` line
    Custom { label: String, value: String },
}

impl HeaderLine {
    pub fn custom(label: impl Into<String>, value: impl Into<String>) -> Self {
        HeaderLine::Custom {
            label: label.into(),
            value: value.into(),
        }
    }

    /// Text of the line for `exam`, before normalization
    pub fn render(&self, exam: &Exam, labels: &DocumentLabels) -> String {
        let meta = &exam.metadata;
        match self {
            HeaderLine::QuestionCount => {
                format!("{}: {}", labels.question_count, meta.total_questions)
            }
            HeaderLine::Difficulty => format!("{}: {}", labels.difficulty, meta.difficulty),
            HeaderLine::EstimatedTime => {
                format!("{}: {}", labels.estimated_time, meta.estimated_time)
            }
            HeaderLine::Custom { label, value } => format!("{label}: {value}"),
        }
    }
}

/// What a document prints around the question blocks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentTemplate {
    /// Centred title on the first page
    pub title: String,
    pub header_lines: Vec<HeaderLine>,
    /// Print the topic -> count list under the header lines
    pub show_topic_distribution: bool,
    /// Print the per-topic answer breakdown under the answer grid
    pub show_topic_breakdown: bool,
}

impl DocumentTemplate {
    /// A full exam with metadata, distribution and answer breakdown
    pub fn exam() -> Self {
        Self {
            title: "LGS INGILIZCE SINAVI".into(),
            header_lines: vec![
                HeaderLine::QuestionCount,
                HeaderLine::Difficulty,
                HeaderLine::EstimatedTime,
            ],
            show_topic_distribution: true,
            show_topic_breakdown: true,
        }
    }

    /// A question set produced by the question generator. Without a topic
    /// the set is labelled as mixed.
    pub fn generated_set(topic: Option<&str>) -> Self {
        let topic = topic.filter(|t| !t.trim().is_empty()).unwrap_or("Karma");
        Self {
            title: "MCP ILE URETILEN SORULAR".into(),
            header_lines: vec![
                HeaderLine::custom("Konu", topic),
                HeaderLine::Difficulty,
                HeaderLine::QuestionCount,
            ],
            show_topic_distribution: false,
            show_topic_breakdown: false,
        }
    }

    /// A question set labelled by a topic classifier
    pub fn ml_set(model_type: impl Into<String>, accuracy: f64) -> Self {
        Self {
            title: "ML MODEL ILE URETILEN SORULAR".into(),
            header_lines: vec![
                HeaderLine::custom("Model", model_type),
                HeaderLine::custom("Accuracy", format!("{accuracy}%")),
                HeaderLine::QuestionCount,
            ],
            show_topic_distribution: false,
            show_topic_breakdown: false,
        }
    }
}

impl Default for DocumentTemplate {
    fn default() -> Self {
        Self::exam()
    }
}
