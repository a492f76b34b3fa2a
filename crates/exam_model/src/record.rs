//! Wire records as sent by the question service
//!
//! The service speaks loosely-typed JSON: options may be absent, the correct
//! option is free text and ids may be numbers or strings. These records
//! mirror that shape and convert into the strict model types.

use crate::{Exam, ExamMetadata, OptionKey, Question, QuestionOptions, Result, TopicDistribution, ValidationError};
use serde::{Deserialize, Serialize};

/// A question as it appears on the wire
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuestionRecord {
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    #[serde(default, alias = "topic")]
    pub exam_topic: String,
    #[serde(default)]
    pub question_text: String,
    pub option_a: Option<String>,
    pub option_b: Option<String>,
    pub option_c: Option<String>,
    pub option_d: Option<String>,
    #[serde(default)]
    pub correct_option: String,
    #[serde(default)]
    pub explanation: Option<String>,
    #[serde(default)]
    pub ml_predicted_topic: Option<String>,
    #[serde(default)]
    pub ml_confidence: Option<f64>,
}

impl QuestionRecord {
    /// Convert into a [`Question`]. `number` is the 1-based position used in
    /// error messages.
    pub fn into_question(self, number: usize) -> Result<Question> {
        let correct = OptionKey::parse(&self.correct_option).ok_or_else(|| {
            ValidationError::InvalidCorrectOption {
                question: number,
                value: self.correct_option.clone(),
            }
        })?;

        let require = |value: Option<String>, key: OptionKey| {
            value.ok_or(ValidationError::MissingOption {
                question: number,
                key,
            })
        };
        let options = QuestionOptions {
            a: require(self.option_a, OptionKey::A)?,
            b: require(self.option_b, OptionKey::B)?,
            c: require(self.option_c, OptionKey::C)?,
            d: require(self.option_d, OptionKey::D)?,
        };

        let annotation = self.ml_predicted_topic.map(|topic| match self.ml_confidence {
            Some(confidence) => format!("ML: {topic} - {}%", one_decimal(confidence)),
            None => format!("ML: {topic}"),
        });

        Ok(Question {
            id: self.id.and_then(id_to_string),
            topic: self.exam_topic,
            text: self.question_text,
            options,
            correct,
            explanation: self.explanation,
            annotation,
        })
    }
}

/// Format with one decimal place, rounding exact ties away from zero.
///
/// `{:.1}` rounds ties to even, which would print 87.25 as "87.2". Only
/// quarter values can be exact ties at one decimal.
fn one_decimal(value: f64) -> String {
    let quarters = value * 4.0;
    if quarters.fract() == 0.0 && quarters.rem_euclid(2.0) == 1.0 {
        return format!("{:.1}", value + 0.05f64.copysign(value));
    }
    format!("{value:.1}")
}

fn id_to_string(value: serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

/// The `exam_info` block on the wire
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExamInfoRecord {
    pub total_questions: usize,
    #[serde(default)]
    pub difficulty: String,
    #[serde(default)]
    pub estimated_time: String,
    #[serde(default)]
    pub topic_distribution: TopicDistribution,
}

/// A full exam response. Plain question sets come without `exam_info`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExamRecord {
    pub questions: Vec<QuestionRecord>,
    #[serde(default)]
    pub exam_info: Option<ExamInfoRecord>,
}

impl Exam {
    /// Build and validate an exam from its wire record
    pub fn from_record(record: ExamRecord) -> Result<Self> {
        let questions = record
            .questions
            .into_iter()
            .enumerate()
            .map(|(i, q)| q.into_question(i + 1))
            .collect::<Result<Vec<_>>>()?;

        match record.exam_info {
            Some(info) => Exam::new(
                questions,
                ExamMetadata {
                    total_questions: info.total_questions,
                    difficulty: info.difficulty,
                    estimated_time: info.estimated_time,
                    topic_distribution: info.topic_distribution,
                },
            ),
            None => Ok(Exam::from_questions(questions, "", "")),
        }
    }

    /// Parse and validate an exam from JSON text
    pub fn from_json_str(json: &str) -> Result<Self> {
        let record: ExamRecord = serde_json::from_str(json)?;
        Self::from_record(record)
    }
}
