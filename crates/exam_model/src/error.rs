//! Error types for exam validation

use crate::OptionKey;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Question {question}: option {key} is missing")]
    MissingOption { question: usize, key: OptionKey },

    #[error("Question {question}: correct option {value:?} is not one of A-D")]
    InvalidCorrectOption { question: usize, value: String },

    #[error("Metadata declares {declared} questions, but the exam has {actual}")]
    QuestionCountMismatch { declared: usize, actual: usize },

    #[error("Topic distribution sums to {distribution_total}, but the exam has {question_count} questions")]
    DistributionTotalMismatch {
        distribution_total: usize,
        question_count: usize,
    },

    #[error("Topic {0:?} appears in the questions but not in the distribution")]
    TopicMissingFromDistribution(String),

    #[error("Topic {0:?} appears in the distribution but in no question")]
    TopicNotInQuestions(String),

    #[error("Topic {topic:?}: distribution lists {expected} questions, found {actual}")]
    TopicCountMismatch {
        topic: String,
        expected: usize,
        actual: usize,
    },

    #[error("Duplicate topic in distribution: {0:?}")]
    DuplicateTopic(String),

    #[error("Invalid exam JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ValidationError>;
