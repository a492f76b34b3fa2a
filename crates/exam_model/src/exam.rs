//! Exam and exam metadata

use crate::{Question, Result, TopicDistribution, ValidationError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Metadata block printed at the top of an exam document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExamMetadata {
    /// Declared number of questions
    pub total_questions: usize,
    /// Difficulty label, e.g. "orta"
    pub difficulty: String,
    /// Estimated duration label, e.g. "40 dakika"
    pub estimated_time: String,
    /// Topic -> count, in print order
    pub topic_distribution: TopicDistribution,
}

/// An ordered list of questions plus its metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exam {
    pub questions: Vec<Question>,
    pub metadata: ExamMetadata,
}

impl Exam {
    /// Create an exam, rejecting metadata that disagrees with the question list
    pub fn new(questions: Vec<Question>, metadata: ExamMetadata) -> Result<Self> {
        let exam = Self {
            questions,
            metadata,
        };
        exam.validate()?;
        Ok(exam)
    }

    /// Create an exam whose metadata is derived from the questions themselves.
    /// Used for question sets that arrive without an exam info block.
    pub fn from_questions(
        questions: Vec<Question>,
        difficulty: impl Into<String>,
        estimated_time: impl Into<String>,
    ) -> Self {
        let topic_distribution =
            TopicDistribution::from_topics(questions.iter().map(|q| q.topic.as_str()));
        let metadata = ExamMetadata {
            total_questions: questions.len(),
            difficulty: difficulty.into(),
            estimated_time: estimated_time.into(),
            topic_distribution,
        };
        Self {
            questions,
            metadata,
        }
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Number of questions tagged with a topic
    pub fn count_for_topic(&self, topic: &str) -> usize {
        self.questions.iter().filter(|q| q.topic == topic).count()
    }

    /// Check that the metadata is consistent with the question list.
    ///
    /// Per-question invariants (four present options, a correct key in A-D)
    /// are carried by the types; this covers the cross-field ones.
    pub fn validate(&self) -> Result<()> {
        let actual = self.questions.len();
        let distribution = &self.metadata.topic_distribution;

        let mut seen = HashSet::new();
        for entry in distribution.iter() {
            if !seen.insert(entry.topic.as_str()) {
                return Err(ValidationError::DuplicateTopic(entry.topic.clone()));
            }
        }

        if self.metadata.total_questions != actual {
            return Err(ValidationError::QuestionCountMismatch {
                declared: self.metadata.total_questions,
                actual,
            });
        }

        let distribution_total = distribution.total();
        if distribution_total != actual {
            return Err(ValidationError::DistributionTotalMismatch {
                distribution_total,
                question_count: actual,
            });
        }

        for question in &self.questions {
            if distribution.get(&question.topic).is_none() {
                return Err(ValidationError::TopicMissingFromDistribution(
                    question.topic.clone(),
                ));
            }
        }

        for entry in distribution.iter() {
            let found = self.count_for_topic(&entry.topic);
            if found == 0 {
                return Err(ValidationError::TopicNotInQuestions(entry.topic.clone()));
            }
            if found != entry.count {
                return Err(ValidationError::TopicCountMismatch {
                    topic: entry.topic.clone(),
                    expected: entry.count,
                    actual: found,
                });
            }
        }

        Ok(())
    }
}
