//! Multiple-choice question types

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the four answer slots of a question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OptionKey {
    A,
    B,
    C,
    D,
}

impl OptionKey {
    /// All keys in print order
    pub const ALL: [OptionKey; 4] = [OptionKey::A, OptionKey::B, OptionKey::C, OptionKey::D];

    /// Parse a key from wire text. Surrounding whitespace and case are ignored;
    /// anything other than a single letter A-D yields `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "A" | "a" => Some(OptionKey::A),
            "B" | "b" => Some(OptionKey::B),
            "C" | "c" => Some(OptionKey::C),
            "D" | "d" => Some(OptionKey::D),
            _ => None,
        }
    }

    /// The key as an uppercase letter
    pub fn as_char(self) -> char {
        match self {
            OptionKey::A => 'A',
            OptionKey::B => 'B',
            OptionKey::C => 'C',
            OptionKey::D => 'D',
        }
    }

    /// Zero-based slot index
    pub fn index(self) -> usize {
        match self {
            OptionKey::A => 0,
            OptionKey::B => 1,
            OptionKey::C => 2,
            OptionKey::D => 3,
        }
    }
}

impl fmt::Display for OptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// The four option texts of a question. Texts may be empty but are always present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionOptions {
    pub a: String,
    pub b: String,
    pub c: String,
    pub d: String,
}

impl QuestionOptions {
    pub fn new(
        a: impl Into<String>,
        b: impl Into<String>,
        c: impl Into<String>,
        d: impl Into<String>,
    ) -> Self {
        Self {
            a: a.into(),
            b: b.into(),
            c: c.into(),
            d: d.into(),
        }
    }

    /// Text of the option in the given slot
    pub fn get(&self, key: OptionKey) -> &str {
        match key {
            OptionKey::A => &self.a,
            OptionKey::B => &self.b,
            OptionKey::C => &self.c,
            OptionKey::D => &self.d,
        }
    }

    /// Options in fixed A, B, C, D order
    pub fn iter(&self) -> impl Iterator<Item = (OptionKey, &str)> {
        OptionKey::ALL.into_iter().map(move |key| (key, self.get(key)))
    }
}

/// A multiple-choice question with exactly one correct option
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// External identifier from the question bank. Questions without one are
    /// identified by their position in the exam.
    #[serde(default)]
    pub id: Option<String>,
    /// Topic tag used for the distribution and the per-topic answer breakdown
    pub topic: String,
    /// The question stem
    pub text: String,
    pub options: QuestionOptions,
    pub correct: OptionKey,
    #[serde(default)]
    pub explanation: Option<String>,
    /// Label printed next to the question number instead of the topic
    /// (e.g. a classifier's predicted topic and confidence)
    #[serde(default)]
    pub annotation: Option<String>,
}

impl Question {
    /// Create a question without id, explanation or annotation
    pub fn new(
        topic: impl Into<String>,
        text: impl Into<String>,
        options: QuestionOptions,
        correct: OptionKey,
    ) -> Self {
        Self {
            id: None,
            topic: topic.into(),
            text: text.into(),
            options,
            correct,
            explanation: None,
            annotation: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = Some(explanation.into());
        self
    }

    pub fn with_annotation(mut self, annotation: impl Into<String>) -> Self {
        self.annotation = Some(annotation.into());
        self
    }

    /// Text of the correct option
    pub fn correct_text(&self) -> &str {
        self.options.get(self.correct)
    }

    /// The label shown beside the question number
    pub fn label(&self) -> &str {
        self.annotation.as_deref().unwrap_or(&self.topic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Question {
        Question::new(
            "Friendship",
            "Which one is correct?",
            QuestionOptions::new("one", "two", "three", "four"),
            OptionKey::C,
        )
    }

    #[test]
    fn test_parse_option_key() {
        assert_eq!(OptionKey::parse("A"), Some(OptionKey::A));
        assert_eq!(OptionKey::parse(" d "), Some(OptionKey::D));
        assert_eq!(OptionKey::parse("E"), None);
        assert_eq!(OptionKey::parse("AB"), None);
        assert_eq!(OptionKey::parse(""), None);
    }

    #[test]
    fn test_options_iterate_in_fixed_order() {
        let q = sample();
        let keys: Vec<char> = q.options.iter().map(|(k, _)| k.as_char()).collect();
        assert_eq!(keys, vec!['A', 'B', 'C', 'D']);
        assert_eq!(q.correct_text(), "three");
    }

    #[test]
    fn test_label_prefers_annotation() {
        let q = sample();
        assert_eq!(q.label(), "Friendship");

        let q = q.with_annotation("ML: Teen Life - 91.2%");
        assert_eq!(q.label(), "ML: Teen Life - 91.2%");
    }
}
