//! Ordered topic -> question count mapping

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A topic and the number of exam questions tagged with it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicCount {
    pub topic: String,
    pub count: usize,
}

/// Topic distribution of an exam.
///
/// Entries keep the order they were inserted (or appeared in the wire map),
/// since that order drives the order of the printed distribution and the
/// answer breakdown. Duplicate topics are preserved here and rejected by
/// [`crate::Exam::validate`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopicDistribution {
    entries: Vec<TopicCount>,
}

impl TopicDistribution {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count topics in first-appearance order
    pub fn from_topics<'a>(topics: impl IntoIterator<Item = &'a str>) -> Self {
        let mut distribution = Self::new();
        for topic in topics {
            match distribution.entries.iter_mut().find(|e| e.topic == topic) {
                Some(entry) => entry.count += 1,
                None => distribution.push(topic, 1),
            }
        }
        distribution
    }

    /// Append an entry, keeping insertion order
    pub fn push(&mut self, topic: impl Into<String>, count: usize) {
        self.entries.push(TopicCount {
            topic: topic.into(),
            count,
        });
    }

    /// Count for a topic, if listed
    pub fn get(&self, topic: &str) -> Option<usize> {
        self.entries
            .iter()
            .find(|e| e.topic == topic)
            .map(|e| e.count)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TopicCount> {
        self.entries.iter()
    }

    /// Sum of all counts
    pub fn total(&self) -> usize {
        self.entries.iter().map(|e| e.count).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, usize)> for TopicDistribution {
    fn from_iter<I: IntoIterator<Item = (S, usize)>>(iter: I) -> Self {
        let mut distribution = Self::new();
        for (topic, count) in iter {
            distribution.push(topic, count);
        }
        distribution
    }
}

impl Serialize for TopicDistribution {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.topic, &entry.count)?;
        }
        map.end()
    }
}

struct DistributionVisitor;

impl<'de> Visitor<'de> for DistributionVisitor {
    type Value = TopicDistribution;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of topic names to question counts")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<Self::Value, A::Error> {
        let mut distribution = TopicDistribution::new();
        while let Some((topic, count)) = access.next_entry::<String, usize>()? {
            distribution.push(topic, count);
        }
        Ok(distribution)
    }
}

impl<'de> Deserialize<'de> for TopicDistribution {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(DistributionVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_from_topics_keeps_first_appearance_order() {
        let d = TopicDistribution::from_topics(["Teen Life", "Friendship", "Teen Life", "In the Kitchen"]);
        let topics: Vec<&str> = d.iter().map(|e| e.topic.as_str()).collect();
        assert_eq!(topics, vec!["Teen Life", "Friendship", "In the Kitchen"]);
        assert_eq!(d.get("Teen Life"), Some(2));
        assert_eq!(d.total(), 4);
    }

    #[test]
    fn test_deserialize_preserves_wire_order() {
        let d: TopicDistribution =
            serde_json::from_str(r#"{"Zebra": 2, "Apple": 1, "Mango": 3}"#).unwrap();
        let topics: Vec<&str> = d.iter().map(|e| e.topic.as_str()).collect();
        assert_eq!(topics, vec!["Zebra", "Apple", "Mango"]);
        assert_eq!(d.total(), 6);
    }

    #[test]
    fn test_deserialize_keeps_duplicates_for_validation() {
        let d: TopicDistribution = serde_json::from_str(r#"{"A": 1, "A": 2}"#).unwrap();
        assert_eq!(d.len(), 2);
    }

    #[test]
    fn test_serialize_round_trip_order() {
        let d: TopicDistribution = [("b", 1), ("a", 2)].into_iter().collect();
        let json = serde_json::to_string(&d).unwrap();
        assert_eq!(json, r#"{"b":1,"a":2}"#);
    }

    proptest! {
        #[test]
        fn prop_json_round_trip_keeps_order(
            entries in prop::collection::vec(("[A-Za-z ]{1,12}", 0usize..50), 0..12)
        ) {
            let mut seen = std::collections::HashSet::new();
            let d: TopicDistribution = entries
                .into_iter()
                .filter(|(topic, _)| seen.insert(topic.clone()))
                .collect();

            let json = serde_json::to_string(&d).unwrap();
            let parsed: TopicDistribution = serde_json::from_str(&json).unwrap();
            prop_assert_eq!(parsed, d);
        }
    }
}
