//! Statement ("quint") data model

use serde::{Deserialize, Serialize};

/// A single RDF statement: subject, predicate, object, the graph it belongs
/// to, and the document it was loaded from.
///
/// Quints are produced by the store and treated as immutable data; consumers
/// only filter and map collections of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quint {
    pub subject: String,
    pub predicate: String,
    pub object: String,
    pub graph: String,
    pub source: String,
}

/// Match pattern for querying quints. `None` components are wildcards.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QuintPattern {
    pub subject: Option<String>,
    pub predicate: Option<String>,
    pub object: Option<String>,
    pub graph: Option<String>,
}

impl QuintPattern {
    /// Pattern matching all statements a subject makes with one predicate
    pub fn subject_predicate(subject: &str, predicate: &str) -> Self {
        Self {
            subject: Some(subject.to_string()),
            predicate: Some(predicate.to_string()),
            object: None,
            graph: None,
        }
    }

    /// Stable key identifying this pattern and source document in a cache
    pub fn cache_key(&self, expected_source: &str) -> String {
        format!(
            "{}|{}|{}|{}@{}",
            self.subject.as_deref().unwrap_or("*"),
            self.predicate.as_deref().unwrap_or("*"),
            self.object.as_deref().unwrap_or("*"),
            self.graph.as_deref().unwrap_or("*"),
            expected_source
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subject_predicate_pattern() {
        let pattern = QuintPattern::subject_predicate(
            "https://alice.example/profile/card#me",
            "http://xmlns.com/foaf/0.1/name",
        );
        assert_eq!(
            pattern.subject.as_deref(),
            Some("https://alice.example/profile/card#me")
        );
        assert_eq!(
            pattern.predicate.as_deref(),
            Some("http://xmlns.com/foaf/0.1/name")
        );
        assert!(pattern.object.is_none());
        assert!(pattern.graph.is_none());
    }

    #[test]
    fn test_cache_key_renders_wildcards() {
        let pattern = QuintPattern::subject_predicate("s", "p");
        assert_eq!(pattern.cache_key("https://doc.example/"), "s|p|*|*@https://doc.example/");
    }

    #[test]
    fn test_cache_key_distinguishes_sources() {
        let pattern = QuintPattern::subject_predicate("s", "p");
        assert_ne!(pattern.cache_key("https://a.example/"), pattern.cache_key("https://b.example/"));
    }

    #[test]
    fn test_quint_serialization() {
        let quint = Quint {
            subject: "https://alice.example/profile/card#me".to_string(),
            predicate: "http://xmlns.com/foaf/0.1/name".to_string(),
            object: "Alice".to_string(),
            graph: "https://alice.example/profile/card".to_string(),
            source: "https://alice.example/profile/card".to_string(),
        };

        let json = serde_json::to_string(&quint).unwrap();
        assert!(json.contains("Alice"));

        let deserialized: Quint = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, quint);
    }
}
