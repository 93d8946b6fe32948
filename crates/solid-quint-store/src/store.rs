//! Store collaborator contract

use std::fmt;

use async_trait::async_trait;

use crate::types::{Quint, QuintPattern};

/// Why a fetch could not return an authoritative result.
///
/// A failure may still carry whatever the store managed to collect before
/// failing. Callers that can tolerate degraded data substitute that partial
/// result; a failure without one is terminal for the operation that issued
/// the fetch.
#[derive(Debug, Clone)]
pub struct FetchFailure {
    /// Statements collected before the failure, if any
    pub partial: Option<Vec<Quint>>,
    pub message: String,
}

impl FetchFailure {
    /// A failure that still yielded a usable partial result
    pub fn degraded(partial: Vec<Quint>, message: impl Into<String>) -> Self {
        Self {
            partial: Some(partial),
            message: message.into(),
        }
    }

    /// A failure with nothing to fall back on
    pub fn total(message: impl Into<String>) -> Self {
        Self {
            partial: None,
            message: message.into(),
        }
    }
}

impl fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.partial {
            Some(partial) => write!(
                f,
                "fetch degraded ({} partial statements): {}",
                partial.len(),
                self.message
            ),
            None => write!(f, "fetch failed: {}", self.message),
        }
    }
}

impl std::error::Error for FetchFailure {}

pub type FetchResult = Result<Vec<Quint>, FetchFailure>;

/// Executable store of quints with web-backed lazy fetching.
///
/// `fetch_from_web` resolves a pattern against the store, pulling the
/// subject's document over the network when it is not held yet.
/// `expected_source` restricts the result to statements loaded from that
/// document, so statements another document makes about the subject are not
/// trusted.
#[async_trait]
pub trait QuintStore: Send + Sync {
    async fn fetch_from_web(&self, pattern: QuintPattern, expected_source: &str) -> FetchResult;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_failure_display() {
        let failure = FetchFailure::total("connection refused");
        assert_eq!(format!("{}", failure), "fetch failed: connection refused");
    }

    #[test]
    fn test_degraded_failure_display() {
        let quint = Quint {
            subject: "s".to_string(),
            predicate: "p".to_string(),
            object: "o".to_string(),
            graph: "g".to_string(),
            source: "src".to_string(),
        };
        let failure = FetchFailure::degraded(vec![quint], "timed out");
        assert_eq!(
            format!("{}", failure),
            "fetch degraded (1 partial statements): timed out"
        );
    }

    #[test]
    fn test_failure_is_debug() {
        let failure = FetchFailure::total("test");
        assert!(format!("{:?}", failure).contains("test"));
    }
}
