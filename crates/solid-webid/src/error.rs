//! Error types for WebID resolution

use std::fmt;

/// Errors surfaced by WebID resolution.
///
/// Cloneable because a failed resolution is cached and replayed to every
/// caller that asks for the same WebID before the next session invalidation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebIdError {
    /// The given WebID is not a parseable URI
    InvalidUri { uri: String, message: String },
    /// The profile document could not be resolved
    Resolution { uri: String, message: String },
}

impl fmt::Display for WebIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WebIdError::InvalidUri { uri, message } => {
                write!(f, "invalid WebID {}: {}", uri, message)
            }
            WebIdError::Resolution { uri, message } => {
                write!(f, "failed to resolve WebID {}: {}", uri, message)
            }
        }
    }
}

impl std::error::Error for WebIdError {}

pub type Result<T> = std::result::Result<T, WebIdError>;
