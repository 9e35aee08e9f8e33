use thiserror::Error;

use crate::representations::MediaType;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The input does not match the grammar at `position` (a byte offset).
    #[error("Syntax error at position {position}: expected {}", .expected.join(" or "))]
    SyntaxError {
        position: usize,
        expected: Vec<String>,
    },
    /// The parse tree contained a production its walker has no role for.
    #[error("Internal inconsistency: {0}")]
    InternalInconsistency(String),
}

impl ParseError {
    pub fn position(&self) -> Option<usize> {
        match self {
            ParseError::SyntaxError { position, .. } => Some(*position),
            ParseError::InternalInconsistency(_) => None,
        }
    }

    pub(crate) fn shifted(self, offset: usize) -> Self {
        match self {
            ParseError::SyntaxError { position, expected } => ParseError::SyntaxError {
                position: position + offset,
                expected,
            },
            other => other,
        }
    }
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Query parameter {name:?} is a representation-specific entry of {media_type}")]
    ReservedEntryName { name: String, media_type: MediaType },
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}
