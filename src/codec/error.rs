//! Codec Errors

use super::Collection;

/// Errors raised while turning records into lines and back
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// A line is not valid JSON for the collection's record shape
    #[error("Malformed record in {collection} at line {line}: {source}")]
    Malformed {
        collection: Collection,
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    /// A line parsed but breaks a domain rule (e.g. negative saving balance)
    #[error("Invalid record in {collection} at line {line}: {reason}")]
    InvalidRecord {
        collection: Collection,
        line: usize,
        reason: String,
    },

    #[error("Failed to encode {collection}: {source}")]
    Encode {
        collection: Collection,
        #[source]
        source: serde_json::Error,
    },
}

impl CodecError {
    /// Collection the failing record belongs to
    pub fn collection(&self) -> Collection {
        match self {
            CodecError::Malformed { collection, .. }
            | CodecError::InvalidRecord { collection, .. }
            | CodecError::Encode { collection, .. } => *collection,
        }
    }

    /// 1-based line number, if the error points at one
    pub fn line(&self) -> Option<usize> {
        match self {
            CodecError::Malformed { line, .. } | CodecError::InvalidRecord { line, .. } => {
                Some(*line)
            }
            CodecError::Encode { .. } => None,
        }
    }
}
