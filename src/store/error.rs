//! Storage Errors
//!
//! Error types for loading and saving the persisted collections.

use std::path::PathBuf;

use crate::codec::CodecError;

/// Errors that can occur in the storage layer
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Filesystem failure
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A collection could not be encoded or decoded
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// Collections disagree with each other (e.g. one account number in both kinds)
    #[error("Inconsistent persisted state: {0}")]
    Inconsistent(String),

    /// Backend refused the operation
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

impl StorageError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Check if the persisted data itself is bad (as opposed to the medium)
    pub fn is_corrupt(&self) -> bool {
        matches!(self, Self::Codec(_) | Self::Inconsistent(_))
    }
}
