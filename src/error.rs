//! Error types for linedb
//!
//! Provides a unified error type for all store operations.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using LineDbError
pub type Result<T> = std::result::Result<T, LineDbError>;

/// Unified error type for linedb operations
#[derive(Debug, Error)]
pub enum LineDbError {
    // -------------------------------------------------------------------------
    // Load Errors
    // -------------------------------------------------------------------------
    /// The backing file could not be read or decoded
    #[error("cannot open linedb backing file {}: {source}", .path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: LoadSource,
    },

    // -------------------------------------------------------------------------
    // Addressing Errors
    // -------------------------------------------------------------------------
    #[error("no records in database")]
    EmptyStore,

    #[error("record number ({number}) out of bounds [{lower}, {upper}]")]
    OutOfBounds { number: i64, lower: i64, upper: i64 },

    // -------------------------------------------------------------------------
    // Persistence Errors
    // -------------------------------------------------------------------------
    /// The whole-file replace failed; memory and file are unchanged
    #[error("cannot save linedb backing file {}: {source}", .path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Underlying cause of a load failure
#[derive(Debug, Error)]
pub enum LoadSource {
    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("invalid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
}

impl LineDbError {
    /// True for `EmptyStore` and `OutOfBounds`, the errors a caller can fix
    /// by choosing another record number
    pub fn is_addressing(&self) -> bool {
        matches!(self, Self::EmptyStore | Self::OutOfBounds { .. })
    }
}
