//! Error types for code emission

use std::path::PathBuf;
use thiserror::Error;
use typebridge_core::{BoxError, TypeKey};

/// Result type alias for emission
pub type EmitResult<T> = Result<T, EmitError>;

/// Error type for emission. Every variant aborts the run.
#[derive(Error, Debug)]
pub enum EmitError {
    /// File system failure on a path in the output directory
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Atomic rename of a finished temporary file failed
    #[error("failed to move generated file into place at {path}: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A node reached the emitter before its properties were complete
    #[error("type {key} is {state}, only complete types can be emitted")]
    IncompleteNode { key: TypeKey, state: String },

    /// A documentation page could not be fetched
    #[error("failed to fetch documentation page {url}: {source}")]
    DocFetch {
        url: String,
        #[source]
        source: BoxError,
    },

    /// The documentation page exists but has no anchor for the symbol
    #[error(
        "documentation for {package}.{symbol} not found: anchor {symbol} missing on {url}; \
         the rename table may be stale"
    )]
    MissingAnchor {
        package: String,
        symbol: String,
        url: String,
    },
}

pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> EmitError {
    EmitError::Io {
        path: path.into(),
        source,
    }
}
