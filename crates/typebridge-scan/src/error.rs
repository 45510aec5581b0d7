//! Error types for source scanning

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for scan operations
pub type ScanResult<T> = Result<T, ScanError>;

/// Error type for locating, reading and lexing source packages
#[derive(Error, Debug)]
pub enum ScanError {
    /// A source file or directory could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No directory holds the declaring package
    #[error("package {package} not found (searched: {})", display_paths(.searched))]
    PackageNotFound {
        package: String,
        searched: Vec<PathBuf>,
    },

    /// A source file could not be tokenized
    #[error("{path}:{line}: {message}")]
    Syntax {
        path: PathBuf,
        line: usize,
        message: String,
    },
}

impl ScanError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ScanError::Io {
            path: path.into(),
            source,
        }
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    if paths.is_empty() {
        return "no source roots configured".to_string();
    }
    paths
        .iter()
        .map(|path| path.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
