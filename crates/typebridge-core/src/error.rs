//! Error types for the core model

use crate::source::TypeKey;
use thiserror::Error;

/// Result type alias for core operations
pub type CoreResult<T> = Result<T, CoreError>;

/// Boxed error used at trait seams implemented by other crates
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Error type for snapshot loading, tag parsing and configuration
#[derive(Error, Debug)]
pub enum CoreError {
    /// I/O error while reading a snapshot or configuration file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot JSON could not be parsed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration TOML could not be parsed
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Snapshot parsed but is not consistent
    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(String),

    /// A type key is referenced but not present in the snapshot
    #[error("unknown source type: {0}")]
    UnknownType(TypeKey),

    /// Configuration parsed but failed validation
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A struct tag could not be parsed
    #[error("invalid tag `{tag}`: {reason}")]
    InvalidTag { tag: String, reason: String },
}
