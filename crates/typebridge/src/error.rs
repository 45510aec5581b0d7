//! Pipeline error type

use thiserror::Error;
use typebridge_core::{CoreError, TypeKey};
use typebridge_emit::EmitError;
use typebridge_reflect::ReflectError;
use typebridge_scan::ScanError;

/// Result type alias for pipeline operations
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Any fatal failure of a generation run
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error(transparent)]
    Reflect(#[from] ReflectError),

    #[error(transparent)]
    Emit(#[from] EmitError),

    /// A configured root cannot be reflected
    #[error("invalid root {key}: {reason}")]
    InvalidRoot { key: TypeKey, reason: String },
}
