//! typebridge-logging - Tracing setup and run diagnostics
//!
//! This crate provides:
//! - [`init_logging`] installing a stderr subscriber with an `EnvFilter`
//! - [`DiagnosticLayer`] recording every warning into a [`DiagnosticLog`]
//! - [`LogLevel`] for command-line level selection

mod diagnostics;
mod layer;
mod level;

pub use diagnostics::{Diagnostic, DiagnosticLog};
pub use layer::{DiagnosticLayer, env_filter, init_logging};
pub use level::LogLevel;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{Diagnostic, DiagnosticLayer, DiagnosticLog, LogLevel, init_logging};
}
