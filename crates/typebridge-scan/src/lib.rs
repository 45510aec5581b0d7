//! typebridge-scan - Literal recovery from source declarations
//!
//! Structural introspection exposes a named string type's underlying kind but
//! not its declared constants. This crate recovers them with a second,
//! independent pass over the declaring package's source text:
//!
//! - [`PackageLocator`] finds the package directory
//! - [`lexer`] and [`decl`] tokenize files and collect `const` declarations
//! - [`LiteralExtractor`] filters constants by type and implements
//!   [`typebridge_core::LiteralSource`]

pub mod decl;
mod error;
mod extractor;
pub mod lexer;
mod locator;

pub use error::{ScanError, ScanResult};
pub use extractor::{Extraction, LiteralExtractor};
pub use locator::{PackageLocator, SearchPathLocator};
