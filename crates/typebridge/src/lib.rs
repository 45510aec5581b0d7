//! # typebridge
//!
//! Generate Effect Schema classes from the struct types of a Go API module.
//!
//! typebridge reads a structural snapshot of the source types, reflects every
//! struct reachable from the configured roots and writes one TypeScript module
//! per type plus an index:
//! - Field names and optionality follow each field's `json` tag
//! - Named string types become literal unions recovered from the declaring
//!   package's `const` blocks
//! - Recursive types are referenced through `Schema.suspend`
//! - Every class links to its documentation anchor
//!
//! ## Quick Start
//!
//! ```toml
//! # typebridge.toml
//! [generator]
//! snapshot = "types.json"
//! output = "src/generated"
//! roots = ["github.com/moby/moby/api/types/container.InspectResponse"]
//!
//! [sources]
//! roots = ["vendor"]
//! ```
//!
//! ```ignore
//! use typebridge::prelude::*;
//!
//! let pipeline = Pipeline::load("typebridge.toml")?;
//! let report = pipeline.generate()?;
//! tracing::info!(nodes = report.nodes, "done");
//! ```
//!
//! ## Crate Structure
//!
//! This is a facade crate that re-exports from:
//! - [`typebridge_core`] - Source model, tags, tables and configuration
//! - [`typebridge_scan`] - Literal recovery from source text
//! - [`typebridge_reflect`] - Type graph traversal
//! - [`typebridge_emit`] - Code rendering, documentation links and output

mod error;
mod pipeline;

pub use error::{PipelineError, PipelineResult};
pub use pipeline::{CheckReport, GenerateReport, Pipeline};

// Re-export core types
pub use typebridge_core::{
    CONFIG_FILE, CoreError, EmbedStrategy, GeneratorConfig, Literal, NodeState, Property,
    ResolutionTables, SourceType, TypeExpression, TypeKey, TypeNode, TypeUniverse,
};

pub use typebridge_emit::{DocLinkResolver, EmitError, Emitter, PageResolver};
pub use typebridge_reflect::{ReflectError, Reflector, Registry};
pub use typebridge_scan::{Extraction, LiteralExtractor, ScanError};

/// Prelude module for convenient imports.
///
/// Use `use typebridge::prelude::*;` to import the pipeline and its reports.
pub mod prelude {
    pub use crate::{
        CheckReport, GenerateReport, GeneratorConfig, Pipeline, PipelineError, PipelineResult,
        TypeKey,
    };
}
