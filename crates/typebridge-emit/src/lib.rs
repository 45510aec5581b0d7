//! typebridge-emit - Effect Schema code emitter
//!
//! This crate provides:
//! - [`Emitter`]: renders every registry node as a class module plus an index
//! - [`DocLinkResolver`] and [`PageResolver`] for documentation links
//! - [`OutputWriter`]: cleans the output directory and writes files atomically

mod docs;
mod emitter;
mod error;
mod imports;
mod render;
mod writer;

pub use docs::{CacheDirFetcher, DocLinkResolver, HttpFetcher, PageFetcher, PageResolver, has_anchor};
pub use emitter::Emitter;
pub use error::{EmitError, EmitResult};
pub use imports::{module_extension, referenced_modules, unqualify_self};
pub use render::{SCHEMA_IMPORT, render_class, render_index};
pub use writer::{OutputWriter, RenderedFile, WriteSummary};
