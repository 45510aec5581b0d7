//! typebridge-core - Source type model, tags, tables and target syntax
//!
//! This crate provides the shared vocabulary of the generator:
//! - [`TypeUniverse`], [`NamedType`] and [`SourceType`] describing the source type graph
//! - [`TypeNode`], [`Property`] and [`TypeExpression`] describing reflected output
//! - [`FieldTags`] for per-field serialization annotations
//! - [`ResolutionTables`] for rename, replacement and primitive lookups
//! - [`GeneratorConfig`] for `typebridge.toml`
//! - [`syntax`] helpers that spell target expressions

mod config;
mod error;
mod literal;
mod model;
mod source;
mod tables;
mod tags;

pub mod syntax;

pub use config::{
    CONFIG_FILE, DocsSection, GeneratorConfig, GeneratorSection, NamespaceImport, SourcesSection,
};
pub use error::{BoxError, CoreError, CoreResult};
pub use literal::{Literal, LiteralSource, NoLiterals};
pub use model::{NodeState, Property, TypeExpression, TypeNode};
pub use source::{NamedType, PrimitiveKind, SourceField, SourceType, TypeKey, TypeUniverse};
pub use tables::{EmbedStrategy, PrimitiveMapping, Replacement, ResolutionTables};
pub use tags::{FieldTags, JsonTag, Location, ParamTag, lookup_tag, unquote};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        CoreError, CoreResult, EmbedStrategy, FieldTags, GeneratorConfig, Literal, LiteralSource,
        NamedType, NodeState, Property, ResolutionTables, SourceField, SourceType, TypeExpression,
        TypeKey, TypeNode, TypeUniverse,
    };
}
