//! Error types for type graph reflection

use thiserror::Error;
use typebridge_core::{BoxError, CoreError, TypeKey};

/// Result type alias for reflection
pub type ReflectResult<T> = Result<T, ReflectError>;

/// Error type for reflection. Every variant is fatal for the run.
#[derive(Error, Debug)]
pub enum ReflectError {
    /// Snapshot lookup or other core failure
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A nameless struct shape was dispatched for registration
    #[error("unable to reflect a type with no name ({context})")]
    Nameless { context: String },

    /// Reflection returned without registering the node
    #[error("type {key} was reflected but never registered")]
    Unregistered { key: TypeKey },

    /// A type reflected as a node is not struct-shaped
    #[error("cannot reflect {key}: underlying kind is {kind}, expected struct")]
    NotAStruct { key: TypeKey, kind: &'static str },

    /// A shape with no target representation
    #[error("cannot convert type {kind} ({context})")]
    UnsupportedKind { context: String, kind: &'static str },

    /// A field's struct tag could not be parsed
    #[error("invalid tag on {context}: {source}")]
    InvalidTag {
        context: String,
        #[source]
        source: CoreError,
    },

    /// An embedded member's ultimate type is not a struct
    #[error("embedded member {context} has kind {kind}, expected struct")]
    EmbeddedNotStruct { context: String, kind: &'static str },

    /// Embedded type produced no node after reflection
    #[error("failed to reflect {embedded} for embedded member {context}")]
    MissingEmbeddedNode { context: String, embedded: TypeKey },

    /// Embedded node read before its properties were complete
    #[error("embedded member {context} refers to {embedded}, which is still {state}")]
    IncompleteNode {
        context: String,
        embedded: TypeKey,
        state: String,
    },

    /// Literal extraction failed for a named string type
    #[error("literal extraction failed for {key}: {source}")]
    Literals {
        key: TypeKey,
        #[source]
        source: BoxError,
    },

    /// Two source types resolved to the same target name
    #[error("target name {name} is used by both {first} and {second}; add a rename entry")]
    NameCollision {
        name: String,
        first: TypeKey,
        second: TypeKey,
    },
}
