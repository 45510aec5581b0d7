//! Rename, replacement and primitive lookup tables
//!
//! All three tables are keyed by stable identities ([`TypeKey`] or
//! [`PrimitiveKind`]) and handed to the reflector as configuration.

use crate::source::{PrimitiveKind, TypeKey};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// How embedded struct members are represented in the parent type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmbedStrategy {
    /// Promote the embedded type's properties into the parent's list.
    #[default]
    Flatten,

    /// Spread the embedded schema's fields (`...Base.Base.fields`).
    Spread,
}

/// Target expression for one primitive kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrimitiveMapping {
    pub schema: String,

    #[serde(default)]
    pub nullable: bool,
}

impl PrimitiveMapping {
    pub fn new(schema: impl Into<String>, nullable: bool) -> Self {
        Self {
            schema: schema.into(),
            nullable,
        }
    }
}

/// Hand-maintained target expression used instead of reflecting a type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Replacement {
    pub schema: String,
}

impl Replacement {
    pub fn new(schema: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
        }
    }
}

/// Lookup tables consulted during reflection.
#[derive(Debug, Clone)]
pub struct ResolutionTables {
    renames: IndexMap<TypeKey, String>,
    replacements: IndexMap<TypeKey, Replacement>,
    primitives: IndexMap<PrimitiveKind, PrimitiveMapping>,
}

impl Default for ResolutionTables {
    fn default() -> Self {
        Self::new()
    }
}

impl ResolutionTables {
    /// Empty rename and replacement tables with the default primitive table.
    pub fn new() -> Self {
        Self {
            renames: IndexMap::new(),
            replacements: IndexMap::new(),
            primitives: default_primitives(),
        }
    }

    pub fn with_rename(mut self, key: impl Into<TypeKey>, target: impl Into<String>) -> Self {
        self.renames.insert(key.into(), target.into());
        self
    }

    pub fn with_replacement(mut self, key: impl Into<TypeKey>, schema: impl Into<String>) -> Self {
        self.replacements.insert(key.into(), Replacement::new(schema));
        self
    }

    pub fn with_primitive(mut self, kind: PrimitiveKind, mapping: PrimitiveMapping) -> Self {
        self.primitives.insert(kind, mapping);
        self
    }

    /// Disambiguation override for `key`, if any.
    pub fn rename(&self, key: &TypeKey) -> Option<&str> {
        self.renames.get(key).map(String::as_str)
    }

    /// Name used in emitted code: the override, else the bare name.
    pub fn target_name<'a>(&'a self, key: &'a TypeKey) -> &'a str {
        self.rename(key).unwrap_or_else(|| key.bare_name())
    }

    pub fn replacement(&self, key: &TypeKey) -> Option<&Replacement> {
        self.replacements.get(key)
    }

    pub fn primitive(&self, kind: PrimitiveKind) -> Option<&PrimitiveMapping> {
        self.primitives.get(&kind)
    }

    pub fn renames(&self) -> impl Iterator<Item = (&TypeKey, &str)> {
        self.renames.iter().map(|(key, name)| (key, name.as_str()))
    }

    pub fn replacements(&self) -> impl Iterator<Item = (&TypeKey, &Replacement)> {
        self.replacements.iter()
    }
}

fn default_primitives() -> IndexMap<PrimitiveKind, PrimitiveMapping> {
    use PrimitiveKind::*;

    [
        (Float32, "Schema.Number"),
        (Float64, "Schema.Number"),
        (String, "Schema.String"),
        (Bool, "Schema.Boolean"),
        (Int, "MobySchemas.Int64"),
        (Int8, "MobySchemas.Int8"),
        (Int16, "MobySchemas.Int16"),
        (Int32, "MobySchemas.Int32"),
        (Int64, "MobySchemas.Int64"),
        (Uint, "MobySchemas.UInt64"),
        (Uint8, "MobySchemas.UInt8"),
        (Uint16, "MobySchemas.UInt16"),
        (Uint32, "MobySchemas.UInt32"),
        (Uint64, "MobySchemas.UInt64"),
    ]
    .into_iter()
    .map(|(kind, schema)| (kind, PrimitiveMapping::new(schema, false)))
    .collect()
}
