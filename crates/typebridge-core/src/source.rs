//! Source type model.
//!
//! The reflector does not run inside the source language, so structural
//! introspection is supplied as a snapshot: every named type of interest with
//! its underlying shape. Fields refer to other named types by [`TypeKey`],
//! which keeps recursive and mutually recursive declarations finite.
//!
//! # Snapshot format
//!
//! ```json
//! {
//!   "types": [
//!     {
//!       "package": "github.com/docker/docker/api/types/mount",
//!       "name": "Mount",
//!       "underlying": {
//!         "kind": "struct",
//!         "fields": [
//!           { "name": "Source", "type": { "kind": "string" }, "tag": "json:\",omitempty\"" }
//!         ]
//!       }
//!     }
//!   ]
//! }
//! ```

use crate::error::{CoreError, CoreResult};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Upper bound on named/container indirections followed while unwrapping a type.
const MAX_INDIRECTIONS: usize = 64;

/// Stable identity of a named source type: `<package path>.<Name>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeKey(String);

impl TypeKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Build a key from a package path and a declared name.
    pub fn qualified(package: &str, name: &str) -> Self {
        if package.is_empty() {
            Self(name.to_string())
        } else {
            Self(format!("{package}.{name}"))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Package path and bare name. The split point is the last `.` after the
    /// last `/`, since package paths may contain dots (`gopkg.in/yaml.v3`).
    fn split(&self) -> (&str, &str) {
        let tail_start = self.0.rfind('/').map(|i| i + 1).unwrap_or(0);
        match self.0[tail_start..].rfind('.') {
            Some(dot) => {
                let dot = tail_start + dot;
                (&self.0[..dot], &self.0[dot + 1..])
            }
            None => ("", &self.0),
        }
    }

    pub fn package(&self) -> &str {
        self.split().0
    }

    pub fn bare_name(&self) -> &str {
        self.split().1
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TypeKey {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for TypeKey {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Structural shape of a source type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SourceType {
    /// Reference to a named type in the universe.
    Named { key: TypeKey },
    Bool,
    Int,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Uintptr,
    Float32,
    Float64,
    Complex64,
    Complex128,
    String,
    UnsafePointer,
    Array { len: usize, elem: Box<SourceType> },
    Slice { elem: Box<SourceType> },
    Map {
        key: Box<SourceType>,
        value: Box<SourceType>,
    },
    Pointer { elem: Box<SourceType> },
    Chan { elem: Box<SourceType> },
    /// Struct shape. As a field type this is a nameless inline struct.
    Struct {
        #[serde(default)]
        fields: Vec<SourceField>,
    },
    Interface,
    Func,
}

impl SourceType {
    pub fn named(key: impl Into<TypeKey>) -> Self {
        SourceType::Named { key: key.into() }
    }

    pub fn slice(elem: SourceType) -> Self {
        SourceType::Slice {
            elem: Box::new(elem),
        }
    }

    pub fn array(len: usize, elem: SourceType) -> Self {
        SourceType::Array {
            len,
            elem: Box::new(elem),
        }
    }

    pub fn map(key: SourceType, value: SourceType) -> Self {
        SourceType::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    pub fn pointer(elem: SourceType) -> Self {
        SourceType::Pointer {
            elem: Box::new(elem),
        }
    }

    pub fn structure(fields: Vec<SourceField>) -> Self {
        SourceType::Struct { fields }
    }

    /// The named key, if this is a reference to a named type.
    pub fn key(&self) -> Option<&TypeKey> {
        match self {
            SourceType::Named { key } => Some(key),
            _ => None,
        }
    }

    /// Primitive kind of this shape, if it is one of the fixed primitives.
    pub fn primitive(&self) -> Option<PrimitiveKind> {
        let kind = match self {
            SourceType::Bool => PrimitiveKind::Bool,
            SourceType::Int => PrimitiveKind::Int,
            SourceType::Int8 => PrimitiveKind::Int8,
            SourceType::Int16 => PrimitiveKind::Int16,
            SourceType::Int32 => PrimitiveKind::Int32,
            SourceType::Int64 => PrimitiveKind::Int64,
            SourceType::Uint => PrimitiveKind::Uint,
            SourceType::Uint8 => PrimitiveKind::Uint8,
            SourceType::Uint16 => PrimitiveKind::Uint16,
            SourceType::Uint32 => PrimitiveKind::Uint32,
            SourceType::Uint64 => PrimitiveKind::Uint64,
            SourceType::Float32 => PrimitiveKind::Float32,
            SourceType::Float64 => PrimitiveKind::Float64,
            SourceType::String => PrimitiveKind::String,
            _ => return None,
        };
        Some(kind)
    }

    /// Whether values of this shape are reference-like in the source model
    /// (pointer, slice, map or struct) and therefore nullable in the target.
    /// Fixed-size arrays cannot be nil.
    pub fn is_reference_like(&self) -> bool {
        matches!(
            self,
            SourceType::Pointer { .. }
                | SourceType::Slice { .. }
                | SourceType::Map { .. }
                | SourceType::Struct { .. }
        )
    }

    /// Short kind label used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            SourceType::Named { .. } => "named",
            SourceType::Bool => "bool",
            SourceType::Int => "int",
            SourceType::Int8 => "int8",
            SourceType::Int16 => "int16",
            SourceType::Int32 => "int32",
            SourceType::Int64 => "int64",
            SourceType::Uint => "uint",
            SourceType::Uint8 => "uint8",
            SourceType::Uint16 => "uint16",
            SourceType::Uint32 => "uint32",
            SourceType::Uint64 => "uint64",
            SourceType::Uintptr => "uintptr",
            SourceType::Float32 => "float32",
            SourceType::Float64 => "float64",
            SourceType::Complex64 => "complex64",
            SourceType::Complex128 => "complex128",
            SourceType::String => "string",
            SourceType::UnsafePointer => "unsafe_pointer",
            SourceType::Array { .. } => "array",
            SourceType::Slice { .. } => "slice",
            SourceType::Map { .. } => "map",
            SourceType::Pointer { .. } => "pointer",
            SourceType::Chan { .. } => "chan",
            SourceType::Struct { .. } => "struct",
            SourceType::Interface => "interface",
            SourceType::Func => "func",
        }
    }
}

/// Fixed-width primitive kinds with a one-to-one target mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimitiveKind {
    Bool,
    Int,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Float32,
    Float64,
    String,
}

impl PrimitiveKind {
    pub const ALL: [PrimitiveKind; 14] = [
        PrimitiveKind::Bool,
        PrimitiveKind::Int,
        PrimitiveKind::Int8,
        PrimitiveKind::Int16,
        PrimitiveKind::Int32,
        PrimitiveKind::Int64,
        PrimitiveKind::Uint,
        PrimitiveKind::Uint8,
        PrimitiveKind::Uint16,
        PrimitiveKind::Uint32,
        PrimitiveKind::Uint64,
        PrimitiveKind::Float32,
        PrimitiveKind::Float64,
        PrimitiveKind::String,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PrimitiveKind::Bool => "bool",
            PrimitiveKind::Int => "int",
            PrimitiveKind::Int8 => "int8",
            PrimitiveKind::Int16 => "int16",
            PrimitiveKind::Int32 => "int32",
            PrimitiveKind::Int64 => "int64",
            PrimitiveKind::Uint => "uint",
            PrimitiveKind::Uint8 => "uint8",
            PrimitiveKind::Uint16 => "uint16",
            PrimitiveKind::Uint32 => "uint32",
            PrimitiveKind::Uint64 => "uint64",
            PrimitiveKind::Float32 => "float32",
            PrimitiveKind::Float64 => "float64",
            PrimitiveKind::String => "string",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == name)
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A declared struct field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceField {
    pub name: String,

    #[serde(rename = "type")]
    pub ty: SourceType,

    /// Raw struct tag, e.g. `json:"id,omitempty"`.
    #[serde(default)]
    pub tag: String,

    /// Embedded (anonymous) member.
    #[serde(default)]
    pub embedded: bool,
}

impl SourceField {
    pub fn new(name: impl Into<String>, ty: SourceType) -> Self {
        Self {
            name: name.into(),
            ty,
            tag: String::new(),
            embedded: false,
        }
    }

    /// Embedded field; its declared name is the embedded type's bare name.
    pub fn embedded(ty: SourceType, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty,
            tag: String::new(),
            embedded: true,
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }
}

/// A named source type declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedType {
    /// Package path, empty for builtin types.
    #[serde(default)]
    pub package: String,

    /// Declared package name when it differs from the last path segment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_name: Option<String>,

    pub name: String,

    pub underlying: SourceType,
}

impl NamedType {
    pub fn new(package: impl Into<String>, name: impl Into<String>, underlying: SourceType) -> Self {
        Self {
            package: package.into(),
            package_name: None,
            name: name.into(),
            underlying,
        }
    }

    pub fn with_package_name(mut self, package_name: impl Into<String>) -> Self {
        self.package_name = Some(package_name.into());
        self
    }

    pub fn key(&self) -> TypeKey {
        TypeKey::qualified(&self.package, &self.name)
    }

    /// Package clause name: the declared one, else the last path segment.
    pub fn package_name(&self) -> &str {
        match &self.package_name {
            Some(name) => name,
            None => self.package.rsplit('/').next().unwrap_or_default(),
        }
    }

    /// Display title in the source language's own notation (`mount.Mount`).
    pub fn title(&self) -> String {
        let package = self.package_name();
        if package.is_empty() {
            self.name.clone()
        } else {
            format!("{package}.{}", self.name)
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Snapshot {
    types: Vec<NamedType>,
}

/// All named types known to a generation run, keyed by [`TypeKey`].
#[derive(Debug, Clone, Default)]
pub struct TypeUniverse {
    types: IndexMap<TypeKey, NamedType>,
}

impl TypeUniverse {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a snapshot from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&content)
    }

    /// Parse a snapshot from JSON text
    pub fn from_json(content: &str) -> CoreResult<Self> {
        let snapshot: Snapshot = serde_json::from_str(content)?;

        let mut universe = Self::new();
        for named in snapshot.types {
            let key = named.key();
            if universe.insert(named).is_some() {
                return Err(CoreError::InvalidSnapshot(format!(
                    "type {key} is declared more than once"
                )));
            }
        }

        Ok(universe)
    }

    pub fn to_json(&self) -> CoreResult<String> {
        let snapshot = Snapshot {
            types: self.types.values().cloned().collect(),
        };
        Ok(serde_json::to_string_pretty(&snapshot)?)
    }

    /// Insert a declaration, returning the previous one under the same key.
    pub fn insert(&mut self, named: NamedType) -> Option<NamedType> {
        self.types.insert(named.key(), named)
    }

    pub fn with(mut self, named: NamedType) -> Self {
        self.insert(named);
        self
    }

    pub fn get(&self, key: &TypeKey) -> Option<&NamedType> {
        self.types.get(key)
    }

    pub fn lookup(&self, key: &TypeKey) -> CoreResult<&NamedType> {
        self.types
            .get(key)
            .ok_or_else(|| CoreError::UnknownType(key.clone()))
    }

    pub fn contains(&self, key: &TypeKey) -> bool {
        self.types.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NamedType> {
        self.types.values()
    }

    /// Underlying shape of a type, looking through named indirections.
    pub fn underlying<'a>(&'a self, ty: &'a SourceType) -> CoreResult<&'a SourceType> {
        let mut current = ty;
        for _ in 0..MAX_INDIRECTIONS {
            match current {
                SourceType::Named { key } => current = &self.lookup(key)?.underlying,
                other => return Ok(other),
            }
        }
        Err(CoreError::InvalidSnapshot(format!(
            "named type chain starting at {} does not terminate",
            ty.kind_name()
        )))
    }

    /// Ultimate element type: strips pointer, slice, array, map and chan
    /// wrappers (including named container types) down to the base shape.
    /// A named base type is returned as its `Named` reference.
    pub fn ultimate<'a>(&'a self, ty: &'a SourceType) -> CoreResult<&'a SourceType> {
        let mut current = ty;
        for _ in 0..MAX_INDIRECTIONS {
            match self.underlying(current)? {
                SourceType::Array { elem, .. }
                | SourceType::Slice { elem }
                | SourceType::Pointer { elem }
                | SourceType::Chan { elem } => current = elem,
                SourceType::Map { value, .. } => current = value,
                _ => return Ok(current),
            }
        }
        Err(CoreError::InvalidSnapshot(format!(
            "type nesting deeper than {MAX_INDIRECTIONS} levels"
        )))
    }
}
