//! Reflected output model: nodes, properties and type expressions

use crate::source::TypeKey;
use crate::syntax;
use crate::tags::Location;

/// Traversal state of a [`TypeNode`].
///
/// A node is registered as `InProgress` before its fields are walked, so a
/// recursive reference met during the walk resolves to the same node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeState {
    NotStarted,
    InProgress,
    Complete,
}

impl std::fmt::Display for NodeState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeState::NotStarted => write!(f, "not started"),
            NodeState::InProgress => write!(f, "in progress"),
            NodeState::Complete => write!(f, "complete"),
        }
    }
}

/// Target representation of a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeExpression {
    /// Target-language type syntax.
    pub representation: String,

    /// Whether the value may be null at runtime.
    pub nullable: bool,
}

impl TypeExpression {
    pub fn new(representation: impl Into<String>, nullable: bool) -> Self {
        Self {
            representation: representation.into(),
            nullable,
        }
    }

    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    /// Spelling of this expression when nested inside another one, where
    /// nullability can only be expressed by wrapping.
    pub fn nested(&self) -> String {
        if self.nullable {
            syntax::null_or(&self.representation)
        } else {
            self.representation.clone()
        }
    }
}

/// One field of a reflected type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    /// Wire name (tag override or declared name).
    pub name: String,

    pub ty: TypeExpression,

    /// Tagged omit-on-empty.
    pub optional: bool,

    /// Embedded member rendered as a spread of the embedded type's fields.
    pub anonymous: bool,

    /// Transport location from the `param` tag.
    pub location: Option<Location>,

    /// Default value from the `param` tag, as source text.
    pub default_value: Option<String>,
}

impl Property {
    pub fn new(name: impl Into<String>, ty: TypeExpression) -> Self {
        Self {
            name: name.into(),
            ty,
            optional: false,
            anonymous: false,
            location: None,
            default_value: None,
        }
    }

    pub fn optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    /// Spread of an embedded node's fields.
    pub fn spread(target_name: &str) -> Self {
        Self {
            name: target_name.to_string(),
            ty: syntax::qualified_ref(target_name),
            optional: false,
            anonymous: true,
            location: None,
            default_value: None,
        }
    }
}

/// A reflected named source type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeNode {
    /// Registry identity.
    pub source_key: TypeKey,

    /// Name used in emitted code.
    pub target_name: String,

    /// Source display name, e.g. `mount.Mount`.
    pub source_title: String,

    pub state: NodeState,

    properties: Vec<Property>,
}

impl TypeNode {
    pub fn new(
        source_key: TypeKey,
        target_name: impl Into<String>,
        source_title: impl Into<String>,
    ) -> Self {
        Self {
            source_key,
            target_name: target_name.into(),
            source_title: source_title.into(),
            state: NodeState::NotStarted,
            properties: Vec::new(),
        }
    }

    /// Package path of the source type.
    pub fn package(&self) -> &str {
        self.source_key.package()
    }

    /// Declared name of the source type.
    pub fn source_name(&self) -> &str {
        self.source_key.bare_name()
    }

    pub fn begin(&mut self) {
        self.state = NodeState::InProgress;
    }

    pub fn complete(&mut self) {
        self.state = NodeState::Complete;
    }

    pub fn is_complete(&self) -> bool {
        self.state == NodeState::Complete
    }

    pub fn push(&mut self, property: Property) {
        debug_assert!(
            !self.is_complete(),
            "property pushed onto completed node {}",
            self.source_key
        );
        self.properties.push(property);
    }

    /// Properties, only once the node is complete.
    pub fn completed_properties(&self) -> Option<&[Property]> {
        self.is_complete().then_some(self.properties.as_slice())
    }

    /// Properties regardless of state.
    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    /// Replace the property list while the node is still being built.
    pub fn set_properties(&mut self, properties: Vec<Property>) {
        debug_assert!(!self.is_complete());
        self.properties = properties;
    }

    /// Rewrite the type text of every property except spreads.
    pub fn rewrite_types(&mut self, mut rewrite: impl FnMut(&str) -> String) {
        for property in self.properties.iter_mut().filter(|p| !p.anonymous) {
            property.ty.representation = rewrite(&property.ty.representation);
        }
    }
}
