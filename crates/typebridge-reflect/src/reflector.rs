//! Type graph reflection.
//!
//! [`Reflector`] turns named struct types into [`TypeNode`]s, discovering
//! every struct reachable from their fields. All traversal state lives in the
//! reflector, so independent runs never share a registry.
//!
//! A node is inserted as `InProgress` before its fields are walked. A field
//! that leads back to a node still in progress resolves to that node instead
//! of recursing, which keeps self-referential and mutually recursive types
//! finite.

use crate::error::{ReflectError, ReflectResult};
use crate::registry::Registry;
use std::collections::{HashMap, HashSet};
use tracing::{debug, info};
use typebridge_core::{
    EmbedStrategy, FieldTags, LiteralSource, Property, ResolutionTables, SourceField, SourceType,
    TypeExpression, TypeKey, TypeNode, TypeUniverse,
};

/// Traversal context for one generation run.
pub struct Reflector<'a> {
    pub(crate) universe: &'a TypeUniverse,
    pub(crate) tables: &'a ResolutionTables,
    pub(crate) literals: &'a mut dyn LiteralSource,
    embed: EmbedStrategy,
    pub(crate) registry: Registry,
    /// Mapped named string types, so each is extracted once per run.
    pub(crate) named_strings: HashMap<TypeKey, TypeExpression>,
}

impl<'a> Reflector<'a> {
    pub fn new(
        universe: &'a TypeUniverse,
        tables: &'a ResolutionTables,
        literals: &'a mut dyn LiteralSource,
    ) -> Self {
        Self {
            universe,
            tables,
            literals,
            embed: EmbedStrategy::default(),
            registry: Registry::new(),
            named_strings: HashMap::new(),
        }
    }

    pub fn with_embed(mut self, embed: EmbedStrategy) -> Self {
        self.embed = embed;
        self
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Reflect every root in order.
    pub fn reflect_all(&mut self, roots: &[TypeKey]) -> ReflectResult<()> {
        for root in roots {
            self.reflect(root)?;
        }
        Ok(())
    }

    /// Reflect a named struct type and everything reachable from it.
    ///
    /// Idempotent: a key that is replaced, complete or in progress returns
    /// immediately.
    pub fn reflect(&mut self, key: &TypeKey) -> ReflectResult<()> {
        if self.tables.replacement(key).is_some() {
            debug!(key = %key, "Replaced type, not reflected");
            return Ok(());
        }
        if self.registry.contains(key) {
            return Ok(());
        }

        let universe = self.universe;
        let named = universe.lookup(key)?;
        let fields = match universe.underlying(&named.underlying)? {
            SourceType::Struct { fields } => fields,
            other => {
                return Err(ReflectError::NotAStruct {
                    key: key.clone(),
                    kind: other.kind_name(),
                });
            }
        };

        let target_name = self.tables.target_name(key).to_string();
        let mut node = TypeNode::new(key.clone(), target_name, named.title());
        node.begin();
        self.registry.insert(node);
        debug!(key = %key, title = %named.title(), "Reflecting type");

        let properties = self.struct_properties(&named.title(), fields)?;

        if let Some(node) = self.registry.get_mut(key) {
            node.set_properties(properties);
            node.complete();
        }
        Ok(())
    }

    /// Reflect a source type given by shape. Only named types can become
    /// nodes; a nameless struct must be rendered inline by its user.
    pub fn reflect_type(&mut self, ty: &SourceType) -> ReflectResult<()> {
        match ty {
            SourceType::Named { key } => self.reflect(key),
            other => Err(ReflectError::Nameless {
                context: format!("{} shape", other.kind_name()),
            }),
        }
    }

    /// Check target name uniqueness, make references within cycles lazy and
    /// hand over the registry.
    pub fn finish(mut self) -> ReflectResult<Registry> {
        self.registry.check_unique_names()?;
        let cyclic = self.registry.suspend_cycles();
        info!(nodes = self.registry.len(), cyclic, "Reflection complete");
        Ok(self.registry)
    }

    /// Properties of a struct shape, in declaration order. `owner` names the
    /// struct in diagnostics.
    pub(crate) fn struct_properties(
        &mut self,
        owner: &str,
        fields: &[SourceField],
    ) -> ReflectResult<Vec<Property>> {
        let mut list = PropertyList::default();

        for field in fields {
            let context = format!("{owner}.{}", field.name);
            let tags = FieldTags::parse(&field.tag).map_err(|source| ReflectError::InvalidTag {
                context: context.clone(),
                source,
            })?;
            if tags.skip() {
                debug!(field = %context, "Skipping field");
                continue;
            }

            // A tagged name turns an embedded member into a regular field.
            if field.embedded && tags.json.name.is_none() {
                self.embedded(&context, &field.ty, &mut list)?;
                continue;
            }

            let ty = self.map_kind(&field.ty, &context)?;
            let mut property = Property::new(tags.wire_name(&field.name), ty)
                .optional(tags.is_optional());
            if let Some(param) = &tags.param {
                property.location = Some(param.location);
                property.default_value = param.default.clone();
            }

            debug!(field = %context, ty = %property.ty.representation, "Mapped field");
            list.push_direct(property);
        }

        Ok(list.into_properties())
    }

    fn embedded(
        &mut self,
        context: &str,
        ty: &SourceType,
        list: &mut PropertyList,
    ) -> ReflectResult<()> {
        let universe = self.universe;
        let ultimate = universe.ultimate(ty)?;
        let key = match ultimate {
            SourceType::Named { key } => key,
            other => {
                return Err(ReflectError::EmbeddedNotStruct {
                    context: context.to_string(),
                    kind: other.kind_name(),
                });
            }
        };

        let shape = universe.underlying(ultimate)?;
        if !matches!(shape, SourceType::Struct { .. }) {
            return Err(ReflectError::EmbeddedNotStruct {
                context: context.to_string(),
                kind: shape.kind_name(),
            });
        }

        self.reflect(key)?;
        let node = self
            .registry
            .get(key)
            .ok_or_else(|| ReflectError::MissingEmbeddedNode {
                context: context.to_string(),
                embedded: key.clone(),
            })?;

        match self.embed {
            EmbedStrategy::Spread => {
                list.push_direct(Property::spread(&node.target_name));
            }
            EmbedStrategy::Flatten => {
                let promoted =
                    node.completed_properties()
                        .ok_or_else(|| ReflectError::IncompleteNode {
                            context: context.to_string(),
                            embedded: key.clone(),
                            state: node.state.to_string(),
                        })?;
                for property in promoted {
                    list.push_promoted(property.clone());
                }
            }
        }

        debug!(field = %context, embedded = %key, strategy = ?self.embed, "Embedded member");
        Ok(())
    }
}

/// Property list under construction. A direct field shadows a promoted
/// field of the same name; the first promoted field of a name wins over
/// later ones.
#[derive(Default)]
struct PropertyList {
    properties: Vec<Property>,
    promoted: HashSet<String>,
}

impl PropertyList {
    fn push_direct(&mut self, property: Property) {
        let shadowed = self
            .properties
            .iter()
            .position(|existing| !existing.anonymous && existing.name == property.name);
        match shadowed {
            Some(index) if self.promoted.remove(&property.name) => {
                self.properties[index] = property;
            }
            _ => self.properties.push(property),
        }
    }

    fn push_promoted(&mut self, property: Property) {
        let taken = self
            .properties
            .iter()
            .any(|existing| !existing.anonymous && existing.name == property.name);
        if !taken {
            self.promoted.insert(property.name.clone());
            self.properties.push(property);
        }
    }

    fn into_properties(self) -> Vec<Property> {
        self.properties
    }
}
