//! Kind mapping: source shape to target type expression

use crate::error::{ReflectError, ReflectResult};
use crate::reflector::Reflector;
use tracing::warn;
use typebridge_core::syntax;
use typebridge_core::{NamedType, PrimitiveKind, SourceType, TypeExpression, TypeKey};

impl Reflector<'_> {
    /// Map a field's shape to its target expression, reflecting any named
    /// struct it reaches. `context` names the field in diagnostics.
    pub fn map_kind(&mut self, ty: &SourceType, context: &str) -> ReflectResult<TypeExpression> {
        match ty {
            SourceType::Named { key } => self.map_named(key, context),

            SourceType::Struct { fields } => {
                let properties = self.struct_properties(context, fields)?;
                Ok(syntax::inline_struct(&properties))
            }

            SourceType::Slice { elem } => Ok(syntax::array_of(&self.map_kind(elem, context)?)),

            SourceType::Array { len, elem } => Ok(syntax::fixed_array_of(
                *len,
                &self.map_kind(elem, context)?,
            )),

            SourceType::Map { key, value } => {
                let key = self.map_kind(key, context)?;
                let value = self.map_kind(value, context)?;
                Ok(syntax::record_of(&key, &value))
            }

            SourceType::Pointer { elem } => Ok(self.map_kind(elem, context)?.with_nullable(true)),

            SourceType::Interface => Ok(syntax::open_object()),

            SourceType::Func | SourceType::Uintptr | SourceType::UnsafePointer => {
                Ok(syntax::never())
            }

            other => match other.primitive() {
                Some(kind) => self.map_primitive(kind, context),
                None => Err(ReflectError::UnsupportedKind {
                    context: context.to_string(),
                    kind: other.kind_name(),
                }),
            },
        }
    }

    fn map_named(&mut self, key: &TypeKey, context: &str) -> ReflectResult<TypeExpression> {
        let universe = self.universe;

        if let Some(replacement) = self.tables.replacement(key) {
            let reference_like = match universe.get(key) {
                Some(named) => universe.underlying(&named.underlying)?.is_reference_like(),
                None => false,
            };
            return Ok(TypeExpression::new(
                replacement.schema.as_str(),
                reference_like,
            ));
        }

        let named = universe.lookup(key)?;
        match universe.underlying(&named.underlying)? {
            SourceType::Struct { .. } => {
                // References inside a cycle are made lazy once the whole
                // graph is known; see `Registry::suspend_cycles`.
                self.reflect(key)?;
                let node = self
                    .registry
                    .get(key)
                    .ok_or_else(|| ReflectError::Unregistered { key: key.clone() })?;
                Ok(syntax::qualified_ref(&node.target_name))
            }

            SourceType::String => {
                if let Some(expr) = self.named_strings.get(key) {
                    return Ok(expr.clone());
                }
                let expr = self.map_named_string(key, named, context)?;
                self.named_strings.insert(key.clone(), expr.clone());
                Ok(expr)
            }

            underlying => self.map_kind(underlying, context),
        }
    }

    /// Literal union of a named string type's constants, or the string
    /// primitive when none can be recovered.
    fn map_named_string(
        &mut self,
        key: &TypeKey,
        named: &NamedType,
        context: &str,
    ) -> ReflectResult<TypeExpression> {
        let literals = self
            .literals
            .extract_literals(&named.package, named.package_name(), &named.name)
            .map_err(|source| ReflectError::Literals {
                key: key.clone(),
                source,
            })?;

        if literals.is_empty() {
            warn!(
                key = %key,
                field = %context,
                "No literals found for named string type, falling back to the string primitive"
            );
            return self.map_primitive(PrimitiveKind::String, context);
        }

        let values: Vec<&str> = literals.iter().map(|l| l.value.as_str()).collect();
        Ok(syntax::literal_union(&values))
    }

    fn map_primitive(&self, kind: PrimitiveKind, context: &str) -> ReflectResult<TypeExpression> {
        self.tables
            .primitive(kind)
            .map(|mapping| TypeExpression::new(mapping.schema.as_str(), mapping.nullable))
            .ok_or_else(|| ReflectError::UnsupportedKind {
                context: context.to_string(),
                kind: kind.as_str(),
            })
    }
}

#[cfg(test)]
#[path = "kind/kind_tests.rs"]
mod kind_tests;
