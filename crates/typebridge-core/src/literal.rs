//! Enumerated string literals and the seam that recovers them

use crate::error::BoxError;

/// A constant of a named string type: `(constant name, literal value)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Literal {
    pub name: String,
    pub value: String,
}

impl Literal {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Recovers the declared constant set of a named string type.
///
/// Structural introspection only exposes a named string type's underlying
/// kind, so the value set comes from a separate pass over source declarations.
/// `package_name` is the declaring package's clause name, which need not match
/// the last segment of its path. An empty result is not an error.
pub trait LiteralSource {
    fn extract_literals(
        &mut self,
        package: &str,
        package_name: &str,
        type_name: &str,
    ) -> Result<Vec<Literal>, BoxError>;
}

/// Literal source that never finds anything; every named string type maps
/// to the plain string primitive.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoLiterals;

impl LiteralSource for NoLiterals {
    fn extract_literals(
        &mut self,
        _package: &str,
        _package_name: &str,
        _type_name: &str,
    ) -> Result<Vec<Literal>, BoxError> {
        Ok(Vec::new())
    }
}
