//! Target syntax helpers.
//!
//! Every spelling of an Effect Schema expression the generator produces goes
//! through this module, so the reflector and the emitter agree on the text
//! that import computation later scans.

use crate::model::{Property, TypeExpression};
use std::ops::Range;

/// Namespace every schema combinator lives in.
pub const SCHEMA_NAMESPACE: &str = "Schema";

/// `Schema.NullOr(T)`
pub fn null_or(representation: &str) -> String {
    format!("Schema.NullOr({representation})")
}

/// `Schema.Array(T)`; containers are nullable.
pub fn array_of(elem: &TypeExpression) -> TypeExpression {
    TypeExpression::new(format!("Schema.Array({})", elem.nested()), true)
}

/// `Schema.Array(T).pipe(Schema.itemsCount(N))`; fixed arrays are values.
pub fn fixed_array_of(len: usize, elem: &TypeExpression) -> TypeExpression {
    TypeExpression::new(
        format!(
            "Schema.Array({}).pipe(Schema.itemsCount({len}))",
            elem.nested()
        ),
        false,
    )
}

/// `Schema.Record({ key: K, value: V })`; containers are nullable.
pub fn record_of(key: &TypeExpression, value: &TypeExpression) -> TypeExpression {
    TypeExpression::new(
        format!(
            "Schema.Record({{ key: {}, value: {} }})",
            key.nested(),
            value.nested()
        ),
        true,
    )
}

/// `Schema.Literal("a", "b")`
pub fn literal_union<S: AsRef<str>>(values: &[S]) -> TypeExpression {
    let members: Vec<String> = values
        .iter()
        .map(|value| string_literal(value.as_ref()))
        .collect();
    TypeExpression::new(format!("Schema.Literal({})", members.join(", ")), false)
}

/// Reference to a generated class: `Name.Name`.
pub fn qualified_ref(target_name: &str) -> TypeExpression {
    TypeExpression::new(format!("{target_name}.{target_name}"), true)
}

/// Lazy reference to a class in the same reference cycle.
pub fn suspended_ref(target_name: &str) -> TypeExpression {
    TypeExpression::new(
        format!("Schema.suspend((): Schema.Schema<any> => {target_name}.{target_name})"),
        true,
    )
}

/// Dynamic-typed values.
pub fn open_object() -> TypeExpression {
    TypeExpression::new("Schema.Object", false)
}

/// Values that carry no serializable data.
pub fn never() -> TypeExpression {
    TypeExpression::new("Schema.Never", false)
}

/// `Schema.Struct({ "a": T, ... })` for a nameless struct shape. A struct
/// without properties is an open object.
pub fn inline_struct(properties: &[Property]) -> TypeExpression {
    if properties.is_empty() {
        return open_object();
    }

    let fields: Vec<String> = properties.iter().map(render_field).collect();
    TypeExpression::new(format!("Schema.Struct({{ {} }})", fields.join(", ")), true)
}

/// `...Name.Name.fields`
pub fn spread_fields(target_name: &str) -> String {
    format!("...{target_name}.{target_name}.fields")
}

/// One entry of a field list, without indentation or trailing comma.
pub fn render_field(property: &Property) -> String {
    if property.anonymous {
        return spread_fields(&property.name);
    }

    let key = string_literal(&property.name);
    let ty = &property.ty;

    if let Some(default) = &property.default_value {
        return format!(
            "{key}: Schema.optionalWith({}, {{ default: () => {} }})",
            ty.representation,
            default_literal(ty, default)
        );
    }

    match (property.optional, ty.nullable) {
        (true, true) => format!(
            "{key}: Schema.optionalWith({}, {{ nullable: true }})",
            ty.representation
        ),
        (true, false) => format!("{key}: Schema.optional({})", ty.representation),
        (false, true) => format!("{key}: {}", null_or(&ty.representation)),
        (false, false) => format!("{key}: {}", ty.representation),
    }
}

/// Default value spelled for a field of type `ty`. String-shaped fields
/// always get a quoted literal; other fields keep numbers and booleans bare.
pub fn default_literal(ty: &TypeExpression, raw: &str) -> String {
    let string_shaped =
        ty.representation == "Schema.String" || ty.representation.starts_with("Schema.Literal(");
    let bare = raw == "true" || raw == "false" || raw.parse::<f64>().is_ok_and(f64::is_finite);

    if bare && !string_shaped {
        raw.to_string()
    } else {
        string_literal(raw)
    }
}

/// Double-quoted string literal with JSON escaping.
pub fn string_literal(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}

/// Byte ranges and names of every `X.X` token in `text`, outside string
/// literals.
pub fn qualified_refs(text: &str) -> Vec<(Range<usize>, &str)> {
    let bytes = text.as_bytes();
    let mut refs = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        let byte = bytes[pos];
        if byte == b'"' {
            pos = skip_string(bytes, pos);
            continue;
        }
        if !is_ident_byte(byte) {
            pos += 1;
            continue;
        }

        let start = pos;
        pos = ident_end(bytes, pos);
        if byte.is_ascii_digit() || bytes.get(pos) != Some(&b'.') {
            continue;
        }

        let first = &text[start..pos];
        let second_end = ident_end(bytes, pos + 1);
        if &text[pos + 1..second_end] == first {
            refs.push((start..second_end, first));
            pos = second_end;
        }
    }

    refs
}

/// Rewrite the eager `X.X` references in `text` for which `suspend` holds
/// into `Schema.suspend` thunks.
pub fn suspend_refs(text: &str, suspend: impl Fn(&str) -> bool) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;

    for (range, name) in qualified_refs(text) {
        if name == SCHEMA_NAMESPACE || !suspend(name) {
            continue;
        }
        out.push_str(&text[last..range.start]);
        out.push_str(&suspended_ref(name).representation);
        last = range.end;
    }

    out.push_str(&text[last..]);
    out
}

fn is_ident_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'$'
}

fn ident_end(bytes: &[u8], mut pos: usize) -> usize {
    while pos < bytes.len() && is_ident_byte(bytes[pos]) {
        pos += 1;
    }
    pos
}

/// Position just past the string literal opening at `start`.
fn skip_string(bytes: &[u8], start: usize) -> usize {
    let mut pos = start + 1;
    while pos < bytes.len() {
        match bytes[pos] {
            b'\\' => pos += 2,
            b'"' => return pos + 1,
            _ => pos += 1,
        }
    }
    bytes.len()
}

/// Whether `name` can be used as a class name and import binding.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' || first == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

#[cfg(test)]
#[path = "syntax/syntax_tests.rs"]
mod syntax_tests;
