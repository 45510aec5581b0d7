#![allow(non_snake_case)]

use super::*;
use std::collections::HashMap;
use test_case::test_case;
use typebridge_core::{
    BoxError, Literal, LiteralSource, NamedType, NoLiterals, ResolutionTables, SourceField,
    TypeUniverse,
};

const PKG: &str = "example.com/app";

/// Literal source answering from a fixed table and counting lookups.
#[derive(Default)]
struct StaticLiterals {
    literals: HashMap<String, Vec<Literal>>,
    calls: usize,
}

impl StaticLiterals {
    fn with(mut self, type_name: &str, pairs: &[(&str, &str)]) -> Self {
        let literals = pairs
            .iter()
            .map(|(name, value)| Literal::new(*name, *value))
            .collect();
        self.literals.insert(type_name.to_string(), literals);
        self
    }
}

impl LiteralSource for StaticLiterals {
    fn extract_literals(
        &mut self,
        _package: &str,
        _package_name: &str,
        type_name: &str,
    ) -> Result<Vec<Literal>, BoxError> {
        self.calls += 1;
        Ok(self.literals.get(type_name).cloned().unwrap_or_default())
    }
}

struct FailingLiterals;

impl LiteralSource for FailingLiterals {
    fn extract_literals(
        &mut self,
        package: &str,
        _package_name: &str,
        _type_name: &str,
    ) -> Result<Vec<Literal>, BoxError> {
        Err(format!("package {package} not found").into())
    }
}

fn key(name: &str) -> TypeKey {
    TypeKey::qualified(PKG, name)
}

fn universe() -> TypeUniverse {
    TypeUniverse::new()
        .with(NamedType::new(
            PKG,
            "Mount",
            SourceType::structure(vec![SourceField::new("Source", SourceType::String)]),
        ))
        .with(NamedType::new(PKG, "Status", SourceType::String))
        .with(NamedType::new(PKG, "FileMode", SourceType::Uint32))
        .with(NamedType::new(
            PKG,
            "Strings",
            SourceType::slice(SourceType::String),
        ))
        .with(NamedType::new(
            "time",
            "Time",
            SourceType::structure(vec![SourceField::new("wall", SourceType::Uint64)]),
        ))
}

fn map(ty: &SourceType) -> ReflectResult<TypeExpression> {
    let universe = universe();
    let tables = ResolutionTables::new();
    let mut literals = NoLiterals;
    let mut reflector = Reflector::new(&universe, &tables, &mut literals);
    reflector.map_kind(ty, "app.Test.Field")
}

// Primitive rules

#[test_case(SourceType::Bool, "Schema.Boolean")]
#[test_case(SourceType::String, "Schema.String")]
#[test_case(SourceType::Float32, "Schema.Number")]
#[test_case(SourceType::Int, "MobySchemas.Int64")]
#[test_case(SourceType::Int32, "MobySchemas.Int32")]
#[test_case(SourceType::Uint16, "MobySchemas.UInt16")]
#[test_case(SourceType::Uint64, "MobySchemas.UInt64")]
fn map_kind___primitive___uses_primitive_table(ty: SourceType, schema: &str) {
    let expr = map(&ty).unwrap();

    assert_eq!(expr, TypeExpression::new(schema, false));
}

#[test]
fn map_kind___named_numeric___maps_like_its_kind() {
    let expr = map(&SourceType::named(key("FileMode"))).unwrap();

    assert_eq!(expr, TypeExpression::new("MobySchemas.UInt32", false));
}

#[test]
fn map_kind___primitive_override___is_honored() {
    let universe = universe();
    let tables = ResolutionTables::new().with_primitive(
        PrimitiveKind::Int64,
        typebridge_core::PrimitiveMapping::new("Schema.BigInt", true),
    );
    let mut literals = NoLiterals;
    let mut reflector = Reflector::new(&universe, &tables, &mut literals);

    let expr = reflector.map_kind(&SourceType::Int64, "f").unwrap();

    assert_eq!(expr, TypeExpression::new("Schema.BigInt", true));
}

// Container rules

#[test]
fn map_kind___slice_of_named_struct___is_nullable_array_of_nullable_ref() {
    let expr = map(&SourceType::slice(SourceType::named(key("Mount")))).unwrap();

    assert_eq!(
        expr,
        TypeExpression::new("Schema.Array(Schema.NullOr(Mount.Mount))", true)
    );
}

#[test]
fn map_kind___named_slice___maps_its_shape() {
    let expr = map(&SourceType::named(key("Strings"))).unwrap();

    assert_eq!(expr, TypeExpression::new("Schema.Array(Schema.String)", true));
}

#[test]
fn map_kind___fixed_array___pins_count() {
    let expr = map(&SourceType::array(4, SourceType::Uint8)).unwrap();

    assert_eq!(
        expr,
        TypeExpression::new(
            "Schema.Array(MobySchemas.UInt8).pipe(Schema.itemsCount(4))",
            false
        )
    );
}

#[test]
fn map_kind___map_of_strings___is_record() {
    let expr = map(&SourceType::map(SourceType::String, SourceType::String)).unwrap();

    assert_eq!(
        expr,
        TypeExpression::new(
            "Schema.Record({ key: Schema.String, value: Schema.String })",
            true
        )
    );
}

#[test]
fn map_kind___pointer___forces_nullable() {
    let expr = map(&SourceType::pointer(SourceType::String)).unwrap();

    assert_eq!(expr, TypeExpression::new("Schema.String", true));
}

#[test_case(SourceType::Interface, "Schema.Object")]
#[test_case(SourceType::Func, "Schema.Never")]
#[test_case(SourceType::Uintptr, "Schema.Never")]
#[test_case(SourceType::UnsafePointer, "Schema.Never")]
fn map_kind___dynamic_and_uninhabited___map_to_fixed_schema(ty: SourceType, schema: &str) {
    assert_eq!(map(&ty).unwrap(), TypeExpression::new(schema, false));
}

#[test_case(SourceType::Chan { elem: Box::new(SourceType::Int) }, "chan")]
#[test_case(SourceType::Complex64, "complex64")]
#[test_case(SourceType::Complex128, "complex128")]
fn map_kind___unsupported_shape___is_fatal(ty: SourceType, expected: &str) {
    let err = map(&ty).unwrap_err();

    match err {
        ReflectError::UnsupportedKind { kind, context } => {
            assert_eq!(kind, expected);
            assert_eq!(context, "app.Test.Field");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn map_kind___unknown_named_type___is_fatal() {
    let err = map(&SourceType::named(key("Missing"))).unwrap_err();

    assert!(matches!(err, ReflectError::Core(typebridge_core::CoreError::UnknownType(_))));
}

// Struct rules

#[test]
fn map_kind___named_struct___reflects_and_references() {
    let universe = universe();
    let tables = ResolutionTables::new();
    let mut literals = NoLiterals;
    let mut reflector = Reflector::new(&universe, &tables, &mut literals);

    let expr = reflector
        .map_kind(&SourceType::named(key("Mount")), "f")
        .unwrap();

    assert_eq!(expr, TypeExpression::new("Mount.Mount", true));
    assert!(reflector.registry().get(&key("Mount")).unwrap().is_complete());
}

#[test]
fn map_kind___inline_struct___renders_struct_without_registering() {
    let universe = universe();
    let tables = ResolutionTables::new();
    let mut literals = NoLiterals;
    let mut reflector = Reflector::new(&universe, &tables, &mut literals);
    let inline = SourceType::structure(vec![
        SourceField::new("A", SourceType::String),
        SourceField::new("B", SourceType::Bool).with_tag(r#"json:"b,omitempty""#),
    ]);

    let expr = reflector.map_kind(&inline, "f").unwrap();

    assert_eq!(
        expr.representation,
        r#"Schema.Struct({ "A": Schema.String, "b": Schema.optional(Schema.Boolean) })"#
    );
    assert!(reflector.registry().is_empty());
}

// Replacement rule

#[test]
fn map_kind___replaced_struct___is_nullable_replacement() {
    let universe = universe();
    let tables = ResolutionTables::new().with_replacement("time.Time", "Schema.DateFromString");
    let mut literals = NoLiterals;
    let mut reflector = Reflector::new(&universe, &tables, &mut literals);

    let expr = reflector
        .map_kind(&SourceType::named("time.Time"), "f")
        .unwrap();

    assert_eq!(expr, TypeExpression::new("Schema.DateFromString", true));
    assert!(reflector.registry().is_empty());
}

#[test]
fn map_kind___replaced_type_outside_snapshot___is_not_nullable() {
    let universe = universe();
    let tables = ResolutionTables::new().with_replacement("net.IP", "Schema.String");
    let mut literals = NoLiterals;
    let mut reflector = Reflector::new(&universe, &tables, &mut literals);

    let expr = reflector.map_kind(&SourceType::named("net.IP"), "f").unwrap();

    assert_eq!(expr, TypeExpression::new("Schema.String", false));
}

#[test_case("net.IP", SourceType::slice(SourceType::Uint8), true; "slice")]
#[test_case("crypto/sha256.Digest", SourceType::array(32, SourceType::Uint8), false; "fixed array")]
fn map_kind___replaced_container___nullable_follows_shape(
    key: &str,
    underlying: SourceType,
    nullable: bool,
) {
    let (package, name) = key.rsplit_once('.').unwrap();
    let universe = universe().with(NamedType::new(package, name, underlying));
    let tables = ResolutionTables::new().with_replacement(key, "Schema.String");
    let mut literals = NoLiterals;
    let mut reflector = Reflector::new(&universe, &tables, &mut literals);

    let expr = reflector.map_kind(&SourceType::named(key), "f").unwrap();

    assert_eq!(expr, TypeExpression::new("Schema.String", nullable));
}

// Named string rule

#[test]
fn map_kind___named_string_with_literals___is_literal_union() {
    let universe = universe();
    let tables = ResolutionTables::new();
    let mut literals = StaticLiterals::default().with("Status", &[("A", "a"), ("B", "b")]);
    let mut reflector = Reflector::new(&universe, &tables, &mut literals);

    let expr = reflector
        .map_kind(&SourceType::named(key("Status")), "f")
        .unwrap();

    assert_eq!(expr, TypeExpression::new(r#"Schema.Literal("a", "b")"#, false));
}

#[test]
fn map_kind___named_string_without_literals___falls_back_to_string() {
    let universe = universe();
    let tables = ResolutionTables::new();
    let mut literals = StaticLiterals::default();
    let mut reflector = Reflector::new(&universe, &tables, &mut literals);

    let expr = reflector
        .map_kind(&SourceType::named(key("Status")), "f")
        .unwrap();

    assert_eq!(expr, TypeExpression::new("Schema.String", false));
}

#[test]
fn map_kind___named_string___is_extracted_once() {
    let universe = universe();
    let tables = ResolutionTables::new();
    let mut literals = StaticLiterals::default().with("Status", &[("A", "a")]);

    {
        let mut reflector = Reflector::new(&universe, &tables, &mut literals);
        let status = SourceType::named(key("Status"));
        reflector.map_kind(&status, "first").unwrap();
        reflector.map_kind(&SourceType::slice(status), "second").unwrap();
    }

    assert_eq!(literals.calls, 1);
}

#[test]
fn map_kind___literal_source_failure___is_fatal() {
    let universe = universe();
    let tables = ResolutionTables::new();
    let mut literals = FailingLiterals;
    let mut reflector = Reflector::new(&universe, &tables, &mut literals);

    let err = reflector
        .map_kind(&SourceType::named(key("Status")), "f")
        .unwrap_err();

    match err {
        ReflectError::Literals { key: failed, source } => {
            assert_eq!(failed, key("Status"));
            assert!(source.to_string().contains("not found"));
        }
        other => panic!("unexpected error: {other}"),
    }
}
