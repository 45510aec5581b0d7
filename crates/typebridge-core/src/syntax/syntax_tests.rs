#![allow(non_snake_case)]

use super::*;
use crate::tags::Location;
use test_case::test_case;

fn string() -> TypeExpression {
    TypeExpression::new("Schema.String", false)
}

fn mount() -> TypeExpression {
    qualified_ref("Mount")
}

// Container expressions

#[test]
fn array_of___nullable_element___wraps_in_null_or() {
    let expr = array_of(&mount());

    assert_eq!(expr.representation, "Schema.Array(Schema.NullOr(Mount.Mount))");
    assert!(expr.nullable);
}

#[test]
fn fixed_array_of___pins_item_count_and_is_not_nullable() {
    let expr = fixed_array_of(16, &TypeExpression::new("MobySchemas.UInt8", false));

    assert_eq!(
        expr.representation,
        "Schema.Array(MobySchemas.UInt8).pipe(Schema.itemsCount(16))"
    );
    assert!(!expr.nullable);
}

#[test]
fn record_of___string_to_string___renders_key_and_value() {
    let expr = record_of(&string(), &string());

    assert_eq!(
        expr.representation,
        "Schema.Record({ key: Schema.String, value: Schema.String })"
    );
    assert!(expr.nullable);
}

#[test]
fn literal_union___escapes_members_in_order() {
    let expr = literal_union(&["created", "say \"hi\""]);

    assert_eq!(
        expr.representation,
        r#"Schema.Literal("created", "say \"hi\"")"#
    );
    assert!(!expr.nullable);
}

#[test]
fn suspended_ref___wraps_qualified_name() {
    let expr = suspended_ref("Node");

    assert_eq!(
        expr.representation,
        "Schema.suspend((): Schema.Schema<any> => Node.Node)"
    );
    assert!(expr.nullable);
}

#[test]
fn suspend_refs___selected_names_only___leaves_others_and_strings() {
    let text = r#"Schema.Record({ key: Schema.String, value: Schema.NullOr(B.B) }).annotations({ title: "B.B" }), C.C"#;

    let rewritten = suspend_refs(text, |name| name == "B");

    assert_eq!(
        rewritten,
        r#"Schema.Record({ key: Schema.String, value: Schema.NullOr(Schema.suspend((): Schema.Schema<any> => B.B)) }).annotations({ title: "B.B" }), C.C"#
    );
}

#[test]
fn qualified_refs___mismatched_and_chained_pairs___match_at_most_once() {
    let names: Vec<&str> = qualified_refs("A.A, A.B, MobySchemas.Int64, Tree.Tree.Tree")
        .into_iter()
        .map(|(_, name)| name)
        .collect();

    assert_eq!(names, vec!["A", "Tree"]);
}

#[test]
fn inline_struct___renders_fields_in_order() {
    let properties = vec![
        Property::new("a", string()),
        Property::new("b", mount()).optional(true),
    ];

    let expr = inline_struct(&properties);

    assert_eq!(
        expr.representation,
        r#"Schema.Struct({ "a": Schema.String, "b": Schema.optionalWith(Mount.Mount, { nullable: true }) })"#
    );
}

#[test]
fn inline_struct___empty___is_open_object() {
    assert_eq!(inline_struct(&[]), open_object());
}

// Field rendering

#[test_case(false, false, r#""n": Schema.String"#; "required")]
#[test_case(true, false, r#""n": Schema.optional(Schema.String)"#; "optional")]
#[test_case(false, true, r#""n": Schema.NullOr(Schema.String)"#; "nullable")]
#[test_case(true, true, r#""n": Schema.optionalWith(Schema.String, { nullable: true })"#; "optional nullable")]
fn render_field___covers_optional_and_nullable(optional: bool, nullable: bool, expected: &str) {
    let property = Property::new("n", string().with_nullable(nullable)).optional(optional);

    assert_eq!(render_field(&property), expected);
}

#[test]
fn render_field___anonymous___spreads_fields() {
    let property = Property::spread("ContainerJSONBase");

    assert_eq!(
        render_field(&property),
        "...ContainerJSONBase.ContainerJSONBase.fields"
    );
}

#[test]
fn render_field___default___renders_optional_with_default() {
    let mut property = Property::new("limit", TypeExpression::new("MobySchemas.Int64", false));
    property.default_value = Some("10".to_string());
    property.location = Some(Location::Query);

    assert_eq!(
        render_field(&property),
        r#""limit": Schema.optionalWith(MobySchemas.Int64, { default: () => 10 })"#
    );
}

#[test_case("Schema.String", "10", r#""10""#; "string field quotes numbers")]
#[test_case("Schema.Boolean", "true", "true"; "boolean stays bare")]
#[test_case("MobySchemas.Int64", "-3", "-3"; "number stays bare")]
#[test_case("MobySchemas.Int64", "inf", r#""inf""#; "non finite is quoted")]
#[test_case(r#"Schema.Literal("a")"#, "a", r#""a""#; "literal union quotes")]
fn default_literal___spells_by_field_shape(representation: &str, raw: &str, expected: &str) {
    let ty = TypeExpression::new(representation, false);

    assert_eq!(default_literal(&ty, raw), expected);
}

#[test_case("Mount", true)]
#[test_case("_private", true)]
#[test_case("$ref", true)]
#[test_case("Swarm2", true)]
#[test_case("2Swarm", false)]
#[test_case("Swarm-Spec", false)]
#[test_case("", false)]
fn is_identifier___follows_identifier_rules(name: &str, expected: bool) {
    assert_eq!(is_identifier(name), expected);
}
