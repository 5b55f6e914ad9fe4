use super::*;
use crate::{
    error::ErrorClass,
    test_fixtures::{PRODUCT, product_row},
};
use std::collections::BTreeMap;

fn member(name: &str) -> OperationExpression {
    OperationExpression::member(&PRODUCT, name).expect("fixture member")
}

fn unary(sign: OperationSign, operand: OperationExpression) -> OperationExpression {
    OperationExpression::unary(sign, operand, Vec::new()).expect("unary")
}

#[test]
fn arithmetic_over_member_computes_in_declared_type() {
    let doubled =
        OperationExpression::binary(member("price"), OperationSign::Multiply, Value::Int(2))
            .expect("multiply");
    let expr = OperationExpression::binary(doubled, OperationSign::Add, Value::Int(5))
        .expect("add");

    assert_eq!(expr.value_kind().expect("kind"), ValueKind::Float64);
    assert_eq!(
        expr.compute(&product_row(10.0, None)).expect("compute"),
        Value::float64(25.0).expect("finite")
    );
}

#[test]
fn string_signs_compute_over_text_member() {
    let row = product_row(1.0, Some(" Bob "));
    let trimmed = unary(OperationSign::Trim, member("name"));

    assert_eq!(
        trimmed.compute(&row).expect("trim"),
        Value::Text("Bob".into())
    );

    let sub = OperationExpression::unary(
        OperationSign::Substring,
        trimmed,
        vec![
            OperationExpression::literal(1_i64),
            OperationExpression::literal(2_i64),
        ],
    )
    .expect("substring");
    assert_eq!(sub.compute(&row).expect("substring"), Value::Text("ob".into()));
}

#[test]
fn null_text_is_read_as_empty_string() {
    let row = product_row(1.0, None);

    assert_eq!(
        unary(OperationSign::Length, member("name"))
            .compute(&row)
            .expect("length"),
        Value::Int(0)
    );
    assert_eq!(
        unary(OperationSign::ToUpper, member("name"))
            .compute(&row)
            .expect("upper"),
        Value::Text(String::new())
    );
}

#[test]
fn string_sign_on_non_text_member_is_invalid() {
    let err = OperationExpression::unary(OperationSign::ToLower, member("price"), Vec::new())
        .expect_err("price is not text");

    assert_eq!(err.class, ErrorClass::InvalidOperatorUsage);
}

#[test]
fn string_sign_as_left_node_operator_is_invalid() {
    let err = OperationExpression::binary(member("name"), OperationSign::Trim, Value::Int(1))
        .expect_err("trim has no left operand");

    assert_eq!(err.class, ErrorClass::InvalidOperatorUsage);
}

#[test]
fn substring_argument_count_is_bounded() {
    let args = vec![OperationExpression::literal(0_i64); 3];
    let err = OperationExpression::unary(OperationSign::Substring, member("name"), args)
        .expect_err("three arguments");

    assert_eq!(err.class, ErrorClass::ArgumentOutOfRange);

    let err = OperationExpression::unary(
        OperationSign::Trim,
        member("name"),
        vec![OperationExpression::literal(1_i64)],
    )
    .expect_err("trim takes no arguments");
    assert_eq!(err.class, ErrorClass::ArgumentOutOfRange);
}

#[test]
fn substring_past_the_end_fails_at_evaluation() {
    let sub = OperationExpression::unary(
        OperationSign::Substring,
        member("name"),
        vec![OperationExpression::literal(5_i64)],
    )
    .expect("substring");

    let err = sub
        .compute(&product_row(1.0, Some("Bob")))
        .expect_err("start past end");
    assert_eq!(err.class, ErrorClass::ArgumentOutOfRange);
}

#[test]
fn uncovered_sign_and_type_is_not_implemented() {
    let expr = OperationExpression::binary(
        member("name"),
        OperationSign::Subtract,
        Value::Text("x".into()),
    )
    .expect("structurally valid");

    let err = expr
        .compute(&product_row(1.0, Some("abc")))
        .expect_err("text subtraction");
    assert_eq!(err.class, ErrorClass::NotImplemented);
    assert!(err.message.contains("test::Product.name"), "{}", err.message);
}

#[test]
fn missing_record_field_is_unknown_member() {
    let row: BTreeMap<String, Value> = BTreeMap::new();
    let err = member("qty").compute(&row).expect_err("empty row");

    assert_eq!(err.class, ErrorClass::UnknownMember);
}

#[test]
fn unset_literal_computes_to_null() {
    let row: BTreeMap<String, Value> = BTreeMap::new();

    assert_eq!(
        OperationExpression::unset().compute(&row).expect("unset"),
        Value::Null
    );
    assert_ne!(
        OperationExpression::unset(),
        OperationExpression::literal(Value::Null)
    );
}

#[test]
fn owner_type_walks_left_then_right() {
    let expr = OperationExpression::binary(Value::Int(1), OperationSign::Add, member("qty"))
        .expect("add");
    assert_eq!(expr.owner_type(), Some("test::Product"));

    assert_eq!(OperationExpression::literal(1_i64).owner_type(), None);
}

#[test]
fn value_kind_follows_node_shape() {
    let len = unary(OperationSign::Length, member("name"));
    assert_eq!(len.value_kind().expect("kind"), ValueKind::Int);

    let mixed = OperationExpression::binary(member("qty"), OperationSign::Add, Value::Uint(1))
        .expect("add");
    assert_eq!(mixed.value_kind().expect("kind"), ValueKind::Int);
}

#[test]
fn canonical_text_names_every_field() {
    let expr = OperationExpression::binary(member("qty"), OperationSign::Multiply, Value::Int(2))
        .expect("multiply");
    assert_eq!(expr.to_string(), "(test::Product.qty * Int(2))");

    let sub = OperationExpression::unary(
        OperationSign::Substring,
        member("name"),
        vec![OperationExpression::literal(1_i64)],
    )
    .expect("substring");
    assert_eq!(sub.to_string(), "Substring(test::Product.name, Int(1))");
}

#[test]
fn member_equality_ignores_resolution_state() {
    let resolved = MemberRef::resolve(&PRODUCT, "qty").expect("resolve");
    let lazy = MemberRef::new("test::Product", "qty");

    assert_eq!(resolved, lazy);
}
