use criteria::{
    ErrorKind, ErrorOrigin,
    core::{
        chain::{NameValue, SetValue},
        obs::{metrics_report, metrics_reset_all},
        operation::MemberRef,
        serialize::{deserialize, serialize},
    },
    prelude::*,
};
use std::{collections::BTreeMap, sync::Arc};

static INVOICE: EntityModel = EntityModel::new(
    "billing::Invoice",
    &[
        FieldModel::new("id", FieldKind::Uint),
        FieldModel::new("total", FieldKind::Float64),
        FieldModel::nullable("customer", FieldKind::Text),
        FieldModel::new("lines", FieldKind::Int),
        FieldModel::new("paid", FieldKind::Bool),
    ],
);

fn invoice_row(total: f64, customer: Option<&str>) -> BTreeMap<String, Value> {
    let mut row = BTreeMap::new();
    row.insert("id".to_string(), Value::Uint(7));
    row.insert("total".to_string(), Value::float64(total).expect("finite"));
    row.insert("customer".to_string(), Value::from(customer));
    row.insert("lines".to_string(), Value::Int(2));
    row.insert("paid".to_string(), Value::Bool(false));
    row
}

fn compile_some(expr: &Expr) -> CriteriaExpression {
    compile(&INVOICE, expr)
        .expect("compile")
        .expect("non-empty filter")
}

fn member(name: &str) -> MemberRef {
    MemberRef::resolve(&INVOICE, name).expect("member")
}

#[test]
fn filter_compiles_to_canonical_text() {
    let expr = field("total").gt(100) & field("customer").starts_with("Acme") & !field("paid");

    assert_eq!(
        compile_some(&expr).to_string(),
        "((Compare(billing::Invoice.total, Greater, Int(100)) and Compare(billing::Invoice.customer, LikeLeft, Text('Acme%'))) and (not Compare(billing::Invoice.paid, Equal, Bool(true))))"
    );
}

#[test]
fn swapped_comparison_shares_the_fingerprint() {
    let swapped = compile_some(&lit(5).lt(field("lines")));
    let direct = compile_some(&field("lines").gt(5));

    assert_eq!(swapped, direct);
    assert_eq!(swapped.fingerprint(), direct.fingerprint());
    assert_eq!(swapped.structural_hash(), direct.structural_hash());
}

#[test]
fn compiled_operand_computes_against_a_row() {
    let operand = compile_operand(&INVOICE, &(field("total") * 2 + 5)).expect("compile");
    let expr = operand.into_expr();

    assert_eq!(
        compute(&expr, &invoice_row(10.0, None)).expect("compute"),
        Value::float64(25.0).expect("finite")
    );
}

#[test]
fn string_functions_compute_over_nullable_text() {
    let expr = compile_operand(&INVOICE, &field("customer").trim().to_upper())
        .expect("compile")
        .into_expr();

    assert_eq!(
        compute(&expr, &invoice_row(1.0, Some("  acme "))).expect("compute"),
        Value::Text("ACME".into())
    );
    assert_eq!(
        compute(&expr, &invoice_row(1.0, None)).expect("compute"),
        Value::Text(String::new())
    );
}

#[test]
fn decoded_trees_still_compute() {
    let expr = compile_operand(&INVOICE, &(field("lines") * field("total")))
        .expect("compile")
        .into_expr();

    let json = serde_json::to_string(&expr).expect("json");
    let from_json: OperationExpression = serde_json::from_str(&json).expect("decode json");

    let bytes = serialize(&expr).expect("cbor");
    let from_cbor: OperationExpression = deserialize(&bytes).expect("decode cbor");

    assert_eq!(from_json, expr);
    assert_eq!(from_cbor, expr);
    assert_eq!(
        compute(&from_cbor, &invoice_row(2.5, None)).expect("compute"),
        Value::float64(5.0).expect("finite")
    );
}

#[test]
fn errors_map_to_public_kinds() {
    let err = compile(&INVOICE, &field("missing").eq(1)).expect_err("unknown member");
    assert_eq!(err.kind, ErrorKind::UnknownMember);
    assert_eq!(err.origin, ErrorOrigin::Translate);

    let err = compile(&INVOICE, &field("lines")).expect_err("not boolean");
    assert_eq!(err.kind, ErrorKind::UnsupportedShape);
    assert_eq!(err.message, "unsupported expression shape: row.lines");

    let err = compile(&INVOICE, &field("total").to_lower().eq("x")).expect_err("not text");
    assert_eq!(err.kind, ErrorKind::InvalidOperator);

    let expr = compile_operand(&INVOICE, &(field("customer") - "x"))
        .expect("compile")
        .into_expr();
    let err = compute(&expr, &invoice_row(1.0, Some("a"))).expect_err("undefined");
    assert_eq!(err.kind, ErrorKind::NotImplemented);
    assert_eq!(err.origin, ErrorOrigin::Evaluate);
}

#[test]
fn toml_config_changes_the_wildcard() {
    let config = CriteriaConfig::from_toml_str("wildcard = \"*\"\n").expect("config");
    let compiled = criteria::compile_with(&INVOICE, &config, &field("customer").contains("cme"))
        .expect("compile")
        .expect("filter");

    assert_eq!(
        compiled.to_string(),
        "Compare(billing::Invoice.customer, Like, Text('*cme*'))"
    );

    let err = CriteriaConfig::from_toml_str("depth = 3").expect_err("unknown key");
    assert_eq!(criteria::Error::from(err).kind, ErrorKind::Config);
}

#[test]
fn cache_reuses_compiled_entries() {
    let cache = CriteriaCache::new();

    let first = cache.get_or_insert_with(&compile_some(&field("lines").gt(5)), |c| c.to_string());
    let second = cache.get_or_insert_with(&compile_some(&lit(5).lt(field("lines"))), |_| {
        String::from("rebuilt")
    });

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(cache.stats().hits, 1);
}

#[test]
fn set_clause_keeps_the_last_assignment() {
    let set = NameValue::new(member("paid"), Value::Bool(true))
        .set(member("lines"), Value::Int(3))
        .set(member("paid"), Value::Bool(false));

    let map = set.to_map();
    assert_eq!(map.len(), 2);
    assert_eq!(map["paid"], &SetValue::Value(Value::Bool(false)));
    assert_eq!(set.entries().len(), 3);
}

#[test]
fn sort_clause_walks_oldest_first() {
    let order = OrderBy::descending(member("total")).then_ascending(member("id"));

    let names: Vec<_> = order
        .entries()
        .into_iter()
        .map(|(member, direction)| (member.member().to_string(), direction))
        .collect();

    assert_eq!(
        names,
        vec![
            ("total".to_string(), OrderDirection::Desc),
            ("id".to_string(), OrderDirection::Asc),
        ]
    );
}

#[test]
fn translations_are_counted() {
    metrics_reset_all();

    let _ = compile(&INVOICE, &field("lines").gt(1));
    let _ = compile(&INVOICE, &field("missing").gt(1));

    let report = metrics_report();
    assert_eq!(report.ops.translations, 2);
    assert_eq!(report.ops.translation_errors, 1);
    assert_eq!(report.entities["billing::Invoice"].translations, 2);
}
