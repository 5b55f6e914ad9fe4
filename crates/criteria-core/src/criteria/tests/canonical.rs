use crate::{
    criteria::{CompareCriteria, CompareRight, CriteriaExpression, ExistsCriteria, SubqueryInner},
    error::{ErrorClass, ErrorOrigin},
    operation::OperationExpression,
    operator::CriteriaOperator as Op,
    serialize::{SerializeErrorKind, deserialize, serialize},
    test_fixtures::{ORDER_LINE, PRODUCT},
    value::Value,
};

fn member(name: &str) -> OperationExpression {
    OperationExpression::member(&PRODUCT, name).expect("fixture member")
}

fn compare(name: &str, op: Op, value: impl Into<Value>) -> CompareCriteria {
    CompareCriteria::with_value(member(name), op, value).expect("canonical compare")
}

const EQUAL_FAMILY: [Op; 5] = [Op::Equal, Op::Like, Op::LikeLeft, Op::LikeRight, Op::In];

const GREATER_FAMILY: [Op; 7] = [
    Op::Greater,
    Op::GreaterOrEqual,
    Op::Lesser,
    Op::LesserOrEqual,
    Op::Unequal,
    Op::Unlike,
    Op::NotIn,
];

#[test]
fn equal_null_is_is_null() {
    let assigned = compare("name", Op::Equal, Value::Null);
    let unary = CompareCriteria::unary(member("name"), Op::IsNull).expect("is null");

    assert_eq!(assigned, unary);
    assert_eq!(assigned.comparator(), Op::IsNull);
    assert_eq!(assigned.right(), &CompareRight::Empty);
}

#[test]
fn null_rewrites_by_family() {
    for op in EQUAL_FAMILY {
        assert_eq!(compare("name", op, Value::Null).comparator(), Op::IsNull, "{op}");
    }
    for op in GREATER_FAMILY {
        assert_eq!(
            compare("name", op, Value::Null).comparator(),
            Op::IsNotNull,
            "{op}"
        );
    }
}

#[test]
fn null_on_none_short_circuits_the_right_side() {
    let assigned = compare("name", Op::None, Value::Null);

    assert_eq!(assigned.comparator(), Op::None);
    assert_eq!(
        assigned.right(),
        &CompareRight::Expression(Box::new(CriteriaExpression::ShortCircuit(true)))
    );
}

#[test]
fn null_on_non_value_comparators_is_kept() {
    for op in [Op::IsNull, Op::IsNotNull, Op::Exists, Op::NotExists] {
        let assigned = compare("name", op, Value::Null);
        assert_eq!(assigned.comparator(), op);
        assert_eq!(assigned.right(), &CompareRight::Empty);
    }
}

#[test]
fn collection_value_rewrites_to_membership() {
    let list = Value::from_slice(&[1_i64, 2, 3]);

    let assigned = compare("qty", Op::Equal, list.clone());
    assert_eq!(assigned.comparator(), Op::In);
    assert_eq!(assigned.right(), &CompareRight::Value(list.clone()));

    assert_eq!(compare("qty", Op::Like, list.clone()).comparator(), Op::Like);
    for op in GREATER_FAMILY {
        assert_eq!(compare("qty", op, list.clone()).comparator(), Op::NotIn, "{op}");
    }
}

#[test]
fn wildcarded_text_rewrites_to_pattern_match() {
    assert_eq!(compare("name", Op::Equal, "a%b").comparator(), Op::Like);
    assert_eq!(compare("name", Op::LikeLeft, "a%").comparator(), Op::LikeLeft);
    for op in GREATER_FAMILY {
        assert_eq!(compare("name", op, "a%b").comparator(), Op::Unlike, "{op}");
    }

    assert_eq!(compare("name", Op::Equal, "ab").comparator(), Op::Equal);
}

#[test]
fn custom_wildcard_is_honored() {
    let assigned = CompareCriteria::with_value_wildcard(
        member("name"),
        Op::Equal,
        Value::Text("a*".into()),
        '*',
    )
    .expect("compare");
    assert_eq!(assigned.comparator(), Op::Like);

    let plain = CompareCriteria::with_value_wildcard(
        member("name"),
        Op::Equal,
        Value::Text("a%".into()),
        '*',
    )
    .expect("compare");
    assert_eq!(plain.comparator(), Op::Equal);
}

#[test]
fn value_on_non_value_comparator_is_invalid() {
    for op in [Op::None, Op::IsNull, Op::IsNotNull, Op::Exists, Op::NotExists] {
        let err = CompareCriteria::with_value(member("qty"), op, 1_i64).expect_err("no value");
        assert_eq!(err.class, ErrorClass::InvalidOperatorUsage, "{op}");
        assert_eq!(err.origin, ErrorOrigin::Canonicalize);
    }
}

#[test]
fn operand_on_non_value_comparator_is_invalid() {
    let err = CompareCriteria::with_operand(member("qty"), Op::Exists, member("id"))
        .expect_err("exists takes no operand");

    assert_eq!(err.class, ErrorClass::InvalidOperatorUsage);
}

#[test]
fn plain_value_operand_goes_through_canonicalization() {
    let assigned =
        CompareCriteria::with_operand(member("name"), Op::Equal, Value::Null).expect("compare");

    assert_eq!(assigned.comparator(), Op::IsNull);
}

#[test]
fn literal_operand_is_canonicalized_like_a_value() {
    let null_literal =
        CompareCriteria::with_operand(member("name"), Op::Equal, OperationExpression::literal(Value::Null))
            .expect("compare");
    assert_eq!(null_literal, compare("name", Op::Equal, Value::Null));
    assert_eq!(null_literal.comparator(), Op::IsNull);

    let unset = CompareCriteria::with_operand(member("qty"), Op::Greater, OperationExpression::unset())
        .expect("compare");
    assert_eq!(unset, compare("qty", Op::Greater, Value::Null));

    let list = CompareCriteria::with_operand(
        member("qty"),
        Op::Equal,
        OperationExpression::literal(Value::from_slice(&[1_i64, 2])),
    )
    .expect("compare");
    assert_eq!(list.comparator(), Op::In);

    let pattern = CompareCriteria::with_operand_wildcard(
        member("name"),
        Op::Unequal,
        OperationExpression::literal("a*").into(),
        '*',
    )
    .expect("compare");
    assert_eq!(pattern.comparator(), Op::Unlike);
}

fn tampered(node: &CompareCriteria, comparator: &str) -> serde_json::Value {
    let mut json = serde_json::to_value(node).expect("encode");
    json["comparator"] = serde_json::Value::from(comparator);
    json
}

#[test]
fn decoding_rejects_non_canonical_comparisons() {
    let cases = [
        // list value under Equal instead of In
        tampered(&compare("qty", Op::Equal, Value::from_slice(&[1_i64, 2])), "Equal"),
        // value right side under a comparator that takes none
        tampered(&compare("qty", Op::Equal, 1_i64), "Exists"),
        // empty right side under a value comparator
        tampered(&compare("name", Op::Equal, Value::Null), "Equal"),
    ];

    for json in cases {
        let err = serde_json::from_value::<CompareCriteria>(json.clone())
            .expect_err("json decode must fail");
        assert!(err.to_string().contains("does not match"), "{err}");

        let bytes = serialize(&json).expect("encode");
        let err = deserialize::<CompareCriteria>(&bytes).expect_err("cbor decode must fail");
        assert_eq!(err.kind(), SerializeErrorKind::Deserialize);
    }
}

#[test]
fn decoding_accepts_canonical_comparisons() {
    for node in [
        compare("qty", Op::Equal, Value::from_slice(&[1_i64, 2])),
        compare("name", Op::Equal, Value::Null),
        compare("name", Op::None, Value::Null),
        CompareCriteria::with_operand(member("qty"), Op::Greater, member("id")).expect("compare"),
    ] {
        let bytes = serialize(&node).expect("encode");
        let decoded: CompareCriteria = deserialize(&bytes).expect("decode");
        assert_eq!(decoded, node);
    }
}

#[test]
fn owner_type_walks_children() {
    let literal_left = CompareCriteria::with_operand(
        OperationExpression::literal(1_i64),
        Op::Equal,
        member("qty"),
    )
    .expect("compare");
    assert_eq!(literal_left.owner_type(), Some("test::Product"));

    let tree = CriteriaExpression::negate(CriteriaExpression::ShortCircuit(true))
        | CriteriaExpression::from(compare("qty", Op::Greater, 1_i64));
    assert_eq!(tree.owner_type(), Some("test::Product"));

    let exists = CriteriaExpression::from(ExistsCriteria::new(
        member("id"),
        SubqueryInner::ForeignKey(
            OperationExpression::member(&ORDER_LINE, "product_id").expect("fk"),
        ),
        false,
    ));
    assert_eq!(exists.owner_type(), Some("test::Product"));

    assert_eq!(CriteriaExpression::ShortCircuit(false).owner_type(), None);
}

#[test]
fn canonical_text_is_stable() {
    let tree = CriteriaExpression::from(compare("qty", Op::Greater, 1_i64))
        & !CriteriaExpression::from(compare("name", Op::Equal, "a%").ignoring_case(true));

    assert_eq!(
        tree.to_string(),
        "(Compare(test::Product.qty, Greater, Int(1)) and \
         (not Compare(test::Product.name, Like, Text('a%'), ignore_case)))"
    );

    let exists = ExistsCriteria::new(
        member("id"),
        SubqueryInner::ForeignKey(
            OperationExpression::member(&ORDER_LINE, "product_id").expect("fk"),
        ),
        true,
    );
    assert_eq!(
        exists.to_string(),
        "NotExists(test::Product.id, test::OrderLine.product_id)"
    );
}

#[test]
fn ignore_case_is_part_of_equality() {
    let plain = compare("name", Op::Equal, "x");
    let folded = plain.clone().ignoring_case(true);

    assert_ne!(plain, folded);
    assert!(folded.ignore_case());
}

#[test]
fn declared_literal_type_is_part_of_equality() {
    assert_ne!(compare("qty", Op::Equal, 1_i64), compare("qty", Op::Equal, 1_u64));
}
