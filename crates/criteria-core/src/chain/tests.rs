use super::*;
use crate::{operator::OperationSign, test_fixtures::PRODUCT};

fn member(name: &str) -> MemberRef {
    MemberRef::resolve(&PRODUCT, name).expect("fixture member")
}

#[test]
fn name_value_entries_are_oldest_first() {
    let chain = NameValue::new(member("price"), Value::float64(1.5).expect("finite"))
        .set(member("name"), Value::Text("x".into()))
        .set(member("qty"), Value::Int(2));

    let names: Vec<_> = chain
        .entries()
        .into_iter()
        .map(|(member, _)| member.member())
        .collect();
    assert_eq!(names, ["price", "name", "qty"]);
    assert_eq!(chain.prior().map(|p| p.member().member()), Some("name"));
}

#[test]
fn name_value_map_lets_later_entries_win() {
    let chain = NameValue::new(member("qty"), Value::Int(1))
        .set(member("name"), Value::Text("x".into()))
        .set(member("qty"), Value::Int(2));

    let map = chain.to_map();
    assert_eq!(map.len(), 2);
    assert_eq!(map["qty"], &SetValue::Value(Value::Int(2)));
    assert_eq!(chain.entries().len(), 3);
}

#[test]
fn name_value_accepts_operand_values() {
    let bumped = OperationExpression::binary(
        OperationExpression::Member(member("qty")),
        OperationSign::Add,
        Value::Int(1),
    )
    .expect("add");
    let chain = NameValue::new(member("qty"), bumped);

    assert_eq!(
        chain.to_string(),
        "Set(test::Product.qty = (test::Product.qty + Int(1)))"
    );
}

#[test]
fn order_by_entries_are_oldest_first() {
    let order = OrderBy::ascending(member("name"))
        .then_descending(member("price"))
        .then_ascending(member("id"));

    let entries: Vec<_> = order
        .entries()
        .into_iter()
        .map(|(member, direction)| (member.member(), direction))
        .collect();
    assert_eq!(
        entries,
        [
            ("name", OrderDirection::Asc),
            ("price", OrderDirection::Desc),
            ("id", OrderDirection::Asc),
        ]
    );
    assert_eq!(
        order.to_string(),
        "OrderBy(test::Product.name Asc, test::Product.price Desc, test::Product.id Asc)"
    );
}

#[test]
fn order_by_map_lets_later_direction_win() {
    let order = OrderBy::ascending(member("name")).then_descending(member("name"));

    assert_eq!(order.to_map()["name"], OrderDirection::Desc);
}

#[test]
fn chains_compare_structurally() {
    let a = OrderBy::ascending(member("name")).then_descending(member("qty"));
    let b = OrderBy::ascending(member("name")).then_descending(member("qty"));
    let c = OrderBy::ascending(member("qty")).then_descending(member("name"));

    assert_eq!(a, b);
    assert_eq!(a.fingerprint(), b.fingerprint());
    assert_ne!(a, c);
    assert_ne!(a.fingerprint(), c.fingerprint());
}
