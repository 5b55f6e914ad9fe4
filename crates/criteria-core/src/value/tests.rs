use super::*;

#[test]
fn declared_type_is_part_of_equality() {
    assert_ne!(Value::Int(1), Value::Uint(1));
    assert_ne!(Value::Int(1), Value::float64(1.0).expect("finite"));
    assert_eq!(Value::Int(1), Value::from(1_i32));
}

#[test]
fn fold_cmp_widens_numeric_kinds() {
    assert_eq!(
        Value::Int(3).fold_cmp(&Value::float64(2.5).expect("finite")),
        Some(Ordering::Greater)
    );
    assert_eq!(
        Value::Int(-1).fold_cmp(&Value::Uint(u64::MAX)),
        Some(Ordering::Less)
    );
    assert_eq!(
        Value::Uint(2).fold_cmp(&Value::Int(2)),
        Some(Ordering::Equal)
    );
}

#[test]
fn fold_cmp_rejects_mixed_non_numeric_kinds() {
    assert_eq!(Value::Text("a".into()).fold_cmp(&Value::Int(1)), None);
    assert_eq!(Value::Null.fold_cmp(&Value::Null), None);
    assert_eq!(
        Value::from_slice(&[1_i64, 2]).fold_cmp(&Value::from_slice(&[1_i64, 2])),
        None
    );
}

#[test]
fn fold_eq_falls_back_to_structural_equality() {
    assert!(Value::Null.fold_eq(&Value::Null));
    assert!(!Value::Null.fold_eq(&Value::Int(0)));
    assert!(Value::from_slice(&[1_i64, 2]).fold_eq(&Value::from_slice(&[1_i64, 2])));
    assert!(Value::Int(2).fold_eq(&Value::float64(2.0).expect("finite")));
}

#[test]
fn null_coerces_to_zero_for_arithmetic() {
    assert_eq!(Value::Null.to_f64(), Some(0.0));
    assert_eq!(Value::Text("1".into()).to_f64(), None);
}

#[test]
fn from_f64_rounds_half_to_even_for_integers() {
    assert_eq!(Value::from_f64(ValueKind::Int, 2.5), Some(Value::Int(2)));
    assert_eq!(Value::from_f64(ValueKind::Int, 3.5), Some(Value::Int(4)));
    assert_eq!(Value::from_f64(ValueKind::Uint, -1.0), None);
    assert_eq!(Value::from_f64(ValueKind::Int, f64::INFINITY), None);
    assert_eq!(Value::from_f64(ValueKind::Text, 1.0), None);
    assert_eq!(
        Value::from_f64(ValueKind::Float64, 2.5),
        Some(Value::float64(2.5).expect("finite"))
    );
}

#[test]
fn arithmetic_result_promotes_kinds() {
    use ValueKind as K;

    assert_eq!(K::arithmetic_result(K::Int, K::Float64), Some(K::Float64));
    assert_eq!(K::arithmetic_result(K::Float32, K::Uint), Some(K::Float32));
    assert_eq!(K::arithmetic_result(K::Uint, K::Int), Some(K::Int));
    assert_eq!(K::arithmetic_result(K::Uint, K::Uint), Some(K::Uint));
    assert_eq!(K::arithmetic_result(K::Null, K::Int), Some(K::Int));
    assert_eq!(K::arithmetic_result(K::Int, K::Text), Some(K::Text));
    assert_eq!(K::arithmetic_result(K::Bool, K::Int), None);
    assert_eq!(K::arithmetic_result(K::Date, K::Date), None);
}

#[test]
fn canonical_text_shows_declared_type() {
    assert_eq!(Value::Int(5).to_string(), "Int(5)");
    assert_eq!(Value::Text("it's".into()).to_string(), "Text('it''s')");
    assert_eq!(
        Value::from_slice(&[1_u64, 2]).to_string(),
        "List[Uint(1), Uint(2)]"
    );
    assert_eq!(Value::Null.to_string(), "Null");
}

#[test]
fn wildcard_detection_only_applies_to_text() {
    assert!(Value::Text("a%b".into()).is_wildcarded('%'));
    assert!(!Value::Text("ab".into()).is_wildcarded('%'));
    assert!(!Value::Int(1).is_wildcarded('%'));
}

#[test]
fn option_maps_none_to_null() {
    assert_eq!(Value::from(None::<i64>), Value::Null);
    assert_eq!(Value::from(Some("x")), Value::Text("x".into()));
}
