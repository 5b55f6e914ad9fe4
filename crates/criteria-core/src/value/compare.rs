use crate::value::Value;
use std::cmp::Ordering;

/// Total-order comparison used by constant folding.
///
/// Numeric variants compare across kinds (integers exactly, anything with a
/// float through f64). Bool, Text and Date compare only within their own
/// variant. Null and List do not participate and yield `None`.
#[must_use]
pub(super) fn fold_cmp(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        (Value::Text(a), Value::Text(b)) => Some(a.cmp(b)),
        (Value::Date(a), Value::Date(b)) => Some(a.cmp(b)),
        (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
        (Value::Uint(a), Value::Uint(b)) => Some(a.cmp(b)),
        (Value::Int(a), Value::Uint(b)) => Some(i128::from(*a).cmp(&i128::from(*b))),
        (Value::Uint(a), Value::Int(b)) => Some(i128::from(*a).cmp(&i128::from(*b))),
        (left, right) if left.is_numeric() && right.is_numeric() => {
            let (a, b) = (left.to_f64()?, right.to_f64()?);
            a.partial_cmp(&b)
        }
        _ => None,
    }
}

/// Equality used by constant folding when no total order applies.
///
/// Falls back to structural equality, so `null == null` folds to `true`
/// and mismatched kinds fold to `false`.
#[must_use]
pub(super) fn fold_eq(left: &Value, right: &Value) -> bool {
    fold_cmp(left, right).map_or_else(|| left == right, |ord| ord == Ordering::Equal)
}
