use crate::{
    types::{Float32, Float64},
    value::{Value, ValueKind},
};

// Exclusive upper bounds of the integer ranges representable after rounding.
const I64_UPPER: f64 = 9_223_372_036_854_775_808.0;
const U64_UPPER: f64 = 18_446_744_073_709_551_616.0;

/// Coerce a value to double precision for arithmetic.
///
/// Null coerces to zero. Non-numeric kinds return `None`.
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub(super) fn to_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Null => Some(0.0),
        Value::Int(v) => Some(*v as f64),
        Value::Uint(v) => Some(*v as f64),
        Value::Float32(v) => Some(f64::from(v.get())),
        Value::Float64(v) => Some(v.get()),
        _ => None,
    }
}

/// Convert a double back into a declared numeric kind.
///
/// Integer kinds round half to even. Returns `None` for non-finite input,
/// values outside the target range, or a non-numeric target kind.
#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
#[must_use]
pub(super) fn from_f64(kind: ValueKind, v: f64) -> Option<Value> {
    if !v.is_finite() {
        return None;
    }

    match kind {
        ValueKind::Int => {
            let r = v.round_ties_even();
            (-I64_UPPER..I64_UPPER)
                .contains(&r)
                .then(|| Value::Int(r as i64))
        }
        ValueKind::Uint => {
            let r = v.round_ties_even();
            (0.0..U64_UPPER).contains(&r).then(|| Value::Uint(r as u64))
        }
        ValueKind::Float32 => Float32::try_new(v as f32).map(Value::Float32),
        ValueKind::Float64 => Float64::try_new(v).map(Value::Float64),
        _ => None,
    }
}
