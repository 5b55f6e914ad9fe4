use crate::{
    operator::OperationSign,
    value::{Value, ValueKind},
};

///
/// Fault
///
/// Why a sign could not be applied to concrete values. Callers attach
/// their own error origin and canonical text.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Fault {
    Unsupported,
    OutOfRange,
}

/// Apply an arithmetic sign to two computed values.
///
/// `kind` is the declared result type of the node. Text `Add` concatenates
/// with `Null` read as the empty string; numeric signs go through `f64` and
/// convert back to `kind`.
pub(crate) fn arithmetic(
    kind: ValueKind,
    sign: OperationSign,
    left: &Value,
    right: &Value,
) -> Result<Value, Fault> {
    if kind.is_text() {
        return match sign {
            OperationSign::Add => {
                let mut text = left.to_text_lossy();
                text.push_str(&right.to_text_lossy());
                Ok(Value::Text(text))
            }
            _ => Err(Fault::Unsupported),
        };
    }

    if !kind.is_numeric() {
        return Err(Fault::Unsupported);
    }

    let (Some(a), Some(b)) = (left.to_f64(), right.to_f64()) else {
        return Err(Fault::Unsupported);
    };

    let v = match sign {
        OperationSign::Add => a + b,
        OperationSign::Subtract => a - b,
        OperationSign::Multiply => a * b,
        OperationSign::Divide => a / b,
        _ => return Err(Fault::Unsupported),
    };

    Value::from_f64(kind, v).ok_or(Fault::OutOfRange)
}

/// Apply a string sign to an already null-coalesced text.
///
/// `args` are the integer arguments (only `Substring` takes any): one
/// argument is the start, two are start and length. Positions count chars.
pub(crate) fn string(sign: OperationSign, text: &str, args: &[i64]) -> Result<Value, Fault> {
    if sign != OperationSign::Substring && !args.is_empty() {
        return Err(Fault::OutOfRange);
    }

    let value = match sign {
        OperationSign::Length => {
            Value::Int(i64::try_from(text.chars().count()).map_err(|_| Fault::OutOfRange)?)
        }
        OperationSign::ToLower => Value::Text(text.to_lowercase()),
        OperationSign::ToUpper => Value::Text(text.to_uppercase()),
        OperationSign::TrimStart => Value::Text(text.trim_start().to_string()),
        OperationSign::TrimEnd => Value::Text(text.trim_end().to_string()),
        OperationSign::Trim => Value::Text(text.trim().to_string()),
        OperationSign::Substring => Value::Text(substring(text, args)?),
        _ => return Err(Fault::Unsupported),
    };

    Ok(value)
}

fn substring(text: &str, args: &[i64]) -> Result<String, Fault> {
    let count = text.chars().count();
    let position = |v: i64| usize::try_from(v).map_err(|_| Fault::OutOfRange);

    let (start, len) = match *args {
        [] => return Ok(text.to_string()),
        [start] => {
            let start = position(start)?;
            (start, count.checked_sub(start).ok_or(Fault::OutOfRange)?)
        }
        [start, len] => (position(start)?, position(len)?),
        _ => return Err(Fault::OutOfRange),
    };

    match start.checked_add(len) {
        Some(end) if end <= count => Ok(text.chars().skip(start).take(len).collect()),
        _ => Err(Fault::OutOfRange),
    }
}

///
/// TESTS
///
