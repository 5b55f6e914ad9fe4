use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::fmt;

///
/// ValueKind
///
/// Declared runtime type of a value, and the stable canonical variant tag
/// used by fingerprint encodings.
///
/// IMPORTANT:
/// Tag values are part of stable behavior; fingerprints persisted as cache
/// keys depend on them.
///

#[repr(u8)]
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum ValueKind {
    Null = 1,
    Bool = 2,
    Int = 3,
    Uint = 4,
    Float32 = 5,
    Float64 = 6,
    Text = 7,
    Date = 8,
    List = 9,
}

impl ValueKind {
    /// Stable wire/hash byte tag for this variant.
    #[must_use]
    pub const fn to_u8(self) -> u8 {
        self as u8
    }

    /// Stable human-readable value kind label for diagnostics.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Null => "Null",
            Self::Bool => "Bool",
            Self::Int => "Int",
            Self::Uint => "Uint",
            Self::Float32 => "Float32",
            Self::Float64 => "Float64",
            Self::Text => "Text",
            Self::Date => "Date",
            Self::List => "List",
        }
    }

    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::Int | Self::Uint | Self::Float32 | Self::Float64)
    }

    #[must_use]
    pub const fn is_text(self) -> bool {
        matches!(self, Self::Text)
    }

    /// Result kind of a binary arithmetic node.
    ///
    /// Text on either side makes the node a concatenation. Numeric kinds
    /// promote Float64 > Float32 > Int > Uint; `Null` defers to the other side.
    /// Returns `None` when no arithmetic kind applies.
    #[must_use]
    pub const fn arithmetic_result(left: Self, right: Self) -> Option<Self> {
        match (left, right) {
            (Self::Text, _) | (_, Self::Text) => Some(Self::Text),
            (Self::Null, Self::Null) => None,
            (Self::Null, other) | (other, Self::Null) => {
                if other.is_numeric() {
                    Some(other)
                } else {
                    None
                }
            }
            (Self::Float64, r) if r.is_numeric() => Some(Self::Float64),
            (l, Self::Float64) if l.is_numeric() => Some(Self::Float64),
            (Self::Float32, r) if r.is_numeric() => Some(Self::Float32),
            (l, Self::Float32) if l.is_numeric() => Some(Self::Float32),
            (Self::Int, Self::Int | Self::Uint) | (Self::Uint, Self::Int) => Some(Self::Int),
            (Self::Uint, Self::Uint) => Some(Self::Uint),
            _ => None,
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Stable canonical kind for one value.
#[must_use]
pub(super) const fn kind_of(value: &Value) -> ValueKind {
    match value {
        Value::Null => ValueKind::Null,
        Value::Bool(_) => ValueKind::Bool,
        Value::Int(_) => ValueKind::Int,
        Value::Uint(_) => ValueKind::Uint,
        Value::Float32(_) => ValueKind::Float32,
        Value::Float64(_) => ValueKind::Float64,
        Value::Text(_) => ValueKind::Text,
        Value::Date(_) => ValueKind::Date,
        Value::List(_) => ValueKind::List,
    }
}
