mod coerce;
mod compare;
mod kind;

#[cfg(test)]
mod tests;

use crate::{
    error::{ErrorOrigin, InternalError},
    types::{Date, Float32, Float64},
};
use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, fmt};

// re-exports
pub use kind::ValueKind;

///
/// Value
///
/// Literal carried by operand and criteria trees.
/// The variant is the literal's declared runtime type: `Int(1)` and `Uint(1)`
/// are different literals and never compare structurally equal.
///
/// Null → absent value (SQL NULL).
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float32(Float32),
    Float64(Float64),
    Text(String),
    Date(Date),
    /// Ordered list of values.
    /// List order is preserved for fingerprints and canonical text.
    List(Vec<Self>),
}

impl Value {
    ///
    /// CONSTRUCTION
    ///

    /// Build a `Value::List` from owned items.
    pub fn from_list<T>(items: Vec<T>) -> Self
    where
        T: Into<Self>,
    {
        Self::List(items.into_iter().map(Into::into).collect())
    }

    /// Build a `Value::List` from a slice literal.
    pub fn from_slice<T>(items: &[T]) -> Self
    where
        T: Into<Self> + Clone,
    {
        Self::List(items.iter().cloned().map(Into::into).collect())
    }

    /// Build a `Float64`; NaN and infinities are out of range.
    pub fn float64(v: f64) -> Result<Self, InternalError> {
        Float64::try_new(v)
            .map(Self::Float64)
            .ok_or_else(|| non_finite(v))
    }

    /// Build a `Float32`; NaN and infinities are out of range.
    pub fn float32(v: f32) -> Result<Self, InternalError> {
        Float32::try_new(v)
            .map(Self::Float32)
            .ok_or_else(|| non_finite(f64::from(v)))
    }

    ///
    /// TYPES
    ///

    /// Declared runtime type of this value.
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        kind::kind_of(self)
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        self.kind().is_numeric()
    }

    #[must_use]
    pub const fn is_collection(&self) -> bool {
        matches!(self, Self::List(_))
    }

    /// Text containing the wildcard character.
    #[must_use]
    pub fn is_wildcarded(&self, wildcard: char) -> bool {
        self.as_text().is_some_and(|s| s.contains(wildcard))
    }

    ///
    /// CONVERSION
    ///

    #[must_use]
    pub const fn as_text(&self) -> Option<&str> {
        if let Self::Text(s) = self {
            Some(s.as_str())
        } else {
            None
        }
    }

    #[must_use]
    pub const fn as_list(&self) -> Option<&[Self]> {
        if let Self::List(xs) = self {
            Some(xs.as_slice())
        } else {
            None
        }
    }

    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        if let Self::Bool(b) = self {
            Some(*b)
        } else {
            None
        }
    }

    /// Integer view used for positional arguments (`substring`, list index).
    #[must_use]
    pub fn as_index(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            Self::Uint(v) => i64::try_from(*v).ok(),
            _ => None,
        }
    }

    /// Double-precision view used by arithmetic; `Null` coerces to zero.
    #[must_use]
    pub fn to_f64(&self) -> Option<f64> {
        coerce::to_f64(self)
    }

    /// Convert a double back into the declared numeric `kind`.
    #[must_use]
    pub fn from_f64(kind: ValueKind, v: f64) -> Option<Self> {
        coerce::from_f64(kind, v)
    }

    /// Plain text rendering used by string concatenation; `Null` is empty.
    #[must_use]
    pub fn to_text_lossy(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::Bool(b) => b.to_string(),
            Self::Int(v) => v.to_string(),
            Self::Uint(v) => v.to_string(),
            Self::Float32(v) => v.to_string(),
            Self::Float64(v) => v.to_string(),
            Self::Text(s) => s.clone(),
            Self::Date(d) => d.to_string(),
            Self::List(xs) => xs
                .iter()
                .map(Self::to_text_lossy)
                .collect::<Vec<_>>()
                .join(","),
        }
    }

    ///
    /// COMPARISON
    ///

    /// Total-order comparison used by constant folding.
    #[must_use]
    pub fn fold_cmp(&self, other: &Self) -> Option<Ordering> {
        compare::fold_cmp(self, other)
    }

    /// Equality used by constant folding.
    #[must_use]
    pub fn fold_eq(&self, other: &Self) -> bool {
        compare::fold_eq(self, other)
    }
}

// Canonical text: `Kind(payload)`, so the declared type is always visible.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("Null"),
            Self::Bool(b) => write!(f, "Bool({b})"),
            Self::Int(v) => write!(f, "Int({v})"),
            Self::Uint(v) => write!(f, "Uint({v})"),
            Self::Float32(v) => write!(f, "Float32({v})"),
            Self::Float64(v) => write!(f, "Float64({v})"),
            Self::Text(s) => write!(f, "Text('{}')", s.replace('\'', "''")),
            Self::Date(d) => write!(f, "Date({d})"),
            Self::List(xs) => {
                f.write_str("List[")?;
                for (i, x) in xs.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{x}")?;
                }
                f.write_str("]")
            }
        }
    }
}

fn non_finite(v: f64) -> InternalError {
    InternalError::out_of_range(
        ErrorOrigin::Translate,
        format!("float constant {v} is not finite"),
    )
}

macro_rules! impl_value_from_for {
    ( $( $type:ty => $variant:ident ),* $(,)? ) => {
        $(
            impl From<$type> for Value {
                fn from(v: $type) -> Self {
                    Self::$variant(v.into())
                }
            }
        )*
    };
}

impl_value_from_for! {
    bool    => Bool,
    i8      => Int,
    i16     => Int,
    i32     => Int,
    i64     => Int,
    u8      => Uint,
    u16     => Uint,
    u32     => Uint,
    u64     => Uint,
    &str    => Text,
    String  => Text,
    Date    => Date,
    Float32 => Float32,
    Float64 => Float64,
}

impl TryFrom<f64> for Value {
    type Error = InternalError;

    fn try_from(v: f64) -> Result<Self, Self::Error> {
        Self::float64(v)
    }
}

impl TryFrom<f32> for Value {
    type Error = InternalError;

    fn try_from(v: f32) -> Result<Self, Self::Error> {
        Self::float32(v)
    }
}

impl From<Vec<Self>> for Value {
    fn from(vec: Vec<Self>) -> Self {
        Self::List(vec)
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}
