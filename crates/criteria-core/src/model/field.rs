use crate::value::ValueKind;
use std::fmt;

///
/// FieldModel
/// Runtime field metadata used by translation and evaluation.
///

#[derive(Debug)]
pub struct FieldModel {
    /// Field name as used in criteria and records.
    pub name: &'static str,
    /// Declared runtime type.
    pub kind: FieldKind,
    /// Whether the field admits `Null`; `has_value` on a non-nullable
    /// field folds to `true`.
    pub nullable: bool,
}

impl FieldModel {
    #[must_use]
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            nullable: false,
        }
    }

    #[must_use]
    pub const fn nullable(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            nullable: true,
        }
    }

    /// Value kind produced by reading this field.
    #[must_use]
    pub const fn value_kind(&self) -> ValueKind {
        self.kind.value_kind()
    }
}

///
/// FieldKind
///
/// Minimal type surface needed by the translator and evaluator.
/// Aligned with `Value` variants.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FieldKind {
    Bool,
    Int,
    Uint,
    Float32,
    Float64,
    Text,
    Date,
    List(&'static Self),
}

impl FieldKind {
    #[must_use]
    pub const fn value_kind(self) -> ValueKind {
        match self {
            Self::Bool => ValueKind::Bool,
            Self::Int => ValueKind::Int,
            Self::Uint => ValueKind::Uint,
            Self::Float32 => ValueKind::Float32,
            Self::Float64 => ValueKind::Float64,
            Self::Text => ValueKind::Text,
            Self::Date => ValueKind::Date,
            Self::List(_) => ValueKind::List,
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::List(inner) => write!(f, "List<{inner}>"),
            other => f.write_str(other.value_kind().label()),
        }
    }
}
