//! Operator vocabularies shared by the operand and criteria trees.
//!
//! Each operator carries a stable byte tag (fingerprint encoding) and the
//! rendering token honored by the SQL-generation layer.

use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, fmt};

///
/// CriteriaOperator
///
/// Comparator used inside a `Compare` node.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[repr(u8)]
pub enum CriteriaOperator {
    #[default]
    None = 0x00,
    Equal = 0x01,
    Greater = 0x02,
    GreaterOrEqual = 0x03,
    Lesser = 0x04,
    LesserOrEqual = 0x05,
    Unequal = 0x06,
    Like = 0x07,
    LikeLeft = 0x08,
    LikeRight = 0x09,
    Unlike = 0x0a,
    IsNull = 0x0b,
    IsNotNull = 0x0c,
    In = 0x0d,
    NotIn = 0x0e,
    Exists = 0x0f,
    NotExists = 0x10,
}

impl CriteriaOperator {
    #[must_use]
    pub const fn tag(self) -> u8 {
        self as u8
    }

    /// Rendering token for the SQL-generation layer.
    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Self::None => "",
            Self::Equal => "=",
            Self::Greater => ">",
            Self::GreaterOrEqual => ">=",
            Self::Lesser => "<",
            Self::LesserOrEqual => "<=",
            Self::Unequal => "<>",
            Self::Like | Self::LikeLeft | Self::LikeRight => " like ",
            Self::Unlike => " not like ",
            Self::IsNull => " is null ",
            Self::IsNotNull => " is not null ",
            Self::In => " in ",
            Self::NotIn => " not in ",
            Self::Exists => " exists ",
            Self::NotExists => " not exists ",
        }
    }

    /// Comparators whose null value rewrites to `IsNull`.
    #[must_use]
    pub const fn is_equal_family(self) -> bool {
        matches!(
            self,
            Self::Equal | Self::Like | Self::LikeLeft | Self::LikeRight | Self::In
        )
    }

    /// Comparators whose null value rewrites to `IsNotNull`.
    #[must_use]
    pub const fn is_greater_family(self) -> bool {
        matches!(
            self,
            Self::Greater
                | Self::GreaterOrEqual
                | Self::Lesser
                | Self::LesserOrEqual
                | Self::Unequal
                | Self::Unlike
                | Self::NotIn
        )
    }

    /// Comparators that take a right-hand value.
    #[must_use]
    pub const fn accepts_value(self) -> bool {
        self.is_equal_family() || self.is_greater_family()
    }

    /// Comparators that can fold two literals with a total order.
    #[must_use]
    pub const fn is_ordering(self) -> bool {
        matches!(
            self,
            Self::Equal
                | Self::Greater
                | Self::GreaterOrEqual
                | Self::Lesser
                | Self::LesserOrEqual
                | Self::Unequal
        )
    }

    /// Comparator to use when the two sides swap places.
    #[must_use]
    pub const fn reverse(self) -> Self {
        match self {
            Self::Greater => Self::Lesser,
            Self::Lesser => Self::Greater,
            Self::GreaterOrEqual => Self::LesserOrEqual,
            Self::LesserOrEqual => Self::GreaterOrEqual,
            other => other,
        }
    }

    /// Whether `ord` (left compared with right) satisfies this comparator.
    ///
    /// Only meaningful for ordering comparators; all others return `None`.
    #[must_use]
    pub const fn matches_ordering(self, ord: Ordering) -> Option<bool> {
        let hit = match self {
            Self::Equal => matches!(ord, Ordering::Equal),
            Self::Unequal => !matches!(ord, Ordering::Equal),
            Self::Greater => matches!(ord, Ordering::Greater),
            Self::GreaterOrEqual => !matches!(ord, Ordering::Less),
            Self::Lesser => matches!(ord, Ordering::Less),
            Self::LesserOrEqual => !matches!(ord, Ordering::Greater),
            _ => return None,
        };

        Some(hit)
    }
}

impl fmt::Display for CriteriaOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

///
/// OperationSign
///
/// Operator used inside a `Binary` or `Unary` operand node.
/// Arithmetic signs join two operands; string signs apply to a single
/// text operand and may only appear on the right-hand target.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[repr(u8)]
pub enum OperationSign {
    #[default]
    None = 0x00,
    Add = 0x01,
    Subtract = 0x02,
    Multiply = 0x03,
    Divide = 0x04,
    Length = 0x05,
    ToLower = 0x06,
    ToUpper = 0x07,
    TrimStart = 0x08,
    TrimEnd = 0x09,
    Trim = 0x0a,
    Substring = 0x0b,
}

impl OperationSign {
    #[must_use]
    pub const fn tag(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Self::None => "",
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Length => "length",
            Self::ToLower => "lower",
            Self::ToUpper => "upper",
            Self::TrimStart => "ltrim",
            Self::TrimEnd => "rtrim",
            Self::Trim => "trim",
            Self::Substring => "substring",
        }
    }

    #[must_use]
    pub const fn is_arithmetic(self) -> bool {
        matches!(
            self,
            Self::Add | Self::Subtract | Self::Multiply | Self::Divide
        )
    }

    #[must_use]
    pub const fn is_string(self) -> bool {
        matches!(
            self,
            Self::Length
                | Self::ToLower
                | Self::ToUpper
                | Self::TrimStart
                | Self::TrimEnd
                | Self::Trim
                | Self::Substring
        )
    }

    /// String sign reached through member access (`name.length`).
    #[must_use]
    pub fn from_member(name: &str) -> Option<Self> {
        match name {
            "length" => Some(Self::Length),
            _ => None,
        }
    }

    /// String sign reached through a method call (`name.to_lower()`).
    #[must_use]
    pub fn from_method(name: &str) -> Option<Self> {
        match name {
            "length" => Some(Self::Length),
            "to_lower" => Some(Self::ToLower),
            "to_upper" => Some(Self::ToUpper),
            "trim_start" => Some(Self::TrimStart),
            "trim_end" => Some(Self::TrimEnd),
            "trim" => Some(Self::Trim),
            "substring" => Some(Self::Substring),
            _ => None,
        }
    }
}

impl fmt::Display for OperationSign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

///
/// CriteriaLogical
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[repr(u8)]
pub enum CriteriaLogical {
    And = 0x01,
    Or = 0x02,
    Not = 0x03,
}

impl CriteriaLogical {
    #[must_use]
    pub const fn tag(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Self::And => " and ",
            Self::Or => " or ",
            Self::Not => " not ",
        }
    }
}

impl fmt::Display for CriteriaLogical {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

///
/// TESTS
///
