//! Predicate tree: a boolean filter over one owner entity.

mod compare;
mod exists;

#[cfg(test)]
mod tests;

use crate::operator::CriteriaLogical;
use serde::{Deserialize, Serialize};
use std::{
    fmt,
    ops::{BitAnd, BitOr, Not},
};

// re-exports
pub use compare::{CompareCriteria, CompareRight};
pub use exists::{ExistsCriteria, SubqueryInner};

///
/// CriteriaExpression
///
/// Predicate tree node. Exactly one shape per node:
///
/// - `Logical`      → `left op right`; `Not` has no left side
/// - `Compare`      → comparison between operands or against a literal
/// - `Exists`       → existence subquery
/// - `ShortCircuit` → boolean folded at construction time
///
/// Nodes are immutable once built and safe to share across threads.
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum CriteriaExpression {
    Logical {
        left: Option<Box<Self>>,
        op: CriteriaLogical,
        right: Box<Self>,
    },
    Compare(CompareCriteria),
    Exists(ExistsCriteria),
    ShortCircuit(bool),
}

impl CriteriaExpression {
    #[must_use]
    pub fn and(left: Self, right: Self) -> Self {
        Self::Logical {
            left: Some(Box::new(left)),
            op: CriteriaLogical::And,
            right: Box::new(right),
        }
    }

    #[must_use]
    pub fn or(left: Self, right: Self) -> Self {
        Self::Logical {
            left: Some(Box::new(left)),
            op: CriteriaLogical::Or,
            right: Box::new(right),
        }
    }

    #[must_use]
    pub fn negate(operand: Self) -> Self {
        Self::Logical {
            left: None,
            op: CriteriaLogical::Not,
            right: Box::new(operand),
        }
    }

    /// Owner entity of the first typed operand found.
    ///
    /// Logical nodes look left then right, comparisons look at the left
    /// operand then the right operand, subqueries look at `outer` only.
    #[must_use]
    pub fn owner_type(&self) -> Option<&str> {
        match self {
            Self::Logical { left, right, .. } => left
                .as_deref()
                .and_then(Self::owner_type)
                .or_else(|| right.owner_type()),
            Self::Compare(compare) => compare.owner_type(),
            Self::Exists(exists) => exists.outer.owner_type(),
            Self::ShortCircuit(_) => None,
        }
    }

    #[must_use]
    pub const fn as_short_circuit(&self) -> Option<bool> {
        match self {
            Self::ShortCircuit(value) => Some(*value),
            _ => None,
        }
    }
}

impl From<CompareCriteria> for CriteriaExpression {
    fn from(compare: CompareCriteria) -> Self {
        Self::Compare(compare)
    }
}

impl From<ExistsCriteria> for CriteriaExpression {
    fn from(exists: ExistsCriteria) -> Self {
        Self::Exists(exists)
    }
}

impl BitAnd for CriteriaExpression {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        Self::and(self, rhs)
    }
}

impl BitOr for CriteriaExpression {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self::or(self, rhs)
    }
}

impl Not for CriteriaExpression {
    type Output = Self;

    fn not(self) -> Self::Output {
        Self::negate(self)
    }
}

impl fmt::Display for CriteriaExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Logical {
                left: Some(left),
                op,
                right,
            } => write!(f, "({left}{}{right})", op.token()),
            Self::Logical {
                left: None,
                op,
                right,
            } => write!(f, "({}{right})", op.token().trim_start()),
            Self::Compare(compare) => write!(f, "{compare}"),
            Self::Exists(exists) => write!(f, "{exists}"),
            Self::ShortCircuit(value) => write!(f, "ShortCircuit({value})"),
        }
    }
}
