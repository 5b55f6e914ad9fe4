use crate::{
    criteria::CriteriaExpression,
    operation::OperationExpression,
    operator::CriteriaOperator,
};
use serde::{Deserialize, Serialize};
use std::fmt;

///
/// ExistsCriteria
///
/// Existence subquery against a detail entity. `outer` is the master-side
/// operand; `inner` is either the detail foreign key or a full sub-predicate.
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct ExistsCriteria {
    pub outer: OperationExpression,
    pub inner: SubqueryInner,
    pub negate: bool,
}

impl ExistsCriteria {
    #[must_use]
    pub const fn new(outer: OperationExpression, inner: SubqueryInner, negate: bool) -> Self {
        Self {
            outer,
            inner,
            negate,
        }
    }

    /// `Exists` or `NotExists`.
    #[must_use]
    pub const fn comparator(&self) -> CriteriaOperator {
        if self.negate {
            CriteriaOperator::NotExists
        } else {
            CriteriaOperator::Exists
        }
    }
}

///
/// SubqueryInner
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum SubqueryInner {
    ForeignKey(OperationExpression),
    Criteria(Box<CriteriaExpression>),
}

impl fmt::Display for ExistsCriteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({}, ", self.comparator(), self.outer)?;
        match &self.inner {
            SubqueryInner::ForeignKey(fk) => write!(f, "{fk}")?,
            SubqueryInner::Criteria(criteria) => write!(f, "{criteria}")?,
        }
        f.write_str(")")
    }
}
