use crate::{
    DEFAULT_WILDCARD,
    criteria::CriteriaExpression,
    error::{ErrorOrigin, InternalError},
    obs::sink::{MetricsEvent, record},
    operation::{Operand, OperationExpression},
    operator::CriteriaOperator,
    value::Value,
};
use serde::{Deserialize, Serialize};
use std::fmt;

///
/// CompareCriteria
///
/// Comparison between a left operand and an optional right side.
///
/// Fields are private: every constructor runs value canonicalization, so the
/// comparator and right side of a built node always agree. Decoding checks
/// the same agreement before a node is accepted.
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(try_from = "RawCompare")]
pub struct CompareCriteria {
    left: OperationExpression,
    comparator: CriteriaOperator,
    right: CompareRight,
    ignore_case: bool,
}

///
/// CompareRight
///
/// Right side of a comparison. `Empty` for comparators that take no value.
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum CompareRight {
    Empty,
    Operand(Box<OperationExpression>),
    Expression(Box<CriteriaExpression>),
    Value(Value),
}

impl CompareCriteria {
    /// Compare `left` with a literal value using the default wildcard.
    pub fn with_value(
        left: OperationExpression,
        comparator: CriteriaOperator,
        value: impl Into<Value>,
    ) -> Result<Self, InternalError> {
        Self::with_value_wildcard(left, comparator, value.into(), DEFAULT_WILDCARD)
    }

    /// Compare `left` with a literal value.
    ///
    /// The comparator is rewritten by the value's runtime type:
    ///
    /// | family  | null      | list  | wildcarded text |
    /// |---------|-----------|-------|-----------------|
    /// | Equal   | IsNull    | In    | Like            |
    /// | Greater | IsNotNull | NotIn | Unlike          |
    ///
    /// Only `Equal` itself rewrites to `In` / `Like`; every Greater-family
    /// comparator rewrites. A non-null value on a comparator outside both
    /// families is an `InvalidOperatorUsage` error.
    pub fn with_value_wildcard(
        left: OperationExpression,
        comparator: CriteriaOperator,
        value: Value,
        wildcard: char,
    ) -> Result<Self, InternalError> {
        let (canonical, right) = assign_value(comparator, value, wildcard)?;

        if canonical != comparator {
            record(MetricsEvent::CanonicalRewrite {
                from: comparator,
                to: canonical,
            });
        }

        Ok(Self {
            left,
            comparator: canonical,
            right,
            ignore_case: false,
        })
    }

    /// Comparator with no right-hand value (`IsNull`, `IsNotNull`, ...).
    pub fn unary(
        left: OperationExpression,
        comparator: CriteriaOperator,
    ) -> Result<Self, InternalError> {
        Self::with_value(left, comparator, Value::Null)
    }

    /// Compare two operand subtrees using the default wildcard.
    pub fn with_operand(
        left: OperationExpression,
        comparator: CriteriaOperator,
        right: impl Into<Operand>,
    ) -> Result<Self, InternalError> {
        Self::with_operand_wildcard(left, comparator, right.into(), DEFAULT_WILDCARD)
    }

    /// Compare two operand subtrees.
    ///
    /// A literal right operand is a value: it goes through the same
    /// canonicalization as [`Self::with_value_wildcard`], and an unset
    /// literal counts as `Null`.
    pub fn with_operand_wildcard(
        left: OperationExpression,
        comparator: CriteriaOperator,
        right: Operand,
        wildcard: char,
    ) -> Result<Self, InternalError> {
        let right = match right {
            Operand::Value(value) => {
                return Self::with_value_wildcard(left, comparator, value, wildcard);
            }
            Operand::Expr(right) => *right,
        };

        match right {
            OperationExpression::Literal { value, has_value } => {
                let value = if has_value { value } else { Value::Null };
                Self::with_value_wildcard(left, comparator, value, wildcard)
            }
            right => {
                require_value_comparator(comparator, &right)?;

                Ok(Self {
                    left,
                    comparator,
                    right: CompareRight::Operand(Box::new(right)),
                    ignore_case: false,
                })
            }
        }
    }

    /// Compare an operand with a nested criteria expression (`In` subquery).
    pub fn with_expression(
        left: OperationExpression,
        comparator: CriteriaOperator,
        right: CriteriaExpression,
    ) -> Result<Self, InternalError> {
        require_value_comparator(comparator, &right)?;

        Ok(Self {
            left,
            comparator,
            right: CompareRight::Expression(Box::new(right)),
            ignore_case: false,
        })
    }

    #[must_use]
    pub const fn ignoring_case(mut self, ignore_case: bool) -> Self {
        self.ignore_case = ignore_case;
        self
    }

    #[must_use]
    pub const fn left(&self) -> &OperationExpression {
        &self.left
    }

    #[must_use]
    pub const fn comparator(&self) -> CriteriaOperator {
        self.comparator
    }

    #[must_use]
    pub const fn right(&self) -> &CompareRight {
        &self.right
    }

    #[must_use]
    pub const fn ignore_case(&self) -> bool {
        self.ignore_case
    }

    /// Owner entity: left operand first, then a right operand subtree.
    #[must_use]
    pub fn owner_type(&self) -> Option<&str> {
        self.left.owner_type().or_else(|| match &self.right {
            CompareRight::Operand(right) => right.owner_type(),
            _ => None,
        })
    }
}

fn require_value_comparator(
    comparator: CriteriaOperator,
    right: &impl fmt::Display,
) -> Result<(), InternalError> {
    if comparator.accepts_value() {
        Ok(())
    } else {
        Err(InternalError::invalid_operator(
            ErrorOrigin::Canonicalize,
            format!("comparator {comparator} does not take a right side, got {right}"),
        ))
    }
}

/// Canonical comparator and right side for a literal value.
pub(crate) fn assign_value(
    comparator: CriteriaOperator,
    value: Value,
    wildcard: char,
) -> Result<(CriteriaOperator, CompareRight), InternalError> {
    use CriteriaOperator as Op;

    if value.is_null() {
        let assigned = if comparator.is_equal_family() {
            (Op::IsNull, CompareRight::Empty)
        } else if comparator.is_greater_family() {
            (Op::IsNotNull, CompareRight::Empty)
        } else if comparator == Op::None {
            (
                Op::None,
                CompareRight::Expression(Box::new(CriteriaExpression::ShortCircuit(true))),
            )
        } else {
            (comparator, CompareRight::Empty)
        };

        return Ok(assigned);
    }

    if !comparator.accepts_value() {
        return Err(InternalError::invalid_operator(
            ErrorOrigin::Canonicalize,
            format!("comparator {comparator} does not take a value, got {value}"),
        ));
    }

    let canonical = if value.is_collection() {
        collection_comparator(comparator)
    } else if value.is_wildcarded(wildcard) {
        match comparator {
            Op::Equal => Op::Like,
            op if op.is_greater_family() => Op::Unlike,
            op => op,
        }
    } else {
        comparator
    };

    Ok((canonical, CompareRight::Value(value)))
}

/// Comparator used against a literal collection.
const fn collection_comparator(comparator: CriteriaOperator) -> CriteriaOperator {
    use CriteriaOperator as Op;

    match comparator {
        Op::Equal => Op::In,
        op if op.is_greater_family() => Op::NotIn,
        op => op,
    }
}

///
/// RawCompare
///
/// Decoded comparison before the canonical-shape check.
///

#[derive(Deserialize)]
#[serde(rename = "CompareCriteria")]
struct RawCompare {
    left: OperationExpression,
    comparator: CriteriaOperator,
    right: CompareRight,
    ignore_case: bool,
}

impl TryFrom<RawCompare> for CompareCriteria {
    type Error = InternalError;

    fn try_from(raw: RawCompare) -> Result<Self, Self::Error> {
        let RawCompare {
            left,
            comparator,
            right,
            ignore_case,
        } = raw;

        check_canonical(comparator, &right)?;

        Ok(Self {
            left,
            comparator,
            right,
            ignore_case,
        })
    }
}

/// A decoded comparator and right side must be a pair some constructor
/// could have produced. Wildcard rewrites depend on configuration and are
/// not re-checked.
fn check_canonical(comparator: CriteriaOperator, right: &CompareRight) -> Result<(), InternalError> {
    let canonical = match right {
        CompareRight::Empty => !comparator.accepts_value() && comparator != CriteriaOperator::None,
        CompareRight::Value(value) => {
            !value.is_null()
                && comparator.accepts_value()
                && (!value.is_collection() || collection_comparator(comparator) == comparator)
        }
        CompareRight::Operand(operand) => {
            comparator.accepts_value()
                && !matches!(**operand, OperationExpression::Literal { .. })
        }
        CompareRight::Expression(expr) => {
            comparator.accepts_value()
                || (comparator == CriteriaOperator::None
                    && expr.as_short_circuit() == Some(true))
        }
    };

    if canonical {
        Ok(())
    } else {
        Err(InternalError::invalid_operator(
            ErrorOrigin::Serialize,
            format!("decoded comparator {comparator} does not match its right side"),
        ))
    }
}

impl fmt::Display for CompareCriteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Compare({}, {}", self.left, self.comparator)?;
        match &self.right {
            CompareRight::Empty => {}
            CompareRight::Operand(right) => write!(f, ", {right}")?,
            CompareRight::Expression(right) => write!(f, ", {right}")?,
            CompareRight::Value(value) => write!(f, ", {value}")?,
        }
        if self.ignore_case {
            f.write_str(", ignore_case")?;
        }
        f.write_str(")")
    }
}
