//! Projection of criteria and operand trees into caller-defined output.
//!
//! A projection receives each node kind through its own method, children
//! already projected, so SQL builders and diagnostics never match on tree
//! internals directly.

use crate::{
    criteria::{CompareRight, CriteriaExpression, SubqueryInner},
    operation::{MemberRef, Operand, OperationExpression},
    operator::{CriteriaLogical, CriteriaOperator, OperationSign},
    value::Value,
};

///
/// OperationProjection
///
/// Shared visitor for projecting operand trees.
///

pub trait OperationProjection {
    type Output;

    fn member(&mut self, member: &MemberRef) -> Self::Output;
    fn literal(&mut self, value: &Value, has_value: bool) -> Self::Output;
    fn binary(
        &mut self,
        sign: OperationSign,
        left: Self::Output,
        right: Self::Output,
    ) -> Self::Output;
    fn unary(
        &mut self,
        sign: OperationSign,
        operand: Self::Output,
        args: Vec<Self::Output>,
    ) -> Self::Output;
}

///
/// CriteriaProjection
///
/// Shared visitor for projecting predicate trees. Operands inside the
/// predicate go through the `OperationProjection` half.
///

pub trait CriteriaProjection: OperationProjection {
    /// `left` is `None` for `Not`.
    fn logical(
        &mut self,
        op: CriteriaLogical,
        left: Option<Self::Output>,
        right: Self::Output,
    ) -> Self::Output;

    /// `right` is `None` for comparators without a right side.
    fn compare(
        &mut self,
        left: Self::Output,
        comparator: CriteriaOperator,
        right: Option<Self::Output>,
        ignore_case: bool,
    ) -> Self::Output;

    fn exists(
        &mut self,
        comparator: CriteriaOperator,
        outer: Self::Output,
        inner: Self::Output,
    ) -> Self::Output;

    fn short_circuit(&mut self, value: bool) -> Self::Output;
}

/// Project an operand tree bottom-up.
pub fn project_operation<P>(expr: &OperationExpression, projection: &mut P) -> P::Output
where
    P: OperationProjection + ?Sized,
{
    match expr {
        OperationExpression::Member(member) => projection.member(member),
        OperationExpression::Literal { value, has_value } => projection.literal(value, *has_value),
        OperationExpression::Binary { left, sign, right } => {
            let left = project_operand(left, projection);
            let right = project_operand(right, projection);
            projection.binary(*sign, left, right)
        }
        OperationExpression::Unary {
            sign,
            operand,
            args,
        } => {
            let operand = project_operation(operand, projection);
            let args = args
                .iter()
                .map(|arg| project_operation(arg, projection))
                .collect();
            projection.unary(*sign, operand, args)
        }
    }
}

// Plain values on a binary side project as assigned literals.
fn project_operand<P>(operand: &Operand, projection: &mut P) -> P::Output
where
    P: OperationProjection + ?Sized,
{
    match operand {
        Operand::Expr(expr) => project_operation(expr, projection),
        Operand::Value(value) => projection.literal(value, true),
    }
}

/// Project a predicate tree bottom-up, left before right.
pub fn project_criteria<P>(expr: &CriteriaExpression, projection: &mut P) -> P::Output
where
    P: CriteriaProjection + ?Sized,
{
    match expr {
        CriteriaExpression::Logical { left, op, right } => {
            let left = left
                .as_deref()
                .map(|left| project_criteria(left, projection));
            let right = project_criteria(right, projection);
            projection.logical(*op, left, right)
        }
        CriteriaExpression::Compare(compare) => {
            let left = project_operation(compare.left(), projection);
            let right = match compare.right() {
                CompareRight::Empty => None,
                CompareRight::Operand(right) => Some(project_operation(right, projection)),
                CompareRight::Expression(right) => Some(project_criteria(right, projection)),
                CompareRight::Value(value) => Some(projection.literal(value, true)),
            };
            projection.compare(left, compare.comparator(), right, compare.ignore_case())
        }
        CriteriaExpression::Exists(exists) => {
            let outer = project_operation(&exists.outer, projection);
            let inner = match &exists.inner {
                SubqueryInner::ForeignKey(fk) => project_operation(fk, projection),
                SubqueryInner::Criteria(criteria) => project_criteria(criteria, projection),
            };
            projection.exists(exists.comparator(), outer, inner)
        }
        CriteriaExpression::ShortCircuit(value) => projection.short_circuit(*value),
    }
}

///
/// TESTS
///
