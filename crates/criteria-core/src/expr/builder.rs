use crate::{
    expr::{BinaryOp, Expr, UnaryOp},
    model::EntityModel,
    types::Date,
    value::Value,
};
use std::ops::{Add, BitAnd, BitOr, Div, Mul, Neg, Not, Sub};

/// The row parameter.
#[must_use]
pub const fn row() -> Expr {
    Expr::Row
}

/// Member access directly off the row parameter.
#[must_use]
pub fn field(name: impl Into<String>) -> Expr {
    row().member(name)
}

/// Closed-over constant.
#[must_use]
pub fn lit(value: impl Into<Value>) -> Expr {
    Expr::Constant(value.into())
}

pub(super) fn is_predicate_method(method: &str) -> bool {
    matches!(method, "contains" | "starts_with" | "ends_with" | "equals")
}

impl Expr {
    #[must_use]
    pub fn member(self, name: impl Into<String>) -> Self {
        Self::Member {
            target: Box::new(self),
            name: name.into(),
        }
    }

    fn binary(self, op: BinaryOp, rhs: impl Into<Self>) -> Self {
        Self::Binary {
            op,
            left: Box::new(self),
            right: Box::new(rhs.into()),
        }
    }

    fn unary(self, op: UnaryOp) -> Self {
        Self::Unary {
            op,
            operand: Box::new(self),
        }
    }

    // ------------------------------------------------------------------
    // Comparisons
    // ------------------------------------------------------------------

    #[must_use]
    pub fn eq(self, rhs: impl Into<Self>) -> Self {
        self.binary(BinaryOp::Equal, rhs)
    }

    #[must_use]
    pub fn ne(self, rhs: impl Into<Self>) -> Self {
        self.binary(BinaryOp::NotEqual, rhs)
    }

    #[must_use]
    pub fn gt(self, rhs: impl Into<Self>) -> Self {
        self.binary(BinaryOp::Greater, rhs)
    }

    #[must_use]
    pub fn gte(self, rhs: impl Into<Self>) -> Self {
        self.binary(BinaryOp::GreaterOrEqual, rhs)
    }

    #[must_use]
    pub fn lt(self, rhs: impl Into<Self>) -> Self {
        self.binary(BinaryOp::Less, rhs)
    }

    #[must_use]
    pub fn lte(self, rhs: impl Into<Self>) -> Self {
        self.binary(BinaryOp::LessOrEqual, rhs)
    }

    #[must_use]
    pub fn and(self, rhs: impl Into<Self>) -> Self {
        self.binary(BinaryOp::AndAlso, rhs)
    }

    #[must_use]
    pub fn or(self, rhs: impl Into<Self>) -> Self {
        self.binary(BinaryOp::OrElse, rhs)
    }

    // ------------------------------------------------------------------
    // Boolean methods
    // ------------------------------------------------------------------

    #[must_use]
    pub fn contains(self, arg: impl Into<Self>) -> Self {
        self.call("contains", vec![arg.into()])
    }

    /// Case-insensitive `contains`.
    #[must_use]
    pub fn contains_ci(self, arg: impl Into<Self>) -> Self {
        self.call("contains", vec![arg.into(), lit(true)])
    }

    #[must_use]
    pub fn starts_with(self, arg: impl Into<Self>) -> Self {
        self.call("starts_with", vec![arg.into()])
    }

    #[must_use]
    pub fn starts_with_ci(self, arg: impl Into<Self>) -> Self {
        self.call("starts_with", vec![arg.into(), lit(true)])
    }

    #[must_use]
    pub fn ends_with(self, arg: impl Into<Self>) -> Self {
        self.call("ends_with", vec![arg.into()])
    }

    #[must_use]
    pub fn ends_with_ci(self, arg: impl Into<Self>) -> Self {
        self.call("ends_with", vec![arg.into(), lit(true)])
    }

    #[must_use]
    pub fn equals(self, arg: impl Into<Self>) -> Self {
        self.call("equals", vec![arg.into()])
    }

    #[must_use]
    pub fn equals_ci(self, arg: impl Into<Self>) -> Self {
        self.call("equals", vec![arg.into(), lit(true)])
    }

    /// Nullable member carries a value.
    #[must_use]
    pub fn has_value(self) -> Self {
        self.member("has_value")
    }

    // ------------------------------------------------------------------
    // String functions
    // ------------------------------------------------------------------

    /// String length, written as member access.
    #[must_use]
    pub fn length(self) -> Self {
        self.member("length")
    }

    #[must_use]
    pub fn to_lower(self) -> Self {
        self.call("to_lower", Vec::new())
    }

    #[must_use]
    pub fn to_upper(self) -> Self {
        self.call("to_upper", Vec::new())
    }

    #[must_use]
    pub fn trim(self) -> Self {
        self.call("trim", Vec::new())
    }

    #[must_use]
    pub fn trim_start(self) -> Self {
        self.call("trim_start", Vec::new())
    }

    #[must_use]
    pub fn trim_end(self) -> Self {
        self.call("trim_end", Vec::new())
    }

    /// Characters from `start` to the end.
    #[must_use]
    pub fn substring_from(self, start: impl Into<Self>) -> Self {
        self.call("substring", vec![start.into()])
    }

    /// `len` characters from `start`.
    #[must_use]
    pub fn substring(self, start: impl Into<Self>, len: impl Into<Self>) -> Self {
        self.call("substring", vec![start.into(), len.into()])
    }

    // ------------------------------------------------------------------
    // Arrays, calls, subqueries
    // ------------------------------------------------------------------

    #[must_use]
    pub fn array_length(self) -> Self {
        self.unary(UnaryOp::ArrayLength)
    }

    #[must_use]
    pub fn index(self, index: impl Into<Self>) -> Self {
        self.binary(BinaryOp::ArrayIndex, index)
    }

    /// Instance method call on `self`.
    #[must_use]
    pub fn call(self, method: impl Into<String>, args: Vec<Self>) -> Self {
        Self::Call {
            target: Some(Box::new(self)),
            method: method.into(),
            args,
        }
    }

    /// Static method call; the receiver is the first argument.
    #[must_use]
    pub fn static_call(method: impl Into<String>, args: Vec<Self>) -> Self {
        Self::Call {
            target: None,
            method: method.into(),
            args,
        }
    }

    /// Rows of `detail` exist whose `foreign_key` equals `self`.
    #[must_use]
    pub fn exists_in(self, detail: &'static EntityModel, foreign_key: impl Into<String>) -> Self {
        self.subquery(detail, foreign_key, None, false)
    }

    /// Like [`Self::exists_in`], restricted by `filter` over the detail row.
    #[must_use]
    pub fn exists_where(
        self,
        detail: &'static EntityModel,
        foreign_key: impl Into<String>,
        filter: Self,
    ) -> Self {
        self.subquery(detail, foreign_key, Some(filter), false)
    }

    #[must_use]
    pub fn not_exists_in(
        self,
        detail: &'static EntityModel,
        foreign_key: impl Into<String>,
    ) -> Self {
        self.subquery(detail, foreign_key, None, true)
    }

    fn subquery(
        self,
        detail: &'static EntityModel,
        foreign_key: impl Into<String>,
        filter: Option<Self>,
        negate: bool,
    ) -> Self {
        Self::Exists {
            outer: Box::new(self),
            detail,
            foreign_key: foreign_key.into(),
            filter: filter.map(Box::new),
            negate,
        }
    }
}

// ----------------------------------------------------------------------
// Operators
// ----------------------------------------------------------------------

macro_rules! impl_expr_binary_op {
    ( $( $trait:ident :: $method:ident => $op:ident ),* $(,)? ) => {
        $(
            impl<R: Into<Expr>> $trait<R> for Expr {
                type Output = Self;

                fn $method(self, rhs: R) -> Self::Output {
                    self.binary(BinaryOp::$op, rhs)
                }
            }
        )*
    };
}

impl_expr_binary_op! {
    Add::add => Add,
    Sub::sub => Subtract,
    Mul::mul => Multiply,
    Div::div => Divide,
    BitAnd::bitand => AndAlso,
    BitOr::bitor => OrElse,
}

impl Neg for Expr {
    type Output = Self;

    fn neg(self) -> Self::Output {
        self.unary(UnaryOp::Negate)
    }
}

impl Not for Expr {
    type Output = Self;

    fn not(self) -> Self::Output {
        self.unary(UnaryOp::Not)
    }
}

// ----------------------------------------------------------------------
// Constants
// ----------------------------------------------------------------------

macro_rules! impl_expr_from_for {
    ( $( $type:ty ),* $(,)? ) => {
        $(
            impl From<$type> for Expr {
                fn from(v: $type) -> Self {
                    Self::Constant(Value::from(v))
                }
            }
        )*
    };
}

impl_expr_from_for!(
    Value,
    bool,
    i32,
    i64,
    u32,
    u64,
    &str,
    String,
    Date,
    Vec<Value>
);

impl From<f64> for Expr {
    fn from(v: f64) -> Self {
        Value::float64(v).map_or(Self::NonFinite(v), Self::Constant)
    }
}

impl From<f32> for Expr {
    fn from(v: f32) -> Self {
        Value::float32(v).map_or(Self::NonFinite(f64::from(v)), Self::Constant)
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fluent_calls_render_canonical_text() {
        let expr = field("price").gt(10) & field("name").starts_with("A");

        assert_eq!(
            expr.to_string(),
            "((row.price > Int(10)) && row.name.starts_with(Text('A')))"
        );
    }

    #[test]
    fn arithmetic_operators_build_binary_nodes() {
        let expr = (field("price") * 2) + 5;

        assert_eq!(expr.to_string(), "((row.price * Int(2)) + Int(5))");
        assert!(!expr.is_predicate());
    }

    #[test]
    fn predicates_are_recognized_by_shape() {
        assert!(field("name").contains("x").is_predicate());
        assert!((!field("active")).is_predicate());
        assert!(field("qty").lt(1).is_predicate());
        assert!(!field("name").trim().is_predicate());
    }

    #[test]
    fn non_finite_floats_are_kept_apart_from_null() {
        assert!(matches!(Expr::from(f64::NAN), Expr::NonFinite(v) if v.is_nan()));
        assert!(matches!(
            Expr::from(f32::INFINITY),
            Expr::NonFinite(v) if v == f64::INFINITY
        ));
        assert!(matches!(Expr::from(1.5), Expr::Constant(Value::Float64(_))));
    }

    #[test]
    fn case_insensitive_helpers_append_flag() {
        let Expr::Call { args, .. } = field("name").contains_ci("x") else {
            panic!("expected call");
        };

        assert_eq!(args.len(), 2);
        assert!(matches!(args[1], Expr::Constant(Value::Bool(true))));
    }
}
