//! Operand tree: a computable value over one record.

pub(crate) mod apply;
mod eval;
mod member;

#[cfg(test)]
mod tests;

use crate::{
    error::{ErrorOrigin, InternalError},
    model::EntityModel,
    operator::OperationSign,
    value::{Value, ValueKind},
};
use serde::{Deserialize, Serialize};
use std::fmt;

// re-exports
pub use member::MemberRef;

///
/// OperationExpression
///
/// Operand tree node. Exactly one shape per node:
///
/// - `Member`  → field reference on the owner entity
/// - `Literal` → constant; `has_value == false` is an unset literal
/// - `Binary`  → arithmetic over two operands
/// - `Unary`   → string function over a text operand
///
/// Structural equality covers the variant, every child, each sign and each
/// literal together with its declared runtime type.
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum OperationExpression {
    Member(MemberRef),
    Literal {
        value: Value,
        has_value: bool,
    },
    Binary {
        left: Operand,
        sign: OperationSign,
        right: Operand,
    },
    Unary {
        sign: OperationSign,
        operand: Box<Self>,
        args: Vec<Self>,
    },
}

impl OperationExpression {
    /// Field reference resolved against `model`.
    pub fn member(model: &'static EntityModel, name: &str) -> Result<Self, InternalError> {
        MemberRef::resolve(model, name).map(Self::Member)
    }

    #[must_use]
    pub fn literal(value: impl Into<Value>) -> Self {
        Self::Literal {
            value: value.into(),
            has_value: true,
        }
    }

    /// Literal slot with nothing assigned; computes to `Null`.
    #[must_use]
    pub const fn unset() -> Self {
        Self::Literal {
            value: Value::Null,
            has_value: false,
        }
    }

    /// Arithmetic node. String signs cannot take a left operand.
    pub fn binary(
        left: impl Into<Operand>,
        sign: OperationSign,
        right: impl Into<Operand>,
    ) -> Result<Self, InternalError> {
        if !sign.is_arithmetic() {
            return Err(InternalError::invalid_operator(
                ErrorOrigin::Translate,
                format!("sign {sign} cannot join a left and a right operand"),
            ));
        }

        Ok(Self::Binary {
            left: left.into(),
            sign,
            right: right.into(),
        })
    }

    /// String function node over a text operand.
    ///
    /// Only `Substring` takes arguments, at most two, each integer-typed.
    pub fn unary(sign: OperationSign, operand: Self, args: Vec<Self>) -> Result<Self, InternalError> {
        if !sign.is_string() {
            return Err(InternalError::invalid_operator(
                ErrorOrigin::Translate,
                format!("sign {sign} does not apply to a single operand"),
            ));
        }

        let kind = operand.value_kind()?;
        if !kind.is_text() {
            return Err(InternalError::invalid_operator(
                ErrorOrigin::Translate,
                format!("sign {sign} requires a Text operand, found {kind} in {operand}"),
            ));
        }

        let max_args = if sign == OperationSign::Substring { 2 } else { 0 };
        if args.len() > max_args {
            return Err(InternalError::out_of_range(
                ErrorOrigin::Translate,
                format!("sign {sign} takes at most {max_args} arguments, got {}", args.len()),
            ));
        }

        for arg in &args {
            let kind = arg.value_kind()?;
            if !matches!(kind, ValueKind::Int | ValueKind::Uint) {
                return Err(InternalError::invalid_operator(
                    ErrorOrigin::Translate,
                    format!("sign {sign} takes integer arguments, found {kind} in {arg}"),
                ));
            }
        }

        Ok(Self::Unary {
            sign,
            operand: Box::new(operand),
            args,
        })
    }

    /// Sign of this node; `None` for members and literals.
    #[must_use]
    pub const fn sign(&self) -> OperationSign {
        match self {
            Self::Member(_) | Self::Literal { .. } => OperationSign::None,
            Self::Binary { sign, .. } | Self::Unary { sign, .. } => *sign,
        }
    }

    #[must_use]
    pub const fn as_member(&self) -> Option<&MemberRef> {
        match self {
            Self::Member(member) => Some(member),
            _ => None,
        }
    }

    /// Declared value type.
    ///
    /// Literals report their runtime type, members their field type. Binary
    /// nodes promote their sides (falling back to the left side when no
    /// arithmetic kind applies); `Length` is `Int`, other string signs `Text`.
    pub fn value_kind(&self) -> Result<ValueKind, InternalError> {
        match self {
            Self::Member(member) => member.value_kind(),
            Self::Literal { value, .. } => Ok(value.kind()),
            Self::Binary { left, right, .. } => {
                let (l, r) = (left.value_kind()?, right.value_kind()?);
                Ok(ValueKind::arithmetic_result(l, r).unwrap_or(l))
            }
            Self::Unary { sign, .. } => Ok(if *sign == OperationSign::Length {
                ValueKind::Int
            } else {
                ValueKind::Text
            }),
        }
    }

    /// Owner entity of the first member reference found, left to right.
    #[must_use]
    pub fn owner_type(&self) -> Option<&str> {
        match self {
            Self::Member(member) => Some(member.owner()),
            Self::Literal { .. } => None,
            Self::Binary { left, right, .. } => left.owner_type().or_else(|| right.owner_type()),
            Self::Unary { operand, .. } => operand.owner_type(),
        }
    }
}

impl fmt::Display for OperationExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Member(member) => write!(f, "{member}"),
            Self::Literal {
                value,
                has_value: true,
            } => write!(f, "{value}"),
            Self::Literal {
                has_value: false, ..
            } => f.write_str("Unset"),
            Self::Binary { left, sign, right } => {
                write!(f, "({left} {} {right})", sign.token())
            }
            Self::Unary {
                sign,
                operand,
                args,
            } => {
                write!(f, "{sign}({operand}")?;
                for arg in args {
                    write!(f, ", {arg}")?;
                }
                f.write_str(")")
            }
        }
    }
}

///
/// Operand
///
/// One side of a binary operand node or of a comparison: either a subtree
/// or a plain literal value.
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Operand {
    Expr(Box<OperationExpression>),
    Value(Value),
}

impl Operand {
    #[must_use]
    pub const fn as_expr(&self) -> Option<&OperationExpression> {
        match self {
            Self::Expr(expr) => Some(expr),
            Self::Value(_) => None,
        }
    }

    #[must_use]
    pub const fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Value(value) => Some(value),
            Self::Expr(_) => None,
        }
    }

    pub fn value_kind(&self) -> Result<ValueKind, InternalError> {
        match self {
            Self::Expr(expr) => expr.value_kind(),
            Self::Value(value) => Ok(value.kind()),
        }
    }

    #[must_use]
    pub fn owner_type(&self) -> Option<&str> {
        self.as_expr().and_then(OperationExpression::owner_type)
    }

    /// Promote to a subtree, wrapping a plain value as a literal node.
    #[must_use]
    pub fn into_expr(self) -> OperationExpression {
        match self {
            Self::Expr(expr) => *expr,
            Self::Value(value) => OperationExpression::literal(value),
        }
    }
}

impl From<OperationExpression> for Operand {
    fn from(expr: OperationExpression) -> Self {
        Self::Expr(Box::new(expr))
    }
}

impl From<Value> for Operand {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expr(expr) => write!(f, "{expr}"),
            Self::Value(value) => write!(f, "{value}"),
        }
    }
}
