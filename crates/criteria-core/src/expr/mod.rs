//! Host input language.
//!
//! `Expr` is a typed filter or value expression over a single row parameter.
//! Hosts build it with the fluent helpers in this module; the translator
//! lowers it into criteria and operand trees.

mod builder;

use crate::{model::EntityModel, value::Value};
use std::fmt;

// re-exports
pub use builder::{field, lit, row};

///
/// Expr
///

#[derive(Clone, Debug)]
pub enum Expr {
    /// The row parameter itself.
    Row,
    /// Closed-over constant.
    Constant(Value),
    /// Float constant with no finite value; lowering rejects it.
    NonFinite(f64),
    /// Member access (`target.name`).
    Member { target: Box<Self>, name: String },
    Unary { op: UnaryOp, operand: Box<Self> },
    Binary {
        op: BinaryOp,
        left: Box<Self>,
        right: Box<Self>,
    },
    /// Method call; `target == None` is a static call whose first argument
    /// is the receiver.
    Call {
        target: Option<Box<Self>>,
        method: String,
        args: Vec<Self>,
    },
    /// Existence of `detail` rows whose `foreign_key` matches `outer`.
    /// `filter` is written over the detail row.
    Exists {
        outer: Box<Self>,
        detail: &'static EntityModel,
        foreign_key: String,
        filter: Option<Box<Self>>,
        negate: bool,
    },
}

///
/// UnaryOp
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum UnaryOp {
    Not,
    Negate,
    Plus,
    ArrayLength,
}

///
/// BinaryOp
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Equal,
    NotEqual,
    Greater,
    GreaterOrEqual,
    Less,
    LessOrEqual,
    AndAlso,
    OrElse,
    ArrayIndex,
}

impl BinaryOp {
    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::Greater => ">",
            Self::GreaterOrEqual => ">=",
            Self::Less => "<",
            Self::LessOrEqual => "<=",
            Self::AndAlso => "&&",
            Self::OrElse => "||",
            Self::ArrayIndex => "[]",
        }
    }

    #[must_use]
    pub const fn is_comparison(self) -> bool {
        matches!(
            self,
            Self::Equal
                | Self::NotEqual
                | Self::Greater
                | Self::GreaterOrEqual
                | Self::Less
                | Self::LessOrEqual
        )
    }

    #[must_use]
    pub const fn is_logical(self) -> bool {
        matches!(self, Self::AndAlso | Self::OrElse)
    }
}

impl Expr {
    /// Boolean-shaped expression (comparison, logical connective, negation,
    /// boolean method call or subquery).
    #[must_use]
    pub fn is_predicate(&self) -> bool {
        match self {
            Self::Binary { op, .. } => op.is_comparison() || op.is_logical(),
            Self::Unary {
                op: UnaryOp::Not, ..
            }
            | Self::Exists { .. } => true,
            Self::Call { method, .. } => builder::is_predicate_method(method),
            _ => false,
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Row => f.write_str("row"),
            Self::Constant(value) => write!(f, "{value}"),
            Self::NonFinite(v) => write!(f, "Float64({v})"),
            Self::Member { target, name } => write!(f, "{target}.{name}"),
            Self::Unary { op, operand } => match op {
                UnaryOp::Not => write!(f, "!{operand}"),
                UnaryOp::Negate => write!(f, "-{operand}"),
                UnaryOp::Plus => write!(f, "+{operand}"),
                UnaryOp::ArrayLength => write!(f, "{operand}.len()"),
            },
            Self::Binary {
                op: BinaryOp::ArrayIndex,
                left,
                right,
            } => write!(f, "{left}[{right}]"),
            Self::Binary { op, left, right } => write!(f, "({left} {} {right})", op.token()),
            Self::Call {
                target,
                method,
                args,
            } => {
                if let Some(target) = target {
                    write!(f, "{target}.")?;
                }
                write!(f, "{method}(")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                f.write_str(")")
            }
            Self::Exists {
                outer,
                detail,
                foreign_key,
                filter,
                negate,
            } => {
                if *negate {
                    f.write_str("!")?;
                }
                write!(f, "exists({outer} in {}.{foreign_key}", detail.path)?;
                if let Some(filter) = filter {
                    write!(f, " where {filter}")?;
                }
                f.write_str(")")
            }
        }
    }
}
