use crate::{
    error::{ErrorOrigin, InternalError},
    model::{FieldPresence, Row},
    obs::sink::{MetricsEvent, record},
    operation::{
        Operand, OperationExpression,
        apply::{self, Fault},
    },
    value::Value,
};

impl OperationExpression {
    /// Compute this operand against one record.
    ///
    /// The result has the node's declared value type. Any sign/type
    /// combination without defined semantics is a `NotImplemented` error
    /// naming the node's canonical form.
    pub fn compute<R: Row + ?Sized>(&self, row: &R) -> Result<Value, InternalError> {
        let result = compute_node(self, row);

        record(MetricsEvent::Evaluate {
            ok: result.is_ok(),
        });

        result
    }
}

impl Operand {
    pub fn compute<R: Row + ?Sized>(&self, row: &R) -> Result<Value, InternalError> {
        match self {
            Self::Expr(expr) => compute_node(expr, row),
            Self::Value(value) => Ok(value.clone()),
        }
    }
}

fn compute_node<R: Row + ?Sized>(
    node: &OperationExpression,
    row: &R,
) -> Result<Value, InternalError> {
    match node {
        OperationExpression::Literal { value, has_value } => Ok(if *has_value {
            value.clone()
        } else {
            Value::Null
        }),

        OperationExpression::Member(member) => match row.field(member.member()) {
            FieldPresence::Present(value) => Ok(value),
            FieldPresence::Missing => Err(InternalError::unknown_member(
                ErrorOrigin::Evaluate,
                member.owner(),
                member.member(),
            )),
        },

        OperationExpression::Binary { left, sign, right } => {
            let kind = node.value_kind()?;
            let (l, r) = (left.compute(row)?, right.compute(row)?);

            apply::arithmetic(kind, *sign, &l, &r).map_err(|fault| fault_error(fault, node))
        }

        OperationExpression::Unary {
            sign,
            operand,
            args,
        } => {
            let text = match compute_node(operand, row)? {
                Value::Null => String::new(),
                Value::Text(text) => text,
                _ => return Err(InternalError::not_implemented(node)),
            };

            let args = args
                .iter()
                .map(|arg| {
                    compute_node(arg, row)?
                        .as_index()
                        .ok_or_else(|| InternalError::not_implemented(node))
                })
                .collect::<Result<Vec<_>, _>>()?;

            apply::string(*sign, &text, &args).map_err(|fault| fault_error(fault, node))
        }
    }
}

fn fault_error(fault: Fault, node: &OperationExpression) -> InternalError {
    match fault {
        Fault::Unsupported => InternalError::not_implemented(node),
        Fault::OutOfRange => InternalError::out_of_range(
            ErrorOrigin::Evaluate,
            format!("result out of range in {node}"),
        ),
    }
}
