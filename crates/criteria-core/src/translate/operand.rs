use crate::{
    error::{ErrorOrigin, InternalError},
    expr::{BinaryOp, Expr, UnaryOp},
    obs::sink::{MetricsEvent, record},
    operation::{
        Operand, OperationExpression,
        apply::{self, Fault},
    },
    operator::OperationSign,
    translate::Translator,
    value::{Value, ValueKind},
};

const fn arithmetic_sign(op: BinaryOp) -> Option<OperationSign> {
    match op {
        BinaryOp::Add => Some(OperationSign::Add),
        BinaryOp::Subtract => Some(OperationSign::Subtract),
        BinaryOp::Multiply => Some(OperationSign::Multiply),
        BinaryOp::Divide => Some(OperationSign::Divide),
        _ => None,
    }
}

fn folded(value: Value) -> Operand {
    record(MetricsEvent::ConstantFold);

    Operand::Value(value)
}

fn length(len: usize, expr: &Expr) -> Result<Operand, InternalError> {
    i64::try_from(len)
        .map(|len| folded(Value::Int(len)))
        .map_err(|_| fault_error(Fault::OutOfRange, expr))
}

fn fault_error(fault: Fault, expr: &Expr) -> InternalError {
    match fault {
        Fault::Unsupported => InternalError::unsupported_shape(expr),
        Fault::OutOfRange => InternalError::out_of_range(
            ErrorOrigin::Translate,
            format!("constant out of range in {expr}"),
        ),
    }
}

impl Translator<'_> {
    pub(super) fn lower_operand(&self, expr: &Expr, depth: usize) -> Result<Operand, InternalError> {
        let depth = self.descend(depth, expr)?;

        match expr {
            Expr::Constant(value) => Ok(Operand::Value(value.clone())),

            Expr::NonFinite(_) => Err(InternalError::out_of_range(
                ErrorOrigin::Translate,
                format!("float constant {expr} is not finite"),
            )),

            Expr::Member { target, name } => match target.as_ref() {
                Expr::Row => Ok(OperationExpression::member(self.model, name)?.into()),
                target => self.member_of(expr, target, name, depth),
            },

            Expr::Unary { op, operand } => self.unary(expr, *op, operand, depth),

            Expr::Binary { op, left, right } => {
                if let Some(sign) = arithmetic_sign(*op) {
                    return self.arithmetic(expr, left, sign, right, depth);
                }
                if *op == BinaryOp::ArrayIndex {
                    return self.index(expr, left, right, depth);
                }

                self.predicate_value(expr, depth)
            }

            Expr::Call {
                target: Some(target),
                method,
                args,
            } => match OperationSign::from_method(method) {
                Some(sign) => self.string_call(expr, target, sign, args, depth),
                None => self.predicate_value(expr, depth),
            },

            Expr::Call { target: None, .. } | Expr::Exists { .. } => {
                self.predicate_value(expr, depth)
            }

            Expr::Row => Err(InternalError::unsupported_shape(expr)),
        }
    }

    /// A boolean-shaped expression in value position; only a folded
    /// constant has a value.
    fn predicate_value(&self, expr: &Expr, depth: usize) -> Result<Operand, InternalError> {
        if !expr.is_predicate() {
            return Err(InternalError::unsupported_shape(expr));
        }

        match self.lower_criteria(expr, depth)? {
            Some(criteria) => match criteria.as_short_circuit() {
                Some(value) => Ok(Operand::Value(Value::Bool(value))),
                None => Err(InternalError::unsupported_shape(expr)),
            },
            None => Err(InternalError::unsupported_shape(expr)),
        }
    }

    /// Member access off anything but the row itself.
    fn member_of(
        &self,
        expr: &Expr,
        target: &Expr,
        name: &str,
        depth: usize,
    ) -> Result<Operand, InternalError> {
        match self.lower_operand(target, depth)? {
            Operand::Expr(operand) => match OperationSign::from_member(name) {
                Some(sign) => Ok(OperationExpression::unary(sign, *operand, Vec::new())?.into()),
                None => Err(InternalError::unsupported_shape(expr)),
            },
            Operand::Value(value) => match (name, &value) {
                ("length", Value::Text(text)) => length(text.chars().count(), expr),
                ("length", Value::List(items)) => length(items.len(), expr),
                ("has_value", value) => Ok(folded(Value::Bool(!value.is_null()))),
                _ => Err(InternalError::unsupported_shape(expr)),
            },
        }
    }

    fn unary(
        &self,
        expr: &Expr,
        op: UnaryOp,
        operand: &Expr,
        depth: usize,
    ) -> Result<Operand, InternalError> {
        if op == UnaryOp::Not {
            return self.predicate_value(expr, depth);
        }

        let value = match self.lower_operand(operand, depth)? {
            Operand::Value(value) => value,
            Operand::Expr(_) => return Err(InternalError::unsupported_shape(expr)),
        };

        match (op, &value) {
            (UnaryOp::Plus, value) if value.is_numeric() => Ok(Operand::Value(value.clone())),
            (UnaryOp::Negate, value) if value.is_numeric() => {
                let kind = match value.kind() {
                    ValueKind::Uint => ValueKind::Int,
                    kind => kind,
                };
                let negated = value
                    .to_f64()
                    .and_then(|v| Value::from_f64(kind, -v))
                    .ok_or_else(|| fault_error(Fault::OutOfRange, expr))?;

                Ok(folded(negated))
            }
            (UnaryOp::ArrayLength, Value::List(items)) => length(items.len(), expr),
            _ => Err(InternalError::unsupported_shape(expr)),
        }
    }

    fn arithmetic(
        &self,
        expr: &Expr,
        left: &Expr,
        sign: OperationSign,
        right: &Expr,
        depth: usize,
    ) -> Result<Operand, InternalError> {
        let left = self.lower_operand(left, depth)?;
        let right = self.lower_operand(right, depth)?;

        match (left, right) {
            (Operand::Value(left), Operand::Value(right)) => {
                let kind = ValueKind::arithmetic_result(left.kind(), right.kind())
                    .ok_or_else(|| InternalError::unsupported_shape(expr))?;
                let value = apply::arithmetic(kind, sign, &left, &right)
                    .map_err(|fault| fault_error(fault, expr))?;

                Ok(folded(value))
            }
            (left, right) => Ok(OperationExpression::binary(left, sign, right)?.into()),
        }
    }

    /// Constant list indexing; the list and the index must both fold.
    fn index(
        &self,
        expr: &Expr,
        list: &Expr,
        index: &Expr,
        depth: usize,
    ) -> Result<Operand, InternalError> {
        let list = self.lower_operand(list, depth)?;
        let index = self.lower_operand(index, depth)?;

        let (Operand::Value(Value::List(items)), Operand::Value(index)) = (list, index) else {
            return Err(InternalError::unsupported_shape(expr));
        };
        let position = index
            .as_index()
            .ok_or_else(|| InternalError::unsupported_shape(expr))?;

        usize::try_from(position)
            .ok()
            .and_then(|i| items.get(i).cloned())
            .map(folded)
            .ok_or_else(|| {
                InternalError::out_of_range(
                    ErrorOrigin::Translate,
                    format!("index {position} outside list of {} in {expr}", items.len()),
                )
            })
    }

    fn string_call(
        &self,
        expr: &Expr,
        target: &Expr,
        sign: OperationSign,
        args: &[Expr],
        depth: usize,
    ) -> Result<Operand, InternalError> {
        let target = self.lower_operand(target, depth)?;
        let args = args
            .iter()
            .map(|arg| self.lower_operand(arg, depth))
            .collect::<Result<Vec<_>, _>>()?;

        match target {
            Operand::Expr(operand) => {
                let args = args.into_iter().map(Operand::into_expr).collect();

                Ok(OperationExpression::unary(sign, *operand, args)?.into())
            }
            Operand::Value(value) => {
                let text = match &value {
                    Value::Text(text) => text.as_str(),
                    Value::Null => "",
                    _ => {
                        return Err(InternalError::invalid_operator(
                            ErrorOrigin::Translate,
                            format!("sign {sign} requires a Text operand, found {} in {expr}", value.kind()),
                        ));
                    }
                };
                let positions = args
                    .iter()
                    .map(|arg| arg.as_value().and_then(Value::as_index))
                    .collect::<Option<Vec<_>>>()
                    .ok_or_else(|| InternalError::unsupported_shape(expr))?;
                let value =
                    apply::string(sign, text, &positions).map_err(|fault| fault_error(fault, expr))?;

                Ok(folded(value))
            }
        }
    }
}
