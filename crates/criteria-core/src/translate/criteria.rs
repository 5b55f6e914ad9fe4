use crate::{
    criteria::{CompareCriteria, CriteriaExpression, ExistsCriteria, SubqueryInner},
    error::InternalError,
    expr::{BinaryOp, Expr, UnaryOp},
    model::{EntityModel, register},
    obs::sink::{MetricsEvent, record},
    operation::{MemberRef, Operand, OperationExpression},
    operator::CriteriaOperator,
    translate::Translator,
    value::{Value, ValueKind},
};

///
/// PatternKind
/// The three pattern-matching methods and their wildcard placement.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum PatternKind {
    Contains,
    StartsWith,
    EndsWith,
}

impl PatternKind {
    fn from_method(method: &str) -> Option<Self> {
        match method {
            "contains" => Some(Self::Contains),
            "starts_with" => Some(Self::StartsWith),
            "ends_with" => Some(Self::EndsWith),
            _ => None,
        }
    }

    const fn comparator(self) -> CriteriaOperator {
        match self {
            Self::Contains => CriteriaOperator::Like,
            Self::StartsWith => CriteriaOperator::LikeLeft,
            Self::EndsWith => CriteriaOperator::LikeRight,
        }
    }

    /// Wrap a literal with the wildcard unless it already carries one on
    /// the side(s) being wrapped.
    fn wrap(self, text: &str, wildcard: char) -> String {
        match self {
            Self::Contains if text.contains(wildcard) => text.to_string(),
            Self::Contains => format!("{wildcard}{text}{wildcard}"),
            Self::StartsWith if text.ends_with(wildcard) => text.to_string(),
            Self::StartsWith => format!("{text}{wildcard}"),
            Self::EndsWith if text.starts_with(wildcard) => text.to_string(),
            Self::EndsWith => format!("{wildcard}{text}"),
        }
    }

    /// Constant-fold the method over two literal strings.
    fn fold(self, receiver: &str, arg: &str) -> bool {
        match self {
            Self::Contains => receiver.contains(arg),
            Self::StartsWith => receiver.starts_with(arg),
            Self::EndsWith => receiver.ends_with(arg),
        }
    }
}

const fn comparison_operator(op: BinaryOp) -> Option<CriteriaOperator> {
    match op {
        BinaryOp::Equal => Some(CriteriaOperator::Equal),
        BinaryOp::NotEqual => Some(CriteriaOperator::Unequal),
        BinaryOp::Greater => Some(CriteriaOperator::Greater),
        BinaryOp::GreaterOrEqual => Some(CriteriaOperator::GreaterOrEqual),
        BinaryOp::Less => Some(CriteriaOperator::Lesser),
        BinaryOp::LessOrEqual => Some(CriteriaOperator::LesserOrEqual),
        _ => None,
    }
}

/// Combine two optional sides; an absent side collapses to the other.
fn combine(
    left: Option<CriteriaExpression>,
    right: Option<CriteriaExpression>,
    join: fn(CriteriaExpression, CriteriaExpression) -> CriteriaExpression,
) -> Option<CriteriaExpression> {
    match (left, right) {
        (Some(left), Some(right)) => Some(join(left, right)),
        (side @ Some(_), None) | (None, side @ Some(_)) => side,
        (None, None) => None,
    }
}

fn fold_to(value: bool) -> Option<CriteriaExpression> {
    record(MetricsEvent::ConstantFold);

    Some(CriteriaExpression::ShortCircuit(value))
}

impl Translator<'_> {
    pub(super) fn lower_criteria(
        &self,
        expr: &Expr,
        depth: usize,
    ) -> Result<Option<CriteriaExpression>, InternalError> {
        let depth = self.descend(depth, expr)?;

        match expr {
            Expr::Constant(Value::Bool(value)) => Ok(Some(CriteriaExpression::ShortCircuit(*value))),

            Expr::Member { target, name } if name == "has_value" => {
                match self.lower_operand(target, depth)? {
                    // a field that never holds Null always has a value
                    Operand::Expr(operand)
                        if operand
                            .as_member()
                            .map(MemberRef::field)
                            .transpose()?
                            .is_some_and(|field| !field.nullable) =>
                    {
                        Ok(fold_to(true))
                    }
                    Operand::Expr(operand) => Ok(Some(
                        CompareCriteria::unary(*operand, CriteriaOperator::IsNotNull)?.into(),
                    )),
                    Operand::Value(value) => Ok(fold_to(!value.is_null())),
                }
            }

            Expr::Binary {
                op: BinaryOp::AndAlso,
                left,
                right,
            } => Ok(combine(
                self.lower_criteria(left, depth)?,
                self.lower_criteria(right, depth)?,
                CriteriaExpression::and,
            )),

            Expr::Binary {
                op: BinaryOp::OrElse,
                left,
                right,
            } => Ok(combine(
                self.lower_criteria(left, depth)?,
                self.lower_criteria(right, depth)?,
                CriteriaExpression::or,
            )),

            Expr::Unary {
                op: UnaryOp::Not,
                operand,
            } => Ok(self
                .lower_criteria(operand, depth)?
                .map(CriteriaExpression::negate)),

            Expr::Binary { op, left, right } => match comparison_operator(*op) {
                Some(comparator) => self.comparison(expr, left, comparator, right, false, depth),
                None => Err(InternalError::unsupported_shape(expr)),
            },

            Expr::Call {
                target,
                method,
                args,
            } => self.call(expr, target.as_deref(), method, args, depth),

            Expr::Exists {
                outer,
                detail,
                foreign_key,
                filter,
                negate,
            } => {
                let detail: &'static EntityModel = *detail;
                register(detail)?;

                let outer = self.lower_operand(outer, depth)?.into_expr();
                let fk = OperationExpression::member(detail, foreign_key)?;

                let inner = match filter {
                    None => SubqueryInner::ForeignKey(fk),
                    Some(filter) => {
                        let link = CompareCriteria::with_operand_wildcard(
                            fk,
                            CriteriaOperator::Equal,
                            outer.clone().into(),
                            self.config.wildcard,
                        )?;
                        let inner = match self.detail(detail).lower_criteria(filter, depth)? {
                            Some(filter) => CriteriaExpression::and(link.into(), filter),
                            None => link.into(),
                        };

                        SubqueryInner::Criteria(Box::new(inner))
                    }
                };

                Ok(Some(ExistsCriteria::new(outer, inner, *negate).into()))
            }

            // Bare boolean member access (or any boolean-typed operand).
            Expr::Member { .. } => match self.lower_operand(expr, depth)? {
                Operand::Expr(operand) if operand.value_kind()? == ValueKind::Bool => Ok(Some(
                    CompareCriteria::with_value(*operand, CriteriaOperator::Equal, true)?.into(),
                )),
                Operand::Value(Value::Bool(value)) => Ok(fold_to(value)),
                _ => Err(InternalError::unsupported_shape(expr)),
            },

            _ => Err(InternalError::unsupported_shape(expr)),
        }
    }

    /// Comparison between two lowered sides.
    ///
    /// The operand side always ends up on the left: a literal on the left is
    /// swapped across and the comparator reversed. Two literals fold.
    fn comparison(
        &self,
        expr: &Expr,
        left: &Expr,
        comparator: CriteriaOperator,
        right: &Expr,
        ignore_case: bool,
        depth: usize,
    ) -> Result<Option<CriteriaExpression>, InternalError> {
        let left = self.lower_operand(left, depth)?;
        let right = self.lower_operand(right, depth)?;

        let compare = match (left, right) {
            (Operand::Expr(left), right @ Operand::Expr(_)) => {
                CompareCriteria::with_operand_wildcard(*left, comparator, right, self.config.wildcard)?
            }
            (Operand::Expr(left), Operand::Value(value)) => {
                CompareCriteria::with_value_wildcard(*left, comparator, value, self.config.wildcard)?
            }
            (Operand::Value(value), Operand::Expr(right)) => {
                record(MetricsEvent::ComparatorReversal);
                CompareCriteria::with_value_wildcard(
                    *right,
                    comparator.reverse(),
                    value,
                    self.config.wildcard,
                )?
            }
            (Operand::Value(left), Operand::Value(right)) => {
                return fold_comparison(expr, &left, comparator, &right, ignore_case).map(fold_to);
            }
        };

        Ok(Some(compare.ignoring_case(ignore_case).into()))
    }

    /// Boolean method calls: pattern matching and `equals`.
    fn call(
        &self,
        expr: &Expr,
        target: Option<&Expr>,
        method: &str,
        args: &[Expr],
        depth: usize,
    ) -> Result<Option<CriteriaExpression>, InternalError> {
        // Static calls carry the receiver as their first argument.
        let (receiver, args) = match (target, args) {
            (Some(target), args) => (target, args),
            (None, [receiver, rest @ ..]) => (receiver, rest),
            (None, []) => return Err(InternalError::unsupported_shape(expr)),
        };

        let (arg, ignore_case) = match args {
            [arg] => (arg, false),
            [arg, Expr::Constant(Value::Bool(ignore_case))] => (arg, *ignore_case),
            _ => return Err(InternalError::unsupported_shape(expr)),
        };

        if method == "equals" {
            return self.comparison(
                expr,
                receiver,
                CriteriaOperator::Equal,
                arg,
                ignore_case,
                depth,
            );
        }

        let Some(kind) = PatternKind::from_method(method) else {
            return Err(InternalError::unsupported_shape(expr));
        };

        self.pattern(expr, receiver, kind, arg, ignore_case, depth)
    }

    fn pattern(
        &self,
        expr: &Expr,
        receiver: &Expr,
        kind: PatternKind,
        arg: &Expr,
        ignore_case: bool,
        depth: usize,
    ) -> Result<Option<CriteriaExpression>, InternalError> {
        let arg = self.lower_operand(arg, depth)?;
        if matches!(arg, Operand::Value(Value::Null)) {
            return Ok(None);
        }
        let receiver = self.lower_operand(receiver, depth)?;

        let compare = match (receiver, arg) {
            // literal collection receiver, operand argument → membership
            (Operand::Value(list @ Value::List(_)), Operand::Expr(arg))
                if kind == PatternKind::Contains =>
            {
                CompareCriteria::with_value_wildcard(
                    *arg,
                    CriteriaOperator::In,
                    list,
                    self.config.wildcard,
                )?
            }

            // collection-typed operand receiver, literal argument → membership
            (Operand::Expr(receiver), Operand::Value(value))
                if kind == PatternKind::Contains
                    && receiver.value_kind()? == ValueKind::List =>
            {
                CompareCriteria::with_operand(
                    OperationExpression::literal(value),
                    CriteriaOperator::In,
                    *receiver,
                )?
            }

            (Operand::Expr(receiver), Operand::Value(Value::Text(text)))
                if receiver.value_kind()?.is_text() =>
            {
                let pattern = kind.wrap(&text, self.config.wildcard);

                CompareCriteria::with_value_wildcard(
                    *receiver,
                    kind.comparator(),
                    Value::Text(pattern),
                    self.config.wildcard,
                )?
            }

            (Operand::Expr(receiver), arg @ Operand::Expr(_)) if receiver.value_kind()?.is_text() => {
                CompareCriteria::with_operand_wildcard(
                    *receiver,
                    kind.comparator(),
                    arg,
                    self.config.wildcard,
                )?
            }

            (Operand::Value(receiver), Operand::Value(arg)) => {
                return fold_pattern(expr, &receiver, kind, &arg, ignore_case).map(fold_to);
            }

            _ => return Err(InternalError::unsupported_shape(expr)),
        };

        Ok(Some(compare.ignoring_case(ignore_case).into()))
    }
}

/// Fold a comparison between two literals.
fn fold_comparison(
    expr: &Expr,
    left: &Value,
    comparator: CriteriaOperator,
    right: &Value,
    ignore_case: bool,
) -> Result<bool, InternalError> {
    if !comparator.is_ordering() {
        return Err(InternalError::unsupported_shape(expr));
    }

    let (left, right) = if ignore_case {
        (lowercase(left), lowercase(right))
    } else {
        (left.clone(), right.clone())
    };

    if let Some(ord) = left.fold_cmp(&right) {
        return comparator
            .matches_ordering(ord)
            .ok_or_else(|| InternalError::unsupported_shape(expr));
    }

    match comparator {
        CriteriaOperator::Equal => Ok(left.fold_eq(&right)),
        CriteriaOperator::Unequal => Ok(!left.fold_eq(&right)),
        _ => Err(InternalError::unsupported_shape(expr)),
    }
}

/// Fold a pattern method over two literals.
fn fold_pattern(
    expr: &Expr,
    receiver: &Value,
    kind: PatternKind,
    arg: &Value,
    ignore_case: bool,
) -> Result<bool, InternalError> {
    match (receiver, arg) {
        (Value::Text(_), Value::Text(_)) => {
            let (receiver, arg) = if ignore_case {
                (lowercase(receiver), lowercase(arg))
            } else {
                (receiver.clone(), arg.clone())
            };
            let (Value::Text(receiver), Value::Text(arg)) = (receiver, arg) else {
                return Err(InternalError::unsupported_shape(expr));
            };

            Ok(kind.fold(&receiver, &arg))
        }
        (Value::List(items), arg) if kind == PatternKind::Contains => {
            Ok(items.iter().any(|item| item.fold_eq(arg)))
        }
        _ => Err(InternalError::unsupported_shape(expr)),
    }
}

fn lowercase(value: &Value) -> Value {
    match value {
        Value::Text(text) => Value::Text(text.to_lowercase()),
        other => other.clone(),
    }
}
