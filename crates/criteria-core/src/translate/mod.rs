//! Lowering of host expressions into criteria and operand trees.
//!
//! Two mutually recursive passes: `criteria` lowers boolean-shaped input
//! into a `CriteriaExpression`, `operand` lowers value-shaped input into an
//! `Operand` (a subtree when a field chain is present, a plain value when
//! everything folded). Canonicalization runs as compare nodes are built.

mod criteria;
mod operand;


use crate::{
    config::CriteriaConfig,
    criteria::CriteriaExpression,
    error::{ErrorClass, ErrorOrigin, InternalError},
    expr::Expr,
    model::{EntityModel, register},
    obs::sink::{MetricsEvent, record},
    operation::Operand,
};

///
/// Translator
///
/// Lowers expressions written over rows of one entity model.
///

#[derive(Clone, Copy, Debug)]
pub struct Translator<'a> {
    model: &'static EntityModel,
    config: &'a CriteriaConfig,
}

impl<'a> Translator<'a> {
    #[must_use]
    pub const fn new(model: &'static EntityModel, config: &'a CriteriaConfig) -> Self {
        Self { model, config }
    }

    #[must_use]
    pub const fn model(&self) -> &'static EntityModel {
        self.model
    }

    /// Lower a boolean expression.
    ///
    /// `Ok(None)` means the expression imposes no filter (for example
    /// `contains(null)`).
    pub fn criteria(&self, expr: &Expr) -> Result<Option<CriteriaExpression>, InternalError> {
        let result = register(self.model).and_then(|()| self.lower_criteria(expr, 0));

        record(MetricsEvent::Translate {
            entity_path: self.model.path,
            ok: result.is_ok(),
        });

        result
    }

    /// Lower a value expression.
    pub fn operand(&self, expr: &Expr) -> Result<Operand, InternalError> {
        let result = register(self.model).and_then(|()| self.lower_operand(expr, 0));

        record(MetricsEvent::Translate {
            entity_path: self.model.path,
            ok: result.is_ok(),
        });

        result
    }

    /// Translator for a detail entity sharing this configuration.
    pub(crate) const fn detail(&self, model: &'static EntityModel) -> Self {
        Self::new(model, self.config)
    }

    /// Next recursion depth, bounded by `max_depth`.
    fn descend(&self, depth: usize, expr: &Expr) -> Result<usize, InternalError> {
        if depth >= self.config.max_depth {
            return Err(InternalError::new(
                ErrorClass::UnsupportedExpressionShape,
                ErrorOrigin::Translate,
                format!(
                    "expression nesting exceeds {}: {expr}",
                    self.config.max_depth
                ),
            ));
        }

        Ok(depth + 1)
    }
}

/// Lower a boolean expression with the default configuration.
pub fn translate_criteria(
    model: &'static EntityModel,
    expr: &Expr,
) -> Result<Option<CriteriaExpression>, InternalError> {
    Translator::new(model, &CriteriaConfig::default()).criteria(expr)
}

/// Lower a value expression with the default configuration.
pub fn translate_operand(model: &'static EntityModel, expr: &Expr) -> Result<Operand, InternalError> {
    Translator::new(model, &CriteriaConfig::default()).operand(expr)
}
