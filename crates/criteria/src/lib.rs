//! Criteria: typed filter and value expressions compiled into normalized,
//! serializable criteria trees.
//!
//! This is the public crate. Downstream users depend on **criteria** only.
//!
//! ## Crate layout
//! - `core`: operator vocabularies, criteria and operand trees, translator,
//!   evaluator, fingerprints, cache and observability.
//! - `error`: the public error type.
//!
//! The `prelude` module carries the vocabulary needed to declare entity models
//! and write expressions over them.

pub use criteria_core as core;

pub mod error;

use crate::core::{
    config::CriteriaConfig,
    criteria::CriteriaExpression,
    expr::Expr,
    model::{EntityModel, Row},
    operation::{Operand, OperationExpression},
    translate::Translator,
    value::Value,
};

// re-exports
pub use error::{Error, ErrorKind, ErrorOrigin};

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        Error, compile, compile_operand, compute,
        core::{cache::CriteriaCache, config::CriteriaConfig, prelude::*},
    };
}

/// Compile a boolean expression over rows of `model`.
///
/// `Ok(None)` means the expression imposes no filter.
pub fn compile(
    model: &'static EntityModel,
    expr: &Expr,
) -> Result<Option<CriteriaExpression>, Error> {
    compile_with(model, &CriteriaConfig::default(), expr)
}

/// Like [`compile`] with explicit translator settings.
pub fn compile_with(
    model: &'static EntityModel,
    config: &CriteriaConfig,
    expr: &Expr,
) -> Result<Option<CriteriaExpression>, Error> {
    Ok(Translator::new(model, config).criteria(expr)?)
}

/// Compile a value expression over rows of `model`.
pub fn compile_operand(model: &'static EntityModel, expr: &Expr) -> Result<Operand, Error> {
    Ok(Translator::new(model, &CriteriaConfig::default()).operand(expr)?)
}

/// Evaluate an operand tree against one row.
pub fn compute<R: Row + ?Sized>(expr: &OperationExpression, row: &R) -> Result<Value, Error> {
    Ok(expr.compute(row)?)
}
