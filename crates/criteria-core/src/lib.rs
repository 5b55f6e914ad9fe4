//! Core runtime for criteria: operator vocabularies, the operand and criteria
//! trees, the translator that lowers host expressions into them, the evaluator,
//! structural fingerprints, and the ordered set/sort accumulators.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod cache;
pub mod chain;
pub mod config;
pub mod criteria;
pub mod error;
pub mod expr;
pub mod fingerprint;
pub mod model;
pub mod obs;
pub mod operation;
pub mod operator;
pub mod serialize;
pub mod translate;
pub mod types;
pub mod value;
pub mod visit;

// test
#[cfg(test)]
pub(crate) mod test_fixtures;

///
/// CONSTANTS
///

/// Default wildcard used when wrapping `contains` / `starts_with` / `ends_with`
/// literals into `like` patterns.
pub const DEFAULT_WILDCARD: char = '%';

/// Default bound on translator recursion depth.
pub const DEFAULT_MAX_DEPTH: usize = 64;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, caches, serializers, or helpers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        chain::{NameValue, OrderBy, OrderDirection},
        criteria::CriteriaExpression,
        expr::{Expr, field, lit, row},
        model::{EntityModel, FieldKind, FieldModel, Row},
        operation::{Operand, OperationExpression},
        operator::{CriteriaLogical, CriteriaOperator, OperationSign},
        value::Value,
    };
}
