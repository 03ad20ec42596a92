//! Crate-level error type

use thiserror::Error;

use crate::{evaluator::EvalError, parser::ParseError};

/// Either tier of failure from [`crate::evaluate_rules`].
///
/// Grammar errors abort the whole run; evaluation errors carry the offending
/// field, segment or types. Neither ever comes with a partial result.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Eval(#[from] EvalError),
}

pub type Result<T> = std::result::Result<T, Error>;
