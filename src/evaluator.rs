use thiserror::Error;
use tracing::{debug, trace};

use crate::{
    ast::{Condition, Group, LogicalOp, Operator, Statement},
    error,
    parser::ParseError,
    path,
    value::{Literal, Value},
};

/// Errors that can occur while evaluating a rule against a context.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    /// Array index past the end of the array
    #[error("array index out of range: {index}")]
    IndexOutOfRange { index: usize, len: usize },

    /// Bracketed index that does not fit in `usize`
    #[error("invalid array index: {0}")]
    InvalidIndex(String),

    /// Path segment applied to a value of the wrong kind
    #[error("invalid field path: cannot apply '{segment}' to {found}")]
    InvalidPath {
        segment: String,
        found: &'static str,
    },

    #[error("invalid types for numeric comparison: {left} and {right}")]
    NumericTypes {
        left: &'static str,
        right: &'static str,
    },

    #[error("invalid types for 'between' operator: {field} between {low} and {high}")]
    BetweenTypes {
        field: &'static str,
        low: &'static str,
        high: &'static str,
    },

    #[error("the field value is {found}, not a string, for '{operator}' operator")]
    NotAString {
        operator: String,
        found: &'static str,
    },

    #[error("unknown operator '{0}'")]
    UnknownOperator(String),

    /// Only reachable with hand-built conditions; the parser never produces these.
    #[error("operator '{operator}' expects {expected} operand(s), got {found}")]
    OperandCount {
        operator: String,
        expected: &'static str,
        found: usize,
    },
}

/// Evaluates conditions and groups against one context value.
///
/// The context is only ever read.
pub struct Evaluator<'a> {
    context: &'a Value,
}

impl<'a> Evaluator<'a> {
    pub fn new(context: &'a Value) -> Self {
        Evaluator { context }
    }

    pub fn eval_statement(&self, statement: &Statement) -> Result<bool, EvalError> {
        match statement {
            Statement::Condition(condition) => self.eval_condition(condition),
            Statement::Group(group) => self.eval_group(group),
        }
    }

    /// Evaluates every child in order, even once the outcome is known.
    ///
    /// An error from any child therefore surfaces, even after an earlier
    /// child already decided the group.
    pub fn eval_group(&self, group: &Group) -> Result<bool, EvalError> {
        let mut result = match group.logical_op {
            LogicalOp::And => true,
            LogicalOp::Or => false,
        };

        for child in &group.children {
            let child_result = self.eval_statement(child)?;
            result = match group.logical_op {
                LogicalOp::And => result && child_result,
                LogicalOp::Or => result || child_result,
            };
        }

        Ok(result)
    }

    pub fn eval_condition(&self, condition: &Condition) -> Result<bool, EvalError> {
        let value = path::resolve(&condition.field, self.context)?;

        let result = match &condition.operator {
            Operator::Eq => value == single_operand(condition)?,
            Operator::Neq => value != single_operand(condition)?,
            Operator::Gt => compare_numeric(value, single_operand(condition)?, |a, b| a > b)?,
            Operator::Gte => compare_numeric(value, single_operand(condition)?, |a, b| a >= b)?,
            Operator::Lt => compare_numeric(value, single_operand(condition)?, |a, b| a < b)?,
            Operator::Lte => compare_numeric(value, single_operand(condition)?, |a, b| a <= b)?,
            Operator::Between => between(condition, value)?,
            Operator::Contains => {
                string_test(condition, value, |s, needle| s.contains(needle))?
            }
            Operator::StartsWith => {
                string_test(condition, value, |s, prefix| s.starts_with(prefix))?
            }
            Operator::EndsWith => {
                string_test(condition, value, |s, suffix| s.ends_with(suffix))?
            }
            Operator::In => {
                if condition.operands.is_empty() {
                    return Err(operand_count(condition, "at least 1"));
                }
                condition.operands.iter().any(|item| value == item)
            }
            Operator::Unknown(word) => return Err(EvalError::UnknownOperator(word.clone())),
        };

        let result = apply_negation(result, condition.negate);
        trace!(%condition, result, "evaluated condition");
        Ok(result)
    }
}

fn apply_negation(result: bool, negate: bool) -> bool {
    if negate { !result } else { result }
}

fn operand_count(condition: &Condition, expected: &'static str) -> EvalError {
    EvalError::OperandCount {
        operator: condition.operator.to_string(),
        expected,
        found: condition.operands.len(),
    }
}

fn single_operand(condition: &Condition) -> Result<&Literal, EvalError> {
    match condition.operands.as_slice() {
        [operand] => Ok(operand),
        _ => Err(operand_count(condition, "1")),
    }
}

fn compare_numeric<F>(field: &Value, operand: &Literal, cmp: F) -> Result<bool, EvalError>
where
    F: Fn(f64, f64) -> bool,
{
    match (field.as_number(), operand.as_number()) {
        (Some(a), Some(b)) => Ok(cmp(a, b)),
        _ => Err(EvalError::NumericTypes {
            left: field.type_name(),
            right: operand.type_name(),
        }),
    }
}

/// Inclusive on both ends: `low <= field <= high`
fn between(condition: &Condition, field: &Value) -> Result<bool, EvalError> {
    let [low, high] = condition.operands.as_slice() else {
        return Err(operand_count(condition, "2"));
    };

    match (field.as_number(), low.as_number(), high.as_number()) {
        (Some(n), Some(lo), Some(hi)) => Ok(lo <= n && n <= hi),
        _ => Err(EvalError::BetweenTypes {
            field: field.type_name(),
            low: low.type_name(),
            high: high.type_name(),
        }),
    }
}

/// The field must be a string; the operand is used in its string form.
fn string_test<F>(condition: &Condition, field: &Value, test: F) -> Result<bool, EvalError>
where
    F: Fn(&str, &str) -> bool,
{
    let Value::String(s) = field else {
        return Err(EvalError::NotAString {
            operator: condition.operator.to_string(),
            found: field.type_name(),
        });
    };

    let operand = single_operand(condition)?.to_string();
    Ok(test(s, &operand))
}

/// Evaluate a stream of parsed statements as one implicitly AND-ed program.
///
/// Statements are pulled one at a time. The first false statement ends the
/// evaluation with `Ok(false)` without pulling (or parsing) the rest; the
/// first error of either kind is returned as is.
///
/// # Examples
///
/// ```
/// use logix::{evaluator::evaluate, Lexer, Parser, Value};
/// use std::collections::HashMap;
///
/// let mut context = HashMap::new();
/// context.insert("age".to_string(), Value::Number(25.0));
///
/// let parser = Parser::new(Lexer::new("age gte 18\nage lt 30"));
/// assert!(evaluate(parser, &Value::Object(context)).unwrap());
/// ```
pub fn evaluate<I>(statements: I, context: &Value) -> error::Result<bool>
where
    I: IntoIterator<Item = Result<Statement, ParseError>>,
{
    let evaluator = Evaluator::new(context);

    for (index, statement) in statements.into_iter().enumerate() {
        let statement = statement?;
        let result = evaluator.eval_statement(&statement)?;
        debug!(index, %statement, result, "evaluated statement");

        if !result {
            debug!(index, "statement is false, skipping the rest");
            return Ok(false);
        }
    }

    Ok(true)
}

/// Evaluate an already parsed program.
pub fn evaluate_parsed(statements: &[Statement], context: &Value) -> Result<bool, EvalError> {
    let evaluator = Evaluator::new(context);
    for statement in statements {
        if !evaluator.eval_statement(statement)? {
            return Ok(false);
        }
    }
    Ok(true)
}
