use std::fmt;

use crate::ast::{LogicalOp, Operator};
use crate::value::Literal;

/// A single field test.
///
/// # Examples
/// ```text
/// age gte 18
/// title not contains "draft"
/// score between 10 and 20
/// country in ["DE", "AT", "CH"]
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    /// Field path, e.g. `products[0].category.name`
    pub field: String,
    pub operator: Operator,
    /// Exactly one literal, except `between` (two bounds) and `in` (one or more)
    pub operands: Vec<Literal>,
    /// Set by a `not` before the operator; only legal for operators where
    /// [`Operator::allows_negation`] holds
    pub negate: bool,
}

/// A logical block of conditions and nested groups.
///
/// # Example
/// ```text
/// group or
///     role eq "admin"
///     group and
///         role eq "editor"
///         verified eq true
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub logical_op: LogicalOp,
    pub children: Vec<Statement>,
}

/// One node of the rule tree.
///
/// Top-level statements of a program are implicitly AND-ed.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Condition(Condition),
    Group(Group),
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ", self.field)?;
        if self.negate {
            write!(f, "not ")?;
        }
        write!(f, "{}", self.operator)?;

        match (&self.operator, self.operands.as_slice()) {
            (Operator::Between, [low, high]) => {
                write!(f, " {} and {}", low.to_source(), high.to_source())
            }
            (Operator::In, items) => {
                let items: Vec<String> = items.iter().map(Literal::to_source).collect();
                write!(f, " [{}]", items.join(", "))
            }
            (_, operands) => {
                for operand in operands {
                    write!(f, " {}", operand.to_source())?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "group {} ({} children)", self.logical_op, self.children.len())
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Condition(c) => c.fmt(f),
            Statement::Group(g) => g.fmt(f),
        }
    }
}
