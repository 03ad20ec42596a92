use std::fmt;

use crate::ast::TokenKind;

/// Comparison operator of a condition.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Operator {
    /// Structural equality (`eq`)
    Eq,
    /// Structural inequality (`neq`)
    Neq,
    /// Greater than (`gt`)
    Gt,
    /// Greater than or equal (`gte`)
    Gte,
    /// Less than (`lt`)
    Lt,
    /// Less than or equal (`lte`)
    Lte,
    /// Substring test (`contains`)
    Contains,
    /// Inclusive numeric range (`between 1 and 5`)
    Between,
    /// Membership in a literal list (`in [1, 2, 3]`)
    In,
    /// Prefix test (`startsWith`)
    StartsWith,
    /// Suffix test (`endsWith`)
    EndsWith,

    /// A bare word in operator position.
    ///
    /// Accepted by the parser so that the evaluator can report it as
    /// `unknown operator '<word>'`.
    Unknown(String),
}

impl Operator {
    /// The operator for a keyword token kind, if it is one.
    pub fn from_token(kind: TokenKind) -> Option<Operator> {
        let op = match kind {
            TokenKind::Eq => Operator::Eq,
            TokenKind::Neq => Operator::Neq,
            TokenKind::Gt => Operator::Gt,
            TokenKind::Gte => Operator::Gte,
            TokenKind::Lt => Operator::Lt,
            TokenKind::Lte => Operator::Lte,
            TokenKind::Contains => Operator::Contains,
            TokenKind::Between => Operator::Between,
            TokenKind::In => Operator::In,
            TokenKind::StartsWith => Operator::StartsWith,
            TokenKind::EndsWith => Operator::EndsWith,
            _ => return None,
        };
        Some(op)
    }

    /// Whether `not` may precede this operator.
    ///
    /// `eq`/`neq` already have a negated form, and the ordering operators
    /// have no negated reading in the language.
    pub fn allows_negation(&self) -> bool {
        matches!(
            self,
            Operator::In
                | Operator::Contains
                | Operator::Between
                | Operator::StartsWith
                | Operator::EndsWith
        )
    }

    /// Keyword as written in rule text
    pub fn keyword(&self) -> &str {
        match self {
            Operator::Eq => "eq",
            Operator::Neq => "neq",
            Operator::Gt => "gt",
            Operator::Gte => "gte",
            Operator::Lt => "lt",
            Operator::Lte => "lte",
            Operator::Contains => "contains",
            Operator::Between => "between",
            Operator::In => "in",
            Operator::StartsWith => "startsWith",
            Operator::EndsWith => "endsWith",
            Operator::Unknown(word) => word,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// How a group combines its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalOp {
    /// Every child must hold (`group and`)
    And,
    /// At least one child must hold (`group or`)
    Or,
}

impl fmt::Display for LogicalOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogicalOp::And => write!(f, "and"),
            LogicalOp::Or => write!(f, "or"),
        }
    }
}
