pub mod ast;
#[cfg(feature = "cli")]
pub mod cli;
pub mod convert;
pub mod error;
pub mod evaluator;
pub mod lexer;
pub mod parser;
pub mod path;
pub mod value;

pub use ast::{Condition, Group, LogicalOp, Operator, Position, Statement, Token, TokenKind};
pub use error::{Error, Result};
pub use evaluator::{EvalError, Evaluator, evaluate};
pub use lexer::{IndentStyle, Lexer, tokenize};
pub use parser::{ParseError, Parser};
pub use value::{Literal, Value};

/// Evaluate rule text against a context.
///
/// Lexer, parser and evaluator run as one pull pipeline: statements are
/// parsed only as the evaluator asks for them, and evaluation stops at the
/// first false top-level statement.
///
/// # Examples
///
/// ```
/// use logix::{convert::parse_context, evaluate_rules};
///
/// let context = parse_context(r#"{"age": 25, "title": "Hello World"}"#).unwrap();
/// let rules = "group and\n\tage gt 18\n\ttitle contains \"Hello\"";
///
/// assert!(evaluate_rules(rules, &context).unwrap());
/// ```
pub fn evaluate_rules(rule_text: &str, context: &Value) -> Result<bool> {
    let parser = Parser::new(Lexer::new(rule_text));
    evaluate(parser, context)
}

/// Parse the whole rule text without evaluating it.
pub fn check_syntax(rule_text: &str) -> std::result::Result<Vec<Statement>, ParseError> {
    Parser::new(Lexer::new(rule_text)).parse_program()
}
