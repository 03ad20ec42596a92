//! Evaluate rules against JSON context

use tracing::debug;

use super::CliError;
use crate::convert::parse_context;

/// Options for the check command
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// Rule text
    pub rules: String,
    /// JSON context document
    pub context: Option<String>,
    /// Only validate syntax, don't evaluate
    pub syntax_only: bool,
}

/// Result of a check operation
#[derive(Debug, Clone, PartialEq)]
pub enum CheckResult {
    /// The whole program parsed
    SyntaxValid { statements: usize },
    /// The rules were evaluated against the context
    Evaluated(bool),
}

/// Execute a logix check operation
pub fn execute_check(options: &CheckOptions) -> Result<CheckResult, CliError> {
    if options.syntax_only {
        let statements = crate::check_syntax(&options.rules)?;
        debug!(statements = statements.len(), "syntax is valid");
        return Ok(CheckResult::SyntaxValid {
            statements: statements.len(),
        });
    }

    let json = options.context.as_deref().ok_or(CliError::NoContext)?;
    let context = parse_context(json)?;

    let result = crate::evaluate_rules(&options.rules, &context)?;
    Ok(CheckResult::Evaluated(result))
}
