//! Token stream dump for debugging rule files

use crate::lexer::tokenize;

/// One line per token: `line:column KIND "lexeme"`
pub fn format_tokens(rules: &str) -> String {
    tokenize(rules)
        .iter()
        .map(|token| {
            let at = format!("{}:{}", token.position.line, token.position.column);
            if token.lexeme.is_empty() {
                format!("{:<8}{}", at, token.kind)
            } else {
                format!("{:<8}{} {:?}", at, token.kind, token.lexeme)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
