use std::mem;

use thiserror::Error;
use tracing::trace;

use crate::{
    ast::{Condition, Group, LogicalOp, Operator, Position, Statement, Token, TokenKind},
    lexer::Lexer,
    value::Literal,
};

/// Grammar violations. Any of these aborts the parse; the parser yields
/// nothing after the first one.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("unexpected token '{lexeme}' of kind {kind} at {position}, expected {expected}")]
    UnexpectedToken {
        lexeme: String,
        kind: TokenKind,
        position: Position,
        expected: &'static str,
    },

    #[error("unexpected end of input at {position}, expected {expected}")]
    UnexpectedEof {
        position: Position,
        expected: &'static str,
    },

    /// The lexer produced an `Illegal` token (stray character, bad string)
    #[error("illegal token at {position}: {lexeme}")]
    IllegalToken { lexeme: String, position: Position },

    #[error("negation is not supported for operator '{operator}' at {position}")]
    NegationNotSupported { operator: String, position: Position },

    #[error("expected an indented block after 'group {logical_op}' at {position}")]
    MissingBlock {
        logical_op: LogicalOp,
        position: Position,
    },

    #[error("unterminated list starting at {position}: expected ']'")]
    UnterminatedList { position: Position },

    #[error("empty list at {position}: 'in' needs at least one value")]
    EmptyList { position: Position },

    #[error("invalid number literal '{lexeme}' at {position}")]
    InvalidNumber { lexeme: String, position: Position },
}

/// Recursive-descent parser with a single token of lookahead.
///
/// Each call to [`Parser::parse_next`] yields one top-level statement. The
/// parser also iterates as `Result<Statement, ParseError>`.
///
/// Indentation only delimits the block after a group header. Any other
/// `Indent`, and the `Dedent` that closes it, is stepped over, so an
/// over-indented line reads as the next statement of the enclosing block.
///
/// ```text
/// program    := statement*
/// statement  := group | condition
/// group      := "group" ("and"|"or") INDENT statement* DEDENT
/// condition  := IDENT ["not"] OPERATOR value_spec
/// value_spec := "between" scalar "and" scalar
///             | "[" scalar ("," scalar)* "]"
///             | scalar
/// scalar     := STRING | NUMBER | "true" | "false" | "nil"
/// ```
pub struct Parser {
    lexer: Lexer,
    current_token: Token,
    /// Set when `advance` stepped over an `Indent` to reach `current_token`
    after_indent: bool,
    /// One entry per open indentation level, `true` when it is a group block
    open_levels: Vec<bool>,
    failed: bool,
}

impl Parser {
    pub fn new(lexer: Lexer) -> Self {
        let mut parser = Parser {
            lexer,
            current_token: Token::structural(TokenKind::Eof, Position::default()),
            after_indent: false,
            open_levels: Vec::new(),
            failed: false,
        };
        parser.advance();
        parser
    }

    /// Move to the next token, stepping over every `Indent` and over the
    /// `Dedent`s that close levels no group header claimed.
    fn advance(&mut self) {
        self.after_indent = false;
        loop {
            self.current_token = self.lexer.next_token();
            match self.current_token.kind {
                TokenKind::Indent => {
                    self.open_levels.push(false);
                    self.after_indent = true;
                }
                TokenKind::Dedent => {
                    if self.open_levels.pop() != Some(false) {
                        break;
                    }
                }
                _ => break,
            }
        }
    }

    fn peek_kind(&self) -> TokenKind {
        self.current_token.kind
    }

    fn unexpected(&self, expected: &'static str) -> ParseError {
        let token = &self.current_token;
        match token.kind {
            TokenKind::Illegal => ParseError::IllegalToken {
                lexeme: token.lexeme.clone(),
                position: token.position,
            },
            TokenKind::Eof => ParseError::UnexpectedEof {
                position: token.position,
                expected,
            },
            kind => ParseError::UnexpectedToken {
                lexeme: token.lexeme.clone(),
                kind,
                position: token.position,
                expected,
            },
        }
    }

    /// Parse the next top-level statement.
    ///
    /// Returns `Ok(None)` once the input is exhausted, and also after an
    /// error has been returned.
    pub fn parse_next(&mut self) -> Result<Option<Statement>, ParseError> {
        if self.failed || self.current_token.is(TokenKind::Eof) {
            return Ok(None);
        }

        match self.parse_statement() {
            Ok(statement) => {
                trace!(%statement, "parsed statement");
                Ok(Some(statement))
            }
            Err(e) => {
                self.failed = true;
                Err(e)
            }
        }
    }

    /// Parse every remaining statement, failing on the first grammar error.
    pub fn parse_program(&mut self) -> Result<Vec<Statement>, ParseError> {
        self.collect()
    }

    fn parse_statement(&mut self) -> Result<Statement, ParseError> {
        match self.peek_kind() {
            TokenKind::Group => Ok(Statement::Group(self.parse_group()?)),
            TokenKind::Ident => Ok(Statement::Condition(self.parse_condition()?)),
            _ => Err(self.unexpected("a condition or 'group'")),
        }
    }

    fn parse_group(&mut self) -> Result<Group, ParseError> {
        self.advance(); // consume 'group'

        let logical_op = match self.peek_kind() {
            TokenKind::And => LogicalOp::And,
            TokenKind::Or => LogicalOp::Or,
            _ => return Err(self.unexpected("'and' or 'or' after 'group'")),
        };
        self.advance();

        if !self.after_indent {
            return Err(ParseError::MissingBlock {
                logical_op,
                position: self.current_token.position,
            });
        }
        if let Some(level) = self.open_levels.last_mut() {
            *level = true;
        }

        let mut children = Vec::new();
        loop {
            match self.peek_kind() {
                TokenKind::Dedent => {
                    self.advance();
                    break;
                }
                TokenKind::Eof => break,
                _ => children.push(self.parse_statement()?),
            }
        }

        Ok(Group {
            logical_op,
            children,
        })
    }

    fn parse_condition(&mut self) -> Result<Condition, ParseError> {
        let field = mem::take(&mut self.current_token.lexeme);
        self.advance();

        let negate = self.peek_kind() == TokenKind::Not;
        if negate {
            self.advance();
        }

        let position = self.current_token.position;
        let operator = match self.peek_kind() {
            TokenKind::Ident => Operator::Unknown(self.current_token.lexeme.clone()),
            kind => Operator::from_token(kind)
                .ok_or_else(|| self.unexpected("a comparison operator"))?,
        };

        if negate && !operator.allows_negation() {
            return Err(ParseError::NegationNotSupported {
                operator: operator.to_string(),
                position,
            });
        }
        self.advance();

        let next = self.peek_kind();
        let operands = match &operator {
            Operator::Between => self.parse_range()?,
            Operator::In | Operator::Unknown(_) if next == TokenKind::LSquare => {
                self.parse_list()?
            }
            _ if next == TokenKind::LSquare => {
                return Err(self.unexpected("a single value ('[...]' lists are only valid with 'in')"));
            }
            _ => vec![self.parse_scalar()?],
        };

        Ok(Condition {
            field,
            operator,
            operands,
            negate,
        })
    }

    fn parse_range(&mut self) -> Result<Vec<Literal>, ParseError> {
        let low = self.parse_scalar()?;

        if self.peek_kind() != TokenKind::And {
            return Err(self.unexpected("'and' between the bounds of 'between'"));
        }
        self.advance();

        let high = self.parse_scalar()?;
        Ok(vec![low, high])
    }

    fn parse_list(&mut self) -> Result<Vec<Literal>, ParseError> {
        let open = self.current_token.position;
        self.advance(); // consume '['

        let mut items = Vec::new();
        loop {
            match self.peek_kind() {
                TokenKind::RSquare => break,
                TokenKind::Eof => return Err(ParseError::UnterminatedList { position: open }),
                _ => items.push(self.parse_scalar()?),
            }

            match self.peek_kind() {
                TokenKind::Comma => self.advance(),
                TokenKind::RSquare => break,
                TokenKind::Eof => return Err(ParseError::UnterminatedList { position: open }),
                _ => return Err(self.unexpected("',' or ']' in list")),
            }
        }
        self.advance(); // consume ']'

        if items.is_empty() {
            return Err(ParseError::EmptyList { position: open });
        }
        Ok(items)
    }

    fn parse_scalar(&mut self) -> Result<Literal, ParseError> {
        let literal = match self.peek_kind() {
            TokenKind::String => Literal::String(mem::take(&mut self.current_token.lexeme)),
            TokenKind::Number => {
                let lexeme = &self.current_token.lexeme;
                let n = lexeme.parse::<f64>().map_err(|_| ParseError::InvalidNumber {
                    lexeme: lexeme.clone(),
                    position: self.current_token.position,
                })?;
                Literal::Number(n)
            }
            TokenKind::True => Literal::Boolean(true),
            TokenKind::False => Literal::Boolean(false),
            TokenKind::Nil => Literal::Null,
            _ => return Err(self.unexpected("a string, number, true, false or nil")),
        };
        self.advance();
        Ok(literal)
    }
}

impl Iterator for Parser {
    type Item = Result<Statement, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.parse_next().transpose()
    }
}
