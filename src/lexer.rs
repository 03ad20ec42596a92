use tracing::{debug, trace};

use crate::ast::{Position, Token, TokenKind};

/// Indentation unit, fixed by the first indented line of the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndentStyle {
    /// One level is this many spaces
    Spaces(usize),
    /// One level is one tab
    Tabs,
}

/// Turns rule text into tokens, one per call.
///
/// Besides lexical tokens the lexer emits `Indent`/`Dedent` whenever the
/// indentation of a new line differs from the enclosing block. Lexical
/// problems never stop the lexer: they come out as `Illegal` tokens and
/// scanning continues after them.
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
    indent_style: Option<IndentStyle>,
    indent_stack: Vec<usize>,
    pending_dedents: usize,
    /// Start of the line that triggered the pending `Dedent`s
    dedent_position: Position,
    at_line_start: bool,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
            indent_style: None,
            indent_stack: vec![0],
            pending_dedents: 0,
            dedent_position: Position::default(),
            at_line_start: false,
        }
    }

    /// The detected indentation unit, once an indented line has been seen.
    pub fn indent_style(&self) -> Option<IndentStyle> {
        self.indent_style
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_char(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }

    fn advance(&mut self) {
        if let Some(ch) = self.current_char() {
            self.position += 1;
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
    }

    fn here(&self) -> Position {
        Position::new(self.line, self.column)
    }

    fn current_level(&self) -> usize {
        self.indent_stack.last().copied().unwrap_or(0)
    }

    fn skip_inline_whitespace(&mut self) {
        while let Some(' ' | '\t' | '\r') = self.current_char() {
            self.advance();
        }
    }

    /// Skip a `#` comment up to, but not including, the line break
    fn skip_comment(&mut self) {
        while let Some(ch) = self.current_char() {
            if ch == '\n' {
                break;
            }
            self.advance();
        }
    }

    /// Returns the next token. Once the input is exhausted every open
    /// block is closed with a `Dedent`, then `Eof` is returned forever.
    pub fn next_token(&mut self) -> Token {
        let token = self.scan();
        trace!(kind = %token.kind, lexeme = %token.lexeme, at = %token.position, "token");
        token
    }

    fn scan(&mut self) -> Token {
        loop {
            if self.pending_dedents > 0 {
                self.pending_dedents -= 1;
                return Token::structural(TokenKind::Dedent, self.dedent_position);
            }

            if self.at_line_start {
                self.at_line_start = false;
                if let Some(token) = self.read_indentation() {
                    return token;
                }
            }

            self.skip_inline_whitespace();

            match self.current_char() {
                None => {
                    if self.indent_stack.len() > 1 {
                        self.pending_dedents = self.indent_stack.len() - 1;
                        self.dedent_position = self.here();
                        self.indent_stack.truncate(1);
                        continue;
                    }
                    return Token::structural(TokenKind::Eof, self.here());
                }
                Some('\n') => {
                    self.advance();
                    self.at_line_start = true;
                }
                Some('#') => self.skip_comment(),
                Some(_) => return self.read_token(),
            }
        }
    }

    /// Measure the indentation of the next line that has content and
    /// compare it with the enclosing block.
    ///
    /// Blank and comment-only lines are skipped without affecting the
    /// indentation stack.
    fn read_indentation(&mut self) -> Option<Token> {
        loop {
            let line_start = self.here();
            let mut leading = Vec::new();
            while let Some(ch @ (' ' | '\t')) = self.current_char() {
                leading.push(ch);
                self.advance();
            }

            match self.current_char() {
                None => return None,
                Some('\n') => {
                    self.advance();
                    continue;
                }
                Some('\r') if self.peek_char(1) == Some('\n') => {
                    self.advance();
                    self.advance();
                    continue;
                }
                Some('#') => {
                    self.skip_comment();
                    if self.current_char().is_none() {
                        return None;
                    }
                    self.advance();
                    continue;
                }
                Some(_) => {}
            }

            let level = self.indent_level(&leading);
            return self.compare_indent(level, line_start);
        }
    }

    fn indent_level(&mut self, leading: &[char]) -> usize {
        let Some(&first) = leading.first() else {
            return 0;
        };

        let style = match self.indent_style {
            Some(style) => style,
            None => {
                let style = if first == '\t' {
                    IndentStyle::Tabs
                } else {
                    IndentStyle::Spaces(leading.iter().take_while(|c| **c == ' ').count())
                };
                debug!(?style, line = self.line, "detected indentation style");
                self.indent_style = Some(style);
                style
            }
        };

        match style {
            IndentStyle::Tabs => leading.iter().take_while(|c| **c == '\t').count(),
            IndentStyle::Spaces(width) => {
                leading.iter().take_while(|c| **c == ' ').count() / width
            }
        }
    }

    fn compare_indent(&mut self, level: usize, position: Position) -> Option<Token> {
        let top = self.current_level();

        if level > top {
            self.indent_stack.push(level);
            return Some(Token::structural(TokenKind::Indent, position));
        }

        if level < top {
            // A level between two stack entries stops at the lower one.
            let mut popped = 0;
            while level < self.current_level() {
                self.indent_stack.pop();
                popped += 1;
            }
            self.pending_dedents += popped - 1;
            self.dedent_position = position;
            return Some(Token::structural(TokenKind::Dedent, position));
        }

        None
    }

    fn read_token(&mut self) -> Token {
        let start = self.here();

        match self.current_char() {
            Some('"') => self.read_string(start),
            Some('[') => {
                self.advance();
                Token::new(TokenKind::LSquare, "[", start)
            }
            Some(']') => {
                self.advance();
                Token::new(TokenKind::RSquare, "]", start)
            }
            Some(',') => {
                self.advance();
                Token::new(TokenKind::Comma, ",", start)
            }
            Some(ch) if ch.is_ascii_alphabetic() || ch == '_' => {
                let word = self.read_identifier();
                Token::new(TokenKind::lookup(&word), word, start)
            }
            Some(ch) if ch.is_ascii_digit() => {
                let digits = self.read_number();
                Token::new(TokenKind::Number, digits, start)
            }
            Some(ch) => {
                self.advance();
                Token::new(TokenKind::Illegal, ch.to_string(), start)
            }
            None => Token::structural(TokenKind::Eof, start),
        }
    }

    /// Field paths keep their dots and brackets: `products[0].name` is one lexeme.
    fn read_identifier(&mut self) -> String {
        let mut result = String::new();
        while let Some(ch) = self.current_char() {
            if ch.is_ascii_alphanumeric() || matches!(ch, '_' | '.' | '[' | ']') {
                result.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        result
    }

    fn read_number(&mut self) -> String {
        let mut digits = String::new();
        while let Some(ch) = self.current_char() {
            if ch.is_ascii_digit() {
                digits.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        digits
    }

    fn read_string(&mut self, start: Position) -> Token {
        let mut result = String::new();
        self.advance(); // opening quote

        while let Some(ch) = self.current_char() {
            match ch {
                '"' => {
                    self.advance();
                    return Token::new(TokenKind::String, result, start);
                }
                '\\' => {
                    self.advance();
                    let escaped = match self.current_char() {
                        Some('n') => '\n',
                        Some('t') => '\t',
                        Some('r') => '\r',
                        Some('"') => '"',
                        Some('\\') => '\\',
                        Some(other) => {
                            self.skip_past_closing_quote();
                            return Token::new(
                                TokenKind::Illegal,
                                format!("invalid escape sequence '\\{}'", other),
                                start,
                            );
                        }
                        None => break,
                    };
                    result.push(escaped);
                    self.advance();
                }
                _ => {
                    result.push(ch);
                    self.advance();
                }
            }
        }

        Token::new(TokenKind::Illegal, "unterminated string", start)
    }

    fn skip_past_closing_quote(&mut self) {
        while let Some(ch) = self.current_char() {
            self.advance();
            if ch == '"' {
                break;
            }
        }
    }
}

/// Collect every token of `input`, up to and including `Eof`.
pub fn tokenize(input: &str) -> Vec<Token> {
    let mut lexer = Lexer::new(input);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token();
        let done = token.is(TokenKind::Eof);
        tokens.push(token);
        if done {
            return tokens;
        }
    }
}

#[test]
fn test_keywords() {
    let mut lexer = Lexer::new("group and or not nil true false");
    assert_eq!(lexer.next_token().kind, TokenKind::Group);
    assert_eq!(lexer.next_token().kind, TokenKind::And);
    assert_eq!(lexer.next_token().kind, TokenKind::Or);
    assert_eq!(lexer.next_token().kind, TokenKind::Not);
    assert_eq!(lexer.next_token().kind, TokenKind::Nil);
    assert_eq!(lexer.next_token().kind, TokenKind::True);
    assert_eq!(lexer.next_token().kind, TokenKind::False);
    assert_eq!(lexer.next_token().kind, TokenKind::Eof);
}

#[test]
fn test_positions() {
    let mut lexer = Lexer::new("age eq 25\nname eq \"x\"");
    assert_eq!(lexer.next_token().position, Position::new(1, 1));
    assert_eq!(lexer.next_token().position, Position::new(1, 5));
    assert_eq!(lexer.next_token().position, Position::new(1, 8));
    assert_eq!(lexer.next_token().position, Position::new(2, 1));
    lexer.next_token();
    assert_eq!(lexer.next_token().position, Position::new(2, 9));
}
