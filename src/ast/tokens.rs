use std::fmt;

/// Location of a token's first character in the rule text.
///
/// Lines and columns are 1-based. Structural tokens (`Indent`/`Dedent`)
/// point at the start of the line whose indentation produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Position { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// The closed set of token kinds produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// End of input. Returned forever once the input is exhausted.
    Eof,

    /// Field reference
    ///
    /// Dots and brackets are part of the lexeme; the evaluator splits them.
    ///
    /// # Examples
    /// ```text
    /// age
    /// products[0].category.name
    /// ```
    Ident,

    // Literals
    /// String literal enclosed in double quotes (lexeme is the unquoted text)
    String,
    /// Unsigned integer digits, converted to `f64` by the parser
    Number,
    True,
    False,
    /// The null literal, spelled `nil`
    Nil,

    // Comparison operators
    Eq,
    Neq,
    Gt,
    Gte,
    Lt,
    Lte,
    Contains,
    Between,
    In,
    StartsWith,
    EndsWith,

    /// Negation prefix (`not`) placed before an operator
    Not,

    // Logical keywords
    And,
    Or,
    /// Starts a logical block
    ///
    /// # Example
    /// ```text
    /// group and
    ///     age gte 18
    ///     country eq "DE"
    /// ```
    Group,

    // Punctuation
    LSquare,
    RSquare,
    Comma,

    // Structural
    /// Indentation increased by one level
    Indent,
    /// Indentation decreased by one level
    Dedent,

    /// Anything the lexer could not make sense of.
    ///
    /// The lexeme carries the offending character or a diagnostic such as
    /// `unterminated string`. The parser turns it into an error.
    Illegal,
}

impl TokenKind {
    /// Map a bare word to its keyword kind, or `Ident` when it is not reserved.
    ///
    /// Keywords are case-sensitive.
    pub fn lookup(word: &str) -> TokenKind {
        match word {
            "eq" => TokenKind::Eq,
            "neq" => TokenKind::Neq,
            "gt" => TokenKind::Gt,
            "gte" => TokenKind::Gte,
            "lt" => TokenKind::Lt,
            "lte" => TokenKind::Lte,
            "contains" => TokenKind::Contains,
            "between" => TokenKind::Between,
            "in" => TokenKind::In,
            "startsWith" => TokenKind::StartsWith,
            "endsWith" => TokenKind::EndsWith,
            "not" => TokenKind::Not,
            "true" => TokenKind::True,
            "false" => TokenKind::False,
            "nil" => TokenKind::Nil,
            "group" => TokenKind::Group,
            "and" => TokenKind::And,
            "or" => TokenKind::Or,
            _ => TokenKind::Ident,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Eof => "EOF",
            TokenKind::Ident => "IDENT",
            TokenKind::String => "STRING",
            TokenKind::Number => "NUMBER",
            TokenKind::True => "TRUE",
            TokenKind::False => "FALSE",
            TokenKind::Nil => "NIL",
            TokenKind::Eq => "EQ",
            TokenKind::Neq => "NEQ",
            TokenKind::Gt => "GT",
            TokenKind::Gte => "GTE",
            TokenKind::Lt => "LT",
            TokenKind::Lte => "LTE",
            TokenKind::Contains => "CONTAINS",
            TokenKind::Between => "BETWEEN",
            TokenKind::In => "IN",
            TokenKind::StartsWith => "STARTS_WITH",
            TokenKind::EndsWith => "ENDS_WITH",
            TokenKind::Not => "NOT",
            TokenKind::And => "AND",
            TokenKind::Or => "OR",
            TokenKind::Group => "GROUP",
            TokenKind::LSquare => "LSQUARE",
            TokenKind::RSquare => "RSQUARE",
            TokenKind::Comma => "COMMA",
            TokenKind::Indent => "INDENT",
            TokenKind::Dedent => "DEDENT",
            TokenKind::Illegal => "ILLEGAL",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single lexical or structural token.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub position: Position,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, position: Position) -> Self {
        Token {
            kind,
            lexeme: lexeme.into(),
            position,
        }
    }

    /// A token with no lexeme (`Eof`, `Indent`, `Dedent`)
    pub fn structural(kind: TokenKind, position: Position) -> Self {
        Token::new(kind, String::new(), position)
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}
