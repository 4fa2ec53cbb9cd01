/// TokenKind represents the payload-free classification of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Assignment operators
    Assign,
    PlusEq,
    MinEq,
    MulEq,
    DivEq,

    // Arithmetic operators
    Plus,
    Minus,
    Mult,
    Div,

    // Structural tokens
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Comma,
    Dot,
    Colon,
    SemiColon,

    // Literals
    Str,
    Int,
    Float,
    Identifier,

    // Keywords
    Let,
    If,
    Else,
    While,
    For,
    In,
    MakeFunc,
    Return,
    True,
    False,
    Null,
    And,
    Or,
    Not,
}

impl TokenKind {
    /// Returns the canonical upper-case name of a kind, as rendered in token
    /// dumps and diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Assign => "ASSIGN",
            TokenKind::PlusEq => "PLUSEQ",
            TokenKind::MinEq => "MINEQ",
            TokenKind::MulEq => "MULEQ",
            TokenKind::DivEq => "DIVEQ",
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Mult => "MULT",
            TokenKind::Div => "DIV",
            TokenKind::LParen => "LPAREN",
            TokenKind::RParen => "RPAREN",
            TokenKind::LBrace => "LBRACE",
            TokenKind::RBrace => "RBRACE",
            TokenKind::LBracket => "LBRACKET",
            TokenKind::RBracket => "RBRACKET",
            TokenKind::Comma => "COMMA",
            TokenKind::Dot => "DOT",
            TokenKind::Colon => "COLON",
            TokenKind::SemiColon => "SEMICOLON",
            TokenKind::Str => "STRING",
            TokenKind::Int => "INT",
            TokenKind::Float => "FLOAT",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::Let => "LET",
            TokenKind::If => "IF",
            TokenKind::Else => "ELSE",
            TokenKind::While => "WHILE",
            TokenKind::For => "FOR",
            TokenKind::In => "IN",
            TokenKind::MakeFunc => "MAKEFUNC",
            TokenKind::Return => "RETURN",
            TokenKind::True => "TRUE",
            TokenKind::False => "FALSE",
            TokenKind::Null => "NULL",
            TokenKind::And => "AND",
            TokenKind::Or => "OR",
            TokenKind::Not => "NOT",
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Lexeme is a token's kind together with any payload that kind carries. Only
/// strings, numbers and identifiers carry a payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Lexeme {
    Assign,
    PlusEq,
    MinEq,
    MulEq,
    DivEq,

    Plus,
    Minus,
    Mult,
    Div,

    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Comma,
    Dot,
    Colon,
    SemiColon,

    Str(String),
    Int(i64),
    Float(f64),
    Identifier(String),

    Let,
    If,
    Else,
    While,
    For,
    In,
    MakeFunc,
    Return,
    True,
    False,
    Null,
    And,
    Or,
    Not,
}

impl Lexeme {
    pub fn to_kind(&self) -> TokenKind {
        match self {
            Lexeme::Assign => TokenKind::Assign,
            Lexeme::PlusEq => TokenKind::PlusEq,
            Lexeme::MinEq => TokenKind::MinEq,
            Lexeme::MulEq => TokenKind::MulEq,
            Lexeme::DivEq => TokenKind::DivEq,
            Lexeme::Plus => TokenKind::Plus,
            Lexeme::Minus => TokenKind::Minus,
            Lexeme::Mult => TokenKind::Mult,
            Lexeme::Div => TokenKind::Div,
            Lexeme::LParen => TokenKind::LParen,
            Lexeme::RParen => TokenKind::RParen,
            Lexeme::LBrace => TokenKind::LBrace,
            Lexeme::RBrace => TokenKind::RBrace,
            Lexeme::LBracket => TokenKind::LBracket,
            Lexeme::RBracket => TokenKind::RBracket,
            Lexeme::Comma => TokenKind::Comma,
            Lexeme::Dot => TokenKind::Dot,
            Lexeme::Colon => TokenKind::Colon,
            Lexeme::SemiColon => TokenKind::SemiColon,
            Lexeme::Str(_) => TokenKind::Str,
            Lexeme::Int(_) => TokenKind::Int,
            Lexeme::Float(_) => TokenKind::Float,
            Lexeme::Identifier(_) => TokenKind::Identifier,
            Lexeme::Let => TokenKind::Let,
            Lexeme::If => TokenKind::If,
            Lexeme::Else => TokenKind::Else,
            Lexeme::While => TokenKind::While,
            Lexeme::For => TokenKind::For,
            Lexeme::In => TokenKind::In,
            Lexeme::MakeFunc => TokenKind::MakeFunc,
            Lexeme::Return => TokenKind::Return,
            Lexeme::True => TokenKind::True,
            Lexeme::False => TokenKind::False,
            Lexeme::Null => TokenKind::Null,
            Lexeme::And => TokenKind::And,
            Lexeme::Or => TokenKind::Or,
            Lexeme::Not => TokenKind::Not,
        }
    }

    /// Returns the payload of a literal-carrying lexeme.
    pub fn literal(&self) -> Option<Literal<'_>> {
        match self {
            Lexeme::Str(s) => Some(Literal::Str(s)),
            Lexeme::Int(i) => Some(Literal::Int(*i)),
            Lexeme::Float(f) => Some(Literal::Float(*f)),
            Lexeme::Identifier(id) => Some(Literal::Identifier(id)),
            _ => None,
        }
    }
}

/// A borrowed view of a token payload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Literal<'a> {
    Str(&'a str),
    Int(i64),
    Float(f64),
    Identifier(&'a str),
}

impl<'a> std::fmt::Display for Literal<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Literal::Str(s) | Literal::Identifier(s) => write!(f, "{}", s),
            Literal::Int(i) => write!(f, "{}", i),
            Literal::Float(fl) => write!(f, "{:?}", fl),
        }
    }
}

/// Cursor is a 1-based line and column position within a source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Cursor {
    pub line: usize,
    pub column: usize,
}

impl Cursor {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Self { line: 1, column: 1 }
    }
}

impl std::fmt::Display for Cursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line: {}, column: {}", self.line, self.column)
    }
}

/// Span covers a token from its first character up to, but not including,
/// `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: Cursor,
    pub end: Cursor,
}

impl Span {
    pub fn new(start: Cursor, end: Cursor) -> Self {
        Self { start, end }
    }
}

/// Token is a single classified lexeme and the span it was read from.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub span: Span,
    pub lexeme: Lexeme,
}

impl Token {
    pub fn new(span: Span, lexeme: Lexeme) -> Self {
        Self { span, lexeme }
    }

    pub fn kind(&self) -> TokenKind {
        self.lexeme.to_kind()
    }

    pub fn literal(&self) -> Option<Literal<'_>> {
        self.lexeme.literal()
    }

    pub fn line(&self) -> usize {
        self.span.start.line
    }

    pub fn column(&self) -> usize {
        self.span.start.column
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.literal() {
            Some(lit) => write!(f, "[{}: {}]", self.kind(), lit),
            None => write!(f, "[{}]", self.kind()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_only_expose_payloads_for_literal_kinds() {
        let input_expected = [
            (Lexeme::Int(5), Some(Literal::Int(5))),
            (Lexeme::Float(2.5), Some(Literal::Float(2.5))),
            (Lexeme::Str("ab".to_string()), Some(Literal::Str("ab"))),
            (
                Lexeme::Identifier("x".to_string()),
                Some(Literal::Identifier("x")),
            ),
            (Lexeme::Let, None),
            (Lexeme::Assign, None),
            (Lexeme::RBracket, None),
        ];

        for (lexeme, expected) in input_expected {
            assert_eq!(expected, lexeme.literal())
        }
    }

    #[test]
    fn should_render_tokens_with_and_without_payloads() {
        let span = Span::default();

        assert_eq!("[PLUSEQ]", Token::new(span, Lexeme::PlusEq).to_string());
        assert_eq!("[INT: 12]", Token::new(span, Lexeme::Int(12)).to_string());
        assert_eq!(
            "[FLOAT: 1.0]",
            Token::new(span, Lexeme::Float(1.0)).to_string()
        );
        assert_eq!(
            "[IDENTIFIER: foo]",
            Token::new(span, Lexeme::Identifier("foo".to_string())).to_string()
        );
        assert_eq!("[MAKEFUNC]", Token::new(span, Lexeme::MakeFunc).to_string());
    }
}
