use super::token::{Lexeme, TokenKind};

/// The canonical reserved words and the lexemes they reduce to.
pub static KEYWORDS: [(&str, Lexeme); 14] = [
    ("let", Lexeme::Let),
    ("if", Lexeme::If),
    ("else", Lexeme::Else),
    ("while", Lexeme::While),
    ("for", Lexeme::For),
    ("in", Lexeme::In),
    ("def", Lexeme::MakeFunc),
    ("return", Lexeme::Return),
    ("true", Lexeme::True),
    ("false", Lexeme::False),
    ("null", Lexeme::Null),
    ("and", Lexeme::And),
    ("or", Lexeme::Or),
    ("not", Lexeme::Not),
];

/// Classifies a scanned word as either a keyword or an identifier.
pub fn classify(word: String) -> Lexeme {
    KEYWORDS
        .iter()
        .find(|(keyword, _)| *keyword == word)
        .map(|(_, lexeme)| lexeme.clone())
        .unwrap_or(Lexeme::Identifier(word))
}

/// Returns the keyword spelling of a kind, if it is reserved.
pub fn spelling(kind: TokenKind) -> Option<&'static str> {
    KEYWORDS
        .iter()
        .find(|(_, lexeme)| lexeme.to_kind() == kind)
        .map(|(keyword, _)| *keyword)
}
