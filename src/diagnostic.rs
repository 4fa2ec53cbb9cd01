use crate::lexer::{Cursor, TokenKind};

/// DiagnosticKind classifies why lexing or parsing stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// A character that begins no valid token.
    IllegalCharacter,
    /// Input ended inside a token, such as an unterminated string.
    UnexpectedEnd,
    /// A specific token, or the end of input when `None`, was required.
    ExpectedToken(Option<TokenKind>),
    /// A literal or a parenthesized expression was required.
    ExpectedLiteral,
}

impl DiagnosticKind {
    /// Returns true for the lexical family. The lexer also reports an integer
    /// literal too large for 64 bits as `ExpectedLiteral`, which stays in the
    /// syntactic family.
    pub fn is_lexical(&self) -> bool {
        matches!(
            self,
            DiagnosticKind::IllegalCharacter | DiagnosticKind::UnexpectedEnd
        )
    }

    /// Returns true for errors raised by the parser.
    pub fn is_syntactic(&self) -> bool {
        !self.is_lexical()
    }
}

impl std::fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiagnosticKind::IllegalCharacter => write!(f, "IllegalCharacter"),
            DiagnosticKind::UnexpectedEnd => write!(f, "UnexpectedEnd"),
            DiagnosticKind::ExpectedToken(Some(kind)) => write!(f, "ExpectedToken({})", kind),
            DiagnosticKind::ExpectedToken(None) => write!(f, "ExpectedToken"),
            DiagnosticKind::ExpectedLiteral => write!(f, "ExpectedLiteral"),
        }
    }
}

/// Diagnostic is the structured error value returned by both the lexer and
/// the parser. No token sequence or tree accompanies it.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{kind}: {message}\nat line: {line}, {column}\nin file: {source_name}")]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
    pub source_name: String,
    pub line: usize,
    pub column: usize,
}

impl Diagnostic {
    pub fn new<M: Into<String>>(
        kind: DiagnosticKind,
        message: M,
        source_name: &str,
        at: Cursor,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source_name: source_name.to_string(),
            line: at.line,
            column: at.column,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_render_kind_message_and_location() {
        let diag = Diagnostic::new(
            DiagnosticKind::ExpectedToken(Some(TokenKind::RParen)),
            "expected ')'",
            "main.amp",
            Cursor::new(3, 7),
        );

        assert_eq!(
            "ExpectedToken(RPAREN): expected ')'\nat line: 3, 7\nin file: main.amp",
            diag.to_string()
        );
    }

    #[test]
    fn should_partition_lexical_and_syntactic_kinds() {
        assert!(DiagnosticKind::IllegalCharacter.is_lexical());
        assert!(DiagnosticKind::UnexpectedEnd.is_lexical());
        assert!(DiagnosticKind::ExpectedLiteral.is_syntactic());
        assert!(DiagnosticKind::ExpectedToken(None).is_syntactic());
    }
}
