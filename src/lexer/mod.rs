use log::{debug, trace};

use crate::diagnostic::{Diagnostic, DiagnosticKind};

pub mod keyword;
mod literal;
mod token;

pub use token::{Cursor, Lexeme, Literal, Span, Token, TokenKind};

/// Lex returns either the full token sequence or the first diagnostic.
pub type LexResult = Result<Vec<Token>, Diagnostic>;

/// Scanner walks a source buffer left to right, producing one token at a time
/// with a single character of lookahead.
pub struct Scanner<'a> {
    source_name: &'a str,
    source: Vec<(usize, char)>,
    index: usize,
    line: usize,
    line_start: usize,
    halted: bool,
}

impl<'a> Scanner<'a> {
    /// Creates a scanner whose first character sits at column 1 of
    /// `start_line`.
    pub fn new(text: &str, source_name: &'a str, start_line: usize) -> Scanner<'a> {
        Scanner {
            source_name,
            source: text.chars().enumerate().collect(),
            index: 0,
            line: start_line,
            line_start: 0,
            halted: false,
        }
    }

    fn peek(&self) -> Option<char> {
        self.source.get(self.index).map(|&(_, c)| c)
    }

    fn peek_next(&self) -> Option<char> {
        self.source.get(self.index + 1).map(|&(_, c)| c)
    }

    fn cursor(&self) -> Cursor {
        Cursor::new(self.line, self.index - self.line_start + 1)
    }

    fn remaining(&self) -> &[(usize, char)] {
        &self.source[self.index..]
    }

    /// Consumes `count` characters, moving to a new line on each `\n`.
    fn advance_by_mut(&mut self, count: usize) {
        for _ in 0..count {
            if let Some(&(_, c)) = self.source.get(self.index) {
                self.index += 1;
                if c == '\n' {
                    self.line += 1;
                    self.line_start = self.index;
                }
            }
        }
    }

    fn diagnostic<M: Into<String>>(&self, kind: DiagnosticKind, message: M, at: Cursor) -> Diagnostic {
        Diagnostic::new(kind, message, self.source_name, at)
    }

    /// Emits `compound` if the next character is `=`, otherwise `single`.
    fn operator_or_assignment(&mut self, single: Lexeme, compound: Lexeme) -> Lexeme {
        self.advance_by_mut(1);
        if self.peek() == Some('=') {
            self.advance_by_mut(1);
            compound
        } else {
            single
        }
    }

    fn punctuation(&mut self, lexeme: Lexeme) -> Lexeme {
        self.advance_by_mut(1);
        lexeme
    }

    fn string(&mut self, quote: char, start: Cursor) -> Result<Lexeme, Diagnostic> {
        let (body, terminated, consumed) = literal::scan_with(literal::quoted(quote), self.remaining())
            .map(|((body, terminated), consumed)| (body, terminated, consumed))
            .ok_or_else(|| {
                self.diagnostic(
                    DiagnosticKind::IllegalCharacter,
                    format!("'{}'", quote),
                    start,
                )
            })?;

        if !terminated {
            return Err(self.diagnostic(
                DiagnosticKind::UnexpectedEnd,
                format!("unterminated string, expected closing {}", quote),
                start,
            ));
        }

        self.advance_by_mut(consumed);
        Ok(Lexeme::Str(body))
    }

    fn number(&mut self, start: Cursor) -> Result<Lexeme, Diagnostic> {
        let (digits, consumed) = literal::scan_with(literal::number(), self.remaining())
            .ok_or_else(|| {
                self.diagnostic(DiagnosticKind::ExpectedLiteral, "expected a number", start)
            })?;

        let lexeme = match digits.fraction {
            Some(fraction) => format!("{}.{}", digits.whole, fraction)
                .parse::<f64>()
                .map(Lexeme::Float)
                .map_err(|e| self.diagnostic(DiagnosticKind::ExpectedLiteral, e.to_string(), start)),
            None => digits.whole.parse::<i64>().map(Lexeme::Int).map_err(|_| {
                self.diagnostic(
                    DiagnosticKind::ExpectedLiteral,
                    format!("integer literal {} does not fit in 64 bits", digits.whole),
                    start,
                )
            }),
        }?;

        self.advance_by_mut(consumed);
        Ok(lexeme)
    }

    fn word(&mut self, start: Cursor) -> Result<Lexeme, Diagnostic> {
        let (word, consumed) = literal::scan_with(literal::word(), self.remaining())
            .ok_or_else(|| {
                self.diagnostic(DiagnosticKind::IllegalCharacter, "expected a word", start)
            })?;

        self.advance_by_mut(consumed);
        Ok(keyword::classify(word))
    }

    /// Scans the next token, returning `None` once the input is exhausted.
    fn scan_token_mut(&mut self) -> Result<Option<Token>, Diagnostic> {
        loop {
            let c = match self.peek() {
                Some(c) => c,
                None => return Ok(None),
            };
            let start = self.cursor();

            let lexeme = match c {
                ' ' | '\t' | '\n' => {
                    self.advance_by_mut(1);
                    continue;
                }
                '\r' if self.peek_next() == Some('\n') => {
                    self.advance_by_mut(2);
                    continue;
                }

                '+' => self.operator_or_assignment(Lexeme::Plus, Lexeme::PlusEq),
                '-' => self.operator_or_assignment(Lexeme::Minus, Lexeme::MinEq),
                '*' => self.operator_or_assignment(Lexeme::Mult, Lexeme::MulEq),
                '/' => self.operator_or_assignment(Lexeme::Div, Lexeme::DivEq),

                '=' => self.punctuation(Lexeme::Assign),
                '(' => self.punctuation(Lexeme::LParen),
                ')' => self.punctuation(Lexeme::RParen),
                '{' => self.punctuation(Lexeme::LBrace),
                '}' => self.punctuation(Lexeme::RBrace),
                '[' => self.punctuation(Lexeme::LBracket),
                ']' => self.punctuation(Lexeme::RBracket),
                ',' => self.punctuation(Lexeme::Comma),
                '.' => self.punctuation(Lexeme::Dot),
                ':' => self.punctuation(Lexeme::Colon),
                ';' => self.punctuation(Lexeme::SemiColon),

                '"' | '\'' => self.string(c, start)?,
                c if c.is_ascii_digit() => self.number(start)?,
                c if c.is_ascii_alphabetic() => self.word(start)?,

                other => {
                    return Err(self.diagnostic(
                        DiagnosticKind::IllegalCharacter,
                        format!("'{}'", other),
                        start,
                    ))
                }
            };

            let token = Token::new(Span::new(start, self.cursor()), lexeme);
            trace!("scanned {} at {}", &token, &start);
            return Ok(Some(token));
        }
    }
}

impl<'a> IntoIterator for Scanner<'a> {
    type Item = Result<Token, Diagnostic>;
    type IntoIter = ScannerIntoIterator<'a>;

    fn into_iter(self) -> Self::IntoIter {
        ScannerIntoIterator { scanner: self }
    }
}

pub struct ScannerIntoIterator<'a> {
    scanner: Scanner<'a>,
}

impl<'a> Iterator for ScannerIntoIterator<'a> {
    type Item = Result<Token, Diagnostic>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.scanner.halted {
            return None;
        }

        match self.scanner.scan_token_mut() {
            Ok(Some(token)) => Some(Ok(token)),
            Ok(None) => {
                self.scanner.halted = true;
                None
            }
            Err(diag) => {
                self.scanner.halted = true;
                Some(Err(diag))
            }
        }
    }
}

/// tokenize lexes all of `text` into a token vector. Columns are 1-based
/// offsets within their line and the first line is numbered `start_line`.
/// The first diagnostic aborts lexing and no tokens are returned.
pub fn tokenize(text: &str, source_name: &str, start_line: usize) -> LexResult {
    let res = Scanner::new(text, source_name, start_line)
        .into_iter()
        .collect::<LexResult>();

    match &res {
        Ok(tokens) => debug!("{}:{}: lexed {} tokens", source_name, start_line, tokens.len()),
        Err(diag) => debug!("{}:{}: lexing failed: {}", source_name, start_line, diag.message),
    }

    res
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lexemes(input: &str) -> Result<Vec<Lexeme>, Diagnostic> {
        tokenize(input, "test", 1).map(|toks| toks.into_iter().map(|t| t.lexeme).collect())
    }

    #[test]
    fn should_scan_single_token() {
        let inputs = ["{", " {", " { ", "\t{\t"];

        for input in inputs {
            let mut scanner = Scanner::new(input, "test", 1).into_iter();

            assert_eq!(Some(Lexeme::LBrace), scanner.next().and_then(|t| t.ok()).map(|t| t.lexeme))
        }
    }

    #[test]
    fn should_scan_compound_operators() {
        let input_expected = [
            (["+", " +", " + "], Lexeme::Plus),
            (["+=", " +=", " += "], Lexeme::PlusEq),
            (["-", " -", " - "], Lexeme::Minus),
            (["-=", " -=", " -= "], Lexeme::MinEq),
            (["*", " *", " * "], Lexeme::Mult),
            (["*=", " *=", " *= "], Lexeme::MulEq),
            (["/", " /", " / "], Lexeme::Div),
            (["/=", " /=", " /= "], Lexeme::DivEq),
        ];

        for (inputs, expected) in input_expected {
            for input in inputs {
                assert_eq!(Ok(vec![expected.clone()]), lexemes(input))
            }
        }
    }

    #[test]
    fn should_not_join_operator_and_assign_across_whitespace() {
        assert_eq!(Ok(vec![Lexeme::Plus, Lexeme::Assign]), lexemes("+ ="));
    }

    #[test]
    fn should_scan_punctuation() {
        assert_eq!(
            Ok(vec![
                Lexeme::LParen,
                Lexeme::RParen,
                Lexeme::LBrace,
                Lexeme::RBrace,
                Lexeme::LBracket,
                Lexeme::RBracket,
                Lexeme::Comma,
                Lexeme::Dot,
                Lexeme::Colon,
                Lexeme::SemiColon,
                Lexeme::Assign,
            ]),
            lexemes("(){}[],.:;=")
        );
    }

    #[test]
    fn should_scan_numeric_literals() {
        let input_expected = [
            ("1", vec![Lexeme::Int(1)]),
            ("123", vec![Lexeme::Int(123)]),
            ("007", vec![Lexeme::Int(7)]),
            ("3.25", vec![Lexeme::Float(3.25)]),
            ("1.2.3", vec![Lexeme::Float(1.2), Lexeme::Dot, Lexeme::Int(3)]),
            ("4.", vec![Lexeme::Int(4), Lexeme::Dot]),
            ("12ab", vec![Lexeme::Int(12), Lexeme::Identifier("ab".to_string())]),
        ];

        for (input, expected) in input_expected {
            assert_eq!(Ok(expected), lexemes(input))
        }
    }

    #[test]
    fn should_reject_integers_wider_than_64_bits() {
        let res = lexemes("99999999999999999999");

        assert_eq!(
            Some((DiagnosticKind::ExpectedLiteral, false)),
            res.err().map(|d| (d.kind, d.kind.is_lexical()))
        );
    }

    #[test]
    fn should_classify_character_level_failures_as_lexical() {
        for input in ["1 ? 2", "\"open"] {
            let kind = tokenize(input, "test", 1).err().map(|d| d.kind);

            assert_eq!(Some(true), kind.map(|k| k.is_lexical()), "input: {}", input)
        }
    }

    #[test]
    fn should_scan_string_literals() {
        let input_expected = [
            ("\"ab\"", Lexeme::Str("ab".to_string())),
            ("'ab'", Lexeme::Str("ab".to_string())),
            ("\"it's\"", Lexeme::Str("it's".to_string())),
            ("'say \"hi\"'", Lexeme::Str("say \"hi\"".to_string())),
            ("\"\"", Lexeme::Str(String::new())),
            ("\"a\\tb\"", Lexeme::Str("a\\tb".to_string())),
        ];

        for (input, expected) in input_expected {
            assert_eq!(Ok(vec![expected]), lexemes(input))
        }
    }

    #[test]
    fn should_fail_on_unterminated_string() {
        for input in ["\"ab", "'ab\"", "x = 'open"] {
            let res = tokenize(input, "test", 1);

            assert_eq!(
                Some(DiagnosticKind::UnexpectedEnd),
                res.err().map(|d| d.kind),
                "input: {}",
                input
            )
        }
    }

    #[test]
    fn should_scan_identifier() {
        let input_expected = [
            (["test", " test", " test "], "test"),
            (["iffy", " iffy", " iffy "], "iffy"),
            (["a1b2", " a1b2", " a1b2 "], "a1b2"),
        ];

        for (inputs, expected) in input_expected {
            for input in inputs {
                assert_eq!(
                    Ok(vec![Lexeme::Identifier(expected.to_string())]),
                    lexemes(input)
                )
            }
        }
    }

    #[test]
    fn should_scan_keywords() {
        let input_expected = [
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

        for (input, expected) in input_expected {
            assert_eq!(Ok(vec![expected]), lexemes(input))
        }
    }

    #[test]
    fn should_report_illegal_characters_with_their_column() {
        let input_expected = [
            ("@", ("'@'", 1)),
            ("1 + $", ("'$'", 5)),
            ("ab_c", ("'_'", 3)),
            ("x = 2 # note", ("'#'", 7)),
        ];

        for (input, (message, column)) in input_expected {
            let diag = tokenize(input, "test", 4).err();

            assert_eq!(
                Some((DiagnosticKind::IllegalCharacter, message.to_string(), 4, column)),
                diag.map(|d| (d.kind, d.message, d.line, d.column))
            )
        }
    }

    #[test]
    fn should_return_empty_sequence_for_empty_input() {
        assert_eq!(Ok(vec![]), tokenize("", "test", 1));
        assert_eq!(Ok(vec![]), tokenize(" \t ", "test", 1));
    }

    #[test]
    fn should_track_line_and_column_of_each_token() {
        let positions: Vec<(usize, usize)> = tokenize("let x = 10\n  y += 2.5", "test", 7)
            .map(|toks| toks.iter().map(|t| (t.line(), t.column())).collect())
            .unwrap_or_default();

        assert_eq!(
            vec![(7, 1), (7, 5), (7, 7), (7, 9), (8, 3), (8, 5), (8, 8)],
            positions
        );
    }

    #[test]
    fn should_record_exclusive_span_ends() {
        let spans: Vec<Span> = tokenize("ab += 12", "test", 1)
            .map(|toks| toks.into_iter().map(|t| t.span).collect())
            .unwrap_or_default();

        assert_eq!(
            vec![
                Span::new(Cursor::new(1, 1), Cursor::new(1, 3)),
                Span::new(Cursor::new(1, 4), Cursor::new(1, 6)),
                Span::new(Cursor::new(1, 7), Cursor::new(1, 9)),
            ],
            spans
        );
    }

    #[test]
    fn should_scan_multiple_tokens() {
        let input = "let total = (price + 2) * 1.5;";

        assert_eq!(
            Ok(vec![
                Lexeme::Let,
                Lexeme::Identifier("total".to_string()),
                Lexeme::Assign,
                Lexeme::LParen,
                Lexeme::Identifier("price".to_string()),
                Lexeme::Plus,
                Lexeme::Int(2),
                Lexeme::RParen,
                Lexeme::Mult,
                Lexeme::Float(1.5),
                Lexeme::SemiColon,
            ]),
            lexemes(input)
        )
    }

    #[test]
    fn should_stop_iterating_after_the_first_diagnostic() {
        let results: Vec<Result<Token, Diagnostic>> = Scanner::new("1 ? 2", "test", 1)
            .into_iter()
            .collect();

        assert_eq!(2, results.len());
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
    }

    #[test]
    fn should_lex_random_digit_sequences_as_numbers() {
        use rand::{Rng, SeedableRng};

        let mut rng = rand::rngs::StdRng::seed_from_u64(0x5eed);

        for _ in 0..200 {
            let whole: String = (0..rng.random_range(1..10))
                .map(|_| char::from(b'0' + rng.random_range(0..10u8)))
                .collect();
            let fraction: String = (0..rng.random_range(0..6))
                .map(|_| char::from(b'0' + rng.random_range(0..10u8)))
                .collect();

            if fraction.is_empty() {
                let expected = whole.parse::<i64>().map(Lexeme::Int).ok();
                assert_eq!(expected.map(|l| vec![l]).ok_or(()), lexemes(&whole).map_err(|_| ()));
            } else {
                let input = format!("{}.{}", whole, fraction);
                let expected = input.parse::<f64>().map(Lexeme::Float).ok();
                assert_eq!(expected.map(|l| vec![l]).ok_or(()), lexemes(&input).map_err(|_| ()));
            }
        }
    }
}
