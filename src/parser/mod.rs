use log::debug;

use crate::diagnostic::{Diagnostic, DiagnosticKind};
use crate::lexer::{keyword, Cursor, Lexeme, Token, TokenKind};

#[macro_use]
pub mod ast;
use ast::*;

/// The deepest nesting of parenthesized or prefixed expressions accepted
/// before parsing is abandoned.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Parse returns either a complete tree or the first diagnostic.
pub type ParseResult = Result<Node, Diagnostic>;

const ADDITIVE_OPERATORS: [(TokenKind, BinaryOperator); 2] = [
    (TokenKind::Plus, BinaryOperator::Add),
    (TokenKind::Minus, BinaryOperator::Sub),
];

const MULTIPLICATIVE_OPERATORS: [(TokenKind, BinaryOperator); 2] = [
    (TokenKind::Mult, BinaryOperator::Mul),
    (TokenKind::Div, BinaryOperator::Div),
];

const EXPECTED_FACTOR: &str = "expected int, float, identifier or '('";

/// Parser is a recursive descent parser over a finalized token sequence.
///
/// ```text
/// expr   := term   (("+"|"-") term)*
/// term   := factor (("*"|"/") factor)*
/// factor := ("+"|"-") factor | INT | FLOAT | "(" expr ")"
/// ```
pub struct Parser<'a> {
    tokens: &'a [Token],
    source_name: &'a str,
    start_line: usize,
    position: usize,
    depth: usize,
    max_depth: usize,
}

impl<'a> Parser<'a> {
    /// Creates a parser over `tokens`. `start_line` locates diagnostics when
    /// the sequence is empty.
    pub fn new(tokens: &'a [Token], source_name: &'a str, start_line: usize) -> Self {
        Self {
            tokens,
            source_name,
            start_line,
            position: 0,
            depth: 0,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Parses the whole token sequence as a single expression. Tokens left
    /// over after the expression are an error.
    pub fn parse(mut self) -> ParseResult {
        let res = self.expression().and_then(|node| match self.peek() {
            None => Ok(node),
            Some(token) => Err(self.diagnostic(
                DiagnosticKind::ExpectedToken(None),
                format!("expected end of input, found {}", describe(token)),
                token.span.start,
            )),
        });

        match &res {
            Ok(node) => debug!("{}: parsed {}", self.source_name, node),
            Err(diag) => debug!("{}: parsing failed: {}", self.source_name, diag.message),
        }

        res
    }

    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.position)
    }

    fn advance_mut(&mut self) {
        if self.position < self.tokens.len() {
            self.position += 1;
        }
    }

    /// The position directly after the last token.
    fn end_cursor(&self) -> Cursor {
        self.tokens
            .last()
            .map(|token| token.span.end)
            .unwrap_or_else(|| Cursor::new(self.start_line, 1))
    }

    fn cursor(&self) -> Cursor {
        self.peek()
            .map(|token| token.span.start)
            .unwrap_or_else(|| self.end_cursor())
    }

    fn diagnostic<M: Into<String>>(&self, kind: DiagnosticKind, message: M, at: Cursor) -> Diagnostic {
        Diagnostic::new(kind, message, self.source_name, at)
    }

    fn found(&self) -> String {
        self.peek()
            .map(describe)
            .unwrap_or_else(|| "end of input".to_string())
    }

    fn enter_mut(&mut self) -> Result<(), Diagnostic> {
        if self.depth >= self.max_depth {
            Err(self.diagnostic(
                DiagnosticKind::ExpectedToken(None),
                "expression nested too deeply",
                self.cursor(),
            ))
        } else {
            self.depth += 1;
            Ok(())
        }
    }

    fn exit_mut(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    fn expression(&mut self) -> ParseResult {
        self.enter_mut()?;
        let res = self.binary_tier(Self::term, &ADDITIVE_OPERATORS);
        self.exit_mut();
        res
    }

    fn term(&mut self) -> ParseResult {
        self.binary_tier(Self::factor, &MULTIPLICATIVE_OPERATORS)
    }

    /// Parses `operand (operator operand)*`, folding the operands into a
    /// left-associative tree. Each fold deepens the tree by one level and
    /// counts against the depth limit until the tier returns.
    fn binary_tier<F>(&mut self, operand: F, operators: &[(TokenKind, BinaryOperator)]) -> ParseResult
    where
        F: Fn(&mut Self) -> ParseResult,
    {
        let mut lhs = operand(self)?;
        let mut folded = 0;

        let res = loop {
            let operator = match self.peek().and_then(|token| {
                operators
                    .iter()
                    .find(|(kind, _)| *kind == token.kind())
                    .map(|&(_, operator)| operator)
            }) {
                Some(operator) => operator,
                None => break Ok(lhs),
            };

            if let Err(diag) = self.enter_mut() {
                break Err(diag);
            }
            folded += 1;

            self.advance_mut();
            match operand(self) {
                Ok(rhs) => lhs = Node::binary(lhs, operator, rhs),
                Err(diag) => break Err(diag),
            }
        };

        self.depth = self.depth.saturating_sub(folded);
        res
    }

    fn factor(&mut self) -> ParseResult {
        let token = match self.peek() {
            Some(token) => token,
            None => {
                return Err(self.diagnostic(
                    DiagnosticKind::ExpectedLiteral,
                    format!("{}, found end of input", EXPECTED_FACTOR),
                    self.end_cursor(),
                ))
            }
        };

        match &token.lexeme {
            Lexeme::Plus | Lexeme::Minus => {
                let operator = if token.lexeme == Lexeme::Plus {
                    UnaryOperator::Plus
                } else {
                    UnaryOperator::Minus
                };
                self.advance_mut();
                self.enter_mut()?;
                let operand = self.factor();
                self.exit_mut();
                operand.map(|operand| Node::unary(operator, operand))
            }
            Lexeme::Int(value) => {
                self.advance_mut();
                Ok(Node::Number(Number::Int(*value)))
            }
            Lexeme::Float(value) => {
                self.advance_mut();
                Ok(Node::Number(Number::Float(*value)))
            }
            Lexeme::LParen => {
                self.advance_mut();
                let inner = self.expression()?;
                match self.peek() {
                    Some(closing) if closing.kind() == TokenKind::RParen => {
                        self.advance_mut();
                        Ok(inner)
                    }
                    _ => Err(self.diagnostic(
                        DiagnosticKind::ExpectedToken(Some(TokenKind::RParen)),
                        format!("expected ')', found {}", self.found()),
                        self.cursor(),
                    )),
                }
            }
            _ => Err(self.diagnostic(
                DiagnosticKind::ExpectedLiteral,
                format!("{}, found {}", EXPECTED_FACTOR, describe(token)),
                token.span.start,
            )),
        }
    }
}

/// Renders a token for use in a diagnostic message.
fn describe(token: &Token) -> String {
    match keyword::spelling(token.kind()) {
        Some(kw) => format!("keyword '{}'", kw),
        None => token.to_string(),
    }
}

/// parse expects a finalized token sequence and attempts to parse a single
/// expression from all of it.
pub fn parse(tokens: &[Token], source_name: &str, start_line: usize) -> ParseResult {
    Parser::new(tokens, source_name, start_line).parse()
}
