#[macro_use]
pub mod parser;

pub mod ast;
pub mod codegen;
pub mod diagnostic;
pub mod lexer;
pub mod source;

pub use diagnostic::{Diagnostic, DiagnosticKind};

/// Tokenizes and parses every non-blank line of `text`, returning one tree
/// per line or the first diagnostic encountered.
pub fn compile_source(text: &str, source_name: &str) -> Result<Vec<ast::Node>, Diagnostic> {
    source::lines(text)
        .map(|(line, code)| {
            lexer::tokenize(code, source_name, line)
                .and_then(|tokens| parser::parse(&tokens, source_name, line))
        })
        .collect()
}
