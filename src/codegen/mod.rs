use indexmap::IndexSet;

pub mod machine;

/// Reasons a statement cannot be lowered. Names must be declared exactly once
/// before use, and `Unsupported` covers input the target has no form for.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodeGenerationErr {
    #[error("undefined reference: {0}")]
    UndefinedReference(String),
    #[error("redeclaration of variable: {0}")]
    Redeclaration(String),
    #[error("unsupported by target: {0}")]
    Unsupported(String),
}

/// Lowers one input against the symbols declared so far, returning the
/// emitted lines in order.
pub trait CodeGenerator<S, I> {
    type Error;

    fn generate(&self, symboltable: &mut S, input: I) -> Result<Vec<String>, Self::Error>;
}

/// SymbolTable functions as a tracker for symbols that have been previously
/// declared. Iteration yields symbols in declaration order.
#[derive(Default, Debug, Clone)]
pub struct SymbolTable {
    globals: IndexSet<String>,
}

impl SymbolTable {
    /// Marks a global variable as having been declared, returning `false` if
    /// it was already present.
    pub fn declare_global(&mut self, identifier: &str) -> bool {
        self.globals.insert(identifier.to_string())
    }

    /// Returns a boolean representing if a global variable has already been
    /// declared.
    pub fn has_global(&self, identifier: &str) -> bool {
        self.globals.contains(identifier)
    }

    pub fn globals(&self) -> impl Iterator<Item = &str> {
        self.globals.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.globals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.globals.is_empty()
    }
}
