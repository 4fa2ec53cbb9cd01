use crate::ast::Number;

/// A literal operand: a number, or a character written in quotes for the
/// display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Number(Number),
    Char(char),
}

impl From<Number> for Value {
    fn from(num: Number) -> Self {
        Value::Number(num)
    }
}

impl From<char> for Value {
    fn from(c: char) -> Self {
        Value::Char(c)
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Number(num) => write!(f, "{}", num),
            Value::Char(c) => write!(f, "'{}'", c),
        }
    }
}

/// Binary operations that update a variable slot in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Sub,
    Mult,
    Div,
    And,
    Or,
}

impl Operation {
    pub fn mnemonic(&self) -> &'static str {
        match self {
            Operation::Add => "add",
            Operation::Sub => "sub",
            Operation::Mult => "mult",
            Operation::Div => "div",
            Operation::And => "and",
            Operation::Or => "or",
        }
    }
}

impl From<crate::ast::BinaryOperator> for Operation {
    fn from(op: crate::ast::BinaryOperator) -> Self {
        use crate::ast::BinaryOperator;

        match op {
            BinaryOperator::Add => Operation::Add,
            BinaryOperator::Sub => Operation::Sub,
            BinaryOperator::Mul => Operation::Mult,
            BinaryOperator::Div => Operation::Div,
        }
    }
}

/// A single line of AS output.
#[derive(Debug, Clone, PartialEq)]
pub enum Instruction {
    /// A bare assembler directive such as `#AS`.
    Directive(&'static str),
    Define {
        name: String,
        value: Value,
    },
    Change {
        name: String,
        value: Value,
    },
    Copy {
        name: String,
        source: String,
    },
    Binary {
        operation: Operation,
        lhs: String,
        rhs: String,
        dest: String,
    },
    Not {
        name: String,
    },
    Store {
        width: usize,
        offset: usize,
        value: Value,
    },
}

impl std::fmt::Display for Instruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Instruction::Directive(directive) => write!(f, "{}", directive),
            Instruction::Define { name, value } => write!(f, "define ${} = {}", name, value),
            Instruction::Change { name, value } => write!(f, "change ${} = {}", name, value),
            Instruction::Copy { name, source } => write!(f, "change ${} -> ${}", name, source),
            Instruction::Binary {
                operation,
                lhs,
                rhs,
                dest,
            } => write!(
                f,
                "{} ${} , ${} -> ${}",
                operation.mnemonic(),
                lhs,
                rhs,
                dest
            ),
            Instruction::Not { name } => write!(f, "not ${} -> ${}", name, name),
            Instruction::Store {
                width,
                offset,
                value,
            } => write!(f, "change *[{}]{} = {}", width, offset, value),
        }
    }
}
