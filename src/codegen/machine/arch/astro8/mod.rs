use log::debug;

use crate::ast::{Node, Number, UnaryOperator};
use crate::codegen::{CodeGenerationErr, CodeGenerator, SymbolTable};

mod instruction;
pub use instruction::{Instruction, Operation, Value};

/// The directive every AS program opens with.
pub const DIRECTIVE: &str = "#AS";

/// Slot used to stage literal right-hand operands.
pub const SCRATCH: &str = "COMPILERVAR";

/// Prefix for the slots holding intermediate results of nested expressions.
pub const TEMPORARY_PREFIX: &str = "COMPILERTMP";

/// Astro8 represents the astro8 AS machine target.
#[derive(Debug, Default, Clone, Copy)]
pub struct Astro8;

/// The right-hand side of an operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Variable(String),
    Literal(Value),
}

impl From<Number> for Operand {
    fn from(value: Number) -> Self {
        Operand::Literal(value.into())
    }
}

impl From<char> for Operand {
    fn from(value: char) -> Self {
        Operand::Literal(value.into())
    }
}

impl From<&str> for Operand {
    fn from(name: &str) -> Self {
        Operand::Variable(name.to_string())
    }
}

/// A unit of work for the emitter. Each statement lowers to one or more
/// instructions.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Define {
        name: String,
        value: Value,
    },
    Set {
        name: String,
        value: Operand,
    },
    /// Applies `operation` to `name` and `value`, storing the result in `name`.
    Apply {
        operation: Operation,
        name: String,
        value: Operand,
    },
    Not {
        name: String,
    },
    Store {
        width: usize,
        offset: usize,
        value: Value,
    },
    /// Evaluates an arithmetic tree into `name`.
    Assign {
        name: String,
        expr: Node,
    },
}

/// Returns the instructions that open every program.
pub fn codegen_preamble() -> Vec<Instruction> {
    vec![
        Instruction::Directive(DIRECTIVE),
        Instruction::Define {
            name: SCRATCH.to_string(),
            value: Number::Int(0).into(),
        },
    ]
}

impl CodeGenerator<SymbolTable, Statement> for Astro8 {
    type Error = CodeGenerationErr;

    fn generate(
        &self,
        symboltable: &mut SymbolTable,
        input: Statement,
    ) -> Result<Vec<String>, Self::Error> {
        self.lower_statement(symboltable, input)
            .map(|insts| insts.iter().map(ToString::to_string).collect())
    }
}

impl Astro8 {
    pub fn lower_statement(
        &self,
        symboltable: &mut SymbolTable,
        input: Statement,
    ) -> Result<Vec<Instruction>, CodeGenerationErr> {
        match input {
            Statement::Define { name, value } => {
                if symboltable.declare_global(&name) {
                    debug!("declared ${}", &name);
                    Ok(vec![Instruction::Define { name, value }])
                } else {
                    Err(CodeGenerationErr::Redeclaration(name))
                }
            }
            Statement::Set { name, value } => {
                require_declared(symboltable, &name)?;
                match value {
                    Operand::Variable(source) => {
                        require_declared(symboltable, &source)?;
                        Ok(vec![Instruction::Copy { name, source }])
                    }
                    Operand::Literal(value) => Ok(vec![Instruction::Change { name, value }]),
                }
            }
            Statement::Apply {
                operation,
                name,
                value,
            } => {
                require_declared(symboltable, &name)?;
                let mut insts = vec![];
                codegen_apply(symboltable, &mut insts, operation, &name, value)?;
                Ok(insts)
            }
            Statement::Not { name } => {
                require_declared(symboltable, &name)?;
                Ok(vec![Instruction::Not { name }])
            }
            Statement::Store { width: 0, offset, .. } => Err(CodeGenerationErr::Unsupported(
                format!("zero-width store at {}", offset),
            )),
            Statement::Store {
                width,
                offset,
                value,
            } => Ok(vec![Instruction::Store {
                width,
                offset,
                value,
            }]),
            Statement::Assign { name, expr } => self.lower_expression(symboltable, &name, &expr),
        }
    }

    /// Lowers an arithmetic tree into instructions leaving its value in
    /// `dest`. Non-leaf right operands are computed into `COMPILERTMPn`
    /// slots, declared on first use, where `n` is the nesting depth.
    pub fn lower_expression(
        &self,
        symboltable: &mut SymbolTable,
        dest: &str,
        expr: &Node,
    ) -> Result<Vec<Instruction>, CodeGenerationErr> {
        require_declared(symboltable, dest)?;
        let mut insts = vec![];

        // dest is overwritten by the leftmost operand before the rest of the
        // tree is read, so trees that read dest are built in a temporary.
        if !expr.is_leaf() && mentions(expr, dest) {
            let tmp = temporary(symboltable, &mut insts, 0);
            codegen_expr(symboltable, &mut insts, &tmp, expr, 1)?;
            insts.push(Instruction::Copy {
                name: dest.to_string(),
                source: tmp,
            });
        } else {
            codegen_expr(symboltable, &mut insts, dest, expr, 0)?;
        }

        Ok(insts)
    }
}

fn require_declared(symboltable: &SymbolTable, name: &str) -> Result<(), CodeGenerationErr> {
    symboltable
        .has_global(name)
        .then_some(())
        .ok_or_else(|| CodeGenerationErr::UndefinedReference(name.to_string()))
}

/// Emits `name = name <operation> value`, staging literals through the
/// scratch slot.
fn codegen_apply(
    symboltable: &SymbolTable,
    insts: &mut Vec<Instruction>,
    operation: Operation,
    name: &str,
    value: Operand,
) -> Result<(), CodeGenerationErr> {
    let rhs = match value {
        Operand::Variable(source) => {
            require_declared(symboltable, &source)?;
            source
        }
        Operand::Literal(value) => {
            insts.push(Instruction::Change {
                name: SCRATCH.to_string(),
                value,
            });
            SCRATCH.to_string()
        }
    };

    insts.push(Instruction::Binary {
        operation,
        lhs: name.to_string(),
        rhs,
        dest: name.to_string(),
    });
    Ok(())
}

fn codegen_expr(
    symboltable: &mut SymbolTable,
    insts: &mut Vec<Instruction>,
    dest: &str,
    expr: &Node,
    depth: usize,
) -> Result<(), CodeGenerationErr> {
    match expr {
        Node::Number(value) => {
            insts.push(Instruction::Change {
                name: dest.to_string(),
                value: Value::Number(*value),
            });
            Ok(())
        }
        Node::Identifier(source) => {
            require_declared(symboltable, source)?;
            insts.push(Instruction::Copy {
                name: dest.to_string(),
                source: source.clone(),
            });
            Ok(())
        }
        Node::Unary {
            operator: UnaryOperator::Plus,
            operand,
        } => codegen_expr(symboltable, insts, dest, operand, depth),
        Node::Unary {
            operator: UnaryOperator::Minus,
            operand,
        } => {
            let tmp = temporary(symboltable, insts, depth);
            codegen_expr(symboltable, insts, &tmp, operand, depth + 1)?;
            insts.push(Instruction::Change {
                name: dest.to_string(),
                value: Number::Int(0).into(),
            });
            codegen_apply(symboltable, insts, Operation::Sub, dest, Operand::Variable(tmp))
        }
        Node::Binary {
            left,
            operator,
            right,
        } => {
            codegen_expr(symboltable, insts, dest, left, depth)?;

            let rhs = match right.as_ref() {
                Node::Number(value) => Operand::Literal(Value::Number(*value)),
                Node::Identifier(source) => Operand::Variable(source.clone()),
                subtree => {
                    let tmp = temporary(symboltable, insts, depth);
                    codegen_expr(symboltable, insts, &tmp, subtree, depth + 1)?;
                    Operand::Variable(tmp)
                }
            };

            codegen_apply(symboltable, insts, (*operator).into(), dest, rhs)
        }
    }
}

/// Returns the temporary slot for `depth`, defining it on first use.
fn temporary(symboltable: &mut SymbolTable, insts: &mut Vec<Instruction>, depth: usize) -> String {
    let name = format!("{}{}", TEMPORARY_PREFIX, depth);
    if symboltable.declare_global(&name) {
        debug!("declared temporary ${}", &name);
        insts.push(Instruction::Define {
            name: name.clone(),
            value: Number::Int(0).into(),
        });
    }

    name
}

fn mentions(expr: &Node, name: &str) -> bool {
    match expr {
        Node::Number(_) => false,
        Node::Identifier(id) => id == name,
        Node::Unary { operand, .. } => mentions(operand, name),
        Node::Binary { left, right, .. } => mentions(left, name) || mentions(right, name),
    }
}

/// Program accumulates the instructions of a single AS output file along
/// with the variables it has declared.
#[derive(Debug, Clone)]
pub struct Program {
    target: Astro8,
    symbols: SymbolTable,
    instructions: Vec<Instruction>,
}

impl Program {
    pub fn new() -> Self {
        let mut symbols = SymbolTable::default();
        symbols.declare_global(SCRATCH);

        Self {
            target: Astro8,
            symbols,
            instructions: codegen_preamble(),
        }
    }

    /// Lowers and appends a statement. On error the program is unchanged.
    pub fn emit(&mut self, statement: Statement) -> Result<(), CodeGenerationErr> {
        let mut symbols = self.symbols.clone();
        let insts = self.target.lower_statement(&mut symbols, statement)?;

        self.symbols = symbols;
        self.instructions.extend(insts);
        Ok(())
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn lines(&self) -> Vec<String> {
        self.instructions.iter().map(ToString::to_string).collect()
    }

    /// Writes every instruction followed by a newline.
    pub fn write_to<W: std::io::Write>(&self, mut writer: W) -> std::io::Result<()> {
        for inst in &self.instructions {
            writeln!(writer, "{}", inst)?;
        }

        writer.flush()
    }
}

impl Default for Program {
    fn default() -> Self {
        Self::new()
    }
}
