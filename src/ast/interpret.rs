use crate::ast::{BinaryOperator, Node, Number, UnaryOperator};

/// EvalError represents a tree that cannot be reduced to a number.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EvalError {
    #[error("division by zero")]
    DivisionByZero,
    #[error("integer overflow evaluating {0}")]
    Overflow(char),
    #[error("unbound identifier: {0}")]
    UnboundIdentifier(String),
}

/// Reduces a tree to a single number. Integer operands stay integers; any
/// float operand promotes the operation to a float.
pub fn interpret(node: &Node) -> Result<Number, EvalError> {
    match node {
        Node::Number(num) => Ok(*num),
        Node::Identifier(id) => Err(EvalError::UnboundIdentifier(id.clone())),
        Node::Unary { operator, operand } => {
            interpret(operand).and_then(|value| interpret_unary_expression(*operator, value))
        }
        Node::Binary {
            left,
            operator,
            right,
        } => {
            let lhs = interpret(left)?;
            let rhs = interpret(right)?;
            interpret_binary_expression(*operator, lhs, rhs)
        }
    }
}

fn interpret_unary_expression(operator: UnaryOperator, value: Number) -> Result<Number, EvalError> {
    match (operator, value) {
        (UnaryOperator::Plus, value) => Ok(value),
        (UnaryOperator::Minus, Number::Int(i)) => i
            .checked_neg()
            .map(Number::Int)
            .ok_or(EvalError::Overflow(operator.symbol())),
        (UnaryOperator::Minus, Number::Float(f)) => Ok(Number::Float(-f)),
    }
}

fn interpret_binary_expression(
    operator: BinaryOperator,
    lhs: Number,
    rhs: Number,
) -> Result<Number, EvalError> {
    match (lhs, rhs) {
        (Number::Int(_), Number::Int(0)) if operator == BinaryOperator::Div => {
            Err(EvalError::DivisionByZero)
        }
        (Number::Int(l), Number::Int(r)) => {
            let res = match operator {
                BinaryOperator::Add => l.checked_add(r),
                BinaryOperator::Sub => l.checked_sub(r),
                BinaryOperator::Mul => l.checked_mul(r),
                BinaryOperator::Div => l.checked_div(r),
            };
            res.map(Number::Int)
                .ok_or(EvalError::Overflow(operator.symbol()))
        }
        (l, r) => {
            let (l, r) = (as_float(l), as_float(r));
            let res = match operator {
                BinaryOperator::Add => l + r,
                BinaryOperator::Sub => l - r,
                BinaryOperator::Mul => l * r,
                BinaryOperator::Div => l / r,
            };
            Ok(Number::Float(res))
        }
    }
}

fn as_float(num: Number) -> f64 {
    match num {
        Number::Int(i) => i as f64,
        Number::Float(f) => f,
    }
}
