/// A numeric literal as read from the source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl std::fmt::Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Number::Int(i) => write!(f, "{}", i),
            Number::Float(fl) => write!(f, "{:?}", fl),
        }
    }
}

/// Prefix operators applicable to a factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Plus,
    Minus,
}

impl UnaryOperator {
    pub fn symbol(&self) -> char {
        match self {
            UnaryOperator::Plus => '+',
            UnaryOperator::Minus => '-',
        }
    }
}

/// Infix arithmetic operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinaryOperator {
    pub fn symbol(&self) -> char {
        match self {
            BinaryOperator::Add => '+',
            BinaryOperator::Sub => '-',
            BinaryOperator::Mul => '*',
            BinaryOperator::Div => '/',
        }
    }
}

/// Represents a single expression in the ast. Every child is a complete node.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Number(Number),
    Unary {
        operator: UnaryOperator,
        operand: Box<Node>,
    },
    Binary {
        left: Box<Node>,
        operator: BinaryOperator,
        right: Box<Node>,
    },
    /// A named variable. The arithmetic grammar never produces one; it exists
    /// for the statement grammar and the emitter built on top of it.
    Identifier(String),
}

impl Node {
    pub fn unary(operator: UnaryOperator, operand: Node) -> Self {
        Node::Unary {
            operator,
            operand: Box::new(operand),
        }
    }

    pub fn binary(left: Node, operator: BinaryOperator, right: Node) -> Self {
        Node::Binary {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        }
    }

    /// Returns true for nodes with no children.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Number(_) | Node::Identifier(_))
    }
}

impl std::fmt::Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Node::Number(num) => write!(f, "{}", num),
            Node::Identifier(id) => write!(f, "{}", id),
            Node::Unary { operator, operand } => write!(f, "({} {})", operator.symbol(), operand),
            Node::Binary {
                left,
                operator,
                right,
            } => write!(f, "({} {} {})", operator.symbol(), left, right),
        }
    }
}

#[allow(unused_macros)]
macro_rules! term_expr {
    ($lhs:expr, '+', $rhs:expr) => {
        $crate::parser::ast::Node::binary($lhs, $crate::parser::ast::BinaryOperator::Add, $rhs)
    };
    ($lhs:expr, '-', $rhs:expr) => {
        $crate::parser::ast::Node::binary($lhs, $crate::parser::ast::BinaryOperator::Sub, $rhs)
    };
}

#[allow(unused_macros)]
macro_rules! factor_expr {
    ($lhs:expr, '*', $rhs:expr) => {
        $crate::parser::ast::Node::binary($lhs, $crate::parser::ast::BinaryOperator::Mul, $rhs)
    };
    ($lhs:expr, '/', $rhs:expr) => {
        $crate::parser::ast::Node::binary($lhs, $crate::parser::ast::BinaryOperator::Div, $rhs)
    };
}

#[allow(unused_macros)]
macro_rules! unary_expr {
    ('+', $operand:expr) => {
        $crate::parser::ast::Node::unary($crate::parser::ast::UnaryOperator::Plus, $operand)
    };
    ('-', $operand:expr) => {
        $crate::parser::ast::Node::unary($crate::parser::ast::UnaryOperator::Minus, $operand)
    };
}

#[allow(unused_macros)]
macro_rules! primary_expr {
    (int $value:expr) => {
        $crate::parser::ast::Node::Number($crate::parser::ast::Number::Int($value))
    };
    (float $value:expr) => {
        $crate::parser::ast::Node::Number($crate::parser::ast::Number::Float($value))
    };
    (id $name:expr) => {
        $crate::parser::ast::Node::Identifier($name.to_string())
    };
}

#[cfg(test)]
mod tests {
    #[test]
    fn should_render_trees_as_prefix_expressions() {
        let input_expected = [
            (primary_expr!(int 2), "2"),
            (primary_expr!(float 1.5), "1.5"),
            (unary_expr!('-', primary_expr!(id "x")), "(- x)"),
            (
                term_expr!(
                    primary_expr!(int 2),
                    '+',
                    factor_expr!(primary_expr!(int 3), '*', primary_expr!(int 4))
                ),
                "(+ 2 (* 3 4))",
            ),
        ];

        for (node, expected) in input_expected {
            assert_eq!(expected, node.to_string())
        }
    }

    #[test]
    fn should_only_treat_literals_and_identifiers_as_leaves() {
        assert!(primary_expr!(int 1).is_leaf());
        assert!(primary_expr!(id "a").is_leaf());
        assert!(!unary_expr!('+', primary_expr!(int 1)).is_leaf());
    }
}
