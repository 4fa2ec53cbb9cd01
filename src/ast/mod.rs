pub mod interpret;

pub use crate::parser::ast::{BinaryOperator, Node, Number, UnaryOperator};
