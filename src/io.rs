use crate::{
    tree::{Expression, Node, Node::*},
    value::Scalar,
};

/// Every binary node is wrapped in parentheses, so the printed text never
/// depends on operator precedence.
impl<T: Scalar> std::fmt::Display for Node<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Constant(value) => write!(f, "{}", value.format_constant()),
            Variable(name) => write!(f, "{}", name),
            Unary(op, input) => write!(f, "{}({})", op.name(), input),
            Binary(op, lhs, rhs) => write!(f, "({} {} {})", lhs, op.symbol(), rhs),
        }
    }
}

impl<T: Scalar> std::fmt::Display for Expression<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.node())
    }
}
