use crate::{
    error::Error,
    tree::{BinaryOp::*, Expression, Node, Node::*, UnaryOp::*},
    value::Scalar,
};

/// Compute the derivative of `expr` with respect to the variable `var`,
/// rendered as text.
pub fn diff<T: Scalar>(expr: Result<Expression<T>, Error>, var: &str) -> Result<String, Error> {
    Ok(expr?.diff(var))
}

impl<T: Scalar> Expression<T> {
    /// Compute the derivative of this expression with respect to the
    /// variable `var`, rendered as text.
    ///
    /// The derivative is assembled directly from the printed text of the
    /// operands and the derivatives of the operands, without building a new
    /// tree and without any simplification. Every variable other than `var`
    /// is treated as a constant. The exponent of a power is always treated as
    /// a constant, i.e. the `ln(base)` term of the general power rule is never
    /// produced.
    pub fn diff(&self, var: &str) -> String {
        self.node().diff(var)
    }
}

impl<T: Scalar> Node<T> {
    /// Compute the derivative of the subtree rooted at this node with respect
    /// to `var`, rendered as text. See `Expression::diff`.
    pub fn diff(&self, var: &str) -> String {
        match self {
            Constant(_) => "0".to_string(),
            Variable(name) => if name == var { "1" } else { "0" }.to_string(),
            Unary(op, input) => {
                let (x, dx) = (input.to_string(), input.diff(var));
                match op {
                    Sin => format!("(cos({x}) * {dx})"),
                    Cos => format!("(-sin({x}) * {dx})"),
                    Ln => format!("({dx}/{x})"),
                    Exp => format!("(exp({x}) * {dx})"),
                }
            }
            Binary(op, lhs, rhs) => {
                let (l, r) = (lhs.to_string(), rhs.to_string());
                let (dl, dr) = (lhs.diff(var), rhs.diff(var));
                match op {
                    Add => format!("({dl} + {dr})"),
                    Subtract => format!("({dl} - {dr})"),
                    // Product rule.
                    Multiply => format!("({l} * {dr} + {dl} * {r})"),
                    // Quotient rule.
                    Divide => format!("(({dl} * {r} - {l} * {dr}) / ({r} ^ 2))"),
                    Pow => format!("({r} * ({l} ^ ({r} - 1)) * {dl})"),
                }
            }
        }
    }
}
