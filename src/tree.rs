use crate::{
    error::{Error, ParseError},
    value::Scalar,
};
use std::{ops, rc::Rc};

/// Represents an analytic function with one input.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Sin,
    Cos,
    Ln,
    Exp,
}

/// Represents an arithmetic operation with two inputs.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Pow,
}

impl UnaryOp {
    /// The function name used when printing and parsing.
    pub fn name(&self) -> &'static str {
        use UnaryOp::*;
        match self {
            Sin => "sin",
            Cos => "cos",
            Ln => "ln",
            Exp => "exp",
        }
    }
}

impl BinaryOp {
    /// The infix operator used when printing and parsing.
    pub fn symbol(&self) -> char {
        use BinaryOp::*;
        match self {
            Add => '+',
            Subtract => '-',
            Multiply => '*',
            Divide => '/',
            Pow => '^',
        }
    }
}

/// Represents a node in an expression tree. A node exclusively references its
/// inputs through `Expression` handles, so subtrees can be shared between
/// trees without copying.
#[derive(Debug, Clone, PartialEq)]
pub enum Node<T> {
    Constant(T),
    Variable(String),
    Unary(UnaryOp, Expression<T>),
    Binary(BinaryOp, Expression<T>, Expression<T>),
}

use Node::*;

/// A handle to an immutable expression tree.
///
/// Cloning an expression is a shallow operation: the clone refers to the same
/// nodes as the original. Nodes are never mutated after they are created, and
/// every operator that combines expressions builds a new root on top of the
/// existing trees. The compound assignment operators (`+=`, `^=` etc.) rebind
/// the handle to the new tree, and any other handle that referred to the old
/// tree keeps seeing the old tree. Trees are built strictly bottom-up, so they
/// can't contain cycles.
///
/// Equality is structural, i.e. two separately parsed copies of the same
/// text compare equal.
#[derive(Debug, Clone, PartialEq)]
pub struct Expression<T> {
    root: Rc<Node<T>>,
}

/// Check that `name` can be used as the name of a variable: it must be
/// non-empty, must not start with a digit, and can only contain alphanumeric
/// characters and underscores.
pub(crate) fn is_valid_name(name: &str) -> bool {
    match name.chars().next() {
        Some(first) if !first.is_ascii_digit() => {
            name.chars().all(|c| c.is_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

impl<T: Scalar> Expression<T> {
    /// Create an expression representing a constant value.
    pub fn constant(value: T) -> Expression<T> {
        Expression::from_node(Constant(value))
    }

    /// Create an expression representing the variable `name`.
    pub fn variable(name: &str) -> Result<Expression<T>, Error> {
        if is_valid_name(name) {
            Ok(Expression::from_node(Variable(name.to_string())))
        } else {
            Err(Error::Parse(ParseError::InvalidName(name.to_string())))
        }
    }

    pub(crate) fn from_node(node: Node<T>) -> Expression<T> {
        Expression {
            root: Rc::new(node),
        }
    }

    /// The root node of this tree.
    pub fn node(&self) -> &Node<T> {
        &self.root
    }

    /// Check if both handles refer to the same tree in memory, as opposed to
    /// `==` which compares the structure of the trees.
    pub fn ptr_eq(&self, other: &Expression<T>) -> bool {
        Rc::ptr_eq(&self.root, &other.root)
    }

    /// The number of nodes visited by a full walk of this tree. Shared
    /// subtrees are counted once for every time they are referenced.
    pub fn len(&self) -> usize {
        match self.node() {
            Constant(_) | Variable(_) => 1,
            Unary(_, input) => 1 + input.len(),
            Binary(_, lhs, rhs) => 1 + lhs.len() + rhs.len(),
        }
    }

    /// Get a unique list of all variables in this tree. The variables will
    /// appear in the same order as they first appear in the tree, reading
    /// from left to right.
    pub fn variables(&self) -> Vec<String> {
        fn collect<T: Scalar>(node: &Node<T>, dst: &mut Vec<String>) {
            match node {
                Constant(_) => {}
                Variable(name) => {
                    if !dst.contains(name) {
                        dst.push(name.clone());
                    }
                }
                Unary(_, input) => collect(input.node(), dst),
                Binary(_, lhs, rhs) => {
                    collect(lhs.node(), dst);
                    collect(rhs.node(), dst);
                }
            }
        }
        let mut names = Vec::new();
        collect(self.node(), &mut names);
        return names;
    }

    pub(crate) fn unary_op(self, op: UnaryOp) -> Expression<T> {
        Expression::from_node(Unary(op, self))
    }

    pub(crate) fn binary_op(self, other: Expression<T>, op: BinaryOp) -> Expression<T> {
        Expression::from_node(Binary(op, self, other))
    }

    pub fn sin(self) -> Expression<T> {
        self.unary_op(UnaryOp::Sin)
    }

    pub fn cos(self) -> Expression<T> {
        self.unary_op(UnaryOp::Cos)
    }

    pub fn ln(self) -> Expression<T> {
        self.unary_op(UnaryOp::Ln)
    }

    pub fn exp(self) -> Expression<T> {
        self.unary_op(UnaryOp::Exp)
    }

    pub fn pow(self, exponent: Expression<T>) -> Expression<T> {
        self.binary_op(exponent, BinaryOp::Pow)
    }
}

macro_rules! unary_func {
    ($name:ident, $op:ident) => {
        pub fn $name<T: Scalar>(expr: Expression<T>) -> Expression<T> {
            expr.unary_op(UnaryOp::$op)
        }
    };
}

unary_func!(sin, Sin);
unary_func!(cos, Cos);
unary_func!(ln, Ln);
unary_func!(exp, Exp);

macro_rules! binary_func {
    ($name:ident, $op:ident) => {
        pub fn $name<T: Scalar>(lhs: Expression<T>, rhs: Expression<T>) -> Expression<T> {
            lhs.binary_op(rhs, BinaryOp::$op)
        }
    };
}

binary_func!(add, Add);
binary_func!(sub, Subtract);
binary_func!(mul, Multiply);
binary_func!(div, Divide);
binary_func!(pow, Pow);

/// Implements an operator trait and its compound assignment counterpart for
/// owned and borrowed expressions.
macro_rules! binary_operator {
    ($trait:ident, $method:ident, $assign_trait:ident, $assign_method:ident, $op:ident) => {
        impl<T: Scalar> ops::$trait for Expression<T> {
            type Output = Expression<T>;

            fn $method(self, rhs: Expression<T>) -> Expression<T> {
                self.binary_op(rhs, BinaryOp::$op)
            }
        }

        impl<T: Scalar> ops::$trait<&Expression<T>> for &Expression<T> {
            type Output = Expression<T>;

            fn $method(self, rhs: &Expression<T>) -> Expression<T> {
                self.clone().binary_op(rhs.clone(), BinaryOp::$op)
            }
        }

        impl<T: Scalar> ops::$assign_trait for Expression<T> {
            fn $assign_method(&mut self, rhs: Expression<T>) {
                *self = self.clone().binary_op(rhs, BinaryOp::$op);
            }
        }

        impl<T: Scalar> ops::$assign_trait<&Expression<T>> for Expression<T> {
            fn $assign_method(&mut self, rhs: &Expression<T>) {
                *self = self.clone().binary_op(rhs.clone(), BinaryOp::$op);
            }
        }
    };
}

binary_operator!(Add, add, AddAssign, add_assign, Add);
binary_operator!(Sub, sub, SubAssign, sub_assign, Subtract);
binary_operator!(Mul, mul, MulAssign, mul_assign, Multiply);
binary_operator!(Div, div, DivAssign, div_assign, Divide);
// `^` is exponentiation, not xor.
binary_operator!(BitXor, bitxor, BitXorAssign, bitxor_assign, Pow);

/// Negation is subtraction from zero, the same tree the parser produces for a
/// leading minus sign.
impl<T: Scalar> ops::Neg for Expression<T> {
    type Output = Expression<T>;

    fn neg(self) -> Expression<T> {
        Expression::constant(T::zero()) - self
    }
}

impl<T: Scalar> From<T> for Expression<T> {
    fn from(value: T) -> Self {
        Expression::constant(value)
    }
}
