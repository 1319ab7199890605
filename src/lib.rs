pub mod derivative;
pub mod error;
pub mod eval;
pub mod parser;
pub mod tree;
pub mod value;

mod io;
mod macros;


pub use derivative::diff;
pub use error::{Error, ParseError};
pub use eval::{Context, context_from_pairs, parse_assignment};
pub use num_complex::Complex64;
pub use parser::parse;
pub use tree::{
    BinaryOp, Expression, Node, UnaryOp, add, cos, div, exp, ln, mul, pow, sin, sub,
};
pub use value::Scalar;
