use crate::{
    error::Error,
    tree::{
        BinaryOp::{self, *},
        Expression,
        Node::{self, *},
        UnaryOp::{self, *},
        is_valid_name,
    },
    value::Scalar,
};
use log::debug;
use std::collections::HashMap;

/// Values assigned to the variables of an expression, by name.
pub type Context<T> = HashMap<String, T>;

impl UnaryOp {
    /// Compute the result of the operation on `value`.
    pub fn apply<T: Scalar>(&self, value: T) -> T {
        match self {
            Sin => value.sin(),
            Cos => value.cos(),
            Ln => value.ln(),
            Exp => value.exp(),
        }
    }
}

impl BinaryOp {
    /// Compute the result of the operation on `lhs` and `rhs`. Division by a
    /// divisor exactly equal to zero is an error.
    pub fn apply<T: Scalar>(&self, lhs: T, rhs: T) -> Result<T, Error> {
        Ok(match self {
            Add => Scalar::add(lhs, rhs),
            Subtract => Scalar::sub(lhs, rhs),
            Multiply => Scalar::mul(lhs, rhs),
            Divide => {
                if rhs.is_zero() {
                    return Err(Error::DivisionByZero);
                }
                Scalar::div(lhs, rhs)
            }
            Pow => Scalar::pow(lhs, rhs),
        })
    }
}

impl<T: Scalar> Node<T> {
    /// Evaluate the subtree rooted at this node. Every input is evaluated
    /// every time it is visited, shared subtrees included.
    pub fn eval(&self, context: &Context<T>) -> Result<T, Error> {
        match self {
            Constant(value) => Ok(*value),
            Variable(name) => match context.get(name) {
                Some(value) => Ok(*value),
                None => {
                    debug!("Variable {name} is not assigned a value");
                    Err(Error::UndefinedVariable(name.clone()))
                }
            },
            Unary(op, input) => Ok(op.apply(input.eval(context)?)),
            Binary(Divide, lhs, rhs) => {
                // The divisor is checked before the dividend is evaluated.
                let divisor = rhs.eval(context)?;
                if divisor.is_zero() {
                    debug!("Divisor {rhs} evaluated to zero");
                    return Err(Error::DivisionByZero);
                }
                Divide.apply(lhs.eval(context)?, divisor)
            }
            Binary(op, lhs, rhs) => {
                let lhs = lhs.eval(context)?;
                let rhs = rhs.eval(context)?;
                op.apply(lhs, rhs)
            }
        }
    }
}

impl<T: Scalar> Expression<T> {
    /// Evaluate the expression with the variable values from `context`. The
    /// result is an error if a variable is missing from the context, or if
    /// a divisor evaluates to exactly zero.
    pub fn eval(&self, context: &Context<T>) -> Result<T, Error> {
        self.node().eval(context)
    }
}

/// Build a context from (name, value) pairs. Later pairs overwrite earlier
/// ones with the same name.
pub fn context_from_pairs<T, N>(pairs: impl IntoIterator<Item = (N, T)>) -> Context<T>
where
    N: Into<String>,
{
    pairs
        .into_iter()
        .map(|(name, value)| (name.into(), value))
        .collect()
}

/// Parse a `name=value` token into a variable name and its value. The value
/// may carry a leading sign.
pub fn parse_assignment<T: Scalar>(token: &str) -> Result<(String, T), Error> {
    let invalid = || Error::InvalidAssignment(token.to_string());
    let (name, value) = token.split_once('=').ok_or_else(invalid)?;
    let (name, value) = (name.trim(), value.trim());
    if !is_valid_name(name) {
        return Err(invalid());
    }
    let (negative, digits) = match value.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, value.strip_prefix('+').unwrap_or(value)),
    };
    if digits.is_empty() {
        return Err(invalid());
    }
    let value = T::parse_literal(digits)?;
    Ok((
        name.to_string(),
        if negative {
            Scalar::sub(T::zero(), value)
        } else {
            value
        },
    ))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        defexpr,
        error::ParseError,
        parse,
        test::util::{check_expr_eval, ctx},
    };
    use num_complex::Complex64;

    #[test]
    fn t_constant() {
        let x: Expression<f64> = defexpr!(const std::f64::consts::PI).unwrap();
        assert_eq!(x.eval(&Context::new()), Ok(std::f64::consts::PI));
    }

    #[test]
    fn t_arithmetic() {
        let tree: Expression<f64> = parse("x + y").unwrap();
        assert_eq!(tree.eval(&ctx(&[("x", 1.), ("y", 2.)])), Ok(3.));
        let tree: Expression<f64> = parse("x - y").unwrap();
        assert_eq!(tree.eval(&ctx(&[("x", 2.), ("y", 1.)])), Ok(1.));
        let tree: Expression<f64> = parse("x * y").unwrap();
        assert_eq!(tree.eval(&ctx(&[("x", 2.), ("y", 3.)])), Ok(6.));
        let tree: Expression<f64> = parse("x / y").unwrap();
        assert_eq!(tree.eval(&ctx(&[("x", 2.), ("y", 1.)])), Ok(2.));
        let tree: Expression<f64> = parse("x ^ y").unwrap();
        assert_eq!(tree.eval(&ctx(&[("x", 2.), ("y", 1.)])), Ok(2.));
    }

    #[test]
    fn t_constant_arithmetic() {
        let empty = Context::new();
        assert_eq!(parse::<f64>("10 / 2").unwrap().eval(&empty), Ok(5.));
        assert_eq!(parse::<f64>("10 ^ 2").unwrap().eval(&empty), Ok(100.));
        assert_eq!(parse::<i64>("1 + 2").unwrap().eval(&Context::new()), Ok(3));
        assert_eq!(parse::<i64>("10 - 2").unwrap().eval(&Context::new()), Ok(8));
        assert_eq!(parse::<i64>("10 * 2").unwrap().eval(&Context::new()), Ok(20));
        assert_eq!(parse::<i64>("10 / 2").unwrap().eval(&Context::new()), Ok(5));
        assert_eq!(parse::<i64>("10 ^ 2").unwrap().eval(&Context::new()), Ok(100));
        assert_eq!(parse::<i64>("123").unwrap().eval(&Context::new()), Ok(123));
    }

    #[test]
    fn t_functions() {
        let at2 = ctx(&[("x", 2.)]);
        assert_eq!(parse::<f64>("sin(x)").unwrap().eval(&at2), Ok(f64::sin(2.)));
        assert_eq!(parse::<f64>("cos(x)").unwrap().eval(&at2), Ok(f64::cos(2.)));
        assert_eq!(parse::<f64>("ln(x)").unwrap().eval(&at2), Ok(f64::ln(2.)));
        assert_eq!(parse::<f64>("exp(x)").unwrap().eval(&at2), Ok(f64::exp(2.)));
        assert_eq!(
            parse::<f64>("exp(2)").unwrap().eval(&Context::new()),
            Ok(f64::exp(2.))
        );
    }

    #[test]
    fn t_unary_minus() {
        let tree: Expression<f64> = parse("-x").unwrap();
        assert_eq!(tree.eval(&ctx(&[("x", 4.)])), Ok(-4.));
        let tree: Expression<f64> = parse("+x").unwrap();
        assert_eq!(tree.eval(&ctx(&[("x", 4.)])), Ok(4.));
    }

    #[test]
    fn t_division_by_zero() {
        let tree: Expression<f64> = parse("x / y").unwrap();
        assert_eq!(
            tree.eval(&ctx(&[("x", 1.), ("y", 0.)])),
            Err(Error::DivisionByZero)
        );
        // Zero check happens before the dividend is looked at.
        assert_eq!(tree.eval(&ctx(&[("y", 0.)])), Err(Error::DivisionByZero));
        // Only exact zero is rejected.
        assert_eq!(tree.eval(&ctx(&[("x", 1.), ("y", 0.25)])), Ok(4.));
        let tree: Expression<i64> = parse("10 / (2 - 2)").unwrap();
        assert_eq!(tree.eval(&Context::new()), Err(Error::DivisionByZero));
    }

    #[test]
    fn t_integer_overflow() {
        let empty = Context::new();
        assert_eq!(
            parse::<i64>("9223372036854775807 + 1").unwrap().eval(&empty),
            Ok(i64::MIN)
        );
        assert_eq!(
            parse::<i64>("4611686018427387904 * 2").unwrap().eval(&empty),
            Ok(i64::MIN)
        );
        let tree: Expression<i64> = parse("x / y").unwrap();
        assert_eq!(
            tree.eval(&ctx(&[("x", i64::MIN), ("y", -1)])),
            Ok(i64::MIN)
        );
        assert_eq!(
            parse_assignment::<i64>("n=-9223372036854775807"),
            Ok(("n".to_string(), -i64::MAX))
        );
    }

    #[test]
    fn t_undefined_variable() {
        let tree: Expression<f64> = parse("x").unwrap();
        assert_eq!(
            tree.eval(&Context::new()),
            Err(Error::UndefinedVariable("x".to_string()))
        );
        let tree: Expression<f64> = parse("a + b").unwrap();
        assert_eq!(
            tree.eval(&ctx(&[("a", 1.)])),
            Err(Error::UndefinedVariable("b".to_string()))
        );
    }

    #[test]
    fn t_complex() {
        let tree: Expression<Complex64> = parse("z * 1i").unwrap();
        let context = context_from_pairs([("z", Complex64::new(0., 1.))]);
        assert_eq!(tree.eval(&context), Ok(Complex64::new(-1., 0.)));
        let tree: Expression<Complex64> = parse("z / 0i").unwrap();
        assert_eq!(tree.eval(&context), Err(Error::DivisionByZero));
    }

    #[test]
    fn t_trig_identity() {
        check_expr_eval(
            parse("sin(x) ^ 2 + cos(x) ^ 2").unwrap(),
            |_| 1.,
            &[("x", -10., 10.)],
            100,
            1e-14,
        );
    }

    #[test]
    fn t_tree_1() {
        check_expr_eval(
            parse("ln(sin(x) + 2) ^ 3 / (cos(x) + 2)").unwrap(),
            |vars| {
                let x = vars["x"];
                f64::powf(f64::ln(f64::sin(x) + 2.), 3.) / (f64::cos(x) + 2.)
            },
            &[("x", -2.5, 2.5)],
            100,
            0.,
        );
    }

    #[test]
    fn t_tree_2() {
        check_expr_eval(
            parse("exp(x * y) - (x / (y ^ 2 + 1)) * sin(x + y)").unwrap(),
            |vars| {
                let (x, y) = (vars["x"], vars["y"]);
                f64::exp(x * y) - (x / (f64::powf(y, 2.) + 1.)) * f64::sin(x + y)
            },
            &[("x", -2., 2.), ("y", -3., 3.)],
            20,
            1e-12,
        );
    }

    #[test]
    fn t_assignments() {
        assert_eq!(parse_assignment::<f64>("x=1.5"), Ok(("x".to_string(), 1.5)));
        assert_eq!(parse_assignment::<f64>("y=-2"), Ok(("y".to_string(), -2.)));
        assert_eq!(parse_assignment::<i64>(" n = 7 "), Ok(("n".to_string(), 7)));
        assert_eq!(
            parse_assignment::<f64>("x"),
            Err(Error::InvalidAssignment("x".to_string()))
        );
        assert_eq!(
            parse_assignment::<f64>("=1"),
            Err(Error::InvalidAssignment("=1".to_string()))
        );
        assert_eq!(
            parse_assignment::<f64>("x="),
            Err(Error::InvalidAssignment("x=".to_string()))
        );
        assert_eq!(
            parse_assignment::<f64>("x=abc"),
            Err(Error::Parse(ParseError::InvalidNumber("abc".to_string())))
        );
    }
}
