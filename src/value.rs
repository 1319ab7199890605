use crate::error::{Error, ParseError};
use num_complex::Complex64;
use std::{
    fmt::Debug,
    ops::{Add, Div, Mul, Sub},
};

/// The numeric type an expression tree is parameterized over. Every node of
/// a tree holds, and evaluates to, values of the same `Scalar` type.
pub trait Scalar:
    Copy
    + Debug
    + PartialEq
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
{
    /// The exact zero of this type. The parser uses it as the implicit left
    /// operand of a leading `+` or `-`.
    fn zero() -> Self;

    /// Lossy conversion from a real number.
    fn from_f64(val: f64) -> Self;

    /// Parse a numeric literal. The text always starts with a digit.
    fn parse_literal(text: &str) -> Result<Self, Error>;

    /// Arithmetic used when evaluating. These default to the operators, and
    /// integer types override them to wrap around on overflow.
    fn add(self, rhs: Self) -> Self {
        self + rhs
    }

    fn sub(self, rhs: Self) -> Self {
        self - rhs
    }

    fn mul(self, rhs: Self) -> Self {
        self * rhs
    }

    /// The divisor is never zero.
    fn div(self, rhs: Self) -> Self {
        self / rhs
    }

    fn pow(self, exponent: Self) -> Self;
    fn sin(self) -> Self;
    fn cos(self) -> Self;
    fn ln(self) -> Self;
    fn exp(self) -> Self;

    /// The canonical text of a constant of this type.
    fn format_constant(&self) -> String;

    /// Exact comparison with zero. No tolerance is applied.
    fn is_zero(&self) -> bool {
        *self == Self::zero()
    }
}

fn invalid_number(text: &str) -> Error {
    Error::Parse(ParseError::InvalidNumber(text.to_string()))
}

impl Scalar for f64 {
    fn zero() -> Self {
        0.
    }

    fn from_f64(val: f64) -> Self {
        val
    }

    fn parse_literal(text: &str) -> Result<Self, Error> {
        text.parse::<f64>().map_err(|_| invalid_number(text))
    }

    fn pow(self, exponent: Self) -> Self {
        f64::powf(self, exponent)
    }

    fn sin(self) -> Self {
        f64::sin(self)
    }

    fn cos(self) -> Self {
        f64::cos(self)
    }

    fn ln(self) -> Self {
        f64::ln(self)
    }

    fn exp(self) -> Self {
        f64::exp(self)
    }

    fn format_constant(&self) -> String {
        self.to_string()
    }
}

/// Integer trees. Arithmetic wraps around on overflow. The transcendental
/// functions are computed in `f64` and truncated toward zero.
impl Scalar for i64 {
    fn zero() -> Self {
        0
    }

    fn from_f64(val: f64) -> Self {
        val as i64
    }

    fn parse_literal(text: &str) -> Result<Self, Error> {
        match text.parse::<i64>() {
            Ok(val) => Ok(val),
            Err(_) => text
                .parse::<f64>()
                .map(|val| val as i64)
                .map_err(|_| invalid_number(text)),
        }
    }

    fn add(self, rhs: Self) -> Self {
        self.wrapping_add(rhs)
    }

    fn sub(self, rhs: Self) -> Self {
        self.wrapping_sub(rhs)
    }

    fn mul(self, rhs: Self) -> Self {
        self.wrapping_mul(rhs)
    }

    fn div(self, rhs: Self) -> Self {
        // Only `i64::MIN / -1` wraps.
        self.wrapping_div(rhs)
    }

    fn pow(self, exponent: Self) -> Self {
        match u32::try_from(exponent) {
            Ok(exponent) => self.wrapping_pow(exponent),
            // Negative exponents produce fractions.
            Err(_) => f64::powf(self as f64, exponent as f64) as i64,
        }
    }

    fn sin(self) -> Self {
        f64::sin(self as f64) as i64
    }

    fn cos(self) -> Self {
        f64::cos(self as f64) as i64
    }

    fn ln(self) -> Self {
        f64::ln(self as f64) as i64
    }

    fn exp(self) -> Self {
        f64::exp(self as f64) as i64
    }

    fn format_constant(&self) -> String {
        self.to_string()
    }
}

/// Complex trees. A literal with a trailing `i` is pure imaginary, any other
/// literal is pure real.
impl Scalar for Complex64 {
    fn zero() -> Self {
        Complex64::new(0., 0.)
    }

    fn from_f64(val: f64) -> Self {
        Complex64::new(val, 0.)
    }

    fn parse_literal(text: &str) -> Result<Self, Error> {
        match text.strip_suffix('i') {
            Some(imag) => imag
                .parse::<f64>()
                .map(|im| Complex64::new(0., im))
                .map_err(|_| invalid_number(text)),
            None => text
                .parse::<f64>()
                .map(|re| Complex64::new(re, 0.))
                .map_err(|_| invalid_number(text)),
        }
    }

    fn pow(self, exponent: Self) -> Self {
        self.powc(exponent)
    }

    fn sin(self) -> Self {
        Complex64::sin(self)
    }

    fn cos(self) -> Self {
        Complex64::cos(self)
    }

    fn ln(self) -> Self {
        Complex64::ln(self)
    }

    fn exp(self) -> Self {
        Complex64::exp(self)
    }

    fn format_constant(&self) -> String {
        // The parts are always joined with '+', even when the imaginary part
        // is negative.
        format!("({}+{}i)", self.re, self.im)
    }
}
