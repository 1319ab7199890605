/// Construct an expression from a prefix (lisp-like) form without going
/// through the text parser. The result is a `Result<Expression<T>, Error>`.
///
/// ```
/// use differentiator::{Expression, defexpr};
///
/// let tree: Expression<f64> = defexpr!(+ (pow x 2) (sin y)).unwrap();
/// assert_eq!(tree.to_string(), "((x ^ 2) + sin(y))");
/// ```
#[macro_export]
macro_rules! defexpr {
    () => {}; // empty;
    (($($a:tt)*)) => { // Unwrap redundant parens.
        $crate::defexpr!($($a)*)
    };
    ($a:block) => { // Block expressions.
        $a
    };
    // Constants.
    (const $tt:expr) => {{
        let out: Result<_, $crate::Error> = Ok($crate::Expression::constant({$tt}));
        out
    }};
    // Operators.
    (- $a:tt $b:tt) => {
        $crate::defexpr!($a).and_then(|a| $crate::defexpr!($b).map(|b| $crate::sub(a, b)))
    };
    (- $a:tt) => {
        $crate::defexpr!($a).map(|a| -a)
    };
    (+ $a:tt $b:tt) => {
        $crate::defexpr!($a).and_then(|a| $crate::defexpr!($b).map(|b| $crate::add(a, b)))
    };
    (* $a:tt $b:tt) => {
        $crate::defexpr!($a).and_then(|a| $crate::defexpr!($b).map(|b| $crate::mul(a, b)))
    };
    (/ $a:tt $b:tt) => {
        $crate::defexpr!($a).and_then(|a| $crate::defexpr!($b).map(|b| $crate::div(a, b)))
    };
    // Unary ops with functions names.
    ($unary_op:ident $a:tt) => {
        $crate::defexpr!($a).map($crate::$unary_op)
    };
    // Binary ops with function names.
    ($binary_op:ident $a:tt $b:tt) => {
        $crate::defexpr!($a)
            .and_then(|a| $crate::defexpr!($b).map(|b| $crate::$binary_op(a, b)))
    };
    // Constants.
    ($a:literal) => {{
        let out: Result<_, $crate::Error> =
            Ok($crate::Expression::constant($crate::Scalar::from_f64($a as f64)));
        out
    }};
    // Variables.
    ($a:ident) => {
        $crate::Expression::variable(stringify!($a))
    };
}

/// Assert that two floating point numbers differ by at most `eps`. The
/// optional last argument is printed along with the failure, to identify the
/// inputs that produced the numbers.
#[macro_export]
macro_rules! assert_float_eq {
    ($expected:expr, $actual:expr, $eps:expr, $context:expr) => {{
        let (expected, actual, eps): (f64, f64, f64) = ($expected, $actual, $eps);
        let error = f64::abs(expected - actual);
        assert!(
            error <= eps,
            "Expected {expected}, found {actual}. The error {error:e} exceeds {eps:e} for {:?}",
            $context
        );
    }};
    ($expected:expr, $actual:expr, $eps:expr) => {
        $crate::assert_float_eq!($expected, $actual, $eps, ())
    };
}
