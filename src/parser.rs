use crate::{
    error::{Error, ParseError},
    tree::{
        BinaryOp::{self, *},
        Expression, Node,
        UnaryOp::{self, *},
    },
    value::Scalar,
};
use log::trace;
use std::str::FromStr;

/// Function call prefixes recognized in atoms, including the opening paren.
const FUNCTIONS: [(&str, UnaryOp); 4] = [("sin(", Sin), ("cos(", Cos), ("exp(", Exp), ("ln(", Ln)];

/// Operator levels in the order they are split, lowest precedence first.
const LEVELS: [&[(char, BinaryOp)]; 3] = [
    &[('+', Add), ('-', Subtract)],
    &[('*', Multiply), ('/', Divide)],
    &[('^', Pow)],
];

/**
Parse `text` into an expression tree.

Whitespace is ignored. There is no tokenizer: the text is split at the first
operator that is not enclosed in parentheses, trying `+` and `-` first, then
`*` and `/`, then `^`. The operand on either side is then parsed recursively.
Splitting at the first occurrence means chains of operators at the same level
group to the right, i.e. `a - b + c` is parsed as `a - (b + c)`.

A leading `+` or `-` is treated as having zero on its left. Text that doesn't
contain any top level operator is an atom, which can be a parenthesized
expression, one of the functions `sin`, `cos`, `exp`, `ln` applied to a
parenthesized expression, a numeric literal starting with a digit, or a
variable name. A parenthesized expression `(e)` produces the tree of
`(e - e) + e`, which has the same value as `e`.

Parsing recurses once for every operator and every group, so text with a very
long chain of operators can overflow the stack.
*/
pub fn parse<T: Scalar>(text: &str) -> Result<Expression<T>, Error> {
    let text: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    parse_expr(&text)
}

impl<T: Scalar> FromStr for Expression<T> {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

/// Find the first occurrence of any of `ops` outside parentheses. Returns the
/// byte index of the operator. The parentheses scanned before the operator is
/// found, or the whole text if no operator is found, must be balanced.
fn find_top_level(text: &str, ops: &[(char, BinaryOp)]) -> Result<Option<(usize, BinaryOp)>, ParseError> {
    let mut depth = 0usize;
    for (i, c) in text.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.checked_sub(1).ok_or(ParseError::MismatchedParentheses)?,
            _ if depth == 0 => {
                if let Some((_, op)) = ops.iter().find(|(sym, _)| *sym == c) {
                    return Ok(Some((i, *op)));
                }
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(ParseError::MismatchedParentheses);
    }
    Ok(None)
}

fn parse_expr<T: Scalar>(text: &str) -> Result<Expression<T>, Error> {
    if text.is_empty() {
        return Err(ParseError::EmptyExpression.into());
    }
    for (level, ops) in LEVELS.iter().enumerate() {
        if let Some((i, op)) = find_top_level(text, ops)? {
            trace!("Splitting {text:?} at {:?} ({i})", op.symbol());
            let (left, right) = (&text[..i], &text[(i + 1)..]);
            let lhs = if level == 0 && left.is_empty() {
                // Unary plus or minus.
                Expression::constant(T::zero())
            } else {
                parse_expr(left)?
            };
            let rhs = parse_expr(right)?;
            return Ok(Expression::from_node(Node::Binary(op, lhs, rhs)));
        }
    }
    parse_atom(text)
}

fn parse_atom<T: Scalar>(text: &str) -> Result<Expression<T>, Error> {
    if let Some(inner) = text.strip_prefix('(') {
        let inner = inner
            .strip_suffix(')')
            .ok_or(ParseError::MismatchedParentheses)?;
        trace!("Parsing group {inner:?}");
        // A group is rewritten as `(e - e) + e`, with all three operands
        // referring to the same tree.
        let group = parse_expr(inner)?;
        return Ok((&group - &group) + group);
    }
    for (prefix, op) in FUNCTIONS {
        if let Some(inner) = text.strip_prefix(prefix) {
            let inner = inner
                .strip_suffix(')')
                .ok_or(ParseError::MismatchedParentheses)?;
            trace!("Parsing {} of {inner:?}", op.name());
            return Ok(parse_expr(inner)?.unary_op(op));
        }
    }
    match text.chars().next() {
        Some(c) if c.is_ascii_digit() => Ok(Expression::constant(T::parse_literal(text)?)),
        _ => Expression::variable(text),
    }
}
