use thiserror::Error;

/// Reasons an expression text can fail to parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Parentheses don't balance, or a group / function call is not closed
    /// where it should be.
    #[error("parenthesis mismatch")]
    MismatchedParentheses,
    /// An operand, or the whole input, is empty.
    #[error("empty expression")]
    EmptyExpression,
    /// An atom that starts with a digit is not a valid numeric literal.
    #[error("invalid number \"{0}\"")]
    InvalidNumber(String),
    /// Variable names must be non-empty, start with a non-digit, and only
    /// contain alphanumeric characters or underscores.
    #[error("invalid variable name \"{0}\"")]
    InvalidName(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// A variable was not assigned a value before evaluating.
    #[error("the variable \"{0}\" is undefined")]
    UndefinedVariable(String),
    /// The divisor of a division evaluated to exactly zero.
    #[error("division by zero")]
    DivisionByZero,
    /// A `name=value` token could not be split into a name and a value.
    #[error("invalid assignment \"{0}\", expected <name>=<value>")]
    InvalidAssignment(String),
}

impl Error {
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Error::Parse(_))
    }
}
