use thiserror::Error;

/// Reasons a formula is rejected before it is ever evaluated
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Expression is empty")]
    Empty,
    #[error("Expression too long: {len} characters (max {max})")]
    TooLong { len: usize, max: usize },
    #[error("Unbalanced parentheses")]
    UnbalancedParentheses,
    #[error("Unexpected character '{found}' at position {position}")]
    UnexpectedCharacter { found: String, position: usize },
    #[error("Unsupported identifier '{0}'")]
    UnsupportedIdentifier(String),
    #[error("Unexpected token '{0}'")]
    UnexpectedToken(String),
    #[error("Unexpected end of expression")]
    UnexpectedEnd,
    #[error("Expression too complex: {count} nodes (max {max})")]
    TooManyNodes { count: usize, max: usize },
    #[error("Expression nested too deeply (max depth {max})")]
    TooDeep { max: usize },
}

/// Bounds violations raised while evaluating a parsed tree
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvalError {
    #[error("Expression too complex")]
    ComplexityExceeded,
    #[error("Result too large")]
    MagnitudeExceeded,
    #[error("Exponent must be an integer")]
    NonIntegerExponent,
    #[error("Exponent too large")]
    ExponentTooLarge,
    #[error("Power result too large")]
    PowerTooLarge,
    #[error("Division by zero")]
    ZeroDivision,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExpressionError {
    #[error("Invalid expression: {0}")]
    Parse(#[from] ParseError),
    #[error("Invalid expression: {0}")]
    Eval(#[from] EvalError),
}

impl ExpressionError {
    pub fn is_zero_division(&self) -> bool {
        matches!(self, ExpressionError::Eval(EvalError::ZeroDivision))
    }
}
