use thiserror::Error;

use crate::expression::{EvalError, ParseError};

/// Reasons a submitted formula could not be judged
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnswerError {
    #[error("Invalid expression: {0}")]
    Parse(#[from] ParseError),
    #[error("Only integer constants are allowed (card values 1-13), found {0}")]
    NonIntegerConstant(f64),
    #[error("Invalid: {0}")]
    Eval(#[from] EvalError),
}

impl AnswerError {
    pub fn is_zero_division(&self) -> bool {
        matches!(self, AnswerError::Eval(EvalError::ZeroDivision))
    }
}
