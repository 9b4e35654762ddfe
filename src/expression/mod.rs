//! Expression module: normalization, parsing and bounded evaluation of
//! player-submitted arithmetic

mod ast;
mod constants;
mod display;
mod errors;
mod eval;
mod lexer;
mod normalize;
mod parser;

pub use ast::{BinaryOp, Expression, UnaryOp};
pub use errors::{EvalError, ExpressionError, ParseError};
pub use eval::{EvalBudget, INTEGER_TOLERANCE};
pub use normalize::{normalize, substitute_ranks};
pub use parser::{ParseLimits, parse};

/// Parse and evaluate in one step with the given limits.
///
/// # Errors
///
/// Returns the parse failure or the sandbox failure, whichever happens first.
pub fn evaluate_str(
    input: &str,
    limits: &ParseLimits,
    budget: &EvalBudget,
) -> Result<f64, ExpressionError> {
    let expr = parse(input, limits)?;
    Ok(expr.evaluate(budget)?)
}
