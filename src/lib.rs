//! game24 - core of the 24-point card game
//!
//! This library parses and safely evaluates player-submitted arithmetic,
//! scores the difficulty of known solution formulas, and serves puzzles from
//! a corpus by difficulty level with per-session recency and no-solution
//! quotas.

pub mod expression;
pub mod game;
pub mod puzzle;
pub mod scoring;
pub mod selector;

// Re-export the main public API
pub use expression::{
    EvalBudget, EvalError, Expression, ExpressionError, ParseError, ParseLimits, evaluate_str,
    parse,
};
pub use game::{AnswerVerdict, check_answer};
pub use puzzle::{Puzzle, PuzzleError, load_corpus_path, load_corpus_str};
pub use scoring::{ComplexityClass, score};
pub use selector::{Level, PuzzleIndex, PuzzleSelector, SelectorConfig, SessionStore};

/// Evaluate a formula under the default parse limits and sandbox budget
///
/// Card ranks (`A`, `T`, `J`, `Q`, `K`) stand for their values and `^` is
/// exponentiation.
///
/// # Errors
///
/// Returns [`ExpressionError::Parse`] if the formula is malformed or exceeds
/// the parse limits, and [`ExpressionError::Eval`] if evaluation trips a
/// sandbox guard or divides by zero.
///
/// # Examples
///
/// ```
/// use game24::evaluate;
///
/// match evaluate("(A+2+3)*4") {
///     Ok(value) => assert_eq!(value, 24.0),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
pub fn evaluate(formula: &str) -> Result<f64, ExpressionError> {
    evaluate_str(formula, &ParseLimits::default(), &EvalBudget::default())
}
