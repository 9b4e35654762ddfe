use std::collections::BTreeMap;
use std::fmt;

use log::debug;

use crate::expression::{EvalBudget, Expression, INTEGER_TOLERANCE, ParseLimits, parse};
use crate::game::errors::AnswerError;
use crate::puzzle::Puzzle;

/// Value every formula must reach
pub const TARGET: f64 = 24.0;

/// Distance from [`TARGET`] still accepted as a hit
pub const TARGET_TOLERANCE: f64 = 1e-9;

/// Inputs that claim the dealt cards cannot make the target
pub const NO_SOLUTION_TOKENS: [&str; 5] = ["no sol", "nosol", "no solution", "0", "-1"];

/// Outcome of judging one submission against one puzzle
#[derive(Debug, Clone, PartialEq)]
pub enum AnswerVerdict {
    /// The formula uses the dealt cards and evaluates to the target
    Correct,
    /// A no-solution claim on a puzzle that has none
    CorrectNoSolution,
    /// A no-solution claim on a puzzle with known solutions
    SolutionExists,
    /// Well-formed formula over the right cards that misses the target
    NotTarget(f64),
    /// The formula's literals are not the dealt values
    CardMismatch {
        expected: Vec<i64>,
        found: Vec<i64>,
        explanation: String,
    },
    Invalid(AnswerError),
}

impl AnswerVerdict {
    /// Whether this verdict ends the round as solved
    pub fn is_solved(&self) -> bool {
        matches!(self, AnswerVerdict::Correct | AnswerVerdict::CorrectNoSolution)
    }
}

impl fmt::Display for AnswerVerdict {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AnswerVerdict::Correct => write!(f, "Correct!"),
            AnswerVerdict::CorrectNoSolution => write!(f, "Correct: this puzzle has no solution."),
            AnswerVerdict::SolutionExists => write!(
                f,
                "A solution exists for this puzzle. Use 'help'/'help all' to see it."
            ),
            AnswerVerdict::NotTarget(value) => write!(f, "Not 24 (got {}).", value),
            AnswerVerdict::CardMismatch {
                expected,
                found,
                explanation,
            } => write!(
                f,
                "You must use exactly these four numbers once each. Expected: {:?}; Found: {:?} ({})",
                expected, found, explanation
            ),
            AnswerVerdict::Invalid(e) => write!(f, "{}", e),
        }
    }
}

/// Trimmed, case-insensitive match against [`NO_SOLUTION_TOKENS`]
pub fn is_no_solution_claim(input: &str) -> bool {
    let claim = input.trim().to_lowercase();
    NO_SOLUTION_TOKENS.contains(&claim.as_str())
}

/// Literal operands of a parsed formula as integers.
///
/// # Errors
///
/// Returns [`AnswerError::NonIntegerConstant`] for the first literal that is
/// not integer-like.
pub fn extract_constants(expr: &Expression) -> Result<Vec<i64>, AnswerError> {
    expr.constants()
        .into_iter()
        .map(|value| {
            let rounded = value.round();
            if (value - rounded).abs() < INTEGER_TOLERANCE {
                Ok(rounded as i64)
            } else {
                Err(AnswerError::NonIntegerConstant(value))
            }
        })
        .collect()
}

/// Describe how `found` differs from `expected` as multisets, e.g.
/// `"missing 8x1; extra 9x1"`.
pub fn explain_mismatch(expected: &[i64], found: &[i64]) -> String {
    let mut diff: BTreeMap<i64, i64> = BTreeMap::new();
    for &v in found {
        *diff.entry(v).or_default() += 1;
    }
    for &v in expected {
        *diff.entry(v).or_default() -= 1;
    }

    let missing: Vec<String> = diff
        .iter()
        .filter(|&(_, &d)| d < 0)
        .map(|(v, d)| format!("{}x{}", v, -d))
        .collect();
    let extra: Vec<String> = diff
        .iter()
        .filter(|&(_, &d)| d > 0)
        .map(|(v, d)| format!("{}x{}", v, d))
        .collect();

    let mut parts = Vec::new();
    if !missing.is_empty() {
        parts.push(format!("missing {}", missing.join(", ")));
    }
    if !extra.is_empty() {
        parts.push(format!("extra {}", extra.join(", ")));
    }
    if parts.is_empty() {
        "numbers mismatch".to_string()
    } else {
        parts.join("; ")
    }
}

/// Judge a player's input against a puzzle.
///
/// The card check runs before evaluation, so a formula over the wrong cards
/// is reported as a mismatch even when it would also fail in the sandbox.
pub fn check_answer(
    puzzle: &Puzzle,
    input: &str,
    limits: &ParseLimits,
    budget: &EvalBudget,
) -> AnswerVerdict {
    if is_no_solution_claim(input) {
        return if puzzle.has_solution() {
            AnswerVerdict::SolutionExists
        } else {
            AnswerVerdict::CorrectNoSolution
        };
    }

    let expr = match parse(input, limits) {
        Ok(expr) => expr,
        Err(e) => {
            debug!("Rejected answer '{}': {}", input, e);
            return AnswerVerdict::Invalid(e.into());
        }
    };

    let mut found = match extract_constants(&expr) {
        Ok(found) => found,
        Err(e) => return AnswerVerdict::Invalid(e),
    };
    found.sort_unstable();

    let mut expected: Vec<i64> = puzzle.values().iter().map(|&v| i64::from(v)).collect();
    expected.sort_unstable();

    if found != expected {
        let explanation = explain_mismatch(&expected, &found);
        debug!("Card mismatch on puzzle {}: {}", puzzle.id(), explanation);
        return AnswerVerdict::CardMismatch {
            expected,
            found,
            explanation,
        };
    }

    match expr.evaluate(budget) {
        Ok(value) if (value - TARGET).abs() < TARGET_TOLERANCE => AnswerVerdict::Correct,
        Ok(value) => AnswerVerdict::NotTarget(value),
        Err(e) => AnswerVerdict::Invalid(e.into()),
    }
}
