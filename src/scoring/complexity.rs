use log::debug;

use crate::expression::{BinaryOp, Expression, ParseLimits, normalize, parse};

/// Score given to formulas that do not parse
pub const UNPARSEABLE_SCORE: u32 = 999;

/// Scores at or below this are simple
pub const SIMPLE_THRESHOLD: u32 = 11;

/// Scores at or above this are hard
pub const HARD_THRESHOLD: u32 = 18;

/// Bucket a single complexity score falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComplexityClass {
    Simple,
    Intermediate,
    Hard,
}

impl ComplexityClass {
    pub fn of(score: u32) -> Self {
        if score <= SIMPLE_THRESHOLD {
            ComplexityClass::Simple
        } else if score >= HARD_THRESHOLD {
            ComplexityClass::Hard
        } else {
            ComplexityClass::Intermediate
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct OperatorCounts {
    additive: u32,
    divide: u32,
    power: u32,
}

impl OperatorCounts {
    fn tally(expr: &Expression) -> Self {
        let mut counts = Self::default();
        counts.visit(expr);
        counts
    }

    fn visit(&mut self, expr: &Expression) {
        match expr {
            Expression::Number(_) => {}
            Expression::Unary(_, operand) => self.visit(operand),
            Expression::Binary(op, l, r) => {
                match op {
                    BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul => self.additive += 1,
                    BinaryOp::Div => self.divide += 1,
                    BinaryOp::Pow => self.power += 1,
                }
                self.visit(l);
                self.visit(r);
            }
        }
    }
}

/// Difficulty score of a known solution formula.
///
/// Pure function of the text. Formulas that fail to parse score
/// [`UNPARSEABLE_SCORE`] instead of raising.
pub fn score(formula: &str) -> u32 {
    let expr = match parse(formula, &ParseLimits::default()) {
        Ok(expr) => expr,
        Err(e) => {
            debug!("Scoring '{}' as unparseable: {}", formula, e);
            return UNPARSEABLE_SCORE;
        }
    };

    let counts = OperatorCounts::tally(&expr);
    let depth = expr.depth() as u32;
    let length = normalize(formula).chars().count() as u32;

    let mut total = counts.additive + 2 * counts.divide + 3 * counts.power + 2 * depth + length / 6;
    if counts.divide >= 2 {
        total += 2;
    }
    if counts.power >= 1 && (counts.divide >= 1 || depth >= 4) {
        total += 2;
    }

    debug!("Scored '{}' as {} ({:?}, depth {})", formula, total, counts, depth);
    total
}

/// Lowest score over a solution set, `None` when the set is empty
pub fn min_score<S: AsRef<str>>(solutions: &[S]) -> Option<u32> {
    solutions.iter().map(|s| score(s.as_ref())).min()
}

/// Highest score over a solution set, `None` when the set is empty
pub fn max_score<S: AsRef<str>>(solutions: &[S]) -> Option<u32> {
    solutions.iter().map(|s| score(s.as_ref())).max()
}

/// At least one solution in the set is simple
pub fn has_simple_solution<S: AsRef<str>>(solutions: &[S]) -> bool {
    min_score(solutions).is_some_and(|s| ComplexityClass::of(s) == ComplexityClass::Simple)
}

/// At least one solution in the set is hard
pub fn has_hard_solution<S: AsRef<str>>(solutions: &[S]) -> bool {
    max_score(solutions).is_some_and(|s| ComplexityClass::of(s) == ComplexityClass::Hard)
}
