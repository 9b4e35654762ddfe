//! Deterministic difficulty scoring of known solution formulas

mod complexity;

pub use complexity::{
    ComplexityClass, HARD_THRESHOLD, SIMPLE_THRESHOLD, UNPARSEABLE_SCORE, has_hard_solution,
    has_simple_solution, max_score, min_score, score,
};
