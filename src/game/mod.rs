//! Round play: judging answers and summarizing a session

mod answer;
mod command;
mod errors;
mod stats;

pub use answer::{
    AnswerVerdict, NO_SOLUTION_TOKENS, TARGET, TARGET_TOLERANCE, check_answer, explain_mismatch,
    extract_constants, is_no_solution_claim,
};
pub use command::PlayerCommand;
pub use errors::AnswerError;
pub use stats::{RoundRecord, RoundStatus, SessionStats, format_duration};
