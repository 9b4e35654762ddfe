//! Puzzle records: card conversions, validation and corpus loading

mod cards;
mod corpus;
mod errors;
mod record;

pub use cards::{MAX_CARD_VALUE, MIN_CARD_VALUE, rank_to_value, value_to_rank};
pub use corpus::{load_corpus_path, load_corpus_str};
pub use errors::PuzzleError;
pub use record::{CARDS_PER_PUZZLE, Difficulty, Puzzle, RawCard, RawPuzzle, canonical_key};
