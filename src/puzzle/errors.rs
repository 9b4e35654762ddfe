use thiserror::Error;

/// Errors raised while validating puzzle records and loading a corpus
#[derive(Error, Debug)]
pub enum PuzzleError {
    #[error("Unrecognized rank: {0:?}")]
    UnknownRank(String),
    #[error("Card value {0} outside 1..=13")]
    ValueOutOfRange(i64),
    #[error("Expected 4 cards, found {0}")]
    WrongCardCount(usize),
    #[error("Record has neither cards nor values")]
    MissingCards,
    #[error("Corpus root must be a list")]
    NotAList,
    #[error("Invalid puzzle record #{index}: {source}")]
    InvalidRecord {
        index: usize,
        #[source]
        source: Box<PuzzleError>,
    },
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
