use std::fs;
use std::path::Path;

use log::{debug, info};

use crate::puzzle::errors::PuzzleError;
use crate::puzzle::record::{Puzzle, RawPuzzle};

/// Parse a corpus JSON document (a list of puzzle records).
///
/// # Errors
///
/// Fails on malformed JSON, a non-list root, or the first record that does
/// not validate, reporting that record's position.
pub fn load_corpus_str(json: &str) -> Result<Vec<Puzzle>, PuzzleError> {
    let root: serde_json::Value = serde_json::from_str(json)?;
    let serde_json::Value::Array(items) = root else {
        return Err(PuzzleError::NotAList);
    };

    let puzzles = items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            let invalid = |source: PuzzleError| PuzzleError::InvalidRecord {
                index,
                source: Box::new(source),
            };
            let raw: RawPuzzle =
                serde_json::from_value(item).map_err(|e| invalid(PuzzleError::Json(e)))?;
            Puzzle::from_raw(raw, index as u64).map_err(invalid)
        })
        .collect::<Result<Vec<_>, _>>()?;

    debug!("Validated {} puzzle records", puzzles.len());
    Ok(puzzles)
}

/// Read and validate a corpus file
///
/// # Errors
///
/// Fails when the file cannot be read or [`load_corpus_str`] rejects it.
pub fn load_corpus_path(path: &Path) -> Result<Vec<Puzzle>, PuzzleError> {
    let json = fs::read_to_string(path)?;
    let puzzles = load_corpus_str(&json)?;
    info!("Loaded {} puzzles from {}", puzzles.len(), path.display());
    Ok(puzzles)
}
