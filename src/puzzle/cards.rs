use crate::puzzle::errors::PuzzleError;

/// Lowest and highest card values
pub const MIN_CARD_VALUE: u8 = 1;
pub const MAX_CARD_VALUE: u8 = 13;

/// Convert a rank string (`"A"`, `"10"`, `"k"`, `"T"`, ...) to its card value
///
/// # Errors
///
/// Returns [`PuzzleError::UnknownRank`] for anything that is not a face rank
/// or a number, and [`PuzzleError::ValueOutOfRange`] for numbers outside 1..=13.
pub fn rank_to_value(rank: &str) -> Result<u8, PuzzleError> {
    let r = rank.trim().trim_matches(|c| c == '"' || c == '\'');
    let value = match r {
        "A" | "a" => 1,
        "T" | "t" => 10,
        "J" | "j" => 11,
        "Q" | "q" => 12,
        "K" | "k" => 13,
        _ if !r.is_empty() && r.chars().all(|c| c.is_ascii_digit()) => {
            let n: i64 = r
                .parse()
                .map_err(|_| PuzzleError::UnknownRank(rank.to_string()))?;
            return checked_value(n);
        }
        _ => return Err(PuzzleError::UnknownRank(rank.to_string())),
    };
    Ok(value)
}

/// Validate a numeric card value
///
/// # Errors
///
/// Returns [`PuzzleError::ValueOutOfRange`] outside 1..=13.
pub fn checked_value(n: i64) -> Result<u8, PuzzleError> {
    u8::try_from(n)
        .ok()
        .filter(|v| (MIN_CARD_VALUE..=MAX_CARD_VALUE).contains(v))
        .ok_or(PuzzleError::ValueOutOfRange(n))
}

/// Display rank for a card value; face cards and aces use letters
pub fn value_to_rank(value: u8) -> String {
    match value {
        1 => "A".to_string(),
        11 => "J".to_string(),
        12 => "Q".to_string(),
        13 => "K".to_string(),
        n => n.to_string(),
    }
}
