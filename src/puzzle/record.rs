use std::fmt;

use serde::{Deserialize, Serialize};

use crate::puzzle::cards::{checked_value, rank_to_value, value_to_rank};
use crate::puzzle::errors::PuzzleError;

/// Number of cards dealt per puzzle
pub const CARDS_PER_PUZZLE: usize = 4;

/// A card as it appears in raw corpus JSON: a number or a rank string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawCard {
    Value(i64),
    Rank(String),
}

impl RawCard {
    fn to_value(&self) -> Result<u8, PuzzleError> {
        match self {
            RawCard::Value(n) => checked_value(*n),
            RawCard::Rank(r) => rank_to_value(r),
        }
    }

    fn display_rank(&self) -> Result<String, PuzzleError> {
        match self {
            RawCard::Value(n) => checked_value(*n).map(value_to_rank),
            RawCard::Rank(r) => {
                let value = rank_to_value(r)?;
                let trimmed = r.trim().trim_matches(|c| c == '"' || c == '\'');
                if trimmed.chars().all(|c| c.is_ascii_digit()) {
                    Ok(value_to_rank(value))
                } else {
                    Ok(trimmed.to_uppercase())
                }
            }
        }
    }
}

/// Puzzle record exactly as stored in the corpus file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawPuzzle {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub cards: Option<Vec<RawCard>>,
    #[serde(default)]
    pub values: Option<Vec<RawCard>>,
    #[serde(default)]
    pub level: Option<String>,
    /// Older corpora label difficulty under this key; `level` wins when both are set
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub solutions: Option<Vec<String>>,
}

/// Normalized difficulty label of a puzzle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Unlabeled,
}

impl Difficulty {
    /// Case- and whitespace-insensitive label lookup; unknown labels are unlabeled
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "easy" => Difficulty::Easy,
            "medium" => Difficulty::Medium,
            "hard" => Difficulty::Hard,
            _ => Difficulty::Unlabeled,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let label = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::Unlabeled => "unlabeled",
        };
        write!(f, "{}", label)
    }
}

/// Validated, immutable puzzle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Puzzle {
    id: u64,
    values: [u8; CARDS_PER_PUZZLE],
    ranks: [String; CARDS_PER_PUZZLE],
    difficulty: Difficulty,
    solutions: Vec<String>,
}

impl Puzzle {
    /// Build a puzzle directly from card values
    ///
    /// # Errors
    ///
    /// Returns [`PuzzleError::ValueOutOfRange`] if a value is outside 1..=13.
    pub fn new(
        id: u64,
        values: [u8; CARDS_PER_PUZZLE],
        difficulty: Difficulty,
        solutions: Vec<String>,
    ) -> Result<Self, PuzzleError> {
        for &v in &values {
            checked_value(i64::from(v))?;
        }
        Ok(Self {
            id,
            values,
            ranks: values.map(value_to_rank),
            difficulty,
            solutions,
        })
    }

    /// Validate a raw record. `values` wins over `cards` when present and
    /// non-empty; `fallback_id` is used when the record carries no id.
    ///
    /// # Errors
    ///
    /// Returns an error when the record lacks cards, has other than four
    /// cards, or contains an unknown rank or out-of-range value.
    pub fn from_raw(raw: RawPuzzle, fallback_id: u64) -> Result<Self, PuzzleError> {
        let numeric = raw.values.as_ref().filter(|v| !v.is_empty());
        let source = numeric
            .or(raw.cards.as_ref())
            .ok_or(PuzzleError::MissingCards)?;

        if source.len() != CARDS_PER_PUZZLE {
            return Err(PuzzleError::WrongCardCount(source.len()));
        }

        let mut values = [0u8; CARDS_PER_PUZZLE];
        for (slot, card) in values.iter_mut().zip(source) {
            *slot = card.to_value()?;
        }

        let ranks = match raw.cards.as_ref() {
            Some(cards) if cards.len() == CARDS_PER_PUZZLE => {
                let display: Vec<String> = cards
                    .iter()
                    .map(RawCard::display_rank)
                    .collect::<Result<_, _>>()?;
                <[String; CARDS_PER_PUZZLE]>::try_from(display)
                    .map_err(|v| PuzzleError::WrongCardCount(v.len()))?
            }
            _ => values.map(value_to_rank),
        };

        Ok(Self {
            id: raw.id.unwrap_or(fallback_id),
            values,
            ranks,
            difficulty: raw
                .level
                .or(raw.difficulty)
                .as_deref()
                .map_or(Difficulty::Unlabeled, Difficulty::from_label),
            solutions: raw.solutions.unwrap_or_default(),
        })
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn values(&self) -> &[u8; CARDS_PER_PUZZLE] {
        &self.values
    }

    /// Rank strings for display, in dealt order
    pub fn display_ranks(&self) -> &[String; CARDS_PER_PUZZLE] {
        &self.ranks
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn solutions(&self) -> &[String] {
        &self.solutions
    }

    pub fn has_solution(&self) -> bool {
        !self.solutions.is_empty()
    }

    pub fn all_values_unique(&self) -> bool {
        let mut sorted = self.values;
        sorted.sort_unstable();
        sorted.windows(2).all(|w| w[0] != w[1])
    }

    /// Order-independent identity of the dealt values, e.g. `"1-4-8-8"`
    pub fn canonical_key(&self) -> String {
        canonical_key(&self.values)
    }
}

impl fmt::Display for Puzzle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let values: Vec<String> = self.values.iter().map(u8::to_string).collect();
        write!(
            f,
            "[{}]   (values: {})",
            self.ranks.join(", "),
            values.join(", ")
        )
    }
}

/// Sorted values joined with `-`
pub fn canonical_key(values: &[u8]) -> String {
    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    sorted
        .iter()
        .map(u8::to_string)
        .collect::<Vec<_>>()
        .join("-")
}
