use log::info;
use rayon::prelude::*;

use crate::puzzle::{CARDS_PER_PUZZLE, Difficulty, Puzzle};
use crate::scoring::{has_hard_solution, has_simple_solution};
use crate::selector::config::PoolPolicy;

/// A puzzle with its canonical key and precomputed solution classification
#[derive(Debug, Clone)]
pub struct IndexEntry {
    puzzle: Puzzle,
    key: String,
    has_simple_solution: bool,
    has_hard_solution: bool,
}

impl IndexEntry {
    fn classify(puzzle: Puzzle) -> Self {
        let key = puzzle.canonical_key();
        let has_simple_solution = has_simple_solution(puzzle.solutions());
        let has_hard_solution = has_hard_solution(puzzle.solutions());
        Self {
            puzzle,
            key,
            has_simple_solution,
            has_hard_solution,
        }
    }

    pub fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    pub fn values(&self) -> &[u8; CARDS_PER_PUZZLE] {
        self.puzzle.values()
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn has_simple_solution(&self) -> bool {
        self.has_simple_solution
    }

    pub fn has_hard_solution(&self) -> bool {
        self.has_hard_solution
    }
}

/// Named candidate pools over the index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pool {
    /// Labeled easy with at least one solution
    Easy,
    /// Every medium-labeled puzzle
    Medium,
    /// Medium-labeled puzzles with at least one solution
    MediumSolvable,
    /// Hard-labeled puzzles, optionally only those with distinct values
    Hard,
    /// Puzzles with no solution, any label
    NoSolution,
    /// Solvable medium puzzles with a simple solution
    MediumWithSimple,
    /// Solvable medium puzzles with a hard solution
    MediumWithHard,
}

/// Read-only index of a corpus, built once and shared between selectors
#[derive(Debug, Clone, Default)]
pub struct PuzzleIndex {
    entries: Vec<IndexEntry>,
    easy: Vec<usize>,
    medium: Vec<usize>,
    medium_solvable: Vec<usize>,
    hard: Vec<usize>,
    no_solution: Vec<usize>,
    medium_with_simple: Vec<usize>,
    medium_with_hard: Vec<usize>,
}

impl PuzzleIndex {
    /// Classify every puzzle's solutions (in parallel) and sort the corpus
    /// into pools.
    pub fn build(puzzles: Vec<Puzzle>, policy: PoolPolicy) -> Self {
        let entries: Vec<IndexEntry> = puzzles
            .into_par_iter()
            .map(IndexEntry::classify)
            .collect();

        let mut index = Self {
            entries,
            ..Self::default()
        };

        for (i, entry) in index.entries.iter().enumerate() {
            let puzzle = &entry.puzzle;
            let solvable = puzzle.has_solution();

            if !solvable {
                index.no_solution.push(i);
            }
            match puzzle.difficulty() {
                Difficulty::Easy if solvable => index.easy.push(i),
                Difficulty::Medium => {
                    index.medium.push(i);
                    if solvable {
                        index.medium_solvable.push(i);
                        if entry.has_simple_solution {
                            index.medium_with_simple.push(i);
                        }
                        if entry.has_hard_solution {
                            index.medium_with_hard.push(i);
                        }
                    }
                }
                Difficulty::Hard => {
                    if !policy.hard_requires_unique_values || puzzle.all_values_unique() {
                        index.hard.push(i);
                    }
                }
                _ => {}
            }
        }

        info!(
            "Indexed {} puzzles: easy={} medium={} (simple={}, hard={}) hard={} no_solution={}",
            index.entries.len(),
            index.easy.len(),
            index.medium.len(),
            index.medium_with_simple.len(),
            index.medium_with_hard.len(),
            index.hard.len(),
            index.no_solution.len()
        );

        index
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entry(&self, i: usize) -> Option<&IndexEntry> {
        self.entries.get(i)
    }

    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }

    /// Entry positions belonging to `pool`
    pub fn pool(&self, pool: Pool) -> &[usize] {
        match pool {
            Pool::Easy => &self.easy,
            Pool::Medium => &self.medium,
            Pool::MediumSolvable => &self.medium_solvable,
            Pool::Hard => &self.hard,
            Pool::NoSolution => &self.no_solution,
            Pool::MediumWithSimple => &self.medium_with_simple,
            Pool::MediumWithHard => &self.medium_with_hard,
        }
    }
}
