use std::sync::Arc;

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::puzzle::Puzzle;
use crate::selector::config::SelectorConfig;
use crate::selector::index::{Pool, PuzzleIndex};
use crate::selector::level::Level;
use crate::selector::session::SelectorSession;

/// Serves puzzles for one session from a shared index under the recency
/// window and the medium-level no-solution admission ratio.
///
/// A serve (recency push plus counter bumps) mutates the session as a group;
/// callers sharing a selector across threads must hold it behind a lock.
#[derive(Debug)]
pub struct PuzzleSelector<R = StdRng> {
    index: Arc<PuzzleIndex>,
    config: SelectorConfig,
    session: SelectorSession,
    rng: R,
}

impl PuzzleSelector<StdRng> {
    pub fn new(index: Arc<PuzzleIndex>, config: SelectorConfig) -> Self {
        Self::with_rng(index, config, StdRng::from_entropy())
    }

    /// Deterministic shuffling, mainly for tests and replays
    pub fn with_seed(index: Arc<PuzzleIndex>, config: SelectorConfig, seed: u64) -> Self {
        Self::with_rng(index, config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> PuzzleSelector<R> {
    pub fn with_rng(index: Arc<PuzzleIndex>, config: SelectorConfig, rng: R) -> Self {
        Self {
            index,
            session: SelectorSession::new(config.recent_window),
            config,
            rng,
        }
    }

    pub fn index(&self) -> &Arc<PuzzleIndex> {
        &self.index
    }

    pub fn config(&self) -> &SelectorConfig {
        &self.config
    }

    pub fn session(&self) -> &SelectorSession {
        &self.session
    }

    /// Drop all history and start a fresh session over the same index
    pub fn reset(&mut self) {
        self.session = SelectorSession::new(self.config.recent_window);
    }

    /// Pick by level token (`easy`/`1`, `medium`/`2`, `hard`/`3`); any other
    /// token yields `None`.
    pub fn pick_token(&mut self, token: &str) -> Option<&Puzzle> {
        match Level::parse(token) {
            Some(level) => self.pick(level),
            None => {
                warn!("Unknown level token '{}'", token);
                None
            }
        }
    }

    /// Serve the next puzzle for `level`, or `None` when every candidate was
    /// served within the recency window.
    pub fn pick(&mut self, level: Level) -> Option<&Puzzle> {
        let candidates = self.candidates(level);
        debug!("{} candidates for level {}", candidates.len(), level);
        let chosen = self.serve_first_eligible(candidates, level)?;
        self.index.entry(chosen).map(|entry| entry.puzzle())
    }

    fn candidates(&self, level: Level) -> Vec<usize> {
        match level {
            Level::Easy => self.not_recent(&[Pool::Easy, Pool::MediumWithSimple]),
            Level::Medium => {
                let ratio = self
                    .session
                    .no_solution_ratio(self.config.no_solution_accounting);
                if ratio < self.config.no_solution_target {
                    debug!("No-solution ratio {:.3} below target, admitting", ratio);
                    self.not_recent(&[Pool::MediumSolvable, Pool::NoSolution])
                } else {
                    self.not_recent(&[Pool::MediumSolvable])
                }
            }
            Level::Hard => {
                let hard = self.not_recent(&[Pool::Hard]);
                if hard.is_empty() {
                    debug!("Hard pool exhausted, falling back to medium with hard solutions");
                    self.not_recent(&[Pool::MediumWithHard])
                } else {
                    hard
                }
            }
        }
    }

    fn not_recent(&self, pools: &[Pool]) -> Vec<usize> {
        pools
            .iter()
            .flat_map(|&pool| self.index.pool(pool).iter().copied())
            .filter(|&i| {
                self.index
                    .entry(i)
                    .is_some_and(|entry| !self.session.is_recent(entry.key()))
            })
            .collect()
    }

    fn serve_first_eligible(&mut self, mut candidates: Vec<usize>, level: Level) -> Option<usize> {
        candidates.shuffle(&mut self.rng);

        for i in candidates {
            let Some(entry) = self.index.entry(i) else {
                continue;
            };
            // the same key can sit in several candidates
            if self.session.is_recent(entry.key()) {
                continue;
            }
            let no_solution = !entry.puzzle().has_solution();
            self.session.record(entry.key(), level, no_solution);
            info!(
                "Served puzzle {} ({}) at level {}",
                entry.puzzle().id(),
                entry.key(),
                level
            );
            return Some(i);
        }

        warn!("No eligible puzzle for level {}", level);
        None
    }
}
