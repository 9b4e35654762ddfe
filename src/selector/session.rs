use std::collections::VecDeque;

use crate::selector::config::NoSolutionAccounting;
use crate::selector::level::Level;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ServeCounters {
    pub served: u64,
    pub no_solution_served: u64,
}

impl ServeCounters {
    fn record(&mut self, no_solution: bool) {
        self.served += 1;
        if no_solution {
            self.no_solution_served += 1;
        }
    }

    /// Fraction of served puzzles that had no solution; 0 before anything is served
    pub fn ratio(&self) -> f64 {
        if self.served == 0 {
            0.0
        } else {
            self.no_solution_served as f64 / self.served as f64
        }
    }
}

/// Mutable per-session selection state: recency queue and serve counters
#[derive(Debug, Clone)]
pub struct SelectorSession {
    recent: VecDeque<String>,
    capacity: usize,
    total: ServeCounters,
    by_level: [ServeCounters; 3],
}

impl SelectorSession {
    pub fn new(capacity: usize) -> Self {
        Self {
            recent: VecDeque::with_capacity(capacity),
            capacity,
            total: ServeCounters::default(),
            by_level: [ServeCounters::default(); 3],
        }
    }

    pub fn is_recent(&self, key: &str) -> bool {
        self.recent.iter().any(|k| k == key)
    }

    /// Push a served key, evicting the oldest past capacity, and bump counters
    pub fn record(&mut self, key: &str, level: Level, no_solution: bool) {
        if self.capacity > 0 {
            if self.recent.len() == self.capacity {
                self.recent.pop_front();
            }
            self.recent.push_back(key.to_string());
        }
        self.total.record(no_solution);
        self.by_level[level.slot()].record(no_solution);
    }

    pub fn recent_keys(&self) -> impl Iterator<Item = &str> {
        self.recent.iter().map(String::as_str)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn served(&self) -> u64 {
        self.total.served
    }

    pub fn no_solution_served(&self) -> u64 {
        self.total.no_solution_served
    }

    pub fn counters(&self, level: Level) -> ServeCounters {
        self.by_level[level.slot()]
    }

    /// Ratio the medium admission decision compares against its target
    pub fn no_solution_ratio(&self, accounting: NoSolutionAccounting) -> f64 {
        match accounting {
            NoSolutionAccounting::Global => self.total.ratio(),
            NoSolutionAccounting::PerLevel => self.counters(Level::Medium).ratio(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recency_queue_is_bounded() {
        let mut session = SelectorSession::new(2);
        session.record("1-1-1-1", Level::Easy, false);
        session.record("1-1-1-2", Level::Easy, false);
        session.record("1-1-1-3", Level::Easy, false);

        assert!(!session.is_recent("1-1-1-1"));
        assert!(session.is_recent("1-1-1-2"));
        assert!(session.is_recent("1-1-1-3"));
        assert_eq!(session.recent_keys().count(), 2);
        assert_eq!(session.served(), 3);
    }

    #[test]
    fn test_zero_capacity_tracks_nothing() {
        let mut session = SelectorSession::new(0);
        session.record("1-2-3-4", Level::Hard, false);
        assert!(!session.is_recent("1-2-3-4"));
        assert_eq!(session.served(), 1);
    }

    #[test]
    fn test_counters_and_ratios() {
        let mut session = SelectorSession::new(10);
        assert_eq!(session.no_solution_ratio(NoSolutionAccounting::Global), 0.0);

        session.record("a", Level::Easy, false);
        session.record("b", Level::Easy, false);
        session.record("c", Level::Medium, true);
        session.record("d", Level::Medium, false);

        assert_eq!(session.served(), 4);
        assert_eq!(session.no_solution_served(), 1);
        assert_eq!(session.no_solution_ratio(NoSolutionAccounting::Global), 0.25);
        assert_eq!(session.no_solution_ratio(NoSolutionAccounting::PerLevel), 0.5);
        assert_eq!(
            session.counters(Level::Easy),
            ServeCounters {
                served: 2,
                no_solution_served: 0
            }
        );
    }
}
