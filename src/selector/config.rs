use std::time::Duration;

/// How the medium-level no-solution admission ratio is measured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NoSolutionAccounting {
    /// Over every puzzle the session served, at any level
    #[default]
    Global,
    /// Over puzzles served at the medium level only
    PerLevel,
}

/// Policy fixed when the puzzle index is built
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PoolPolicy {
    /// Hard pool keeps only puzzles whose four values are all distinct
    pub hard_requires_unique_values: bool,
}

/// Per-session selection policy
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectorConfig {
    /// Capacity of the recency queue of canonical keys
    pub recent_window: usize,
    /// Long-run target fraction of no-solution puzzles at the medium level
    pub no_solution_target: f64,
    pub no_solution_accounting: NoSolutionAccounting,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            recent_window: 60,
            no_solution_target: 0.10,
            no_solution_accounting: NoSolutionAccounting::Global,
        }
    }
}

/// Capacity and idle expiry of the session store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreConfig {
    /// Sessions kept before the least recently used one is evicted
    pub capacity: usize,
    /// Sessions idle longer than this are dropped
    pub ttl: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            capacity: 1024,
            ttl: Duration::from_secs(2 * 60 * 60),
        }
    }
}
