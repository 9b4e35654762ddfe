use std::collections::{HashSet, VecDeque};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::puzzle::{Difficulty, Puzzle};
use crate::selector::{
    Level, NoSolutionAccounting, Pool, PoolPolicy, PuzzleIndex, PuzzleSelector, SelectorConfig,
    SessionStore, StoreConfig,
};

const SIMPLE: &str = "4*6";
const INTERMEDIATE: &str = "8/(3-8/3)";
const HARD: &str = "((1^5)/(2^5))^3";

fn puzzle(id: u64, values: [u8; 4], difficulty: Difficulty, solutions: &[&str]) -> Puzzle {
    let solutions = solutions.iter().map(|s| s.to_string()).collect();
    match Puzzle::new(id, values, difficulty, solutions) {
        Ok(p) => p,
        Err(e) => panic!("invalid test puzzle: {}", e),
    }
}

/// First `n` distinct sorted value combinations
fn distinct_values(n: usize) -> Vec<[u8; 4]> {
    let mut out = Vec::new();
    for a in 1..=13u8 {
        for b in a..=13 {
            for c in b..=13 {
                for d in c..=13 {
                    if out.len() == n {
                        return out;
                    }
                    out.push([a, b, c, d]);
                }
            }
        }
    }
    out
}

fn corpus(difficulty: Difficulty, solutions: &[&str], count: usize, first_id: u64) -> Vec<Puzzle> {
    distinct_values(count)
        .into_iter()
        .enumerate()
        .map(|(i, values)| puzzle(first_id + i as u64, values, difficulty, solutions))
        .collect()
}

fn selector(puzzles: Vec<Puzzle>, config: SelectorConfig) -> PuzzleSelector {
    let index = Arc::new(PuzzleIndex::build(puzzles, PoolPolicy::default()));
    PuzzleSelector::with_seed(index, config, 7)
}

#[test]
fn test_index_pools() {
    let puzzles = vec![
        puzzle(0, [1, 2, 3, 4], Difficulty::Easy, &[SIMPLE]),
        puzzle(1, [1, 1, 1, 1], Difficulty::Easy, &[]),
        puzzle(2, [1, 2, 3, 5], Difficulty::Medium, &[SIMPLE, HARD]),
        puzzle(3, [1, 2, 3, 6], Difficulty::Medium, &[INTERMEDIATE]),
        puzzle(4, [1, 2, 3, 7], Difficulty::Medium, &[]),
        puzzle(5, [1, 2, 3, 8], Difficulty::Hard, &[HARD]),
        puzzle(6, [8, 8, 3, 3], Difficulty::Hard, &[HARD]),
        puzzle(7, [1, 2, 3, 9], Difficulty::Unlabeled, &[]),
    ];
    let index = PuzzleIndex::build(puzzles, PoolPolicy::default());

    assert_eq!(index.len(), 8);
    assert_eq!(index.pool(Pool::Easy), &[0]);
    assert_eq!(index.pool(Pool::Medium), &[2, 3, 4]);
    assert_eq!(index.pool(Pool::MediumSolvable), &[2, 3]);
    assert_eq!(index.pool(Pool::MediumWithSimple), &[2]);
    assert_eq!(index.pool(Pool::MediumWithHard), &[2]);
    assert_eq!(index.pool(Pool::Hard), &[5, 6]);
    assert_eq!(index.pool(Pool::NoSolution), &[1, 4, 7]);
}

#[test]
fn test_hard_unique_values_policy() {
    let puzzles = vec![
        puzzle(0, [1, 2, 3, 8], Difficulty::Hard, &[HARD]),
        puzzle(1, [8, 8, 3, 3], Difficulty::Hard, &[HARD]),
    ];
    let policy = PoolPolicy {
        hard_requires_unique_values: true,
    };
    let index = PuzzleIndex::build(puzzles, policy);
    assert_eq!(index.pool(Pool::Hard), &[0]);
}

#[test]
fn test_index_entries_carry_keys() {
    let index = PuzzleIndex::build(
        vec![puzzle(0, [8, 1, 8, 4], Difficulty::Easy, &[SIMPLE])],
        PoolPolicy::default(),
    );
    let entry = index.entry(0);
    assert!(entry.is_some());
    if let Some(entry) = entry {
        assert_eq!(entry.key(), "1-4-8-8");
        assert_eq!(entry.values(), &[8, 1, 8, 4]);
        assert!(entry.has_simple_solution());
        assert!(!entry.has_hard_solution());
    }
}

#[test]
fn test_easy_never_repeats_within_window() {
    let config = SelectorConfig::default();
    let window = config.recent_window;
    let mut selector = selector(corpus(Difficulty::Easy, &[SIMPLE], window + 1, 0), config);

    let mut history: VecDeque<String> = VecDeque::new();
    for round in 0..1000 {
        let picked = selector.pick(Level::Easy).map(Puzzle::canonical_key);
        assert!(picked.is_some(), "round {} found nothing", round);
        if let Some(key) = picked {
            assert!(
                !history.contains(&key),
                "round {} repeated {} within the window",
                round,
                key
            );
            history.push_back(key);
            if history.len() > window {
                history.pop_front();
            }
        }
    }
    assert_eq!(selector.session().served(), 1000);
}

#[test]
fn test_easy_includes_medium_with_simple_solution() {
    let puzzles = vec![
        puzzle(0, [1, 2, 3, 4], Difficulty::Medium, &[SIMPLE]),
        puzzle(1, [1, 2, 3, 5], Difficulty::Medium, &[INTERMEDIATE]),
        puzzle(2, [1, 2, 3, 6], Difficulty::Easy, &[]),
    ];
    let mut selector = selector(puzzles, SelectorConfig::default());

    assert_eq!(selector.pick(Level::Easy).map(Puzzle::id), Some(0));
    assert_eq!(selector.pick(Level::Easy).map(Puzzle::id), None);
}

#[test]
fn test_none_when_pool_exhausted() {
    let mut selector = selector(
        corpus(Difficulty::Easy, &[SIMPLE], 3, 0),
        SelectorConfig::default(),
    );
    let served: HashSet<u64> = (0..3)
        .filter_map(|_| selector.pick(Level::Easy).map(Puzzle::id))
        .collect();
    assert_eq!(served.len(), 3);
    assert!(selector.pick(Level::Easy).is_none());
    assert_eq!(selector.session().served(), 3);
}

#[test]
fn test_same_values_block_each_other() {
    let puzzles = vec![
        puzzle(0, [1, 2, 3, 4], Difficulty::Easy, &[SIMPLE]),
        puzzle(1, [4, 3, 2, 1], Difficulty::Easy, &["1*2*3*4"]),
    ];
    let mut selector = selector(puzzles, SelectorConfig::default());
    assert!(selector.pick(Level::Easy).is_some());
    assert!(selector.pick(Level::Easy).is_none());
    assert_eq!(selector.session().served(), 1);
}

#[test]
fn test_window_rolls_over() {
    let config = SelectorConfig {
        recent_window: 1,
        ..SelectorConfig::default()
    };
    let mut selector = selector(corpus(Difficulty::Easy, &[SIMPLE], 2, 0), config);
    let first = selector.pick(Level::Easy).map(Puzzle::id);
    let second = selector.pick(Level::Easy).map(Puzzle::id);
    let third = selector.pick(Level::Easy).map(Puzzle::id);
    assert!(first.is_some() && second.is_some());
    assert_ne!(first, second);
    assert_eq!(first, third);
}

#[test]
fn test_unknown_level_token() {
    let mut selector = selector(
        corpus(Difficulty::Easy, &[SIMPLE], 5, 0),
        SelectorConfig::default(),
    );
    assert!(selector.pick_token("expert").is_none());
    assert!(selector.pick_token("").is_none());
    assert_eq!(selector.session().served(), 0);
    assert!(selector.pick_token("1").is_some());
}

#[test]
fn test_hard_falls_back_to_medium_with_hard_solution() {
    let puzzles = vec![
        puzzle(0, [1, 2, 3, 5], Difficulty::Medium, &[HARD]),
        puzzle(1, [1, 2, 3, 6], Difficulty::Medium, &[SIMPLE]),
    ];
    let mut selector = selector(puzzles, SelectorConfig::default());
    assert_eq!(selector.pick(Level::Hard).map(Puzzle::id), Some(0));
    // the fallback set is recency-filtered too
    assert!(selector.pick(Level::Hard).is_none());
}

#[test]
fn test_hard_prefers_hard_pool() {
    let puzzles = vec![
        puzzle(0, [1, 2, 3, 5], Difficulty::Medium, &[HARD]),
        puzzle(1, [1, 2, 3, 8], Difficulty::Hard, &[INTERMEDIATE]),
    ];
    let mut selector = selector(puzzles, SelectorConfig::default());
    assert_eq!(selector.pick(Level::Hard).map(Puzzle::id), Some(1));
    assert_eq!(selector.pick(Level::Hard).map(Puzzle::id), Some(0));
}

#[test]
fn test_medium_admits_no_solution_below_target() {
    let mut puzzles = corpus(Difficulty::Unlabeled, &[], 5, 0);
    puzzles.push(puzzle(100, [13, 13, 13, 13], Difficulty::Medium, &[INTERMEDIATE]));
    let mut selector = selector(puzzles, SelectorConfig::default());

    // nothing served yet: ratio 0 admits the no-solution pool alongside
    let mut no_solution_seen = false;
    for _ in 0..6 {
        match selector.pick(Level::Medium) {
            Some(p) if !p.has_solution() => no_solution_seen = true,
            Some(_) => {}
            None => break,
        }
    }
    assert!(no_solution_seen);
    let session = selector.session();
    assert!(session.no_solution_served() <= session.served());
}

#[test]
fn test_medium_withholds_no_solution_above_target() {
    let puzzles = corpus(Difficulty::Medium, &[], 10, 0);
    let mut selector = selector(puzzles, SelectorConfig::default());

    let first = selector.pick(Level::Medium).map(Puzzle::has_solution);
    assert_eq!(first, Some(false));
    // ratio is now 1.0, only solvable medium puzzles are offered and there are none
    assert!(selector.pick(Level::Medium).is_none());
    assert_eq!(selector.session().no_solution_served(), 1);
}

#[test]
fn test_medium_ratio_converges_to_target() {
    let mut puzzles = corpus(Difficulty::Medium, &[INTERMEDIATE], 300, 0);
    let unsolvable: Vec<Puzzle> = distinct_values(600)
        .into_iter()
        .skip(300)
        .enumerate()
        .map(|(i, values)| puzzle(1000 + i as u64, values, Difficulty::Medium, &[]))
        .collect();
    puzzles.extend(unsolvable);
    let mut selector = selector(puzzles, SelectorConfig::default());

    for _ in 0..5000 {
        assert!(selector.pick(Level::Medium).is_some());
    }
    let session = selector.session();
    let ratio = session.no_solution_served() as f64 / session.served() as f64;
    assert!((ratio - 0.10).abs() < 0.02, "ratio {} far from target", ratio);
}

#[test]
fn test_per_level_accounting_ignores_other_levels() {
    let mut puzzles = corpus(Difficulty::Easy, &[SIMPLE], 30, 0);
    puzzles.push(puzzle(100, [13, 13, 13, 13], Difficulty::Unlabeled, &[]));

    let run = |accounting: NoSolutionAccounting| {
        let config = SelectorConfig {
            recent_window: 0,
            no_solution_accounting: accounting,
            ..SelectorConfig::default()
        };
        let mut selector = selector(puzzles.clone(), config);
        assert_eq!(selector.pick(Level::Medium).map(Puzzle::id), Some(100));
        for _ in 0..19 {
            assert!(selector.pick(Level::Easy).is_some());
        }
        selector.pick(Level::Medium).map(Puzzle::id)
    };

    // globally 1 of 20 served had no solution: still below target
    assert_eq!(run(NoSolutionAccounting::Global), Some(100));
    // at medium level 1 of 1: above target
    assert_eq!(run(NoSolutionAccounting::PerLevel), None);
}

#[test]
fn test_reset_clears_history() {
    let mut selector = selector(
        corpus(Difficulty::Easy, &[SIMPLE], 1, 0),
        SelectorConfig::default(),
    );
    assert!(selector.pick(Level::Easy).is_some());
    assert!(selector.pick(Level::Easy).is_none());
    selector.reset();
    assert_eq!(selector.session().served(), 0);
    assert!(selector.pick(Level::Easy).is_some());
}

fn store(config: StoreConfig) -> SessionStore {
    let index = Arc::new(PuzzleIndex::build(
        corpus(Difficulty::Easy, &[SIMPLE], 10, 0),
        PoolPolicy::default(),
    ));
    SessionStore::new(index, SelectorConfig::default(), config)
}

#[test]
fn test_store_reuses_session() {
    let store = store(StoreConfig::default());
    let a = store.get_or_create("alice");
    let again = store.get_or_create("alice");
    let b = store.get_or_create("bob");
    assert!(Arc::ptr_eq(&a, &again));
    assert!(!Arc::ptr_eq(&a, &b));
    assert_eq!(store.len(), 2);
}

#[test]
fn test_store_sessions_are_independent() {
    let store = store(StoreConfig::default());
    let a = store.get_or_create("alice");
    let b = store.get_or_create("bob");
    if let Ok(mut selector) = a.lock() {
        assert!(selector.pick(Level::Easy).is_some());
    }
    if let Ok(selector) = b.lock() {
        assert_eq!(selector.session().served(), 0);
    }
}

#[test]
fn test_store_evicts_least_recently_used() {
    let store = store(StoreConfig {
        capacity: 2,
        ..StoreConfig::default()
    });
    let start = Instant::now();
    store.get_or_create_at("a", start);
    store.get_or_create_at("b", start + Duration::from_secs(1));
    store.get_or_create_at("a", start + Duration::from_secs(2));
    store.get_or_create_at("c", start + Duration::from_secs(3));

    assert!(store.contains("a"));
    assert!(!store.contains("b"));
    assert!(store.contains("c"));
    assert_eq!(store.len(), 2);
}

#[test]
fn test_store_expires_idle_sessions() {
    let store = store(StoreConfig {
        capacity: 10,
        ttl: Duration::from_secs(60),
    });
    let start = Instant::now();
    store.get_or_create_at("a", start);
    store.get_or_create_at("b", start + Duration::from_secs(50));
    store.get_or_create_at("c", start + Duration::from_secs(100));

    assert!(!store.contains("a"));
    assert!(store.contains("b"));
    assert!(store.contains("c"));
}

#[test]
fn test_store_reset_and_remove() {
    let store = store(StoreConfig::default());
    let first = store.get_or_create("alice");
    if let Ok(mut selector) = first.lock() {
        assert!(selector.pick(Level::Easy).is_some());
    }

    let fresh = store.reset("alice");
    assert!(!Arc::ptr_eq(&first, &fresh));
    if let Ok(selector) = fresh.lock() {
        assert_eq!(selector.session().served(), 0);
    }

    assert!(store.remove("alice"));
    assert!(!store.remove("alice"));
    assert!(store.is_empty());
}

#[test]
fn test_store_reset_respects_capacity_and_expiry() {
    let store = store(StoreConfig {
        capacity: 2,
        ttl: Duration::from_secs(60),
    });
    let start = Instant::now();
    store.get_or_create_at("a", start);
    store.get_or_create_at("b", start + Duration::from_secs(1));

    // resetting an existing session never evicts another one
    store.reset_at("b", start + Duration::from_secs(2));
    assert!(store.contains("a"));
    assert_eq!(store.len(), 2);

    for (i, id) in ["c", "d", "e"].into_iter().enumerate() {
        store.reset_at(id, start + Duration::from_secs(3 + i as u64));
        assert!(store.len() <= 2);
    }
    assert!(store.contains("d"));
    assert!(store.contains("e"));

    store.reset_at("f", start + Duration::from_secs(200));
    assert_eq!(store.len(), 1);
    assert!(store.contains("f"));
}
