//! Session-aware puzzle selection over a read-only corpus index

mod config;
mod index;
mod level;
mod picker;
mod session;
mod store;

pub use config::{NoSolutionAccounting, PoolPolicy, SelectorConfig, StoreConfig};
pub use index::{IndexEntry, Pool, PuzzleIndex};
pub use level::Level;
pub use picker::PuzzleSelector;
pub use session::{SelectorSession, ServeCounters};
pub use store::{SessionStore, SharedSelector};

#[cfg(test)]
mod tests;
