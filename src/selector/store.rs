use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use log::{debug, info};

use crate::selector::config::{SelectorConfig, StoreConfig};
use crate::selector::index::PuzzleIndex;
use crate::selector::picker::PuzzleSelector;

/// Handle to one session's selector; lock it for the duration of a serve
pub type SharedSelector = Arc<Mutex<PuzzleSelector>>;

struct SessionSlot {
    selector: SharedSelector,
    last_access: Instant,
}

/// Keyed session store (session id to selector) with LRU eviction and idle
/// expiry. All sessions share one read-only index.
pub struct SessionStore {
    index: Arc<PuzzleIndex>,
    selector_config: SelectorConfig,
    config: StoreConfig,
    sessions: Mutex<HashMap<String, SessionSlot>>,
}

impl SessionStore {
    pub fn new(index: Arc<PuzzleIndex>, selector_config: SelectorConfig, config: StoreConfig) -> Self {
        Self {
            index,
            selector_config,
            config,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, SessionSlot>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn new_selector(&self) -> SharedSelector {
        Arc::new(Mutex::new(PuzzleSelector::new(
            Arc::clone(&self.index),
            self.selector_config,
        )))
    }

    pub fn get_or_create(&self, id: &str) -> SharedSelector {
        self.get_or_create_at(id, Instant::now())
    }

    /// Like [`SessionStore::get_or_create`] with an explicit clock reading
    pub fn get_or_create_at(&self, id: &str, now: Instant) -> SharedSelector {
        let mut sessions = self.lock();
        self.expire(&mut sessions, now);

        if let Some(slot) = sessions.get_mut(id) {
            slot.last_access = now;
            return Arc::clone(&slot.selector);
        }

        let selector = self.insert_fresh(&mut sessions, id, now);
        info!("Created session {} ({} active)", id, sessions.len());
        selector
    }

    /// Replace a session's selector with a fresh one
    pub fn reset(&self, id: &str) -> SharedSelector {
        self.reset_at(id, Instant::now())
    }

    /// Like [`SessionStore::reset`] with an explicit clock reading
    pub fn reset_at(&self, id: &str, now: Instant) -> SharedSelector {
        let mut sessions = self.lock();
        self.expire(&mut sessions, now);
        let selector = self.insert_fresh(&mut sessions, id, now);
        info!("Session {} restarted", id);
        selector
    }

    /// Insert a new selector under `id`, evicting the least recently used
    /// session first when a new id would exceed capacity.
    fn insert_fresh(
        &self,
        sessions: &mut HashMap<String, SessionSlot>,
        id: &str,
        now: Instant,
    ) -> SharedSelector {
        if self.config.capacity > 0
            && !sessions.contains_key(id)
            && sessions.len() >= self.config.capacity
        {
            evict_least_recent(sessions);
        }

        let selector = self.new_selector();
        sessions.insert(
            id.to_string(),
            SessionSlot {
                selector: Arc::clone(&selector),
                last_access: now,
            },
        );
        selector
    }

    /// End a session; returns whether it existed
    pub fn remove(&self, id: &str) -> bool {
        self.lock().remove(id).is_some()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.lock().contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn expire(&self, sessions: &mut HashMap<String, SessionSlot>, now: Instant) {
        let ttl = self.config.ttl;
        let before = sessions.len();
        sessions.retain(|_, slot| now.saturating_duration_since(slot.last_access) <= ttl);
        if sessions.len() < before {
            debug!("Expired {} idle sessions", before - sessions.len());
        }
    }
}

fn evict_least_recent(sessions: &mut HashMap<String, SessionSlot>) {
    let oldest = sessions
        .iter()
        .min_by_key(|(_, slot)| slot.last_access)
        .map(|(id, _)| id.clone());
    if let Some(id) = oldest {
        debug!("Evicting least recently used session {}", id);
        sessions.remove(&id);
    }
}
