//! Per-session prediction state
//!
//! A [`SessionStore`] belongs to exactly one interactive session. The web
//! surface keeps one store per session cookie inside a [`SessionRegistry`];
//! stores are never shared between sessions.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;
use uuid::Uuid;

use crate::ml::PredictionResult;

/// Holder for the last prediction of one session
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    last: Option<PredictionResult>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite any previous result
    pub fn record_prediction(&mut self, result: PredictionResult) {
        self.last = Some(result);
    }

    pub fn current_prediction(&self) -> Option<&PredictionResult> {
        self.last.as_ref()
    }

    pub fn clear(&mut self) {
        self.last = None;
    }
}

#[derive(Debug)]
struct SessionEntry {
    store: Arc<Mutex<SessionStore>>,
    last_seen: DateTime<Utc>,
}

type SessionMap = HashMap<Uuid, SessionEntry>;

/// Session id -> store map for the web surface
///
/// Bounded: the map never holds more than `capacity` sessions. Inserting
/// into a full map first evicts the least recently used session.
#[derive(Debug)]
pub struct SessionRegistry {
    sessions: Mutex<SessionMap>,
    capacity: usize,
}

impl SessionRegistry {
    pub fn new(capacity: usize) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            capacity: capacity.max(1),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn lock(&self) -> MutexGuard<'_, SessionMap> {
        // A panic while holding the lock cannot leave a store half-written
        self.sessions.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn evict_to_fit(&self, sessions: &mut SessionMap) {
        while sessions.len() >= self.capacity {
            let oldest = sessions
                .iter()
                .min_by_key(|(_, entry)| entry.last_seen)
                .map(|(id, _)| *id);
            match oldest {
                Some(evicted) => {
                    sessions.remove(&evicted);
                    debug!(session = %evicted, "Evicted least recently used session");
                }
                None => break,
            }
        }
    }

    fn insert_new(&self, sessions: &mut SessionMap) -> (Uuid, Arc<Mutex<SessionStore>>) {
        self.evict_to_fit(sessions);

        let id = Uuid::new_v4();
        let store = Arc::new(Mutex::new(SessionStore::new()));
        sessions.insert(
            id,
            SessionEntry {
                store: Arc::clone(&store),
                last_seen: Utc::now(),
            },
        );
        debug!(session = %id, "Session created");
        (id, store)
    }

    /// Start a new, empty session
    pub fn create(&self) -> Uuid {
        let mut sessions = self.lock();
        self.insert_new(&mut sessions).0
    }

    /// Find a live session or start a new one, in a single map lock
    ///
    /// Returns the id in use, whether it was newly created and its store.
    /// Unknown or evicted ids get a fresh session with a new id.
    fn acquire(&self, id: Option<Uuid>) -> (Uuid, bool, Arc<Mutex<SessionStore>>) {
        let mut sessions = self.lock();

        if let Some(id) = id {
            if let Some(entry) = sessions.get_mut(&id) {
                entry.last_seen = Utc::now();
                return (id, false, Arc::clone(&entry.store));
            }
        }

        let (id, store) = self.insert_new(&mut sessions);
        (id, true, store)
    }

    /// Run `f` against the store of session `id`, creating a session when
    /// `id` is absent or no longer live
    ///
    /// The map lock is released before `f` runs; only the one session's
    /// store stays locked, so actions on different sessions do not wait on
    /// each other.
    pub fn with_resolved<R>(
        &self,
        id: Option<Uuid>,
        f: impl FnOnce(&mut SessionStore) -> R,
    ) -> (Uuid, bool, R) {
        let (id, created, store) = self.acquire(id);
        let mut guard = store.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let output = f(&mut guard);
        (id, created, output)
    }

    pub fn contains(&self, id: &Uuid) -> bool {
        self.lock().contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new(1024)
    }
}
