use std::sync::Arc;

use hashbrown::HashMap;
use parking_lot::{Mutex, RwLock};
use sweeper_core::{GameSession, SessionId};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Session {0} already exists")]
    Duplicate(SessionId),
    #[error("Could not encode session: {0}")]
    Codec(#[from] serde_json::Error),
}

/// Keeps sessions by id. Implementations hand out copies, never live
/// references, and must run each [`SessionStore::update`] under a lock held
/// for the whole load, mutate and save cycle of that one session.
pub trait SessionStore {
    fn insert(&self, session: &GameSession) -> Result<(), StoreError>;

    fn load(&self, id: SessionId) -> Result<Option<GameSession>, StoreError>;

    /// Applies `f` to the stored session and saves the result.
    /// Returns `Ok(None)` if there is no session with this id.
    fn update<R>(
        &self,
        id: SessionId,
        f: impl FnOnce(&mut GameSession) -> R,
    ) -> Result<Option<R>, StoreError>;

    fn remove(&self, id: SessionId) -> bool;
}

type Slot = Arc<Mutex<String>>;

/// In-process store holding each session as a JSON snapshot.
///
/// Every session has its own lock, so reveals on one session are serialized
/// while different sessions never wait on each other.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slots: RwLock<HashMap<SessionId, Slot>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.slots.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.read().is_empty()
    }

    fn slot(&self, id: SessionId) -> Option<Slot> {
        self.slots.read().get(&id).cloned()
    }
}

impl SessionStore for MemoryStore {
    fn insert(&self, session: &GameSession) -> Result<(), StoreError> {
        let encoded = serde_json::to_string(session)?;
        let mut slots = self.slots.write();
        if slots.contains_key(&session.id()) {
            return Err(StoreError::Duplicate(session.id()));
        }
        slots.insert(session.id(), Arc::new(Mutex::new(encoded)));
        Ok(())
    }

    fn load(&self, id: SessionId) -> Result<Option<GameSession>, StoreError> {
        let Some(slot) = self.slot(id) else {
            return Ok(None);
        };
        let encoded = slot.lock();
        Ok(Some(serde_json::from_str(&encoded)?))
    }

    fn update<R>(
        &self,
        id: SessionId,
        f: impl FnOnce(&mut GameSession) -> R,
    ) -> Result<Option<R>, StoreError> {
        let Some(slot) = self.slot(id) else {
            return Ok(None);
        };

        let mut encoded = slot.lock();
        let mut session: GameSession = serde_json::from_str(&encoded)?;
        let result = f(&mut session);
        *encoded = serde_json::to_string(&session)?;
        Ok(Some(result))
    }

    fn remove(&self, id: SessionId) -> bool {
        self.slots.write().remove(&id).is_some()
    }
}
