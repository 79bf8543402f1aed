use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::session::{Session, SessionError, SessionId};

use super::types::{InMemorySessionStore, SessionStore};

impl InMemorySessionStore {
    pub fn new() -> Self {
        tracing::info!("Creating new in-memory session store");
        Self {
            entry: HashMap::new(),
        }
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, id: &SessionId) -> Result<Option<Session>, SessionError> {
        Ok(self.entry.get(id).cloned())
    }

    async fn put_if_not_exists(&mut self, session: Session) -> Result<bool, SessionError> {
        match self.entry.entry(session.id.clone()) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(slot) => {
                slot.insert(session);
                Ok(true)
            }
        }
    }

    async fn touch(
        &mut self,
        id: &SessionId,
        now: DateTime<Utc>,
    ) -> Result<Option<Session>, SessionError> {
        Ok(self.entry.get_mut(id).map(|session| {
            session.last_accessed_at = now;
            session.clone()
        }))
    }

    async fn set_attribute(
        &mut self,
        id: &SessionId,
        key: &str,
        value: String,
    ) -> Result<bool, SessionError> {
        let Some(session) = self.entry.get_mut(id) else {
            return Ok(false);
        };
        session.attributes.insert(key.to_string(), value);
        Ok(true)
    }

    async fn remove(&mut self, id: &SessionId) -> Result<(), SessionError> {
        self.entry.remove(id);
        Ok(())
    }

    async fn remove_idle(&mut self, cutoff: DateTime<Utc>) -> Result<usize, SessionError> {
        let before = self.entry.len();
        self.entry.retain(|_, session| !session.is_idle_since(cutoff));
        Ok(before - self.entry.len())
    }

    async fn count(&self) -> Result<usize, SessionError> {
        Ok(self.entry.len())
    }
}
