use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

use crate::session::{Session, SessionError, SessionId};

pub struct InMemorySessionStore {
    pub(super) entry: HashMap<SessionId, Session>,
}

/// Backing store for sessions.
///
/// Callers serialize access through a single async mutex, so mutating
/// methods take `&mut self`.
#[async_trait]
pub trait SessionStore: Send + Sync + 'static {
    /// Get a session without touching it.
    async fn get(&self, id: &SessionId) -> Result<Option<Session>, SessionError>;

    /// Insert a session only if its id is not taken yet.
    /// Returns true if the session was stored, false if the id already existed.
    async fn put_if_not_exists(&mut self, session: Session) -> Result<bool, SessionError>;

    /// Update `last_accessed_at` and return the refreshed session.
    async fn touch(
        &mut self,
        id: &SessionId,
        now: DateTime<Utc>,
    ) -> Result<Option<Session>, SessionError>;

    /// Set one attribute. Returns false if the session is gone.
    async fn set_attribute(
        &mut self,
        id: &SessionId,
        key: &str,
        value: String,
    ) -> Result<bool, SessionError>;

    /// Remove a session. Removing an unknown id is not an error.
    async fn remove(&mut self, id: &SessionId) -> Result<(), SessionError>;

    /// Remove every session last accessed before `cutoff`.
    /// Returns the number of removed sessions.
    async fn remove_idle(&mut self, cutoff: DateTime<Utc>) -> Result<usize, SessionError>;

    /// Number of stored sessions.
    async fn count(&self) -> Result<usize, SessionError>;
}
