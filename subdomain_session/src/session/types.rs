use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::fmt;

use crate::session::errors::SessionError;
use crate::utils::gen_random_string;

/// Name of the attribute `/login` fills with a fresh UUID
pub const RANDOM_ATTRIBUTE: &str = "random";

/// Number of random bytes behind a session id (256 bits)
const SESSION_ID_BYTES: usize = 32;

/// Opaque session identifier, carried verbatim in the session cookie
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Draw a fresh id from the system CSPRNG.
    pub fn generate() -> Result<Self, SessionError> {
        Ok(Self(gen_random_string(SESSION_ID_BYTES)?))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Keep full ids out of logs.
impl fmt::Debug for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix: String = self.0.chars().take(6).collect();
        write!(f, "SessionId({prefix}..)")
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    pub id: SessionId,
    pub attributes: HashMap<String, String>,
    pub created_at: DateTime<Utc>,
    pub last_accessed_at: DateTime<Utc>,
}

impl Session {
    pub(crate) fn new(id: SessionId, now: DateTime<Utc>) -> Self {
        Self {
            id,
            attributes: HashMap::new(),
            created_at: now,
            last_accessed_at: now,
        }
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    pub(crate) fn is_idle_since(&self, cutoff: DateTime<Utc>) -> bool {
        self.last_accessed_at < cutoff
    }
}
