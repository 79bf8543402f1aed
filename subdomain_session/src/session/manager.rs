use chrono::{DateTime, Duration, Utc};
use http::HeaderMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::config::SessionShareConfig;
use crate::cookie::CookieSerializer;
use crate::session::errors::SessionError;
use crate::session::types::{Session, SessionId};
use crate::storage::{InMemorySessionStore, SessionStore};

/// Request-facing session operations.
///
/// Cloning is cheap: clones share the same store.
#[derive(Clone)]
pub struct SessionManager {
    store: Arc<Mutex<Box<dyn SessionStore>>>,
    cookies: CookieSerializer,
    idle_timeout: Duration,
}

impl SessionManager {
    pub fn new(
        store: Box<dyn SessionStore>,
        cookies: CookieSerializer,
        idle_timeout: Duration,
    ) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            cookies,
            idle_timeout,
        }
    }

    /// In-memory manager configured from `config`.
    pub fn in_memory(config: &SessionShareConfig) -> Self {
        let idle_timeout = i64::try_from(config.idle_timeout_secs)
            .ok()
            .and_then(Duration::try_seconds)
            .unwrap_or(Duration::MAX);
        Self::new(
            Box::new(InMemorySessionStore::new()),
            CookieSerializer::from(config),
            idle_timeout,
        )
    }

    pub fn cookies(&self) -> &CookieSerializer {
        &self.cookies
    }

    fn idle_cutoff(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now.checked_sub_signed(self.idle_timeout)
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    // Caller holds the store lock, so the idle check and the touch are atomic.
    async fn touch_live(
        &self,
        store: &mut dyn SessionStore,
        id: &SessionId,
        now: DateTime<Utc>,
    ) -> Result<Option<Session>, SessionError> {
        let Some(session) = store.get(id).await? else {
            tracing::debug!("Session {:?} is unknown to this process", id);
            return Ok(None);
        };

        if session.is_idle_since(self.idle_cutoff(now)) {
            tracing::debug!(
                "Session {:?} idle since {}, dropping it",
                id,
                session.last_accessed_at
            );
            store.remove(id).await?;
            return Ok(None);
        }

        store.touch(id, now).await
    }

    /// Return the session bound to the request, creating one if none is bound.
    ///
    /// The boolean is true when a new session was created.
    #[tracing::instrument(skip_all)]
    pub async fn get_or_create(&self, headers: &HeaderMap) -> Result<(Session, bool), SessionError> {
        let now = Utc::now();
        let mut store = self.store.lock().await;

        if let Some(id) = self.cookies.decode(headers) {
            if let Some(session) = self.touch_live(&mut **store, &id, now).await? {
                tracing::debug!("Reusing session {:?}", session.id);
                return Ok((session, false));
            }
        }

        loop {
            let session = Session::new(SessionId::generate()?, now);
            if store.put_if_not_exists(session.clone()).await? {
                tracing::debug!("Created session {:?}", session.id);
                return Ok((session, true));
            }
            tracing::warn!("Session id collision, regenerating");
        }
    }

    /// Return the session bound to the request without creating one.
    #[tracing::instrument(skip_all)]
    pub async fn get_if_exists(&self, headers: &HeaderMap) -> Result<Option<Session>, SessionError> {
        let Some(id) = self.cookies.decode(headers) else {
            return Ok(None);
        };
        let mut store = self.store.lock().await;
        self.touch_live(&mut **store, &id, Utc::now()).await
    }

    /// Store `value` under `key`. Writing to an invalidated session is a no-op.
    pub async fn set_attribute(
        &self,
        session: &Session,
        key: &str,
        value: impl Into<String>,
    ) -> Result<(), SessionError> {
        let updated = self
            .store
            .lock()
            .await
            .set_attribute(&session.id, key, value.into())
            .await?;
        if !updated {
            tracing::debug!("Session {:?} vanished before '{}' was set", session.id, key);
        }
        Ok(())
    }

    /// Current value of `key`, read from the store rather than the snapshot.
    pub async fn get_attribute(
        &self,
        session: &Session,
        key: &str,
    ) -> Result<Option<String>, SessionError> {
        let stored = self.store.lock().await.get(&session.id).await?;
        Ok(stored.and_then(|s| s.attributes.get(key).cloned()))
    }

    pub async fn invalidate(&self, session: &Session) -> Result<(), SessionError> {
        self.store.lock().await.remove(&session.id).await?;
        tracing::debug!("Invalidated session {:?}", session.id);
        Ok(())
    }

    /// Remove sessions idle for longer than the idle timeout.
    pub async fn reap_idle(&self) -> Result<usize, SessionError> {
        let cutoff = self.idle_cutoff(Utc::now());
        self.store.lock().await.remove_idle(cutoff).await
    }

    pub async fn session_count(&self) -> Result<usize, SessionError> {
        self.store.lock().await.count().await
    }

    /// Run [`Self::reap_idle`] every `every` on a background task.
    pub fn spawn_reaper(&self, every: std::time::Duration) -> JoinHandle<()> {
        let manager = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            // The first tick completes immediately.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                match manager.reap_idle().await {
                    Ok(0) => {}
                    Ok(removed) => tracing::info!("Reaped {} idle sessions", removed),
                    Err(e) => tracing::error!("Failed to reap idle sessions: {}", e),
                }
            }
        })
    }
}
