use http::HeaderValue;
use std::sync::Arc;

use subdomain_session::{ConfigError, ENV_SESSION_REDIRECT_URL, SessionManager, SessionShareConfig};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub sessions: SessionManager,
    pub config: Arc<SessionShareConfig>,
    pub(crate) redirect_location: HeaderValue,
}

impl AppState {
    /// Fails if `config.redirect_url` cannot be sent as a `Location` header.
    pub fn new(config: SessionShareConfig, sessions: SessionManager) -> Result<Self, ConfigError> {
        let redirect_location =
            HeaderValue::from_str(&config.redirect_url).map_err(|_| ConfigError::Invalid {
                key: ENV_SESSION_REDIRECT_URL,
                value: config.redirect_url.clone(),
            })?;

        Ok(Self {
            sessions,
            config: Arc::new(config),
            redirect_location,
        })
    }

    /// State backed by the in-memory session store.
    pub fn in_memory(config: SessionShareConfig) -> Result<Self, ConfigError> {
        let sessions = SessionManager::in_memory(&config);
        Self::new(config, sessions)
    }
}
