//! subdomain_session - Server-side sessions shared across sibling subdomains
//!
//! A session id travels in a cookie scoped to a parent domain
//! (e.g. `.mysite.localhost`), so every subdomain of that domain sees the
//! same session. This crate holds the framework-independent parts: the
//! configuration, the session store, and the cookie serializer.

mod config;
mod cookie;
mod session;
mod storage;
mod utils;

pub use config::{
    ConfigError, DEFAULT_IDLE_TIMEOUT_SECS, DEFAULT_PORT, DEFAULT_REAP_INTERVAL_SECS,
    DEFAULT_REDIRECT_URL, DEFAULT_SESSION_COOKIE_NAME, ENV_PORT, ENV_SESSION_COOKIE_DOMAIN,
    ENV_SESSION_COOKIE_NAME, ENV_SESSION_IDLE_TIMEOUT, ENV_SESSION_REAP_INTERVAL,
    ENV_SESSION_REDIRECT_URL, SessionShareConfig,
};
pub use cookie::CookieSerializer;
pub use session::{RANDOM_ATTRIBUTE, Session, SessionError, SessionId, SessionManager};
pub use storage::{InMemorySessionStore, SessionStore};
pub use utils::{UtilError, gen_random_string, gen_random_token};
