//! Startup configuration for subdomain session sharing
//!
//! Values are read once from the environment and then handed to the
//! components that need them. Nothing re-reads the environment per request.

use thiserror::Error;

/// Parent domain applied to every cookie, e.g. `.mysite.localhost`.
/// Equivalent of `server.servlet.session.cookie.domain`. Required.
pub const ENV_SESSION_COOKIE_DOMAIN: &str = "SESSION_COOKIE_DOMAIN";
pub const ENV_SESSION_COOKIE_NAME: &str = "SESSION_COOKIE_NAME";
pub const ENV_SESSION_REDIRECT_URL: &str = "SESSION_REDIRECT_URL";
pub const ENV_SESSION_IDLE_TIMEOUT: &str = "SESSION_IDLE_TIMEOUT";
pub const ENV_SESSION_REAP_INTERVAL: &str = "SESSION_REAP_INTERVAL";
pub const ENV_PORT: &str = "PORT";

pub const DEFAULT_SESSION_COOKIE_NAME: &str = "SESSION";
pub const DEFAULT_REDIRECT_URL: &str = "http://sub.mysite.localhost";
/// 30 minutes
pub const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 1800;
pub const DEFAULT_REAP_INTERVAL_SECS: u64 = 60;
pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("Invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionShareConfig {
    /// Domain attribute for both the session cookie and the demo cookie
    pub cookie_domain: String,
    pub session_cookie_name: String,
    /// Where `/login` sends the browser afterwards
    pub redirect_url: String,
    pub idle_timeout_secs: u64,
    pub reap_interval_secs: u64,
    pub port: u16,
}

impl SessionShareConfig {
    /// Load the configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let cookie_domain = lookup(ENV_SESSION_COOKIE_DOMAIN)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::Missing(ENV_SESSION_COOKIE_DOMAIN))?;
        validate_cookie_domain(&cookie_domain)?;

        let session_cookie_name = lookup(ENV_SESSION_COOKIE_NAME)
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_SESSION_COOKIE_NAME.to_string());
        validate_cookie_name(&session_cookie_name)?;

        let redirect_url = lookup(ENV_SESSION_REDIRECT_URL)
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_REDIRECT_URL.to_string());

        let idle_timeout_secs = lookup(ENV_SESSION_IDLE_TIMEOUT)
            .and_then(|s| s.parse().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_IDLE_TIMEOUT_SECS);
        let reap_interval_secs = lookup(ENV_SESSION_REAP_INTERVAL)
            .and_then(|s| s.parse().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_REAP_INTERVAL_SECS);
        let port = lookup(ENV_PORT)
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        Ok(Self {
            cookie_domain,
            session_cookie_name,
            redirect_url,
            idle_timeout_secs,
            reap_interval_secs,
            port,
        })
    }
}

// The domain lands verbatim inside a Set-Cookie header, leading dot included.
fn validate_cookie_domain(domain: &str) -> Result<(), ConfigError> {
    let valid = domain
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-');
    if !valid || domain.trim_start_matches('.').is_empty() {
        return Err(ConfigError::Invalid {
            key: ENV_SESSION_COOKIE_DOMAIN,
            value: domain.to_string(),
        });
    }
    Ok(())
}

fn validate_cookie_name(name: &str) -> Result<(), ConfigError> {
    let valid = name
        .chars()
        .all(|c| c.is_ascii_graphic() && !"()<>@,;:\\\"/[]?={}".contains(c));
    if !valid {
        return Err(ConfigError::Invalid {
            key: ENV_SESSION_COOKIE_NAME,
            value: name.to_string(),
        });
    }
    Ok(())
}
