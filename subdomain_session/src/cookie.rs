use http::HeaderValue;
use http::header::{COOKIE, HeaderMap, SET_COOKIE};

use crate::config::SessionShareConfig;
use crate::session::{SessionError, SessionId};

/// Moves session ids between the session store and the cookie headers.
///
/// Every cookie it writes carries `Domain=<cookie_domain>; Path=/`, so the
/// browser presents it to all subdomains of the configured parent domain.
#[derive(Debug, Clone)]
pub struct CookieSerializer {
    cookie_name: String,
    cookie_domain: String,
}

impl CookieSerializer {
    pub fn new(cookie_name: impl Into<String>, cookie_domain: impl Into<String>) -> Self {
        Self {
            cookie_name: cookie_name.into(),
            cookie_domain: cookie_domain.into(),
        }
    }

    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    pub fn cookie_domain(&self) -> &str {
        &self.cookie_domain
    }

    /// Extract the session id from the request's `Cookie` headers.
    ///
    /// The first non-empty value under the session cookie name wins.
    /// Headers that are not valid UTF-8 and pairs without `=` are skipped.
    pub fn decode(&self, headers: &HeaderMap) -> Option<SessionId> {
        let session_id = headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|value| match value.to_str() {
                Ok(s) => Some(s),
                Err(e) => {
                    tracing::debug!("Skipping malformed cookie header: {}", e);
                    None
                }
            })
            .flat_map(|cookie_str| cookie_str.split(';'))
            .find_map(|pair| {
                let mut parts = pair.trim().splitn(2, '=');
                match (parts.next(), parts.next()) {
                    (Some(k), Some(v)) if k.trim() == self.cookie_name && !v.is_empty() => {
                        Some(SessionId::new(v))
                    }
                    _ => None,
                }
            });

        if session_id.is_none() {
            tracing::debug!("No session cookie '{}' found in cookies", self.cookie_name);
        }
        session_id
    }

    /// `Set-Cookie` value binding `session_id` to the parent domain.
    pub fn encode(&self, session_id: &SessionId) -> Result<HeaderValue, SessionError> {
        self.encode_cookie(&self.cookie_name, session_id.as_str(), true)
    }

    /// `Set-Cookie` value for an arbitrary cookie scoped like the session cookie.
    pub fn encode_cookie(
        &self,
        name: &str,
        value: &str,
        http_only: bool,
    ) -> Result<HeaderValue, SessionError> {
        let mut cookie = format!("{name}={value}; Domain={}; Path=/", self.cookie_domain);
        if http_only {
            cookie.push_str("; HttpOnly");
        }
        cookie
            .parse()
            .map_err(|_| SessionError::Cookie("Failed to parse cookie".to_string()))
    }

    /// Append the session `Set-Cookie` header to `headers`.
    pub fn set_session_cookie(
        &self,
        headers: &mut HeaderMap,
        session_id: &SessionId,
    ) -> Result<(), SessionError> {
        headers.append(SET_COOKIE, self.encode(session_id)?);
        Ok(())
    }
}

impl From<&SessionShareConfig> for CookieSerializer {
    fn from(config: &SessionShareConfig) -> Self {
        Self::new(
            config.session_cookie_name.clone(),
            config.cookie_domain.clone(),
        )
    }
}
