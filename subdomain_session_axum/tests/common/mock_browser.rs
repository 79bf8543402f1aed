use axum::Router;
use axum::body::{Body, to_bytes};
use http::header::{COOKIE, HOST, SET_COOKIE};
use http::{HeaderMap, Method, Request, StatusCode};
use std::sync::Mutex;
use tower::ServiceExt;

#[derive(Debug, Clone)]
struct StoredCookie {
    name: String,
    value: String,
    /// Domain attribute without the leading dot; None for host-only cookies
    domain: Option<String>,
    host: String,
}

impl StoredCookie {
    fn matches_host(&self, host: &str) -> bool {
        match &self.domain {
            Some(domain) => host == domain || host.ends_with(&format!(".{domain}")),
            None => host == self.host,
        }
    }
}

/// Response data captured by the mock browser
pub struct BrowserResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl BrowserResponse {
    pub fn set_cookies(&self) -> Vec<String> {
        self.headers
            .get_all(SET_COOKIE)
            .iter()
            .map(|v| v.to_str().unwrap_or("").to_string())
            .collect()
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// Mock browser client for integration testing
///
/// Keeps a cookie jar with domain matching, so a cookie scoped to
/// `.mysite.localhost` is presented to `sub.mysite.localhost` but not to
/// unrelated hosts.
pub struct MockBrowser {
    app: Router,
    jar: Mutex<Vec<StoredCookie>>,
}

impl MockBrowser {
    pub fn new(app: Router) -> Self {
        Self {
            app,
            jar: Mutex::new(Vec::new()),
        }
    }

    /// Make a GET request to `path` on `host`, sending matching cookies
    pub async fn get(&self, host: &str, path: &str) -> BrowserResponse {
        let mut builder = Request::builder()
            .method(Method::GET)
            .uri(path)
            .header(HOST, host);
        if let Some(cookie_header) = self.cookie_header(host) {
            builder = builder.header(COOKIE, cookie_header);
        }
        let request = builder.body(Body::empty()).unwrap();

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();

        self.store_cookies(host, &headers);

        BrowserResponse {
            status,
            headers,
            body: String::from_utf8(bytes.to_vec()).unwrap(),
        }
    }

    /// Current value of a cookie held in the jar
    pub fn cookie(&self, name: &str) -> Option<String> {
        self.jar
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.value.clone())
    }

    /// Put a cookie straight into the jar, as if a previous response had set it
    pub fn insert_cookie(&self, name: &str, value: &str, domain: &str) {
        let mut jar = self.jar.lock().unwrap();
        jar.retain(|c| c.name != name);
        jar.push(StoredCookie {
            name: name.to_string(),
            value: value.to_string(),
            domain: Some(domain.trim_start_matches('.').to_string()),
            host: String::new(),
        });
    }

    fn cookie_header(&self, host: &str) -> Option<String> {
        let jar = self.jar.lock().unwrap();
        let pairs: Vec<String> = jar
            .iter()
            .filter(|c| c.matches_host(host))
            .map(|c| format!("{}={}", c.name, c.value))
            .collect();
        (!pairs.is_empty()).then(|| pairs.join("; "))
    }

    fn store_cookies(&self, host: &str, headers: &HeaderMap) {
        let mut jar = self.jar.lock().unwrap();
        for value in headers.get_all(SET_COOKIE) {
            let Ok(set_cookie) = value.to_str() else {
                continue;
            };
            let mut parts = set_cookie.split(';').map(str::trim);
            let Some((name, value)) = parts.next().and_then(|p| p.split_once('=')) else {
                continue;
            };
            let domain = parts
                .filter_map(|attr| attr.split_once('='))
                .find(|(k, _)| k.eq_ignore_ascii_case("domain"))
                .map(|(_, v)| v.trim_start_matches('.').to_ascii_lowercase());

            jar.retain(|c| c.name != name);
            jar.push(StoredCookie {
                name: name.to_string(),
                value: value.to_string(),
                domain,
                host: host.to_string(),
            });
        }
    }
}
