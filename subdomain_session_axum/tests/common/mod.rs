pub mod mock_browser;

pub use mock_browser::MockBrowser;

use subdomain_session_axum::{AppState, SessionShareConfig};

pub const COOKIE_DOMAIN: &str = ".mysite.localhost";
pub const REDIRECT_URL: &str = "http://sub.mysite.localhost";

/// Initialize tracing for tests, honoring RUST_LOG
pub fn init_test_tracing() {
    use std::sync::Once;
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init()
            .ok(); // Ignore errors if already initialized
    });
}

/// Fresh state with the in-memory store, as the demo binary builds it
pub fn test_state() -> AppState {
    init_test_tracing();
    let config = SessionShareConfig::from_lookup(|key| match key {
        "SESSION_COOKIE_DOMAIN" => Some(COOKIE_DOMAIN.to_string()),
        "SESSION_REDIRECT_URL" => Some(REDIRECT_URL.to_string()),
        _ => None,
    })
    .expect("test configuration is valid");
    AppState::in_memory(config).expect("test state builds")
}
