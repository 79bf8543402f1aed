use std::time::Duration;

use subdomain_session_axum::{AppState, SessionShareConfig, session_share_router};

mod server;

use crate::server::{ServerError, bind_http, init_tracing, serve_http};

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    dotenvy::dotenv().ok();
    init_tracing("demo_subdomain");

    let config = SessionShareConfig::from_env().inspect_err(|e| {
        tracing::error!("Startup failed: {}", e);
    })?;
    tracing::info!(
        "Session cookie '{}' scoped to domain '{}', /login redirects to {}",
        config.session_cookie_name,
        config.cookie_domain,
        config.redirect_url
    );

    let port = config.port;
    let reap_interval = Duration::from_secs(config.reap_interval_secs);
    let state = AppState::in_memory(config)?;
    let reaper = state.sessions.spawn_reaper(reap_interval);

    let app = session_share_router(state);
    let listener = bind_http(port).await.inspect_err(|e| {
        tracing::error!("Startup failed: {}", e);
    })?;

    let result = serve_http(listener, app).await;
    reaper.abort();
    tracing::info!("Server stopped");
    result
}
