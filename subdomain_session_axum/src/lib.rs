//! subdomain_session_axum - Axum routes for the subdomain session sharing demo
//!
//! `GET /login` creates (or reuses) a session, stores a fresh random token in
//! it and redirects to a sibling subdomain. `GET /` reports whether the
//! session made it across.

mod error;
mod handlers;
mod router;
mod state;

pub use handlers::{DEMO_COOKIE_NAME, FAILURE_BODY, SUCCESS_PREFIX, ShareOutcome};
pub use router::{session_share_router, session_share_router_no_trace};
pub use state::AppState;

// Re-export the configuration and session types from subdomain_session crate
pub use subdomain_session::{ConfigError, SessionManager, SessionShareConfig};
