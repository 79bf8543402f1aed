use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use http::header::{CONTENT_TYPE, HeaderMap, LOCATION, SET_COOKIE};
use http::{HeaderValue, Method, StatusCode};

use subdomain_session::{RANDOM_ATTRIBUTE, gen_random_token};

use super::error::IntoResponseError;
use super::state::AppState;

/// Cookie reporting the outcome of `GET /`. Informational only.
pub const DEMO_COOKIE_NAME: &str = "mycookie";

/// Body prefix when the session made it across, followed by the token
pub const SUCCESS_PREFIX: &str = "세션공유 성공 : ";
pub const FAILURE_BODY: &str = "세션공유 실패!!";

const TEXT_PLAIN_UTF_8: &str = "text/plain; charset=UTF-8";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareOutcome {
    Success,
    Fail,
}

impl ShareOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShareOutcome::Success => "success",
            ShareOutcome::Fail => "fail",
        }
    }
}

// axum routes HEAD to GET handlers; neither endpoint answers it.
fn require_get(method: &Method) -> Result<(), StatusCode> {
    if *method == Method::GET {
        Ok(())
    } else {
        tracing::debug!("Rejecting {} request", method);
        Err(StatusCode::METHOD_NOT_ALLOWED)
    }
}

/// `GET /login`: bind a session, refresh its token, send the browser to the sibling host.
pub(crate) async fn login(
    State(state): State<AppState>,
    method: Method,
    headers: HeaderMap,
) -> Result<Response, StatusCode> {
    require_get(&method)?;

    let (session, created) = state
        .sessions
        .get_or_create(&headers)
        .await
        .into_response_error()?;

    // Overwritten on every login, so the endpoint is not idempotent.
    state
        .sessions
        .set_attribute(&session, RANDOM_ATTRIBUTE, gen_random_token())
        .await
        .into_response_error()?;

    let mut response_headers = HeaderMap::new();
    state
        .sessions
        .cookies()
        .set_session_cookie(&mut response_headers, &session.id)
        .into_response_error()?;
    response_headers.insert(LOCATION, state.redirect_location.clone());

    tracing::debug!(
        "Login with {} session {:?}, redirecting to {}",
        if created { "new" } else { "existing" },
        session.id,
        state.config.redirect_url
    );

    Ok((StatusCode::FOUND, response_headers).into_response())
}

/// `GET /`: report whether the request carries a live session.
pub(crate) async fn index(
    State(state): State<AppState>,
    method: Method,
    headers: HeaderMap,
) -> Result<Response, StatusCode> {
    require_get(&method)?;

    let random = match state
        .sessions
        .get_if_exists(&headers)
        .await
        .into_response_error()?
    {
        Some(session) => {
            let random = state
                .sessions
                .get_attribute(&session, RANDOM_ATTRIBUTE)
                .await
                .into_response_error()?
                .filter(|r| !r.is_empty());
            if random.is_none() {
                tracing::warn!("Session {:?} has no '{}' attribute", session.id, RANDOM_ATTRIBUTE);
            }
            random
        }
        None => None,
    };

    let (outcome, body) = match random {
        Some(random) => (ShareOutcome::Success, format!("{SUCCESS_PREFIX}{random}")),
        None => (ShareOutcome::Fail, FAILURE_BODY.to_string()),
    };
    tracing::debug!("Session sharing outcome: {}", outcome.as_str());

    let mut response_headers = HeaderMap::new();
    response_headers.insert(CONTENT_TYPE, HeaderValue::from_static(TEXT_PLAIN_UTF_8));
    response_headers.append(
        SET_COOKIE,
        state
            .sessions
            .cookies()
            .encode_cookie(DEMO_COOKIE_NAME, outcome.as_str(), false)
            .into_response_error()?,
    );

    Ok((StatusCode::OK, response_headers, body).into_response())
}
