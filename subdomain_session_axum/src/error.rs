use http::StatusCode;
use subdomain_session::SessionError;

/// Helper trait for converting errors to a response status
///
/// Failures never leak into the body: the client gets a bare status code and
/// the details go to the log.
pub(super) trait IntoResponseError<T> {
    fn into_response_error(self) -> Result<T, StatusCode>;
}

impl<T> IntoResponseError<T> for Result<T, SessionError> {
    fn into_response_error(self) -> Result<T, StatusCode> {
        self.map_err(|e| {
            tracing::error!("Session operation failed: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use subdomain_session::UtilError;

    #[test]
    fn test_store_unavailable_is_internal_error() {
        let result: Result<(), SessionError> =
            Err(SessionError::StoreUnavailable("down".to_string()));

        assert_eq!(
            result.into_response_error(),
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        );
    }

    #[test]
    fn test_cookie_and_utils_errors_are_internal_errors() {
        let result: Result<(), SessionError> = Err(SessionError::Cookie("bad".to_string()));
        assert_eq!(
            result.into_response_error(),
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        );

        let result: Result<(), SessionError> =
            Err(UtilError::Crypto("rng".to_string()).into());
        assert_eq!(
            result.into_response_error(),
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        );
    }

    #[test]
    fn test_success_case() {
        let result: Result<String, SessionError> = Ok("Success".to_string());
        assert_eq!(result.into_response_error(), Ok("Success".to_string()));
    }
}
