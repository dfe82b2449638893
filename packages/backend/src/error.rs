//! Error type for backend calls plus extraction of the service's own error
//! messages from response bodies.

use thiserror::Error;

/// A failed backend call. Every failure is terminal for its attempt — the
/// caller surfaces or logs it and moves on, never retries.
#[derive(Debug, Error)]
pub enum Error {
    /// The service answered with a non-success status. `message` is the
    /// service's own text where the body carried one.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// Transport-level failure (connection, TLS, request build).
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// The response body did not match the expected shape.
    #[error(transparent)]
    Decode(#[from] serde_json::Error),

    /// Missing or unusable backend configuration.
    #[error("backend not configured: {0}")]
    Config(String),

    /// An operation that needs a session was called without one.
    #[error("not signed in")]
    NoSession,
}

/// Build an [`Error::Api`] from a non-success response body.
///
/// The auth endpoints answer with `error_description` or `msg`; the table
/// and storage endpoints with `message` or `error`. Falls back to the HTTP
/// status when the body is opaque.
pub(crate) fn api_error(status: u16, body: &str) -> Error {
    let message = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            ["error_description", "msg", "message", "error"]
                .iter()
                .find_map(|key| value.get(key).and_then(|m| m.as_str()).map(str::to_string))
        })
        .unwrap_or_else(|| format!("request failed with status {status}"));
    Error::Api { status, message }
}

/// Pass a successful response through, turn anything else into [`Error::Api`].
pub(crate) async fn check(response: reqwest::Response) -> Result<reqwest::Response, Error> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(api_error(status.as_u16(), &body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_prefers_auth_dialect() {
        let err = api_error(400, r#"{"error_description":"Invalid login credentials"}"#);
        assert_eq!(err.to_string(), "Invalid login credentials");
    }

    #[test]
    fn test_api_error_reads_msg_field() {
        let err = api_error(422, r#"{"msg":"Signup requires a valid password"}"#);
        assert_eq!(err.to_string(), "Signup requires a valid password");
    }

    #[test]
    fn test_api_error_reads_table_dialect() {
        let err = api_error(
            409,
            r#"{"code":"23505","message":"duplicate key value violates unique constraint"}"#,
        );
        assert_eq!(
            err.to_string(),
            "duplicate key value violates unique constraint"
        );
    }

    #[test]
    fn test_api_error_falls_back_to_status() {
        let err = api_error(502, "<html>bad gateway</html>");
        assert_eq!(err.to_string(), "request failed with status 502");
        match err {
            Error::Api { status, .. } => assert_eq!(status, 502),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
