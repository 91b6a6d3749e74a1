// Client-side error taxonomy. Every error here is locally recoverable:
// storage problems degrade to an unauthenticated session, lookup failures
// degrade to a placeholder label, and only explicit login attempts surface
// a message to the user.
use std::path::PathBuf;

use thiserror::Error;

/// Credential storage errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("credential storage unavailable: {0}")]
    Unavailable(String),

    #[error("failed to access '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Session lifecycle errors, raised by explicit `login`/`logout` transitions.
///
/// `init` never raises: any failure there is logged and collapsed into the
/// unauthenticated state.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Storage(#[from] StoreError),

    #[error("failed to serialize user profile: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// API client errors as surfaced to callers.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-success HTTP status with the server's `{error|message}` payload
    /// when present, else a generic failure string.
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl ClientError {
    /// Build an `Api` error from a status code and response body, preferring
    /// a string `error` field, then `message`, then a generic fallback.
    pub fn from_status(status: u16, body: &serde_json::Value) -> Self {
        let message = body
            .get("error")
            .and_then(serde_json::Value::as_str)
            .or_else(|| body.get("message").and_then(serde_json::Value::as_str))
            .map(str::to_string)
            .unwrap_or_else(|| format!("HTTP {}", status));

        ClientError::Api { status, message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn api_error_prefers_error_field() {
        let err = ClientError::from_status(401, &json!({ "error": "credenciais invalidas" }));
        assert_eq!(err.to_string(), "credenciais invalidas");
    }

    #[test]
    fn api_error_falls_back_to_message_field() {
        let err = ClientError::from_status(500, &json!({ "message": "erro interno" }));
        assert_eq!(err.to_string(), "erro interno");
    }

    #[test]
    fn api_error_ignores_non_string_error_field() {
        // Some backends send `"error": true` alongside `message`.
        let err = ClientError::from_status(404, &json!({ "error": true, "message": "nao encontrado" }));
        assert_eq!(err.to_string(), "nao encontrado");
    }

    #[test]
    fn api_error_generic_when_body_unhelpful() {
        let err = ClientError::from_status(502, &json!({ "detail": 42 }));
        assert_eq!(err.to_string(), "HTTP 502");
    }
}
