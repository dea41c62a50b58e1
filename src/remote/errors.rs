use reqwest::StatusCode;
use thiserror::Error;
use tracing::warn;

/// Failures talking to the hosted table. Callers treat all of them alike:
/// fall back to the local cache and show the tracker as offline.
#[derive(Debug, Clone, Error)]
pub enum RemoteError {
    #[error("Bad Request: {0}")]
    BadRequest(String),
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    #[error("Forbidden: {0}")]
    Forbidden(String),
    #[error("Not Found: {0}")]
    NotFound(String),
    #[error("Rate Limited: {0}")]
    RateLimited(String),
    #[error("Server Error ({0}): {1}")]
    ServerError(u16, String),
    #[error("HTTP Error ({0}): {1}")]
    HttpError(u16, String),
    #[error("Request Error: {0}")]
    RequestError(String),
    #[error("Deserialization Error: {0}")]
    DeserializationError(String),
    #[error("Invalid remote configuration: {0}")]
    InvalidConfig(String),
}

impl RemoteError {
    /// Maps a non-success status and its body to an error. PostgREST puts a
    /// human readable explanation in the `message` field of JSON bodies.
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|json| json.get("message").and_then(|value| value.as_str()).map(str::to_string))
            .unwrap_or_else(|| body.to_string());

        match status.as_u16() {
            400 => RemoteError::BadRequest(message),
            401 => RemoteError::Unauthorized(message),
            403 => RemoteError::Forbidden(message),
            404 => RemoteError::NotFound(message),
            429 => {
                warn!("Remote store is rate limiting requests");
                RemoteError::RateLimited(message)
            }
            code @ 500..=599 => {
                warn!("Remote store server error {code}: {message}");
                RemoteError::ServerError(code, message)
            }
            code => RemoteError::HttpError(code, message),
        }
    }
}
