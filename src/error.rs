use http::StatusCode;
use thiserror::Error;

/// Environment variable consulted when no API key is passed explicitly.
pub const API_KEY_ENV: &str = "CLYDE_API_KEY";

/// Errors raised by the Clyde AI client.
///
/// HTTP failures are classified by status code; anything unrecognized, and
/// failures that never produced a response, end up in `Unexpected`.
#[derive(Debug, Error)]
pub enum ClydeError {
    #[error("{0}")]
    Configuration(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Authentication error with Clyde AI API")]
    Authentication,

    #[error("Clyde AI API rate limit exceeded")]
    RateLimit,

    #[error("Failed to connect to Clyde AI API")]
    Connection,

    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

impl ClydeError {
    pub fn missing_api_key() -> Self {
        ClydeError::Configuration(format!(
            "No API key provided. Set it as an environment variable {API_KEY_ENV} or pass it to the ClydeClient constructor."
        ))
    }

    /// Classify a non-success reply. `body` is the raw reply text; only the
    /// invalid-request variant keeps it.
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        match status {
            StatusCode::BAD_REQUEST => ClydeError::InvalidRequest(body.to_string()),
            StatusCode::UNAUTHORIZED => ClydeError::Authentication,
            StatusCode::SERVICE_UNAVAILABLE => ClydeError::Connection,
            StatusCode::TOO_MANY_REQUESTS => ClydeError::RateLimit,
            other => ClydeError::Unexpected(format!(
                "{} {} for url returned by Clyde AI API: {}",
                other.as_u16(),
                other.canonical_reason().unwrap_or("Unknown Status"),
                body
            )),
        }
    }
}

impl From<reqwest::Error> for ClydeError {
    fn from(error: reqwest::Error) -> Self {
        ClydeError::Unexpected(error.to_string())
    }
}
