use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Backend returned {status}: {message}")]
    Api { status: StatusCode, message: String },

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

pub type BackendResult<T> = Result<T, BackendError>;

impl BackendError {
    /// Message suitable for showing to staff, when the backend supplied one.
    pub fn api_message(&self) -> Option<&str> {
        match self {
            BackendError::Api { message, .. } if !message.is_empty() => Some(message),
            _ => None,
        }
    }

    /// Builds an [`BackendError::Api`] from a non-success response body.
    ///
    /// The backend reports failures as `{"error": "..."}`; anything else is
    /// passed through verbatim, falling back to the status reason.
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        #[derive(Deserialize)]
        struct ErrorBody {
            error: String,
        }

        let message = match serde_json::from_str::<ErrorBody>(body) {
            Ok(parsed) => parsed.error,
            Err(_) if !body.trim().is_empty() => body.trim().to_string(),
            Err(_) => status
                .canonical_reason()
                .unwrap_or("Unknown error")
                .to_string(),
        };

        BackendError::Api { status, message }
    }
}

impl From<reqwest::Error> for BackendError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            BackendError::Decode(err.to_string())
        } else if err.is_builder() {
            BackendError::InvalidRequest(err.to_string())
        } else {
            BackendError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for BackendError {
    fn from(err: serde_json::Error) -> Self {
        BackendError::Decode(err.to_string())
    }
}
