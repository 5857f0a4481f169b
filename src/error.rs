//! Error handling for curly

use crate::http::Response;
use thiserror::Error;

/// Main error type for curly operations
#[derive(Error, Debug)]
pub enum CurlyError {
    #[error("invalid argument: {0}")]
    Config(String),

    #[error("invalid state: {0}")]
    State(String),

    #[error("redirect loop detected after {0} redirects")]
    RedirectLoop(u32),

    #[error("request failed: {message}")]
    FailedRequest {
        message: String,
        status: Option<u16>,
    },

    #[error("bad response status: {status}")]
    BadStatus { status: u16, response: Box<Response> },

    #[error("protocol error: {0}")]
    Protocol(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CurlyError {
    /// The response attached to a bad-status failure, if any.
    pub fn response(&self) -> Option<&Response> {
        match self {
            CurlyError::BadStatus { response, .. } => Some(response),
            _ => None,
        }
    }

    /// The HTTP status code associated with the failure, if one was seen.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            CurlyError::BadStatus { status, .. } => Some(*status),
            CurlyError::FailedRequest { status, .. } => *status,
            _ => None,
        }
    }
}

/// Result type alias for curly operations
pub type Result<T> = std::result::Result<T, CurlyError>;
