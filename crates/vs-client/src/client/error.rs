use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;
use vs_core::CoreError;
use vs_session::AuthRejection;

const UNREACHABLE_MESSAGE: &str =
    "Could not reach the server. Check your connection and try again.";
const SESSION_EXPIRED_MESSAGE: &str = "Your session has expired. Please sign in again.";
const UNEXPECTED_RESPONSE_MESSAGE: &str = "The server returned an unexpected response";

/// Errors that can occur during API calls
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP request error: {message} {location}")]
    Http {
        message: String,
        location: ErrorLocation,
        #[source]
        source: reqwest::Error,
    },

    #[error("API error: {message} (status: {status}) {location}")]
    Api {
        status: u16,
        message: String,
        location: ErrorLocation,
    },

    /// 401 from the backend: bad credentials at login, rejected token elsewhere
    #[error("Unauthorized: {} {location}", message.as_deref().unwrap_or("no detail"))]
    Unauthorized {
        message: Option<String>,
        location: ErrorLocation,
    },

    #[error("JSON parse error: {message} {location}")]
    Json {
        message: String,
        location: ErrorLocation,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid response: {message} {location}")]
    InvalidResponse {
        message: String,
        location: ErrorLocation,
    },
}

impl ClientError {
    /// Convert reqwest error with context
    #[track_caller]
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        ClientError::Http {
            message: err.to_string(),
            location: ErrorLocation::from(Location::caller()),
            source: err,
        }
    }

    /// Convert JSON error with context
    #[track_caller]
    pub fn from_json(err: serde_json::Error) -> Self {
        ClientError::Json {
            message: err.to_string(),
            location: ErrorLocation::from(Location::caller()),
            source: err,
        }
    }

    /// Create an API error with location
    #[track_caller]
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        ClientError::Api {
            status,
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn unauthorized(message: Option<String>) -> Self {
        ClientError::Unauthorized {
            message,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn invalid_response(message: impl Into<String>) -> Self {
        ClientError::InvalidResponse {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// HTTP status of a backend rejection.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Unauthorized { .. } => Some(401),
            Self::Http { source, .. } => source.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Text to show the user: the backend's own message when it sent one.
    pub fn user_message(&self) -> String {
        match self {
            Self::Api { message, .. } => message.clone(),
            Self::Unauthorized { message, .. } => message
                .clone()
                .unwrap_or_else(|| String::from(SESSION_EXPIRED_MESSAGE)),
            Self::Http { .. } => String::from(UNREACHABLE_MESSAGE),
            Self::Json { .. } | Self::InvalidResponse { .. } => {
                String::from(UNEXPECTED_RESPONSE_MESSAGE)
            }
        }
    }
}

impl AuthRejection for ClientError {
    fn is_authorization_rejected(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    fn user_message(&self) -> String {
        ClientError::user_message(self)
    }
}

impl From<reqwest::Error> for ClientError {
    #[track_caller]
    fn from(err: reqwest::Error) -> Self {
        ClientError::from_reqwest(err)
    }
}

impl From<serde_json::Error> for ClientError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        ClientError::from_json(err)
    }
}

impl From<CoreError> for ClientError {
    #[track_caller]
    fn from(err: CoreError) -> Self {
        ClientError::invalid_response(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
