use std::panic::Location;
use std::result::Result as StdResult;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Validation error: {message} {location}")]
    Validation {
        message: String,
        location: ErrorLocation,
    },

    #[error("Invalid role: {value} {location}")]
    InvalidRole {
        value: String,
        location: ErrorLocation,
    },

    #[error("Incomplete response: {message} {location}")]
    IncompleteResponse {
        message: String,
        location: ErrorLocation,
    },
}

impl CoreError {
    /// Creates a Validation error at caller location.
    #[track_caller]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Creates an IncompleteResponse error at caller location.
    #[track_caller]
    pub fn incomplete_response(message: impl Into<String>) -> Self {
        Self::IncompleteResponse {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Text suitable for showing to the user (no source location).
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation { message, .. } => message.clone(),
            Self::InvalidRole { value, .. } => format!("Unknown role '{value}'"),
            Self::IncompleteResponse { .. } => {
                String::from("The server returned an unexpected response")
            }
        }
    }
}

pub type Result<T> = StdResult<T, CoreError>;
