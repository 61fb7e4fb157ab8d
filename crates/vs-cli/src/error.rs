use std::panic::Location;
use std::path::PathBuf;

use error_location::ErrorLocation;
use thiserror::Error;
use vs_client::ClientError;
use vs_config::ConfigError;
use vs_core::CoreError;
use vs_session::{AuthRejection, SessionError};

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Logger initialization failed: {message} {location}")]
    Logging {
        message: String,
        location: ErrorLocation,
    },

    #[error(transparent)]
    Session(#[from] SessionError<ClientError>),

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Failed to read {path}: {source} {location}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },

    #[error("Failed to serialize output: {source} {location}")]
    Output {
        #[source]
        source: serde_json::Error,
        location: ErrorLocation,
    },
}

impl CliError {
    #[track_caller]
    pub fn logging(message: impl Into<String>) -> Self {
        Self::Logging {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn io(path: PathBuf, source: std::io::Error) -> Self {
        Self::Io {
            path,
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn output(source: serde_json::Error) -> Self {
        Self::Output {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Text for the terminal, without source locations.
    pub fn user_message(&self) -> String {
        match self {
            Self::Session(e) => e.user_message(),
            Self::Client(e) => e.user_message(),
            Self::Core(e) => e.user_message(),
            Self::Io { path, .. } => format!("Could not read {}", path.display()),
            Self::Config(_) | Self::Logging { .. } | Self::Output { .. } => self.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CliError>;
