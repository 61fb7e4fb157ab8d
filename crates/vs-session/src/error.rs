use crate::AuthRejection;
use crate::storage::error::StorageError;

use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;
use vs_core::CoreError;

/// Failure of a session operation.
///
/// `Backend` carries the collaborator's error untouched.
#[derive(Error, Debug)]
pub enum SessionError<E>
where
    E: std::error::Error + 'static,
{
    #[error(transparent)]
    Backend(E),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Session storage failed: {source} {location}")]
    Storage {
        #[source]
        source: StorageError,
        location: ErrorLocation,
    },

    #[error("No active session {location}")]
    NotAuthenticated { location: ErrorLocation },

    #[error("Session ended before the response arrived {location}")]
    SessionEnded { location: ErrorLocation },
}

impl<E> SessionError<E>
where
    E: std::error::Error + 'static,
{
    /// Creates Storage error at caller location.
    #[track_caller]
    pub fn storage(source: StorageError) -> Self {
        Self::Storage {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Creates NotAuthenticated error at caller location.
    #[track_caller]
    pub fn not_authenticated() -> Self {
        Self::NotAuthenticated {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Creates SessionEnded error at caller location.
    #[track_caller]
    pub fn session_ended() -> Self {
        Self::SessionEnded {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    pub fn backend(&self) -> Option<&E> {
        match self {
            Self::Backend(e) => Some(e),
            _ => None,
        }
    }
}

impl<E> AuthRejection for SessionError<E>
where
    E: std::error::Error + AuthRejection + 'static,
{
    fn is_authorization_rejected(&self) -> bool {
        match self {
            Self::Backend(e) => e.is_authorization_rejected(),
            _ => false,
        }
    }

    fn user_message(&self) -> String {
        match self {
            Self::Backend(e) => e.user_message(),
            Self::Core(e) => e.user_message(),
            Self::Storage { source, .. } => source.recovery_hint().to_string(),
            Self::NotAuthenticated { .. } => String::from("You are not signed in"),
            Self::SessionEnded { .. } => {
                String::from("Your session ended before the change was saved")
            }
        }
    }
}

pub type Result<T, E> = std::result::Result<T, SessionError<E>>;
