use crate::{CoreError, Result as CoreErrorResult};

use serde::Serialize;

/// Username/password pair exchanged for a bearer token.
#[derive(Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    /// Rejects blank fields before anything goes over the wire.
    #[track_caller]
    pub fn validate(&self) -> CoreErrorResult<()> {
        if self.username.trim().is_empty() {
            return Err(CoreError::validation("Username is required"));
        }
        if self.password.is_empty() {
            return Err(CoreError::validation("Password is required"));
        }
        Ok(())
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}
