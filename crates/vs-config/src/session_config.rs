use crate::{ConfigError, ConfigErrorResult, DEFAULT_SESSION_DIRECTORY};

use std::path::Path;

use serde::Deserialize;
use vs_core::{DEFAULT_LANDING_PATH, DEFAULT_SIGN_IN_PATH};

/// Persisted session location and the navigation targets used by route guards.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Directory holding the token and identity slots, relative to the config dir
    pub dir: String,
    /// Where unauthenticated visitors of protected locations are sent
    pub sign_in_path: String,
    /// Where signed-in users land when a location is not for them
    pub landing_path: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            dir: String::from(DEFAULT_SESSION_DIRECTORY),
            sign_in_path: String::from(DEFAULT_SIGN_IN_PATH),
            landing_path: String::from(DEFAULT_LANDING_PATH),
        }
    }
}

impl SessionConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.dir.trim().is_empty() {
            return Err(ConfigError::session("session.dir cannot be empty"));
        }

        // Keep session files inside the config dir
        if Path::new(&self.dir).is_absolute() || self.dir.contains("..") {
            return Err(ConfigError::session(
                "session.dir must be relative and cannot contain '..'",
            ));
        }

        for (name, value) in [
            ("session.sign_in_path", &self.sign_in_path),
            ("session.landing_path", &self.landing_path),
        ] {
            if !value.starts_with('/') {
                return Err(ConfigError::session(format!(
                    "{name} must start with '/', got '{value}'"
                )));
            }
        }

        if self.sign_in_path == self.landing_path {
            return Err(ConfigError::session(
                "session.sign_in_path and session.landing_path must differ",
            ));
        }

        Ok(())
    }
}
