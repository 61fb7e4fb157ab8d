use crate::models::registration::is_plausible_email;
use crate::{CoreError, Result as CoreErrorResult};

use serde::Serialize;

/// Owner-issued change to the personal profile fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.username.is_none()
            && self.email.is_none()
            && self.first_name.is_none()
            && self.last_name.is_none()
    }

    #[track_caller]
    pub fn validate(&self) -> CoreErrorResult<()> {
        if self.is_empty() {
            return Err(CoreError::validation("Nothing to update"));
        }
        if let Some(username) = &self.username
            && username.trim().is_empty()
        {
            return Err(CoreError::validation("Username cannot be blank"));
        }
        if let Some(email) = &self.email
            && !is_plausible_email(email.trim())
        {
            return Err(CoreError::validation(format!(
                "'{email}' is not a valid email address"
            )));
        }
        Ok(())
    }
}

/// Password change request.
#[derive(Clone, Serialize)]
pub struct PasswordChange {
    current_password: String,
    new_password: String,
}

impl PasswordChange {
    pub fn new(current_password: impl Into<String>, new_password: impl Into<String>) -> Self {
        Self {
            current_password: current_password.into(),
            new_password: new_password.into(),
        }
    }

    #[track_caller]
    pub fn validate(&self) -> CoreErrorResult<()> {
        if self.current_password.is_empty() {
            return Err(CoreError::validation("Current password is required"));
        }
        if self.new_password.is_empty() {
            return Err(CoreError::validation("New password is required"));
        }
        Ok(())
    }
}

impl std::fmt::Debug for PasswordChange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PasswordChange { .. }")
    }
}
