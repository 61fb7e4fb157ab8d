use crate::{BearerToken, CoreError, LoginPayload, Result as CoreErrorResult, Role, UserRecord};

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// The signed-in user's client-side record, credential included.
///
/// Timestamps are kept exactly as received so that a persisted identity
/// restores byte-for-byte.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_login: Option<String>,
    pub created_at: String,
    pub token: BearerToken,
}

impl Identity {
    /// Builds the identity from a login response.
    ///
    /// The backend must return the user record alongside the token; a bare
    /// token is rejected. `login_username` fills in an email the backend
    /// omitted.
    #[track_caller]
    pub fn from_login(payload: LoginPayload, login_username: &str) -> CoreErrorResult<Self> {
        if payload.access_token.is_empty() {
            return Err(CoreError::incomplete_response(
                "login response carried an empty access token",
            ));
        }

        let Some(user) = payload.user else {
            return Err(CoreError::incomplete_response(
                "login response carried no user record",
            ));
        };

        let role = user.role();
        let UserRecord {
            id,
            username,
            email,
            first_name,
            last_name,
            profile_picture,
            last_login,
            created_at,
            ..
        } = user;

        Ok(Self {
            id,
            username: non_empty(Some(username)).unwrap_or_else(|| login_username.to_string()),
            email: non_empty(email).unwrap_or_else(|| login_username.to_string()),
            role,
            first_name: non_empty(first_name),
            last_name: non_empty(last_name),
            avatar_url: non_empty(profile_picture),
            last_login: non_empty(last_login),
            created_at: non_empty(created_at)
                .unwrap_or_else(|| Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
            token: payload.access_token,
        })
    }

    /// Applies a profile response from the backend.
    ///
    /// Only present, non-empty fields replace stored values; id, role,
    /// credential and timestamps are left alone. Returns whether anything
    /// changed.
    pub fn merge_profile(&mut self, record: &UserRecord) -> bool {
        let before = self.clone();

        if let Some(username) = non_empty(Some(record.username.clone())) {
            self.username = username;
        }
        if let Some(email) = non_empty(record.email.clone()) {
            self.email = email;
        }
        if let Some(first_name) = non_empty(record.first_name.clone()) {
            self.first_name = Some(first_name);
        }
        if let Some(last_name) = non_empty(record.last_name.clone()) {
            self.last_name = Some(last_name);
        }
        if let Some(avatar_url) = non_empty(record.profile_picture.clone()) {
            self.avatar_url = Some(avatar_url);
        }

        *self != before
    }

    pub fn has_any_role(&self, roles: &[Role]) -> bool {
        roles.contains(&self.role)
    }

    /// "First Last" when known, otherwise the username.
    pub fn display_name(&self) -> String {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => format!("{first} {last}"),
            (Some(first), None) => first.clone(),
            (None, Some(last)) => last.clone(),
            (None, None) => self.username.clone(),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
