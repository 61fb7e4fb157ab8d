use crate::Role;
use crate::models::wire::{lenient_role_id, string_or_number};

use serde::{Deserialize, Serialize};

/// User as the backend reports it (login, profile and admin endpoints).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_role_id")]
    pub role_id: Option<i64>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub profile_picture: Option<String>,
    #[serde(default)]
    pub last_login: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl UserRecord {
    /// Role derived from `role_id`; consumer when absent or unknown.
    pub fn role(&self) -> Role {
        self.role_id.map(Role::from_role_id).unwrap_or_default()
    }
}
