use crate::{CoreError, Result as CoreErrorResult};

use std::panic::Location;
use std::str::FromStr;

use error_location::ErrorLocation;
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

/// Wire id the backend uses for [`Role::Creator`].
pub const CREATOR_ROLE_ID: i64 = 1;
/// Wire id the backend uses for [`Role::Consumer`].
pub const CONSUMER_ROLE_ID: i64 = 2;
/// Wire id the backend uses for [`Role::Admin`].
pub const ADMIN_ROLE_ID: i64 = 3;

/// Access role of an identity.
///
/// Unknown or missing source values always collapse to [`Role::Consumer`],
/// the lowest privilege.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Watches videos
    #[default]
    Consumer,
    /// Publishes videos and albums
    Creator,
    /// Moderates users, videos and reports
    Admin,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Consumer, Role::Creator, Role::Admin];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Consumer => "consumer",
            Self::Creator => "creator",
            Self::Admin => "admin",
        }
    }

    /// Maps a backend role id. Anything outside the known ids is a consumer.
    pub fn from_role_id(role_id: i64) -> Self {
        match role_id {
            CREATOR_ROLE_ID => Self::Creator,
            CONSUMER_ROLE_ID => Self::Consumer,
            ADMIN_ROLE_ID => Self::Admin,
            _ => Self::Consumer,
        }
    }

    pub fn role_id(&self) -> i64 {
        match self {
            Self::Creator => CREATOR_ROLE_ID,
            Self::Consumer => CONSUMER_ROLE_ID,
            Self::Admin => ADMIN_ROLE_ID,
        }
    }

    /// Roles a visitor may pick for themselves when signing up.
    pub fn is_self_assignable(&self) -> bool {
        matches!(self, Self::Consumer | Self::Creator)
    }

    /// Parses a role name, falling back to consumer instead of failing.
    pub fn parse_lenient(value: &str) -> Self {
        Self::from_str(value).unwrap_or_default()
    }
}

impl FromStr for Role {
    type Err = CoreError;

    #[track_caller]
    fn from_str(s: &str) -> CoreErrorResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "consumer" => Ok(Self::Consumer),
            "creator" => Ok(Self::Creator),
            "admin" => Ok(Self::Admin),
            _ => Err(CoreError::InvalidRole {
                value: s.to_string(),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawRole {
    Name(String),
    Id(i64),
    Other(IgnoredAny),
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Accepts names, numeric role ids, null or garbage; never fails.
        let role = match RawRole::deserialize(deserializer)? {
            RawRole::Name(name) => Role::parse_lenient(&name),
            RawRole::Id(id) => Role::from_role_id(id),
            RawRole::Other(_) => Role::default(),
        };
        Ok(role)
    }
}
