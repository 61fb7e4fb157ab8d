use crate::{BearerToken, UserRecord};

use serde::{Deserialize, Serialize};

/// `data` of a successful `POST /auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginPayload {
    pub access_token: BearerToken,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub user: Option<UserRecord>,
}
