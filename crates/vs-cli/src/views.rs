//! Printable, credential-free views of session state.

use serde::Serialize;
use vs_core::{Identity, Role};
use vs_session::{SessionPhase, SessionSnapshot};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IdentityView {
    pub id: String,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login: Option<String>,
    pub created_at: String,
}

impl From<&Identity> for IdentityView {
    fn from(identity: &Identity) -> Self {
        Self {
            id: identity.id.clone(),
            username: identity.username.clone(),
            email: identity.email.clone(),
            role: identity.role,
            display_name: identity.display_name(),
            first_name: identity.first_name.clone(),
            last_name: identity.last_name.clone(),
            avatar_url: identity.avatar_url.clone(),
            last_login: identity.last_login.clone(),
            created_at: identity.created_at.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionView {
    pub phase: SessionPhase,
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity: Option<IdentityView>,
}

impl From<&SessionSnapshot> for SessionView {
    fn from(snapshot: &SessionSnapshot) -> Self {
        Self {
            phase: snapshot.phase(),
            authenticated: snapshot.identity().is_some(),
            identity: snapshot.identity().map(IdentityView::from),
        }
    }
}

/// Result of a `profile` subcommand.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ProfileOutput {
    Identity(IdentityView),
    PasswordChanged { password_changed: bool },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegisteredOutput {
    pub registered: String,
    pub role: Role,
    /// Where to go next; registering does not sign in
    pub sign_in_path: String,
}
