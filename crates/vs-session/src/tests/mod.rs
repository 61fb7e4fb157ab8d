
use crate::{AuthBackend, AuthRejection, ProfileBackend};

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::Notify;
use vs_core::{
    BearerToken, Credentials, Identity, LoginPayload, PasswordChange, ProfilePicture,
    ProfileUpdate, Registration, Role, UserRecord,
};

#[derive(Error, Debug)]
pub(crate) enum FakeError {
    #[error("{0}")]
    Rejected(String),

    #[error("Not authenticated")]
    Unauthorized,
}

impl AuthRejection for FakeError {
    fn is_authorization_rejected(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }

    fn user_message(&self) -> String {
        self.to_string()
    }
}

pub(crate) fn user_record(username: &str, role_id: Option<i64>) -> UserRecord {
    UserRecord {
        id: "7".into(),
        username: username.into(),
        email: Some(format!("{username}@example.com")),
        first_name: None,
        last_name: None,
        role_id,
        status: Some("active".into()),
        profile_picture: None,
        last_login: None,
        created_at: Some("2024-01-01T00:00:00".into()),
    }
}

pub(crate) fn identity(username: &str, role: Role, token: &str) -> Identity {
    Identity {
        id: "42".into(),
        username: username.into(),
        email: format!("{username}@example.com"),
        role,
        first_name: Some("Bob".into()),
        last_name: None,
        avatar_url: None,
        last_login: Some("2024-02-03T04:05:06.789Z".into()),
        created_at: "2023-12-31T23:59:59.000+00:00".into(),
        token: BearerToken::new(token),
    }
}

/// Scriptable auth and profile backend.
#[derive(Default)]
pub(crate) struct FakeBackend {
    /// Role id returned by login; the password plays no part
    pub login_role_id: Option<i64>,
    pub login_error: Option<String>,
    pub omit_user: bool,
    pub profile_record: Mutex<Option<UserRecord>>,
    pub profile_unauthorized: bool,
    /// When set, profile calls wait for it before answering
    pub profile_gate: Option<Notify>,
    pub logins: AtomicUsize,
    pub logouts: AtomicUsize,
    pub registrations: Mutex<Vec<String>>,
    pub password_changes: AtomicUsize,
}

impl FakeBackend {
    pub(crate) fn with_role(role_id: i64) -> Self {
        Self {
            login_role_id: Some(role_id),
            ..Self::default()
        }
    }

    pub(crate) fn failing(message: &str) -> Self {
        Self {
            login_error: Some(message.into()),
            ..Self::default()
        }
    }

    async fn profile_response(&self) -> Result<UserRecord, FakeError> {
        if let Some(gate) = &self.profile_gate {
            gate.notified().await;
        }
        if self.profile_unauthorized {
            return Err(FakeError::Unauthorized);
        }
        self.profile_record
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| FakeError::Rejected("no profile scripted".into()))
    }
}

#[async_trait]
impl AuthBackend for FakeBackend {
    type Error = FakeError;

    async fn login(&self, credentials: &Credentials) -> Result<LoginPayload, FakeError> {
        self.logins.fetch_add(1, Ordering::SeqCst);

        if let Some(message) = &self.login_error {
            return Err(FakeError::Rejected(message.clone()));
        }

        let n = self.logins.load(Ordering::SeqCst);
        Ok(LoginPayload {
            access_token: BearerToken::new(format!("token-{n}")),
            token_type: Some("bearer".into()),
            user: (!self.omit_user)
                .then(|| user_record(&credentials.username, self.login_role_id)),
        })
    }

    async fn register(&self, registration: &Registration) -> Result<(), FakeError> {
        self.registrations
            .lock()
            .unwrap()
            .push(registration.username.clone());
        Ok(())
    }

    async fn logout(&self, _token: &BearerToken) -> Result<(), FakeError> {
        self.logouts.fetch_add(1, Ordering::SeqCst);
        Err(FakeError::Rejected("logout endpoint unavailable".into()))
    }
}

#[async_trait]
impl ProfileBackend for FakeBackend {
    type Error = FakeError;

    async fn get_profile(&self, _token: &BearerToken) -> Result<UserRecord, FakeError> {
        self.profile_response().await
    }

    async fn update_profile(
        &self,
        _token: &BearerToken,
        _update: &ProfileUpdate,
    ) -> Result<UserRecord, FakeError> {
        self.profile_response().await
    }

    async fn update_profile_picture(
        &self,
        _token: &BearerToken,
        picture: &ProfilePicture,
    ) -> Result<UserRecord, FakeError> {
        let mut record = self.profile_response().await?;
        record.profile_picture = Some(picture.data_url().to_string());
        Ok(record)
    }

    async fn change_password(
        &self,
        _token: &BearerToken,
        _change: &PasswordChange,
    ) -> Result<(), FakeError> {
        if self.profile_unauthorized {
            return Err(FakeError::Unauthorized);
        }
        self.password_changes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
