//! Contracts of the remote collaborators the store talks to.

use async_trait::async_trait;
use vs_core::{
    BearerToken, Credentials, LoginPayload, PasswordChange, ProfilePicture, ProfileUpdate,
    Registration, UserRecord,
};

/// Classifies backend failures for the session layer.
pub trait AuthRejection {
    /// The backend refused the bearer credential (HTTP 401).
    fn is_authorization_rejected(&self) -> bool;

    /// Message to show the user: the backend's own text when it sent one,
    /// a generic fallback otherwise.
    fn user_message(&self) -> String;
}

/// Exchanges credentials for tokens and accepts registrations.
#[async_trait]
pub trait AuthBackend: Send + Sync {
    type Error: std::error::Error + AuthRejection + Send + Sync + 'static;

    async fn login(&self, credentials: &Credentials) -> Result<LoginPayload, Self::Error>;

    async fn register(&self, registration: &Registration) -> Result<(), Self::Error>;

    /// Tells the backend the token is no longer in use.
    ///
    /// The default does nothing; the backend keeps no server-side sessions.
    async fn logout(&self, _token: &BearerToken) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Owner-scoped profile endpoints.
#[async_trait]
pub trait ProfileBackend: Send + Sync {
    type Error: std::error::Error + AuthRejection + Send + Sync + 'static;

    async fn get_profile(&self, token: &BearerToken) -> Result<UserRecord, Self::Error>;

    async fn update_profile(
        &self,
        token: &BearerToken,
        update: &ProfileUpdate,
    ) -> Result<UserRecord, Self::Error>;

    async fn update_profile_picture(
        &self,
        token: &BearerToken,
        picture: &ProfilePicture,
    ) -> Result<UserRecord, Self::Error>;

    async fn change_password(
        &self,
        token: &BearerToken,
        change: &PasswordChange,
    ) -> Result<(), Self::Error>;
}
