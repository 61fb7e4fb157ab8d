use crate::{ClientError, ClientResult};

use async_trait::async_trait;
use log::debug;
use reqwest::{Client as ReqwestClient, Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use vs_core::{
    BearerToken, Credentials, Envelope, ErrorBody, LoginPayload, PasswordChange, ProfilePicture,
    ProfileUpdate, Registration, UserRecord,
};
use vs_session::{AuthBackend, ProfileBackend};

/// HTTP client for the vidshare REST API
pub struct Client {
    pub base_url: String,
    client: ReqwestClient,
}

impl Client {
    /// Create a new client
    ///
    /// # Arguments
    /// * `base_url` - Server URL (e.g., "http://localhost:8000")
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: ReqwestClient::new(),
        }
    }

    /// Build a request, authenticated when a token is given
    fn request(
        &self,
        method: Method,
        path: &str,
        token: Option<&BearerToken>,
    ) -> reqwest::RequestBuilder {
        let path = path.trim_start_matches('/');
        let url = format!("{}/{}", self.base_url, path);
        debug!("{method} {url}");

        let mut req = self.client.request(method, &url);
        if let Some(token) = token {
            req = req.bearer_auth(token.expose());
        }

        req
    }

    /// Execute request and unwrap the `{data, message}` envelope
    async fn execute<T>(&self, req: reqwest::RequestBuilder) -> ClientResult<Envelope<T>>
    where
        T: DeserializeOwned,
    {
        let response = req.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorBody>(&body)
                .ok()
                .and_then(|error| error.message());

            if status == StatusCode::UNAUTHORIZED {
                return Err(ClientError::unauthorized(message));
            }

            return Err(ClientError::api_error(
                status.as_u16(),
                message.unwrap_or_else(|| format!("Request failed with status {status}")),
            ));
        }

        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Envelope {
                data: None,
                message: String::from(vs_core::DEFAULT_ENVELOPE_MESSAGE),
            });
        }

        Ok(serde_json::from_slice(&body)?)
    }

    // =========================================================================
    // Auth Operations
    // =========================================================================

    /// Exchange credentials for a token and the user record
    pub async fn login(&self, credentials: &Credentials) -> ClientResult<LoginPayload> {
        let req = self
            .request(Method::POST, "/auth/login", None)
            .json(credentials);
        let payload: LoginPayload = self.execute(req).await?.into_data()?;

        if payload.user.is_none() {
            return Err(ClientError::invalid_response(
                "login response carried no user record",
            ));
        }

        Ok(payload)
    }

    /// Create an account; returns the created user when the backend echoes it
    pub async fn register(&self, registration: &Registration) -> ClientResult<Option<UserRecord>> {
        #[derive(Serialize)]
        struct RegisterRequest<'a> {
            username: &'a str,
            email: &'a str,
            password: &'a str,
            #[serde(skip_serializing_if = "Option::is_none")]
            first_name: Option<&'a str>,
            #[serde(skip_serializing_if = "Option::is_none")]
            last_name: Option<&'a str>,
            role_id: i64,
        }

        let body = RegisterRequest {
            username: &registration.username,
            email: &registration.email,
            password: registration.password(),
            first_name: Some(registration.first_name.as_str()).filter(|v| !v.is_empty()),
            last_name: Some(registration.last_name.as_str()).filter(|v| !v.is_empty()),
            role_id: registration.role_id(),
        };

        let req = self
            .request(Method::POST, "/auth/register", None)
            .json(&body);
        Ok(self.execute(req).await?.data)
    }

    // =========================================================================
    // Profile Operations
    // =========================================================================

    /// Get the signed-in user's profile
    pub async fn get_profile(&self, token: &BearerToken) -> ClientResult<UserRecord> {
        let req = self.request(Method::GET, "/profile/", Some(token));
        Ok(self.execute(req).await?.into_data()?)
    }

    /// Update personal profile fields
    pub async fn update_profile(
        &self,
        token: &BearerToken,
        update: &ProfileUpdate,
    ) -> ClientResult<UserRecord> {
        let req = self
            .request(Method::PUT, "/profile/", Some(token))
            .json(update);
        Ok(self.execute(req).await?.into_data()?)
    }

    /// Replace the avatar with a `data:` URL image
    pub async fn update_profile_picture(
        &self,
        token: &BearerToken,
        picture: &ProfilePicture,
    ) -> ClientResult<UserRecord> {
        #[derive(Serialize)]
        struct PictureRequest<'a> {
            profile_picture: &'a str,
        }

        let body = PictureRequest {
            profile_picture: picture.data_url(),
        };
        let req = self
            .request(Method::PUT, "/profile/picture", Some(token))
            .json(&body);
        Ok(self.execute(req).await?.into_data()?)
    }

    /// Change the password; the current one must be supplied
    pub async fn change_password(
        &self,
        token: &BearerToken,
        change: &PasswordChange,
    ) -> ClientResult<()> {
        let req = self
            .request(Method::PUT, "/profile/password", Some(token))
            .json(change);
        self.execute::<Value>(req).await?;
        Ok(())
    }

    // =========================================================================
    // Resources
    // =========================================================================

    /// Fetch any resource (videos, albums, admin) as untyped JSON
    pub async fn get_json(
        &self,
        path: &str,
        token: Option<&BearerToken>,
    ) -> ClientResult<Envelope<Value>> {
        let req = self.request(Method::GET, path, token);
        self.execute(req).await
    }
}

#[async_trait]
impl AuthBackend for Client {
    type Error = ClientError;

    async fn login(&self, credentials: &Credentials) -> ClientResult<LoginPayload> {
        Client::login(self, credentials).await
    }

    async fn register(&self, registration: &Registration) -> ClientResult<()> {
        Client::register(self, registration).await.map(|_| ())
    }
}

#[async_trait]
impl ProfileBackend for Client {
    type Error = ClientError;

    async fn get_profile(&self, token: &BearerToken) -> ClientResult<UserRecord> {
        Client::get_profile(self, token).await
    }

    async fn update_profile(
        &self,
        token: &BearerToken,
        update: &ProfileUpdate,
    ) -> ClientResult<UserRecord> {
        Client::update_profile(self, token, update).await
    }

    async fn update_profile_picture(
        &self,
        token: &BearerToken,
        picture: &ProfilePicture,
    ) -> ClientResult<UserRecord> {
        Client::update_profile_picture(self, token, picture).await
    }

    async fn change_password(
        &self,
        token: &BearerToken,
        change: &PasswordChange,
    ) -> ClientResult<()> {
        Client::change_password(self, token, change).await
    }
}
