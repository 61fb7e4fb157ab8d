//! Domain model shared by the session store, the HTTP client and the CLI.

pub mod error;
pub mod models;

pub use error::{CoreError, Result};
pub use models::bearer_token::BearerToken;
pub use models::credentials::Credentials;
pub use models::envelope::{DEFAULT_ENVELOPE_MESSAGE, Envelope, ErrorBody};
pub use models::identity::Identity;
pub use models::login_payload::LoginPayload;
pub use models::profile_picture::{MAX_PROFILE_PICTURE_BYTES, ProfilePicture};
pub use models::profile_update::{PasswordChange, ProfileUpdate};
pub use models::registration::{Registration, RegistrationForm};
pub use models::role::{ADMIN_ROLE_ID, CONSUMER_ROLE_ID, CREATOR_ROLE_ID, Role};
pub use models::user_record::UserRecord;

/// Location guards send signed-out visitors to, unless configured otherwise.
pub const DEFAULT_SIGN_IN_PATH: &str = "/login";
/// Location signed-in users land on, unless configured otherwise.
pub const DEFAULT_LANDING_PATH: &str = "/";

#[cfg(test)]
mod tests;
