pub mod bearer_token;
pub mod credentials;
pub mod envelope;
pub mod identity;
pub mod login_payload;
pub mod profile_picture;
pub mod profile_update;
pub mod registration;
pub mod role;
pub mod user_record;

mod wire;
