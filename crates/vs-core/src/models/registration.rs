use crate::{CoreError, Result as CoreErrorResult, Role};

/// A validated sign-up request.
///
/// Only obtainable through [`RegistrationForm::validate`].
#[derive(Clone)]
pub struct Registration {
    pub username: String,
    pub email: String,
    password: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
}

impl Registration {
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Backend wire id for the requested role.
    pub fn role_id(&self) -> i64 {
        self.role.role_id()
    }
}

impl std::fmt::Debug for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"***")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("role", &self.role)
            .finish()
    }
}

/// Raw sign-up input, including the password confirmation.
#[derive(Clone, Default)]
pub struct RegistrationForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
}

impl RegistrationForm {
    /// Checks the form and produces the request to submit.
    #[track_caller]
    pub fn validate(self) -> CoreErrorResult<Registration> {
        let username = self.username.trim().to_string();
        let email = self.email.trim().to_string();

        if username.is_empty() {
            return Err(CoreError::validation("Username is required"));
        }
        if !is_plausible_email(&email) {
            return Err(CoreError::validation(format!(
                "'{email}' is not a valid email address"
            )));
        }
        if self.password.is_empty() {
            return Err(CoreError::validation("Password is required"));
        }
        if self.password != self.confirm_password {
            return Err(CoreError::validation("Passwords do not match"));
        }
        if !self.role.is_self_assignable() {
            return Err(CoreError::validation(format!(
                "The {} role cannot be chosen at sign-up",
                self.role
            )));
        }

        Ok(Registration {
            username,
            email,
            password: self.password,
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            role: self.role,
        })
    }
}

pub(crate) fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !email.contains(char::is_whitespace)
        }
        None => false,
    }
}
