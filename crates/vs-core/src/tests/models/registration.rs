use crate::{CoreError, Credentials, RegistrationForm, Role};

use googletest::prelude::*;

fn form() -> RegistrationForm {
    RegistrationForm {
        username: "  carol ".into(),
        email: "carol@example.com".into(),
        password: "s3cret".into(),
        confirm_password: "s3cret".into(),
        first_name: "Carol".into(),
        last_name: String::new(),
        role: Role::Creator,
    }
}

#[test]
fn given_valid_form_when_validated_then_registration_trimmed() {
    let registration = form().validate().unwrap();

    assert_that!(registration.username, eq("carol"));
    assert_that!(registration.password(), eq("s3cret"));
    assert_eq!(registration.role_id(), 1);
}

#[test]
fn given_mismatched_confirmation_when_validated_then_validation_error() {
    let mut f = form();
    f.confirm_password = "different".into();

    let err = f.validate().unwrap_err();

    assert!(matches!(err, CoreError::Validation { .. }));
    assert_that!(err.user_message(), eq("Passwords do not match"));
}

#[test]
fn given_blank_username_when_validated_then_validation_error() {
    let mut f = form();
    f.username = "   ".into();

    assert!(matches!(f.validate(), Err(CoreError::Validation { .. })));
}

#[test]
fn given_bad_email_when_validated_then_validation_error() {
    for email in ["", "no-at-sign", "@example.com", "a@", "a b@example.com", "a@b@c"] {
        let mut f = form();
        f.email = email.into();
        assert!(f.validate().is_err(), "email {email:?} should be rejected");
    }
}

#[test]
fn given_default_form_role_when_validated_then_consumer_role_id() {
    let mut f = form();
    f.role = Role::default();

    assert_eq!(f.validate().unwrap().role_id(), 2);
}

#[test]
fn given_admin_role_when_validated_then_validation_error() {
    let mut f = form();
    f.role = Role::Admin;

    let err = f.validate().unwrap_err();

    assert!(matches!(err, CoreError::Validation { .. }));
    assert_that!(err.user_message(), eq("The admin role cannot be chosen at sign-up"));
}

#[test]
fn given_registration_when_debug_formatted_then_password_redacted() {
    let rendered = format!("{:?}", form().validate().unwrap());
    assert_that!(rendered, not(contains_substring("s3cret")));
}

#[test]
fn given_credentials_when_debug_formatted_then_password_redacted() {
    let credentials = Credentials::new("dave", "hunter2");
    let rendered = format!("{credentials:?}");

    assert_that!(rendered, contains_substring("dave"));
    assert_that!(rendered, not(contains_substring("hunter2")));
}

#[test]
fn given_blank_credentials_when_validated_then_error() {
    assert!(Credentials::new("", "pw").validate().is_err());
    assert!(Credentials::new("dave", "").validate().is_err());
    assert!(Credentials::new("dave", "pw").validate().is_ok());
}

#[test]
fn given_credentials_when_serialized_then_wire_shape() {
    let json = serde_json::to_value(Credentials::new("dave", "pw")).unwrap();
    assert_eq!(json, serde_json::json!({"username": "dave", "password": "pw"}));
}
