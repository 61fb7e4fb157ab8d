use crate::{MAX_PROFILE_PICTURE_BYTES, PasswordChange, ProfilePicture, ProfileUpdate};

use googletest::prelude::*;

#[test]
fn given_empty_update_when_validated_then_nothing_to_update() {
    let err = ProfileUpdate::default().validate().unwrap_err();
    assert_that!(err.user_message(), eq("Nothing to update"));
}

#[test]
fn given_partial_update_when_serialized_then_only_set_fields() {
    let update = ProfileUpdate {
        first_name: Some("Eve".into()),
        ..Default::default()
    };

    let json = serde_json::to_value(&update).unwrap();
    assert_eq!(json, serde_json::json!({"first_name": "Eve"}));
    assert!(update.validate().is_ok());
}

#[test]
fn given_invalid_email_update_when_validated_then_error() {
    let update = ProfileUpdate {
        email: Some("nope".into()),
        ..Default::default()
    };
    assert!(update.validate().is_err());
}

#[test]
fn given_blank_username_update_when_validated_then_error() {
    let update = ProfileUpdate {
        username: Some(" ".into()),
        ..Default::default()
    };
    assert!(update.validate().is_err());
}

#[test]
fn given_password_change_when_validated_then_requires_both_fields() {
    assert!(PasswordChange::new("", "new").validate().is_err());
    assert!(PasswordChange::new("old", "").validate().is_err());
    assert!(PasswordChange::new("old", "new").validate().is_ok());
    assert_that!(
        format!("{:?}", PasswordChange::new("old", "new")),
        not(contains_substring("old"))
    );
}

#[test]
fn given_png_bytes_when_encoded_then_data_url() {
    let picture = ProfilePicture::from_bytes("image/png", &[0x89, 0x50, 0x4e, 0x47]).unwrap();
    assert_that!(picture.data_url(), eq("data:image/png;base64,iVBORw=="));
}

#[test]
fn given_non_image_type_when_encoded_then_rejected() {
    assert!(ProfilePicture::from_bytes("application/pdf", b"%PDF").is_err());
    assert!(ProfilePicture::from_bytes("image/", b"x").is_err());
}

#[test]
fn given_oversized_image_when_encoded_then_rejected() {
    let bytes = vec![0u8; MAX_PROFILE_PICTURE_BYTES + 1];
    let err = ProfilePicture::from_bytes("image/jpeg", &bytes).unwrap_err();

    assert_that!(err.user_message(), contains_substring("5MB"));
}

#[test]
fn given_image_at_limit_when_encoded_then_accepted() {
    let bytes = vec![0u8; MAX_PROFILE_PICTURE_BYTES];
    assert!(ProfilePicture::from_bytes("image/jpeg", &bytes).is_ok());
}

#[test]
fn test_mime_for_extension() {
    assert_eq!(ProfilePicture::mime_for_extension("JPG"), Some("image/jpeg"));
    assert_eq!(ProfilePicture::mime_for_extension("png"), Some("image/png"));
    assert_eq!(ProfilePicture::mime_for_extension("txt"), None);
}
