//! Unit tests for identity construction and profile merging.

use crate::{BearerToken, CoreError, Envelope, Identity, LoginPayload, Role, UserRecord};

use googletest::prelude::*;
use serde_json::json;

fn record(role_id: Option<i64>) -> UserRecord {
    UserRecord {
        id: "7".into(),
        username: "alice".into(),
        email: Some("alice@example.com".into()),
        first_name: None,
        last_name: None,
        role_id,
        status: Some("active".into()),
        profile_picture: None,
        last_login: None,
        created_at: Some("2024-01-01T00:00:00".into()),
    }
}

fn payload(user: Option<UserRecord>) -> LoginPayload {
    LoginPayload {
        access_token: BearerToken::new("tok-123"),
        token_type: Some("bearer".into()),
        user,
    }
}

fn full_identity() -> Identity {
    Identity {
        id: "42".into(),
        username: "bob".into(),
        email: "bob@example.com".into(),
        role: Role::Creator,
        first_name: Some("Bob".into()),
        last_name: Some("Builder".into()),
        avatar_url: Some("data:image/png;base64,AAAA".into()),
        last_login: Some("2024-02-03T04:05:06.789Z".into()),
        created_at: "2023-12-31T23:59:59.000+00:00".into(),
        token: BearerToken::new("eyJhbGciOiJIUzI1NiJ9.e30.sig"),
    }
}

#[test]
fn given_full_login_payload_when_from_login_then_identity_built() {
    let identity = Identity::from_login(payload(Some(record(Some(1)))), "alice").unwrap();

    assert_that!(identity.id, eq("7"));
    assert_that!(identity.username, eq("alice"));
    assert_that!(identity.email, eq("alice@example.com"));
    assert_that!(identity.role, eq(Role::Creator));
    assert_that!(identity.created_at, eq("2024-01-01T00:00:00"));
    assert_that!(identity.token.expose(), eq("tok-123"));
}

#[test]
fn given_missing_role_id_when_from_login_then_consumer() {
    let identity = Identity::from_login(payload(Some(record(None))), "alice").unwrap();
    assert_that!(identity.role, eq(Role::Consumer));
}

#[test]
fn given_unknown_role_id_when_from_login_then_consumer() {
    let identity = Identity::from_login(payload(Some(record(Some(99)))), "alice").unwrap();
    assert_that!(identity.role, eq(Role::Consumer));
}

#[test]
fn given_non_integer_role_id_when_login_envelope_parsed_then_consumer() {
    for role_id in [json!("3"), json!("admin"), json!(2.5), json!(null), json!({"id": 3})] {
        let envelope: Envelope<LoginPayload> = serde_json::from_value(json!({
            "data": {
                "access_token": "tok-123",
                "user": {"id": 7, "username": "alice", "role_id": role_id}
            }
        }))
        .unwrap();

        let identity = Identity::from_login(envelope.into_data().unwrap(), "alice").unwrap();
        assert_that!(identity.role, eq(Role::Consumer));
    }
}

#[test]
fn given_record_without_username_when_from_login_then_falls_back_to_login_name() {
    let user: UserRecord = serde_json::from_value(json!({"id": 7, "role_id": 1})).unwrap();

    let identity = Identity::from_login(payload(Some(user)), "alice@login").unwrap();

    assert_that!(identity.username, eq("alice@login"));
    assert_that!(identity.role, eq(Role::Creator));
}

#[test]
fn given_token_only_payload_when_from_login_then_incomplete_response() {
    let result = Identity::from_login(payload(None), "alice");

    assert!(matches!(
        result,
        Err(CoreError::IncompleteResponse { .. })
    ));
}

#[test]
fn given_empty_token_when_from_login_then_incomplete_response() {
    let mut p = payload(Some(record(Some(2))));
    p.access_token = BearerToken::new("  ");

    assert!(matches!(
        Identity::from_login(p, "alice"),
        Err(CoreError::IncompleteResponse { .. })
    ));
}

#[test]
fn given_record_without_email_when_from_login_then_falls_back_to_login_name() {
    let mut user = record(Some(2));
    user.email = None;

    let identity = Identity::from_login(payload(Some(user)), "alice@login").unwrap();
    assert_that!(identity.email, eq("alice@login"));
}

#[test]
fn given_record_without_created_at_when_from_login_then_timestamp_generated() {
    let mut user = record(Some(2));
    user.created_at = None;

    let identity = Identity::from_login(payload(Some(user)), "alice").unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(&identity.created_at).is_ok());
}

#[test]
fn given_identity_when_serialize_roundtrip_then_byte_for_byte() {
    let original = full_identity();

    let json = serde_json::to_string(&original).unwrap();
    let restored: Identity = serde_json::from_str(&json).unwrap();
    let reserialized = serde_json::to_string(&restored).unwrap();

    assert_that!(restored, eq(&original));
    assert_that!(reserialized, eq(&json));
}

#[test]
fn given_stored_identity_with_invalid_role_when_deserialized_then_consumer() {
    let json = r#"{"id":"1","username":"u","email":"u@x.io","role":"owner","created_at":"t","token":"k"}"#;
    let identity: Identity = serde_json::from_str(json).unwrap();

    assert_that!(identity.role, eq(Role::Consumer));
}

#[test]
fn given_stored_identity_without_role_when_deserialized_then_consumer() {
    let json = r#"{"id":"1","username":"u","email":"u@x.io","created_at":"t","token":"k"}"#;
    let identity: Identity = serde_json::from_str(json).unwrap();

    assert_that!(identity.role, eq(Role::Consumer));
    assert!(identity.first_name.is_none());
}

#[test]
fn given_identity_when_debug_formatted_then_token_redacted() {
    let rendered = format!("{:?}", full_identity());

    assert_that!(rendered, not(contains_substring("eyJhbGci")));
    assert_that!(rendered, contains_substring("BearerToken(***)"));
}

#[test]
fn given_profile_record_when_merged_then_only_non_empty_fields_replace() {
    let mut identity = full_identity();
    let update = UserRecord {
        id: "999".into(),
        username: "robert".into(),
        email: Some(String::new()),
        first_name: Some("Robert".into()),
        last_name: None,
        role_id: Some(3),
        status: None,
        profile_picture: None,
        last_login: None,
        created_at: None,
    };

    let changed = identity.merge_profile(&update);

    assert!(changed);
    assert_that!(identity.id, eq("42"));
    assert_that!(identity.username, eq("robert"));
    assert_that!(identity.email, eq("bob@example.com"));
    assert_that!(identity.first_name, some(eq("Robert")));
    assert_that!(identity.last_name, some(eq("Builder")));
    assert_that!(identity.role, eq(Role::Creator));
}

#[test]
fn given_identical_record_when_merged_then_reports_unchanged() {
    let mut identity = full_identity();
    let same = UserRecord {
        id: identity.id.clone(),
        username: identity.username.clone(),
        email: Some(identity.email.clone()),
        first_name: identity.first_name.clone(),
        last_name: identity.last_name.clone(),
        role_id: None,
        status: None,
        profile_picture: identity.avatar_url.clone(),
        last_login: None,
        created_at: None,
    };

    assert!(!identity.merge_profile(&same));
}

#[test]
fn test_display_name() {
    let mut identity = full_identity();
    assert_eq!(identity.display_name(), "Bob Builder");

    identity.first_name = None;
    identity.last_name = None;
    assert_eq!(identity.display_name(), "bob");
}

#[test]
fn test_user_record_accepts_numeric_and_string_ids() {
    let numeric: UserRecord = serde_json::from_str(r#"{"id":12,"username":"a"}"#).unwrap();
    let text: UserRecord = serde_json::from_str(r#"{"id":"12","username":"a"}"#).unwrap();

    assert_eq!(numeric.id, "12");
    assert_eq!(text.id, "12");
    assert_eq!(numeric.role(), Role::Consumer);
}
