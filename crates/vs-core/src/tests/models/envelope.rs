use crate::{CoreError, DEFAULT_ENVELOPE_MESSAGE, Envelope, ErrorBody, LoginPayload};

use serde_json::{Value, json};

#[test]
fn given_envelope_without_message_when_parsed_then_default_message() {
    let envelope: Envelope<Value> = serde_json::from_value(json!({"data": [1, 2]})).unwrap();

    assert_eq!(envelope.message, DEFAULT_ENVELOPE_MESSAGE);
    assert_eq!(envelope.into_data().unwrap(), json!([1, 2]));
}

#[test]
fn given_envelope_without_data_when_into_data_then_incomplete_response() {
    let envelope: Envelope<Value> =
        serde_json::from_value(json!({"message": "SUCCESS"})).unwrap();

    assert!(matches!(
        envelope.into_data(),
        Err(CoreError::IncompleteResponse { .. })
    ));
}

#[test]
fn given_login_envelope_when_parsed_then_payload_typed() {
    let envelope: Envelope<LoginPayload> = serde_json::from_value(json!({
        "data": {
            "access_token": "abc",
            "token_type": "bearer",
            "user": {"id": 3, "username": "zed", "email": "z@x.io", "role_id": 3}
        },
        "message": "SUCCESS"
    }))
    .unwrap();

    let payload = envelope.into_data().unwrap();
    assert_eq!(payload.access_token.expose(), "abc");
    assert_eq!(payload.user.unwrap().id, "3");
}

#[test]
fn given_string_detail_when_message_then_detail_returned() {
    let body: ErrorBody =
        serde_json::from_value(json!({"detail": "Nombre de usuario o contraseña incorrectos"}))
            .unwrap();

    assert_eq!(
        body.message().as_deref(),
        Some("Nombre de usuario o contraseña incorrectos")
    );
}

#[test]
fn given_validation_detail_list_when_message_then_first_msg() {
    let body: ErrorBody = serde_json::from_value(json!({
        "detail": [
            {"loc": ["body", "email"], "msg": "value is not a valid email address", "type": "value_error"},
            {"loc": ["body", "username"], "msg": "field required", "type": "missing"}
        ]
    }))
    .unwrap();

    assert_eq!(
        body.message().as_deref(),
        Some("value is not a valid email address")
    );
}

#[test]
fn given_no_detail_when_message_then_falls_back_to_message_field() {
    let body: ErrorBody = serde_json::from_value(json!({"message": "Forbidden"})).unwrap();
    assert_eq!(body.message().as_deref(), Some("Forbidden"));
}

#[test]
fn given_empty_body_when_message_then_none() {
    let body: ErrorBody = serde_json::from_value(json!({"detail": ""})).unwrap();
    assert!(body.message().is_none());
}
