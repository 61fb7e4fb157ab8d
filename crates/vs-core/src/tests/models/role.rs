use crate::{ADMIN_ROLE_ID, CONSUMER_ROLE_ID, CREATOR_ROLE_ID, Role};

use std::str::FromStr;

use proptest::prelude::*;

#[test]
fn test_role_as_str() {
    assert_eq!(Role::Consumer.as_str(), "consumer");
    assert_eq!(Role::Creator.as_str(), "creator");
    assert_eq!(Role::Admin.as_str(), "admin");
}

#[test]
fn test_role_default_is_consumer() {
    assert_eq!(Role::default(), Role::Consumer);
}

#[test]
fn test_role_from_known_ids() {
    assert_eq!(Role::from_role_id(CREATOR_ROLE_ID), Role::Creator);
    assert_eq!(Role::from_role_id(CONSUMER_ROLE_ID), Role::Consumer);
    assert_eq!(Role::from_role_id(ADMIN_ROLE_ID), Role::Admin);
}

#[test]
fn test_role_id_matches_from_role_id() {
    for role in Role::ALL {
        assert_eq!(Role::from_role_id(role.role_id()), role);
    }
}

#[test]
fn test_role_from_str_is_strict() {
    assert_eq!(Role::from_str("admin").unwrap(), Role::Admin);
    assert_eq!(Role::from_str(" Creator ").unwrap(), Role::Creator);
    assert!(Role::from_str("superuser").is_err());
    assert!(Role::from_str("").is_err());
}

#[test]
fn test_role_parse_lenient_defaults_to_consumer() {
    assert_eq!(Role::parse_lenient("admin"), Role::Admin);
    assert_eq!(Role::parse_lenient("root"), Role::Consumer);
}

#[test]
fn given_invalid_json_role_when_deserialized_then_consumer() {
    let cases = [r#""moderator""#, "null", "42", "{}", "[1,2]", "true"];

    for case in cases {
        let role: Role = serde_json::from_str(case).unwrap();
        assert_eq!(role, Role::Consumer, "input {case}");
    }
}

#[test]
fn given_numeric_role_id_when_deserialized_then_mapped() {
    let role: Role = serde_json::from_str("3").unwrap();
    assert_eq!(role, Role::Admin);
}

#[test]
fn given_role_when_serialized_then_lowercase_name() {
    assert_eq!(serde_json::to_string(&Role::Creator).unwrap(), r#""creator""#);
}

proptest! {
    #[test]
    fn given_role_id_outside_known_set_when_mapped_then_consumer(id in any::<i64>()) {
        prop_assume!(![CREATOR_ROLE_ID, CONSUMER_ROLE_ID, ADMIN_ROLE_ID].contains(&id));
        prop_assert_eq!(Role::from_role_id(id), Role::Consumer);
    }

    #[test]
    fn given_arbitrary_role_name_when_parsed_leniently_then_never_panics(name in ".{0,24}") {
        let role = Role::parse_lenient(&name);
        prop_assert!(Role::ALL.contains(&role));
    }
}
