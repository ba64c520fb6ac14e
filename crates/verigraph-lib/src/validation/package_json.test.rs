use super::*;
use serde_json::json;

#[test]
fn test_unknown_fields_are_not_validated() {
    assert_eq!(validate_package_json_field("myCustomField", &json!(42)), None);
    assert!(npm_field_kinds("myCustomField").is_none());
}

#[test]
fn test_known_fields_accept_expected_types() {
    assert_eq!(validate_package_json_field("description", &json!("x")), None);
    assert_eq!(validate_package_json_field("bin", &json!({"a": "b"})), None);
    assert_eq!(validate_package_json_field("bin", &json!("./cli.js")), None);
    assert_eq!(validate_package_json_field("sideEffects", &json!(false)), None);
}

#[test]
fn test_known_fields_reject_wrong_types() {
    let err = validate_package_json_field("scripts", &json!("npm test")).unwrap();
    assert_eq!(
        err,
        "Type for field scripts, was expected to be object, not string"
    );

    let err = validate_package_json_field("repository", &json!(1)).unwrap();
    assert!(err.contains("string or object"));
    assert!(err.ends_with("not number"));
}

#[test]
fn test_dependencies_object() {
    assert!(validate_dependencies_object(&json!({"lodash": "^4.0.0"})).is_ok());
    assert_eq!(validate_dependencies_object(&json!("lodash")), Err(None));
    assert_eq!(
        validate_dependencies_object(&json!({"lodash": 4})),
        Err(Some("lodash".to_string()))
    );
    assert_eq!(
        validate_dependencies_object(&json!({"lodash": ""})),
        Err(Some("lodash".to_string()))
    );
}

#[test]
fn test_forbidden_lists() {
    assert!(OVERRIDES_FORBIDDEN_FIELDS.contains(&"bit"));
    assert!(NON_USER_CHANGEABLE_PROPS.contains(&"license"));
    assert!(!NON_USER_CHANGEABLE_PROPS.contains(&"description"));
    assert!(NON_PACKAGE_JSON_FIELDS.contains(&"propagate"));
}
