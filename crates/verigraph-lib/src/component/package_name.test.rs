use super::*;

#[test]
fn test_plain_and_scoped_names_are_valid() {
    assert!(validate_package_name("lodash").is_ok());
    assert!(validate_package_name("@teambit/legacy.utils").is_ok());
    assert!(validate_package_name("react-dom").is_ok());
}

#[test]
fn test_legacy_names_are_tolerated() {
    // uppercase is only forbidden for new packages
    assert!(validate_package_name("JSONStream").is_ok());
    assert!(validate_package_name("crazy!").is_ok());
}

#[test]
fn test_invalid_names_report_reasons() {
    let errors = validate_package_name("").unwrap_err();
    assert_eq!(errors, vec!["name length must be greater than zero"]);

    let errors = validate_package_name(".hidden").unwrap_err();
    assert!(errors.iter().any(|e| e.contains("period")));

    let errors = validate_package_name("_private").unwrap_err();
    assert!(errors.iter().any(|e| e.contains("underscore")));

    let errors = validate_package_name("node_modules").unwrap_err();
    assert!(errors.iter().any(|e| e.contains("blocked")));

    let errors = validate_package_name("has space").unwrap_err();
    assert!(errors.iter().any(|e| e.contains("URL-friendly")));
}

#[test]
fn test_scoped_name_needs_both_parts() {
    assert!(validate_package_name("@scope/").is_err());
    assert!(validate_package_name("@/pkg").is_err());
    assert!(validate_package_name("@scope/pkg/extra").is_err());
}
