use super::*;

#[test]
fn test_valid_relative_paths() {
    assert!(is_valid_path("index.js"));
    assert!(is_valid_path("src/utils/is-string.js"));
    assert!(is_valid_path("./index.js"));
}

#[test]
fn test_invalid_paths() {
    assert!(!is_valid_path(""));
    assert!(!is_valid_path("   "));
    assert!(!is_valid_path("/abs/index.js"));
    assert!(!is_valid_path("src\\index.js"));
    assert!(!is_valid_path("../outside.js"));
    assert!(!is_valid_path("src//index.js"));
    assert!(!is_valid_path(" index.js"));
}
