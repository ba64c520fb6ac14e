//! Type rules for standard npm package.json fields
//!
//! Used to check `overrides` and `packageJsonChangedProps` of a Version:
//! values under a known npm field must have the JSON type npm expects.
//! Unknown fields are not validated.

use serde_json::Value;
use std::fmt;

/// Override keys a component may never set
pub const OVERRIDES_FORBIDDEN_FIELDS: &[&str] = &["name", "main", "version", "bit"];

/// Override keys that configure the tool rather than the generated package.json
pub const NON_PACKAGE_JSON_FIELDS: &[&str] =
    &["env", "exclude", "propagate", "defaultScope", "extensions"];

/// package.json props that are generated and cannot be changed per component
pub const NON_USER_CHANGEABLE_PROPS: &[&str] = &[
    "name",
    "version",
    "main",
    "dependencies",
    "devDependencies",
    "peerDependencies",
    "license",
    "bit",
];

/// Fields that map package names to version ranges
pub const DEPENDENCIES_FIELDS: &[&str] = &["dependencies", "devDependencies", "peerDependencies"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonKind {
    String,
    Object,
    Array,
    Boolean,
}

impl JsonKind {
    pub fn of(value: &Value) -> Option<Self> {
        match value {
            Value::String(_) => Some(JsonKind::String),
            Value::Object(_) => Some(JsonKind::Object),
            Value::Array(_) => Some(JsonKind::Array),
            Value::Bool(_) => Some(JsonKind::Boolean),
            Value::Null | Value::Number(_) => None,
        }
    }
}

impl fmt::Display for JsonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JsonKind::String => f.write_str("string"),
            JsonKind::Object => f.write_str("object"),
            JsonKind::Array => f.write_str("array"),
            JsonKind::Boolean => f.write_str("boolean"),
        }
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Accepted JSON types of a standard npm field, `None` for unknown fields
pub fn npm_field_kinds(field: &str) -> Option<&'static [JsonKind]> {
    use JsonKind::*;
    let kinds: &'static [JsonKind] = match field {
        "name" | "version" | "description" | "homepage" | "license" | "main" | "module"
        | "types" | "typings" | "type" => &[String],
        "keywords" | "licenses" | "contributors" | "files" | "os" | "cpu"
        | "bundledDependencies" | "workspaces" => &[Array],
        "bugs" | "author" | "bin" | "repository" | "browser" => &[String, Object],
        "man" => &[String, Array],
        "exports" => &[String, Object, Array],
        "sideEffects" => &[Boolean, Array],
        "directories" | "scripts" | "config" | "dependencies" | "devDependencies"
        | "peerDependencies" | "peerDependenciesMeta" | "optionalDependencies" | "engines"
        | "publishConfig" => &[Object],
        "engineStrict" | "preferGlobal" | "private" => &[Boolean],
        _ => return None,
    };
    Some(kinds)
}

/// Check a value against the npm rules for `field`.
///
/// Returns a description of the problem, or `None` when the value is fine
/// or the field is not a standard one.
pub fn validate_package_json_field(field: &str, value: &Value) -> Option<String> {
    let kinds = npm_field_kinds(field)?;
    if JsonKind::of(value).is_some_and(|kind| kinds.contains(&kind)) {
        return None;
    }
    let expected = kinds
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" or ");
    Some(format!(
        "Type for field {}, was expected to be {}, not {}",
        field,
        expected,
        json_type_name(value)
    ))
}

/// Check a dependencies-like object: every value is a non-empty string.
///
/// Returns the offending key on failure, or `None` for the key when the
/// value itself is not an object.
pub fn validate_dependencies_object(value: &Value) -> Result<(), Option<String>> {
    let Value::Object(map) = value else {
        return Err(None);
    };
    for (name, range) in map {
        match range {
            Value::String(range) if !range.is_empty() => {}
            _ => return Err(Some(name.clone())),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    include!("package_json.test.rs");
}
