//! Content validators for ambiguous manifests
//!
//! Each validator is a total predicate over raw file text. The two validators
//! differ on unparsable input: `npm_package_json` treats it as a match,
//! `nuget_project_json` does not.

use serde_json::Value;

/// Predicate over raw manifest content
pub type ContentValidator = fn(&str) -> bool;

const UNITY_FIELDS: &[&str] = &["unity", "unityRelease"];
const NUGET_FIELDS: &[&str] = &["dependencies", "frameworks", "runtimes", "supports"];

/// `package.json` belongs to npm unless it is a Unity package descriptor.
///
/// `name` and `version` are required by both formats, so only the Unity-specific
/// fields are checked.
pub fn npm_package_json(content: &str) -> bool {
    match parse_root(content) {
        Some(json) => !has_truthy_field(&json, UNITY_FIELDS),
        None => true,
    }
}

/// `project.json` belongs to NuGet only when it carries a dependency marker.
pub fn nuget_project_json(content: &str) -> bool {
    match parse_root(content) {
        Some(json) => has_truthy_field(&json, NUGET_FIELDS),
        None => false,
    }
}

/// Parses the document, returning `None` for invalid JSON or a `null` root.
fn parse_root(content: &str) -> Option<Value> {
    match serde_json::from_str::<Value>(content) {
        Ok(Value::Null) | Err(_) => None,
        Ok(json) => Some(json),
    }
}

fn has_truthy_field(json: &Value, fields: &[&str]) -> bool {
    fields
        .iter()
        .any(|field| json.get(*field).is_some_and(is_truthy))
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_npm_plain_package() {
        assert!(npm_package_json(r#"{"name": "app", "version": "1.0.0"}"#));
    }

    #[test]
    fn test_npm_rejects_unity_fields() {
        assert!(!npm_package_json(
            r#"{"name": "com.unity.foo", "version": "1.0.0", "unity": "2021.3"}"#
        ));
        assert!(!npm_package_json(r#"{"unityRelease": "0f1"}"#));
    }

    #[test]
    fn test_npm_falsy_unity_fields_still_match() {
        assert!(npm_package_json(r#"{"unity": ""}"#));
        assert!(npm_package_json(r#"{"unity": null, "unityRelease": false}"#));
        assert!(npm_package_json(r#"{"unity": 0}"#));
    }

    #[test]
    fn test_npm_fails_open_on_invalid_json() {
        assert!(npm_package_json("{ invalid json }"));
        assert!(npm_package_json("null"));
    }

    #[test]
    fn test_npm_non_object_root_matches() {
        assert!(npm_package_json("[1, 2, 3]"));
        assert!(npm_package_json("\"unity\""));
    }

    #[test]
    fn test_nuget_dependency_markers() {
        assert!(nuget_project_json(r#"{"dependencies": {"Newtonsoft.Json": "9.0.1"}}"#));
        assert!(nuget_project_json(r#"{"frameworks": {"netcoreapp1.0": {}}}"#));
        assert!(nuget_project_json(r#"{"runtimes": {"win10-x64": {}}}"#));
        assert!(nuget_project_json(r#"{"supports": {}}"#));
    }

    #[test]
    fn test_nuget_rejects_nx_project() {
        assert!(!nuget_project_json(
            r#"{"name": "my-app", "sourceRoot": "apps/my-app/src", "targets": {}}"#
        ));
    }

    #[test]
    fn test_nuget_falsy_markers_do_not_match() {
        assert!(!nuget_project_json(r#"{"dependencies": null, "frameworks": ""}"#));
    }

    #[test]
    fn test_nuget_fails_closed_on_invalid_json() {
        assert!(!nuget_project_json("{ invalid json }"));
        assert!(!nuget_project_json("null"));
        assert!(!nuget_project_json(""));
    }
}
