//! Data-shape schemas and the validator adapter.
//!
//! A [`Schema`] describes the expected shape of a JSON value. The adapter
//! entry point is [`validate`], which never raises: structural mismatches
//! come back as a [`ValidationReport`] carrying one [`FieldError`] per
//! violating path, so the dispatch pipeline can turn them into an HTTP
//! response deterministically.
//!
//! # Example
//!
//! ```
//! use praxis_core::schema::{validate, Schema};
//! use serde_json::json;
//!
//! let schema = Schema::object(vec![
//!     ("name", Schema::string()),
//!     ("age", Schema::integer().minimum(0)),
//! ])
//! .required("name");
//!
//! let report = validate(Some(&schema), &json!({ "age": -3 }));
//! assert!(!report.valid);
//! assert_eq!(report.errors.len(), 2); // missing "name", "age" below minimum
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// A single segment of the path to a violating value.
///
/// Serialized untagged: object keys become JSON strings, array positions
/// become JSON numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    /// An object property name.
    Key(String),
    /// An array index.
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => write!(f, ".{key}"),
            Self::Index(idx) => write!(f, "[{idx}]"),
        }
    }
}

/// One schema violation at one path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Path segments from the validated root to the violating value.
    pub path: Vec<PathSegment>,
    /// Human-readable description of the violation.
    pub message: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "$")?;
        for segment in &self.path {
            write!(f, "{segment}")?;
        }
        write!(f, ": {}", self.message)
    }
}

/// Outcome of validating a value against a schema.
///
/// Always returned as data, never thrown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Whether the value satisfied the schema.
    pub valid: bool,
    /// All violations found, in document order. Empty when `valid`.
    pub errors: Vec<FieldError>,
}

impl ValidationReport {
    /// A passing report with no errors.
    #[must_use]
    pub fn ok() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
        }
    }
}

/// A description of a JSON data shape.
///
/// Constructed with the `Schema::string()`-style constructors and refined
/// with the fluent constraint setters. Constraint setters on a mismatched
/// variant are no-ops.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Schema {
    /// A string, optionally length-bounded.
    String {
        /// Minimum length in bytes.
        min_length: Option<usize>,
        /// Maximum length in bytes.
        max_length: Option<usize>,
    },
    /// An integer, optionally range-bounded.
    Integer {
        /// Inclusive minimum.
        minimum: Option<i64>,
        /// Inclusive maximum.
        maximum: Option<i64>,
    },
    /// A number (integer or float).
    Number,
    /// A boolean.
    Boolean,
    /// An array with uniform item shape.
    Array {
        /// Schema every item must satisfy.
        items: Box<Schema>,
        /// Minimum number of items.
        min_items: Option<usize>,
        /// Maximum number of items.
        max_items: Option<usize>,
    },
    /// An object with named properties.
    Object {
        /// Property schemas, in declaration order.
        properties: Vec<(String, Schema)>,
        /// Names of properties that must be present.
        required: Vec<String>,
    },
    /// Accepts any value.
    Any,
    /// Accepts only `null`.
    Null,
}

impl Schema {
    /// Creates a string schema.
    #[must_use]
    pub fn string() -> Self {
        Self::String {
            min_length: None,
            max_length: None,
        }
    }

    /// Creates an integer schema.
    #[must_use]
    pub fn integer() -> Self {
        Self::Integer {
            minimum: None,
            maximum: None,
        }
    }

    /// Creates a number schema.
    #[must_use]
    pub fn number() -> Self {
        Self::Number
    }

    /// Creates a boolean schema.
    #[must_use]
    pub fn boolean() -> Self {
        Self::Boolean
    }

    /// Creates an array schema with the given item shape.
    #[must_use]
    pub fn array(items: Schema) -> Self {
        Self::Array {
            items: Box::new(items),
            min_items: None,
            max_items: None,
        }
    }

    /// Creates an object schema from `(name, schema)` pairs.
    ///
    /// All properties start optional; mark them with [`Schema::required`].
    #[must_use]
    pub fn object(properties: Vec<(&str, Schema)>) -> Self {
        Self::Object {
            properties: properties
                .into_iter()
                .map(|(name, schema)| (name.to_string(), schema))
                .collect(),
            required: Vec::new(),
        }
    }

    /// Creates a schema that accepts any value.
    #[must_use]
    pub fn any() -> Self {
        Self::Any
    }

    /// Creates a schema that accepts only `null`.
    #[must_use]
    pub fn null() -> Self {
        Self::Null
    }

    /// Marks an object property as required.
    #[must_use]
    pub fn required(self, name: &str) -> Self {
        match self {
            Self::Object {
                properties,
                mut required,
            } => {
                required.push(name.to_string());
                Self::Object {
                    properties,
                    required,
                }
            }
            other => other,
        }
    }

    /// Sets the minimum length for string schemas.
    #[must_use]
    pub fn min_length(self, len: usize) -> Self {
        match self {
            Self::String { max_length, .. } => Self::String {
                min_length: Some(len),
                max_length,
            },
            other => other,
        }
    }

    /// Sets the maximum length for string schemas.
    #[must_use]
    pub fn max_length(self, len: usize) -> Self {
        match self {
            Self::String { min_length, .. } => Self::String {
                min_length,
                max_length: Some(len),
            },
            other => other,
        }
    }

    /// Sets the inclusive minimum for integer schemas.
    #[must_use]
    pub fn minimum(self, min: i64) -> Self {
        match self {
            Self::Integer { maximum, .. } => Self::Integer {
                minimum: Some(min),
                maximum,
            },
            other => other,
        }
    }

    /// Sets the inclusive maximum for integer schemas.
    #[must_use]
    pub fn maximum(self, max: i64) -> Self {
        match self {
            Self::Integer { minimum, .. } => Self::Integer {
                minimum,
                maximum: Some(max),
            },
            other => other,
        }
    }

    /// Sets the minimum item count for array schemas.
    #[must_use]
    pub fn min_items(self, min: usize) -> Self {
        match self {
            Self::Array {
                items, max_items, ..
            } => Self::Array {
                items,
                min_items: Some(min),
                max_items,
            },
            other => other,
        }
    }

    /// Sets the maximum item count for array schemas.
    #[must_use]
    pub fn max_items(self, max: usize) -> Self {
        match self {
            Self::Array {
                items, min_items, ..
            } => Self::Array {
                items,
                min_items,
                max_items: Some(max),
            },
            other => other,
        }
    }

    fn check(&self, value: &Value, path: &mut Vec<PathSegment>, errors: &mut Vec<FieldError>) {
        match self {
            Self::String {
                min_length,
                max_length,
            } => {
                let Some(s) = value.as_str() else {
                    push_type_error(errors, path, "string", value);
                    return;
                };
                if let Some(min) = min_length {
                    if s.len() < *min {
                        push_error(
                            errors,
                            path,
                            format!("string length {} is less than minimum {min}", s.len()),
                        );
                    }
                }
                if let Some(max) = max_length {
                    if s.len() > *max {
                        push_error(
                            errors,
                            path,
                            format!("string length {} is greater than maximum {max}", s.len()),
                        );
                    }
                }
            }

            Self::Integer { minimum, maximum } => {
                let Some(n) = value.as_i64() else {
                    push_type_error(errors, path, "integer", value);
                    return;
                };
                if let Some(min) = minimum {
                    if n < *min {
                        push_error(errors, path, format!("value {n} is less than minimum {min}"));
                    }
                }
                if let Some(max) = maximum {
                    if n > *max {
                        push_error(
                            errors,
                            path,
                            format!("value {n} is greater than maximum {max}"),
                        );
                    }
                }
            }

            Self::Number => {
                if !value.is_number() {
                    push_type_error(errors, path, "number", value);
                }
            }

            Self::Boolean => {
                if !value.is_boolean() {
                    push_type_error(errors, path, "boolean", value);
                }
            }

            Self::Array {
                items,
                min_items,
                max_items,
            } => {
                let Some(arr) = value.as_array() else {
                    push_type_error(errors, path, "array", value);
                    return;
                };
                if let Some(min) = min_items {
                    if arr.len() < *min {
                        push_error(
                            errors,
                            path,
                            format!("array length {} is less than minimum {min}", arr.len()),
                        );
                    }
                }
                if let Some(max) = max_items {
                    if arr.len() > *max {
                        push_error(
                            errors,
                            path,
                            format!("array length {} is greater than maximum {max}", arr.len()),
                        );
                    }
                }
                for (idx, item) in arr.iter().enumerate() {
                    path.push(PathSegment::Index(idx));
                    items.check(item, path, errors);
                    path.pop();
                }
            }

            Self::Object {
                properties,
                required,
            } => {
                let Some(obj) = value.as_object() else {
                    push_type_error(errors, path, "object", value);
                    return;
                };
                for name in required {
                    if !obj.contains_key(name) {
                        path.push(PathSegment::Key(name.clone()));
                        push_error(errors, path, format!("missing required property '{name}'"));
                        path.pop();
                    }
                }
                for (name, schema) in properties {
                    if let Some(property) = obj.get(name) {
                        path.push(PathSegment::Key(name.clone()));
                        schema.check(property, path, errors);
                        path.pop();
                    }
                }
            }

            Self::Any => {}

            Self::Null => {
                if !value.is_null() {
                    push_type_error(errors, path, "null", value);
                }
            }
        }
    }
}

fn push_error(errors: &mut Vec<FieldError>, path: &[PathSegment], message: String) {
    errors.push(FieldError {
        path: path.to_vec(),
        message,
    });
}

fn push_type_error(errors: &mut Vec<FieldError>, path: &[PathSegment], expected: &str, got: &Value) {
    push_error(
        errors,
        path,
        format!("expected {expected}, got {}", value_type_name(got)),
    );
}

/// Returns a human-readable name for a JSON value type.
fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Validates a value against an optional schema.
///
/// An absent schema is treated as "always valid". The value is never
/// mutated; all violations are collected, one [`FieldError`] per violating
/// path, in document order.
#[must_use]
pub fn validate(schema: Option<&Schema>, value: &Value) -> ValidationReport {
    let Some(schema) = schema else {
        return ValidationReport::ok();
    };

    let mut path = Vec::new();
    let mut errors = Vec::new();
    schema.check(value, &mut path, &mut errors);

    ValidationReport {
        valid: errors.is_empty(),
        errors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_absent_schema_is_always_valid() {
        let report = validate(None, &json!({"anything": "goes"}));
        assert!(report.valid);
        assert!(report.errors.is_empty());
    }

    #[test]
    fn test_string_schema() {
        let schema = Schema::string().min_length(2).max_length(5);

        assert!(validate(Some(&schema), &json!("abc")).valid);
        assert!(!validate(Some(&schema), &json!("a")).valid);
        assert!(!validate(Some(&schema), &json!("abcdef")).valid);
        assert!(!validate(Some(&schema), &json!(42)).valid);
    }

    #[test]
    fn test_integer_schema_bounds() {
        let schema = Schema::integer().minimum(0).maximum(100);

        assert!(validate(Some(&schema), &json!(0)).valid);
        assert!(validate(Some(&schema), &json!(100)).valid);

        let report = validate(Some(&schema), &json!(-1));
        assert!(!report.valid);
        assert_eq!(report.errors[0].message, "value -1 is less than minimum 0");

        assert!(!validate(Some(&schema), &json!("50")).valid);
        assert!(!validate(Some(&schema), &json!(3.5)).valid);
    }

    #[test]
    fn test_number_and_boolean_schemas() {
        assert!(validate(Some(&Schema::number()), &json!(3.25)).valid);
        assert!(validate(Some(&Schema::number()), &json!(7)).valid);
        assert!(!validate(Some(&Schema::number()), &json!("3.25")).valid);

        assert!(validate(Some(&Schema::boolean()), &json!(true)).valid);
        assert!(!validate(Some(&Schema::boolean()), &json!(1)).valid);
    }

    #[test]
    fn test_null_and_any_schemas() {
        assert!(validate(Some(&Schema::null()), &json!(null)).valid);
        assert!(!validate(Some(&Schema::null()), &json!("null")).valid);

        assert!(validate(Some(&Schema::any()), &json!([1, "two", null])).valid);
    }

    #[test]
    fn test_object_missing_required_property() {
        let schema = Schema::object(vec![("name", Schema::string())]).required("name");

        let report = validate(Some(&schema), &json!({}));
        assert!(!report.valid);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].path, vec![PathSegment::Key("name".to_string())]);
        assert_eq!(report.errors[0].message, "missing required property 'name'");
    }

    #[test]
    fn test_object_collects_all_violations() {
        let schema = Schema::object(vec![
            ("name", Schema::string()),
            ("age", Schema::integer().minimum(0)),
        ])
        .required("name");

        let report = validate(Some(&schema), &json!({ "age": -3 }));
        assert!(!report.valid);
        assert_eq!(report.errors.len(), 2);
        assert_eq!(report.errors[0].path, vec![PathSegment::Key("name".to_string())]);
        assert_eq!(report.errors[1].path, vec![PathSegment::Key("age".to_string())]);
    }

    #[test]
    fn test_nested_array_paths() {
        let schema = Schema::object(vec![(
            "users",
            Schema::array(Schema::object(vec![("name", Schema::string())]).required("name")),
        )]);

        let report = validate(
            Some(&schema),
            &json!({ "users": [ {"name": "Alice"}, {"name": 123} ] }),
        );
        assert!(!report.valid);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(
            report.errors[0].path,
            vec![
                PathSegment::Key("users".to_string()),
                PathSegment::Index(1),
                PathSegment::Key("name".to_string()),
            ]
        );
        assert_eq!(report.errors[0].message, "expected string, got number");
    }

    #[test]
    fn test_array_length_bounds() {
        let schema = Schema::array(Schema::integer()).min_items(1).max_items(2);

        assert!(validate(Some(&schema), &json!([1])).valid);
        assert!(!validate(Some(&schema), &json!([])).valid);
        assert!(!validate(Some(&schema), &json!([1, 2, 3])).valid);

        // Item violations are reported alongside length violations.
        let report = validate(Some(&schema), &json!([1, "two", 3]));
        assert_eq!(report.errors.len(), 2);
    }

    #[test]
    fn test_field_error_path_serialization() {
        let error = FieldError {
            path: vec![
                PathSegment::Key("users".to_string()),
                PathSegment::Index(1),
                PathSegment::Key("name".to_string()),
            ],
            message: "expected string, got number".to_string(),
        };

        let json = serde_json::to_value(&error).expect("serialization should work");
        assert_eq!(json["path"], json!(["users", 1, "name"]));
        assert_eq!(json["message"], "expected string, got number");
    }

    #[test]
    fn test_field_error_display() {
        let error = FieldError {
            path: vec![PathSegment::Key("age".to_string()), PathSegment::Index(0)],
            message: "bad".to_string(),
        };
        assert_eq!(error.to_string(), "$.age[0]: bad");
    }

    #[test]
    fn test_constraint_setters_noop_on_other_variants() {
        // min_length on an integer schema leaves it untouched.
        let schema = Schema::integer().min_length(3);
        assert_eq!(schema, Schema::integer());
    }

    #[test]
    fn test_schema_serialization_is_tagged() {
        let schema = Schema::object(vec![("name", Schema::string())]).required("name");
        let json = serde_json::to_string(&schema).expect("serialization should work");
        assert!(json.contains("\"type\":\"object\""));
        assert!(json.contains("\"name\""));
    }
}
