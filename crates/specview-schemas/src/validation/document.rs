//! Structural validation of API description documents
//!
//! The renderer reads a handful of fields without checking for them. This
//! validator rejects documents that lack any of them before rendering starts:
//!
//! - `info.title` is a string and `paths` is an object
//! - every operation has `tags` and `parameters`; `responses` and a parameter's
//!   `in` may be absent but keep their types when present
//! - a parameter's `required` flag, when given, is a boolean
//! - every path item declares at least one HTTP method
//!
//! Copyright (c) 2025 Specview Team
//! Licensed under the Apache-2.0 license

use crate::validation::error::{ValidationError, ValidationErrors, ValidationResult, Violation};
use serde_json::{json, Map, Value};
use tracing::debug;

/// Operation keys of a path item, in the order OpenAPI lists them
pub const HTTP_METHODS: &[&str] = &[
    "get", "put", "post", "delete", "options", "head", "patch", "trace",
];

/// Whether a path-item key names an operation
pub fn is_http_method(key: &str) -> bool {
    HTTP_METHODS.contains(&key)
}

fn structure_schema() -> Value {
    let operation_ref = json!({"$ref": "#/$defs/operation"});
    let operations: Map<String, Value> = HTTP_METHODS
        .iter()
        .map(|method| (method.to_string(), operation_ref.clone()))
        .collect();

    json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "type": "object",
        "required": ["info", "paths"],
        "properties": {
            "info": {
                "type": "object",
                "required": ["title"],
                "properties": {
                    "title": {"type": "string"},
                    "description": {"type": "string"}
                }
            },
            "basePath": {"type": "string"},
            "schemes": {"type": "array", "items": {"type": "string"}},
            "paths": {
                "type": "object",
                "additionalProperties": {
                    "type": "object",
                    "properties": operations
                }
            }
        },
        "$defs": {
            "operation": {
                "type": "object",
                "required": ["tags", "parameters"],
                "properties": {
                    "operationId": {"type": "string"},
                    "tags": {"type": "array", "items": {"type": "string"}},
                    "schemes": {"type": "array", "items": {"type": "string"}},
                    "parameters": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "properties": {
                                "in": {"type": "string"},
                                "required": {"type": "boolean"}
                            }
                        }
                    },
                    "responses": {"type": "object"}
                }
            }
        }
    })
}

/// Validator for the document shape the renderer depends on
pub struct DocumentValidator {
    schema: jsonschema::Validator,
}

impl DocumentValidator {
    /// Compile the built-in structural schema
    pub fn new() -> Result<Self, ValidationError> {
        let schema = jsonschema::validator_for(&structure_schema()).map_err(|e| {
            ValidationError::new("", format!("structural schema failed to compile: {}", e))
        })?;
        Ok(Self { schema })
    }

    /// Validate `document`, collecting every problem
    pub fn validate(&self, document: &Value) -> ValidationResult<()> {
        let mut errors = ValidationErrors::new();

        for error in self.schema.iter_errors(document) {
            let schema_path = error.schema_path.to_string();
            let rule = schema_path
                .rsplit('/')
                .next()
                .filter(|segment| !segment.is_empty())
                .unwrap_or("schema")
                .to_string();

            errors.add(
                ValidationError::new(error.instance_path.to_string(), error.to_string())
                    .with_violation(Violation::new(rule, schema_path, describe(error.instance.as_ref()))),
            );
        }

        check_path_methods(document, &mut errors);

        debug!(problems = errors.len(), "structural validation finished");
        errors.into_result()
    }
}

/// Every path item must declare at least one operation
fn check_path_methods(document: &Value, errors: &mut ValidationErrors) {
    let Some(paths) = document.get("paths").and_then(Value::as_object) else {
        return;
    };

    for (path, item) in paths {
        let Some(item) = item.as_object() else {
            continue;
        };

        if !item.keys().any(|key| is_http_method(key)) {
            let keys: Vec<&str> = item.keys().map(String::as_str).collect();
            errors.add(
                ValidationError::new(
                    format!("/paths/{}", escape_pointer_segment(path)),
                    format!("path '{}' declares no HTTP method", path),
                )
                .with_violation(Violation::new(
                    "path-has-operation",
                    format!("one of {}", HTTP_METHODS.join(", ")),
                    if keys.is_empty() {
                        "an empty path item".to_string()
                    } else {
                        format!("keys {}", keys.join(", "))
                    },
                )),
            );
        }
    }
}

fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(_) => "a boolean".to_string(),
        Value::Number(_) => "a number".to_string(),
        Value::String(_) => "a string".to_string(),
        Value::Array(items) => format!("an array of {} items", items.len()),
        Value::Object(map) => format!("an object with {} keys", map.len()),
    }
}

/// Escape a key for use as a JSON pointer segment
pub fn escape_pointer_segment(segment: &str) -> String {
    segment.replace('~', "~0").replace('/', "~1")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_document() -> Value {
        json!({
            "swagger": "2.0",
            "info": {"title": "Pets", "description": "Pet store"},
            "basePath": "/pet-store/v1",
            "paths": {
                "/pets/{id}": {
                    "parameters": [],
                    "get": {
                        "operationId": "getPet",
                        "tags": ["pets"],
                        "parameters": [{"name": "id", "in": "path", "type": "string", "required": true}],
                        "responses": {"200": {"description": "OK"}}
                    }
                }
            }
        })
    }

    #[test]
    fn test_valid_document_passes() {
        let validator = DocumentValidator::new().unwrap();
        assert!(validator.validate(&valid_document()).is_ok());
    }

    #[test]
    fn test_missing_title_and_paths() {
        let validator = DocumentValidator::new().unwrap();
        let errors = validator.validate(&json!({"info": {}})).unwrap_err();

        assert!(errors.len() >= 2);
        let rules: Vec<&str> = errors
            .iter()
            .flat_map(|e| e.schema_violations.iter().map(|v| v.rule.as_str()))
            .collect();
        assert!(rules.iter().all(|rule| *rule == "required"));
    }

    #[test]
    fn test_operation_without_tags_is_rejected() {
        let validator = DocumentValidator::new().unwrap();
        let mut document = valid_document();
        document["paths"]["/pets/{id}"]["get"]
            .as_object_mut()
            .unwrap()
            .remove("tags");

        let errors = validator.validate(&document).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.errors[0].path, "/paths/~1pets~1{id}/get");
        assert!(errors.errors[0].message.contains("tags"));
    }

    #[test]
    fn test_missing_responses_and_location_are_allowed() {
        let validator = DocumentValidator::new().unwrap();
        let mut document = valid_document();
        let operation = &mut document["paths"]["/pets/{id}"]["get"];
        operation.as_object_mut().unwrap().remove("responses");
        operation["parameters"] = json!([{"name": "q"}]);

        assert!(validator.validate(&document).is_ok());
    }

    #[test]
    fn test_mistyped_location_and_responses_are_rejected() {
        let validator = DocumentValidator::new().unwrap();
        let mut document = valid_document();
        document["paths"]["/pets/{id}"]["get"]["parameters"] = json!([{"name": "id", "in": 3}]);
        document["paths"]["/pets/{id}"]["get"]["responses"] = json!(["200"]);

        let errors = validator.validate(&document).unwrap_err();
        let paths: Vec<&str> = errors.iter().map(|e| e.path.as_str()).collect();
        assert!(paths.contains(&"/paths/~1pets~1{id}/get/parameters/0/in"));
        assert!(paths.contains(&"/paths/~1pets~1{id}/get/responses"));
    }

    #[test]
    fn test_non_boolean_required_flag_is_rejected() {
        let validator = DocumentValidator::new().unwrap();
        let mut document = valid_document();
        document["paths"]["/pets/{id}"]["get"]["parameters"][0]["required"] = json!("yes");

        let errors = validator.validate(&document).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.errors[0].path, "/paths/~1pets~1{id}/get/parameters/0/required");
    }

    #[test]
    fn test_path_without_method_is_rejected() {
        let validator = DocumentValidator::new().unwrap();
        let mut document = valid_document();
        document["paths"]["/empty"] = json!({"parameters": []});

        let errors = validator.validate(&document).unwrap_err();
        assert_eq!(errors.len(), 1);
        let error = &errors.errors[0];
        assert_eq!(error.path, "/paths/~1empty");
        assert_eq!(error.schema_violations[0].rule, "path-has-operation");
        assert_eq!(error.schema_violations[0].actual, "keys parameters");
    }

    #[test]
    fn test_is_http_method() {
        assert!(is_http_method("get"));
        assert!(is_http_method("trace"));
        assert!(!is_http_method("parameters"));
        assert!(!is_http_method("x-internal"));
        assert!(!is_http_method("GET"));
    }
}
