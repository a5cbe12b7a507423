//! Data model for rendering
//!
//! Every optional field is filled with its rendering default when the model is
//! built from a document value, so the renderers never branch on absence:
//! a missing `type` becomes `"Object"`, a missing `description` becomes `""`,
//! a missing `required` list becomes empty.
//!
//! Copyright (c) 2025 Specview Team
//! Licensed under the Apache-2.0 license

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use specview_schemas::is_http_method;
use std::fmt;

/// Type label used when a schema declares no `type`
pub const DEFAULT_TYPE_LABEL: &str = "Object";

/// One schema node, with children in document order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaProperty {
    /// Declared type, `"Object"` when absent
    pub type_name: String,
    /// Description, empty when absent
    pub description: String,
    /// Names of this node's own children that are required
    pub required: Vec<String>,
    /// Child properties in insertion order
    pub properties: Vec<(String, SchemaProperty)>,
    /// Element schema for arrays
    pub items: Option<Box<SchemaProperty>>,
    /// Example payload attached to this schema
    pub example: Option<Value>,
}

impl Default for SchemaProperty {
    fn default() -> Self {
        Self {
            type_name: DEFAULT_TYPE_LABEL.to_string(),
            description: String::new(),
            required: Vec::new(),
            properties: Vec::new(),
            items: None,
            example: None,
        }
    }
}

impl SchemaProperty {
    /// Build from a schema value. Non-object values yield the all-defaults node.
    pub fn from_value(value: &Value) -> Self {
        let Some(schema) = value.as_object() else {
            return Self::default();
        };

        let type_name = match schema.get("type") {
            Some(Value::String(name)) => name.clone(),
            Some(Value::Array(names)) => {
                let names: Vec<&str> = names.iter().filter_map(Value::as_str).collect();
                if names.is_empty() {
                    DEFAULT_TYPE_LABEL.to_string()
                } else {
                    names.join(" | ")
                }
            }
            _ => DEFAULT_TYPE_LABEL.to_string(),
        };

        let properties = schema
            .get("properties")
            .and_then(Value::as_object)
            .map(|props| {
                props
                    .iter()
                    .map(|(name, child)| (name.clone(), Self::from_value(child)))
                    .collect()
            })
            .unwrap_or_default();

        Self {
            type_name,
            description: string_field(value, "description"),
            required: string_list(schema.get("required")),
            properties,
            items: schema
                .get("items")
                .filter(|items| items.is_object())
                .map(|items| Box::new(Self::from_value(items))),
            example: schema.get("example").filter(|v| !v.is_null()).cloned(),
        }
    }

    /// Neither child properties nor array-item properties
    pub fn is_leaf(&self) -> bool {
        self.properties.is_empty() && self.item_properties().is_none()
    }

    /// The element schema, when it has child properties to render
    pub fn item_properties(&self) -> Option<&SchemaProperty> {
        self.items.as_deref().filter(|items| !items.properties.is_empty())
    }

    pub fn is_required(&self, child: &str) -> bool {
        self.required.iter().any(|name| name == child)
    }
}

/// Where a parameter is carried
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParameterLocation {
    Path,
    Query,
    Header,
    Body,
    FormData,
    /// Anything else, including a missing `in`
    Other(String),
}

impl ParameterLocation {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Path => "path",
            Self::Query => "query",
            Self::Header => "header",
            Self::Body => "body",
            Self::FormData => "formData",
            Self::Other(other) => other,
        }
    }
}

impl From<&str> for ParameterLocation {
    fn from(value: &str) -> Self {
        match value {
            "path" => Self::Path,
            "query" => Self::Query,
            "header" => Self::Header,
            "body" => Self::Body,
            "formData" => Self::FormData,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for ParameterLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One operation parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterDescriptor {
    pub name: String,
    pub type_name: String,
    pub description: String,
    /// Only a JSON `true` marks a parameter required; any other value reads as `false`
    pub required: bool,
    pub location: ParameterLocation,
    /// Payload schema, body parameters only
    pub schema: Option<SchemaProperty>,
    /// Example payload taken from the schema, body parameters only
    pub example: Option<Value>,
}

impl ParameterDescriptor {
    pub fn from_value(value: &Value) -> Self {
        let location = ParameterLocation::from(value.get("in").and_then(Value::as_str).unwrap_or(""));
        let schema = match location {
            ParameterLocation::Body => value.get("schema").map(SchemaProperty::from_value),
            _ => None,
        };

        Self {
            name: string_field(value, "name"),
            type_name: string_field(value, "type"),
            description: string_field(value, "description"),
            required: value.get("required").and_then(Value::as_bool).unwrap_or(false),
            example: schema.as_ref().and_then(|schema| schema.example.clone()),
            location,
            schema,
        }
    }
}

/// One declared response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseDescriptor {
    pub status_code: String,
    pub description: String,
    pub schema: Option<SchemaProperty>,
    pub example: Option<Value>,
}

impl ResponseDescriptor {
    pub fn from_value(status_code: &str, value: &Value) -> Self {
        let schema = value.get("schema").map(SchemaProperty::from_value);
        Self {
            status_code: status_code.to_string(),
            description: string_field(value, "description"),
            example: schema.as_ref().and_then(|schema| schema.example.clone()),
            schema,
        }
    }
}

/// One (path, method) operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointDescriptor {
    pub path: String,
    /// Lowercase HTTP method as written in the document
    pub method: String,
    pub operation_id: String,
    pub description: String,
    pub tags: Vec<String>,
    pub parameters: Vec<ParameterDescriptor>,
    /// Responses in document order
    pub responses: Vec<ResponseDescriptor>,
    pub schemes: Option<Vec<String>>,
}

impl EndpointDescriptor {
    /// Build from an operation object.
    ///
    /// `tags` and `parameters` must be present. `schemes` on the operation
    /// replace `inherited_schemes` from the document.
    pub fn from_operation(
        path: &str,
        method: &str,
        operation: &Value,
        inherited_schemes: Option<&[String]>,
    ) -> Result<Self> {
        let malformed = |reason: &str| Error::malformed_endpoint(method, path, reason);

        if !operation.is_object() {
            return Err(malformed("operation is not an object"));
        }

        let tags = match operation.get("tags") {
            Some(Value::Array(tags)) => tags.iter().map(display_scalar).collect(),
            Some(_) => return Err(malformed("'tags' is not an array")),
            None => return Err(malformed("missing 'tags'")),
        };

        let parameters = match operation.get("parameters") {
            Some(Value::Array(params)) => params.iter().map(ParameterDescriptor::from_value).collect(),
            Some(_) => return Err(malformed("'parameters' is not an array")),
            None => return Err(malformed("missing 'parameters'")),
        };

        let responses = match operation.get("responses") {
            Some(Value::Object(responses)) => responses
                .iter()
                .map(|(code, response)| ResponseDescriptor::from_value(code, response))
                .collect(),
            Some(Value::Null) | None => Vec::new(),
            Some(_) => return Err(malformed("'responses' is not an object")),
        };

        let schemes = match operation.get("schemes") {
            Some(own) => Some(string_list(Some(own))),
            None => inherited_schemes.map(<[String]>::to_vec),
        };

        Ok(Self {
            path: path.to_string(),
            method: method.to_string(),
            operation_id: string_field(operation, "operationId"),
            description: string_field(operation, "description"),
            tags,
            parameters,
            responses,
            schemes,
        })
    }

    /// `"GET /pets"`
    pub fn label(&self) -> String {
        format!("{} {}", self.method.to_uppercase(), self.path)
    }

    /// The response keyed exactly `"200"`
    pub fn success_response(&self) -> Option<&ResponseDescriptor> {
        self.responses.iter().find(|response| response.status_code == "200")
    }

    /// Parameters carried in `location`, in declaration order
    pub fn parameters_in<'a>(
        &'a self,
        location: &'a ParameterLocation,
    ) -> impl Iterator<Item = &'a ParameterDescriptor> + 'a {
        self.parameters.iter().filter(move |param| &param.location == location)
    }
}

/// A whole document ready for page assembly
#[derive(Debug)]
pub struct ApiDocument {
    pub title: String,
    /// Markdown source of the API description
    pub description: String,
    pub base_path: Option<String>,
    pub schemes: Option<Vec<String>>,
    /// Endpoints in document order. Operations that could not be normalized
    /// keep their position as errors.
    pub endpoints: Vec<Result<EndpointDescriptor>>,
}

impl ApiDocument {
    /// Build from a normalized document value.
    ///
    /// A missing `info.title` or `paths`, or a path item without any HTTP
    /// method, fails the whole document. Faults inside a single operation are
    /// kept in [`ApiDocument::endpoints`].
    pub fn from_value(value: &Value) -> Result<Self> {
        let title = value
            .get("info")
            .and_then(|info| info.get("title"))
            .and_then(Value::as_str)
            .ok_or_else(|| Error::malformed_document("missing 'info.title'"))?
            .to_string();

        let paths = value
            .get("paths")
            .and_then(Value::as_object)
            .ok_or_else(|| Error::malformed_document("missing 'paths' object"))?;

        let schemes = value.get("schemes").map(|schemes| string_list(Some(schemes)));

        let mut endpoints = Vec::new();
        for (path, item) in paths {
            let item = item.as_object().ok_or_else(|| {
                Error::malformed_document(format!("path '{}' is not an object", path))
            })?;

            let before = endpoints.len();
            for (method, operation) in item.iter().filter(|(key, _)| is_http_method(key)) {
                endpoints.push(EndpointDescriptor::from_operation(
                    path,
                    method,
                    operation,
                    schemes.as_deref(),
                ));
            }

            if endpoints.len() == before {
                return Err(Error::malformed_document(format!(
                    "path '{}' declares no HTTP method",
                    path
                )));
            }
        }

        Ok(Self {
            title,
            description: value
                .get("info")
                .map(|info| string_field(info, "description"))
                .unwrap_or_default(),
            base_path: value.get("basePath").and_then(Value::as_str).map(str::to_string),
            schemes,
            endpoints,
        })
    }

    /// Build from a value and fail on the first malformed operation
    pub fn from_value_strict(value: &Value) -> Result<Self> {
        let mut document = Self::from_value(value)?;
        let endpoints = std::mem::take(&mut document.endpoints)
            .into_iter()
            .map(|endpoint| endpoint.map(Ok))
            .collect::<Result<Vec<_>>>()?;
        document.endpoints = endpoints;
        Ok(document)
    }

    /// Successfully normalized endpoints
    pub fn valid_endpoints(&self) -> impl Iterator<Item = &EndpointDescriptor> {
        self.endpoints.iter().filter_map(|endpoint| endpoint.as_ref().ok())
    }
}

fn string_field(value: &Value, key: &str) -> String {
    value
        .get(key)
        .map(display_scalar)
        .unwrap_or_default()
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(Value::as_str).map(str::to_string).collect())
        .unwrap_or_default()
}

/// Plain text form of a scalar; strings are taken verbatim and null is empty
fn display_scalar(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
