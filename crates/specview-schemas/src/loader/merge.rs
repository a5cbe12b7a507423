//! `allOf` flattening
//!
//! Runs on a fully dereferenced document. Every object carrying `allOf` is
//! replaced by its own keys followed by each member, merged in order:
//!
//! - `properties` merge key by key; a key keeps the position of its first appearance
//! - `required` lists union in first-seen order
//! - `items` merge recursively
//! - any other key takes the last value seen
//!
//! Names inside `properties` and similar maps are never read as keywords, and
//! payloads such as `example` or `default` are left as written.
//!
//! Copyright (c) 2025 Specview Team
//! Licensed under the Apache-2.0 license

use crate::loader::error::{LoaderError, LoaderResult};
use crate::loader::keywords::{classify, KeywordKind};
use crate::validation::escape_pointer_segment;
use serde_json::{Map, Value};
use tracing::trace;

const ALL_OF: &str = "allOf";

/// Flattens composition keywords into plain schemas
#[derive(Debug, Default, Clone, Copy)]
pub struct CompositionMerger;

impl CompositionMerger {
    pub fn new() -> Self {
        Self
    }

    /// Flatten every `allOf` in `document`
    pub fn merge(&self, document: Value) -> LoaderResult<Value> {
        self.merge_value(document, "")
    }

    fn merge_value(&self, value: Value, pointer: &str) -> LoaderResult<Value> {
        match value {
            Value::Object(obj) => self.merge_object(obj, pointer).map(Value::Object),
            Value::Array(items) => items
                .into_iter()
                .enumerate()
                .map(|(index, item)| self.merge_value(item, &format!("{}/{}", pointer, index)))
                .collect::<LoaderResult<Vec<_>>>()
                .map(Value::Array),
            other => Ok(other),
        }
    }

    fn merge_object(&self, obj: Map<String, Value>, pointer: &str) -> LoaderResult<Map<String, Value>> {
        let mut merged_children = Map::with_capacity(obj.len());
        for (key, value) in obj {
            let child_pointer = format!("{}/{}", pointer, escape_pointer_segment(&key));
            let merged = match classify(&key) {
                KeywordKind::Literal => value,
                KeywordKind::NameMap => self.merge_name_map(value, &child_pointer)?,
                KeywordKind::Node => self.merge_value(value, &child_pointer)?,
            };
            merged_children.insert(key, merged);
        }

        let Some(all_of) = merged_children.remove(ALL_OF) else {
            return Ok(merged_children);
        };

        let all_of_pointer = format!("{}/{}", pointer, ALL_OF);
        let Value::Array(members) = all_of else {
            return Err(LoaderError::merge_error(all_of_pointer, "allOf must be an array"));
        };

        trace!(pointer, members = members.len(), "flattening allOf");
        let mut result = merged_children;
        for (index, member) in members.into_iter().enumerate() {
            match member {
                Value::Object(member) => merge_schema_into(&mut result, member),
                other => {
                    return Err(LoaderError::merge_error(
                        format!("{}/{}", all_of_pointer, index),
                        format!("allOf members must be objects, found {}", type_label(&other)),
                    ))
                }
            }
        }

        Ok(result)
    }

    /// Walk each entry of a name map as a node; the map's own keys are never keywords
    fn merge_name_map(&self, value: Value, pointer: &str) -> LoaderResult<Value> {
        let Value::Object(entries) = value else {
            return self.merge_value(value, pointer);
        };

        entries
            .into_iter()
            .map(|(name, entry)| -> LoaderResult<(String, Value)> {
                let entry_pointer = format!("{}/{}", pointer, escape_pointer_segment(&name));
                Ok((name, self.merge_value(entry, &entry_pointer)?))
            })
            .collect::<LoaderResult<Map<String, Value>>>()
            .map(Value::Object)
    }
}

/// Merge `source` into `target` following the composition rules
pub fn merge_schema_into(target: &mut Map<String, Value>, source: Map<String, Value>) {
    for (key, value) in source {
        let leftover = match target.get_mut(&key) {
            Some(existing) => merge_keyword(&key, existing, value),
            None => Some(value),
        };
        if let Some(value) = leftover {
            target.insert(key, value);
        }
    }
}

/// Combine `incoming` into `existing` in place, or hand it back when it replaces the old value
fn merge_keyword(key: &str, existing: &mut Value, incoming: Value) -> Option<Value> {
    match (key, existing, incoming) {
        ("properties", Value::Object(existing), Value::Object(incoming)) => {
            for (name, property) in incoming {
                let leftover = match existing.get_mut(&name) {
                    Some(current) => merge_schema(current, property),
                    None => Some(property),
                };
                if let Some(property) = leftover {
                    existing.insert(name, property);
                }
            }
            None
        }
        ("required", Value::Array(existing), Value::Array(incoming)) => {
            for name in incoming {
                if !existing.contains(&name) {
                    existing.push(name);
                }
            }
            None
        }
        ("items", existing, incoming) => merge_schema(existing, incoming),
        (_, _, incoming) => Some(incoming),
    }
}

fn merge_schema(existing: &mut Value, incoming: Value) -> Option<Value> {
    match (existing, incoming) {
        (Value::Object(existing), Value::Object(incoming)) => {
            merge_schema_into(existing, incoming);
            None
        }
        (_, incoming) => Some(incoming),
    }
}

fn type_label(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
