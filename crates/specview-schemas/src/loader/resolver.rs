//! `$ref` resolution
//!
//! This module handles:
//! - Same-document JSON pointers (`#/definitions/Pet`)
//! - External documents, optionally with a pointer (`common.yaml#/Error`)
//! - Circular reference detection
//! - Path traversal security
//!
//! `$ref` objects inside payloads (`example`, `default`, `x-*`) are data and stay as written.
//!
//! Copyright (c) 2025 Specview Team
//! Licensed under the Apache-2.0 license

use crate::loader::error::{LoaderError, LoaderResult};
use crate::loader::keywords::{classify, KeywordKind};
use crate::loader::parser::DocumentParser;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, trace};

/// Default limit on nested reference chains
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Context for resolution operations
#[derive(Debug, Clone)]
pub struct ResolverContext {
    /// Directory external references are resolved against and may not escape
    pub base_dir: Option<PathBuf>,
    /// References currently being followed, outermost first
    pub resolution_stack: Vec<String>,
    /// Maximum length of a reference chain
    pub max_depth: usize,
}

impl ResolverContext {
    /// Create a new resolver context
    pub fn new(base_dir: Option<PathBuf>) -> Self {
        Self {
            base_dir,
            resolution_stack: Vec::new(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Push a reference onto the resolution stack
    pub fn push_reference(&mut self, key: String) -> LoaderResult<()> {
        if self.resolution_stack.contains(&key) {
            let mut chain = self.resolution_stack.clone();
            chain.push(key);
            return Err(LoaderError::circular_reference(&chain));
        }

        if self.resolution_stack.len() >= self.max_depth {
            let mut chain = self.resolution_stack.clone();
            chain.push(key);
            return Err(LoaderError::circular_reference(&chain));
        }

        self.resolution_stack.push(key);
        Ok(())
    }

    /// Pop a reference from the resolution stack
    pub fn pop_reference(&mut self) -> Option<String> {
        self.resolution_stack.pop()
    }

    /// Check that a path stays inside the base directory
    pub fn is_safe_path(&self, path: &Path) -> bool {
        let Some(base_dir) = &self.base_dir else {
            return false;
        };

        let full_path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            base_dir.join(path)
        };

        match (full_path.canonicalize(), base_dir.canonicalize()) {
            (Ok(canonical_path), Ok(canonical_base)) => canonical_path.starts_with(&canonical_base),
            _ => false,
        }
    }
}

/// The document a value was read from; same-document pointers resolve against its root
#[derive(Debug, Clone)]
struct Scope {
    root: Arc<Value>,
    file: Option<PathBuf>,
}

impl Scope {
    fn label(&self) -> String {
        match &self.file {
            Some(file) => file.display().to_string(),
            None => String::new(),
        }
    }

    fn source_path(&self) -> PathBuf {
        self.file.clone().unwrap_or_else(|| PathBuf::from("<document>"))
    }
}

/// Reference resolver producing a document with no remaining `$ref` objects
#[derive(Debug)]
pub struct ReferenceResolver {
    parser: Arc<DocumentParser>,
    cache: HashMap<PathBuf, Arc<Value>>,
}

impl ReferenceResolver {
    /// Create a new reference resolver
    pub fn new() -> Self {
        Self::with_parser(Arc::new(DocumentParser::new()))
    }

    /// Create a resolver with a shared parser
    pub fn with_parser(parser: Arc<DocumentParser>) -> Self {
        Self {
            parser,
            cache: HashMap::new(),
        }
    }

    /// Resolve all references in `document`.
    ///
    /// `source` names the file the document came from, if any; same-document
    /// pointers inside external files resolve against those files instead.
    pub fn resolve(
        &mut self,
        document: Value,
        source: Option<&Path>,
        context: &mut ResolverContext,
    ) -> LoaderResult<Value> {
        let root = Arc::new(document);
        let scope = Scope {
            root: Arc::clone(&root),
            file: source.map(Path::to_path_buf),
        };
        let resolved = self.resolve_value(&root, &scope, context)?;
        debug!(cached_files = self.cache.len(), "references resolved");
        Ok(resolved)
    }

    fn resolve_value(
        &mut self,
        value: &Value,
        scope: &Scope,
        context: &mut ResolverContext,
    ) -> LoaderResult<Value> {
        match value {
            Value::Object(obj) => {
                if let Some(reference) = obj.get("$ref").and_then(Value::as_str) {
                    return self.resolve_reference(reference, scope, context);
                }

                let mut resolved = Map::with_capacity(obj.len());
                for (key, val) in obj {
                    let value = match classify(key) {
                        KeywordKind::Literal => val.clone(),
                        KeywordKind::NameMap => self.resolve_name_map(val, scope, context)?,
                        KeywordKind::Node => self.resolve_value(val, scope, context)?,
                    };
                    resolved.insert(key.clone(), value);
                }
                Ok(Value::Object(resolved))
            }
            Value::Array(arr) => arr
                .iter()
                .map(|item| self.resolve_value(item, scope, context))
                .collect::<LoaderResult<Vec<_>>>()
                .map(Value::Array),
            _ => Ok(value.clone()),
        }
    }

    /// Resolve each entry of a name map; an entry called `$ref` is just a name
    fn resolve_name_map(
        &mut self,
        value: &Value,
        scope: &Scope,
        context: &mut ResolverContext,
    ) -> LoaderResult<Value> {
        let Value::Object(entries) = value else {
            return self.resolve_value(value, scope, context);
        };

        let mut resolved = Map::with_capacity(entries.len());
        for (name, entry) in entries {
            resolved.insert(name.clone(), self.resolve_value(entry, scope, context)?);
        }
        Ok(Value::Object(resolved))
    }

    /// Resolve a single `$ref` string
    fn resolve_reference(
        &mut self,
        reference: &str,
        scope: &Scope,
        context: &mut ResolverContext,
    ) -> LoaderResult<Value> {
        let (file_part, pointer) = match reference.find('#') {
            Some(hash_pos) => (&reference[..hash_pos], &reference[hash_pos + 1..]),
            None => (reference, ""),
        };

        let target_scope = if file_part.is_empty() {
            scope.clone()
        } else {
            self.external_scope(reference, file_part, scope, context)?
        };

        context.push_reference(format!("{}#{}", target_scope.label(), pointer))?;
        trace!(reference, depth = context.resolution_stack.len(), "following reference");

        let root = Arc::clone(&target_scope.root);
        let target = apply_json_pointer(&root, pointer, reference, &target_scope.source_path())?;
        let resolved = self.resolve_value(target, &target_scope, context)?;

        context.pop_reference();
        Ok(resolved)
    }

    /// Locate, check and load the document an external reference points into
    fn external_scope(
        &mut self,
        reference: &str,
        file_part: &str,
        scope: &Scope,
        context: &ResolverContext,
    ) -> LoaderResult<Scope> {
        let relative_to = scope
            .file
            .as_deref()
            .and_then(Path::parent)
            .map(Path::to_path_buf)
            .or_else(|| context.base_dir.clone())
            .ok_or_else(|| {
                LoaderError::reference_error(
                    reference.to_string(),
                    scope.source_path(),
                    "external references require a base directory".to_string(),
                )
            })?;

        let absolute_path = relative_to.join(file_part);
        if !context.is_safe_path(&absolute_path) {
            return Err(LoaderError::path_traversal(
                reference.to_string(),
                scope.source_path(),
            ));
        }

        let canonical_path = absolute_path.canonicalize().map_err(|e| {
            LoaderError::reference_error(reference.to_string(), scope.source_path(), e.to_string())
        })?;

        let root = self.load_referenced_file(&canonical_path)?;
        Ok(Scope {
            root,
            file: Some(canonical_path),
        })
    }

    /// Load a referenced file with caching
    fn load_referenced_file(&mut self, path: &Path) -> LoaderResult<Arc<Value>> {
        if let Some(cached) = self.cache.get(path) {
            return Ok(Arc::clone(cached));
        }

        debug!(path = %path.display(), "loading referenced document");
        let content = Arc::new(self.parser.parse_file(path)?);
        self.cache.insert(path.to_path_buf(), Arc::clone(&content));
        Ok(content)
    }

    /// Clear the external document cache
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Number of external documents currently cached
    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

impl Default for ReferenceResolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Apply a JSON pointer (RFC 6901) to a document
pub fn apply_json_pointer<'a>(
    document: &'a Value,
    pointer: &str,
    reference: &str,
    source_path: &Path,
) -> LoaderResult<&'a Value> {
    if pointer.is_empty() {
        return Ok(document);
    }

    let fail = |reason: String| {
        LoaderError::reference_error(reference.to_string(), source_path.to_path_buf(), reason)
    };

    let Some(path) = pointer.strip_prefix('/') else {
        return Err(fail(format!("Pointer '{}' must start with '/'", pointer)));
    };

    let mut current = document;
    for segment in path.split('/') {
        let decoded_segment = segment.replace("~1", "/").replace("~0", "~");

        current = match current {
            Value::Object(obj) => obj
                .get(&decoded_segment)
                .ok_or_else(|| fail(format!("Property '{}' not found", decoded_segment)))?,
            Value::Array(arr) => {
                let index = decoded_segment
                    .parse::<usize>()
                    .map_err(|_| fail(format!("Invalid array index '{}'", decoded_segment)))?;
                arr.get(index)
                    .ok_or_else(|| fail(format!("Array index {} out of bounds", index)))?
            }
            _ => {
                return Err(fail(format!(
                    "Cannot access property '{}' on non-object/array",
                    decoded_segment
                )))
            }
        };
    }

    Ok(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::tempdir;

    fn resolve(document: Value) -> LoaderResult<Value> {
        let mut resolver = ReferenceResolver::new();
        let mut context = ResolverContext::new(None);
        resolver.resolve(document, None, &mut context)
    }

    #[test]
    fn test_internal_reference() -> LoaderResult<()> {
        let resolved = resolve(json!({
            "definitions": {
                "Pet": {"type": "object", "properties": {"name": {"type": "string"}}}
            },
            "schema": {"$ref": "#/definitions/Pet"}
        }))?;

        assert_eq!(resolved["schema"]["properties"]["name"]["type"], "string");
        Ok(())
    }

    #[test]
    fn test_nested_references_and_arrays() -> LoaderResult<()> {
        let resolved = resolve(json!({
            "definitions": {
                "Tag": {"type": "string"},
                "Pet": {"type": "object", "properties": {"tags": {"type": "array", "items": {"$ref": "#/definitions/Tag"}}}}
            },
            "list": [{"$ref": "#/definitions/Pet"}]
        }))?;

        assert_eq!(resolved["list"][0]["properties"]["tags"]["items"]["type"], "string");
        Ok(())
    }

    #[test]
    fn test_escaped_pointer_segments() -> LoaderResult<()> {
        let resolved = resolve(json!({
            "paths": {"/pets/{id}": {"get": {"operationId": "getPet"}}},
            "alias": {"$ref": "#/paths/~1pets~1{id}/get"}
        }))?;

        assert_eq!(resolved["alias"]["operationId"], "getPet");
        Ok(())
    }

    #[test]
    fn test_reference_shaped_payloads_are_kept() -> LoaderResult<()> {
        let document = json!({
            "schema": {
                "type": "object",
                "properties": {"$ref": {"type": "string"}},
                "example": {"$ref": "#/definitions/Missing"},
                "default": {"$ref": "#/nowhere"},
                "x-origin": {"$ref": "other.yaml"}
            }
        });

        let resolved = resolve(document.clone())?;
        assert_eq!(resolved, document);
        Ok(())
    }

    #[test]
    fn test_missing_pointer_is_reference_error() {
        let err = resolve(json!({"schema": {"$ref": "#/definitions/Missing"}})).unwrap_err();
        assert!(matches!(err, LoaderError::ReferenceError { .. }));
        assert!(err.to_string().contains("Missing"));
    }

    #[test]
    fn test_circular_reference_detected() {
        let err = resolve(json!({
            "definitions": {
                "Node": {"type": "object", "properties": {"next": {"$ref": "#/definitions/Node"}}}
            },
            "root": {"$ref": "#/definitions/Node"}
        }))
        .unwrap_err();

        assert!(matches!(err, LoaderError::CircularReference { .. }));
    }

    #[test]
    fn test_external_reference_requires_base_dir() {
        let err = resolve(json!({"schema": {"$ref": "common.yaml#/Error"}})).unwrap_err();
        assert!(matches!(err, LoaderError::ReferenceError { .. }));
    }

    #[test]
    fn test_external_reference() -> LoaderResult<()> {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("common.yaml"),
            "Error:\n  type: object\n  properties:\n    code:\n      $ref: '#/Code'\nCode:\n  type: integer\n",
        )
        .unwrap();

        let mut resolver = ReferenceResolver::new();
        let mut context = ResolverContext::new(Some(dir.path().to_path_buf()));
        let resolved = resolver.resolve(
            json!({"schema": {"$ref": "common.yaml#/Error"}, "again": {"$ref": "common.yaml#/Code"}}),
            None,
            &mut context,
        )?;

        assert_eq!(resolved["schema"]["properties"]["code"]["type"], "integer");
        assert_eq!(resolved["again"]["type"], "integer");
        assert_eq!(resolver.cache_size(), 1);
        Ok(())
    }

    #[test]
    fn test_external_reference_path_traversal() {
        let outer = tempdir().unwrap();
        let inner = outer.path().join("specs");
        fs::create_dir(&inner).unwrap();
        fs::write(outer.path().join("secret.yaml"), "value: 1\n").unwrap();

        let mut resolver = ReferenceResolver::new();
        let mut context = ResolverContext::new(Some(inner));
        let err = resolver
            .resolve(json!({"x": {"$ref": "../secret.yaml"}}), None, &mut context)
            .unwrap_err();

        assert!(matches!(err, LoaderError::PathTraversal { .. }));
    }

    #[test]
    fn test_json_pointer_into_arrays() {
        let doc = json!({"a": [{"b": 1}, {"b": 2}]});
        let path = Path::new("doc.json");
        assert_eq!(apply_json_pointer(&doc, "/a/1/b", "#/a/1/b", path).unwrap(), &json!(2));
        assert!(apply_json_pointer(&doc, "/a/7", "#/a/7", path).is_err());
        assert!(apply_json_pointer(&doc, "/a/x", "#/a/x", path).is_err());
        assert!(apply_json_pointer(&doc, "a", "#a", path).is_err());
        assert_eq!(apply_json_pointer(&doc, "", "#", path).unwrap(), &doc);
    }
}
