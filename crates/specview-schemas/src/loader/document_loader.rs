//! Document loading pipeline: parse, resolve, merge, validate
//!
//! Copyright (c) 2025 Specview Team
//! Licensed under the Apache-2.0 license

use crate::loader::{
    error::{LoaderError, LoaderResult},
    merge::CompositionMerger,
    parser::DocumentParser,
    resolver::{ReferenceResolver, ResolverContext, DEFAULT_MAX_DEPTH},
};
use crate::validation::{DocumentValidator, ValidationErrors};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Label used for documents that did not come from a file
pub const INLINE_SOURCE: &str = "<inline>";

/// Configuration for document loader behavior
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Maximum reference chain length
    pub max_resolution_depth: usize,
    /// Whether to dereference `$ref` pointers
    pub resolve_refs: bool,
    /// Whether to flatten `allOf`
    pub merge_all_of: bool,
    /// Whether to run structural validation
    pub validate_structure: bool,
    /// Directory external references may point into. Defaults to the loaded file's directory.
    pub base_dir: Option<PathBuf>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            max_resolution_depth: DEFAULT_MAX_DEPTH,
            resolve_refs: true,
            merge_all_of: true,
            validate_structure: true,
            base_dir: None,
        }
    }
}

/// Produces normalized documents ready for rendering
pub struct DocumentLoader {
    config: LoaderConfig,
    parser: Arc<DocumentParser>,
    resolver: ReferenceResolver,
    merger: CompositionMerger,
    validator: Option<DocumentValidator>,
}

impl DocumentLoader {
    /// Create a loader with default configuration
    pub fn new() -> Self {
        Self::with_config(LoaderConfig::default())
    }

    /// Create a loader with custom configuration
    pub fn with_config(config: LoaderConfig) -> Self {
        let parser = Arc::new(DocumentParser::new());
        Self {
            resolver: ReferenceResolver::with_parser(Arc::clone(&parser)),
            parser,
            merger: CompositionMerger::new(),
            validator: None,
            config,
        }
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Load and normalize a document file
    pub fn load_file(&mut self, path: &Path) -> LoaderResult<Value> {
        let document = self.parser.parse_file(path)?;
        debug!(path = %path.display(), "parsed document");

        let source = path
            .canonicalize()
            .map_err(|e| LoaderError::io_error(path.to_path_buf(), e))?;
        let base_dir = self
            .config
            .base_dir
            .clone()
            .or_else(|| source.parent().map(Path::to_path_buf));

        self.normalize(document, Some(&source), base_dir, path)
    }

    /// Load and normalize document text of unknown format
    pub fn load_str(&mut self, content: &str) -> LoaderResult<Value> {
        let label = Path::new(INLINE_SOURCE);
        let (document, format) = self.parser.parse_with_fallback(content, label)?;
        debug!(?format, "parsed inline document");

        let base_dir = self.config.base_dir.clone();
        self.normalize(document, None, base_dir, label)
    }

    fn normalize(
        &mut self,
        mut document: Value,
        source: Option<&Path>,
        base_dir: Option<PathBuf>,
        label: &Path,
    ) -> LoaderResult<Value> {
        if self.config.resolve_refs {
            let mut context = ResolverContext::new(base_dir);
            context.max_depth = self.config.max_resolution_depth;
            document = self.resolver.resolve(document, source, &mut context)?;
            debug!(path = %label.display(), "resolved references");
        }

        if self.config.merge_all_of {
            document = self.merger.merge(document)?;
            debug!(path = %label.display(), "merged compositions");
        }

        if self.config.validate_structure {
            self.validate(&document)
                .map_err(|errors| LoaderError::Invalid {
                    path: label.to_path_buf(),
                    errors,
                })?;
            debug!(path = %label.display(), "validated structure");
        }

        Ok(document)
    }

    /// Run structural validation on an already-normalized document
    pub fn validate(&mut self, document: &Value) -> Result<(), ValidationErrors> {
        let validator = match self.validator.take() {
            Some(validator) => validator,
            None => DocumentValidator::new()?,
        };
        let result = validator.validate(document);
        self.validator = Some(validator);
        result
    }

    /// Drop cached external documents
    pub fn clear_cache(&mut self) {
        self.resolver.clear_cache();
    }
}

impl Default for DocumentLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const PETS: &str = r##"
swagger: "2.0"
info:
  title: Pets
basePath: /pet-store/v1
paths:
  /pets:
    post:
      tags: [pets]
      parameters:
        - name: body
          in: body
          schema:
            $ref: "#/definitions/NewPet"
      responses:
        200:
          description: OK
definitions:
  Named:
    properties:
      name:
        type: string
    required: [name]
  NewPet:
    allOf:
      - $ref: "#/definitions/Named"
      - properties:
          age:
            type: integer
"##;

    #[test]
    fn test_load_str_runs_full_pipeline() -> LoaderResult<()> {
        let mut loader = DocumentLoader::new();
        let document = loader.load_str(PETS)?;

        let schema = &document["paths"]["/pets"]["post"]["parameters"][0]["schema"];
        let keys: Vec<&String> = schema["properties"].as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["name", "age"]);
        assert_eq!(schema["required"][0], "name");
        Ok(())
    }

    #[test]
    fn test_load_file_with_external_reference() -> LoaderResult<()> {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("common.yaml"), "Error:\n  properties:\n    code:\n      type: integer\n").unwrap();
        let api = dir.path().join("api.yaml");
        fs::write(
            &api,
            "info:\n  title: T\npaths:\n  /a:\n    get:\n      tags: [a]\n      parameters: []\n      responses:\n        default:\n          schema:\n            $ref: common.yaml#/Error\n",
        )
        .unwrap();

        let mut loader = DocumentLoader::new();
        let document = loader.load_file(&api)?;
        assert_eq!(
            document["paths"]["/a"]["get"]["responses"]["default"]["schema"]["properties"]["code"]["type"],
            "integer"
        );
        Ok(())
    }

    #[test]
    fn test_invalid_document_is_rejected() {
        let mut loader = DocumentLoader::new();
        let err = loader
            .load_str("info:\n  title: T\npaths:\n  /a:\n    get:\n      responses: {}\n")
            .unwrap_err();

        match err {
            LoaderError::Invalid { path, errors } => {
                assert_eq!(path, PathBuf::from(INLINE_SOURCE));
                assert!(!errors.is_empty());
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_pipeline_steps_can_be_disabled() -> LoaderResult<()> {
        let mut loader = DocumentLoader::with_config(LoaderConfig {
            resolve_refs: false,
            merge_all_of: false,
            validate_structure: false,
            ..LoaderConfig::default()
        });

        let document = loader.load_str(r##"{"a": {"$ref": "#/b"}, "b": {"allOf": []}}"##)?;
        assert_eq!(document["a"]["$ref"], "#/b");
        assert!(document["b"]["allOf"].is_array());
        Ok(())
    }

    #[test]
    fn test_missing_file() {
        let mut loader = DocumentLoader::new();
        let err = loader.load_file(Path::new("/nonexistent/api.yaml")).unwrap_err();
        assert!(matches!(err, LoaderError::IoError { .. }));
    }
}
