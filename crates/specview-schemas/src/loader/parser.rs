//! Document parsing for YAML and JSON formats
//!
//! Mapping key order is preserved end to end: YAML mappings are ordered and
//! `serde_json` is built with `preserve_order`, so the renderer sees paths,
//! properties and responses in the order they were written.
//!
//! Copyright (c) 2025 Specview Team
//! Licensed under the Apache-2.0 license

use crate::loader::error::{LoaderError, LoaderResult};
use serde_json::Value;
use std::path::Path;
use tracing::trace;

/// Supported document formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// YAML format (.yaml, .yml)
    Yaml,
    /// JSON format (.json)
    Json,
}

impl Format {
    /// Detect format from file extension
    pub fn from_path(path: &Path) -> LoaderResult<Self> {
        if let Some(extension) = path.extension().and_then(|ext| ext.to_str()) {
            match extension.to_lowercase().as_str() {
                "yaml" | "yml" => Ok(Format::Yaml),
                "json" => Ok(Format::Json),
                _ => Err(LoaderError::unsupported_format(path.to_path_buf())),
            }
        } else {
            Err(LoaderError::unsupported_format(path.to_path_buf()))
        }
    }

    /// Get the primary file extension for this format
    pub fn primary_extension(&self) -> &'static str {
        match self {
            Format::Yaml => "yaml",
            Format::Json => "json",
        }
    }
}

/// Parser turning raw document text into a `serde_json::Value`
#[derive(Debug, Default)]
pub struct DocumentParser;

impl DocumentParser {
    /// Create a new document parser
    pub fn new() -> Self {
        Self
    }

    /// Parse a document file, detecting format from extension
    pub fn parse_file(&self, path: &Path) -> LoaderResult<Value> {
        let format = Format::from_path(path)?;
        let content = std::fs::read_to_string(path)
            .map_err(|e| LoaderError::io_error(path.to_path_buf(), e))?;

        self.parse_content(&content, format, path)
    }

    /// Parse document content with explicit format
    pub fn parse_content(&self, content: &str, format: Format, path: &Path) -> LoaderResult<Value> {
        let content = normalize_line_endings(content);
        trace!(path = %path.display(), ?format, bytes = content.len(), "parsing document");
        match format {
            Format::Yaml => self.parse_yaml(&content, path),
            Format::Json => self.parse_json(&content, path),
        }
    }

    /// Parse YAML content
    pub fn parse_yaml(&self, content: &str, path: &Path) -> LoaderResult<Value> {
        let yaml_value: serde_yaml::Value = serde_yaml::from_str(content)
            .map_err(|e| LoaderError::yaml_parse_error(path.to_path_buf(), e))?;

        // Integer mapping keys (`200:` under `responses`) become their decimal string form here
        serde_json::to_value(yaml_value)
            .map_err(|e| LoaderError::json_parse_error(path.to_path_buf(), e))
    }

    /// Parse JSON content
    pub fn parse_json(&self, content: &str, path: &Path) -> LoaderResult<Value> {
        serde_json::from_str(content)
            .map_err(|e| LoaderError::json_parse_error(path.to_path_buf(), e))
    }

    /// Parse content whose format is not known up front.
    ///
    /// The extension is tried first, then JSON (the stricter grammar), then YAML.
    pub fn parse_with_fallback(&self, content: &str, path: &Path) -> LoaderResult<(Value, Format)> {
        if let Ok(format) = Format::from_path(path) {
            if let Ok(value) = self.parse_content(content, format, path) {
                return Ok((value, format));
            }
        }

        if let Ok(value) = self.parse_content(content, Format::Json, path) {
            return Ok((value, Format::Json));
        }

        // Report the YAML error: it is the most permissive grammar, so its message is the useful one
        let value = self.parse_content(content, Format::Yaml, path)?;
        Ok((value, Format::Yaml))
    }
}

/// Normalize line endings to Unix style
pub fn normalize_line_endings(content: &str) -> String {
    content.replace("\r\n", "\n").replace('\r', "\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_format_detection() {
        assert_eq!(Format::from_path(Path::new("api.yaml")).unwrap(), Format::Yaml);
        assert_eq!(Format::from_path(Path::new("api.YML")).unwrap(), Format::Yaml);
        assert_eq!(Format::from_path(Path::new("api.json")).unwrap(), Format::Json);

        assert!(Format::from_path(Path::new("api.txt")).is_err());
        assert!(Format::from_path(Path::new("api")).is_err());
        assert_eq!(Format::Yaml.primary_extension(), "yaml");
    }

    #[test]
    fn test_yaml_parsing_preserves_key_order() -> LoaderResult<()> {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("api.yaml");

        let yaml_content = r#"
swagger: "2.0"
paths:
  /zebra:
    get: {}
  /apple:
    get: {}
  /mango:
    get: {}
"#;
        fs::write(&file_path, yaml_content).unwrap();

        let parser = DocumentParser::new();
        let result = parser.parse_file(&file_path)?;

        let keys: Vec<&String> = result["paths"].as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["/zebra", "/apple", "/mango"]);
        Ok(())
    }

    #[test]
    fn test_yaml_integer_keys_become_strings() -> LoaderResult<()> {
        let parser = DocumentParser::new();
        let yaml = "responses:\n  200:\n    description: OK\n  404:\n    description: Missing\n";
        let value = parser.parse_content(yaml, Format::Yaml, Path::new("inline.yaml"))?;

        assert_eq!(value["responses"]["200"]["description"], "OK");
        let keys: Vec<&String> = value["responses"].as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["200", "404"]);
        Ok(())
    }

    #[test]
    fn test_json_parsing() -> LoaderResult<()> {
        let parser = DocumentParser::new();
        let value = parser.parse_content(
            r#"{"info": {"title": "Pets"}, "paths": {}}"#,
            Format::Json,
            Path::new("api.json"),
        )?;
        assert_eq!(value["info"]["title"], "Pets");
        Ok(())
    }

    #[test]
    fn test_fallback_parsing() -> LoaderResult<()> {
        let parser = DocumentParser::new();

        let (value, format) = parser.parse_with_fallback(r#"{"id": "test"}"#, Path::new("<inline>"))?;
        assert_eq!(format, Format::Json);
        assert_eq!(value["id"], "test");

        let (value, format) = parser.parse_with_fallback("id: test\r\nname: x", Path::new("<inline>"))?;
        assert_eq!(format, Format::Yaml);
        assert_eq!(value["name"], "x");

        let err = parser.parse_with_fallback("a: [unclosed", Path::new("<inline>")).unwrap_err();
        assert!(matches!(err, LoaderError::YamlParseError { .. }));
        Ok(())
    }

    #[test]
    fn test_line_ending_normalization() {
        assert_eq!(normalize_line_endings("line1\r\nline2\rline3\n"), "line1\nline2\nline3\n");
    }
}
