//! Error types for document loading operations
//!
//! Copyright (c) 2025 Specview Team
//! Licensed under the Apache-2.0 license

use crate::validation::ValidationErrors;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for loader operations
pub type LoaderResult<T> = Result<T, LoaderError>;

/// Errors raised while turning raw document text into a normalized value
#[derive(Error, Debug)]
pub enum LoaderError {
    /// File I/O errors
    #[error("Failed to read file '{path}': {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    /// YAML parsing errors
    #[error("Failed to parse YAML document '{path}': {source}")]
    YamlParseError {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    /// JSON parsing errors
    #[error("Failed to parse JSON document '{path}': {source}")]
    JsonParseError {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Unsupported file format
    #[error("Unsupported file format for '{path}'. Expected .yaml, .yml, or .json")]
    UnsupportedFormat { path: PathBuf },

    /// A `$ref` pointer could not be followed
    #[error("Failed to resolve reference '{reference}' in '{source_path}': {reason}")]
    ReferenceError {
        reference: String,
        source_path: PathBuf,
        reason: String,
    },

    /// Circular reference detection
    #[error("Circular reference detected: {chain}")]
    CircularReference { chain: String },

    /// Path traversal security error
    #[error("Path traversal detected in reference '{reference}' from '{source_path}'")]
    PathTraversal {
        reference: String,
        source_path: PathBuf,
    },

    /// An `allOf` keyword that cannot be flattened
    #[error("Failed to merge composition at '{pointer}': {reason}")]
    MergeError { pointer: String, reason: String },

    /// The document does not have the structure the renderer relies on
    #[error("Document '{path}' failed structural validation:\n{errors}")]
    Invalid {
        path: PathBuf,
        errors: ValidationErrors,
    },
}

impl LoaderError {
    /// Create an I/O error with path context
    pub fn io_error(path: PathBuf, error: std::io::Error) -> Self {
        Self::IoError {
            path,
            source: error,
        }
    }

    /// Create a YAML parsing error with path context
    pub fn yaml_parse_error(path: PathBuf, error: serde_yaml::Error) -> Self {
        Self::YamlParseError {
            path,
            source: error,
        }
    }

    /// Create a JSON parsing error with path context
    pub fn json_parse_error(path: PathBuf, error: serde_json::Error) -> Self {
        Self::JsonParseError {
            path,
            source: error,
        }
    }

    /// Create an unsupported format error
    pub fn unsupported_format(path: PathBuf) -> Self {
        Self::UnsupportedFormat { path }
    }

    /// Create a reference resolution error
    pub fn reference_error(reference: String, source_path: PathBuf, reason: String) -> Self {
        Self::ReferenceError {
            reference,
            source_path,
            reason,
        }
    }

    /// Create a circular reference error from the chain of references being followed
    pub fn circular_reference(chain: &[String]) -> Self {
        Self::CircularReference {
            chain: chain.join(" -> "),
        }
    }

    /// Create a path traversal error
    pub fn path_traversal(reference: String, source_path: PathBuf) -> Self {
        Self::PathTraversal {
            reference,
            source_path,
        }
    }

    /// Create a merge error
    pub fn merge_error(pointer: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MergeError {
            pointer: pointer.into(),
            reason: reason.into(),
        }
    }

    /// Get the path associated with this error, if any
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::IoError { path, .. } => Some(path),
            Self::YamlParseError { path, .. } => Some(path),
            Self::JsonParseError { path, .. } => Some(path),
            Self::UnsupportedFormat { path } => Some(path),
            Self::ReferenceError { source_path, .. } => Some(source_path),
            Self::PathTraversal { source_path, .. } => Some(source_path),
            Self::Invalid { path, .. } => Some(path),
            _ => None,
        }
    }

    /// Whether the document itself is at fault (as opposed to the environment)
    pub fn is_document_error(&self) -> bool {
        !matches!(self, Self::IoError { .. })
    }
}
