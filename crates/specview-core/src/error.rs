//! Error types for the Specview core library
//!
//! Copyright (c) 2025 Specview Team
//! Licensed under the Apache-2.0 license

use specview_schemas::LoaderError;
use thiserror::Error;

/// Main error type for Specview operations
#[derive(Error, Debug)]
pub enum Error {
    /// Parsing, reference resolution, merging or structural validation failed
    #[error(transparent)]
    Loader(#[from] LoaderError),

    /// A document-level field the renderer needs is missing or has the wrong shape
    #[error("Malformed document: {message}")]
    MalformedDocument { message: String },

    /// An operation lacks a field the renderer needs
    #[error("Malformed endpoint {} {path}: {reason}", .method.to_uppercase())]
    MalformedEndpoint {
        method: String,
        path: String,
        reason: String,
    },

    /// One endpoint section could not be rendered
    #[error("Failed to render endpoint {endpoint}: {source}")]
    Render {
        endpoint: String,
        #[source]
        source: Box<Error>,
    },

    /// JSON serialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn malformed_document(message: impl Into<String>) -> Self {
        Self::MalformedDocument {
            message: message.into(),
        }
    }

    pub fn malformed_endpoint(
        method: impl Into<String>,
        path: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::MalformedEndpoint {
            method: method.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Scope an error to the endpoint it occurred in
    pub fn render(endpoint: impl Into<String>, source: Error) -> Self {
        Self::Render {
            endpoint: endpoint.into(),
            source: Box::new(source),
        }
    }

    /// Whether the input document is at fault
    pub fn is_document_error(&self) -> bool {
        match self {
            Self::Loader(err) => err.is_document_error(),
            Self::Render { source, .. } => source.is_document_error(),
            Self::MalformedDocument { .. } | Self::MalformedEndpoint { .. } => true,
            Self::Json { .. } => false,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json {
            message: err.to_string(),
            source: err,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::malformed_endpoint("get", "/pets", "missing 'tags'");
        assert_eq!(err.to_string(), "Malformed endpoint GET /pets: missing 'tags'");

        let wrapped = Error::render("GET /pets", err);
        assert_eq!(
            wrapped.to_string(),
            "Failed to render endpoint GET /pets: Malformed endpoint GET /pets: missing 'tags'"
        );
        assert!(wrapped.is_document_error());
    }

    #[test]
    fn test_loader_errors_convert() {
        let loader_err = LoaderError::circular_reference(&["#/a".to_string(), "#/a".to_string()]);
        let err: Error = loader_err.into();
        assert!(matches!(err, Error::Loader(LoaderError::CircularReference { .. })));
        assert_eq!(err.to_string(), "Circular reference detected: #/a -> #/a");
    }
}
