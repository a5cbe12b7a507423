//! Specview Schemas - loading and validation of API description documents
//!
//! This crate prepares OpenAPI-style documents for rendering:
//! - **Parsing**: YAML and JSON, mapping key order preserved
//! - **Reference resolution**: `$ref` pointers inside the document and into sibling files
//! - **Composition merging**: `allOf` flattened into plain property mappings
//! - **Structural validation**: the fields the renderer relies on are present
//!
//! ## Quick Start
//!
//! ```rust
//! use specview_schemas::DocumentLoader;
//!
//! let mut loader = DocumentLoader::new();
//! let document = loader.load_str(r#"{
//!     "info": {"title": "Pets"},
//!     "paths": {"/pets": {"get": {"tags": ["pets"], "parameters": [], "responses": {}}}}
//! }"#)?;
//! assert!(document["paths"]["/pets"]["get"].is_object());
//! # Ok::<(), specview_schemas::LoaderError>(())
//! ```
//!
//! Copyright (c) 2025 Specview Team
//! Licensed under the Apache-2.0 license

pub mod loader;
pub mod validation;

pub use loader::{
    CompositionMerger, DocumentLoader, DocumentParser, Format, LoaderConfig, LoaderError,
    LoaderResult, ReferenceResolver, ResolverContext,
};
pub use validation::{
    is_http_method, DocumentValidator, ValidationError, ValidationErrors, ValidationResult,
    Violation, HTTP_METHODS,
};
