//! Specview Core - static HTML previews of API description documents
//!
//! This crate turns an OpenAPI-style document into a single self-contained
//! HTML page describing every endpoint's parameters, request body, responses
//! and their nested schema structure.
//!
//! # Main Components
//!
//! - **Data model**: [`types`] normalizes document values into descriptors with defaults filled in
//! - **Renderers**: [`render`] holds the table, property tree and section builders
//! - **Generator**: [`PreviewGenerator`] runs loading, normalization and rendering
//!
//! # Example
//!
//! ```
//! use specview_core::generate_preview;
//!
//! let html = generate_preview(r#"
//! info:
//!   title: Pets
//! paths:
//!   /pets/{id}:
//!     get:
//!       operationId: getPet
//!       tags: [pets]
//!       parameters:
//!         - name: id
//!           in: path
//!           type: string
//!           required: true
//!       responses:
//!         200:
//!           description: OK
//! "#)?;
//! assert!(html.contains("getPet"));
//! # Ok::<(), specview_core::Error>(())
//! ```
//!
//! Copyright (c) 2025 Specview Team
//! Licensed under the Apache-2.0 license

pub mod error;
pub mod generator;
pub mod render;
pub mod types;

pub use error::{Error, Result};
pub use generator::{
    generate_preview, EndpointFailure, FailurePolicy, PreviewGenerator, PreviewOptions,
    PreviewReport,
};
pub use render::{ParameterSectionBuilder, PropertyTreeRenderer, ResponseSectionBuilder, TableRenderer};
pub use types::{
    ApiDocument, EndpointDescriptor, ParameterDescriptor, ParameterLocation, ResponseDescriptor,
    SchemaProperty,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
