//! Document loading
//!
//! This module turns raw API description text into the normalized value the
//! renderer consumes:
//! - YAML and JSON parsing with key order preserved
//! - `$ref` resolution, internal and file-relative
//! - `allOf` flattening
//! - Structural validation
//!
//! # Example Usage
//!
//! ```rust
//! use specview_schemas::loader::DocumentLoader;
//!
//! let mut loader = DocumentLoader::new();
//! let document = loader.load_str(r#"
//! info:
//!   title: Pets
//! paths:
//!   /pets:
//!     get:
//!       tags: [pets]
//!       parameters: []
//!       responses:
//!         200:
//!           description: OK
//! "#)?;
//! assert_eq!(document["info"]["title"], "Pets");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Copyright (c) 2025 Specview Team
//! Licensed under the Apache-2.0 license

pub mod document_loader;
pub mod error;
mod keywords;
pub mod merge;
pub mod parser;
pub mod resolver;

pub use document_loader::{DocumentLoader, LoaderConfig, INLINE_SOURCE};
pub use error::{LoaderError, LoaderResult};
pub use merge::CompositionMerger;
pub use parser::{DocumentParser, Format};
pub use resolver::{apply_json_pointer, ReferenceResolver, ResolverContext, DEFAULT_MAX_DEPTH};
