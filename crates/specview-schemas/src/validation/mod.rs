//! Structural validation
//!
//! Documents that fail here never reach the renderer. See [`DocumentValidator`]
//! for the rules.
//!
//! Copyright (c) 2025 Specview Team
//! Licensed under the Apache-2.0 license

pub mod document;
pub mod error;

pub use document::{escape_pointer_segment, is_http_method, DocumentValidator, HTTP_METHODS};
pub use error::{ValidationError, ValidationErrors, ValidationResult, Violation};
